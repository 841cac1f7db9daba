pub mod lighting;
pub mod overlay;
pub mod picking;
pub mod primitives;
pub mod render;
