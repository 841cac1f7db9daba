// extensions/mod.rs
//
// Optional extension modules.
// Decoupled from core Entity/Scene: games opt in by creating these systems.

pub mod orbit_controls;
pub mod transform;

pub use orbit_controls::OrbitControls;
pub use transform::{LocalTransform, TransformGraph, WorldTransform};
