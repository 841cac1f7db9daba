pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent};
pub use bridge::protocol::{FrameCounts, ProtocolLayout};
pub use components::entity::Entity;
pub use components::mesh::{Material, MeshComponent, MeshShape, Rgb};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TickPolicy};
pub use error::EngineError;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraConfig, CameraUniform, PerspectiveCamera};
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::viewport::Viewport;
pub use systems::lighting::{LightState, PointLight};
pub use systems::overlay::{LabelId, OverlayState, ScreenLabel};
pub use systems::picking::{pick_nearest, Ray, RayHit};
pub use systems::primitives::{circle_points, LineState, LineVertex, PointCloud, PointVertex};

// Extensions: decoupled optional systems
pub use extensions::{LocalTransform, OrbitControls, TransformGraph, WorldTransform};
