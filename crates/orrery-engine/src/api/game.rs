use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::core::time::TickPolicy;
use crate::error::{EngineError, Result};
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{CameraConfig, PerspectiveCamera};
use crate::renderer::viewport::Viewport;
use crate::systems::lighting::LightState;
use crate::systems::overlay::OverlayState;
use crate::systems::primitives::{LineState, PointCloud};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60). Ignored in lockstep mode.
    pub fixed_dt: f32,
    /// Run exactly one update per host frame instead of accumulating time.
    pub lockstep: bool,
    /// Initial drawing surface size in CSS pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Maximum mesh instances per frame (default: 256).
    pub max_mesh_instances: usize,
    /// Maximum line vertices per frame (default: 16384).
    pub max_line_vertices: usize,
    /// Maximum point vertices per frame (default: 16384).
    pub max_point_vertices: usize,
    /// Maximum point lights (default: 8).
    pub max_lights: usize,
    /// Maximum game events per frame (default: 32).
    pub max_events: usize,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            lockstep: false,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_mesh_instances: 256,
            max_line_vertices: 16384,
            max_point_vertices: 16384,
            max_lights: 8,
            max_events: 32,
            camera: CameraConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn tick_policy(&self) -> TickPolicy {
        if self.lockstep {
            TickPolicy::Lockstep
        } else {
            TickPolicy::Fixed { dt: self.fixed_dt }
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init and after a reconfigure.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Move bodies, react to input, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Replace the game's data from a JSON document. On success the runner
    /// resets the context and calls `init` again.
    fn reconfigure(&mut self, _json: &str) -> Result<()> {
        Err(EngineError::Config("this game does not accept runtime configuration".into()))
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub transforms: TransformGraph,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub lights: LightState,
    pub lines: LineState,
    pub points: PointCloud,
    pub overlay: OverlayState,
    pub events: Vec<GameEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height).unwrap_or_default();
        Self {
            scene: Scene::new(),
            transforms: TransformGraph::new(),
            camera: PerspectiveCamera::from_config(&config.camera, viewport.aspect()),
            viewport,
            lights: LightState::with_capacity(config.max_lights),
            lines: LineState::new(config.max_line_vertices),
            points: PointCloud::new(config.max_point_vertices),
            overlay: OverlayState::new(),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Drop all state and rebuild from `config`. Entity ids restart at 1.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::from_config(config);
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the page.
    /// Events past the per-frame capacity are dropped with a warning.
    pub fn emit_event(&mut self, event: GameEvent) -> bool {
        if self.events.len() >= self.max_events {
            log::warn!("event capacity {} reached, event {} dropped", self.max_events, event.kind);
            return false;
        }
        self.events.push(event);
        true
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Resize the drawing surface and keep the camera aspect in step.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        Ok(())
    }

    /// Push the transform hierarchy into entity world positions.
    pub fn propagate_transforms(&mut self) {
        self.transforms.propagate(&mut self.scene);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
