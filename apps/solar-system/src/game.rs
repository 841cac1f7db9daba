/// Solar System: animated orrery with circular orbits.
///
/// Meshes, orbit lines and a starfield; no physics.
/// Camera: drag to orbit, scroll to dolly, click a planet to identify it.

use glam::Vec2;
use orrery_engine::{
    CameraConfig, EngineContext, EngineError, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    LabelId, OrbitControls, PerspectiveCamera,
};

use crate::bodies::SystemConfig;
use crate::scene::build_scene;
use crate::sim::{self, SimState};

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_RESET_VIEW: u32 = 1;

// ── Game event kinds to the page ─────────────────────────────────────

/// `a` = clock value after this tick.
const EVENT_CLOCK: f32 = 1.0;
/// `a` = planet index in the table.
const EVENT_SELECTION: f32 = 2.0;

// ── Interaction ──────────────────────────────────────────────────────

/// Pixel distance before a press becomes a drag instead of a click.
const DRAG_THRESHOLD: f32 = 5.0;
const MIN_CAMERA_DISTANCE: f32 = 3.0;
const MAX_CAMERA_DISTANCE: f32 = 500.0;

/// Element that receives the selected planet's name.
const DETAILS_ELEMENT: &str = "details";

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Vec2,
    last: Vec2,
    moved: bool,
}

pub struct SolarSystem {
    system: SystemConfig,
    state: SimState,
    controls: OrbitControls,
    sun_label: Option<LabelId>,
    drag: Option<Drag>,
    selected: Option<String>,
}

impl SolarSystem {
    /// Load the embedded body table.
    ///
    /// # Panics
    ///
    /// If the embedded table fails validation. That is a build defect, not
    /// a runtime condition, so startup stops here.
    pub fn new() -> Self {
        let system = SystemConfig::load().unwrap_or_else(|err| {
            log::error!("embedded solar system config is invalid: {err}");
            panic!("embedded solar system config is invalid: {err}")
        });
        Self::with_config(system)
    }

    pub fn with_config(system: SystemConfig) -> Self {
        Self {
            state: SimState::new(system.time_step),
            controls: OrbitControls::from_camera(&PerspectiveCamera::default()),
            system,
            sun_label: None,
            drag: None,
            selected: None,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn select_at(&mut self, ctx: &mut EngineContext, pixel: Vec2) {
        let picked = sim::pick_planet(&self.state, &ctx.scene, &ctx.camera, &ctx.viewport, pixel)
            .map(|node| (node.body.name.clone(), self.state.planet_index(node.id)));
        // A miss leaves the previous selection on screen.
        let Some((name, index)) = picked else { return };

        log::info!("selected {name}");
        ctx.overlay.set_text(DETAILS_ELEMENT, format!("Selected Planet: {name}"));
        if let Some(index) = index {
            ctx.emit_event(GameEvent::new(EVENT_SELECTION, index as f32, 0.0, 0.0));
        }
        self.selected = Some(name);
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let pos = Vec2::new(x, y);
                    self.drag = Some(Drag { start: pos, last: pos, moved: false });
                }
                InputEvent::PointerMove { x, y } => {
                    let pos = Vec2::new(x, y);
                    if let Some(drag) = &mut self.drag {
                        if pos.distance(drag.start) > DRAG_THRESHOLD {
                            drag.moved = true;
                        }
                        if drag.moved {
                            let delta = pos - drag.last;
                            self.controls.rotate(delta.x, delta.y);
                        }
                        drag.last = pos;
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    let pos = Vec2::new(x, y);
                    if let Some(drag) = self.drag.take() {
                        if !drag.moved && pos.distance(drag.start) <= DRAG_THRESHOLD {
                            self.select_at(ctx, pos);
                        }
                    }
                }
                InputEvent::Wheel { delta } => self.controls.dolly(delta),
                InputEvent::Custom { kind: CUSTOM_RESET_VIEW, .. } => self.controls.reset(),
                _ => {}
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        let planets = self.system.planets.len();
        let segments = self.system.orbit_segments.max(1) as usize;
        GameConfig {
            lockstep: true,
            max_mesh_instances: 1 + planets + self.system.moons.len(),
            max_line_vertices: planets * segments * 2,
            max_point_vertices: self.system.starfield.count,
            max_lights: 1,
            max_events: 8,
            camera: CameraConfig {
                position: self.system.camera.position,
                target: self.system.camera.target,
                ..CameraConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let handles = build_scene(&self.system, ctx, &mut rand::thread_rng());
        self.state = handles.state;
        self.sun_label = handles.sun_label;
        self.controls = OrbitControls::from_camera(&ctx.camera)
            .with_distance_limits(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        self.drag = None;
        self.selected = None;
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // Picking sees the frame the user clicked on, so input goes first.
        self.handle_input(ctx, input);

        sim::advance(&mut self.state, &mut ctx.transforms);
        ctx.propagate_transforms();
        self.controls.update(&mut ctx.camera);

        if let Some(label) = self.sun_label {
            let screen = sim::sun_label_position(&self.state, &ctx.scene, &ctx.camera, &ctx.viewport);
            ctx.overlay.set_label_position(label, screen);
        }

        ctx.emit_event(GameEvent::new(EVENT_CLOCK, self.state.clock.t() as f32, 0.0, 0.0));
    }

    fn reconfigure(&mut self, json: &str) -> Result<(), EngineError> {
        let system = SystemConfig::from_json(json).map_err(|err| EngineError::Config(err.to_string()))?;
        log::info!("solar system reconfigured: {} planets, {} moons", system.planets.len(), system.moons.len());
        self.system = system;
        Ok(())
    }
}
