use orrery_engine::bridge::protocol::{FrameCounts, HEADER_FLOATS};
use orrery_engine::systems::render::build_render_buffer;
use orrery_engine::{
    CameraUniform, EngineContext, EngineError, FixedTimestep, Game, GameConfig, InputEvent,
    InputQueue, OverlayState, ProtocolLayout, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!` and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    camera_uniform: CameraUniform,
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::from_config(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(config.max_mesh_instances),
            timestep: FixedTimestep::new(config.tick_policy()),
            layout: ProtocolLayout::from_config(&config),
            header: [0.0; HEADER_FLOATS],
            camera_uniform,
            frame: 0,
            config,
            game,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.apply_config();
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_meshes();
        self.publish();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: update the game, then rebuild the frame buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
        }

        // Input is kept until an update has seen it.
        if steps > 0 {
            self.input.drain();
        }

        self.rebuild_meshes();

        self.frame = self.frame.wrapping_add(1);
        self.publish();
    }

    /// Resize the drawing surface. Empty sizes (minimised tab) are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        match self.ctx.resize(width, height) {
            Ok(()) => {
                log::debug!("viewport resized to {width}x{height}");
                self.input.push(InputEvent::Resize { width, height });
                self.publish();
            }
            Err(err) => log::debug!("resize ignored: {err}"),
        }
    }

    /// Hand a JSON document to the game. On success the scene is rebuilt
    /// from scratch; on failure the running scene is left untouched.
    pub fn load_config(&mut self, json: &str) -> Result<(), EngineError> {
        if let Err(err) = self.game.reconfigure(json) {
            log::warn!("configuration rejected: {err}");
            return Err(err);
        }

        let viewport = self.ctx.viewport;
        self.apply_config();
        self.ctx.viewport = viewport;
        self.ctx.camera.set_aspect(viewport.aspect());
        self.input.drain();

        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_meshes();
        self.publish();
        log::info!("configuration reloaded: {} entities", self.ctx.scene.len());
        Ok(())
    }

    fn apply_config(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.tick_policy());
        self.render_buffer = RenderBuffer::new(self.config.max_mesh_instances);
        self.ctx.reset(&self.config);
    }

    fn rebuild_meshes(&mut self) {
        self.ctx.propagate_transforms();
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
    }

    fn publish(&mut self) {
        let counts = FrameCounts {
            mesh_instances: self.render_buffer.instances.len(),
            line_vertices: self.ctx.lines.vertex_count(),
            point_vertices: self.ctx.points.len(),
            lights: self.ctx.lights.count(),
            events: self.ctx.events.len(),
        };
        let viewport = (self.ctx.viewport.width, self.ctx.viewport.height);
        self.header = self.layout.header(self.frame, counts, viewport);
        self.camera_uniform = self.ctx.camera.uniform();
    }

    // ---- State access ----

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayState {
        &mut self.ctx.overlay
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn mesh_instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn mesh_instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.ctx.lines.buffer_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.ctx.lines.vertex_count() as u32
    }

    pub fn point_vertices_ptr(&self) -> *const f32 {
        self.ctx.points.buffer_ptr()
    }

    pub fn point_vertex_count(&self) -> u32 {
        self.ctx.points.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport.width
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport.height
    }

    // ---- Capacity accessors ----

    pub fn max_mesh_instances(&self) -> u32 {
        self.layout.max_mesh_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_point_vertices(&self) -> u32 {
        self.layout.max_point_vertices as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_MESH_INSTANCE_COUNT};
    use orrery_engine::{Entity, GameEvent, MeshComponent, Rgb};

    /// One sphere that moves +1 on X per update and counts what it sees.
    struct Stepper {
        lockstep: bool,
        updates: u32,
        clicks: u32,
        resizes: u32,
        spheres: usize,
    }

    impl Stepper {
        fn new(lockstep: bool) -> Self {
            Self { lockstep, updates: 0, clicks: 0, resizes: 0, spheres: 1 }
        }
    }

    impl Game for Stepper {
        fn config(&self) -> GameConfig {
            GameConfig { lockstep: self.lockstep, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            for _ in 0..self.spheres {
                let id = ctx.next_id();
                ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::sphere(1.0, Rgb::WHITE)));
            }
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                match event {
                    InputEvent::PointerUp { .. } => self.clicks += 1,
                    InputEvent::Resize { .. } => self.resizes += 1,
                    _ => {}
                }
            }
            for entity in ctx.scene.iter_mut() {
                entity.pos += Vec3::X;
            }
            ctx.emit_event(GameEvent::new(1.0, self.updates as f32, 0.0, 0.0));
        }

        fn reconfigure(&mut self, json: &str) -> orrery_engine::error::Result<()> {
            self.spheres = json
                .trim()
                .parse()
                .map_err(|_| EngineError::Config(format!("not a count: {json}")))?;
            Ok(())
        }
    }

    #[test]
    fn lockstep_runs_one_update_per_tick() {
        let mut runner = GameRunner::new(Stepper::new(true));
        runner.init();
        runner.tick(0.5);
        runner.tick(0.0);
        assert_eq!(runner.game().updates, 2);
        assert_eq!(runner.render_buffer().instances[0].x, 2.0);
        assert_eq!(runner.header()[HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(runner.header()[HEADER_MESH_INSTANCE_COUNT], 1.0);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn fixed_mode_keeps_input_until_an_update_runs() {
        let mut runner = GameRunner::new(Stepper::new(false));
        runner.init();
        runner.push_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().updates, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().updates, 1);
        assert_eq!(runner.game().clicks, 1);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().clicks, 1);
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Stepper::new(true));
        runner.tick(1.0);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn resize_updates_camera_and_notifies_game() {
        let mut runner = GameRunner::new(Stepper::new(true));
        runner.init();
        runner.resize(1000.0, 500.0);
        runner.resize(0.0, 0.0);
        runner.tick(0.016);
        assert_eq!(runner.context().camera.aspect, 2.0);
        assert_eq!(runner.viewport_width(), 1000.0);
        assert_eq!(runner.game().resizes, 1);
    }

    #[test]
    fn load_config_rebuilds_scene_and_keeps_viewport() {
        let mut runner = GameRunner::new(Stepper::new(true));
        runner.init();
        runner.resize(640.0, 480.0);
        runner.load_config("3").unwrap();
        assert_eq!(runner.context().scene.len(), 3);
        assert_eq!(runner.mesh_instance_count(), 3);
        assert_eq!(runner.viewport_width(), 640.0);
        assert_eq!(runner.context().camera.aspect, 640.0 / 480.0);
    }

    #[test]
    fn rejected_config_keeps_running_scene() {
        let mut runner = GameRunner::new(Stepper::new(true));
        runner.init();
        runner.tick(0.016);
        assert!(runner.load_config("many").is_err());
        assert_eq!(runner.context().scene.len(), 1);
        runner.tick(0.016);
        assert_eq!(runner.render_buffer().instances[0].x, 2.0);
    }
}
