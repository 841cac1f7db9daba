//! Simulation state and the two operations that touch it every frame:
//! advancing the orbits and picking a planet under the pointer.

use glam::Vec2;
use orrery_engine::{pick_nearest, EntityId, PerspectiveCamera, Scene, TransformGraph, Viewport};

use crate::bodies::CelestialBody;
use crate::orbit::{circular_offset, SimClock};

/// A planet's transform node, orbiting the scene origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingNode {
    pub id: EntityId,
    pub body: CelestialBody,
}

/// A moon's transform node, parented to its planet's node.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonNode {
    pub id: EntityId,
    pub parent: EntityId,
    pub body: CelestialBody,
}

/// Everything the per-tick updater and the picker need, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub clock: SimClock,
    pub sun: Option<EntityId>,
    pub planets: Vec<OrbitingNode>,
    pub moons: Vec<MoonNode>,
}

impl SimState {
    pub fn new(time_step: f64) -> Self {
        Self {
            clock: SimClock::new(time_step),
            sun: None,
            planets: Vec::new(),
            moons: Vec::new(),
        }
    }

    pub fn planet(&self, name: &str) -> Option<&OrbitingNode> {
        self.planets.iter().find(|p| p.body.name == name)
    }

    pub fn planet_index(&self, id: EntityId) -> Option<usize> {
        self.planets.iter().position(|p| p.id == id)
    }
}

/// Write every node's local offset for the current clock value, then step
/// the clock. Call `propagate` on the graph afterwards to move the meshes.
pub fn advance(state: &mut SimState, transforms: &mut TransformGraph) {
    let t = state.clock.t();
    for planet in &state.planets {
        let body = &planet.body;
        transforms.set_offset(planet.id, circular_offset(body.orbital_distance, body.angular_speed, t));
    }
    for moon in &state.moons {
        let body = &moon.body;
        transforms.set_offset(moon.id, circular_offset(body.orbital_distance, body.angular_speed, t));
    }
    state.clock.advance();
}

/// The planet under a pointer position given in viewport pixels, if any.
/// Only planets are candidates: the sun, moons and stars never match.
pub fn pick_planet<'a>(
    state: &'a SimState,
    scene: &Scene,
    camera: &PerspectiveCamera,
    viewport: &Viewport,
    pixel: Vec2,
) -> Option<&'a OrbitingNode> {
    let ray = camera.ray_from_ndc(viewport.pixels_to_ndc(pixel));
    let candidates: Vec<EntityId> = state.planets.iter().map(|p| p.id).collect();
    let hit = pick_nearest(&ray, scene, &candidates)?;
    state.planets.iter().find(|p| p.id == hit.id)
}

/// Pixel position of the sun's label for the current camera.
///
/// `None` hides the label: no sun in the scene, or the sun is behind the
/// camera or past its far plane.
pub fn sun_label_position(
    state: &SimState,
    scene: &Scene,
    camera: &PerspectiveCamera,
    viewport: &Viewport,
) -> Option<Vec2> {
    let sun = scene.get(state.sun?)?;
    camera.world_to_pixels(sun.pos, viewport)
}
