use glam::Vec3;
use orrery_engine::{
    circle_points, EngineContext, Entity, LabelId, LocalTransform, Material, MeshComponent,
    PointLight,
};
use rand::Rng;

use crate::bodies::SystemConfig;
use crate::sim::{MoonNode, OrbitingNode, SimState};
use crate::starfield::generate_starfield;

/// Handles produced by `build_scene`, used by the updater and the picker.
pub struct SceneHandles {
    pub state: SimState,
    pub sun_label: Option<LabelId>,
}

/// Build the static scene once: lights, sun, planets, moons, orbit rings,
/// starfield and the sun label. Planets start at `(distance, 0, 0)`.
pub fn build_scene<R: Rng + ?Sized>(config: &SystemConfig, ctx: &mut EngineContext, rng: &mut R) -> SceneHandles {
    let mut state = SimState::new(config.time_step);

    // ── Lights ───────────────────────────────────────────────────────
    let lighting = &config.lighting;
    ctx.lights.set_ambient_light(lighting.ambient_color, lighting.ambient_intensity);
    ctx.lights.add(PointLight::new(
        Vec3::ZERO,
        lighting.sun_light_color,
        lighting.sun_light_intensity,
        lighting.sun_light_range,
    ));

    // ── Sun ──────────────────────────────────────────────────────────
    let sun = &config.sun;
    let sun_id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(sun_id)
            .with_tag(sun.name.as_str())
            .with_mesh(MeshComponent::sphere(sun.size, sun.color).with_material(Material::Basic)),
    );
    state.sun = Some(sun_id);

    // ── Planets ──────────────────────────────────────────────────────
    for body in &config.planets {
        let id = ctx.next_id();
        let start = Vec3::new(body.orbital_distance, 0.0, 0.0);
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(body.name.as_str())
                .with_pos(start)
                .with_mesh(MeshComponent::sphere(body.visual_radius, body.color).with_material(Material::Lambert)),
        );
        ctx.transforms.register_with(id, LocalTransform::new().with_offset(start));
        state.planets.push(OrbitingNode { id, body: body.clone() });
    }

    // ── Moons ────────────────────────────────────────────────────────
    for moon in &config.moons {
        let Some(parent) = state.planet(&moon.parent).map(|p| p.id) else {
            log::warn!("moon {} skipped: no planet {}", moon.body.name, moon.parent);
            continue;
        };
        let id = ctx.next_id();
        let start = Vec3::new(moon.body.orbital_distance, 0.0, 0.0);
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(moon.body.name.as_str())
                .with_mesh(MeshComponent::sphere(moon.body.visual_radius, moon.body.color)),
        );
        ctx.transforms.register_with(id, LocalTransform::new().with_offset(start));
        ctx.transforms.set_parent(id, Some(parent));
        state.moons.push(MoonNode { id, parent, body: moon.body.clone() });
    }

    // ── Orbit rings ──────────────────────────────────────────────────
    for body in &config.planets {
        let ring = circle_points(body.orbital_distance, config.orbit_segments);
        ctx.lines.add_strip(&ring, config.orbit_color, 1.0);
    }

    // ── Starfield ────────────────────────────────────────────────────
    let stars = generate_starfield(rng, config.starfield.count, config.starfield.extent);
    ctx.points.extend(&stars, config.starfield.color, 1.0);

    // ── Camera + label ───────────────────────────────────────────────
    ctx.camera.position = Vec3::from_array(config.camera.position);
    ctx.camera.target = Vec3::from_array(config.camera.target);

    let sun_label = (!sun.label.is_empty()).then(|| ctx.overlay.add_label(sun.label.as_str(), sun.label_class.as_str()));

    ctx.propagate_transforms();

    log::info!(
        "scene built: {} planets, {} moons, {} stars, {} orbit vertices",
        state.planets.len(),
        state.moons.len(),
        ctx.points.len(),
        ctx.lines.vertex_count()
    );

    SceneHandles { state, sun_label }
}
