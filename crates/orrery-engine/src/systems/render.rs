use crate::components::entity::Entity;
use crate::renderer::instance::{MeshInstance, RenderBuffer};

/// Build the mesh buffer from a set of entities.
/// Inactive entities and entities without a mesh are skipped. Instances past
/// the buffer capacity are dropped with a warning.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };

        let radius = entity.bounding_radius().unwrap_or(0.0);
        let (wseg, hseg) = mesh.segments();
        let q = entity.rotation;
        let instance = MeshInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            alpha: 1.0,
            material: mesh.material.code(),
            _pad: 0.0,
            width_segments: wseg as f32,
            height_segments: hseg as f32,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
        };
        buffer.push(instance);
    }

    if buffer.dropped() > 0 {
        log::warn!(
            "mesh instances truncated: {} dropped, capacity {}",
            buffer.dropped(),
            buffer.capacity()
        );
    }
}
