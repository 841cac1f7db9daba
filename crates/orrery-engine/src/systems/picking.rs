use glam::Vec3;

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first sphere surface hit, if any.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest hit among `candidates`, testing each entity's bounding sphere at
/// its current world position. Inactive or meshless entities never hit.
pub fn pick_nearest(ray: &Ray, scene: &Scene, candidates: &[EntityId]) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for &id in candidates {
        let Some(entity) = scene.get(id) else { continue };
        if !entity.active {
            continue;
        }
        let Some(radius) = entity.bounding_radius() else { continue };
        if let Some(distance) = ray.intersect_sphere(entity.pos, radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RayHit { id, distance, point: ray.at(distance) });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::mesh::{MeshComponent, Rgb};

    fn sphere(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, Rgb::WHITE))
    }

    #[test]
    fn ray_hits_sphere_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn pick_returns_nearest_candidate() {
        let mut scene = Scene::new();
        scene.spawn(sphere(1, Vec3::new(0.0, 0.0, -5.0), 1.0));
        scene.spawn(sphere(2, Vec3::new(0.0, 0.0, 2.0), 1.0));
        scene.spawn(sphere(3, Vec3::new(0.0, 0.0, 6.0), 1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let hit = pick_nearest(&ray, &scene, &[EntityId(1), EntityId(2)]).unwrap();
        assert_eq!(hit.id, EntityId(2));
        assert!((hit.point.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn pick_ignores_non_candidates_and_inactive() {
        let mut scene = Scene::new();
        let mut hidden = sphere(1, Vec3::ZERO, 1.0);
        hidden.active = false;
        scene.spawn(hidden);
        scene.spawn(sphere(2, Vec3::new(0.0, 0.0, -4.0), 1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(pick_nearest(&ray, &scene, &[EntityId(1)]).is_none());
        assert!(pick_nearest(&ray, &scene, &[]).is_none());
    }
}
