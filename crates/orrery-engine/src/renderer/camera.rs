use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::Deserialize;

use crate::renderer::viewport::Viewport;
use crate::systems::picking::Ray;

/// Camera placement and lens settings, usually read from game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 5.0, 50.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Right-handed perspective camera, Y-up, clip depth in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    /// Width / height of the drawing surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 32;
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov_y_degrees, aspect, config.near, config.far);
        camera.position = Vec3::from_array(config.position);
        camera.target = Vec3::from_array(config.target);
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Returns `None` for points at or behind the camera plane, where the
    /// perspective divide would mirror them onto the screen.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Map an NDC point (depth in [0, 1]) back into world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let world = self.view_projection().inverse() * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
        world.truncate() / world.w
    }

    /// World-space ray from the camera through an NDC point on the screen.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let far = self.unproject(ndc.extend(1.0));
        Ray::new(self.position, far - self.position)
    }

    /// Project a world point straight to viewport pixels (origin top-left).
    /// `None` outside the depth range: behind the camera or past `far`.
    pub fn world_to_pixels(&self, world: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let ndc = self.project(world)?;
        if ndc.z > 1.0 {
            return None;
        }
        Some(viewport.ndc_to_pixels(ndc.truncate()))
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::from_config(&CameraConfig::default(), 1.5)
    }

    #[test]
    fn target_projects_to_screen_center() {
        let ndc = camera().project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = camera();
        assert!(cam.project(Vec3::new(0.0, 5.0, 60.0)).is_none());
    }

    #[test]
    fn pixels_only_inside_depth_range() {
        let cam = camera();
        let vp = Viewport::new(900.0, 600.0).unwrap();
        let center = cam.world_to_pixels(Vec3::ZERO, &vp).unwrap();
        assert!((center - Vec2::new(450.0, 300.0)).length() < 1e-3);
        assert!(cam.world_to_pixels(Vec3::new(0.0, 5.0, -2000.0), &vp).is_none());
        assert!(cam.world_to_pixels(Vec3::new(0.0, 5.0, 60.0), &vp).is_none());
    }

    #[test]
    fn unproject_inverts_project() {
        let cam = camera();
        let p = Vec3::new(7.0, -2.0, 3.0);
        let ndc = cam.project(p).unwrap();
        let back = cam.unproject(ndc);
        assert!((back - p).length() < 1e-2, "got {back:?}");
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (cam.target - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = camera();
        let p = Vec3::new(-12.0, 1.0, -4.0);
        let ndc = cam.project(p).unwrap();
        let ray = cam.ray_from_ndc(ndc.truncate());
        let t = (p - ray.origin).dot(ray.direction);
        assert!((ray.at(t) - p).length() < 1e-2);
    }

    #[test]
    fn aspect_change_alters_projection() {
        let mut cam = camera();
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect, 2.0);
        assert!(!before.abs_diff_eq(cam.projection_matrix(), 1e-6));
    }

    #[test]
    fn uniform_is_32_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
