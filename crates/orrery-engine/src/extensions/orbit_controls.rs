use glam::Vec3;

use crate::renderer::camera::PerspectiveCamera;

/// Drag-to-orbit, wheel-to-dolly camera rig around a fixed target.
///
/// Angles are stored, not the camera position. `update` writes the position
/// back into the camera, so input handlers can run any number of times per
/// frame without drifting.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Rotation around the Y axis (radians). Zero looks down -Z.
    pub azimuth: f32,
    /// Angle above the XZ plane (radians), clamped short of the poles.
    pub elevation: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    home: (f32, f32, f32),
}

impl OrbitControls {
    const ORBIT_SENSITIVITY: f32 = 0.008;
    const ZOOM_STEP: f32 = 1.05;
    const MAX_ELEVATION: f32 = 1.5;

    /// Start from the camera's current placement.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        let elevation = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let azimuth = offset.x.atan2(offset.z);
        Self {
            target: camera.target,
            azimuth,
            elevation,
            distance,
            min_distance: 1.0,
            max_distance: 500.0,
            home: (azimuth, elevation, distance),
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        self
    }

    /// Orbit by a pointer delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * Self::ORBIT_SENSITIVITY;
        self.elevation += dy * Self::ORBIT_SENSITIVITY;
        self.elevation = self.elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    /// Dolly by a wheel delta: positive moves away, negative moves closer.
    pub fn dolly(&mut self, delta: f32) {
        if delta > 0.0 {
            self.distance *= Self::ZOOM_STEP;
        } else if delta < 0.0 {
            self.distance /= Self::ZOOM_STEP;
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn reset(&mut self) {
        (self.azimuth, self.elevation, self.distance) = self.home;
    }

    /// Camera offset from the target for the current angles.
    pub fn offset(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }

    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.target = self.target;
        camera.position = self.target + self.offset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraConfig;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::from_config(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn update_without_input_keeps_camera_in_place() {
        let mut cam = camera();
        let controls = OrbitControls::from_camera(&cam);
        controls.update(&mut cam);
        assert!((cam.position - Vec3::new(0.0, 5.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn rotate_preserves_distance() {
        let mut cam = camera();
        let mut controls = OrbitControls::from_camera(&cam);
        let d = controls.distance;
        controls.rotate(120.0, -40.0);
        controls.update(&mut cam);
        assert!(((cam.position - cam.target).length() - d).abs() < 1e-3);
        assert!(cam.position.x.abs() > 1.0);
    }

    #[test]
    fn elevation_is_clamped() {
        let mut controls = OrbitControls::from_camera(&camera());
        controls.rotate(0.0, 10_000.0);
        assert!(controls.elevation <= 1.5);
        controls.rotate(0.0, -100_000.0);
        assert!(controls.elevation >= -1.5);
    }

    #[test]
    fn dolly_is_clamped_and_reset_restores() {
        let mut controls = OrbitControls::from_camera(&camera()).with_distance_limits(10.0, 60.0);
        let home = controls.distance;
        for _ in 0..100 {
            controls.dolly(1.0);
        }
        assert_eq!(controls.distance, 60.0);
        for _ in 0..100 {
            controls.dolly(-1.0);
        }
        assert_eq!(controls.distance, 10.0);
        controls.reset();
        assert!((controls.distance - home).abs() < 1e-5);
    }
}
