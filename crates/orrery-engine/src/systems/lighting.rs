/// Point and ambient lighting for the 3D scene.
///
/// Lights are persistent: they stay until explicitly removed. Each frame the
/// runner copies active lights into the shared buffer for the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::mesh::Rgb;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero.
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: Rgb, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Active lights plus the ambient term.
///
/// Ambient defaults to white at full intensity, which renders lambert
/// surfaces unshaded when no lights are configured.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
    capacity: usize,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: [1.0, 1.0, 1.0],
            capacity: max_lights,
        }
    }

    /// Add a point light. Lights past capacity are rejected with a warning.
    pub fn add(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.capacity {
            log::warn!("light capacity {} reached, light dropped", self.capacity);
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Ambient color premultiplied by intensity.
    pub fn set_ambient_light(&mut self, color: Rgb, intensity: f32) {
        self.ambient = color.scaled(intensity).to_array();
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lights)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_wire_order() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), Rgb::new(1.0, 0.5, 0.0), 2.0, 500.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&light));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.5, 0.0, 2.0, 500.0]);
        assert_eq!(std::mem::size_of::<PointLight>(), PointLight::FLOATS * 4);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut state = LightState::with_capacity(1);
        assert!(state.add(PointLight::new(Vec3::ZERO, Rgb::WHITE, 1.0, 10.0)));
        assert!(!state.add(PointLight::new(Vec3::ZERO, Rgb::WHITE, 1.0, 10.0)));
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn ambient_light_is_premultiplied() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), [1.0, 1.0, 1.0]);
        state.set_ambient_light(Rgb::WHITE, 0.6);
        assert_eq!(state.ambient(), [0.6, 0.6, 0.6]);
    }
}
