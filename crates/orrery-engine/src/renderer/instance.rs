use bytemuck::{Pod, Zeroable};

/// Per-mesh render data written to the shared buffer for the page renderer.
/// 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// World-space sphere radius (mesh radius times entity scale).
    pub radius: f32,
    /// Linear RGB in [0, 1].
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    /// 0 = basic (unlit), 1 = lambert.
    pub material: f32,
    /// Padding to keep the 16-float stride. Always 0.
    pub _pad: f32,
    /// Tessellation hints for the renderer's sphere geometry.
    pub width_segments: f32,
    pub height_segments: f32,
    /// World-space orientation quaternion.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Mesh instances for the current frame, bounded by a fixed capacity.
pub struct RenderBuffer {
    pub instances: Vec<MeshInstance>,
    capacity: usize,
    dropped: usize,
}

impl RenderBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.dropped = 0;
    }

    /// Append an instance. Returns `false` and counts the drop once full.
    pub fn push(&mut self, instance: MeshInstance) -> bool {
        if self.instances.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances rejected since the last `clear`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new(256)
    }
}
