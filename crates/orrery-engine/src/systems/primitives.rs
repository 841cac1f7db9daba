//! Line and point primitives for the drawing side.
//!
//! Lines are emitted as a flat line list (two vertices per segment) so the
//! renderer can draw them with a single `line-list` pipeline. Points are a
//! flat list drawn as fixed-size points.
//!
//! ```ignore
//! // In Game::init(), after the scene is built:
//! let ring = circle_points(10.0, 100);
//! ctx.lines.add_strip(&ring, Rgb::WHITE, 0.5);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::mesh::Rgb;

/// Per-vertex data for lines: 7 floats = 28 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 7;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(pos: Vec3, color: Rgb, alpha: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            a: alpha,
        }
    }
}

/// Per-point data for point clouds. Same layout as a line vertex.
pub type PointVertex = LineVertex;

/// `segments + 1` points on a circle in the XZ plane, first == last.
pub fn circle_points(radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

/// Line-list vertex buffer with a fixed vertex capacity.
pub struct LineState {
    vertices: Vec<LineVertex>,
    max_vertices: usize,
}

impl LineState {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            max_vertices,
        }
    }

    /// Connect consecutive points. Returns the number of segments written.
    pub fn add_strip(&mut self, points: &[Vec3], color: Rgb, alpha: f32) -> usize {
        let mut written = 0;
        for pair in points.windows(2) {
            if self.vertices.len() + 2 > self.max_vertices {
                log::warn!(
                    "line vertices truncated: capacity {} reached, {} segments dropped",
                    self.max_vertices,
                    points.len() - 1 - written
                );
                break;
            }
            self.vertices.push(LineVertex::new(pair[0], color, alpha));
            self.vertices.push(LineVertex::new(pair[1], color, alpha));
            written += 1;
        }
        written
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::new(16384)
    }
}

/// Flat point list, e.g. a starfield.
pub struct PointCloud {
    points: Vec<PointVertex>,
    max_points: usize,
}

impl PointCloud {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: Vec::with_capacity(max_points),
            max_points,
        }
    }

    /// Add points of one color. Points past capacity are dropped with a warning.
    pub fn extend(&mut self, positions: &[Vec3], color: Rgb, alpha: f32) -> usize {
        let room = self.max_points.saturating_sub(self.points.len());
        if positions.len() > room {
            log::warn!(
                "point vertices truncated: {} dropped, capacity {}",
                positions.len() - room,
                self.max_points
            );
        }
        let taken = positions.len().min(room);
        self.points
            .extend(positions[..taken].iter().map(|&p| PointVertex::new(p, color, alpha)));
        taken
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new(16384)
    }
}
