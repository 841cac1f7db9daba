/// Shared buffer layout.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Meshes: max_mesh_instances × 16 floats]
/// [Lines: max_line_vertices × 7 floats]
/// [Points: max_point_vertices × 7 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// [Camera: 32 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The page reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_MESH_INSTANCES: usize = 3;
pub const HEADER_MESH_INSTANCE_COUNT: usize = 4;
pub const HEADER_MAX_LINE_VERTICES: usize = 5;
pub const HEADER_LINE_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_POINT_VERTICES: usize = 7;
pub const HEADER_POINT_VERTEX_COUNT: usize = 8;
pub const HEADER_MAX_LIGHTS: usize = 9;
pub const HEADER_LIGHT_COUNT: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;
pub const HEADER_VIEWPORT_WIDTH: usize = 13;
pub const HEADER_VIEWPORT_HEIGHT: usize = 14;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per mesh instance (wire format, never changes).
pub const MESH_INSTANCE_FLOATS: usize = 16;

/// Floats per line vertex: x, y, z, r, g, b, a.
pub const LINE_VERTEX_FLOATS: usize = 7;

/// Floats per point vertex: same layout as a line vertex.
pub const POINT_VERTEX_FLOATS: usize = 7;

/// Floats per light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Camera uniform: view-projection then view, column-major.
pub const CAMERA_FLOATS: usize = 32;

/// Per-frame element counts written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCounts {
    pub mesh_instances: usize,
    pub line_vertices: usize,
    pub point_vertices: usize,
    pub lights: usize,
    pub events: usize,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_mesh_instances: usize,
    pub max_line_vertices: usize,
    pub max_point_vertices: usize,
    pub max_lights: usize,
    pub max_events: usize,

    pub mesh_data_floats: usize,
    pub line_data_floats: usize,
    pub point_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    pub mesh_data_offset: usize,
    pub line_data_offset: usize,
    pub point_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,
    pub camera_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_mesh_instances: usize,
        max_line_vertices: usize,
        max_point_vertices: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        let mesh_data_floats = max_mesh_instances * MESH_INSTANCE_FLOATS;
        let line_data_floats = max_line_vertices * LINE_VERTEX_FLOATS;
        let point_data_floats = max_point_vertices * POINT_VERTEX_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let mesh_data_offset = HEADER_FLOATS;
        let line_data_offset = mesh_data_offset + mesh_data_floats;
        let point_data_offset = line_data_offset + line_data_floats;
        let light_data_offset = point_data_offset + point_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;
        let camera_data_offset = event_data_offset + event_data_floats;

        let buffer_total_floats = camera_data_offset + CAMERA_FLOATS;

        Self {
            max_mesh_instances,
            max_line_vertices,
            max_point_vertices,
            max_lights,
            max_events,
            mesh_data_floats,
            line_data_floats,
            point_data_floats,
            light_data_floats,
            event_data_floats,
            mesh_data_offset,
            line_data_offset,
            point_data_offset,
            light_data_offset,
            event_data_offset,
            camera_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_mesh_instances,
            config.max_line_vertices,
            config.max_point_vertices,
            config.max_lights,
            config.max_events,
        )
    }

    /// Fill a header for the given frame. Counts are clamped to capacities.
    pub fn header(&self, frame: u32, counts: FrameCounts, viewport: (f32, f32)) -> [f32; HEADER_FLOATS] {
        let mut h = [0.0; HEADER_FLOATS];
        h[HEADER_FRAME_COUNTER] = frame as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_MAX_MESH_INSTANCES] = self.max_mesh_instances as f32;
        h[HEADER_MESH_INSTANCE_COUNT] = counts.mesh_instances.min(self.max_mesh_instances) as f32;
        h[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        h[HEADER_LINE_VERTEX_COUNT] = counts.line_vertices.min(self.max_line_vertices) as f32;
        h[HEADER_MAX_POINT_VERTICES] = self.max_point_vertices as f32;
        h[HEADER_POINT_VERTEX_COUNT] = counts.point_vertices.min(self.max_point_vertices) as f32;
        h[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        h[HEADER_LIGHT_COUNT] = counts.lights.min(self.max_lights) as f32;
        h[HEADER_MAX_EVENTS] = self.max_events as f32;
        h[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        h[HEADER_VIEWPORT_WIDTH] = viewport.0;
        h[HEADER_VIEWPORT_HEIGHT] = viewport.1;
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_mesh_instances, 256);
        assert_eq!(layout.max_line_vertices, 16384);
        assert_eq!(layout.max_point_vertices, 16384);
        assert_eq!(layout.max_lights, 8);
        assert_eq!(layout.max_events, 32);

        let expected = HEADER_FLOATS + 256 * 16 + 16384 * 7 + 16384 * 7 + 8 * 8 + 32 * 4 + 32;
        assert_eq!(layout.buffer_total_floats, expected);
        assert_eq!(layout.buffer_total_bytes, expected * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 200, 300, 4, 20);

        assert_eq!(layout.mesh_data_offset, HEADER_FLOATS);
        assert_eq!(layout.line_data_offset, layout.mesh_data_offset + layout.mesh_data_floats);
        assert_eq!(layout.point_data_offset, layout.line_data_offset + layout.line_data_floats);
        assert_eq!(layout.light_data_offset, layout.point_data_offset + layout.point_data_floats);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.camera_data_offset, layout.event_data_offset + layout.event_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.camera_data_offset + CAMERA_FLOATS);
    }

    #[test]
    fn header_clamps_counts() {
        let layout = ProtocolLayout::new(2, 10, 10, 1, 4);
        let counts = FrameCounts {
            mesh_instances: 5,
            line_vertices: 6,
            point_vertices: 0,
            lights: 1,
            events: 9,
        };
        let h = layout.header(7, counts, (800.0, 600.0));
        assert_eq!(h[HEADER_LOCK], 0.0);
        assert_eq!(h[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(h[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(h[HEADER_MESH_INSTANCE_COUNT], 2.0);
        assert_eq!(h[HEADER_LINE_VERTEX_COUNT], 6.0);
        assert_eq!(h[HEADER_EVENT_COUNT], 4.0);
        assert_eq!((h[HEADER_VIEWPORT_WIDTH], h[HEADER_VIEWPORT_HEIGHT]), (800.0, 600.0));
    }
}
