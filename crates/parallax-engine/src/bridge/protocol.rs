/// Shared frame buffer layout.
/// Must stay in sync with the host page's reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Local instances: max_local_instances × 8 floats]
/// [Panel instances: max_panel_instances × 8 floats]
/// [Local vector vertices: max_local_vertices × 6 floats]
/// [Panel vector vertices: max_panel_vertices × 6 floats]
/// ```
///
/// Capacities and canvas sizes are written into the header at init.
/// The host reads them from the header to compute offsets.

use crate::core::config::SceneConfig;
use crate::renderer::instance::FrameBuffer;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_LOCAL_INSTANCES: usize = 2;
pub const HEADER_LOCAL_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_PANEL_INSTANCES: usize = 4;
pub const HEADER_PANEL_INSTANCE_COUNT: usize = 5;
pub const HEADER_MAX_LOCAL_VERTICES: usize = 6;
pub const HEADER_LOCAL_VERTEX_COUNT: usize = 7;
pub const HEADER_MAX_PANEL_VERTICES: usize = 8;
pub const HEADER_PANEL_VERTEX_COUNT: usize = 9;
pub const HEADER_LOCAL_WIDTH: usize = 10;
pub const HEADER_LOCAL_HEIGHT: usize = 11;
pub const HEADER_PANEL_WIDTH: usize = 12;
pub const HEADER_PANEL_HEIGHT: usize = 13;
pub const HEADER_PROTOCOL_VERSION: usize = 14;
/// 1.0 while an animation run is in flight.
pub const HEADER_ANIMATING: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per scene instance (wire format).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per vector vertex: x, y, r, g, b, a (wire format).
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Default vector vertex capacity per canvas.
pub const DEFAULT_MAX_VECTOR_VERTICES: usize = 16384;

/// Buffer layout computed from the scene's star counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_local_instances: usize,
    pub max_panel_instances: usize,
    pub max_local_vertices: usize,
    pub max_panel_vertices: usize,

    pub local_data_offset: usize,
    pub panel_data_offset: usize,
    pub local_vertex_offset: usize,
    pub panel_vertex_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_local_instances: usize,
        max_panel_instances: usize,
        max_local_vertices: usize,
        max_panel_vertices: usize,
    ) -> Self {
        let local_data_offset = HEADER_FLOATS;
        let panel_data_offset = local_data_offset + max_local_instances * INSTANCE_FLOATS;
        let local_vertex_offset = panel_data_offset + max_panel_instances * INSTANCE_FLOATS;
        let panel_vertex_offset = local_vertex_offset + max_local_vertices * VECTOR_VERTEX_FLOATS;
        let buffer_total_floats = panel_vertex_offset + max_panel_vertices * VECTOR_VERTEX_FLOATS;

        Self {
            max_local_instances,
            max_panel_instances,
            max_local_vertices,
            max_panel_vertices,
            local_data_offset,
            panel_data_offset,
            local_vertex_offset,
            panel_vertex_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Layout sized for a scene: one slot per marker, default vector capacity.
    pub fn from_config(config: &SceneConfig) -> Self {
        let stars = config.background_stars.len() + config.foreground_stars.len();
        // sun, orbit ring and earth precede the stars
        Self::new(
            3 + stars,
            stars,
            DEFAULT_MAX_VECTOR_VERTICES,
            DEFAULT_MAX_VECTOR_VERTICES,
        )
    }

    /// Allocate a zeroed buffer with the header filled in.
    pub fn allocate(&self, config: &SceneConfig) -> Vec<f32> {
        let mut buf = vec![0.0; self.buffer_total_floats];
        buf[HEADER_MAX_LOCAL_INSTANCES] = self.max_local_instances as f32;
        buf[HEADER_MAX_PANEL_INSTANCES] = self.max_panel_instances as f32;
        buf[HEADER_MAX_LOCAL_VERTICES] = self.max_local_vertices as f32;
        buf[HEADER_MAX_PANEL_VERTICES] = self.max_panel_vertices as f32;
        buf[HEADER_LOCAL_WIDTH] = config.local_width as f32;
        buf[HEADER_LOCAL_HEIGHT] = config.local_height as f32;
        buf[HEADER_PANEL_WIDTH] = config.panel_width as f32;
        buf[HEADER_PANEL_HEIGHT] = config.panel_height as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf
    }
}

/// Per-frame values packed alongside the instance data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameMeta {
    pub frame_counter: u64,
    pub animating: bool,
}

/// Copy one frame into `buf`, which must come from [`ProtocolLayout::allocate`].
///
/// Sections larger than their capacity are truncated. Vector slices hold
/// flat [`VECTOR_VERTEX_FLOATS`]-float vertices.
pub fn pack_frame(
    layout: &ProtocolLayout,
    buf: &mut [f32],
    frame: &FrameBuffer,
    local_vertices: &[f32],
    panel_vertices: &[f32],
    meta: FrameMeta,
) {
    if buf.len() < layout.buffer_total_floats {
        log::warn!(
            "frame buffer too small: {} < {} floats",
            buf.len(),
            layout.buffer_total_floats
        );
        return;
    }

    buf[HEADER_LOCK] = 1.0;

    let local: &[f32] = bytemuck::cast_slice(frame.local());
    let local_count = copy_section(buf, layout.local_data_offset, local, INSTANCE_FLOATS, layout.max_local_instances);
    let panel: &[f32] = bytemuck::cast_slice(frame.panel());
    let panel_count = copy_section(buf, layout.panel_data_offset, panel, INSTANCE_FLOATS, layout.max_panel_instances);
    let local_vcount = copy_section(
        buf,
        layout.local_vertex_offset,
        local_vertices,
        VECTOR_VERTEX_FLOATS,
        layout.max_local_vertices,
    );
    let panel_vcount = copy_section(
        buf,
        layout.panel_vertex_offset,
        panel_vertices,
        VECTOR_VERTEX_FLOATS,
        layout.max_panel_vertices,
    );

    buf[HEADER_LOCAL_INSTANCE_COUNT] = local_count as f32;
    buf[HEADER_PANEL_INSTANCE_COUNT] = panel_count as f32;
    buf[HEADER_LOCAL_VERTEX_COUNT] = local_vcount as f32;
    buf[HEADER_PANEL_VERTEX_COUNT] = panel_vcount as f32;
    buf[HEADER_FRAME_COUNTER] = meta.frame_counter as f32;
    buf[HEADER_ANIMATING] = if meta.animating { 1.0 } else { 0.0 };
    buf[HEADER_LOCK] = 0.0;
}

/// Copy up to `max_items` records of `stride` floats. Returns records copied.
fn copy_section(buf: &mut [f32], offset: usize, data: &[f32], stride: usize, max_items: usize) -> usize {
    let items = (data.len() / stride).min(max_items);
    if items < data.len() / stride {
        log::warn!("section at {offset} truncated to {max_items} records");
    }
    let floats = items * stride;
    buf[offset..offset + floats].copy_from_slice(&data[..floats]);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instance::SceneInstance;

    #[test]
    fn reference_layout_sizes() {
        let layout = ProtocolLayout::from_config(&SceneConfig::default());
        assert_eq!(layout.max_local_instances, 10);
        assert_eq!(layout.max_panel_instances, 7);
        assert_eq!(layout.local_data_offset, 16);
        assert_eq!(layout.panel_data_offset, 16 + 10 * 8);
        assert_eq!(layout.local_vertex_offset, 16 + 17 * 8);
        assert_eq!(
            layout.buffer_total_floats,
            16 + 17 * 8 + 2 * DEFAULT_MAX_VECTOR_VERTICES * 6
        );
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(4, 3, 10, 20);
        assert_eq!(layout.local_data_offset, HEADER_FLOATS);
        assert_eq!(layout.panel_data_offset, layout.local_data_offset + 4 * INSTANCE_FLOATS);
        assert_eq!(layout.local_vertex_offset, layout.panel_data_offset + 3 * INSTANCE_FLOATS);
        assert_eq!(layout.panel_vertex_offset, layout.local_vertex_offset + 10 * VECTOR_VERTEX_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.panel_vertex_offset + 20 * VECTOR_VERTEX_FLOATS);
    }

    #[test]
    fn allocate_writes_header() {
        let config = SceneConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        let buf = layout.allocate(&config);
        assert_eq!(buf.len(), layout.buffer_total_floats);
        assert_eq!(buf[HEADER_MAX_LOCAL_INSTANCES], 10.0);
        assert_eq!(buf[HEADER_LOCAL_WIDTH], 1200.0);
        assert_eq!(buf[HEADER_PANEL_HEIGHT], 200.0);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }

    #[test]
    fn pack_frame_copies_instances_and_counts() {
        let config = SceneConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        let mut buf = layout.allocate(&config);
        let frame = FrameBuffer::new(&config);
        let vertices = [1.0, 2.0, 0.1, 0.2, 0.3, 1.0];

        pack_frame(
            &layout,
            &mut buf,
            &frame,
            &vertices,
            &[],
            FrameMeta { frame_counter: 7, animating: true },
        );

        assert_eq!(buf[HEADER_LOCK], 0.0);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(buf[HEADER_ANIMATING], 1.0);
        assert_eq!(buf[HEADER_LOCAL_INSTANCE_COUNT], 10.0);
        assert_eq!(buf[HEADER_PANEL_INSTANCE_COUNT], 7.0);
        assert_eq!(buf[HEADER_LOCAL_VERTEX_COUNT], 1.0);
        assert_eq!(buf[HEADER_PANEL_VERTEX_COUNT], 0.0);

        // sun sits first in the local section
        let sun = frame.sun_instance();
        assert_eq!(buf[layout.local_data_offset], sun.x);
        assert_eq!(buf[layout.local_data_offset + 1], sun.y);
        let first_panel = &buf[layout.panel_data_offset..layout.panel_data_offset + SceneInstance::FLOATS];
        assert_eq!(first_panel[2], config.panel_star_size as f32);
        assert_eq!(&buf[layout.local_vertex_offset..layout.local_vertex_offset + 6], &vertices);
    }

    #[test]
    fn oversized_sections_are_truncated() {
        let config = SceneConfig::default();
        let layout = ProtocolLayout::new(2, 7, 1, 1);
        let mut buf = layout.allocate(&config);
        let frame = FrameBuffer::new(&config);
        let vertices = [0.0; 12];
        pack_frame(&layout, &mut buf, &frame, &vertices, &[], FrameMeta::default());
        assert_eq!(buf[HEADER_LOCAL_INSTANCE_COUNT], 2.0);
        assert_eq!(buf[HEADER_LOCAL_VERTEX_COUNT], 1.0);
    }
}
