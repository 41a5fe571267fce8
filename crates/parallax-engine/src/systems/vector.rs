//! Lyon-based tessellation of the scene markers.
//!
//! Turns the frame buffer's instances into a flat triangle-list vertex
//! buffer, for hosts that draw with a GPU instead of SVG. One `VectorState`
//! per canvas.
//!
//! # Usage
//!
//! ```ignore
//! local_vectors.clear();
//! local_vectors.stroke_rect(DVec2::ZERO, 1200.0, 400.0, 5.0, palette.canvas_outline);
//! local_vectors.draw_instances(frame.local());
//! ```

use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::api::types::Color;
use crate::renderer::instance::{SceneInstance, Shape};
use crate::renderer::silhouette::star_outline;

/// Orbit ring dash pattern, in canvas units.
pub const ORBIT_DASH: f64 = 3.0;
pub const ORBIT_GAP: f64 = 3.0;
pub const ORBIT_LINE_WIDTH: f32 = 1.0;

/// Upper bound on dashes per ring, whatever its radius.
pub const MAX_RING_DASHES: usize = 512;
/// Largest arc angle covered by one straight segment of a dash.
const DASH_SEGMENT_ANGLE: f64 = 0.02;
const MAX_DASH_SEGMENTS: usize = 8;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color, alpha: f32) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: alpha }
    }
}

struct FillVertexCtor {
    color: Color,
    alpha: f32,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color, self.alpha)
    }
}

struct StrokeVertexCtor {
    color: Color,
    alpha: f32,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.color, self.alpha)
    }
}

fn polyline_path(points: &[DVec2], closed: bool) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].x as f32, points[0].y as f32));
    for p in &points[1..] {
        builder.line_to(point(p.x as f32, p.y as f32));
    }
    builder.end(closed);
    builder.build()
}

/// Tessellators plus the output vertex buffer for one canvas.
/// Cleared each frame and refilled from the frame buffer.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(4096 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fill a closed polygon. Concave outlines (the star) are fine.
    pub fn fill_polygon(&mut self, points: &[DVec2], color: Color, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let path = polyline_path(points, true);
        self.fill_path(&path, color, alpha);
    }

    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(
            point(center.x as f32, center.y as f32),
            radius as f32,
            lyon::path::Winding::Positive,
        );
        let path = builder.build();
        self.fill_path(&path, color, alpha);
    }

    /// Fill a five-pointed star marker of the given radius.
    pub fn fill_star(&mut self, center: DVec2, radius: f64, color: Color, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        self.fill_polygon(&star_outline(center, radius), color, alpha);
    }

    pub fn fill_path(&mut self, path: &Path, color: Color, alpha: f32) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color, alpha }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    pub fn stroke_polyline(&mut self, points: &[DVec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        let path = polyline_path(points, false);
        self.stroke_path(&path, width, color);
    }

    /// Stroke an axis-aligned rectangle, e.g. a canvas outline.
    pub fn stroke_rect(&mut self, pos: DVec2, width: f64, height: f64, line_width: f32, color: Color) {
        let points = [
            pos,
            DVec2::new(pos.x + width, pos.y),
            DVec2::new(pos.x + width, pos.y + height),
            DVec2::new(pos.x, pos.y + height),
        ];
        let path = polyline_path(&points, true);
        self.stroke_path(&path, line_width, color);
    }

    /// Stroke a circle as evenly spaced dashes.
    pub fn stroke_dashed_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        dash: f64,
        gap: f64,
        width: f32,
        color: Color,
    ) {
        if radius <= 0.0 || dash <= 0.0 || gap < 0.0 {
            return;
        }
        let circumference = TAU * radius;
        let count = ((circumference / (dash + gap)).floor().max(1.0) as usize).min(MAX_RING_DASHES);
        let period = TAU / count as f64;
        let dash_angle = period * dash / (dash + gap);
        // Segments per dash follow the arc angle, not its length
        let steps = ((dash_angle / DASH_SEGMENT_ANGLE).ceil() as usize).clamp(1, MAX_DASH_SEGMENTS);

        let mut arc = Vec::with_capacity(steps + 1);
        for i in 0..count {
            let start = i as f64 * period;
            arc.clear();
            for s in 0..=steps {
                let a = start + dash_angle * s as f64 / steps as f64;
                arc.push(center + radius * DVec2::new(a.cos(), a.sin()));
            }
            self.stroke_polyline(&arc, width, color);
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color, alpha: 1.0 }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    /// Tessellate every visible marker, in slot order.
    pub fn draw_instances(&mut self, instances: &[SceneInstance]) {
        for inst in instances {
            if inst.alpha <= 0.0 {
                continue;
            }
            let center = inst.pos();
            let radius = inst.radius as f64;
            let color = Color::new(inst.r, inst.g, inst.b);
            match inst.shape as u8 {
                s if s == Shape::Disc as u8 => self.fill_circle(center, radius, color, inst.alpha),
                s if s == Shape::Ring as u8 => self.stroke_dashed_circle(
                    center,
                    radius,
                    ORBIT_DASH,
                    ORBIT_GAP,
                    ORBIT_LINE_WIDTH,
                    color,
                ),
                s if s == Shape::Star as u8 => self.fill_star(center, radius, color, inst.alpha),
                other => log::warn!("unknown marker shape {other}"),
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
