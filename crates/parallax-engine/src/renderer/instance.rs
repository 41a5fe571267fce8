use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::api::types::{Color, StarId};
use crate::core::config::SceneConfig;
use crate::renderer::traits::RenderSink;

/// Marker shape codes understood by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Shape {
    Disc = 0,
    Ring = 1,
    Star = 2,
}

/// One drawable marker, written to the flat buffer the host page reads.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Coordinates are canvas space (y down) of the canvas the instance
/// belongs to.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneInstance {
    pub x: f32,
    pub y: f32,
    /// Marker radius; for stars, half the silhouette box side.
    pub radius: f32,
    /// [`Shape`] code.
    pub shape: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 0.0 hides the marker.
    pub alpha: f32,
}

impl SceneInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(pos: DVec2, radius: f64, shape: Shape, color: Color) -> Self {
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
            radius: radius as f32,
            shape: shape as u8 as f32,
            r: color.r,
            g: color.g,
            b: color.b,
            alpha: 1.0,
        }
    }

    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    fn place(&mut self, pos: DVec2) {
        self.x = pos.x as f32;
        self.y = pos.y as f32;
    }

    fn set_color(&mut self, color: Color) {
        self.r = color.r;
        self.g = color.g;
        self.b = color.b;
    }
}

const SUN_SLOT: usize = 0;
const ORBIT_SLOT: usize = 1;
const EARTH_SLOT: usize = 2;
const FIRST_STAR_SLOT: usize = 3;

/// Render sink that keeps both canvases as flat instance arrays.
///
/// Local bubble slots: sun, orbit ring, earth, background stars, then
/// foreground stars. Panel slots: background stars, then foreground stars.
/// Slot positions never move, so the host can diff by index.
pub struct FrameBuffer {
    local: Vec<SceneInstance>,
    panel: Vec<SceneInstance>,
    background_count: usize,
    foreground_count: usize,
    solar_origin: DVec2,
    r_orbit: f64,
    background_origin: DVec2,
    foreground_origin: DVec2,
    panel_origin: DVec2,
    /// Bumped on every sink update.
    revision: u64,
}

impl FrameBuffer {
    /// Lay out every slot for the scene described by `config`.
    /// Dynamic slots start at their seed positions; the first full
    /// propagation overwrites them anyway.
    pub fn new(config: &SceneConfig) -> Self {
        let palette = &config.palette;
        let solar_origin = config.solar_origin();
        let background_origin = config.background_origin();
        let foreground_origin = config.foreground_origin();
        let panel_origin = config.panel_origin();

        let mut local = Vec::with_capacity(
            FIRST_STAR_SLOT + config.background_stars.len() + config.foreground_stars.len(),
        );
        local.push(SceneInstance::new(solar_origin, config.r_sun, Shape::Disc, palette.sun));
        local.push(SceneInstance::new(solar_origin, config.r_orbit, Shape::Ring, palette.orbit));
        local.push(SceneInstance::new(
            solar_origin - DVec2::new(0.0, config.r_orbit),
            config.r_earth,
            Shape::Disc,
            palette.earth,
        ));
        for &v in &config.background_stars {
            local.push(SceneInstance::new(
                background_origin + DVec2::new(0.0, v),
                config.star_size,
                Shape::Star,
                palette.background_star,
            ));
        }
        for seed in &config.foreground_stars {
            local.push(SceneInstance::new(
                foreground_origin + DVec2::new(seed.x, seed.y),
                config.star_size,
                Shape::Star,
                seed.color,
            ));
        }

        let mut panel =
            Vec::with_capacity(config.background_stars.len() + config.foreground_stars.len());
        for _ in &config.background_stars {
            panel.push(SceneInstance::new(
                panel_origin,
                config.panel_star_size,
                Shape::Star,
                palette.background_star,
            ));
        }
        for seed in &config.foreground_stars {
            panel.push(SceneInstance::new(
                panel_origin,
                config.panel_star_size,
                Shape::Star,
                seed.color,
            ));
        }

        Self {
            local,
            panel,
            background_count: config.background_stars.len(),
            foreground_count: config.foreground_stars.len(),
            solar_origin,
            r_orbit: config.r_orbit,
            background_origin,
            foreground_origin,
            panel_origin,
            revision: 0,
        }
    }

    pub fn local(&self) -> &[SceneInstance] {
        &self.local
    }

    pub fn panel(&self) -> &[SceneInstance] {
        &self.panel
    }

    pub fn local_count(&self) -> u32 {
        self.local.len() as u32
    }

    pub fn panel_count(&self) -> u32 {
        self.panel.len() as u32
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sun_instance(&self) -> &SceneInstance {
        &self.local[SUN_SLOT]
    }

    pub fn orbit_instance(&self) -> &SceneInstance {
        &self.local[ORBIT_SLOT]
    }

    pub fn earth_instance(&self) -> &SceneInstance {
        &self.local[EARTH_SLOT]
    }

    pub fn background_slot(&self, id: StarId) -> Option<usize> {
        (id.index() < self.background_count).then(|| FIRST_STAR_SLOT + id.index())
    }

    pub fn foreground_slot(&self, id: StarId) -> Option<usize> {
        (id.index() < self.foreground_count)
            .then(|| FIRST_STAR_SLOT + self.background_count + id.index())
    }

    pub fn background_panel_slot(&self, id: StarId) -> Option<usize> {
        (id.index() < self.background_count).then(|| id.index())
    }

    pub fn foreground_panel_slot(&self, id: StarId) -> Option<usize> {
        (id.index() < self.foreground_count).then(|| self.background_count + id.index())
    }

    /// Raw pointer to local instance data for host reads.
    pub fn local_ptr(&self) -> *const f32 {
        self.local.as_ptr() as *const f32
    }

    /// Raw pointer to panel instance data for host reads.
    pub fn panel_ptr(&self) -> *const f32 {
        self.panel.as_ptr() as *const f32
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl RenderSink for FrameBuffer {
    fn earth(&mut self, pos: DVec2) {
        // Earth's frame sits r_orbit above the orbit centre
        let canvas = self.solar_origin + pos - DVec2::new(0.0, self.r_orbit);
        self.local[EARTH_SLOT].place(canvas);
        self.touch();
    }

    fn background_star(&mut self, id: StarId, vertical_offset: f64) {
        if let Some(slot) = self.background_slot(id) {
            let canvas = self.background_origin + DVec2::new(0.0, vertical_offset);
            self.local[slot].place(canvas);
            self.touch();
        }
    }

    fn background_panel(&mut self, id: StarId, panel_x: f64) {
        if let Some(slot) = self.background_panel_slot(id) {
            let canvas = self.panel_origin + DVec2::new(panel_x, 0.0);
            self.panel[slot].place(canvas);
            self.touch();
        }
    }

    fn foreground_star(&mut self, id: StarId, pos: DVec2, color: Color) {
        if let Some(slot) = self.foreground_slot(id) {
            let instance = &mut self.local[slot];
            instance.place(self.foreground_origin + pos);
            instance.set_color(color);
            self.touch();
        }
    }

    fn foreground_panel(&mut self, id: StarId, panel_x: Option<f64>, color: Color) {
        if let Some(slot) = self.foreground_panel_slot(id) {
            let origin = self.panel_origin;
            let instance = &mut self.panel[slot];
            instance.set_color(color);
            match panel_x {
                Some(x) => {
                    instance.place(origin + DVec2::new(x, 0.0));
                    instance.alpha = 1.0;
                }
                // Keep the last position, just hide it
                None => instance.alpha = 0.0,
            }
            self.touch();
        }
    }
}
