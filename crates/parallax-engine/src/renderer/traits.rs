//! Render sink contract.
//!
//! The engine never draws. After every state change it pushes freshly
//! computed positions for each affected view into a `RenderSink`; how those
//! positions become pixels (SVG, canvas, WebGPU, a test recorder) is the
//! sink's business.

use glam::DVec2;

use crate::api::types::{Color, StarId};

/// Receiver of recomputed view positions.
///
/// Positions are in group-local coordinates (y down) exactly as the engine
/// computes them; adapters translate them into canvas space. Values handed
/// to a sink are always finite.
pub trait RenderSink {
    /// Earth's render position inside the solar-system group
    /// (see [`crate::components::orbit::position_from_angle`]).
    fn earth(&mut self, pos: DVec2);

    /// A background star's offset inside the background group.
    fn background_star(&mut self, id: StarId, vertical_offset: f64);

    /// A background star's panel x coordinate.
    fn background_panel(&mut self, id: StarId, panel_x: f64);

    /// A foreground star's position inside the foreground group.
    fn foreground_star(&mut self, id: StarId, pos: DVec2, color: Color);

    /// A foreground star's panel x coordinate, or `None` when its sight line
    /// misses the observation plane and the star should not be shown.
    fn foreground_panel(&mut self, id: StarId, panel_x: Option<f64>, color: Color);
}

/// One recorded sink call. Handy for hosts that want to diff updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkUpdate {
    Earth(DVec2),
    BackgroundStar(StarId, f64),
    BackgroundPanel(StarId, f64),
    ForegroundStar(StarId, DVec2, Color),
    ForegroundPanel(StarId, Option<f64>, Color),
}

/// Sink that records every update in call order.
#[derive(Debug, Default)]
pub struct UpdateLog {
    pub updates: Vec<SinkUpdate>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded updates, leaving the log empty.
    pub fn drain(&mut self) -> Vec<SinkUpdate> {
        std::mem::take(&mut self.updates)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl RenderSink for UpdateLog {
    fn earth(&mut self, pos: DVec2) {
        self.updates.push(SinkUpdate::Earth(pos));
    }

    fn background_star(&mut self, id: StarId, vertical_offset: f64) {
        self.updates.push(SinkUpdate::BackgroundStar(id, vertical_offset));
    }

    fn background_panel(&mut self, id: StarId, panel_x: f64) {
        self.updates.push(SinkUpdate::BackgroundPanel(id, panel_x));
    }

    fn foreground_star(&mut self, id: StarId, pos: DVec2, color: Color) {
        self.updates.push(SinkUpdate::ForegroundStar(id, pos, color));
    }

    fn foreground_panel(&mut self, id: StarId, panel_x: Option<f64>, color: Color) {
        self.updates.push(SinkUpdate::ForegroundPanel(id, panel_x, color));
    }
}
