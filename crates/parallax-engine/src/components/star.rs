use glam::DVec2;

use crate::api::types::{Color, StarId};

/// A distant star. Only its vertical offset within the background group is
/// meaningful; its horizontal position is fixed by the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub id: StarId,
    vertical_offset: f64,
}

impl BackgroundStar {
    pub fn new(id: StarId, vertical_offset: f64) -> Self {
        Self { id, vertical_offset }
    }

    /// Offset from the background group origin, y down.
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub(crate) fn set_vertical_offset(&mut self, y: f64) {
        self.vertical_offset = y;
    }
}

/// A nearby star, free to move in both axes. Its colour is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForegroundStar {
    pub id: StarId,
    pos: DVec2,
    color: Color,
}

impl ForegroundStar {
    pub fn new(id: StarId, pos: DVec2, color: Color) -> Self {
        Self { id, pos, color }
    }

    /// Position relative to the foreground group origin, y down.
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_pos(&mut self, pos: DVec2) {
        self.pos = pos;
    }
}
