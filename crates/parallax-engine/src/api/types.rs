use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a star within its field.
/// Ids are assigned from the seed layout order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StarId(pub u32);

impl StarId {
    /// Position of this star within its field's seed list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the two star collections a star belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarField {
    /// Distant stars sitting on the observation plane. Vertical freedom only.
    Background,
    /// Nearby stars between earth and the plane. Free in both axes.
    Foreground,
}

impl fmt::Display for StarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarField::Background => f.write_str("background"),
            StarField::Foreground => f.write_str("foreground"),
        }
    }
}

/// RGB colour (0.0 - 1.0 per channel) handed to the render sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    // CSS named colours used by the reference scene
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 0.502, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    pub const ORANGE: Self = Self::new(1.0, 0.647, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const GREY: Self = Self::new(0.502, 0.502, 0.502);
}

impl Default for Color {
    fn default() -> Self {
        Self::YELLOW
    }
}
