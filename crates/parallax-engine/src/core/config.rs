use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Color;
use crate::error::{SceneError, SceneResult};
use crate::extensions::animation::RetriggerPolicy;
use crate::extensions::easing::Easing;
use crate::systems::constraint::{ClampPolicy, DragConstraints};

/// Seed data for one foreground star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForegroundSeed {
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// Colours of the non-star bodies. Stars carry their own colours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub sun: Color,
    pub earth: Color,
    pub orbit: Color,
    pub background_star: Color,
    pub canvas_outline: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sun: Color::ORANGE,
            earth: Color::BLUE,
            orbit: Color::BLACK,
            background_star: Color::YELLOW,
            canvas_outline: Color::GREY,
        }
    }
}

/// Scene geometry, seed layout and behaviour switches.
///
/// Immutable once a scene is built. Scene variants (different palettes,
/// canvas sizes or star layouts) are different values of this struct,
/// typically loaded from JSON. Missing fields take the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Local-bubble canvas width `W`.
    pub local_width: f64,
    /// Local-bubble canvas height `H`.
    pub local_height: f64,
    /// Viewing panel canvas width.
    pub panel_width: f64,
    /// Viewing panel canvas height.
    pub panel_height: f64,
    /// Earth's orbit radius.
    pub r_orbit: f64,
    pub r_sun: f64,
    pub r_earth: f64,
    /// Star marker radius in the local bubble.
    pub star_size: f64,
    /// Star marker radius in the viewing panel.
    pub panel_star_size: f64,
    /// Multiplier from plane coordinate to panel coordinate.
    pub panel_scale: f64,
    /// Earth angle at scene start, radians.
    pub initial_angle: f64,
    /// Length of one full revolution sweep, milliseconds.
    pub animation_duration_ms: f64,
    pub easing: Easing,
    pub clamp_policy: ClampPolicy,
    pub retrigger_policy: RetriggerPolicy,
    pub palette: Palette,
    /// Seed vertical offsets, one per background star.
    pub background_stars: Vec<f64>,
    pub foreground_stars: Vec<ForegroundSeed>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            local_width: 1200.0,
            local_height: 400.0,
            panel_width: 1200.0,
            panel_height: 200.0,
            r_orbit: 80.0,
            r_sun: 20.0,
            r_earth: 6.0,
            star_size: 20.0,
            panel_star_size: 50.0,
            panel_scale: 3.0,
            initial_angle: FRAC_PI_2,
            animation_duration_ms: 2000.0,
            easing: Easing::Linear,
            clamp_policy: ClampPolicy::HoldPrevious,
            retrigger_policy: RetriggerPolicy::Restart,
            palette: Palette::default(),
            background_stars: vec![-160.0, -120.0, -10.0, 50.0, 170.0],
            foreground_stars: vec![
                ForegroundSeed { x: 100.0, y: -160.0, color: Color::RED },
                ForegroundSeed { x: -80.0, y: -120.0, color: Color::GREEN },
            ],
        }
    }
}

impl SceneConfig {
    /// Parse a scene variant from JSON and validate it.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the geometry cannot work with.
    pub fn validate(&self) -> SceneResult<()> {
        let positive = [
            ("local_width", self.local_width),
            ("local_height", self.local_height),
            ("panel_width", self.panel_width),
            ("panel_height", self.panel_height),
            ("r_orbit", self.r_orbit),
            ("r_sun", self.r_sun),
            ("r_earth", self.r_earth),
            ("star_size", self.star_size),
            ("panel_star_size", self.panel_star_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let finite = [
            ("panel_scale", self.panel_scale),
            ("initial_angle", self.initial_angle),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SceneError::InvalidConfig(format!("{name} must be finite")));
            }
        }

        if !(self.animation_duration_ms.is_finite() && self.animation_duration_ms >= 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "animation_duration_ms must be non-negative, got {}",
                self.animation_duration_ms
            )));
        }

        if self.star_size * 2.0 >= self.local_height {
            return Err(SceneError::InvalidConfig(
                "star_size leaves no vertical room to drag".into(),
            ));
        }

        // Orbit and earth stay inside the solar system's slice of the canvas
        let solar_room = (self.local_width / 8.0).min(self.local_height / 2.0);
        if self.r_orbit + self.r_earth > solar_room {
            return Err(SceneError::InvalidConfig(format!(
                "r_orbit + r_earth must fit within {solar_room}, got {}",
                self.r_orbit + self.r_earth
            )));
        }
        if self.r_sun >= self.r_orbit {
            return Err(SceneError::InvalidConfig(
                "r_sun must be smaller than r_orbit".into(),
            ));
        }
        if self.panel_star_size * 2.0 > self.panel_height {
            return Err(SceneError::InvalidConfig(
                "panel_star_size does not fit the panel height".into(),
            ));
        }

        let bounds = DragConstraints::from_config(self);
        if let Some((i, y)) = self
            .background_stars
            .iter()
            .enumerate()
            .find(|(_, y)| !bounds.vertical.contains(**y))
        {
            return Err(SceneError::InvalidConfig(format!(
                "background star {i} seed {y} is outside the drag bounds"
            )));
        }
        if let Some((i, seed)) = self.foreground_stars.iter().enumerate().find(|(_, s)| {
            !bounds.horizontal.contains(s.x) || !bounds.vertical.contains(s.y)
        }) {
            return Err(SceneError::InvalidConfig(format!(
                "foreground star {i} seed ({}, {}) is outside the drag bounds",
                seed.x, seed.y
            )));
        }

        Ok(())
    }

    // -- Layout (canvas-space group origins) --

    /// Sun and orbit centre in the local bubble.
    pub fn solar_origin(&self) -> DVec2 {
        DVec2::new(self.local_width / 8.0, self.local_height / 2.0)
    }

    /// Origin of the foreground star group in the local bubble.
    pub fn foreground_origin(&self) -> DVec2 {
        DVec2::new(self.local_width / 2.0, self.local_height / 2.0)
    }

    /// Origin of the background star group in the local bubble.
    /// Sits on the observation plane.
    pub fn background_origin(&self) -> DVec2 {
        DVec2::new(7.0 * self.local_width / 8.0, self.local_height / 2.0)
    }

    /// Origin of both star groups in the viewing panel.
    pub fn panel_origin(&self) -> DVec2 {
        DVec2::new(self.panel_width / 2.0, self.panel_height / 2.0)
    }

    /// Horizontal distance from the orbit centre to the foreground group origin.
    pub fn foreground_offset(&self) -> f64 {
        3.0 * self.local_width / 8.0
    }

    /// Horizontal distance from the orbit centre to the observation plane.
    pub fn plane_distance(&self) -> f64 {
        3.0 * self.local_width / 4.0
    }
}
