//! Parallax projector.
//!
//! Maps each star onto the viewing panel. Background stars are a fixed
//! rescale of their own offset. Foreground stars are projected along the
//! line of sight from earth, through the star, onto the observation plane.
//! Everything is recomputed from scratch on each call: the formulas are
//! closed-form and the star count is small.

use glam::DVec2;

use crate::components::orbit::earth_cartesian;
use crate::core::config::SceneConfig;

/// Horizontal separations below this are treated as a vertical sight line.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Result of projecting a foreground star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Panel x coordinate.
    At(f64),
    /// The sight line never meets the observation plane: earth and the star
    /// share the same horizontal position, or the arithmetic overflowed.
    /// The star has no panel position for this state.
    Unbounded,
}

impl Projection {
    pub fn value(self) -> Option<f64> {
        match self {
            Projection::At(x) => Some(x),
            Projection::Unbounded => None,
        }
    }
}

/// Projection constants taken from a scene config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    r_orbit: f64,
    /// Orbit centre to foreground group origin.
    foreground_offset: f64,
    /// Orbit centre to observation plane.
    plane_distance: f64,
    scale: f64,
}

impl Projector {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            r_orbit: config.r_orbit,
            foreground_offset: config.foreground_offset(),
            plane_distance: config.plane_distance(),
            scale: config.panel_scale,
        }
    }

    /// Background stars carry no parallax: their panel x tracks their own
    /// vertical offset, independent of earth.
    pub fn background(&self, vertical_offset: f64) -> f64 {
        self.scale * vertical_offset
    }

    /// Project a foreground star (position relative to its group origin,
    /// y down) as seen from earth at `earth_angle`.
    pub fn foreground(&self, earth_angle: f64, star: DVec2) -> Projection {
        let earth = earth_cartesian(earth_angle, self.r_orbit);

        let run = star.x + self.foreground_offset - earth.x;
        if !run.is_finite() || run.abs() < DEGENERATE_EPSILON {
            return Projection::Unbounded;
        }

        // star.y is y-down; the slope is taken in y-up space
        let slope = -(earth.y + star.y) / run;
        let y_at_plane = slope * (self.plane_distance - earth.x) + earth.y;
        let panel_x = self.scale * y_at_plane;

        if panel_x.is_finite() {
            Projection::At(panel_x)
        } else {
            Projection::Unbounded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn projector() -> Projector {
        Projector::from_config(&SceneConfig::default())
    }

    #[test]
    fn regression_fixture_top_of_orbit() {
        // W = 1200, earth at π/2, star at (100, -160):
        // m = 80 / 550, y = m * 900 + 80, panel = 3y = 6960 / 11
        let x = projector()
            .foreground(FRAC_PI_2, DVec2::new(100.0, -160.0))
            .value()
            .unwrap();
        assert!((x - 632.727_272_727_272_7).abs() < 1e-9, "got {x}");
        assert!((x - 6960.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn background_is_pure_rescale() {
        let p = projector();
        for v in [-160.0, -10.0, 0.0, 50.0, 183.5] {
            assert_eq!(p.background(v), 3.0 * v);
        }
    }

    #[test]
    fn foreground_shifts_as_earth_moves() {
        let p = projector();
        let star = DVec2::new(100.0, -160.0);
        let top = p.foreground(FRAC_PI_2, star).value().unwrap();
        let bottom = p.foreground(3.0 * FRAC_PI_2, star).value().unwrap();
        let left = p.foreground(PI, star).value().unwrap();
        assert!((top - bottom).abs() > 1.0, "no parallax between top and bottom");
        assert!((top - left).abs() > 1.0, "no parallax between top and left");
    }

    #[test]
    fn star_on_sight_axis_projects_to_plane_height() {
        // Earth at angle 0 sits at (80, 0); a star level with it lands at 0
        let x = projector()
            .foreground(0.0, DVec2::new(0.0, 0.0))
            .value()
            .unwrap();
        assert!(x.abs() < 1e-9);
    }

    #[test]
    fn angle_is_not_normalized_before_use() {
        let p = projector();
        let star = DVec2::new(-80.0, -120.0);
        let a = p.foreground(FRAC_PI_2, star).value().unwrap();
        let b = p.foreground(FRAC_PI_2 + 4.0 * PI, star).value().unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn vertical_sight_line_is_unbounded() {
        // At angle 0 earth.x = 80; a star at x = 80 - 450 shares that column
        let p = projector();
        assert_eq!(p.foreground(0.0, DVec2::new(-370.0, -50.0)), Projection::Unbounded);
        assert_eq!(Projection::Unbounded.value(), None);
    }

    #[test]
    fn non_finite_star_is_unbounded() {
        let p = projector();
        assert_eq!(
            p.foreground(FRAC_PI_2, DVec2::new(f64::NAN, 0.0)),
            Projection::Unbounded
        );
        assert_eq!(
            p.foreground(FRAC_PI_2, DVec2::new(0.0, f64::INFINITY)),
            Projection::Unbounded
        );
    }
}
