/// Earth's circular orbit: angle <-> position conversion.
///
/// Two coordinate conventions meet here:
/// - pointer offsets and render positions are y-down (canvas space),
/// - the projector works in y-up cartesian space around the sun.
///
/// Pure math, no scene dependencies.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

/// Convert a pointer offset from the orbit centre (y down) into an angle in `[0, 2π)`.
///
/// Piecewise arctangent, continuous across all four quadrants.
/// `x == 0` is resolved to straight up (`π/2`) or straight down (`3π/2`).
/// The exact centre carries no direction and returns `None`, as does
/// non-finite input; callers keep the previous angle in that case.
pub fn angle_from_pointer(offset: DVec2) -> Option<f64> {
    let DVec2 { x, y } = offset;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    if x == 0.0 {
        return if y < 0.0 {
            Some(FRAC_PI_2)
        } else if y > 0.0 {
            Some(3.0 * FRAC_PI_2)
        } else {
            None
        };
    }

    let base = (-y / x).atan();
    let angle = if x < 0.0 {
        base + PI
    } else if y > 0.0 {
        base + TAU
    } else {
        base
    };
    Some(angle)
}

/// Earth's render position inside the solar-system group.
///
/// The earth marker's frame is translated by `-r_orbit` vertically, so the
/// y component carries a `+ r_orbit` offset.
pub fn position_from_angle(angle: f64, r_orbit: f64) -> DVec2 {
    DVec2::new(r_orbit * angle.cos(), -r_orbit * angle.sin() + r_orbit)
}

/// Earth's y-up cartesian position relative to the sun.
pub fn earth_cartesian(angle: f64, r_orbit: f64) -> DVec2 {
    DVec2::new(r_orbit * angle.cos(), r_orbit * angle.sin())
}

/// Map any real angle into `[0, 2π)`.
///
/// The stored orbital angle is never normalized; consumers that need the
/// canonical range call this explicitly.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Earth's angular position. The angle is any real value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    earth_angle: f64,
}

impl OrbitalState {
    pub fn new(earth_angle: f64) -> Self {
        Self { earth_angle }
    }

    /// Current angle in radians, not normalized.
    pub fn angle(&self) -> f64 {
        self.earth_angle
    }

    /// Only the scene controller writes the angle, so propagation always follows.
    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.earth_angle = angle;
    }
}
