//! Drag constraint engine.
//!
//! Pure bound checks applied to every proposed star position before it is
//! committed. Each axis is judged on its own: an over-limit axis stops while
//! the other keeps following the pointer.

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::config::SceneConfig;

/// What happens to a proposed coordinate that falls outside its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Keep the star's previous value on that axis for this event.
    #[default]
    HoldPrevious,
    /// Pin the coordinate to the nearest bound edge.
    SnapToEdge,
}

/// Closed interval `[min, max]` of valid coordinates on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `v` is a finite value inside the interval (edges included).
    pub fn contains(&self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    /// Constrain a proposal given the previous committed value.
    /// Non-finite proposals are always rejected in favour of `previous`.
    pub fn constrain(&self, previous: f64, proposed: f64, policy: ClampPolicy) -> f64 {
        if self.contains(proposed) {
            return proposed;
        }
        match policy {
            ClampPolicy::HoldPrevious => previous,
            ClampPolicy::SnapToEdge if proposed.is_finite() => proposed.clamp(self.min, self.max),
            ClampPolicy::SnapToEdge => previous,
        }
    }
}

/// Vertical range shared by every star kind.
///
/// The upper edge is reduced by `cos(π/5)` because the star silhouette's
/// lower points reach less far than its top point.
pub fn vertical_bounds(canvas_height: f64, star_size: f64) -> Bounds {
    Bounds::new(
        -canvas_height / 2.0 + star_size,
        canvas_height / 2.0 - star_size * (PI / 5.0).cos(),
    )
}

/// Horizontal range of the foreground field, relative to its group origin.
pub fn horizontal_bounds(canvas_width: f64) -> Bounds {
    Bounds::new(-2.0 * canvas_width / 8.0, 3.0 * canvas_width / 8.0)
}

/// Bounds and policy for a scene, built once from its config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConstraints {
    pub vertical: Bounds,
    pub horizontal: Bounds,
    pub policy: ClampPolicy,
}

impl DragConstraints {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            vertical: vertical_bounds(config.local_height, config.star_size),
            horizontal: horizontal_bounds(config.local_width),
            policy: config.clamp_policy,
        }
    }

    pub fn background(&self, previous: f64, proposed: f64) -> f64 {
        self.vertical.constrain(previous, proposed, self.policy)
    }

    pub fn foreground(&self, previous: DVec2, proposed: DVec2) -> DVec2 {
        DVec2::new(
            self.horizontal.constrain(previous.x, proposed.x, self.policy),
            self.vertical.constrain(previous.y, proposed.y, self.policy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f64 = 400.0;
    const W: f64 = 1200.0;
    const SIZE: f64 = 20.0;

    fn constraints(policy: ClampPolicy) -> DragConstraints {
        DragConstraints {
            vertical: vertical_bounds(H, SIZE),
            horizontal: horizontal_bounds(W),
            policy,
        }
    }

    #[test]
    fn reference_bounds() {
        let v = vertical_bounds(H, SIZE);
        assert_eq!(v.min, -180.0);
        assert!((v.max - (200.0 - 20.0 * (PI / 5.0).cos())).abs() < 1e-12);
        assert!((v.max - 183.819_660_112_501).abs() < 1e-9);

        let h = horizontal_bounds(W);
        assert_eq!(h.min, -300.0);
        assert_eq!(h.max, 450.0);
    }

    #[test]
    fn in_bound_values_pass_through() {
        let c = constraints(ClampPolicy::HoldPrevious);
        assert_eq!(c.background(0.0, 120.0), 120.0);
        assert_eq!(c.background(0.0, -180.0), -180.0);
    }

    #[test]
    fn hold_previous_rejects_out_of_bound_axis() {
        let c = constraints(ClampPolicy::HoldPrevious);
        assert_eq!(c.background(50.0, 190.0), 50.0);
        assert_eq!(c.background(50.0, -181.0), 50.0);
    }

    #[test]
    fn snap_to_edge_pins_to_bound() {
        let c = constraints(ClampPolicy::SnapToEdge);
        assert_eq!(c.background(50.0, -500.0), -180.0);
        let p = c.foreground(DVec2::ZERO, DVec2::new(900.0, 0.0));
        assert_eq!(p, DVec2::new(450.0, 0.0));
    }

    #[test]
    fn axes_are_independent() {
        let c = constraints(ClampPolicy::HoldPrevious);
        let prev = DVec2::new(100.0, -160.0);
        // x too far right, y fine: y follows, x holds
        let p = c.foreground(prev, DVec2::new(500.0, -100.0));
        assert_eq!(p, DVec2::new(100.0, -100.0));
        // y too low, x fine: x follows, y holds
        let p = c.foreground(prev, DVec2::new(-250.0, 199.0));
        assert_eq!(p, DVec2::new(-250.0, -160.0));
    }

    #[test]
    fn horizontal_bound_is_asymmetric() {
        let c = constraints(ClampPolicy::HoldPrevious);
        assert_eq!(c.foreground(DVec2::ZERO, DVec2::new(400.0, 0.0)).x, 400.0);
        assert_eq!(c.foreground(DVec2::ZERO, DVec2::new(-400.0, 0.0)).x, 0.0);
    }

    #[test]
    fn constraint_is_idempotent() {
        for policy in [ClampPolicy::HoldPrevious, ClampPolicy::SnapToEdge] {
            let c = constraints(policy);
            for proposed in [-1000.0, -180.0, -3.5, 0.0, 183.0, 190.0, 1e9] {
                let prev = 12.0;
                let once = c.background(prev, proposed);
                let twice = c.background(prev, once);
                assert_eq!(once, twice, "{policy:?} with {proposed}");
            }
            let prev = DVec2::new(10.0, 10.0);
            let proposed = DVec2::new(-700.0, 300.0);
            let once = c.foreground(prev, proposed);
            assert_eq!(c.foreground(prev, once), once);
        }
    }

    #[test]
    fn non_finite_proposals_are_rejected() {
        for policy in [ClampPolicy::HoldPrevious, ClampPolicy::SnapToEdge] {
            let c = constraints(policy);
            assert_eq!(c.background(7.0, f64::NAN), 7.0);
            assert_eq!(c.background(7.0, f64::INFINITY), 7.0);
        }
    }
}
