//! Pointer drag tracking.
//!
//! Turns raw canvas-space pointer events into drag proposals addressed to a
//! subject (earth or a star), expressed relative to that subject's group
//! origin. The constraint engine decides later what is actually committed.

use glam::DVec2;

use crate::api::types::StarId;
use crate::components::orbit::position_from_angle;
use crate::core::config::SceneConfig;
use crate::core::state::SceneState;

/// Extra pick radius around earth, whose marker is small.
const EARTH_HIT_SLOP: f64 = 6.0;

/// What a drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSubject {
    Earth,
    BackgroundStar(StarId),
    ForegroundStar(StarId),
}

/// A proposed new position for the subject of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragProposal {
    /// Pointer offset from the orbit centre (y down).
    Earth(DVec2),
    /// Proposed vertical offset in the background group.
    BackgroundStar(StarId, f64),
    /// Proposed position in the foreground group.
    ForegroundStar(StarId, DVec2),
}

/// Earth's centre in local-bubble canvas space.
pub fn earth_canvas_pos(config: &SceneConfig, angle: f64) -> DVec2 {
    // The earth marker frame sits r_orbit above the orbit centre
    config.solar_origin() + position_from_angle(angle, config.r_orbit)
        - DVec2::new(0.0, config.r_orbit)
}

/// Find the topmost draggable subject under a canvas position.
/// Foreground stars are drawn last, so they win over background stars and earth.
pub fn hit_test(config: &SceneConfig, state: &SceneState, canvas: DVec2) -> Option<DragSubject> {
    let fg_origin = config.foreground_origin();
    let hit_fg = state
        .foreground_stars()
        .iter()
        .rev()
        .find(|s| canvas.distance(fg_origin + s.pos()) <= config.star_size);
    if let Some(star) = hit_fg {
        return Some(DragSubject::ForegroundStar(star.id));
    }

    let bg_origin = config.background_origin();
    let hit_bg = state
        .background_stars()
        .iter()
        .rev()
        .find(|s| canvas.distance(bg_origin + DVec2::new(0.0, s.vertical_offset())) <= config.star_size);
    if let Some(star) = hit_bg {
        return Some(DragSubject::BackgroundStar(star.id));
    }

    let earth = earth_canvas_pos(config, state.earth_angle());
    if canvas.distance(earth) <= config.r_earth + EARTH_HIT_SLOP {
        return Some(DragSubject::Earth);
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    subject: DragSubject,
    /// Pointer minus subject position at press time, so the subject does
    /// not jump to centre itself under the pointer.
    grab: DVec2,
}

/// Tracks the drag in progress, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self) -> Option<DragSubject> {
        self.active.map(|a| a.subject)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Start a drag if the press lands on a subject.
    pub fn begin(&mut self, config: &SceneConfig, state: &SceneState, canvas: DVec2) -> Option<DragSubject> {
        let subject = hit_test(config, state, canvas)?;
        let grab = match subject {
            DragSubject::Earth => DVec2::ZERO,
            DragSubject::BackgroundStar(id) => state
                .background_star(id)
                .map(|s| canvas - (config.background_origin() + DVec2::new(0.0, s.vertical_offset())))
                .unwrap_or(DVec2::ZERO),
            DragSubject::ForegroundStar(id) => state
                .foreground_star(id)
                .map(|s| canvas - (config.foreground_origin() + s.pos()))
                .unwrap_or(DVec2::ZERO),
        };
        self.active = Some(ActiveDrag { subject, grab });
        Some(subject)
    }

    /// Proposal for the pointer now at `canvas`, if a drag is active.
    pub fn propose(&self, config: &SceneConfig, canvas: DVec2) -> Option<DragProposal> {
        let drag = self.active?;
        let proposal = match drag.subject {
            // Only the direction from the orbit centre matters for earth
            DragSubject::Earth => DragProposal::Earth(canvas - config.solar_origin()),
            DragSubject::BackgroundStar(id) => {
                let local = canvas - drag.grab - config.background_origin();
                DragProposal::BackgroundStar(id, local.y)
            }
            DragSubject::ForegroundStar(id) => {
                DragProposal::ForegroundStar(id, canvas - drag.grab - config.foreground_origin())
            }
        };
        Some(proposal)
    }

    /// Finish the drag. Returns the subject that was being dragged.
    pub fn end(&mut self) -> Option<DragSubject> {
        self.active.take().map(|a| a.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn reference() -> (SceneConfig, SceneState) {
        let config = SceneConfig::default();
        let state = SceneState::from_config(&config);
        (config, state)
    }

    #[test]
    fn earth_starts_above_the_sun() {
        let (config, _) = reference();
        let p = earth_canvas_pos(&config, FRAC_PI_2);
        assert!((p - DVec2::new(150.0, 120.0)).length() < 1e-9);
    }

    #[test]
    fn hit_test_finds_each_kind() {
        let (config, state) = reference();
        // red foreground star at (600 + 100, 200 - 160)
        assert_eq!(
            hit_test(&config, &state, DVec2::new(700.0, 40.0)),
            Some(DragSubject::ForegroundStar(StarId(0)))
        );
        // background star 3 at (1050, 200 + 50)
        assert_eq!(
            hit_test(&config, &state, DVec2::new(1055.0, 248.0)),
            Some(DragSubject::BackgroundStar(StarId(3)))
        );
        assert_eq!(hit_test(&config, &state, DVec2::new(150.0, 118.0)), Some(DragSubject::Earth));
        assert_eq!(hit_test(&config, &state, DVec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn star_drag_keeps_grab_offset() {
        let (config, state) = reference();
        let mut tracker = DragTracker::new();
        // press 5px right of and 4px below the red star's centre
        let press = DVec2::new(705.0, 44.0);
        assert_eq!(
            tracker.begin(&config, &state, press),
            Some(DragSubject::ForegroundStar(StarId(0)))
        );
        let proposal = tracker.propose(&config, press + DVec2::new(10.0, 20.0)).unwrap();
        assert_eq!(
            proposal,
            DragProposal::ForegroundStar(StarId(0), DVec2::new(110.0, -140.0))
        );
    }

    #[test]
    fn background_drag_proposes_vertical_offset_only() {
        let (config, state) = reference();
        let mut tracker = DragTracker::new();
        tracker.begin(&config, &state, DVec2::new(1050.0, 190.0)).unwrap();
        match tracker.propose(&config, DVec2::new(1300.0, 230.0)).unwrap() {
            DragProposal::BackgroundStar(id, y) => {
                assert_eq!(id, StarId(2));
                assert_eq!(y, 30.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn earth_drag_proposes_offset_from_orbit_centre() {
        let (config, state) = reference();
        let mut tracker = DragTracker::new();
        tracker.begin(&config, &state, DVec2::new(150.0, 120.0)).unwrap();
        assert_eq!(
            tracker.propose(&config, DVec2::new(100.0, 250.0)),
            Some(DragProposal::Earth(DVec2::new(-50.0, 50.0)))
        );
    }

    #[test]
    fn miss_starts_nothing_and_end_clears() {
        let (config, state) = reference();
        let mut tracker = DragTracker::new();
        assert_eq!(tracker.begin(&config, &state, DVec2::new(5.0, 5.0)), None);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.propose(&config, DVec2::ZERO), None);

        tracker.begin(&config, &state, DVec2::new(150.0, 120.0));
        assert_eq!(tracker.end(), Some(DragSubject::Earth));
        assert_eq!(tracker.end(), None);
    }
}
