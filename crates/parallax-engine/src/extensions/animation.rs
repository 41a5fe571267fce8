// extensions/animation.rs
//
// Orbit sweep scheduler: drives earth through one full revolution over a
// fixed duration, one step per display frame.
//
// Usage:
//   let mut anim = AnimationScheduler::new(2000.0, Easing::Linear, RetriggerPolicy::Restart);
//   anim.trigger(now_ms);
//   match anim.tick(now_ms) { FrameOutcome::Progress { angle, .. } => ..., _ => ... }
//
// A single run slot holds the current run. Each run carries a token; a frame
// armed for any other token is stale and does nothing, so at most one writer
// ever drives the angle.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::easing::Easing;

/// What a trigger does while a run is already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetriggerPolicy {
    /// Invalidate the current run and start over from the trigger time.
    #[default]
    Restart,
    /// Keep the current run; the trigger does nothing.
    Ignore,
    /// Remember one pending run, started when the current one completes.
    Queue,
}

/// Handle identifying one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunToken(pub u64);

/// The single run slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    Idle,
    Running { token: RunToken, start_ms: f64 },
}

/// Result of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Nothing was running; a new run started.
    Started(RunToken),
    /// The running run was invalidated and replaced.
    Restarted { cancelled: RunToken, started: RunToken },
    /// A run is in progress and the trigger was dropped.
    Ignored,
    /// A run is in progress; one follow-up run is now pending.
    Queued,
}

/// Result of a frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No run in progress.
    Idle,
    /// The frame belongs to a run that is no longer current. Nothing changed.
    Stale,
    /// The run advanced; `angle` is the new earth angle.
    Progress { angle: f64, fraction: f64 },
    /// The run reached its end at `angle`. `next` is the queued run that
    /// started on this frame, if any.
    Finished { angle: f64, next: Option<RunToken> },
}

impl FrameOutcome {
    /// New earth angle produced by this frame, if any.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            FrameOutcome::Progress { angle, .. } | FrameOutcome::Finished { angle, .. } => {
                Some(angle)
            }
            FrameOutcome::Idle | FrameOutcome::Stale => None,
        }
    }
}

/// Drives the full-revolution sweep.
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    state: AnimationState,
    policy: RetriggerPolicy,
    /// Duration in milliseconds.
    duration_ms: f64,
    easing: Easing,
    next_token: u64,
    /// Set when a trigger arrived under `RetriggerPolicy::Queue`.
    pending: bool,
}

impl AnimationScheduler {
    pub fn new(duration_ms: f64, easing: Easing, policy: RetriggerPolicy) -> Self {
        Self {
            state: AnimationState::Idle,
            policy,
            duration_ms,
            easing,
            next_token: 1,
            pending: false,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn policy(&self) -> RetriggerPolicy {
        self.policy
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    /// Token of the run currently in the slot.
    pub fn current_token(&self) -> Option<RunToken> {
        match self.state {
            AnimationState::Running { token, .. } => Some(token),
            AnimationState::Idle => None,
        }
    }

    /// Whether a queued follow-up run is waiting.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    fn start(&mut self, now_ms: f64) -> RunToken {
        let token = RunToken(self.next_token);
        self.next_token += 1;
        self.state = AnimationState::Running { token, start_ms: now_ms };
        token
    }

    /// Handle the trigger control at time `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) -> TriggerOutcome {
        let current = match self.state {
            AnimationState::Idle => {
                let token = self.start(now_ms);
                log::debug!("orbit sweep {token:?} started at {now_ms}ms");
                return TriggerOutcome::Started(token);
            }
            AnimationState::Running { token, .. } => token,
        };

        match self.policy {
            RetriggerPolicy::Restart => {
                let started = self.start(now_ms);
                log::debug!("orbit sweep {current:?} cancelled, {started:?} started at {now_ms}ms");
                TriggerOutcome::Restarted { cancelled: current, started }
            }
            RetriggerPolicy::Ignore => {
                log::debug!("orbit sweep {current:?} running, trigger ignored");
                TriggerOutcome::Ignored
            }
            RetriggerPolicy::Queue => {
                self.pending = true;
                log::debug!("orbit sweep queued behind {current:?}");
                TriggerOutcome::Queued
            }
        }
    }

    /// Invalidate the current run and drop any pending one.
    /// Returns whether a run was in progress.
    pub fn cancel(&mut self) -> bool {
        self.pending = false;
        match self.state {
            AnimationState::Idle => false,
            AnimationState::Running { token, .. } => {
                log::debug!("orbit sweep {token:?} cancelled");
                self.state = AnimationState::Idle;
                true
            }
        }
    }

    /// Elapsed fraction of the run, clamped to `[0, 1]`.
    /// A zero duration completes immediately.
    pub fn time_fraction(&self, start_ms: f64, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - start_ms) / self.duration_ms;
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Earth angle for an elapsed fraction.
    pub fn angle_at(&self, fraction: f64) -> f64 {
        self.easing.apply(fraction) * TAU
    }

    /// Frame callback for the run identified by `token`.
    pub fn frame(&mut self, token: RunToken, now_ms: f64) -> FrameOutcome {
        let start_ms = match self.state {
            AnimationState::Running { token: current, start_ms } if current == token => start_ms,
            _ => return FrameOutcome::Stale,
        };

        let fraction = self.time_fraction(start_ms, now_ms);
        let angle = self.angle_at(fraction);
        if fraction < 1.0 {
            return FrameOutcome::Progress { angle, fraction };
        }

        self.state = AnimationState::Idle;
        log::debug!("orbit sweep {token:?} finished");
        let next = if self.pending {
            self.pending = false;
            let next = self.start(now_ms);
            log::debug!("queued orbit sweep {next:?} started at {now_ms}ms");
            Some(next)
        } else {
            None
        };
        FrameOutcome::Finished { angle, next }
    }

    /// Frame callback for whichever run is current.
    pub fn tick(&mut self, now_ms: f64) -> FrameOutcome {
        match self.current_token() {
            Some(token) => self.frame(token, now_ms),
            None => FrameOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn scheduler(policy: RetriggerPolicy) -> AnimationScheduler {
        AnimationScheduler::new(2000.0, Easing::Linear, policy)
    }

    #[test]
    fn boundaries_of_a_run() {
        let mut anim = scheduler(RetriggerPolicy::Restart);
        anim.trigger(1000.0);

        match anim.tick(1000.0) {
            FrameOutcome::Progress { angle, fraction } => {
                assert_eq!(fraction, 0.0);
                assert_eq!(angle, 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }

        match anim.tick(3000.0) {
            FrameOutcome::Finished { angle, next } => {
                assert!((angle - TAU).abs() < EPS);
                assert_eq!(next, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(anim.state(), AnimationState::Idle);
        assert_eq!(anim.tick(3016.0), FrameOutcome::Idle);
    }

    #[test]
    fn progress_is_monotonic_under_identity() {
        let mut anim = scheduler(RetriggerPolicy::Restart);
        anim.trigger(0.0);
        let mut prev = -1.0;
        let mut now = 0.0;
        loop {
            let outcome = anim.tick(now);
            let angle = outcome.angle().unwrap();
            assert!(angle > prev, "angle went from {prev} to {angle}");
            prev = angle;
            if matches!(outcome, FrameOutcome::Finished { .. }) {
                break;
            }
            now += 16.7;
        }
        assert!((prev - TAU).abs() < EPS);
    }

    #[test]
    fn halfway_is_half_a_turn() {
        let mut anim = scheduler(RetriggerPolicy::Restart);
        anim.trigger(0.0);
        let angle = anim.tick(1000.0).angle().unwrap();
        assert!((angle - std::f64::consts::PI).abs() < EPS);
    }

    #[test]
    fn early_frame_clamps_to_zero() {
        let mut anim = scheduler(RetriggerPolicy::Restart);
        anim.trigger(500.0);
        assert_eq!(anim.tick(400.0).angle(), Some(0.0));
    }

    #[test]
    fn restart_policy_invalidates_old_run() {
        let mut anim = scheduler(RetriggerPolicy::Restart);
        let first = match anim.trigger(0.0) {
            TriggerOutcome::Started(t) => t,
            other => panic!("unexpected {other:?}"),
        };
        let second = match anim.trigger(500.0) {
            TriggerOutcome::Restarted { cancelled, started } => {
                assert_eq!(cancelled, first);
                started
            }
            other => panic!("unexpected {other:?}"),
        };
        assert_ne!(first, second);

        // The stale frame chain of the first run no longer writes
        assert_eq!(anim.frame(first, 1000.0), FrameOutcome::Stale);
        // The new run measures time from its own start
        let angle = anim.frame(second, 1500.0).angle().unwrap();
        assert!((angle - std::f64::consts::PI).abs() < EPS);
    }

    #[test]
    fn ignore_policy_keeps_single_run() {
        let mut anim = scheduler(RetriggerPolicy::Ignore);
        let first = match anim.trigger(0.0) {
            TriggerOutcome::Started(t) => t,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(anim.trigger(500.0), TriggerOutcome::Ignored);
        assert_eq!(anim.current_token(), Some(first));

        // Timing still follows the original start
        let angle = anim.tick(1000.0).angle().unwrap();
        assert!((angle - std::f64::consts::PI).abs() < EPS);
    }

    #[test]
    fn queue_policy_runs_back_to_back() {
        let mut anim = scheduler(RetriggerPolicy::Queue);
        anim.trigger(0.0);
        assert_eq!(anim.trigger(100.0), TriggerOutcome::Queued);
        assert_eq!(anim.trigger(200.0), TriggerOutcome::Queued);
        assert!(anim.has_pending());

        let next = match anim.tick(2000.0) {
            FrameOutcome::Finished { next: Some(next), .. } => next,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(anim.current_token(), Some(next));
        assert!(!anim.has_pending());

        // Only one follow-up run, even though two triggers were queued
        assert!(matches!(anim.tick(4000.0), FrameOutcome::Finished { next: None, .. }));
        assert!(!anim.is_running());
    }

    #[test]
    fn cancel_stops_run_and_drops_pending() {
        let mut anim = scheduler(RetriggerPolicy::Queue);
        anim.trigger(0.0);
        anim.trigger(10.0);
        let token = anim.current_token().unwrap();
        assert!(anim.cancel());
        assert!(!anim.has_pending());
        assert_eq!(anim.frame(token, 100.0), FrameOutcome::Stale);
        assert!(!anim.cancel());
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut anim = AnimationScheduler::new(0.0, Easing::Linear, RetriggerPolicy::Restart);
        anim.trigger(0.0);
        match anim.tick(0.0) {
            FrameOutcome::Finished { angle, .. } => assert!((angle - TAU).abs() < EPS),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn eased_sweep_still_ends_at_full_turn() {
        let mut anim = AnimationScheduler::new(1000.0, Easing::CubicInOut, RetriggerPolicy::Restart);
        anim.trigger(0.0);
        let quarter = anim.tick(250.0).angle().unwrap();
        assert!(quarter < TAU / 4.0);
        let end = anim.tick(1000.0).angle().unwrap();
        assert!((end - TAU).abs() < EPS);
    }
}
