use glam::DVec2;

use crate::api::types::StarId;
use crate::components::orbit::angle_from_pointer;
use crate::core::config::SceneConfig;
use crate::core::state::SceneState;
use crate::error::SceneResult;
use crate::extensions::animation::{AnimationScheduler, FrameOutcome, RunToken, TriggerOutcome};
use crate::input::drag::{DragProposal, DragSubject, DragTracker};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::traits::RenderSink;
use crate::systems::constraint::DragConstraints;
use crate::systems::propagation::{propagate, Mutation};

/// The scene controller.
///
/// Owns the configuration, the mutable scene state and the animation
/// scheduler. Every mutation enters here and is followed by a synchronous
/// propagation to the render sink before the call returns.
pub struct ParallaxScene {
    config: SceneConfig,
    state: SceneState,
    constraints: DragConstraints,
    scheduler: AnimationScheduler,
    drag: DragTracker,
}

impl ParallaxScene {
    /// Build a scene from a validated configuration.
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The reference scene: 1200×400 bubble, five background stars, red and
    /// green foreground stars.
    pub fn reference() -> Self {
        Self::build(SceneConfig::default())
    }

    fn build(config: SceneConfig) -> Self {
        let state = SceneState::from_config(&config);
        let constraints = DragConstraints::from_config(&config);
        let scheduler = AnimationScheduler::new(
            config.animation_duration_ms,
            config.easing,
            config.retrigger_policy,
        );
        Self {
            config,
            state,
            constraints,
            scheduler,
            drag: DragTracker::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Subject of the pointer drag in progress.
    pub fn drag_subject(&self) -> Option<DragSubject> {
        self.drag.subject()
    }

    /// Push every view to the sink. Call once after the sink is ready.
    pub fn render_all(&self, sink: &mut dyn RenderSink) -> usize {
        propagate(Mutation::Reset, &self.state, &self.config, sink)
    }

    // -- Earth --

    /// Set earth's angle directly. Non-finite angles are ignored.
    pub fn set_earth_angle(&mut self, angle: f64, sink: &mut dyn RenderSink) -> bool {
        if !angle.is_finite() {
            log::warn!("ignoring non-finite earth angle {angle}");
            return false;
        }
        self.state.set_earth_angle(angle);
        propagate(Mutation::EarthAngle, &self.state, &self.config, sink);
        true
    }

    /// Earth dragged to `offset` from the orbit centre (y down).
    ///
    /// Only the direction counts; earth snaps onto its orbit. A drag takes
    /// over from any running sweep. Returns false when the offset has no
    /// direction and the angle is kept.
    pub fn drag_earth(&mut self, offset: DVec2, sink: &mut dyn RenderSink) -> bool {
        self.take_over_from_animation();
        match angle_from_pointer(offset) {
            Some(angle) => self.set_earth_angle(angle, sink),
            None => {
                log::debug!("earth drag at {offset} has no direction, angle kept");
                false
            }
        }
    }

    fn take_over_from_animation(&mut self) {
        if self.scheduler.cancel() {
            log::debug!("earth drag took over from the orbit sweep");
        }
    }

    // -- Stars --

    /// Propose a new vertical offset for a background star.
    /// Returns the committed offset after constraints.
    pub fn move_background_star(
        &mut self,
        id: StarId,
        proposed_y: f64,
        sink: &mut dyn RenderSink,
    ) -> SceneResult<f64> {
        let star = self.state.background_star_mut(id)?;
        let committed = self.constraints.background(star.vertical_offset(), proposed_y);
        if committed != proposed_y {
            log::debug!("background star {id}: offset {proposed_y} rejected, kept {committed}");
        }
        star.set_vertical_offset(committed);
        propagate(Mutation::BackgroundStar(id), &self.state, &self.config, sink);
        Ok(committed)
    }

    /// Propose a new position for a foreground star.
    /// Each axis is constrained independently. Returns the committed position.
    pub fn move_foreground_star(
        &mut self,
        id: StarId,
        proposed: DVec2,
        sink: &mut dyn RenderSink,
    ) -> SceneResult<DVec2> {
        let star = self.state.foreground_star_mut(id)?;
        let committed = self.constraints.foreground(star.pos(), proposed);
        if committed != proposed {
            log::debug!("foreground star {id}: position {proposed} constrained to {committed}");
        }
        star.set_pos(committed);
        propagate(Mutation::ForegroundStar(id), &self.state, &self.config, sink);
        Ok(committed)
    }

    // -- Animation --

    pub fn trigger_animation(&mut self, now_ms: f64) -> TriggerOutcome {
        self.scheduler.trigger(now_ms)
    }

    pub fn cancel_animation(&mut self) -> bool {
        self.scheduler.cancel()
    }

    /// Frame callback for the current run, if any.
    pub fn advance_animation(&mut self, now_ms: f64, sink: &mut dyn RenderSink) -> FrameOutcome {
        let outcome = self.scheduler.tick(now_ms);
        self.apply_frame(outcome, sink);
        outcome
    }

    /// Frame callback armed for a specific run. Stale tokens change nothing.
    pub fn animation_frame(
        &mut self,
        token: RunToken,
        now_ms: f64,
        sink: &mut dyn RenderSink,
    ) -> FrameOutcome {
        let outcome = self.scheduler.frame(token, now_ms);
        self.apply_frame(outcome, sink);
        outcome
    }

    fn apply_frame(&mut self, outcome: FrameOutcome, sink: &mut dyn RenderSink) {
        if let Some(angle) = outcome.angle() {
            self.state.set_earth_angle(angle);
            propagate(Mutation::EarthAngle, &self.state, &self.config, sink);
        }
    }

    // -- Pointer --

    /// Press at canvas coordinates. Starts a drag if it lands on a subject.
    pub fn pointer_down(&mut self, canvas: DVec2) -> Option<DragSubject> {
        let subject = self.drag.begin(&self.config, &self.state, canvas)?;
        if subject == DragSubject::Earth {
            self.take_over_from_animation();
        }
        Some(subject)
    }

    /// Pointer moved. Applies the drag proposal, if a drag is active.
    pub fn pointer_move(&mut self, canvas: DVec2, sink: &mut dyn RenderSink) -> bool {
        let Some(proposal) = self.drag.propose(&self.config, canvas) else {
            return false;
        };
        self.apply_proposal(proposal, sink);
        true
    }

    /// Release. Ends the drag without moving anything.
    pub fn pointer_up(&mut self) -> Option<DragSubject> {
        self.drag.end()
    }

    fn apply_proposal(&mut self, proposal: DragProposal, sink: &mut dyn RenderSink) {
        let result = match proposal {
            DragProposal::Earth(offset) => {
                self.drag_earth(offset, sink);
                Ok(())
            }
            DragProposal::BackgroundStar(id, y) => self.move_background_star(id, y, sink).map(|_| ()),
            DragProposal::ForegroundStar(id, pos) => {
                self.move_foreground_star(id, pos, sink).map(|_| ())
            }
        };
        if let Err(e) = result {
            log::warn!("drag dropped: {e}");
        }
    }

    // -- Input --

    /// Apply one input event at time `now_ms`.
    pub fn apply_input(&mut self, event: InputEvent, now_ms: f64, sink: &mut dyn RenderSink) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(DVec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(DVec2::new(x, y), sink);
            }
            InputEvent::PointerUp { .. } => {
                self.pointer_up();
            }
            InputEvent::DragEarth { x, y } => {
                self.drag_earth(DVec2::new(x, y), sink);
            }
            InputEvent::DragBackgroundStar { id, y } => {
                if let Err(e) = self.move_background_star(id, y, sink) {
                    log::warn!("{e}");
                }
            }
            InputEvent::DragForegroundStar { id, x, y } => {
                if let Err(e) = self.move_foreground_star(id, DVec2::new(x, y), sink) {
                    log::warn!("{e}");
                }
            }
            InputEvent::TriggerAnimation => {
                self.trigger_animation(now_ms);
            }
            InputEvent::CancelAnimation => {
                self.cancel_animation();
            }
        }
    }

    /// One frame: apply queued input in arrival order, then advance the
    /// orbit sweep. Returns the sweep outcome.
    pub fn update(&mut self, input: &InputQueue, now_ms: f64, sink: &mut dyn RenderSink) -> FrameOutcome {
        for event in input.iter() {
            self.apply_input(*event, now_ms, sink);
        }
        self.advance_animation(now_ms, sink)
    }
}
