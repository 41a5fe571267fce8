// extensions/mod.rs
//
// Time-driven behaviour layered on top of the scene state.
// The scene controller owns one scheduler; nothing here touches state directly.

pub mod animation;
pub mod easing;

pub use animation::{AnimationScheduler, AnimationState, FrameOutcome, RetriggerPolicy, RunToken, TriggerOutcome};
pub use easing::Easing;
