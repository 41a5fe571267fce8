pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::scene::ParallaxScene;
pub use api::types::{Color, StarField, StarId};
pub use error::{SceneError, SceneResult};
pub use crate::core::config::{ForegroundSeed, Palette, SceneConfig};
pub use crate::core::state::SceneState;
pub use crate::core::time::FrameClock;
pub use components::orbit::{angle_from_pointer, earth_cartesian, normalize_angle, position_from_angle, OrbitalState};
pub use components::star::{BackgroundStar, ForegroundStar};
pub use systems::constraint::{Bounds, ClampPolicy, DragConstraints};
pub use systems::projector::{Projection, Projector};
pub use systems::propagation::{affected, propagate, Mutation, View};
pub use renderer::instance::{FrameBuffer, SceneInstance, Shape};
pub use renderer::silhouette::star_outline;
pub use renderer::traits::{RenderSink, SinkUpdate, UpdateLog};
pub use input::queue::{InputEvent, InputQueue};
pub use input::drag::{DragProposal, DragSubject, DragTracker};
pub use bridge::protocol::{pack_frame, FrameMeta, ProtocolLayout};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};

pub use extensions::{
    AnimationScheduler, AnimationState, FrameOutcome, RetriggerPolicy, RunToken, TriggerOutcome,
    Easing,
};
