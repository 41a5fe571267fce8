//! Update propagation.
//!
//! The dependency rules between state and views. After any mutation the
//! whole affected subgraph is recomputed and pushed to the render sink,
//! eagerly and synchronously. Nothing derived is cached between calls.
//!
//! | Mutation              | Views recomputed                                   |
//! |-----------------------|----------------------------------------------------|
//! | earth angle           | earth + every foreground panel star                |
//! | background star `id`  | that star + its panel star                         |
//! | foreground star `id`  | that star + its panel star                         |
//! | reset                 | everything                                         |

use crate::api::types::StarId;
use crate::components::orbit::position_from_angle;
use crate::core::config::SceneConfig;
use crate::core::state::SceneState;
use crate::renderer::traits::RenderSink;
use crate::systems::projector::Projector;

/// A committed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    EarthAngle,
    BackgroundStar(StarId),
    ForegroundStar(StarId),
    /// Scene initialisation: every view is stale.
    Reset,
}

/// A single derived view the render sink shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    EarthLocal,
    BackgroundLocal(StarId),
    BackgroundPanel(StarId),
    ForegroundLocal(StarId),
    ForegroundPanel(StarId),
}

/// Views that depend on `mutation`, in the order they are recomputed.
pub fn affected(mutation: Mutation, state: &SceneState) -> Vec<View> {
    match mutation {
        Mutation::EarthAngle => {
            let mut views = Vec::with_capacity(1 + state.foreground_stars().len());
            views.push(View::EarthLocal);
            views.extend(state.foreground_stars().iter().map(|s| View::ForegroundPanel(s.id)));
            views
        }
        Mutation::BackgroundStar(id) => vec![View::BackgroundLocal(id), View::BackgroundPanel(id)],
        Mutation::ForegroundStar(id) => vec![View::ForegroundLocal(id), View::ForegroundPanel(id)],
        Mutation::Reset => {
            let mut views = vec![View::EarthLocal];
            for s in state.background_stars() {
                views.push(View::BackgroundLocal(s.id));
                views.push(View::BackgroundPanel(s.id));
            }
            for s in state.foreground_stars() {
                views.push(View::ForegroundLocal(s.id));
                views.push(View::ForegroundPanel(s.id));
            }
            views
        }
    }
}

/// Recompute every view affected by `mutation` and push it to `sink`.
/// Returns the number of views delivered.
pub fn propagate(
    mutation: Mutation,
    state: &SceneState,
    config: &SceneConfig,
    sink: &mut dyn RenderSink,
) -> usize {
    let projector = Projector::from_config(config);
    let views = affected(mutation, state);
    let mut delivered = 0;
    for view in views {
        if render_view(view, state, config, &projector, sink) {
            delivered += 1;
        }
    }
    delivered
}

/// Compute one view from current state. Returns false for a view whose
/// star no longer exists (cannot happen for a well-formed scene).
fn render_view(
    view: View,
    state: &SceneState,
    config: &SceneConfig,
    projector: &Projector,
    sink: &mut dyn RenderSink,
) -> bool {
    match view {
        View::EarthLocal => {
            sink.earth(position_from_angle(state.earth_angle(), config.r_orbit));
            true
        }
        View::BackgroundLocal(id) => match state.background_star(id) {
            Some(star) => {
                sink.background_star(id, star.vertical_offset());
                true
            }
            None => false,
        },
        View::BackgroundPanel(id) => match state.background_star(id) {
            Some(star) => {
                sink.background_panel(id, projector.background(star.vertical_offset()));
                true
            }
            None => false,
        },
        View::ForegroundLocal(id) => match state.foreground_star(id) {
            Some(star) => {
                sink.foreground_star(id, star.pos(), star.color());
                true
            }
            None => false,
        },
        View::ForegroundPanel(id) => match state.foreground_star(id) {
            Some(star) => {
                let projection = projector.foreground(state.earth_angle(), star.pos());
                sink.foreground_panel(id, projection.value(), star.color());
                true
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::{SinkUpdate, UpdateLog};

    fn reference() -> (SceneConfig, SceneState) {
        let config = SceneConfig::default();
        let state = SceneState::from_config(&config);
        (config, state)
    }

    #[test]
    fn earth_angle_touches_earth_and_all_foreground_panels() {
        let (_, state) = reference();
        let views = affected(Mutation::EarthAngle, &state);
        assert_eq!(
            views,
            vec![
                View::EarthLocal,
                View::ForegroundPanel(StarId(0)),
                View::ForegroundPanel(StarId(1)),
            ]
        );
    }

    #[test]
    fn earth_angle_leaves_background_alone() {
        let (_, state) = reference();
        let views = affected(Mutation::EarthAngle, &state);
        assert!(!views.iter().any(|v| matches!(
            v,
            View::BackgroundLocal(_) | View::BackgroundPanel(_) | View::ForegroundLocal(_)
        )));
    }

    #[test]
    fn star_mutation_touches_only_that_star() {
        let (_, state) = reference();
        assert_eq!(
            affected(Mutation::BackgroundStar(StarId(2)), &state),
            vec![View::BackgroundLocal(StarId(2)), View::BackgroundPanel(StarId(2))]
        );
        assert_eq!(
            affected(Mutation::ForegroundStar(StarId(1)), &state),
            vec![View::ForegroundLocal(StarId(1)), View::ForegroundPanel(StarId(1))]
        );
    }

    #[test]
    fn reset_covers_every_view() {
        let (_, state) = reference();
        // earth + 5 × 2 background + 2 × 2 foreground
        assert_eq!(affected(Mutation::Reset, &state).len(), 15);
    }

    #[test]
    fn propagate_delivers_computed_values() {
        let (config, state) = reference();
        let mut log = UpdateLog::new();
        let n = propagate(Mutation::BackgroundStar(StarId(0)), &state, &config, &mut log);
        assert_eq!(n, 2);
        assert_eq!(
            log.drain(),
            vec![
                SinkUpdate::BackgroundStar(StarId(0), -160.0),
                SinkUpdate::BackgroundPanel(StarId(0), -480.0),
            ]
        );
    }

    #[test]
    fn propagate_projects_foreground_from_current_angle() {
        let (config, state) = reference();
        let mut log = UpdateLog::new();
        propagate(Mutation::EarthAngle, &state, &config, &mut log);
        let updates = log.drain();
        match updates[1] {
            SinkUpdate::ForegroundPanel(id, Some(x), _) => {
                assert_eq!(id, StarId(0));
                assert!((x - 6960.0 / 11.0).abs() < 1e-9);
            }
            other => panic!("unexpected update {other:?}"),
        }
    }

    #[test]
    fn missing_star_is_skipped() {
        let (config, state) = reference();
        let mut log = UpdateLog::new();
        let n = propagate(Mutation::ForegroundStar(StarId(42)), &state, &config, &mut log);
        assert_eq!(n, 0);
        assert!(log.is_empty());
    }
}
