use glam::DVec2;

use crate::api::types::{StarField, StarId};
use crate::components::orbit::OrbitalState;
use crate::components::star::{BackgroundStar, ForegroundStar};
use crate::core::config::SceneConfig;
use crate::error::{SceneError, SceneResult};

/// All mutable scene state: earth's angle and both star fields.
///
/// Entities are created once from the config's seed layout and persist for
/// the session. Only positions and the angle change afterwards, and only
/// through the crate-private setters used by the scene controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    orbit: OrbitalState,
    background: Vec<BackgroundStar>,
    foreground: Vec<ForegroundStar>,
}

impl SceneState {
    /// Build the initial state from the seed layout.
    pub fn from_config(config: &SceneConfig) -> Self {
        let background = config
            .background_stars
            .iter()
            .enumerate()
            .map(|(i, &y)| BackgroundStar::new(StarId(i as u32), y))
            .collect();
        let foreground = config
            .foreground_stars
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                ForegroundStar::new(StarId(i as u32), DVec2::new(seed.x, seed.y), seed.color)
            })
            .collect();

        Self {
            orbit: OrbitalState::new(config.initial_angle),
            background,
            foreground,
        }
    }

    pub fn orbit(&self) -> &OrbitalState {
        &self.orbit
    }

    pub fn earth_angle(&self) -> f64 {
        self.orbit.angle()
    }

    pub fn background_stars(&self) -> &[BackgroundStar] {
        &self.background
    }

    pub fn foreground_stars(&self) -> &[ForegroundStar] {
        &self.foreground
    }

    pub fn background_star(&self, id: StarId) -> Option<&BackgroundStar> {
        self.background.iter().find(|s| s.id == id)
    }

    pub fn foreground_star(&self, id: StarId) -> Option<&ForegroundStar> {
        self.foreground.iter().find(|s| s.id == id)
    }

    // -- Mutation (crate-private: the scene controller propagates after each) --

    pub(crate) fn set_earth_angle(&mut self, angle: f64) {
        self.orbit.set_angle(angle);
    }

    pub(crate) fn background_star_mut(&mut self, id: StarId) -> SceneResult<&mut BackgroundStar> {
        self.background
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SceneError::UnknownStar { field: StarField::Background, id })
    }

    pub(crate) fn foreground_star_mut(&mut self, id: StarId) -> SceneResult<&mut ForegroundStar> {
        self.foreground
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SceneError::UnknownStar { field: StarField::Foreground, id })
    }
}
