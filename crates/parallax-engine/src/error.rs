use thiserror::Error;

use crate::api::types::{StarField, StarId};

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors surfaced by scene construction and star mutation.
///
/// Numeric edge cases (degenerate projections, pointer at the orbit centre)
/// are not errors: they have explicit policies in the modules that own them.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown {field} star {id}")]
    UnknownStar { field: StarField, id: StarId },

    #[error("invalid scene config: {0}")]
    InvalidConfig(String),

    #[error("scene config parse error")]
    ConfigParse(#[from] serde_json::Error),
}
