//! Engine-level error type.

use onslaught_ecs::EcsError;

use crate::config::ConfigError;

/// Errors surfaced by [`Game`](crate::game::Game) and the engine helpers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}
