//! Planner error types.

use thiserror::Error;

/// Rejected planner configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("discount factor must lie in (0, 1), got {0}")]
    Gamma(f64),
    #[error("failure probability must lie in (0, 1), got {0}")]
    Delta(f64),
    #[error("precision must be positive and finite, got {0}")]
    Epsilon(f64),
}

/// Planning failure, generic over the model's error type.
#[derive(Debug, Error)]
pub enum PlanError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("generative model reported no legal actions at depth {depth}")]
    NoActions { depth: u16 },

    #[error(transparent)]
    Model(E),
}

impl<E: std::error::Error + 'static> PlanError<E> {
    /// Is this a failure raised by the model itself?
    #[must_use]
    pub fn is_model(&self) -> bool {
        matches!(self, PlanError::Model(_))
    }
}
