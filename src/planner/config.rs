//! Planner configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// How the union-bound correction term α is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    /// Pin α to zero. Smaller budgets; the default.
    #[default]
    Zero,
    /// Use the correction from the sample-complexity bound.
    Theoretical,
}

/// User-facing precision and confidence targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Discount factor γ, in (0, 1).
    /// Sets the effective horizon 1/(1−γ).
    pub gamma: f64,

    /// Failure probability δ, in (0, 1).
    /// The returned value is ε-accurate with probability at least 1−δ.
    pub delta: f64,

    /// Target absolute precision ε (> 0).
    pub epsilon: f64,

    /// Correction term policy.
    #[serde(default)]
    pub alpha: AlphaMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            delta: 0.9,
            epsilon: 0.1,
            alpha: AlphaMode::Zero,
        }
    }
}

impl PlannerConfig {
    /// Create a config from the three targets.
    pub fn new(gamma: f64, delta: f64, epsilon: f64) -> Self {
        Self {
            gamma,
            delta,
            epsilon,
            alpha: AlphaMode::Zero,
        }
    }

    /// Set the discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the failure probability.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Set the target precision.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the α policy.
    pub fn with_alpha(mut self, alpha: AlphaMode) -> Self {
        self.alpha = alpha;
        self
    }

    /// Check every parameter against its admissible range.
    ///
    /// NaN fails every range check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(ConfigError::Gamma(self.gamma));
        }
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(ConfigError::Delta(self.delta));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        Ok(())
    }

    /// Effective planning horizon 1/(1−γ).
    ///
    /// This is also the range of discounted returns for rewards in [0, 1].
    #[must_use]
    pub fn horizon(&self) -> f64 {
        1.0 / (1.0 - self.gamma)
    }
}
