//! Constants derived once per run from a `PlannerConfig`.

use serde::{Deserialize, Serialize};

use super::config::{AlphaMode, PlannerConfig};

/// Derived run constants.
///
/// γ, δ, η, α and the root branching factor stay fixed for the whole
/// recursion; only precision and budget are rescaled per call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerParams {
    pub gamma: f64,
    pub delta: f64,
    pub epsilon: f64,
    /// Elimination rate η = γ^(1/max(2, ln(1/ε))).
    pub eta: f64,
    /// Union-bound correction α ≥ 0.
    pub alpha: f64,
    /// Branching factor of the root state.
    pub branching: usize,
    /// Fractional per-node sampling budget (ln(1/δ) + α) / ((1−γ)² ε²).
    pub budget: f64,
    /// 1/(1−γ).
    pub horizon: f64,
}

impl PlannerParams {
    /// Derive constants. `config` must already be validated.
    #[must_use]
    pub fn derive(config: &PlannerConfig, branching: usize) -> Self {
        let gamma = config.gamma;
        let epsilon = config.epsilon;
        let eta = gamma.powf(1.0 / f64::max(2.0, (1.0 / epsilon).ln()));
        let alpha = match config.alpha {
            AlphaMode::Zero => 0.0,
            AlphaMode::Theoretical => theoretical_alpha(gamma, epsilon, eta, branching),
        };
        let budget = ((1.0 / config.delta).ln() + alpha) / ((1.0 - gamma).powi(2) * epsilon.powi(2));

        Self {
            gamma,
            delta: config.delta,
            epsilon,
            eta,
            alpha,
            branching,
            budget,
            horizon: config.horizon(),
        }
    }

    /// Integer sample budget for the root call.
    #[must_use]
    pub fn budget_samples(&self) -> usize {
        if self.budget.is_finite() {
            (self.budget.ceil() as usize).max(1)
        } else {
            usize::MAX
        }
    }

    /// Confidence radius U after `count` samples per candidate at precision `epsilon`.
    #[must_use]
    pub fn confidence_radius(&self, count: usize, epsilon: f64) -> f64 {
        let count = count as f64;
        let log_term = (self.branching as f64 * count / (self.delta * epsilon)).ln();
        let radicand = (log_term + self.gamma / (self.eta - self.gamma) + self.alpha + 1.0) / count;
        2.0 / (1.0 - self.gamma) * radicand.max(0.0).sqrt()
    }

    /// Precision handed to each candidate in a round with radius `radius`.
    #[inline]
    #[must_use]
    pub fn candidate_precision(&self, radius: f64) -> f64 {
        radius * self.eta / (1.0 - self.eta)
    }

    /// Half-width of a candidate's confidence interval.
    #[inline]
    #[must_use]
    pub fn interval_width(&self, radius: f64) -> f64 {
        2.0 * radius / (1.0 - self.eta)
    }

    /// Radius below which the elimination loop stops refining.
    #[inline]
    #[must_use]
    pub fn stopping_radius(&self, epsilon: f64) -> f64 {
        (1.0 - self.eta) * epsilon
    }

    /// Below this precision nothing needs sampling.
    #[inline]
    #[must_use]
    pub fn is_trivial(&self, epsilon: f64) -> bool {
        epsilon >= self.horizon
    }

    /// Log every derived constant.
    pub fn report(&self) {
        log::info!("{:<16}{}", "gamma", self.gamma);
        log::info!("{:<16}{}", "delta", self.delta);
        log::info!("{:<16}{}", "epsilon", self.epsilon);
        log::info!("{:<16}{}", "eta", self.eta);
        log::info!("{:<16}{}", "branching", self.branching);
        log::info!("{:<16}{}", "alpha", self.alpha);
        log::info!("{:<16}{} ({} samples)", "budget", self.budget, self.budget_samples());
    }
}

/// α from the sample-complexity bound, clamped to be non-negative.
///
/// Undefined for a single action (ln ln 1); treated as zero there.
fn theoretical_alpha(gamma: f64, epsilon: f64, eta: f64, branching: usize) -> f64 {
    if branching < 2 {
        return 0.0;
    }
    let k = branching as f64;
    let alpha = 2.0 * (epsilon * (1.0 - gamma)).ln().powi(2) * (k.ln() / (1.0 - eta)).ln()
        / (eta / gamma).ln();
    if alpha.is_finite() {
        alpha.max(0.0)
    } else {
        0.0
    }
}
