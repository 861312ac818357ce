//! Finite MDP given by an explicit transition table.
//!
//! Useful as a reference model: it can be sampled like any generative
//! model, and it can also be solved exactly by value iteration, which gives
//! the planner's tests an oracle.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::{GenerativeModel, ModelRng, RngState, Transition};

/// State index.
pub type StateId = u32;

/// Action index.
pub type ActionId = u32;

/// One possible result of taking an action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// Relative weight; weights of one (state, action) pair need not sum to 1.
    pub probability: f64,
    pub reward: f64,
    pub next: StateId,
}

/// Sampling failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TabularError {
    #[error("no transition defined for action {action} in state {state}")]
    UnknownTransition { state: StateId, action: ActionId },
}

/// Table-driven MDP with seeded sampling.
#[derive(Clone, Debug)]
pub struct TabularMdp {
    /// Legal actions per state, ascending.
    actions: FxHashMap<StateId, Vec<ActionId>>,

    /// Outcomes per (state, action).
    outcomes: FxHashMap<(StateId, ActionId), Vec<Outcome>>,

    /// Stream used for stochastic outcomes.
    rng: ModelRng,
}

impl TabularMdp {
    /// Start building a table.
    pub fn builder() -> TabularMdpBuilder {
        TabularMdpBuilder::new()
    }

    /// Every state that has actions or appears as a successor, ascending.
    #[must_use]
    pub fn states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = self
            .actions
            .keys()
            .copied()
            .chain(self.outcomes.values().flatten().map(|o| o.next))
            .collect();
        states.sort_unstable();
        states.dedup();
        states
    }

    /// Outcomes of `action` in `state` (empty if undefined).
    #[must_use]
    pub fn outcomes(&self, state: StateId, action: ActionId) -> &[Outcome] {
        self.outcomes
            .get(&(state, action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current position of the sampling stream.
    #[must_use]
    pub fn rng_state(&self) -> RngState {
        self.rng.state()
    }

    /// Replace the sampling stream.
    pub fn with_rng(mut self, rng: ModelRng) -> Self {
        self.rng = rng;
        self
    }

    /// Copy of the table with an independent, deterministic sampling stream.
    pub fn fork(&mut self) -> Self {
        Self {
            actions: self.actions.clone(),
            outcomes: self.outcomes.clone(),
            rng: self.rng.fork(),
        }
    }

    /// Expected one-step backup of `action` in `state` under `values`.
    ///
    /// States without actions are worth 0.
    #[must_use]
    pub fn q_value(&self, values: &FxHashMap<StateId, f64>, state: StateId, action: ActionId, gamma: f64) -> f64 {
        let outcomes = self.outcomes(state, action);
        let total: f64 = outcomes.iter().map(|o| o.probability).sum();
        if total <= 0.0 {
            return 0.0;
        }
        outcomes
            .iter()
            .map(|o| {
                let future = values.get(&o.next).copied().unwrap_or(0.0);
                o.probability / total * (o.reward + gamma * future)
            })
            .sum()
    }

    /// Optimal state values by value iteration, to within `tolerance`.
    #[must_use]
    pub fn optimal_values(&self, gamma: f64, tolerance: f64) -> FxHashMap<StateId, f64> {
        let states = self.states();
        let mut values: FxHashMap<StateId, f64> = states.iter().map(|&s| (s, 0.0)).collect();

        // Contraction by γ per sweep; the cap only matters for γ ≈ 1.
        for _ in 0..100_000 {
            let mut next = FxHashMap::default();
            let mut change: f64 = 0.0;
            for &s in &states {
                let v = self
                    .actions(&s)
                    .iter()
                    .map(|&a| self.q_value(&values, s, a, gamma))
                    .fold(None, |best: Option<f64>, q| Some(best.map_or(q, |b| b.max(q))))
                    .unwrap_or(0.0);
                change = change.max((v - values[&s]).abs());
                next.insert(s, v);
            }
            values = next;
            if change * gamma / (1.0 - gamma) < tolerance {
                break;
            }
        }
        values
    }

    /// Optimal value of one state.
    #[must_use]
    pub fn optimal_value(&self, state: StateId, gamma: f64) -> f64 {
        self.optimal_values(gamma, 1e-10).get(&state).copied().unwrap_or(0.0)
    }

    /// Greedy action under the optimal values; earliest action on ties.
    #[must_use]
    pub fn optimal_action(&self, state: StateId, gamma: f64) -> Option<ActionId> {
        let values = self.optimal_values(gamma, 1e-10);
        let mut best: Option<(ActionId, f64)> = None;
        for &a in &self.actions(&state) {
            let q = self.q_value(&values, state, a, gamma);
            match best {
                Some((_, top)) if q <= top + 1e-12 => {}
                _ => best = Some((a, q)),
            }
        }
        best.map(|(a, _)| a)
    }
}

impl GenerativeModel for TabularMdp {
    type State = StateId;
    type Action = ActionId;
    type Error = TabularError;

    fn actions(&self, state: &StateId) -> Vec<ActionId> {
        self.actions.get(state).cloned().unwrap_or_default()
    }

    fn step(&mut self, state: StateId, action: &ActionId) -> Result<Transition<StateId>, TabularError> {
        let unknown = TabularError::UnknownTransition { state, action: *action };
        let outcomes = self.outcomes.get(&(state, *action)).ok_or(unknown.clone())?;

        let outcome = match outcomes.as_slice() {
            [only] => *only,
            _ => {
                let weights: Vec<f64> = outcomes.iter().map(|o| o.probability).collect();
                let i = self.rng.choose_weighted(&weights).ok_or(unknown)?;
                outcomes[i]
            }
        };
        Ok(Transition::new(outcome.reward, outcome.next))
    }
}

/// Builder for `TabularMdp`.
#[derive(Clone, Debug, Default)]
pub struct TabularMdpBuilder {
    actions: FxHashMap<StateId, Vec<ActionId>>,
    outcomes: FxHashMap<(StateId, ActionId), Vec<Outcome>>,
    seed: u64,
}

impl TabularMdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `action` legal in `state` without giving it outcomes.
    pub fn action(mut self, state: StateId, action: ActionId) -> Self {
        let actions = self.actions.entry(state).or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
        self
    }

    /// Add a deterministic transition.
    pub fn transition(self, state: StateId, action: ActionId, next: StateId, reward: f64) -> Self {
        self.outcome(state, action, 1.0, next, reward)
    }

    /// Add one weighted outcome.
    pub fn outcome(mut self, state: StateId, action: ActionId, probability: f64, next: StateId, reward: f64) -> Self {
        self.outcomes.entry((state, action)).or_default().push(Outcome {
            probability,
            reward,
            next,
        });
        self.action(state, action)
    }

    /// Seed for stochastic outcomes.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(mut self) -> TabularMdp {
        for actions in self.actions.values_mut() {
            actions.sort_unstable();
        }
        TabularMdp {
            actions: self.actions,
            outcomes: self.outcomes,
            rng: ModelRng::new(self.seed),
        }
    }
}
