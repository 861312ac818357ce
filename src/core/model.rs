//! Generative-model trait for MDP implementations.
//!
//! The planner never sees transition probabilities or a reward function.
//! Everything it knows about the MDP comes through this trait:
//! - Which actions are legal in a state
//! - What happens when an action is taken (one sampled transition)
//! - Whether two states are the same (via `PartialEq`)

use std::fmt::Debug;

/// One sampled transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    /// One-step reward, expected to lie in `[0, 1]`.
    pub reward: f64,
    /// Successor state.
    pub next: S,
}

impl<S> Transition<S> {
    pub fn new(reward: f64, next: S) -> Self {
        Self { reward, next }
    }
}

/// Generative model of an MDP.
///
/// ## Implementation Notes
///
/// - `actions`: must be non-empty for every reachable state; the planner
///   reports an empty list as a contract violation
/// - `step`: receives an owned copy of the state and returns the successor;
///   the planner clones its stored state before each call
/// - `State: PartialEq` is only used to merge repeated successors of the
///   same (state, action) pair; no ordering or hashing is required
/// - Errors from `step` are passed through to the caller untouched
pub trait GenerativeModel {
    type State: Clone + PartialEq;
    type Action: Clone + PartialEq + Debug;
    type Error: std::error::Error + 'static;

    /// Legal actions in `state`, in a stable order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Sample one transition from `state` under `action`.
    fn step(
        &mut self,
        state: Self::State,
        action: &Self::Action,
    ) -> Result<Transition<Self::State>, Self::Error>;
}
