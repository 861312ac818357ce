//! Small ready-made MDPs.

use super::tabular::{StateId, TabularMdp};

/// One state, one action, reward `reward` forever.
pub fn self_loop(reward: f64) -> TabularMdp {
    TabularMdp::builder().transition(0, 0, 0, reward).build()
}

/// One state; action `i` pays `rewards[i]` and stays.
pub fn bandit(rewards: &[f64]) -> TabularMdp {
    rewards
        .iter()
        .enumerate()
        .fold(TabularMdp::builder(), |b, (i, &r)| b.transition(0, i as u32, 0, r))
        .build()
}

/// Four-state chain rooted at state 0.
///
/// From state 0, action 0 stays (reward 0), action 1 moves to state 2
/// (reward 1) and action 2 moves to state 3 (reward 0). States 1–3 are
/// absorbing under every action with reward 0.
pub fn chain() -> TabularMdp {
    let mut builder = TabularMdp::builder()
        .transition(0, 0, 0, 0.0)
        .transition(0, 1, 2, 1.0)
        .transition(0, 2, 3, 0.0);
    for state in 1..=3 {
        for action in 0..3 {
            builder = builder.transition(state, action, state, 0.0);
        }
    }
    builder.build()
}

/// Corridor of `length` cells with the goal at the right end.
///
/// Action 0 moves left, action 1 moves right; either move fails with
/// probability `slip`, leaving the agent in place. Every transition that
/// lands on the goal pays 1, and the goal is absorbing.
pub fn slippery_corridor(length: u32, slip: f64, seed: u64) -> TabularMdp {
    let goal: StateId = length.saturating_sub(1);
    let mut builder = TabularMdp::builder().seed(seed);

    for cell in 0..goal {
        let left = cell.saturating_sub(1);
        let right = cell + 1;
        let pay = |next: StateId| if next == goal { 1.0 } else { 0.0 };

        builder = builder
            .outcome(cell, 0, 1.0 - slip, left, pay(left))
            .outcome(cell, 0, slip, cell, 0.0)
            .outcome(cell, 1, 1.0 - slip, right, pay(right))
            .outcome(cell, 1, slip, cell, 0.0);
    }
    builder
        .transition(goal, 0, goal, 1.0)
        .transition(goal, 1, goal, 1.0)
        .build()
}
