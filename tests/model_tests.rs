//! Generative-model contract tests with a user-defined model.

use std::convert::Infallible;

use trailblazer::core::{GenerativeModel, ModelRng, Transition};
use trailblazer::models::presets;
use trailblazer::planner::{PlannerConfig, TrailBlazer};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Side {
    Heads,
    Tails,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Move {
    Flip,
    Keep,
}

/// Flipping is a fair coin; keeping stays put. Heads pays 1.
struct Coin {
    rng: ModelRng,
}

impl GenerativeModel for Coin {
    type State = Side;
    type Action = Move;
    type Error = Infallible;

    fn actions(&self, _state: &Side) -> Vec<Move> {
        vec![Move::Flip, Move::Keep]
    }

    fn step(&mut self, state: Side, action: &Move) -> Result<Transition<Side>, Infallible> {
        let next = match action {
            Move::Keep => state,
            Move::Flip if self.rng.gen_bool(0.5) => Side::Heads,
            Move::Flip => Side::Tails,
        };
        let reward = if next == Side::Heads { 1.0 } else { 0.0 };
        Ok(Transition::new(reward, next))
    }
}

// =============================================================================
// Custom Model Tests
// =============================================================================

#[test]
fn test_custom_model_successors_merged() {
    let model = Coin { rng: ModelRng::new(5) };
    let mut planner = TrailBlazer::new(model, Side::Tails, PlannerConfig::new(0.1, 0.5, 1.0)).unwrap();

    let plan = planner.run().unwrap();

    let root = planner.tree().root_node();
    assert!(root.arms[0].successors().len() <= 2);
    assert_eq!(root.arms[1].successors().len(), 1);
    assert!(plan.value >= 0.0 && plan.value <= planner.params().horizon);

    let tree = planner.tree().stats();
    assert_eq!(tree.samples as u64, plan.stats.samples);
    assert!(tree.reuse_ratio() > 0.0 && tree.reuse_ratio() < 1.0);
}

#[test]
fn test_custom_model_seeded_runs_match() {
    let run = || {
        let model = Coin { rng: ModelRng::new(5) };
        let mut planner = TrailBlazer::new(model, Side::Heads, PlannerConfig::new(0.1, 0.5, 1.0)).unwrap();
        planner.run().unwrap()
    };
    let (a, b) = (run(), run());

    assert_eq!(a.value, b.value);
    assert_eq!(a.action, b.action);
    assert_eq!(a.stats.samples, b.stats.samples);
}

#[test]
fn test_planner_owns_model() {
    let model = Coin { rng: ModelRng::new(1) };
    let before = model.rng.state();
    let mut planner = TrailBlazer::new(model, Side::Tails, PlannerConfig::new(0.1, 0.5, 1.0)).unwrap();

    planner.run().unwrap();

    // Flips consumed randomness from the model's own stream
    assert_ne!(planner.model().rng.state(), before);
}

// =============================================================================
// Tabular Model Tests
// =============================================================================

#[test]
fn test_rng_checkpoint_resumes_sampling() {
    let mut mdp = presets::slippery_corridor(5, 0.5, 3);
    for _ in 0..10 {
        mdp.step(1, &1).unwrap();
    }
    let checkpoint = mdp.rng_state();
    let expected: Vec<u32> = (0..20).map(|_| mdp.step(1, &1).unwrap().next).collect();

    let mut resumed = presets::slippery_corridor(5, 0.5, 99).with_rng(ModelRng::from_state(&checkpoint));
    let actual: Vec<u32> = (0..20).map(|_| resumed.step(1, &1).unwrap().next).collect();

    assert_eq!(expected, actual);
}

#[test]
fn test_corridor_oracle_prefers_goal() {
    let mdp = presets::slippery_corridor(6, 0.3, 0);
    for state in 0..5 {
        assert_eq!(mdp.optimal_action(state, 0.8), Some(1));
    }
}
