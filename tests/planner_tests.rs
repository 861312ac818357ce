//! Planner integration tests on the reference MDPs.

use proptest::prelude::*;

use trailblazer::models::{presets, TabularError, TabularMdp};
use trailblazer::planner::{plan, AlphaMode, PlannerConfig, TrailBlazer};
use trailblazer::{ConfigError, PlanError};

fn planner(mdp: TabularMdp, gamma: f64, delta: f64, epsilon: f64) -> TrailBlazer<TabularMdp> {
    TrailBlazer::new(mdp, 0, PlannerConfig::new(gamma, delta, epsilon)).unwrap()
}

// =============================================================================
// Accuracy Tests
// =============================================================================

#[test]
fn test_self_loop_value() {
    let plan = plan(presets::self_loop(0.4), 0, 0.5, 0.5, 0.2).unwrap();

    assert!((plan.value - 0.8).abs() <= 0.2, "value {}", plan.value);
    assert_eq!(plan.action, 0);
    assert_eq!(plan.survivors, vec![0]);
}

#[test]
fn test_self_loop_long_horizon() {
    let plan = plan(presets::self_loop(1.0), 0, 0.9, 0.5, 0.1).unwrap();

    assert!((plan.value - 10.0).abs() <= 0.1, "value {}", plan.value);
    assert!(plan.stats.max_depth > 1);
}

#[test]
fn test_two_arms_keeps_rewarding_arm() {
    let plan = plan(presets::bandit(&[1.0, 0.0]), 0, 0.1, 0.5, 0.2).unwrap();

    let exact = 1.0 / 0.9;
    assert!((plan.value - exact).abs() <= 0.2, "value {}", plan.value);
    assert_eq!(plan.survivors, vec![0]);
    assert_eq!(plan.action, 0);
    assert!(plan.stats.eliminated >= 1);
}

#[test]
fn test_three_arms_single_survivor() {
    let plan = plan(presets::bandit(&[1.0, 0.0, 0.0]), 0, 0.1, 0.9, 0.3).unwrap();

    assert_eq!(plan.survivors, vec![0]);
    assert_eq!(plan.action, 0);
    assert_eq!(plan.estimates.len(), 1);
    assert!((plan.value - 1.0 / 0.9).abs() <= 0.3);
}

#[test]
fn test_chain_prefers_rewarding_move() {
    let mdp = presets::chain();
    let exact = mdp.optimal_value(0, 0.1);

    let plan = plan(mdp, 0, 0.1, 0.9, 0.2).unwrap();

    assert!(plan.value > 0.0);
    assert!((plan.value - exact).abs() <= 0.2, "value {} exact {}", plan.value, exact);
    assert_eq!(plan.survivors, vec![1]);
    assert_eq!(plan.action, 1);
}

#[test]
fn test_coarse_precision_recommends_best_estimate() {
    // Both arms survive; the recommendation falls back to the best estimate
    let plan = plan(presets::chain(), 0, 0.1, 0.5, 0.5).unwrap();

    assert!(plan.survivors.len() > 1);
    assert_eq!(plan.action, 1);
    let best = plan.estimates.iter().map(|&(_, mu)| mu).fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(plan.value, best);
}

#[test]
fn test_slippery_corridor_within_precision() {
    let mdp = presets::slippery_corridor(2, 0.1, 7);
    let exact = mdp.optimal_value(0, 0.1);

    let plan = plan(mdp, 0, 0.1, 0.5, 1.0).unwrap();

    assert!((plan.value - exact).abs() <= 1.0);
    assert!(plan.stats.samples > 0);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_deterministic_model_gives_identical_plans() {
    let a = plan(presets::bandit(&[1.0, 0.0]), 0, 0.1, 0.5, 1.0).unwrap();
    let b = plan(presets::bandit(&[1.0, 0.0]), 0, 0.1, 0.5, 1.0).unwrap();

    assert_eq!(a.value, b.value);
    assert_eq!(a.survivors, b.survivors);
    assert_eq!(a.estimates, b.estimates);
    assert_eq!(a.stats.samples, b.stats.samples);
    assert_eq!(a.stats.rounds, b.stats.rounds);
}

#[test]
fn test_seeded_model_gives_identical_plans() {
    let run = |seed| plan(presets::slippery_corridor(3, 0.2, seed), 0, 0.1, 0.5, 1.0).unwrap();
    let a = run(11);
    let b = run(11);

    assert_eq!(a.value, b.value);
    assert_eq!(a.estimates, b.estimates);
    assert_eq!(a.stats.samples, b.stats.samples);
}

// =============================================================================
// Refinement Tests
// =============================================================================

#[test]
fn test_refine_same_budget_draws_nothing() {
    let mut planner = planner(presets::self_loop(1.0), 0.5, 0.5, 0.5);
    let first = planner.run().unwrap();
    let budget = planner.params().budget_samples();

    let second = planner.refine(budget, 0.25).unwrap();

    assert_eq!(first.value, second.value);
    assert_eq!(first.stats.samples, second.stats.samples);
}

#[test]
fn test_refine_larger_budget_reuses_tree() {
    let mut planner = planner(presets::self_loop(1.0), 0.5, 0.5, 0.5);
    let first = planner.run().unwrap();
    let nodes = planner.tree().len();
    let budget = planner.params().budget_samples();

    let second = planner.refine(budget * 4, 0.25).unwrap();

    assert!(second.stats.samples > first.stats.samples);
    assert!(planner.tree().len() >= nodes);
    assert_eq!(planner.tree().root_node().arms[0].sample_count(), budget * 4);
    assert!((second.value - 2.0).abs() <= 0.5);
}

#[test]
fn test_refine_tighter_precision() {
    let mut planner = planner(presets::self_loop(1.0), 0.5, 0.5, 0.5);
    let coarse = planner.run().unwrap();

    let fine = planner.refine(planner.params().budget_samples(), 0.05).unwrap();

    assert!(fine.stats.max_depth >= coarse.stats.max_depth);
    assert!((fine.value - 2.0).abs() <= (coarse.value - 2.0).abs() + 1e-12);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_invalid_config_rejected() {
    let err = TrailBlazer::new(presets::chain(), 0, PlannerConfig::new(0.9, 1.5, 0.1)).err().unwrap();
    assert!(matches!(err, PlanError::Config(ConfigError::Delta(_))));

    let err = TrailBlazer::new(presets::chain(), 0, PlannerConfig::new(0.9, 0.5, -1.0)).err().unwrap();
    assert!(matches!(err, PlanError::Config(ConfigError::Epsilon(_))));
}

#[test]
fn test_unknown_transition_propagates() {
    let mdp = TabularMdp::builder().action(0, 3).build();
    let err = plan(mdp, 0, 0.5, 0.5, 0.2).err().unwrap();

    assert!(err.is_model());
    match err {
        PlanError::Model(TabularError::UnknownTransition { state, action }) => {
            assert_eq!((state, action), (0, 3));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_actionless_states_rejected() {
    let mdp = TabularMdp::builder().transition(0, 0, 1, 0.5).build();

    let err = TrailBlazer::new(mdp.clone(), 1, PlannerConfig::new(0.5, 0.5, 0.2)).err().unwrap();
    assert!(matches!(err, PlanError::NoActions { depth: 0 }));

    let err = plan(mdp, 0, 0.5, 0.5, 0.2).err().unwrap();
    assert!(matches!(err, PlanError::NoActions { depth: 1 }));
    assert!(err.to_string().contains("depth 1"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_json_round_trip() {
    let config = PlannerConfig::new(0.1, 0.5, 0.2).with_alpha(AlphaMode::Theoretical);

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"theoretical\""));
    let back: PlannerConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config, back);
}

#[test]
fn test_config_json_alpha_defaults_to_zero() {
    let config: PlannerConfig = serde_json::from_str(r#"{"gamma":0.5,"delta":0.5,"epsilon":0.5}"#).unwrap();
    assert_eq!(config.alpha, AlphaMode::Zero);
}

#[test]
fn test_theoretical_alpha_grows_budget() {
    let zero = planner(presets::chain(), 0.5, 0.5, 0.5);
    let config = PlannerConfig::new(0.5, 0.5, 0.5).with_alpha(AlphaMode::Theoretical);
    let theory = TrailBlazer::new(presets::chain(), 0, config).unwrap();

    assert_eq!(zero.params().alpha, 0.0);
    assert!(theory.params().alpha >= 0.0);
    assert!(theory.params().budget >= zero.params().budget);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_self_loop_within_precision(
        gamma in 0.1f64..0.8,
        delta in 0.05f64..0.95,
        epsilon in 0.1f64..3.0,
        reward in 0.0f64..1.0,
    ) {
        let plan = plan(presets::self_loop(reward), 0, gamma, delta, epsilon).unwrap();
        let exact = reward / (1.0 - gamma);

        prop_assert!((plan.value - exact).abs() <= epsilon, "value {} exact {}", plan.value, exact);
        prop_assert_eq!(plan.action, 0);
    }
}
