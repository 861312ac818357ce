//! Core TrailBlazer search.
//!
//! A max node runs a sequential elimination over its arms: every round each
//! surviving arm is re-estimated with one more sample at a tighter
//! precision, and arms whose confidence interval falls below the best one
//! are dropped. An avg node draws (memoized) samples from the generative
//! model and backs up the visit-weighted values of its successors.

use std::time::Instant;

use smallvec::SmallVec;

use crate::core::{GenerativeModel, PlanError, Transition};

use super::config::PlannerConfig;
use super::node::{MaxNode, NodeId};
use super::params::PlannerParams;
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Outcome of a planning call.
#[derive(Clone, Debug)]
pub struct Plan<A> {
    /// Estimated optimal value of the root state.
    pub value: f64,

    /// Recommended root action.
    pub action: A,

    /// Root actions still in contention.
    pub survivors: Vec<A>,

    /// Last root estimates, per evaluated action.
    pub estimates: Vec<(A, f64)>,

    /// Constants the run was derived with.
    pub params: PlannerParams,

    /// Cumulative counters.
    pub stats: SearchStats,
}

/// Planner driving one search tree.
///
/// Owns the generative model and the tree. The tree is retained between
/// calls, so `refine` with a larger budget reuses every earlier sample.
pub struct TrailBlazer<M: GenerativeModel> {
    /// The generative model.
    model: M,

    /// User-facing targets.
    config: PlannerConfig,

    /// Derived run constants.
    params: PlannerParams,

    /// The search tree.
    tree: SearchTree<M::State, M::Action>,

    /// Search statistics.
    stats: SearchStats,
}

impl<M: GenerativeModel> TrailBlazer<M> {
    /// Validate `config`, derive the run constants and build the root node.
    pub fn new(model: M, root: M::State, config: PlannerConfig) -> Result<Self, PlanError<M::Error>> {
        config.validate()?;

        let actions = model.actions(&root);
        if actions.is_empty() {
            return Err(PlanError::NoActions { depth: 0 });
        }

        let params = PlannerParams::derive(&config, actions.len());
        params.report();

        let mut stats = SearchStats::new();
        stats.record_node(actions.len(), 0);

        Ok(Self {
            model,
            config,
            params,
            tree: SearchTree::new(MaxNode::new(root, actions, 0)),
            stats,
        })
    }

    /// Estimate the root value with the derived budget at precision ε/2.
    pub fn run(&mut self) -> Result<Plan<M::Action>, PlanError<M::Error>> {
        let budget = self.params.budget_samples();
        self.refine(budget, self.config.epsilon / 2.0)
    }

    /// Re-estimate the root value with an explicit budget and precision.
    ///
    /// Samples already in the tree are reused; only the shortfall is drawn.
    pub fn refine(&mut self, budget: usize, epsilon: f64) -> Result<Plan<M::Action>, PlanError<M::Error>> {
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(crate::core::ConfigError::Epsilon(epsilon).into());
        }

        let start = Instant::now();
        let samples_before = self.stats.samples;
        let root = self.tree.root();
        let value = self.max_value(root, budget.max(1), epsilon);
        self.stats.time_us += start.elapsed().as_micros() as u64;
        let value = value?;

        log::debug!(
            "refine budget={} epsilon={:.4} drew {} samples, tree holds {} nodes",
            budget,
            epsilon,
            self.stats.samples - samples_before,
            self.tree.len(),
        );

        let plan = self.plan(value);
        log::info!("{:<16}{:.6} via {:?}", "root value", plan.value, plan.action);
        Ok(plan)
    }

    /// Value of a max node to precision `epsilon` using at most `m` samples per arm.
    fn max_value(&mut self, id: NodeId, m: usize, epsilon: f64) -> Result<f64, PlanError<M::Error>> {
        if self.params.is_trivial(epsilon) {
            self.stats.cutoffs += 1;
            return Ok(0.0);
        }

        let node = self.tree.get(id);
        self.stats.max_depth = self.stats.max_depth.max(node.depth);

        let mut candidates: SmallVec<[usize; 4]> = (0..node.branching()).collect();
        let mut estimates: SmallVec<[(usize, f64); 4]> = SmallVec::new();
        let mut count = 1;
        let mut radius = f64::INFINITY;

        while candidates.len() > 1 && radius >= self.params.stopping_radius(epsilon) {
            radius = self.params.confidence_radius(count, epsilon);
            let precision = self.params.candidate_precision(radius);

            estimates.clear();
            for &arm in &candidates {
                let mu = self.avg_estimate(id, arm, count, precision)?;
                estimates.push((arm, mu));
            }

            let best = max_estimate(&estimates);
            let width = self.params.interval_width(radius);
            let before = candidates.len();
            candidates.clear();
            candidates.extend(
                estimates
                    .iter()
                    .filter(|&&(_, mu)| !(mu + width < best - width))
                    .map(|&(arm, _)| arm),
            );

            self.stats.rounds += 1;
            self.stats.eliminated += (before - candidates.len()) as u64;
            if candidates.len() < before {
                log::trace!(
                    "{} round {} radius {:.4}: {} of {} arms survive",
                    id,
                    count,
                    radius,
                    candidates.len(),
                    before,
                );
            }
            count += 1;
        }

        let value = if candidates.len() > 1 {
            max_estimate(&estimates)
        } else {
            let arm = candidates[0];
            let mu = self.avg_estimate(id, arm, m, self.params.eta * epsilon)?;
            estimates.clear();
            estimates.push((arm, mu));
            mu
        };

        let node = self.tree.get_mut(id);
        node.survivors = candidates;
        node.estimates = estimates;
        Ok(value)
    }

    /// Discounted return of one arm from `m` samples, children at precision `epsilon/γ`.
    fn avg_estimate(&mut self, id: NodeId, arm: usize, m: usize, epsilon: f64) -> Result<f64, PlanError<M::Error>> {
        if self.params.is_trivial(epsilon) {
            self.stats.cutoffs += 1;
            return Ok(0.0);
        }
        debug_assert!(m > 0, "avg node evaluated with an empty budget");

        self.sample(id, arm, m)?;

        let gamma = self.params.gamma;
        let total = m as f64;
        let (reward_sum, visits) = self.tree.get(id).arms[arm].visits(m);

        let mut future = 0.0;
        for (child, count) in visits {
            future += count as f64 / total * self.max_value(child, count, epsilon / gamma)?;
        }
        Ok(reward_sum / total + gamma * future)
    }

    /// Draw samples for one arm until it holds at least `m`.
    fn sample(&mut self, id: NodeId, arm: usize, m: usize) -> Result<(), PlanError<M::Error>> {
        while self.tree.get(id).arms[arm].sample_count() < m {
            let node = self.tree.get(id);
            let state = node.state.clone();
            let action = node.arms[arm].action.clone();
            let depth = node.depth.saturating_add(1);

            let Transition { reward, next } = self.model.step(state, &action).map_err(PlanError::Model)?;
            self.stats.samples += 1;

            let tree = &self.tree;
            let known = tree.get(id).arms[arm]
                .successors()
                .iter()
                .position(|s| tree.get(s.child).state == next);

            let slot = match known {
                Some(slot) => slot,
                None => {
                    let actions = self.model.actions(&next);
                    if actions.is_empty() {
                        return Err(PlanError::NoActions { depth });
                    }
                    self.stats.record_node(actions.len(), depth);
                    let child = self.tree.alloc(MaxNode::new(next, actions, depth));
                    log::trace!("{} arm {} discovered {} at depth {}", id, arm, child, depth);
                    self.tree.get_mut(id).arms[arm].push_successor(child, reward)
                }
            };
            self.tree.get_mut(id).arms[arm].record(slot, reward);
        }
        Ok(())
    }

    /// Summarize the root after a value call.
    fn plan(&self, value: f64) -> Plan<M::Action> {
        let root = self.tree.root_node();
        let action_of = |arm: usize| root.arms[arm].action.clone();

        Plan {
            value,
            action: action_of(root.best_arm().unwrap_or(0)),
            survivors: root.survivors.iter().map(|&arm| action_of(arm)).collect(),
            estimates: root.estimates.iter().map(|&(arm, mu)| (action_of(arm), mu)).collect(),
            params: self.params.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<M::State, M::Action> {
        &self.tree
    }

    /// Get the derived constants.
    #[must_use]
    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Get the model reference.
    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Plan from `root` with targets γ, δ, ε and the default α policy.
pub fn plan<M: GenerativeModel>(
    model: M,
    root: M::State,
    gamma: f64,
    delta: f64,
    epsilon: f64,
) -> Result<Plan<M::Action>, PlanError<M::Error>> {
    TrailBlazer::new(model, root, PlannerConfig::new(gamma, delta, epsilon))?.run()
}

fn max_estimate(estimates: &[(usize, f64)]) -> f64 {
    estimates.iter().map(|&(_, mu)| mu).fold(f64::NEG_INFINITY, f64::max)
}
