//! Max and average node structures.
//!
//! Uses arena-based allocation with index references (NodeId). A `MaxNode`
//! is a decision state; each of its actions is an inline `AvgNode` holding
//! the sampled successors of that (state, action) pair.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A distinct successor state observed under one action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Successor {
    /// MaxNode owning the successor state.
    pub child: NodeId,

    /// Reward observed the first time this successor was drawn.
    pub reward: f64,

    /// Times this successor was drawn.
    pub count: u32,
}

/// One generative-model call, in draw order.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    slot: u32,
    reward: f64,
}

/// Expectation node for a fixed (state, action) pair.
///
/// Samples are memoized: the cache only grows, and a call with budget `m`
/// looks at the first `m` draws.
#[derive(Clone, Debug)]
pub struct AvgNode<A> {
    /// The action this node represents.
    pub action: A,

    successors: Vec<Successor>,
    samples: Vec<Sample>,
    reward_sum: f64,
}

impl<A> AvgNode<A> {
    /// Create an unsampled node.
    pub fn new(action: A) -> Self {
        Self {
            action,
            successors: Vec::new(),
            samples: Vec::new(),
            reward_sum: 0.0,
        }
    }

    /// Number of generative-model samples drawn so far.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Distinct successors, in discovery order.
    #[must_use]
    pub fn successors(&self) -> &[Successor] {
        &self.successors
    }

    /// Find the successor slot owning `child`.
    #[must_use]
    pub fn slot_of(&self, child: NodeId) -> Option<usize> {
        self.successors.iter().position(|s| s.child == child)
    }

    /// Mean one-step reward over all samples.
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.reward_sum / self.samples.len() as f64
        }
    }

    /// Register a newly discovered successor; returns its slot.
    pub fn push_successor(&mut self, child: NodeId, reward: f64) -> usize {
        self.successors.push(Successor { child, reward, count: 0 });
        self.successors.len() - 1
    }

    /// Record one draw landing in `slot`.
    pub fn record(&mut self, slot: usize, reward: f64) {
        self.successors[slot].count += 1;
        self.samples.push(Sample { slot: slot as u32, reward });
        self.reward_sum += reward;
    }

    /// Reward sum and per-successor visit counts over the first `m` draws.
    ///
    /// Visits are listed in discovery order and exclude successors the
    /// prefix never reached; their counts sum to `min(m, sample_count)`.
    #[must_use]
    pub fn visits(&self, m: usize) -> (f64, Vec<(NodeId, usize)>) {
        if m >= self.samples.len() {
            let visits = self
                .successors
                .iter()
                .map(|s| (s.child, s.count as usize))
                .collect();
            return (self.reward_sum, visits);
        }

        let mut counts = vec![0usize; self.successors.len()];
        let mut reward_sum = 0.0;
        for sample in &self.samples[..m] {
            counts[sample.slot as usize] += 1;
            reward_sum += sample.reward;
        }
        let visits = self
            .successors
            .iter()
            .zip(counts)
            .filter(|(_, c)| *c > 0)
            .map(|(s, c)| (s.child, c))
            .collect();
        (reward_sum, visits)
    }
}

/// Decision node: one `AvgNode` per legal action.
#[derive(Clone, Debug)]
pub struct MaxNode<S, A> {
    /// The state this node decides in.
    pub state: S,

    /// Distance from the root (root = 0).
    pub depth: u16,

    /// One arm per legal action, fixed at construction.
    pub arms: SmallVec<[AvgNode<A>; 4]>,

    /// Arms still in contention after the last value call.
    pub survivors: SmallVec<[usize; 4]>,

    /// Last (arm, estimate) pairs computed by the elimination loop.
    pub estimates: SmallVec<[(usize, f64); 4]>,
}

impl<S, A> MaxNode<S, A> {
    /// Create a node with one arm per action.
    pub fn new(state: S, actions: Vec<A>, depth: u16) -> Self {
        let arms: SmallVec<[AvgNode<A>; 4]> = actions.into_iter().map(AvgNode::new).collect();
        let survivors = (0..arms.len()).collect();
        Self {
            state,
            depth,
            arms,
            survivors,
            estimates: SmallVec::new(),
        }
    }

    /// Branching factor K.
    #[inline]
    #[must_use]
    pub fn branching(&self) -> usize {
        self.arms.len()
    }

    /// Index of the recommended arm.
    ///
    /// The sole survivor if elimination finished; otherwise the surviving
    /// arm with the best last estimate, earliest arm on ties.
    #[must_use]
    pub fn best_arm(&self) -> Option<usize> {
        if self.survivors.len() == 1 {
            return Some(self.survivors[0]);
        }
        let mut best: Option<(usize, f64)> = None;
        for &(arm, mu) in &self.estimates {
            if !self.survivors.contains(&arm) {
                continue;
            }
            match best {
                Some((_, top)) if mu <= top => {}
                _ => best = Some((arm, mu)),
            }
        }
        best.map(|(arm, _)| arm).or_else(|| self.survivors.first().copied())
    }

    /// Last estimate for `arm`, if it was evaluated.
    #[must_use]
    pub fn estimate_of(&self, arm: usize) -> Option<f64> {
        self.estimates.iter().find(|(a, _)| *a == arm).map(|(_, mu)| *mu)
    }
}
