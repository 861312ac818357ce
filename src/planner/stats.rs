//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected while planning.
///
/// Cumulative over every refinement of one planner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generative-model calls.
    pub samples: u64,

    /// Max nodes allocated, root included.
    pub max_nodes: u64,

    /// Avg nodes (arms) allocated.
    pub avg_nodes: u64,

    /// Elimination rounds across all max nodes.
    pub rounds: u64,

    /// Candidates dropped by elimination.
    pub eliminated: u64,

    /// Calls answered with 0 because the precision exceeded the horizon.
    pub cutoffs: u64,

    /// Deepest max node evaluated.
    pub max_depth: u16,

    /// Total time spent planning (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count a freshly allocated max node with `arms` actions.
    pub fn record_node(&mut self, arms: usize, depth: u16) {
        self.max_nodes += 1;
        self.avg_nodes += arms as u64;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Generative-model samples per second.
    #[must_use]
    pub fn samples_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.samples as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average elimination rounds per max node.
    #[must_use]
    pub fn rounds_per_node(&self) -> f64 {
        if self.max_nodes == 0 {
            0.0
        } else {
            self.rounds as f64 / self.max_nodes as f64
        }
    }
}
