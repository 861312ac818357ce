//! TrailBlazer planning for MDPs behind a generative model.
//!
//! ## Overview
//!
//! The planner estimates the optimal value of a root state to precision ε
//! with probability at least 1−δ, using only sampled transitions:
//!
//! - **Max nodes** eliminate actions whose confidence interval drops below
//!   the best one, so dominated actions are never refined to full precision
//! - **Avg nodes** memoize samples and merge repeated successor states, so
//!   recurring states share one subtree per (state, action) pair
//! - **Incremental**: the tree is kept, and a larger budget only draws the
//!   missing samples
//!
//! ## Usage
//!
//! ```rust
//! use trailblazer::models::presets;
//! use trailblazer::planner::{PlannerConfig, TrailBlazer};
//!
//! let config = PlannerConfig::new(0.5, 0.5, 0.5);
//! let mut planner = TrailBlazer::new(presets::self_loop(1.0), 0, config).unwrap();
//! let plan = planner.run().unwrap();
//!
//! // A reward of 1 forever is worth 1/(1−γ) = 2
//! assert!((plan.value - 2.0).abs() <= 0.5);
//! ```

pub mod config;
pub mod node;
pub mod params;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{AlphaMode, PlannerConfig};
pub use node::{AvgNode, MaxNode, NodeId, Successor};
pub use params::PlannerParams;
pub use search::{plan, Plan, TrailBlazer};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
