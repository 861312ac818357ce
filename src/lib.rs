//! # trailblazer
//!
//! Sample-efficient Monte-Carlo planning for Markov decision processes that
//! are only reachable through a generative model.
//!
//! ## Design Principles
//!
//! 1. **Model-Agnostic**: The planner sees an MDP only through
//!    `GenerativeModel`: legal actions, sampled transitions, state equality.
//!
//! 2. **PAC Guarantee**: Given γ, δ and ε, the root value is estimated to
//!    within ε with probability at least 1−δ.
//!
//! 3. **Anytime Reuse**: The tree is retained, so refining with a larger
//!    budget only draws the missing samples.
//!
//! ## Architecture
//!
//! - **Max/Avg Nodes**: Max nodes run confidence-bound elimination over
//!   their actions; avg nodes memoize samples and merge repeated successors.
//!
//! - **Arena Tree**: Nodes live in a vector indexed by `NodeId`.
//!
//! ## Modules
//!
//! - `core`: Generative-model trait, errors, seeded RNG
//! - `planner`: Configuration, derived constants, nodes, tree, search
//! - `models`: Tabular reference MDPs with a value-iteration oracle

pub mod core;
pub mod models;
pub mod planner;

// Re-export commonly used types
pub use crate::core::{ConfigError, GenerativeModel, ModelRng, PlanError, RngState, Transition};

pub use crate::planner::{
    plan, AlphaMode, NodeId, Plan, PlannerConfig, PlannerParams, SearchStats, SearchTree, TrailBlazer,
    TreeStats,
};

pub use crate::models::{TabularError, TabularMdp};
