//! Core types shared by the planner and the models.
//!
//! The planner only talks to an environment through `GenerativeModel`;
//! everything here is independent of the search itself.

pub mod error;
pub mod model;
pub mod rng;

pub use error::{ConfigError, PlanError};
pub use model::{GenerativeModel, Transition};
pub use rng::{ModelRng, RngState};
