//! Reference MDPs.
//!
//! - `tabular`: explicit transition tables with a value-iteration oracle
//! - `presets`: small tables used by tests, benches and the CLI

pub mod presets;
pub mod tabular;

pub use tabular::{ActionId, Outcome, StateId, TabularError, TabularMdp, TabularMdpBuilder};
