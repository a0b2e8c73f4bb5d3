//! Shared types and advisory rules for the Crop Advisory service
//!
//! This crate holds everything that does not touch the network or the
//! filesystem: the request/response data model, the feature normalizer that
//! feeds the yield estimator, and the rule sets that turn predictions and
//! leaf-colour statistics into advisory reports.

pub mod advisory;
pub mod features;
pub mod models;
pub mod parsing;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use features::*;
pub use models::*;
pub use parsing::*;
pub use types::*;
pub use validation::*;
