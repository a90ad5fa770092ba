//! Per-resource authorization decision resolution.

mod outcome;
mod resolver;

pub use outcome::{DecisionOutcome, DECISION_ERROR_SEPARATOR};
pub use resolver::{DecisionResolver, ResolverSettings};
