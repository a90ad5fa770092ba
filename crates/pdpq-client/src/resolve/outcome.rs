use std::fmt;

use serde::Serialize;

use pdpq_core::error::{ErrorKind, PdpqError};
use pdpq_core::protocol::{format_error, Decision, Status};

/// Separator between a decision and the failure description in rendered outcomes.
pub const DECISION_ERROR_SEPARATOR: &str = "   /   ";

/// Result of resolving one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub resource: String,
    pub decision: Option<Decision>,
    pub error_description: Option<String>,
    /// Set when resolution itself failed (not for non-success statuses).
    pub error_kind: Option<ErrorKind>,
}

impl DecisionOutcome {
    /// Outcome from a response status and the decision extracted alongside it.
    pub fn from_status(
        resource: impl Into<String>,
        status: &Status,
        decision: Option<Decision>,
    ) -> Self {
        Self {
            resource: resource.into(),
            decision,
            error_description: (!status.is_success()).then(|| format_error(status)),
            error_kind: None,
        }
    }

    pub fn failed(resource: impl Into<String>, err: &PdpqError) -> Self {
        Self {
            resource: resource.into(),
            decision: None,
            error_description: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }

    /// True only for an unqualified `Permit`.
    pub fn is_permitted(&self) -> bool {
        self.decision == Some(Decision::Permit) && self.error_description.is_none()
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.decision, &self.error_description) {
            (Some(d), None) => write!(f, "{d}"),
            (Some(d), Some(e)) => write!(f, "{d}{DECISION_ERROR_SEPARATOR}{e}"),
            (None, Some(e)) => f.write_str(e),
            (None, None) => Ok(()),
        }
    }
}

impl Serialize for DecisionOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
