//! Decoded authority responses.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::query::Action;
use super::status::Status;

/// Authorization decision value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Permit,
    Deny,
    Indeterminate,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Permit => "Permit",
            Decision::Deny => "Deny",
            Decision::Indeterminate => "Indeterminate",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decision statement inside an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStatement {
    resource: String,
    decision: Decision,
    #[serde(default)]
    actions: Vec<Action>,
}

impl DecisionStatement {
    pub fn new(resource: impl Into<String>, decision: Decision, actions: Vec<Action>) -> Self {
        Self {
            resource: resource.into(),
            decision,
            actions,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

/// An assertion carrying zero or more decision statements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issuer: Option<String>,
    #[serde(default)]
    decision_statements: Vec<DecisionStatement>,
}

impl Assertion {
    pub fn new(issuer: Option<String>, decision_statements: Vec<DecisionStatement>) -> Self {
        Self {
            issuer,
            decision_statements,
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn decision_statements(&self) -> &[DecisionStatement] {
        &self.decision_statements
    }
}

/// Response as handed back by a protocol client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedResponse {
    status: Status,
    #[serde(default)]
    assertions: Vec<Assertion>,
}

impl DecodedResponse {
    pub fn new(status: Status, assertions: Vec<Assertion>) -> Self {
        Self { status, assertions }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Decision from the first assertion's first decision statement.
    pub fn first_decision(&self) -> Option<Decision> {
        self.assertions
            .first()
            .and_then(|a| a.decision_statements().first())
            .map(DecisionStatement::decision)
    }
}
