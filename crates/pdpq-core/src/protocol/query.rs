//! Outbound authorization decision query.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::descriptor::LocalPartyDescriptor;

/// GET/HEAD/PUT/POST action namespace.
pub const GHPP_NAMESPACE: &str = "urn:oasis:names:tc:SAML:1.0:action:ghpp";

/// An action the subject wants to perform on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    namespace: String,
    value: String,
}

impl Action {
    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            value: value.into(),
        }
    }

    /// HTTP `GET` in the GHPP namespace.
    pub fn http_get() -> Self {
        Self::new(GHPP_NAMESPACE, "GET")
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Query asking whether `subject_session_id` may perform `actions` on `resource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzDecisionQuery {
    id: String,
    issue_instant: SystemTime,
    issuer: String,
    subject_session_id: String,
    resource: String,
    actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
}

impl AuthzDecisionQuery {
    /// Build a query with a fresh id and the current issue instant.
    pub fn new(
        issuer: &LocalPartyDescriptor,
        subject_session_id: impl Into<String>,
        resource: impl Into<String>,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            // NCName ids must not start with a digit.
            id: format!("a{}", Uuid::now_v7().simple()),
            issue_instant: SystemTime::now(),
            issuer: issuer.entity_id().to_string(),
            subject_session_id: subject_session_id.into(),
            resource: resource.into(),
            actions,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn issue_instant(&self) -> SystemTime {
        self.issue_instant
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject_session_id(&self) -> &str {
        &self.subject_session_id
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}
