//! Party descriptors (metadata) read by the resolver.
//!
//! Only the fields the decision flow needs are modelled: identity and the
//! authority's decision-service endpoints.

use serde::{Deserialize, Serialize};

/// SOAP binding URI, the usual binding for decision services.
pub const SOAP_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:SOAP";

/// The local party issuing decision queries (a service provider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPartyDescriptor {
    entity_id: String,
}

impl LocalPartyDescriptor {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

/// A protocol endpoint (binding + location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default = "default_binding")]
    binding: String,
    location: String,
}

fn default_binding() -> String {
    SOAP_BINDING.to_string()
}

impl Endpoint {
    pub fn new(binding: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
            location: location.into(),
        }
    }

    /// SOAP endpoint at `location`.
    pub fn soap(location: impl Into<String>) -> Self {
        Self::new(SOAP_BINDING, location)
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// A policy decision authority and its ordered decision-service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityDescriptor {
    entity_id: String,
    #[serde(default)]
    decision_services: Vec<Endpoint>,
}

impl AuthorityDescriptor {
    pub fn new(entity_id: impl Into<String>, decision_services: Vec<Endpoint>) -> Self {
        Self {
            entity_id: entity_id.into(),
            decision_services,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn decision_services(&self) -> &[Endpoint] {
        &self.decision_services
    }

    /// Location of the first listed decision service.
    pub fn primary_decision_service(&self) -> Option<&str> {
        self.decision_services.first().map(Endpoint::location)
    }
}
