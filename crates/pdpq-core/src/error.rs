//! Shared error type across pdpq crates.

use thiserror::Error;

/// Stable error categories, used in outcomes, logs, and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network or transport failure (descriptor fetch or decision query).
    Retrieval,
    /// Authority descriptor lists no decision-service endpoint.
    NoEndpoint,
    /// Response lacks the assertion/decision a success status promises.
    MalformedResponse,
    /// Invalid input or configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in outcomes and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Retrieval => "RETRIEVAL",
            ErrorKind::NoEndpoint => "NO_ENDPOINT",
            ErrorKind::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Whether retrying the same call may succeed without a config change.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Retrieval)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PdpqError>;

/// Unified error type used by core and client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PdpqError {
    #[error("retrieval failed for {uri}: {cause}")]
    Retrieval { uri: String, cause: String },
    #[error("no decision-service endpoint for {entity_id}")]
    NoEndpoint { entity_id: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PdpqError {
    /// Shorthand for a transport failure against `uri`.
    pub fn retrieval(uri: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        PdpqError::Retrieval {
            uri: uri.into(),
            cause: cause.to_string(),
        }
    }

    /// Map to a stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PdpqError::Retrieval { .. } => ErrorKind::Retrieval,
            PdpqError::NoEndpoint { .. } => ErrorKind::NoEndpoint,
            PdpqError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            PdpqError::BadRequest(_) => ErrorKind::BadRequest,
            PdpqError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            PdpqError::Internal(_) => ErrorKind::Internal,
        }
    }
}
