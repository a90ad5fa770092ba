//! Status code taxonomy and status chain interpretation.
//!
//! A `Status` carries a top-level `StatusCode` plus an ordered chain of
//! sub-codes, each further qualifying the one before it (e.g. `RESPONDER`
//! then `NO_AUTHN_CONTEXT`). Authorities in practice send at most one sub-code,
//! but the chain is walked to any depth.

use std::fmt;

use serde::{Deserialize, Serialize};

const STATUS_URI_PREFIX: &str = "urn:oasis:names:tc:SAML:2.0:status:";

macro_rules! status_codes {
    ($($variant:ident => $name:literal, $suffix:literal;)*) => {
        /// Protocol status code. `Success` is the only non-failure member.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum StatusCode {
            $($variant,)*
            /// Code outside the standard taxonomy, kept verbatim.
            Other(String),
        }

        impl StatusCode {
            /// Stable display name (e.g. `NO_AUTHN_CONTEXT`).
            pub fn name(&self) -> &str {
                match self {
                    $(StatusCode::$variant => $name,)*
                    StatusCode::Other(s) => s.as_str(),
                }
            }

            /// Protocol URI for standard codes; `Other` codes return their raw value.
            pub fn uri(&self) -> String {
                match self {
                    $(StatusCode::$variant => format!("{STATUS_URI_PREFIX}{}", $suffix),)*
                    StatusCode::Other(s) => s.clone(),
                }
            }

            /// Parse a display name or a protocol URI. Unknown input becomes `Other`.
            pub fn parse(raw: &str) -> Self {
                let trimmed = raw.trim();
                if let Some(suffix) = trimmed.strip_prefix(STATUS_URI_PREFIX) {
                    match suffix {
                        $($suffix => return StatusCode::$variant,)*
                        _ => {}
                    }
                }
                match trimmed {
                    $($name => StatusCode::$variant,)*
                    other => StatusCode::Other(other.to_string()),
                }
            }
        }
    };
}

status_codes! {
    Success => "SUCCESS", "Success";
    Requester => "REQUESTER", "Requester";
    Responder => "RESPONDER", "Responder";
    VersionMismatch => "VERSION_MISMATCH", "VersionMismatch";
    AuthnFailed => "AUTHN_FAILED", "AuthnFailed";
    InvalidAttrNameOrValue => "INVALID_ATTR_NAME_OR_VALUE", "InvalidAttrNameOrValue";
    InvalidNameIdPolicy => "INVALID_NAME_ID_POLICY", "InvalidNameIDPolicy";
    NoAuthnContext => "NO_AUTHN_CONTEXT", "NoAuthnContext";
    NoAvailableIdp => "NO_AVAILABLE_IDP", "NoAvailableIDP";
    NoPassive => "NO_PASSIVE", "NoPassive";
    NoSupportedIdp => "NO_SUPPORTED_IDP", "NoSupportedIDP";
    PartialLogout => "PARTIAL_LOGOUT", "PartialLogout";
    ProxyCountExceeded => "PROXY_COUNT_EXCEEDED", "ProxyCountExceeded";
    RequestDenied => "REQUEST_DENIED", "RequestDenied";
    RequestUnsupported => "REQUEST_UNSUPPORTED", "RequestUnsupported";
    RequestVersionDeprecated => "REQUEST_VERSION_DEPRECATED", "RequestVersionDeprecated";
    RequestVersionTooHigh => "REQUEST_VERSION_TOO_HIGH", "RequestVersionTooHigh";
    RequestVersionTooLow => "REQUEST_VERSION_TOO_LOW", "RequestVersionTooLow";
    ResourceNotRecognized => "RESOURCE_NOT_RECOGNIZED", "ResourceNotRecognized";
    TooManyResponses => "TOO_MANY_RESPONSES", "TooManyResponses";
    UnknownAttrProfile => "UNKNOWN_ATTR_PROFILE", "UnknownAttrProfile";
    UnknownPrincipal => "UNKNOWN_PRINCIPAL", "UnknownPrincipal";
    UnsupportedBinding => "UNSUPPORTED_BINDING", "UnsupportedBinding";
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Success)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for StatusCode {
    fn from(raw: String) -> Self {
        StatusCode::parse(&raw)
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.name().to_string()
    }
}

/// Decoded response status. Built once by a decoder, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    code: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    chain: Vec<StatusCode>,
}

impl Status {
    pub fn new(code: StatusCode) -> Self {
        Self {
            code,
            message: None,
            detail: None,
            chain: Vec::new(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::Success)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Append a sub-code qualifying the last code in the chain.
    pub fn with_child(mut self, code: StatusCode) -> Self {
        self.chain.push(code);
        self
    }

    pub fn code(&self) -> &StatusCode {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// First nested sub-code, if any.
    pub fn child_status_code(&self) -> Option<&StatusCode> {
        self.chain.first()
    }

    /// All nested sub-codes, outermost first.
    pub fn chain(&self) -> &[StatusCode] {
        &self.chain
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }
}

/// Stand-in for a code whose raw value is blank.
pub const UNKNOWN_STATUS: &str = "UNKNOWN_STATUS";

fn legible_name(code: &StatusCode) -> &str {
    let name = code.name().trim();
    if name.is_empty() {
        UNKNOWN_STATUS
    } else {
        name
    }
}

/// Human-readable failure description for a status.
///
/// Empty for `SUCCESS`; otherwise the top-level code name followed by
/// `" / "` and each sub-code name in chain order. Blank codes render as
/// `UNKNOWN_STATUS`, so a failure never formats to an empty string.
pub fn format_error(status: &Status) -> String {
    if status.is_success() {
        return String::new();
    }
    let mut out = legible_name(status.code()).to_string();
    for child in status.chain() {
        out.push_str(" / ");
        out.push_str(legible_name(child));
    }
    out
}
