//! Wire codecs for protocol values.
//!
//! The resolver serializes queries and the HTTP client decodes replies through
//! these traits. `JsonCodec` is the built-in binding; XML/SOAP bindings plug in
//! by implementing the same traits.

pub mod json;

use pdpq_core::protocol::{AuthorityDescriptor, AuthzDecisionQuery, DecodedResponse};
use pdpq_core::Result;

pub use json::JsonCodec;

/// Outbound query serialization.
pub trait ProtocolTransformer: Send + Sync {
    fn serialize_query(&self, query: &AuthzDecisionQuery) -> Result<String>;
}

/// Inbound response decoding.
pub trait ResponseDecoder: Send + Sync {
    /// Media type sent alongside queries this codec produces.
    fn content_type(&self) -> &'static str;
    fn decode_response(&self, body: &[u8]) -> Result<DecodedResponse>;
}

/// Authority metadata decoding.
pub trait MetadataDecoder: Send + Sync {
    fn decode_authority(&self, document: &[u8]) -> Result<AuthorityDescriptor>;
}
