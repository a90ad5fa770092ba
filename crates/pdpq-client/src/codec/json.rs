use pdpq_core::error::{PdpqError, Result};
use pdpq_core::protocol::{AuthorityDescriptor, AuthzDecisionQuery, DecodedResponse};

use super::{MetadataDecoder, ProtocolTransformer, ResponseDecoder};

/// serde_json binding for queries, responses, and authority metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl ProtocolTransformer for JsonCodec {
    fn serialize_query(&self, query: &AuthzDecisionQuery) -> Result<String> {
        serde_json::to_string(query)
            .map_err(|e| PdpqError::Internal(format!("json encode failed: {e}")))
    }
}

impl ResponseDecoder for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn decode_response(&self, body: &[u8]) -> Result<DecodedResponse> {
        serde_json::from_slice(body)
            .map_err(|e| PdpqError::MalformedResponse(format!("invalid response json: {e}")))
    }
}

impl MetadataDecoder for JsonCodec {
    fn decode_authority(&self, document: &[u8]) -> Result<AuthorityDescriptor> {
        serde_json::from_slice(document)
            .map_err(|e| PdpqError::MalformedResponse(format!("invalid authority metadata: {e}")))
    }
}
