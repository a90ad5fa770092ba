//! Network collaborators.
//!
//! The cache and resolver talk to the network only through these traits, so
//! tests substitute in-memory fakes and deployments pick their own transport.

pub mod client;
pub mod fetcher;

use async_trait::async_trait;
use bytes::Bytes;

use pdpq_core::protocol::DecodedResponse;
use pdpq_core::Result;

pub use client::HttpProtocolClient;
pub use fetcher::HttpFetcher;

/// Blocking-style document fetch (descriptor/metadata documents).
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    /// Fetch `uri`. Non-success responses and transport failures are
    /// reported as `PdpqError::Retrieval`.
    async fn get(&self, uri: &str, skip_tls_validation: bool) -> Result<Bytes>;
}

/// Round-trip of a serialized decision query to an authority endpoint.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    async fn send(&self, serialized_query: &str, endpoint: &str) -> Result<DecodedResponse>;
}
