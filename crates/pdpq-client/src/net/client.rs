use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::warn;

use pdpq_core::error::{PdpqError, Result};
use pdpq_core::protocol::DecodedResponse;

use super::fetcher::build_client;
use super::ProtocolClient;
use crate::codec::ResponseDecoder;

/// POSTs serialized queries over HTTP and decodes the reply body.
pub struct HttpProtocolClient {
    http: Client,
    decoder: Arc<dyn ResponseDecoder>,
}

impl HttpProtocolClient {
    pub fn new(
        timeout: Duration,
        skip_tls_validation: bool,
        decoder: Arc<dyn ResponseDecoder>,
    ) -> Result<Self> {
        Ok(Self {
            http: build_client(timeout, skip_tls_validation)?,
            decoder,
        })
    }
}

#[async_trait]
impl ProtocolClient for HttpProtocolClient {
    async fn send(&self, serialized_query: &str, endpoint: &str) -> Result<DecodedResponse> {
        let resp = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, self.decoder.content_type())
            .body(serialized_query.to_owned())
            .send()
            .await
            .map_err(|e| PdpqError::retrieval(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                endpoint = %endpoint,
                status = status.as_u16(),
                "decision endpoint returned non-2xx status"
            );
            return Err(PdpqError::retrieval(
                endpoint,
                format!("http status {}", status.as_u16()),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| PdpqError::retrieval(endpoint, e))?;
        self.decoder.decode_response(&body)
    }
}
