use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use pdpq_core::error::{PdpqError, Result};

use super::NetworkFetcher;

/// Build a client for the HTTP adapters. `skip_tls_validation` disables
/// certificate checks.
pub(crate) fn build_client(timeout: Duration, skip_tls_validation: bool) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(skip_tls_validation)
        .build()
        .map_err(|e| PdpqError::Internal(format!("http client build failed: {e}")))
}

/// `reqwest`-backed document fetcher.
#[derive(Clone)]
pub struct HttpFetcher {
    strict: Client,
    insecure: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            strict: build_client(timeout, false)?,
            insecure: build_client(timeout, true)?,
        })
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn get(&self, uri: &str, skip_tls_validation: bool) -> Result<Bytes> {
        let client = if skip_tls_validation {
            &self.insecure
        } else {
            &self.strict
        };

        let resp = client.get(uri).send().await.map_err(|e| {
            warn!(uri = %uri, error = %e, "descriptor request failed");
            PdpqError::retrieval(uri, e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(uri = %uri, status = status.as_u16(), "descriptor fetch returned non-2xx status");
            return Err(PdpqError::retrieval(uri, format!("http status {}", status.as_u16())));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| PdpqError::retrieval(uri, e))?;
        debug!(uri = %uri, len = body.len(), "descriptor fetched");
        Ok(body)
    }
}
