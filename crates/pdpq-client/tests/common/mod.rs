//! In-memory collaborators shared by the integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use pdpq_client::net::{NetworkFetcher, ProtocolClient};
use pdpq_core::error::{PdpqError, Result};
use pdpq_core::protocol::{
    Assertion, Decision, DecisionStatement, DecodedResponse, Status,
};

/// Fetcher serving fixed documents and counting calls per URI.
#[derive(Default)]
pub struct FakeFetcher {
    docs: Mutex<HashMap<String, Bytes>>,
    calls: Mutex<HashMap<String, usize>>,
    tls_flags: Mutex<Vec<(String, bool)>>,
    delay: Option<Duration>,
    total: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn serve(&self, uri: &str, body: impl Into<Bytes>) {
        self.docs.lock().unwrap().insert(uri.to_string(), body.into());
    }

    pub fn calls(&self, uri: &str) -> usize {
        self.calls.lock().unwrap().get(uri).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// `skip_tls_validation` as received by each call for `uri`, in call order.
    pub fn tls_flags(&self, uri: &str) -> Vec<bool> {
        self.tls_flags
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == uri)
            .map(|(_, skip)| *skip)
            .collect()
    }
}

#[async_trait]
impl NetworkFetcher for FakeFetcher {
    async fn get(&self, uri: &str, skip_tls_validation: bool) -> Result<Bytes> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(uri.to_string()).or_insert(0) += 1;
        self.tls_flags
            .lock()
            .unwrap()
            .push((uri.to_string(), skip_tls_validation));
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.docs
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| PdpqError::retrieval(uri, "http status 404"))
    }
}

/// Scripted reply for one resource.
#[derive(Clone)]
pub enum Reply {
    Respond(DecodedResponse),
    Fail(PdpqError),
    Delayed(Duration, DecodedResponse),
}

/// Protocol client that reads the resource out of a JSON query and replies
/// from a script.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<HashMap<String, Reply>>,
    sent: Mutex<Vec<(String, String)>>,
    completed: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, resource: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(resource.to_string(), reply);
        self
    }

    /// (resource, endpoint) pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Sends that ran to completion, delayed ones included.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProtocolClient for ScriptedClient {
    async fn send(&self, serialized_query: &str, endpoint: &str) -> Result<DecodedResponse> {
        let q: serde_json::Value = serde_json::from_str(serialized_query).unwrap();
        let resource = q["resource"].as_str().unwrap().to_string();
        self.sent
            .lock()
            .unwrap()
            .push((resource.clone(), endpoint.to_string()));

        let reply = self.replies.lock().unwrap().get(&resource).cloned();
        let result = match reply {
            Some(Reply::Respond(r)) => Ok(r),
            Some(Reply::Fail(e)) => Err(e),
            Some(Reply::Delayed(d, r)) => {
                tokio::time::sleep(d).await;
                Ok(r)
            }
            None => Err(PdpqError::retrieval(endpoint, "connection refused")),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

pub fn decided(resource: &str, status: Status, decision: Decision) -> DecodedResponse {
    DecodedResponse::new(
        status,
        vec![Assertion::new(
            Some("https://pdp.example.com".into()),
            vec![DecisionStatement::new(resource, decision, vec![])],
        )],
    )
}

pub fn permit(resource: &str) -> DecodedResponse {
    decided(resource, Status::success(), Decision::Permit)
}

pub fn shared<T>(v: T) -> Arc<T> {
    Arc::new(v)
}
