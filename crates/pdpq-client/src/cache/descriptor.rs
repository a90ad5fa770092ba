use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use pdpq_core::Result;

use crate::net::NetworkFetcher;
use crate::obs::ResolverMetrics;
use crate::store::ExpiringStore;

/// Time-bounded cache of remotely fetched descriptor documents.
///
/// With `single_flight` enabled, concurrent misses on the same URI share one
/// network fetch: later callers wait on a per-URI lock and then re-read the
/// store. Without it, racing misses may each fetch; the last write wins.
pub struct DescriptorCache {
    store: ExpiringStore<Bytes>,
    fetcher: Arc<dyn NetworkFetcher>,
    inflight: Option<InflightMap>,
    metrics: Arc<ResolverMetrics>,
}

impl DescriptorCache {
    pub fn new(
        store: ExpiringStore<Bytes>,
        fetcher: Arc<dyn NetworkFetcher>,
        single_flight: bool,
        metrics: Arc<ResolverMetrics>,
    ) -> Self {
        Self {
            store,
            fetcher,
            inflight: single_flight.then(DashMap::new),
            metrics,
        }
    }

    /// Cached bytes for `uri`, fetching and storing them on a miss.
    /// Failed fetches are returned as `Retrieval` and leave the cache untouched.
    pub async fn fetch(&self, uri: &str, skip_tls_validation: bool) -> Result<Bytes> {
        if let Some(hit) = self.lookup(uri) {
            return Ok(hit);
        }

        let Some(inflight) = &self.inflight else {
            return self.fetch_and_store(uri, skip_tls_validation).await;
        };

        let slot = InflightSlot::claim(inflight, uri);
        let _guard = slot.lock.lock().await;
        // another caller may have populated the store while we waited
        match self.store.get(uri) {
            Some(hit) => {
                debug!(uri = %uri, "descriptor cache filled by concurrent fetch");
                Ok(hit)
            }
            None => self.fetch_and_store(uri, skip_tls_validation).await,
        }
    }

    /// Drop every cached descriptor; the next fetch of any URI hits the network.
    pub fn invalidate(&self) {
        self.store.clear();
        debug!("descriptor cache invalidated");
    }

    /// Reclaim memory held by expired entries.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    /// URIs with a fetch in flight or callers waiting on one.
    pub fn inflight_len(&self) -> usize {
        self.inflight.as_ref().map_or(0, DashMap::len)
    }

    /// Read-only view of the underlying store (no fetch on miss).
    pub fn peek(&self, uri: &str) -> Option<Bytes> {
        self.store.get(uri)
    }

    fn lookup(&self, uri: &str) -> Option<Bytes> {
        match self.store.get(uri) {
            Some(hit) => {
                self.metrics.cache_lookups.inc(&[("result", "hit")]);
                debug!(uri = %uri, "descriptor cache hit");
                Some(hit)
            }
            None => {
                self.metrics.cache_lookups.inc(&[("result", "miss")]);
                debug!(uri = %uri, "descriptor cache miss");
                None
            }
        }
    }

    async fn fetch_and_store(&self, uri: &str, skip_tls_validation: bool) -> Result<Bytes> {
        match self.fetcher.get(uri, skip_tls_validation).await {
            Ok(body) => {
                self.metrics.descriptor_fetches.inc(&[("outcome", "ok")]);
                self.store.put(uri, body.clone());
                Ok(body)
            }
            Err(e) => {
                self.metrics.descriptor_fetches.inc(&[("outcome", "error")]);
                warn!(uri = %uri, error = %e, "descriptor fetch failed");
                Err(e)
            }
        }
    }
}

type InflightMap = DashMap<String, Arc<Mutex<()>>>;

/// A caller's share of the per-URI fetch lock. Dropping the last share removes
/// the map entry, including when the owning `fetch` future is cancelled.
struct InflightSlot<'a> {
    map: &'a InflightMap,
    uri: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> InflightSlot<'a> {
    fn claim(map: &'a InflightMap, uri: &'a str) -> Self {
        let lock = map
            .entry(uri.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        Self { map, uri, lock }
    }
}

impl Drop for InflightSlot<'_> {
    fn drop(&mut self) {
        // map + this share => nobody else is waiting
        self.map.remove_if(self.uri, |_, l| Arc::strong_count(l) <= 2);
    }
}
