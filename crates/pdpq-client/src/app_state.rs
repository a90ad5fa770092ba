//! Shared application state for the pdpq client.
//!
//! Wires the descriptor cache, authority resolver, and decision resolver from
//! config. Startup errors are returned, never panicked on.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use pdpq_core::error::Result;
use pdpq_core::protocol::LocalPartyDescriptor;

use crate::cache::{AuthorityResolver, DescriptorCache};
use crate::codec::{JsonCodec, MetadataDecoder, ProtocolTransformer};
use crate::config::ClientConfig;
use crate::net::{HttpFetcher, HttpProtocolClient, NetworkFetcher, ProtocolClient};
use crate::obs::ResolverMetrics;
use crate::resolve::{DecisionOutcome, DecisionResolver};
use crate::store::{Clock, ExpiringStore, SystemClock};

/// Collaborators injected into `AppState`.
pub struct Collaborators {
    pub clock: Arc<dyn Clock>,
    pub fetcher: Arc<dyn NetworkFetcher>,
    pub transformer: Arc<dyn ProtocolTransformer>,
    pub client: Arc<dyn ProtocolClient>,
    pub metadata: Arc<dyn MetadataDecoder>,
}

impl Collaborators {
    /// HTTP transport with the JSON binding.
    pub fn http_json(cfg: &ClientConfig) -> Result<Self> {
        let timeout = cfg.network.request_timeout();
        Ok(Self {
            clock: Arc::new(SystemClock),
            fetcher: Arc::new(HttpFetcher::new(timeout)?),
            transformer: Arc::new(JsonCodec),
            client: Arc::new(HttpProtocolClient::new(
                timeout,
                cfg.network.skip_tls_validation,
                Arc::new(JsonCodec),
            )?),
            metadata: Arc::new(JsonCodec),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ClientConfig,
    local: LocalPartyDescriptor,
    cache: Arc<DescriptorCache>,
    authorities: AuthorityResolver,
    resolver: DecisionResolver,
    metrics: Arc<ResolverMetrics>,
}

impl AppState {
    /// Build state with the default HTTP/JSON collaborators.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let collab = Collaborators::http_json(&cfg)?;
        Ok(Self::with_collaborators(cfg, collab))
    }

    pub fn with_collaborators(cfg: ClientConfig, collab: Collaborators) -> Self {
        let metrics = Arc::new(ResolverMetrics::new());

        let store: ExpiringStore<Bytes> = ExpiringStore::new(collab.clock, cfg.cache.ttl());
        let cache = Arc::new(DescriptorCache::new(
            store,
            collab.fetcher,
            cfg.cache.single_flight,
            Arc::clone(&metrics),
        ));
        let authorities = AuthorityResolver::new(
            Arc::clone(&cache),
            collab.metadata,
            cfg.network.skip_tls_validation,
        );
        let resolver = DecisionResolver::new(
            collab.transformer,
            collab.client,
            cfg.resolver.settings(),
            Arc::clone(&metrics),
        );
        let local = LocalPartyDescriptor::new(cfg.local.entity_id.clone());

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                local,
                cache,
                authorities,
                resolver,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.inner.cfg
    }

    pub fn cache(&self) -> Arc<DescriptorCache> {
        Arc::clone(&self.inner.cache)
    }

    pub fn metrics(&self) -> Arc<ResolverMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Resolve the configured authority (through the cache), then decide every
    /// configured resource for `subject_session_id`.
    pub async fn decide_configured(
        &self,
        subject_session_id: &str,
    ) -> Result<HashMap<String, DecisionOutcome>> {
        let cfg = &self.inner.cfg;
        let authority = self
            .inner
            .authorities
            .resolve(&cfg.authority.metadata_url)
            .await?;
        self.inner
            .resolver
            .resolve(
                cfg.resources.iter().cloned(),
                subject_session_id,
                &self.inner.local,
                &authority,
            )
            .await
    }
}
