use std::time::Duration;

use pdpq_core::error::{PdpqError, Result};
use serde::Deserialize;

use crate::resolve::ResolverSettings;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub network: NetworkSection,

    #[serde(default)]
    pub resolver: ResolverSection,

    pub local: LocalSection,

    pub authority: AuthoritySection,

    #[serde(default)]
    pub resources: Vec<String>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PdpqError::UnsupportedVersion);
        }
        if self.resources.is_empty() {
            return Err(PdpqError::BadRequest("resources must not be empty".into()));
        }
        if self.local.entity_id.trim().is_empty() {
            return Err(PdpqError::BadRequest("local.entity_id must not be empty".into()));
        }
        if self.authority.metadata_url.trim().is_empty() {
            return Err(PdpqError::BadRequest(
                "authority.metadata_url must not be empty".into(),
            ));
        }

        self.cache.validate()?;
        self.network.validate()?;
        self.resolver.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            single_flight: default_single_flight(),
        }
    }
}

impl CacheSection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=86_400_000).contains(&self.ttl_ms) {
            return Err(PdpqError::BadRequest(
                "cache.ttl_ms must be between 1000 and 86400000".into(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

fn default_ttl_ms() -> u64 {
    300_000
}
fn default_single_flight() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSection {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub skip_tls_validation: bool,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            skip_tls_validation: false,
        }
    }
}

impl NetworkSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.request_timeout_ms) {
            return Err(PdpqError::BadRequest(
                "network.request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_request_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverSection {
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            query_timeout_ms: default_query_timeout_ms(),
            deadline_ms: default_deadline_ms(),
        }
    }
}

impl ResolverSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=256).contains(&self.max_concurrency) {
            return Err(PdpqError::BadRequest(
                "resolver.max_concurrency must be between 1 and 256".into(),
            ));
        }
        if !(100..=60000).contains(&self.query_timeout_ms) {
            return Err(PdpqError::BadRequest(
                "resolver.query_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.deadline_ms > 300_000 {
            return Err(PdpqError::BadRequest(
                "resolver.deadline_ms must be at most 300000".into(),
            ));
        }
        if self.deadline_ms < self.query_timeout_ms {
            return Err(PdpqError::BadRequest(
                "resolver.deadline_ms must not be less than query_timeout_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn settings(&self) -> ResolverSettings {
        ResolverSettings {
            max_concurrency: self.max_concurrency,
            query_timeout: Duration::from_millis(self.query_timeout_ms),
            deadline: Duration::from_millis(self.deadline_ms),
        }
    }
}

fn default_max_concurrency() -> usize {
    8
}
fn default_query_timeout_ms() -> u64 {
    5000
}
fn default_deadline_ms() -> u64 {
    15000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalSection {
    pub entity_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthoritySection {
    pub metadata_url: String,
}
