//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use pdpq_core::error::{PdpqError, Result};

pub use schema::{
    AuthoritySection, CacheSection, ClientConfig, LocalSection, NetworkSection, ResolverSection,
};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PdpqError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| PdpqError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
