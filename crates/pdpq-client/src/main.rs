//! pdpq client
//!
//! Resolves the configured authority's metadata, asks it for a decision on
//! every configured resource, and prints `resource -> decision` as JSON.
//!
//! Usage: `pdpq-client [config.yaml]` with `PDPQ_SESSION_ID` set.

use std::collections::BTreeMap;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use pdpq_client::{app_state, config};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "pdpq.yaml".to_string());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let Ok(session_id) = std::env::var("PDPQ_SESSION_ID") else {
        tracing::error!("PDPQ_SESSION_ID must be set");
        return ExitCode::FAILURE;
    };

    let state = match app_state::AppState::new(cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "client setup failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        authority = %state.cfg().authority.metadata_url,
        resources = state.cfg().resources.len(),
        "pdpq-client starting"
    );

    let decisions = match state.decide_configured(&session_id).await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind().as_str(), "resolution failed");
            return ExitCode::FAILURE;
        }
    };

    let sorted: BTreeMap<_, _> = decisions.into_iter().collect();
    match serde_json::to_string_pretty(&sorted) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            tracing::error!(error = %e, "json encode failed");
            return ExitCode::FAILURE;
        }
    }

    tracing::debug!(metrics = %state.metrics().render(), "final metrics");
    ExitCode::SUCCESS
}
