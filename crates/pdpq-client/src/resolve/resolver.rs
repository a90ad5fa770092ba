use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, info_span, warn, Instrument};

use pdpq_core::error::{PdpqError, Result};
use pdpq_core::protocol::{
    format_error, Action, AuthorityDescriptor, AuthzDecisionQuery, Decision, LocalPartyDescriptor,
};

use super::outcome::DecisionOutcome;
use crate::codec::ProtocolTransformer;
use crate::net::ProtocolClient;
use crate::obs::ResolverMetrics;

/// Effective deadline when the configured one overflows `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Concurrency and timing knobs for a resolution call.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Maximum decision queries in flight at once.
    pub max_concurrency: usize,
    /// Timeout for one query round-trip.
    pub query_timeout: Duration,
    /// Budget for the whole `resolve` call.
    pub deadline: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            query_timeout: Duration::from_secs(5),
            deadline: Duration::from_secs(15),
        }
    }
}

/// Issues one decision query per resource and aggregates the outcomes.
pub struct DecisionResolver {
    transformer: Arc<dyn ProtocolTransformer>,
    client: Arc<dyn ProtocolClient>,
    settings: ResolverSettings,
    metrics: Arc<ResolverMetrics>,
}

impl DecisionResolver {
    pub fn new(
        transformer: Arc<dyn ProtocolTransformer>,
        client: Arc<dyn ProtocolClient>,
        settings: ResolverSettings,
        metrics: Arc<ResolverMetrics>,
    ) -> Self {
        Self {
            transformer,
            client,
            settings,
            metrics,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve a decision for every resource in `resources`.
    ///
    /// Returns `Err` only for invalid input, before any network activity.
    /// Otherwise the map covers exactly the (deduplicated) input set: failures
    /// of individual queries are embedded in their outcome. Queries run
    /// concurrently up to `max_concurrency`; resources still pending at the
    /// deadline are reported as retrieval failures. Dropping the returned
    /// future cancels every in-flight query.
    pub async fn resolve<I, S>(
        &self,
        resources: I,
        subject_session_id: &str,
        issuer: &LocalPartyDescriptor,
        authority: &AuthorityDescriptor,
    ) -> Result<HashMap<String, DecisionOutcome>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wanted: BTreeSet<String> = resources.into_iter().map(Into::into).collect();
        if wanted.is_empty() {
            return Err(PdpqError::BadRequest("resource set must not be empty".into()));
        }
        if wanted.iter().any(|r| r.trim().is_empty()) {
            return Err(PdpqError::BadRequest("resource must not be blank".into()));
        }
        if subject_session_id.trim().is_empty() {
            return Err(PdpqError::BadRequest(
                "subject session id must not be empty".into(),
            ));
        }
        if issuer.entity_id().trim().is_empty() {
            return Err(PdpqError::BadRequest("issuer entity id must not be empty".into()));
        }

        let now = Instant::now();
        let deadline = now
            .checked_add(self.settings.deadline)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut units = stream::iter(wanted.iter().cloned())
            .map(move |resource| {
                let span = info_span!("decision", resource = %resource);
                self.resolve_one(resource, subject_session_id, issuer, authority)
                    .instrument(span)
            })
            .buffer_unordered(self.settings.max_concurrency.max(1));

        let mut out = HashMap::with_capacity(wanted.len());
        loop {
            match timeout_at(deadline, units.next()).await {
                Ok(Some(outcome)) => {
                    out.insert(outcome.resource.clone(), outcome);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        pending = wanted.len() - out.len(),
                        "resolution deadline exceeded, abandoning pending queries"
                    );
                    break;
                }
            }
        }
        // aborts whatever is still in flight
        drop(units);

        let target = authority
            .primary_decision_service()
            .unwrap_or_else(|| authority.entity_id());
        for resource in wanted {
            if out.contains_key(&resource) {
                continue;
            }
            let err = PdpqError::retrieval(target, "resolution deadline exceeded");
            self.metrics.decision_queries.inc(&[("outcome", "error")]);
            out.insert(resource.clone(), DecisionOutcome::failed(resource, &err));
        }

        let permitted = out.values().filter(|o| o.is_permitted()).count();
        info!(
            resources = out.len(),
            permitted,
            authority = %authority.entity_id(),
            "resolution complete"
        );
        Ok(out)
    }

    async fn resolve_one(
        &self,
        resource: String,
        subject_session_id: &str,
        issuer: &LocalPartyDescriptor,
        authority: &AuthorityDescriptor,
    ) -> DecisionOutcome {
        let started = std::time::Instant::now();
        let outcome = match self
            .query(&resource, subject_session_id, issuer, authority)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, kind = e.kind().as_str(), "decision query failed");
                DecisionOutcome::failed(resource, &e)
            }
        };

        let label = match (outcome.error_kind, outcome.decision) {
            (Some(_), _) | (None, None) => "error",
            (None, Some(Decision::Permit)) if outcome.is_permitted() => "permit",
            // permit under a failure status
            (None, Some(Decision::Permit)) => "indeterminate",
            (None, Some(Decision::Deny)) => "deny",
            (None, Some(Decision::Indeterminate)) => "indeterminate",
        };
        self.metrics.decision_queries.inc(&[("outcome", label)]);
        self.metrics.query_duration.observe(&[], started.elapsed());
        outcome
    }

    async fn query(
        &self,
        resource: &str,
        subject_session_id: &str,
        issuer: &LocalPartyDescriptor,
        authority: &AuthorityDescriptor,
    ) -> Result<DecisionOutcome> {
        let query =
            AuthzDecisionQuery::new(issuer, subject_session_id, resource, vec![Action::http_get()]);

        let endpoint = authority
            .primary_decision_service()
            .ok_or_else(|| PdpqError::NoEndpoint {
                entity_id: authority.entity_id().to_string(),
            })?;
        let query = query.with_destination(endpoint);

        let serialized = self.transformer.serialize_query(&query)?;
        debug!(endpoint = %endpoint, query_id = %query.id(), "sending decision query");

        let response = timeout(
            self.settings.query_timeout,
            self.client.send(&serialized, endpoint),
        )
        .await
        .map_err(|_| {
            PdpqError::retrieval(
                endpoint,
                format!("timed out after {}ms", self.settings.query_timeout.as_millis()),
            )
        })??;

        let status = response.status();
        let decision = response.first_decision();

        if status.is_success() && decision.is_none() {
            let missing = if response.assertions().is_empty() {
                "assertion"
            } else {
                "decision statement"
            };
            return Err(PdpqError::MalformedResponse(format!(
                "success status without {missing}"
            )));
        }
        if !status.is_success() {
            debug!(
                status = %format_error(status),
                has_decision = decision.is_some(),
                "authority returned non-success status"
            );
        }

        Ok(DecisionOutcome::from_status(resource, status, decision))
    }
}
