//! Lookup functions, one per fact domain.
//!
//! Every lookup returns a [`LookupResult`] and never an error. A missing record,
//! an invalid key, a failed query, a decode failure and an expired deadline all
//! yield [`LookupResult::not_found`]. Suppressed failures are logged, counted in
//! `lookup_suppressed_errors_total` and tallied in [`LookupDiagnostics`].
//!
//! # Domains
//!
//! | Module | Lookups |
//! |--------|---------|
//! | `occupation` | wages, projections, skills, visa demand, state priority |
//! | `institution` | institution, search, service-area counties, completions |
//! | `regional` | county/state demographics, industry employment, employers |
//! | `regulatory` | statutes, credential requirements, frameworks |

mod diagnostics;
mod institution;
mod keys;
mod occupation;
mod regional;
mod regulatory;

pub use diagnostics::{DiagnosticsSnapshot, LookupDiagnostics, SuppressedKind};
pub use keys::{NATIONAL, is_valid_soc};

use crate::config::{ListCaps, WorkfactsConfig};
use crate::freshness::FreshnessRegistry;
use crate::models::{FactTable, LookupResult};
use crate::storage::{FactQuery, FactStore, Row, query_with_deadline};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Lookup service over a fact store.
///
/// Cloning is cheap; clones share the store, the diagnostics and the freshness
/// registry. [`Lookups::scoped`] swaps in a fresh registry for one request.
#[derive(Clone)]
pub struct Lookups {
    store: Arc<dyn FactStore>,
    registry: Arc<FreshnessRegistry>,
    diagnostics: Arc<LookupDiagnostics>,
    deadline: Option<Duration>,
    caps: ListCaps,
}

impl Lookups {
    /// Creates a lookup service with default caps and deadline.
    #[must_use]
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        let deadline = WorkfactsConfig::default().lookup_deadline();
        Self {
            registry: Arc::new(FreshnessRegistry::new(Arc::clone(&store)).with_deadline(deadline)),
            store,
            diagnostics: Arc::new(LookupDiagnostics::default()),
            deadline,
            caps: ListCaps::default(),
        }
    }

    /// Creates a lookup service from configuration.
    #[must_use]
    pub fn from_config(store: Arc<dyn FactStore>, config: &WorkfactsConfig) -> Self {
        Self::new(store)
            .with_deadline(config.lookup_deadline())
            .with_caps(config.list_caps.clone())
    }

    /// Sets the per-query deadline. `None` disables it.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self.registry = Arc::new(FreshnessRegistry::new(Arc::clone(&self.store)).with_deadline(deadline));
        self
    }

    /// Sets the list caps.
    #[must_use]
    pub fn with_caps(mut self, caps: ListCaps) -> Self {
        self.caps = caps;
        self
    }

    /// Uses an existing freshness registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<FreshnessRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Returns a clone with a fresh, empty freshness registry.
    #[must_use]
    pub fn scoped(&self) -> Self {
        let registry = FreshnessRegistry::new(Arc::clone(&self.store)).with_deadline(self.deadline);
        self.clone().with_registry(Arc::new(registry))
    }

    /// Returns the freshness registry citations are drawn from.
    #[must_use]
    pub fn registry(&self) -> &Arc<FreshnessRegistry> {
        &self.registry
    }

    /// Returns the suppressed-error diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &LookupDiagnostics {
        &self.diagnostics
    }

    /// Returns the list caps.
    #[must_use]
    pub const fn caps(&self) -> &ListCaps {
        &self.caps
    }

    /// Returns the per-query deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Runs a single-record lookup.
    async fn fetch_one<T: DeserializeOwned>(&self, table: FactTable, query: FactQuery) -> LookupResult<T> {
        self.run(table, query, |rows| {
            rows.into_iter().next().map(decode).transpose()
        })
        .await
    }

    /// Runs a list lookup. Zero rows is not-found.
    async fn fetch_many<T: DeserializeOwned>(
        &self,
        table: FactTable,
        query: FactQuery,
    ) -> LookupResult<Vec<T>> {
        self.run(table, query, |rows| {
            if rows.is_empty() {
                return Ok(None);
            }
            rows.into_iter().map(decode).collect::<Result<Vec<T>>>().map(Some)
        })
        .await
    }

    /// Reads rows without an envelope. Failures are suppressed and yield `None`.
    async fn fetch_rows(&self, table: FactTable, query: FactQuery) -> Option<Vec<Row>> {
        match query_with_deadline(&self.store, query, self.deadline).await {
            Ok(rows) => Some(rows),
            Err(e) => {
                self.suppress(table, query_error_kind(&e), &e);
                None
            },
        }
    }

    async fn run<T, F>(&self, table: FactTable, query: FactQuery, decode_rows: F) -> LookupResult<T>
    where
        F: FnOnce(Vec<Row>) -> Result<Option<T>>,
    {
        let start = Instant::now();
        let span = tracing::debug_span!("lookup", table = table.as_str());

        let (result, status) = async {
            let Some(rows) = self.fetch_rows(table, query).await else {
                return (LookupResult::not_found(), "error");
            };
            match decode_rows(rows) {
                Ok(Some(data)) => self.envelope(table, data).await,
                Ok(None) => (LookupResult::not_found(), "not_found"),
                Err(e) => {
                    self.suppress(table, SuppressedKind::Decode, &e);
                    (LookupResult::not_found(), "error")
                },
            }
        }
        .instrument(span)
        .await;

        metrics::counter!(
            "lookup_requests_total",
            "table" => table.as_str(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!("lookup_duration_ms", "table" => table.as_str())
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    /// Wraps found data with the registry entry for its table.
    ///
    /// Found data whose table has no registered citation is dropped rather than
    /// returned uncited.
    async fn envelope<T>(&self, table: FactTable, data: T) -> (LookupResult<T>, &'static str) {
        let entry = self.registry.get(table.as_str()).await;
        if !entry.has_citation() {
            self.suppress(
                table,
                SuppressedKind::MissingCitation,
                &Error::NotFound(format!("citation for {table}")),
            );
            return (LookupResult::not_found(), "error");
        }
        (LookupResult::found(data, table, &entry), "found")
    }

    fn suppress(&self, table: FactTable, kind: SuppressedKind, error: &Error) {
        tracing::warn!(
            table = table.as_str(),
            kind = kind.as_str(),
            error = %error,
            "Lookup degraded to not-found"
        );
        metrics::counter!(
            "lookup_suppressed_errors_total",
            "table" => table.as_str(),
            "kind" => kind.as_str()
        )
        .increment(1);
        self.diagnostics.record(kind);
    }
}

fn decode<T: DeserializeOwned>(row: Row) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(row))
        .map_err(|e| Error::InvalidInput(format!("row decode failed: {e}")))
}

const fn query_error_kind(error: &Error) -> SuppressedKind {
    match error {
        Error::Timeout { .. } => SuppressedKind::Timeout,
        _ => SuppressedKind::Transport,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FACTS, seeded_store};
    use super::*;
    use crate::storage::SqliteFactStore;

    #[tokio::test]
    async fn test_found_rows_without_citation_are_dropped() {
        let store = SqliteFactStore::in_memory().unwrap();
        store.execute_batch(FACTS).unwrap();
        let lookups = Lookups::new(Arc::new(store));

        let result = lookups.wages("29-2052", Some("IA")).await;
        assert!(!result.is_found());
        assert_eq!(lookups.diagnostics().snapshot().missing_citation, 1);
    }

    #[tokio::test]
    async fn test_scoped_gets_fresh_registry() {
        let lookups = Lookups::new(seeded_store());
        let _ = lookups.wages("29-2052", None).await;
        assert_eq!(lookups.registry().cached_len(), 1);

        let scoped = lookups.scoped();
        assert_eq!(scoped.registry().cached_len(), 0);
        assert_eq!(lookups.registry().cached_len(), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_is_suppressed() {
        let store = SqliteFactStore::in_memory().unwrap();
        store
            .execute_batch(
                "INSERT INTO data_freshness VALUES ('institutions', '', NULL, 0, 'IPEDS', NULL);
                 INSERT INTO institutions VALUES (9, 'Broken', NULL, 'IA', NULL, NULL, 'lots', NULL);",
            )
            .unwrap();
        let lookups = Lookups::new(Arc::new(store));

        assert!(!lookups.institution(9).await.is_found());
        assert_eq!(lookups.diagnostics().snapshot().decode, 1);
    }
}
