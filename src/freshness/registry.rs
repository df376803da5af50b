//! Freshness registry with an explicit, per-owner cache.

use crate::models::FreshnessEntry;
use crate::storage::sqlite::{FRESHNESS_TABLE, acquire_lock};
use crate::storage::{FactQuery, FactStore, Row, query_with_deadline};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Per-table freshness and citation metadata.
///
/// This is the single source of citation text. The first read per table goes to
/// the store; later reads are served from the cache for the registry's lifetime.
/// Each context build owns its registry, so cached entries never outlive a
/// request unless a caller deliberately shares one.
///
/// Read failures return [`FreshnessEntry::zero`] and are not cached, so a
/// transient failure does not pin an empty citation.
pub struct FreshnessRegistry {
    store: Arc<dyn FactStore>,
    cache: Mutex<HashMap<String, FreshnessEntry>>,
    deadline: Option<Duration>,
}

impl FreshnessRegistry {
    /// Creates a registry over a fact store.
    #[must_use]
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
            deadline: None,
        }
    }

    /// Bounds each registry read by a deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns the freshness entry for a table. Never fails.
    pub async fn get(&self, table: &str) -> FreshnessEntry {
        if let Some(entry) = acquire_lock(&self.cache).get(table) {
            metrics::counter!("freshness_cache_total", "result" => "hit").increment(1);
            return entry.clone();
        }
        metrics::counter!("freshness_cache_total", "result" => "miss").increment(1);

        match self.read(table).await {
            Ok(entry) => acquire_lock(&self.cache)
                .entry(table.to_string())
                .or_insert(entry)
                .clone(),
            Err(e) => {
                tracing::warn!(table, error = %e, "Freshness read failed, using zero entry");
                metrics::counter!(
                    "lookup_suppressed_errors_total",
                    "table" => FRESHNESS_TABLE,
                    "kind" => "freshness"
                )
                .increment(1);
                FreshnessEntry::zero(table)
            },
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        acquire_lock(&self.cache).len()
    }

    async fn read(&self, table: &str) -> Result<FreshnessEntry> {
        let query = FactQuery::table(FRESHNESS_TABLE)
            .eq("table_name", table)
            .limit(1);
        let rows = query_with_deadline(&self.store, query, self.deadline).await?;
        rows.into_iter()
            .next()
            .map_or_else(|| Ok(FreshnessEntry::zero(table)), |row| parse_entry(table, &row))
    }
}

fn parse_entry(table: &str, row: &Row) -> Result<FreshnessEntry> {
    let text = |column: &str| match row.get(column) {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let last_refreshed_at = match text("last_refreshed_at") {
        Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
            Error::InvalidInput(format!("unparseable last_refreshed_at for {table}: {raw}"))
        })?),
        None => None,
    };
    let is_stale = match row.get("is_stale") {
        Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.to_lowercase().as_str(), "1" | "true"),
        _ => false,
    };

    Ok(FreshnessEntry {
        table: table.to_string(),
        period: text("period").unwrap_or_default(),
        last_refreshed_at,
        is_stale,
        citation: text("citation_text").unwrap_or_default(),
        source_url: text("citation_url"),
    })
}

/// Parses RFC 3339 or `YYYY-MM-DD[ HH:MM:SS]` timestamps as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
