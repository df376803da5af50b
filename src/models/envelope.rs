//! The uniform lookup envelope and freshness metadata.

use super::tables::{DataContext, FactTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How current a fact table is.
///
/// The zero value (`Default`) is what a not-found envelope carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freshness {
    /// Coverage period of the data, e.g. `"May 2024"`.
    pub period: String,
    /// When the table was last refreshed.
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Whether the table is flagged as stale.
    pub is_stale: bool,
}

impl Freshness {
    /// Returns true if this is the zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self == &Self::default()
    }
}

/// Freshness registry row for one fact table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FreshnessEntry {
    /// Fact table name.
    pub table: String,
    /// Coverage period.
    pub period: String,
    /// Last refresh timestamp.
    pub last_refreshed_at: Option<DateTime<Utc>>,
    /// Staleness flag.
    pub is_stale: bool,
    /// Citation text; empty when the table has no registered citation.
    pub citation: String,
    /// Citation URL.
    pub source_url: Option<String>,
}

impl FreshnessEntry {
    /// The zero-value entry for a table: no citation, not stale.
    #[must_use]
    pub fn zero(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Returns true if the entry carries citation text.
    #[must_use]
    pub fn has_citation(&self) -> bool {
        !self.citation.trim().is_empty()
    }

    /// Returns the freshness block for an envelope.
    #[must_use]
    pub fn freshness(&self) -> Freshness {
        Freshness {
            period: self.period.clone(),
            last_refreshed: self.last_refreshed_at,
            is_stale: self.is_stale,
        }
    }
}

/// Result envelope returned by every lookup.
///
/// `found` always equals `data.is_some()`. The only constructors are
/// [`LookupResult::found`], which takes its citation from a registry entry, and
/// [`LookupResult::not_found`], the canonical empty envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult<T> {
    data: Option<T>,
    found: bool,
    citation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_url: Option<String>,
    data_context: DataContext,
    freshness: Freshness,
}

impl<T> LookupResult<T> {
    /// Wraps a matching record with the registry entry for its table.
    #[must_use]
    pub fn found(data: T, table: FactTable, entry: &FreshnessEntry) -> Self {
        Self {
            data: Some(data),
            found: true,
            citation: entry.citation.clone(),
            source_url: entry.source_url.clone(),
            data_context: table.data_context(),
            freshness: entry.freshness(),
        }
    }

    /// The canonical not-found envelope.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            data: None,
            found: false,
            citation: String::new(),
            source_url: None,
            data_context: DataContext::default(),
            freshness: Freshness::default(),
        }
    }

    /// Returns true if a record was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.found
    }

    /// Returns the record, if found.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the envelope and returns the record.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Returns the citation text.
    #[must_use]
    pub fn citation(&self) -> &str {
        &self.citation
    }

    /// Returns the citation URL.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Returns the data context of the source table.
    #[must_use]
    pub const fn data_context(&self) -> DataContext {
        self.data_context
    }

    /// Returns the freshness block.
    #[must_use]
    pub const fn freshness(&self) -> &Freshness {
        &self.freshness
    }

    /// Maps the record while keeping the citation metadata.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LookupResult<U> {
        LookupResult {
            found: self.found,
            data: self.data.map(f),
            citation: self.citation,
            source_url: self.source_url,
            data_context: self.data_context,
            freshness: self.freshness,
        }
    }
}

impl<T> Default for LookupResult<T> {
    fn default() -> Self {
        Self::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> FreshnessEntry {
        FreshnessEntry {
            table: "occupation_wages".to_string(),
            period: "May 2024".to_string(),
            last_refreshed_at: None,
            is_stale: true,
            citation: "BLS OEWS".to_string(),
            source_url: Some("https://www.bls.gov/oes/".to_string()),
        }
    }

    #[test]
    fn test_found_takes_citation_from_entry() {
        let result = LookupResult::found(42, FactTable::OccupationWages, &entry());
        assert!(result.is_found());
        assert_eq!(result.data(), Some(&42));
        assert_eq!(result.citation(), "BLS OEWS");
        assert_eq!(result.source_url(), Some("https://www.bls.gov/oes/"));
        assert_eq!(result.freshness().period, "May 2024");
        assert!(result.freshness().is_stale);
    }

    #[test]
    fn test_not_found_is_zeroed() {
        let result: LookupResult<u32> = LookupResult::not_found();
        assert!(!result.is_found());
        assert!(result.data().is_none());
        assert!(result.citation().is_empty());
        assert!(result.source_url().is_none());
        assert!(result.freshness().is_zero());
    }

    #[test]
    fn test_map_preserves_metadata() {
        let result = LookupResult::found(2, FactTable::Frameworks, &entry()).map(|v| v * 10);
        assert_eq!(result.data(), Some(&20));
        assert_eq!(result.data_context(), DataContext::NoncreditRelevant);
        assert_eq!(result.citation(), "BLS OEWS");
    }

    #[test]
    fn test_serialized_shape() {
        let result: LookupResult<u32> = LookupResult::not_found();
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["found"], serde_json::json!(false));
        assert!(json["data"].is_null());
        assert_eq!(json["dataContext"], serde_json::json!("all"));
        assert_eq!(json["freshness"]["isStale"], serde_json::json!(false));
    }
}
