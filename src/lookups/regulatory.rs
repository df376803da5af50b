//! Statute, credential and framework lookups.

use super::Lookups;
use super::keys::{soc_key, state_key};
use crate::models::{CredentialRecord, FactTable, FrameworkRecord, LookupResult, StatuteRecord};
use crate::storage::{Direction, FactQuery};
use std::collections::BTreeMap;
use tracing::instrument;

/// Columns searched by framework keywords.
const FRAMEWORK_SEARCH_COLUMNS: &[&str] = &["framework_name", "description", "keywords"];

impl Lookups {
    /// Statutes for a state, optionally filtered by a category keyword
    /// (case-insensitive substring).
    #[instrument(skip(self), fields(table = "state_statutes"))]
    pub async fn statutes(
        &self,
        state: &str,
        category: Option<&str>,
    ) -> LookupResult<Vec<StatuteRecord>> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::StateStatutes;
        let query = FactQuery::table(table.as_str())
            .eq("state_code", state)
            .contains("category", category.unwrap_or_default())
            .order_by("citation", Direction::Asc)
            .limit(self.caps.statutes);
        self.fetch_many(table, query).await
    }

    /// Credential requirements for a state, optionally for one occupation.
    ///
    /// A malformed SOC code is not-found rather than ignored.
    #[instrument(skip(self), fields(table = "credential_requirements"))]
    pub async fn credential_requirements(
        &self,
        state: &str,
        soc_code: Option<&str>,
    ) -> LookupResult<Vec<CredentialRecord>> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::CredentialRequirements;
        let mut query = FactQuery::table(table.as_str()).eq("state_code", state);
        if let Some(soc_code) = soc_code.map(str::trim).filter(|s| !s.is_empty()) {
            let Some(soc) = soc_key(soc_code) else {
                return LookupResult::not_found();
            };
            query = query.eq("soc_code", soc);
        }
        let query = query
            .order_by("credential_name", Direction::Asc)
            .limit(self.caps.credentials);
        self.fetch_many(table, query).await
    }

    /// Frameworks matching any keyword in name, description or keywords.
    ///
    /// No keywords returns the unfiltered set. Results are ordered by name.
    #[instrument(skip(self, keywords), fields(table = "frameworks", keywords = keywords.len()))]
    pub async fn frameworks<S: AsRef<str>>(&self, keywords: &[S]) -> LookupResult<Vec<FrameworkRecord>> {
        let table = FactTable::Frameworks;
        let cap = self.caps.frameworks;
        let keywords: Vec<&str> = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .collect();

        let base = || FactQuery::table(table.as_str()).order_by("framework_name", Direction::Asc);
        if keywords.is_empty() {
            return self.fetch_many(table, base().limit(cap)).await;
        }

        let mut envelope: Option<LookupResult<()>> = None;
        let mut merged: BTreeMap<String, FrameworkRecord> = BTreeMap::new();
        for keyword in keywords {
            let query = base().contains_any(FRAMEWORK_SEARCH_COLUMNS, keyword).limit(cap);
            let result: LookupResult<Vec<FrameworkRecord>> = self.fetch_many(table, query).await;
            if !result.is_found() {
                continue;
            }
            if envelope.is_none() {
                envelope = Some(result.clone().map(|_| ()));
            }
            for record in result.into_data().unwrap_or_default() {
                merged.entry(record.framework_name.clone()).or_insert(record);
            }
        }

        envelope.map_or_else(LookupResult::not_found, |envelope| {
            envelope.map(|()| merged.into_values().take(cap).collect())
        })
    }
}
