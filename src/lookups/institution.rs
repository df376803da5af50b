//! Institution-keyed lookups.

use super::Lookups;
use super::keys::state_key;
use crate::models::{CompletionRecord, FactTable, InstitutionRecord, LookupResult, ServiceCounty};
use crate::storage::{Direction, FactQuery};
use tracing::instrument;

impl Lookups {
    /// Institution profile by identifier.
    #[instrument(skip(self), fields(table = "institutions"))]
    pub async fn institution(&self, institution_id: i64) -> LookupResult<InstitutionRecord> {
        let table = FactTable::Institutions;
        let query = FactQuery::table(table.as_str())
            .eq("id", institution_id)
            .limit(1);
        self.fetch_one(table, query).await
    }

    /// Institutions whose name contains `name`, optionally within a state.
    ///
    /// An empty name returns every institution in scope.
    #[instrument(skip(self), fields(table = "institutions"))]
    pub async fn find_institutions(
        &self,
        name: &str,
        state: Option<&str>,
    ) -> LookupResult<Vec<InstitutionRecord>> {
        let table = FactTable::Institutions;
        let mut query = FactQuery::table(table.as_str()).contains("name", name);
        if let Some(state) = state.map(str::trim).filter(|s| !s.is_empty()) {
            let Some(state) = state_key(state) else {
                return LookupResult::not_found();
            };
            query = query.eq("state_code", state);
        }
        let query = query
            .order_by("name", Direction::Asc)
            .limit(self.caps.institutions);
        self.fetch_many(table, query).await
    }

    /// Counties in an institution's service area, by FIPS code.
    #[instrument(skip(self), fields(table = "institution_counties"))]
    pub async fn service_area_counties(
        &self,
        institution_id: i64,
    ) -> LookupResult<Vec<ServiceCounty>> {
        let table = FactTable::InstitutionCounties;
        let query = FactQuery::table(table.as_str())
            .eq("institution_id", institution_id)
            .order_by("county_fips", Direction::Asc);
        self.fetch_many(table, query).await
    }

    /// Program completions at an institution, largest first.
    ///
    /// `cip_prefix` narrows to a CIP family, e.g. `"51"` for health professions.
    #[instrument(skip(self), fields(table = "program_completions"))]
    pub async fn program_completions(
        &self,
        institution_id: i64,
        cip_prefix: Option<&str>,
    ) -> LookupResult<Vec<CompletionRecord>> {
        let table = FactTable::ProgramCompletions;
        let query = FactQuery::table(table.as_str())
            .eq("institution_id", institution_id)
            .starts_with("cip_code", cip_prefix.unwrap_or_default())
            .order_by("completions", Direction::Desc)
            .order_by("cip_code", Direction::Asc)
            .limit(self.caps.completions);
        self.fetch_many(table, query).await
    }
}
