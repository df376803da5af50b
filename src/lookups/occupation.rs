//! Occupation-keyed lookups.

use super::Lookups;
use super::keys::{scope_key, soc_key, state_key};
use crate::models::{
    FactTable, LookupResult, PriorityRecord, ProjectionRecord, SkillRecord, VisaDemandRecord,
    WageRecord,
};
use crate::storage::{Direction, FactQuery};
use tracing::instrument;

impl Lookups {
    /// Wage estimates for an occupation, in a state or nationally.
    ///
    /// A state-scoped call only matches that state's row; it never falls back to
    /// the national estimate.
    #[instrument(skip(self), fields(table = "occupation_wages"))]
    pub async fn wages(&self, soc_code: &str, state: Option<&str>) -> LookupResult<WageRecord> {
        let (Some(soc), Some(scope)) = (soc_key(soc_code), scope_key(state)) else {
            return LookupResult::not_found();
        };
        let table = FactTable::OccupationWages;
        let query = FactQuery::table(table.as_str())
            .eq("soc_code", soc)
            .eq("state_code", scope)
            .limit(1);
        self.fetch_one(table, query).await
    }

    /// Employment projections for an occupation, in a state or nationally.
    #[instrument(skip(self), fields(table = "occupation_projections"))]
    pub async fn projections(
        &self,
        soc_code: &str,
        state: Option<&str>,
    ) -> LookupResult<ProjectionRecord> {
        let (Some(soc), Some(scope)) = (soc_key(soc_code), scope_key(state)) else {
            return LookupResult::not_found();
        };
        let table = FactTable::OccupationProjections;
        let query = FactQuery::table(table.as_str())
            .eq("soc_code", soc)
            .eq("state_code", scope)
            .order_by("projected_year", Direction::Desc)
            .limit(1);
        self.fetch_one(table, query).await
    }

    /// Most important skills for an occupation, optionally narrowed by category.
    ///
    /// Ordered by importance descending, then element id.
    #[instrument(skip(self), fields(table = "occupation_skills"))]
    pub async fn skills(
        &self,
        soc_code: &str,
        category: Option<&str>,
    ) -> LookupResult<Vec<SkillRecord>> {
        let Some(soc) = soc_key(soc_code) else {
            return LookupResult::not_found();
        };
        let table = FactTable::OccupationSkills;
        let query = FactQuery::table(table.as_str())
            .eq("soc_code", soc)
            .contains("category", category.unwrap_or_default())
            .order_by("importance", Direction::Desc)
            .order_by("element_id", Direction::Asc)
            .limit(self.caps.skills);
        self.fetch_many(table, query).await
    }

    /// Labor certification demand, most recent fiscal year first.
    #[instrument(skip(self), fields(table = "visa_demand"))]
    pub async fn visa_demand(
        &self,
        soc_code: &str,
        state: Option<&str>,
    ) -> LookupResult<Vec<VisaDemandRecord>> {
        let (Some(soc), Some(scope)) = (soc_key(soc_code), scope_key(state)) else {
            return LookupResult::not_found();
        };
        let table = FactTable::VisaDemand;
        let query = FactQuery::table(table.as_str())
            .eq("soc_code", soc)
            .eq("state_code", scope)
            .order_by("fiscal_year", Direction::Desc)
            .limit(self.caps.visa);
        self.fetch_many(table, query).await
    }

    /// State priority designation. Requires a state.
    #[instrument(skip(self), fields(table = "state_priority_occupations"))]
    pub async fn state_priority(&self, soc_code: &str, state: &str) -> LookupResult<PriorityRecord> {
        let (Some(soc), Some(state)) = (soc_key(soc_code), state_key(state)) else {
            return LookupResult::not_found();
        };
        let table = FactTable::StatePriorityOccupations;
        let query = FactQuery::table(table.as_str())
            .eq("soc_code", soc)
            .eq("state_code", state)
            .limit(1);
        self.fetch_one(table, query).await
    }
}
