//! Geography-keyed lookups.

use super::Lookups;
use super::keys::state_key;
use crate::models::{
    CountyDemographics, EmployerRecord, FactTable, IndustryEmployment, LookupResult,
    StateDemographics,
};
use crate::storage::{Direction, FactQuery};
use tracing::instrument;

/// NAICS code of the all-sectors total row in County Business Patterns.
const ALL_SECTORS_NAICS: &str = "00";

/// Adds a FIPS containment filter when `fips` is non-empty.
fn with_counties(query: FactQuery, fips: &[String]) -> FactQuery {
    if fips.is_empty() {
        query
    } else {
        query.is_in("county_fips", fips.iter().map(String::as_str))
    }
}

impl Lookups {
    /// Demographics for counties in a state. An empty FIPS list means every
    /// county in the state.
    #[instrument(skip(self, fips), fields(table = "county_demographics", counties = fips.len()))]
    pub async fn county_demographics(
        &self,
        state: &str,
        fips: &[String],
    ) -> LookupResult<Vec<CountyDemographics>> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::CountyDemographics;
        let query = with_counties(FactQuery::table(table.as_str()).eq("state_code", state), fips)
            .order_by("county_fips", Direction::Asc);
        self.fetch_many(table, query).await
    }

    /// Statewide demographics.
    #[instrument(skip(self), fields(table = "state_demographics"))]
    pub async fn state_demographics(&self, state: &str) -> LookupResult<StateDemographics> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::StateDemographics;
        let query = FactQuery::table(table.as_str())
            .eq("state_code", state)
            .limit(1);
        self.fetch_one(table, query).await
    }

    /// Industry employment rows for a state, optionally limited to counties.
    ///
    /// Uncapped: callers aggregate across every row. The all-sectors total row
    /// is excluded so sums count each employee once.
    #[instrument(skip(self, fips), fields(table = "county_industry_employment", counties = fips.len()))]
    pub async fn industry_employment(
        &self,
        state: &str,
        fips: &[String],
    ) -> LookupResult<Vec<IndustryEmployment>> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::CountyIndustryEmployment;
        let query = with_counties(FactQuery::table(table.as_str()).eq("state_code", state), fips)
            .ne("naics_code", ALL_SECTORS_NAICS)
            .order_by("employees", Direction::Desc)
            .order_by("naics_code", Direction::Asc);
        self.fetch_many(table, query).await
    }

    /// Largest employers in a state, optionally limited to counties and a NAICS
    /// prefix.
    #[instrument(skip(self, fips), fields(table = "regional_employers", counties = fips.len()))]
    pub async fn regional_employers(
        &self,
        state: &str,
        fips: &[String],
        naics_prefix: Option<&str>,
    ) -> LookupResult<Vec<EmployerRecord>> {
        self.employers(state, fips, naics_prefix, Some(self.caps.employers))
            .await
    }

    /// Every employer record in scope, for aggregation.
    pub(crate) async fn all_regional_employers(
        &self,
        state: &str,
        fips: &[String],
    ) -> LookupResult<Vec<EmployerRecord>> {
        self.employers(state, fips, None, None).await
    }

    async fn employers(
        &self,
        state: &str,
        fips: &[String],
        naics_prefix: Option<&str>,
        cap: Option<usize>,
    ) -> LookupResult<Vec<EmployerRecord>> {
        let Some(state) = state_key(state) else {
            return LookupResult::not_found();
        };
        let table = FactTable::RegionalEmployers;
        let mut query = with_counties(FactQuery::table(table.as_str()).eq("state_code", state), fips)
            .starts_with("naics_code", naics_prefix.unwrap_or_default())
            .order_by("employees", Direction::Desc)
            .order_by("employer_name", Direction::Asc);
        if let Some(cap) = cap {
            query = query.limit(cap);
        }
        self.fetch_many(table, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups::testing::seeded_store;

    fn lookups() -> Lookups {
        Lookups::new(seeded_store())
    }

    fn fips(codes: &[&str]) -> Vec<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_county_demographics_filtered() {
        let rows = lookups()
            .county_demographics("IA", &fips(&["19113", "19011"]))
            .await
            .into_data()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].county_name, "Linn");
    }

    #[tokio::test]
    async fn test_county_demographics_whole_state() {
        let rows = lookups().county_demographics("IA", &[]).await.into_data().unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_state_demographics() {
        let lookups = lookups();
        assert_eq!(
            lookups.state_demographics("NE").await.data().unwrap().population,
            1_970_000
        );
        assert!(!lookups.state_demographics("").await.is_found());
    }

    #[tokio::test]
    async fn test_industry_employment_order() {
        let rows = lookups()
            .industry_employment("IA", &fips(&["19113", "19103"]))
            .await
            .into_data()
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].employees, 22_000);
    }

    #[tokio::test]
    async fn test_industry_employment_skips_all_sectors_total() {
        let rows = lookups()
            .industry_employment("IA", &fips(&["19113"]))
            .await
            .into_data()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.naics_code != ALL_SECTORS_NAICS));
    }

    #[tokio::test]
    async fn test_regional_employers_naics_prefix() {
        let rows = lookups()
            .regional_employers("IA", &[], Some("6"))
            .await
            .into_data()
            .unwrap();
        assert_eq!(
            rows.iter().map(|r| r.employer_name.as_str()).collect::<Vec<_>>(),
            ["University of Iowa Health Care", "UnityPoint Health St. Luke's"]
        );
    }
}
