//! Service-area economy rollup.

use super::{Aggregators, round1};
use crate::models::{
    CountyDemographics, FactTable, IndustryEmployment, IndustryRank, InstitutionRecord,
    LookupResult, ServiceAreaEconomy, ServiceCounty,
};
use std::collections::BTreeMap;
use tracing::instrument;

/// Employers listed in a rollup.
const TOP_EMPLOYERS: usize = 10;

impl Aggregators {
    /// Rolls up demographics, industries and employers across an institution's
    /// service-area counties.
    ///
    /// Requires the institution and at least one assigned county. Counties with
    /// no demographic or employment rows contribute zero to the sums; averages
    /// are taken over the counties that report each field.
    #[instrument(skip(self))]
    pub async fn service_area_economy(&self, institution_id: i64) -> LookupResult<ServiceAreaEconomy> {
        let (institution, counties) = tokio::join!(
            self.lookups.institution(institution_id),
            self.lookups.service_area_counties(institution_id)
        );
        self.service_area_rollup(&institution, counties).await
    }

    /// Rolls up a service area from an institution profile and county list the
    /// caller already fetched.
    pub async fn service_area_rollup(
        &self,
        institution: &LookupResult<InstitutionRecord>,
        counties: LookupResult<Vec<ServiceCounty>>,
    ) -> LookupResult<ServiceAreaEconomy> {
        let lookups = &self.lookups;
        let Some(institution) = institution.data() else {
            return LookupResult::not_found();
        };
        if !counties.is_found() {
            return LookupResult::not_found();
        }
        let institution_id = institution.id;

        let fips: Vec<String> = counties
            .data()
            .map(|c| c.iter().map(|county| county.county_fips.clone()).collect())
            .unwrap_or_default();
        let state = institution.state_code.as_str();

        let (demographics, industries, employers) = tokio::join!(
            lookups.county_demographics(state, &fips),
            lookups.industry_employment(state, &fips),
            lookups.all_regional_employers(state, &fips)
        );

        let mut tables_used = vec![FactTable::Institutions, FactTable::InstitutionCounties];
        for (found, table) in [
            (demographics.is_found(), FactTable::CountyDemographics),
            (industries.is_found(), FactTable::CountyIndustryEmployment),
            (employers.is_found(), FactTable::RegionalEmployers),
        ] {
            if found {
                tables_used.push(table);
            }
        }

        let demographics = demographics.into_data().unwrap_or_default();
        let top_industries = rank_industries(
            industries.into_data().unwrap_or_default(),
            self.lookups.caps().industries,
        );
        let employers = employers.into_data().unwrap_or_default();

        counties.map(|counties| ServiceAreaEconomy {
            institution_id,
            institution_name: institution.name.clone(),
            state_code: institution.state_code.clone(),
            counties,
            counties_with_demographics: demographics.len(),
            total_population: demographics.iter().map(|d| d.population).sum(),
            avg_median_household_income: mean(&demographics, |d| d.median_household_income),
            avg_poverty_rate: mean(&demographics, |d| d.poverty_rate),
            avg_bachelors_or_higher_pct: mean(&demographics, |d| d.bachelors_or_higher_pct),
            avg_unemployment_rate: mean(&demographics, |d| d.unemployment_rate),
            total_employees: top_industries.iter().map(|i| i.employees).sum(),
            top_industries,
            employer_count: employers.len(),
            top_employers: employers.into_iter().take(TOP_EMPLOYERS).collect(),
            tables_used,
        })
    }
}

/// Sums rows per NAICS code and ranks by employees descending, then code.
pub(crate) fn rank_industries(rows: Vec<IndustryEmployment>, cap: usize) -> Vec<IndustryRank> {
    let mut by_code: BTreeMap<String, IndustryRank> = BTreeMap::new();
    for row in rows {
        let rank = by_code.entry(row.naics_code.clone()).or_insert_with(|| IndustryRank {
            naics_code: row.naics_code,
            industry_title: row.industry_title,
            employees: 0,
            establishments: 0,
        });
        rank.employees += row.employees;
        rank.establishments += row.establishments.unwrap_or(0);
    }

    let mut ranked: Vec<IndustryRank> = by_code.into_values().collect();
    ranked.sort_by(|a, b| {
        b.employees
            .cmp(&a.employees)
            .then_with(|| a.naics_code.cmp(&b.naics_code))
    });
    ranked.truncate(cap);
    ranked
}

/// Mean of a field across the counties that report it, one decimal.
#[allow(clippy::cast_precision_loss)]
fn mean(rows: &[CountyDemographics], field: impl Fn(&CountyDemographics) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = rows.iter().filter_map(field).collect();
    if values.is_empty() {
        return None;
    }
    Some(round1(values.iter().sum::<f64>() / values.len() as f64))
}
