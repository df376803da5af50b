//! Cross-source industry employment reconciliation.

use super::service_area::rank_industries;
use super::{Aggregators, round1};
use crate::models::{IndustryReconciliation, LookupResult, ReconciledIndustry};
use std::collections::HashMap;
use tracing::instrument;

/// Relative disagreement above which an industry is flagged.
pub const DISCREPANCY_THRESHOLD: f64 = 0.25;

impl Aggregators {
    /// Compares industry employment totals with the sum of employer records.
    ///
    /// Requires industry employment rows. Missing employer records give zero
    /// coverage, not an error. An empty FIPS list covers the whole state.
    #[instrument(skip(self, fips), fields(counties = fips.len()))]
    pub async fn reconcile_industry_employment(
        &self,
        state: &str,
        fips: &[String],
    ) -> LookupResult<IndustryReconciliation> {
        let (industries, employers) = tokio::join!(
            self.lookups.industry_employment(state, fips),
            self.lookups.all_regional_employers(state, fips)
        );
        if !industries.is_found() {
            return LookupResult::not_found();
        }

        let mut employer_totals: HashMap<String, i64> = HashMap::new();
        for employer in employers.into_data().unwrap_or_default() {
            *employer_totals.entry(employer.naics_code).or_default() += employer.employees;
        }

        let state_code = state.trim().to_uppercase();
        industries.map(|rows| {
            let industries: Vec<ReconciledIndustry> = rank_industries(rows, usize::MAX)
                .into_iter()
                .map(|rank| {
                    let employer_employees =
                        employer_totals.get(&rank.naics_code).copied().unwrap_or(0);
                    ReconciledIndustry {
                        coverage_percent: coverage(employer_employees, rank.employees),
                        discrepancy: is_discrepant(rank.employees, employer_employees),
                        naics_code: rank.naics_code,
                        industry_title: rank.industry_title,
                        reported_employees: rank.employees,
                        employer_employees,
                    }
                })
                .collect();

            let reported_total = industries.iter().map(|i| i.reported_employees).sum();
            let employer_total = industries.iter().map(|i| i.employer_employees).sum();
            IndustryReconciliation {
                state_code,
                coverage_percent: coverage(employer_total, reported_total),
                discrepancy_count: industries.iter().filter(|i| i.discrepancy).count(),
                industries,
                reported_total,
                employer_total,
            }
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn coverage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn is_discrepant(reported: i64, from_employers: i64) -> bool {
    if reported <= 0 {
        return from_employers > 0;
    }
    ((reported - from_employers).abs() as f64 / reported as f64) > DISCREPANCY_THRESHOLD
}
