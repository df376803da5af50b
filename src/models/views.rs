//! Aggregate views composed from several lookups.

use super::envelope::LookupResult;
use super::facts::{
    EmployerRecord, PriorityRecord, ProjectionRecord, ServiceCounty, SkillRecord,
    VisaDemandRecord, WageRecord,
};
use super::tables::FactTable;
use serde::{Deserialize, Serialize};

/// Whether an occupation brief counts as available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityRule {
    /// Available when wages OR projections were found.
    #[default]
    AnyCore,
    /// Available only when wages AND projections were found.
    AllCore,
}

impl AvailabilityRule {
    /// Applies the rule to the two core sub-lookups.
    #[must_use]
    pub const fn evaluate(self, wages_found: bool, projections_found: bool) -> bool {
        match self {
            Self::AnyCore => wages_found || projections_found,
            Self::AllCore => wages_found && projections_found,
        }
    }

    /// Parses a rule name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" | "any_core" | "or" => Some(Self::AnyCore),
            "all" | "all_core" | "and" => Some(Self::AllCore),
            _ => None,
        }
    }
}

/// Wage comparison between two occupations in the same area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageGap {
    /// First occupation (usually the industry occupation).
    pub occupation_a: String,
    /// Second occupation (usually the instructor occupation).
    pub occupation_b: String,
    /// Title of the first occupation.
    pub title_a: String,
    /// Title of the second occupation.
    pub title_b: String,
    /// Median annual wage of the first occupation.
    pub median_a: f64,
    /// Median annual wage of the second occupation.
    pub median_b: f64,
    /// Absolute difference between the medians.
    pub gap: f64,
    /// Gap as a percentage of the second median, rounded to an integer.
    pub gap_percent: i64,
    /// Whether the first occupation pays more.
    pub a_pays_more: bool,
    /// Area code the comparison was made in (`US` when national).
    pub area: String,
}

/// Everything known about one occupation in one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationBrief {
    /// SOC code.
    pub soc_code: String,
    /// State scope, if any.
    pub state_code: Option<String>,
    /// Wage lookup.
    pub wages: LookupResult<WageRecord>,
    /// Projection lookup.
    pub projections: LookupResult<ProjectionRecord>,
    /// Skills lookup.
    pub skills: LookupResult<Vec<SkillRecord>>,
    /// Visa demand lookup.
    pub visa_demand: LookupResult<Vec<VisaDemandRecord>>,
    /// State priority lookup.
    pub state_priority: LookupResult<PriorityRecord>,
    /// Paired instructor occupation, when one is known.
    pub instructor_soc: Option<String>,
    /// Industry vs. instructor wage gap, when a pairing is known.
    pub wage_gap: Option<LookupResult<WageGap>>,
    /// Availability under `availability_rule`.
    pub available: bool,
    /// Rule used to compute `available`.
    pub availability_rule: AvailabilityRule,
    /// Tables whose sub-lookup returned data.
    pub tables_used: Vec<FactTable>,
}

/// One industry in a service-area ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRank {
    /// NAICS code.
    pub naics_code: String,
    /// Industry title.
    pub industry_title: String,
    /// Employees summed across the service-area counties.
    pub employees: i64,
    /// Establishments summed across the service-area counties.
    pub establishments: i64,
}

/// Economic rollup for an institution's service-area counties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAreaEconomy {
    /// Institution identifier.
    pub institution_id: i64,
    /// Institution name.
    pub institution_name: String,
    /// Institution state.
    pub state_code: String,
    /// Service-area counties.
    pub counties: Vec<ServiceCounty>,
    /// Counties that had a demographics record.
    pub counties_with_demographics: usize,
    /// Total population across counties.
    pub total_population: i64,
    /// Mean median household income across reporting counties.
    pub avg_median_household_income: Option<f64>,
    /// Mean poverty rate across reporting counties.
    pub avg_poverty_rate: Option<f64>,
    /// Mean bachelor's-or-higher share across reporting counties.
    pub avg_bachelors_or_higher_pct: Option<f64>,
    /// Mean unemployment rate across reporting counties.
    pub avg_unemployment_rate: Option<f64>,
    /// Industries ranked by employees, descending; ties by NAICS code ascending.
    pub top_industries: Vec<IndustryRank>,
    /// Sum of `employees` across `top_industries`.
    pub total_employees: i64,
    /// Number of employer records in the service area.
    pub employer_count: usize,
    /// Largest employers in the service area.
    pub top_employers: Vec<EmployerRecord>,
    /// Tables that contributed data.
    pub tables_used: Vec<FactTable>,
}

impl ServiceAreaEconomy {
    /// Returns true if any county demographics were found.
    #[must_use]
    pub const fn has_demographics(&self) -> bool {
        self.counties_with_demographics > 0
    }
}

/// Reconciliation of one industry across two sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledIndustry {
    /// NAICS code.
    pub naics_code: String,
    /// Industry title.
    pub industry_title: String,
    /// Employees reported by the industry employment table.
    pub reported_employees: i64,
    /// Employees summed from employer records.
    pub employer_employees: i64,
    /// `employer_employees / reported_employees * 100`, one decimal.
    pub coverage_percent: f64,
    /// Whether the sources disagree by more than the discrepancy threshold.
    pub discrepancy: bool,
}

/// Cross-source industry employment reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryReconciliation {
    /// State scope.
    pub state_code: String,
    /// Per-industry rows, ordered like the industry table ranking.
    pub industries: Vec<ReconciledIndustry>,
    /// Total employees in the industry table.
    pub reported_total: i64,
    /// Total employees matched from employer records.
    pub employer_total: i64,
    /// Overall coverage, one decimal.
    pub coverage_percent: f64,
    /// Number of industries flagged as discrepant.
    pub discrepancy_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_rule() {
        assert!(AvailabilityRule::AnyCore.evaluate(true, false));
        assert!(AvailabilityRule::AnyCore.evaluate(false, true));
        assert!(!AvailabilityRule::AnyCore.evaluate(false, false));
        assert!(AvailabilityRule::AllCore.evaluate(true, true));
        assert!(!AvailabilityRule::AllCore.evaluate(true, false));
        assert!(!AvailabilityRule::AllCore.evaluate(false, true));
    }

    #[test]
    fn test_availability_rule_parse() {
        assert_eq!(AvailabilityRule::parse("ANY"), Some(AvailabilityRule::AnyCore));
        assert_eq!(AvailabilityRule::parse("all_core"), Some(AvailabilityRule::AllCore));
        assert_eq!(AvailabilityRule::parse("sometimes"), None);
        assert_eq!(AvailabilityRule::default(), AvailabilityRule::AnyCore);
    }
}
