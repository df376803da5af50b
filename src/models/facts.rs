//! Fact records, one shape per fact domain.
//!
//! Records are decoded verbatim from fact store rows. No cross-domain shape is
//! enforced.

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes booleans stored as `0`/`1` integers, `true`/`false`, or text.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        serde_json::Value::String(s) => {
            matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "y")
        },
        _ => false,
    })
}

/// Annual wage estimates for one occupation in one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code, or `US` for national estimates.
    pub state_code: String,
    /// Occupation title.
    pub occupation_title: String,
    /// Median annual wage.
    pub median_annual: f64,
    /// Mean annual wage.
    pub mean_annual: Option<f64>,
    /// 10th percentile annual wage.
    pub pct10_annual: Option<f64>,
    /// 90th percentile annual wage.
    pub pct90_annual: Option<f64>,
    /// Estimated employment.
    pub employment: Option<i64>,
}

/// Employment projection for one occupation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code, or `US`.
    pub state_code: String,
    /// Occupation title.
    pub occupation_title: String,
    /// Base year of the projection.
    pub base_year: i64,
    /// Target year of the projection.
    pub projected_year: i64,
    /// Employment in the base year.
    pub base_employment: Option<i64>,
    /// Employment in the projected year.
    pub projected_employment: Option<i64>,
    /// Percent change over the projection window.
    pub percent_change: Option<f64>,
    /// Average annual openings.
    pub annual_openings: Option<i64>,
}

/// One skill/knowledge/ability rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// SOC code.
    pub soc_code: String,
    /// Element identifier.
    pub element_id: String,
    /// Element name, e.g. "Active Listening".
    pub element_name: String,
    /// `skill`, `knowledge` or `ability`.
    pub category: String,
    /// Importance rating (1-5).
    pub importance: f64,
    /// Level rating (0-7).
    pub level: Option<f64>,
}

/// Labor certification demand for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisaDemandRecord {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code, or `US`.
    pub state_code: String,
    /// Federal fiscal year.
    pub fiscal_year: i64,
    /// Certified applications.
    pub certified_applications: i64,
    /// Median offered wage on certified applications.
    pub median_offered_wage: Option<f64>,
}

/// State priority designation for an occupation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRecord {
    /// SOC code.
    pub soc_code: String,
    /// Two-letter state code.
    pub state_code: String,
    /// Designation level, e.g. "high-demand".
    pub priority_level: String,
    /// Program or list that designated the occupation.
    pub designation_source: String,
    /// Whether training is WIOA-fundable.
    #[serde(deserialize_with = "flexible_bool")]
    pub wioa_eligible: bool,
    /// Whether programs appear on the state ETPL.
    #[serde(deserialize_with = "flexible_bool")]
    pub etpl_listed: bool,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Institution profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    /// Internal identifier.
    pub id: i64,
    /// Institution name.
    pub name: String,
    /// City.
    pub city: Option<String>,
    /// Two-letter state code.
    pub state_code: String,
    /// IPEDS unit id.
    pub ipeds_unit_id: Option<String>,
    /// Sector, e.g. "Public, 2-year".
    pub sector: Option<String>,
    /// Total enrollment headcount.
    pub total_enrollment: Option<i64>,
    /// Website.
    pub website: Option<String>,
}

/// A county assigned to an institution's service area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCounty {
    /// Institution identifier.
    pub institution_id: i64,
    /// Five-digit county FIPS code.
    pub county_fips: String,
    /// County name.
    pub county_name: String,
    /// Two-letter state code.
    pub state_code: String,
}

/// Completions for one program at one institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Institution identifier.
    pub institution_id: i64,
    /// CIP code.
    pub cip_code: String,
    /// Program title.
    pub program_title: String,
    /// Award level, e.g. "Associate's degree".
    pub award_level: String,
    /// Number of completions.
    pub completions: i64,
    /// Academic year, e.g. "2022-23".
    pub academic_year: String,
}

/// County demographic profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyDemographics {
    /// Five-digit county FIPS code.
    pub county_fips: String,
    /// Two-letter state code.
    pub state_code: String,
    /// County name.
    pub county_name: String,
    /// Total population.
    pub population: i64,
    /// Median household income.
    pub median_household_income: Option<f64>,
    /// Poverty rate, percent.
    pub poverty_rate: Option<f64>,
    /// Adults with a bachelor's degree or higher, percent.
    pub bachelors_or_higher_pct: Option<f64>,
    /// Unemployment rate, percent.
    pub unemployment_rate: Option<f64>,
}

/// State demographic profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDemographics {
    /// Two-letter state code.
    pub state_code: String,
    /// Total population.
    pub population: i64,
    /// Median household income.
    pub median_household_income: Option<f64>,
    /// Poverty rate, percent.
    pub poverty_rate: Option<f64>,
    /// Adults with a bachelor's degree or higher, percent.
    pub bachelors_or_higher_pct: Option<f64>,
    /// Unemployment rate, percent.
    pub unemployment_rate: Option<f64>,
}

/// Employment in one industry in one county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryEmployment {
    /// Two-letter state code.
    pub state_code: String,
    /// Five-digit county FIPS code.
    pub county_fips: String,
    /// NAICS code.
    pub naics_code: String,
    /// Industry title.
    pub industry_title: String,
    /// Establishment count.
    pub establishments: Option<i64>,
    /// Employee count.
    pub employees: i64,
}

/// A single employer establishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRecord {
    /// Two-letter state code.
    pub state_code: String,
    /// Five-digit county FIPS code.
    pub county_fips: String,
    /// Employer name.
    pub employer_name: String,
    /// NAICS code.
    pub naics_code: String,
    /// Employee count.
    pub employees: i64,
}

/// A state statute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteRecord {
    /// Two-letter state code.
    pub state_code: String,
    /// Statutory citation, e.g. "Iowa Code 260C.18A".
    pub citation: String,
    /// Short title.
    pub title: String,
    /// Category, e.g. "workforce training".
    pub category: String,
    /// Summary.
    pub summary: Option<String>,
    /// Effective date.
    pub effective_date: Option<String>,
}

/// A state credential or licensure requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Two-letter state code.
    pub state_code: String,
    /// SOC code the requirement applies to.
    pub soc_code: Option<String>,
    /// Occupation title.
    pub occupation_title: String,
    /// Credential name.
    pub credential_name: String,
    /// `license`, `certification` or `registration`.
    pub credential_type: String,
    /// Issuing agency.
    pub issuing_agency: Option<String>,
    /// Renewal period.
    pub renewal_period: Option<String>,
}

/// A competency or skills framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkRecord {
    /// Framework name.
    pub framework_name: String,
    /// Framework type, e.g. "competency model".
    pub framework_type: String,
    /// Description.
    pub description: Option<String>,
    /// Comma-separated keywords.
    pub keywords: Option<String>,
    /// Publishing organization.
    pub source_organization: Option<String>,
    /// Framework URL.
    pub url: Option<String>,
}
