//! Context build options and output.

use crate::models::{
    AvailabilityRule, CompletionRecord, CredentialRecord, FactTable, FrameworkRecord,
    InstitutionRecord, LookupResult, OccupationBrief, ServiceAreaEconomy, StateDemographics,
    StatuteRecord,
};
use crate::resolution::Resolution;
use serde::{Deserialize, Serialize};

/// Which sections a context build fetches. Every section is on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Occupation brief and wage gap.
    pub include_occupation: bool,
    /// Institution profile, service area rollup and completions.
    pub include_institution: bool,
    /// State statutes.
    pub include_statutes: bool,
    /// Credential requirements.
    pub include_credentials: bool,
    /// Statewide demographics, when the service area did not supply any.
    pub include_demographics: bool,
    /// Framework search.
    pub include_frameworks: bool,
    /// Framework keywords; falls back to the program name and configured
    /// defaults when empty.
    pub framework_keywords: Vec<String>,
    /// Statute category filter.
    pub statute_category: Option<String>,
    /// Availability rule for the occupation brief.
    pub availability_rule: AvailabilityRule,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            include_occupation: true,
            include_institution: true,
            include_statutes: true,
            include_credentials: true,
            include_demographics: true,
            include_frameworks: true,
            framework_keywords: Vec::new(),
            statute_category: None,
            availability_rule: AvailabilityRule::default(),
        }
    }
}

impl ContextOptions {
    /// Options with every section turned off.
    #[must_use]
    pub fn none() -> Self {
        Self {
            include_occupation: false,
            include_institution: false,
            include_statutes: false,
            include_credentials: false,
            include_demographics: false,
            include_frameworks: false,
            ..Self::default()
        }
    }
}

/// Structured sub-results of a context build. `None` means the section was
/// not requested or had no key to look up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextRaw {
    /// Resolved keys.
    pub resolution: Resolution,
    /// Occupation brief.
    pub occupation: Option<OccupationBrief>,
    /// Institution profile.
    pub institution: Option<LookupResult<InstitutionRecord>>,
    /// Service area rollup.
    pub service_area: Option<LookupResult<ServiceAreaEconomy>>,
    /// Program completions.
    pub completions: Option<LookupResult<Vec<CompletionRecord>>>,
    /// Statewide demographics.
    pub state_demographics: Option<LookupResult<StateDemographics>>,
    /// State statutes.
    pub statutes: Option<LookupResult<Vec<StatuteRecord>>>,
    /// Credential requirements.
    pub credentials: Option<LookupResult<Vec<CredentialRecord>>>,
    /// Frameworks.
    pub frameworks: Option<LookupResult<Vec<FrameworkRecord>>>,
}

/// Output of a context build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextBundle {
    /// Section-labeled text for prompt injection, sources last.
    pub prompt_block: String,
    /// Deduplicated tables that contributed data, in section order.
    pub tables_used: Vec<FactTable>,
    /// Structured sub-results.
    pub raw: ContextRaw,
    /// Assembled sources section; empty when nothing is citable.
    pub citations: String,
    /// Correlation id of the build.
    pub request_id: String,
}

impl ContextBundle {
    /// Returns true if no table contributed data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables_used.is_empty()
    }

    /// Table names, for callers that want plain strings.
    #[must_use]
    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables_used.iter().map(FactTable::as_str).collect()
    }
}
