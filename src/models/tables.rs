//! Fact table catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which slice of the education market a fact table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataContext {
    /// Facts only meaningful for credit-bearing programs.
    CreditOnly,
    /// Facts relevant to noncredit and workforce programs.
    NoncreditRelevant,
    /// Facts that apply regardless of program type.
    #[default]
    All,
}

impl DataContext {
    /// Returns the context as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditOnly => "credit_only",
            Self::NoncreditRelevant => "noncredit_relevant",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DataContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An independently sourced fact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactTable {
    /// Occupational wage estimates by state and nation.
    OccupationWages,
    /// Ten-year employment projections.
    OccupationProjections,
    /// Skill, knowledge and ability ratings per occupation.
    OccupationSkills,
    /// Foreign labor certification demand.
    VisaDemand,
    /// State in-demand / priority occupation designations.
    StatePriorityOccupations,
    /// Institution profiles.
    Institutions,
    /// Counties assigned to each institution's service area.
    InstitutionCounties,
    /// Program completions by institution.
    ProgramCompletions,
    /// Employer establishments by county.
    RegionalEmployers,
    /// Industry employment counts by county.
    CountyIndustryEmployment,
    /// County demographic profiles.
    CountyDemographics,
    /// State demographic profiles.
    StateDemographics,
    /// State statutes relevant to workforce education.
    StateStatutes,
    /// State licensure and credential requirements.
    CredentialRequirements,
    /// Competency and skills frameworks.
    Frameworks,
}

impl FactTable {
    /// Returns all fact tables.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::OccupationWages,
            Self::OccupationProjections,
            Self::OccupationSkills,
            Self::VisaDemand,
            Self::StatePriorityOccupations,
            Self::Institutions,
            Self::InstitutionCounties,
            Self::ProgramCompletions,
            Self::RegionalEmployers,
            Self::CountyIndustryEmployment,
            Self::CountyDemographics,
            Self::StateDemographics,
            Self::StateStatutes,
            Self::CredentialRequirements,
            Self::Frameworks,
        ]
    }

    /// Returns the storage table name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OccupationWages => "occupation_wages",
            Self::OccupationProjections => "occupation_projections",
            Self::OccupationSkills => "occupation_skills",
            Self::VisaDemand => "visa_demand",
            Self::StatePriorityOccupations => "state_priority_occupations",
            Self::Institutions => "institutions",
            Self::InstitutionCounties => "institution_counties",
            Self::ProgramCompletions => "program_completions",
            Self::RegionalEmployers => "regional_employers",
            Self::CountyIndustryEmployment => "county_industry_employment",
            Self::CountyDemographics => "county_demographics",
            Self::StateDemographics => "state_demographics",
            Self::StateStatutes => "state_statutes",
            Self::CredentialRequirements => "credential_requirements",
            Self::Frameworks => "frameworks",
        }
    }

    /// Parses a table from its storage name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|table| table.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Returns the program context the table's facts apply to.
    #[must_use]
    pub const fn data_context(&self) -> DataContext {
        match self {
            Self::ProgramCompletions | Self::Institutions | Self::InstitutionCounties => {
                DataContext::CreditOnly
            },
            Self::OccupationSkills
            | Self::StatePriorityOccupations
            | Self::CredentialRequirements
            | Self::Frameworks => DataContext::NoncreditRelevant,
            Self::OccupationWages
            | Self::OccupationProjections
            | Self::VisaDemand
            | Self::RegionalEmployers
            | Self::CountyIndustryEmployment
            | Self::CountyDemographics
            | Self::StateDemographics
            | Self::StateStatutes => DataContext::All,
        }
    }
}

impl AsRef<str> for FactTable {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FactTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for table in FactTable::all() {
            assert_eq!(FactTable::parse(table.as_str()), Some(*table));
        }
        assert_eq!(FactTable::parse("  OCCUPATION_WAGES "), Some(FactTable::OccupationWages));
        assert_eq!(FactTable::parse("data_freshness"), None);
    }

    #[test]
    fn test_data_context() {
        assert_eq!(
            FactTable::ProgramCompletions.data_context(),
            DataContext::CreditOnly
        );
        assert_eq!(
            FactTable::Frameworks.data_context(),
            DataContext::NoncreditRelevant
        );
        assert_eq!(FactTable::OccupationWages.data_context(), DataContext::All);
        assert_eq!(DataContext::NoncreditRelevant.to_string(), "noncredit_relevant");
    }
}
