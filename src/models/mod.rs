//! Data models for workfacts.
//!
//! Fact records, the lookup envelope, the fact table catalogue, the project
//! descriptor and the aggregate views.

mod envelope;
mod facts;
mod project;
mod tables;
mod views;

pub use envelope::{Freshness, FreshnessEntry, LookupResult};
pub use facts::{
    CompletionRecord, CountyDemographics, CredentialRecord, EmployerRecord, FrameworkRecord,
    IndustryEmployment, InstitutionRecord, PriorityRecord, ProjectionRecord, ServiceCounty,
    SkillRecord, StateDemographics, StatuteRecord, VisaDemandRecord, WageRecord,
};
pub use project::ProjectDescriptor;
pub use tables::{DataContext, FactTable};
pub use views::{
    AvailabilityRule, IndustryRank, IndustryReconciliation, OccupationBrief, ReconciledIndustry,
    ServiceAreaEconomy, WageGap,
};
