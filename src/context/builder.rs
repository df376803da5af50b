//! Context builder orchestration.

use super::format;
use super::options::{ContextBundle, ContextOptions, ContextRaw};
use crate::aggregators::Aggregators;
use crate::config::WorkfactsConfig;
use crate::freshness::{FreshnessRegistry, generate_citations};
use crate::lookups::Lookups;
use crate::models::{FactTable, LookupResult, ProjectDescriptor};
use crate::observability::{RequestContext, scope_request_context};
use crate::resolution::{normalize_program_name, resolve};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Fallback instruction emitted when no table contributed data.
pub const NO_VERIFIED_DATA: &str = "No verified data matched this project in the fact tables. \
Fall back to an alternate data source such as general web search, and mark any figures \
obtained that way as unverified.";

/// Builds verified-fact context bundles for projects.
#[derive(Clone)]
pub struct ContextBuilder {
    lookups: Lookups,
    default_framework_keywords: Vec<String>,
}

impl ContextBuilder {
    /// Creates a builder over a lookup service.
    #[must_use]
    pub fn new(lookups: Lookups) -> Self {
        Self {
            lookups,
            default_framework_keywords: WorkfactsConfig::default().default_framework_keywords,
        }
    }

    /// Creates a builder from configuration.
    #[must_use]
    pub fn from_config(lookups: Lookups, config: &WorkfactsConfig) -> Self {
        Self::new(lookups).with_default_framework_keywords(config.default_framework_keywords.clone())
    }

    /// Sets the keywords used when neither the caller nor the program name
    /// supplies any.
    #[must_use]
    pub fn with_default_framework_keywords(mut self, keywords: Vec<String>) -> Self {
        self.default_framework_keywords = keywords;
        self
    }

    /// Builds context with a fresh freshness registry.
    pub async fn build(&self, project: &ProjectDescriptor, options: &ContextOptions) -> ContextBundle {
        self.run(self.lookups.scoped(), project, options).await
    }

    /// Builds context drawing citations from a caller-owned registry.
    pub async fn build_with_registry(
        &self,
        project: &ProjectDescriptor,
        options: &ContextOptions,
        registry: Arc<FreshnessRegistry>,
    ) -> ContextBundle {
        self.run(self.lookups.clone().with_registry(registry), project, options)
            .await
    }

    async fn run(&self, lookups: Lookups, project: &ProjectDescriptor, options: &ContextOptions) -> ContextBundle {
        let context = RequestContext::new();
        let request_id = context.request_id().to_string();
        let span = tracing::info_span!("context.build", request_id = %request_id);
        let start = Instant::now();

        let bundle = scope_request_context(
            context,
            self.assemble(lookups, project, options, request_id).instrument(span),
        )
        .await;

        let outcome = if bundle.is_empty() { "no_data" } else { "with_data" };
        metrics::counter!("context_builds_total", "outcome" => outcome).increment(1);
        metrics::histogram!("context_build_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);
        tracing::info!(
            outcome,
            tables = bundle.tables_used.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Context built"
        );

        bundle
    }

    #[allow(clippy::too_many_lines)]
    async fn assemble(
        &self,
        lookups: Lookups,
        project: &ProjectDescriptor,
        options: &ContextOptions,
        request_id: String,
    ) -> ContextBundle {
        let resolution = resolve(project);
        tracing::debug!(state = ?resolution.state, occupation = ?resolution.occupation, "Resolved project");

        let aggregators = Aggregators::new(lookups.clone());
        let state = resolution.state.as_deref();
        let occupation = resolution.occupation.as_deref();
        let institution_id = project.institution_id.filter(|_| options.include_institution);
        let keywords = self.framework_keywords(project, options);
        // Default keywords only search alongside an anchored project.
        let anchored = state.is_some() || occupation.is_some() || institution_id.is_some();
        let search_frameworks =
            options.include_frameworks && (anchored || !options.framework_keywords.is_empty());

        let (brief, institution_block, statutes, credentials, frameworks) = tokio::join!(
            async {
                match occupation.filter(|_| options.include_occupation) {
                    Some(soc) => Some(aggregators.occupation_brief(soc, state, options.availability_rule).await),
                    None => None,
                }
            },
            async {
                match institution_id {
                    Some(id) => {
                        let (profile, counties, completions) = tokio::join!(
                            lookups.institution(id),
                            lookups.service_area_counties(id),
                            lookups.program_completions(id, None)
                        );
                        let economy = aggregators.service_area_rollup(&profile, counties).await;
                        Some((profile, economy, completions))
                    },
                    None => None,
                }
            },
            async {
                match state.filter(|_| options.include_statutes) {
                    Some(state) => Some(lookups.statutes(state, options.statute_category.as_deref()).await),
                    None => None,
                }
            },
            async {
                match state.filter(|_| options.include_credentials) {
                    Some(state) => Some(lookups.credential_requirements(state, occupation).await),
                    None => None,
                }
            },
            async {
                if search_frameworks {
                    Some(lookups.frameworks(&keywords).await)
                } else {
                    None
                }
            }
        );

        let (institution, service_area, completions) = match institution_block {
            Some((profile, economy, completions)) => (Some(profile), Some(economy), Some(completions)),
            None => (None, None, None),
        };

        // Statewide figures would duplicate the service area's county figures.
        let service_area_has_demographics = service_area
            .as_ref()
            .and_then(LookupResult::data)
            .is_some_and(crate::models::ServiceAreaEconomy::has_demographics);
        let state_demographics = match state {
            Some(state) if options.include_demographics && !service_area_has_demographics => {
                Some(lookups.state_demographics(state).await)
            },
            _ => None,
        };

        let raw = ContextRaw {
            resolution,
            occupation: brief,
            institution,
            service_area,
            completions,
            state_demographics,
            statutes,
            credentials,
            frameworks,
        };

        let mut sections = Sections::default();
        sections.collect(&raw);

        let citations = generate_citations(lookups.registry(), &sections.tables_used).await;
        let prompt_block = sections.render(&citations);

        ContextBundle {
            prompt_block,
            tables_used: sections.tables_used,
            raw,
            citations,
            request_id,
        }
    }

    fn framework_keywords(&self, project: &ProjectDescriptor, options: &ContextOptions) -> Vec<String> {
        if !options.framework_keywords.is_empty() {
            return options.framework_keywords.clone();
        }
        let mut keywords: Vec<String> = project
            .program_name
            .as_deref()
            .map(normalize_program_name)
            .filter(|name| !name.is_empty())
            .into_iter()
            .collect();
        keywords.extend(self.default_framework_keywords.iter().cloned());
        keywords
    }
}

/// Labeled sections and the tables behind them, in output order.
#[derive(Default)]
struct Sections {
    blocks: Vec<(&'static str, String)>,
    tables_used: Vec<FactTable>,
}

impl Sections {
    fn push(&mut self, title: &'static str, body: String, tables: &[FactTable]) {
        if body.trim().is_empty() {
            return;
        }
        self.blocks.push((title, body));
        for table in tables {
            if !self.tables_used.contains(table) {
                self.tables_used.push(*table);
            }
        }
    }

    fn collect(&mut self, raw: &ContextRaw) {
        if let Some(brief) = raw.occupation.as_ref().filter(|b| !b.tables_used.is_empty()) {
            self.push("Occupation", format::occupation_section(brief), &brief.tables_used);
        }
        if let Some(gap) = raw
            .occupation
            .as_ref()
            .and_then(|b| b.wage_gap.as_ref())
            .and_then(LookupResult::data)
        {
            self.push("Wage Gap", format::wage_gap_line(gap), &[FactTable::OccupationWages]);
        }
        if let Some(institution) = raw.institution.as_ref().and_then(LookupResult::data) {
            self.push("Institution", format::institution_line(institution), &[FactTable::Institutions]);
        }
        if let Some(economy) = raw.service_area.as_ref().and_then(LookupResult::data) {
            self.push(
                "Service Area Economy",
                format::service_area_section(economy),
                &economy.tables_used,
            );
        }
        if let Some(rows) = raw.completions.as_ref().and_then(LookupResult::data) {
            self.push(
                "Program Completions",
                format::bullets(&format::completion_lines(rows)),
                &[FactTable::ProgramCompletions],
            );
        }
        if let Some(row) = raw.state_demographics.as_ref().and_then(LookupResult::data) {
            self.push(
                "State Demographics",
                format!("- {}", format::state_demographics_line(row)),
                &[FactTable::StateDemographics],
            );
        }
        if let Some(rows) = raw.statutes.as_ref().and_then(LookupResult::data) {
            self.push(
                "State Statutes",
                format::bullets(&format::statute_lines(rows)),
                &[FactTable::StateStatutes],
            );
        }
        if let Some(rows) = raw.credentials.as_ref().and_then(LookupResult::data) {
            self.push(
                "Credential Requirements",
                format::bullets(&format::credential_lines(rows)),
                &[FactTable::CredentialRequirements],
            );
        }
        if let Some(rows) = raw.frameworks.as_ref().and_then(LookupResult::data) {
            self.push(
                "Frameworks",
                format::bullets(&format::framework_lines(rows)),
                &[FactTable::Frameworks],
            );
        }
    }

    fn render(&self, citations: &str) -> String {
        let mut parts: Vec<String> = vec!["# Verified Data".to_string()];
        if self.tables_used.is_empty() {
            parts.push(NO_VERIFIED_DATA.to_string());
        }
        for (title, body) in &self.blocks {
            parts.push(format!("## {title}\n{body}"));
        }
        if !citations.is_empty() {
            parts.push(citations.to_string());
        }
        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookups::testing::seeded_store;

    fn builder() -> ContextBuilder {
        ContextBuilder::new(Lookups::new(seeded_store()))
    }

    fn kirkwood_pharmacy() -> ProjectDescriptor {
        ProjectDescriptor::new()
            .with_geography("Cedar Rapids, IA")
            .with_program_name("Pharmacy Technician Certificate")
            .with_institution_id(1)
    }

    #[tokio::test]
    async fn test_full_build_sections_in_order() {
        let bundle = builder().build(&kirkwood_pharmacy(), &ContextOptions::default()).await;

        let headings: Vec<&str> = bundle
            .prompt_block
            .lines()
            .filter(|line| line.starts_with("## "))
            .collect();
        assert_eq!(
            headings,
            [
                "## Occupation",
                "## Wage Gap",
                "## Institution",
                "## Service Area Economy",
                "## Program Completions",
                "## State Statutes",
                "## Credential Requirements",
                "## Frameworks",
                "## Sources",
            ]
        );
        assert!(!bundle.prompt_block.contains(NO_VERIFIED_DATA));
        assert!(bundle.prompt_block.ends_with(&bundle.citations));
    }

    #[tokio::test]
    async fn test_tables_used_are_deduplicated_and_cited() {
        let bundle = builder().build(&kirkwood_pharmacy(), &ContextOptions::default()).await;

        let mut names = bundle.table_names();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);

        assert!(!bundle.tables_used.contains(&FactTable::StateDemographics));
        assert!(bundle.citations.starts_with(crate::freshness::SOURCES_HEADING));
        assert_eq!(bundle.citations.lines().count(), bundle.tables_used.len() + 1);
    }

    #[tokio::test]
    async fn test_state_demographics_when_no_service_area() {
        let project = ProjectDescriptor::new().with_geography("Omaha, Nebraska");
        let bundle = builder().build(&project, &ContextOptions::default()).await;

        assert!(bundle.tables_used.contains(&FactTable::StateDemographics));
        assert!(bundle.prompt_block.contains("## State Demographics"));
        assert!(bundle.prompt_block.contains("Neb. Rev. Stat. 85-1501"));
    }

    #[tokio::test]
    async fn test_nothing_resolvable_emits_fallback() {
        let project = ProjectDescriptor::new()
            .with_geography("Ruritania")
            .with_program_name("Underwater Basket Weaving");
        let bundle = builder().build(&project, &ContextOptions::default()).await;

        assert!(bundle.tables_used.is_empty());
        assert!(bundle.raw.frameworks.is_none());
        assert!(bundle.citations.is_empty());
        assert!(bundle.prompt_block.contains(NO_VERIFIED_DATA));
        assert!(bundle.raw.resolution.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_keywords_search_unanchored_project() {
        let project = ProjectDescriptor::new().with_geography("Ruritania");
        let options = ContextOptions {
            framework_keywords: vec!["competency".to_string()],
            ..ContextOptions::default()
        };
        let bundle = builder().build(&project, &options).await;

        assert_eq!(bundle.tables_used, vec![FactTable::Frameworks]);
        assert!(!bundle.prompt_block.contains(NO_VERIFIED_DATA));
    }

    #[tokio::test]
    async fn test_sections_can_be_suppressed() {
        let options = ContextOptions {
            include_statutes: true,
            ..ContextOptions::none()
        };
        let bundle = builder().build(&kirkwood_pharmacy(), &options).await;
        assert_eq!(bundle.tables_used, vec![FactTable::StateStatutes]);
        assert!(bundle.raw.occupation.is_none());
    }

    #[tokio::test]
    async fn test_statute_category_option() {
        let options = ContextOptions {
            include_statutes: true,
            statute_category: Some("pathways".to_string()),
            ..ContextOptions::none()
        };
        let bundle = builder().build(&kirkwood_pharmacy(), &options).await;
        let statutes = bundle.raw.statutes.unwrap().into_data().unwrap();
        assert_eq!(statutes.len(), 1);
        assert_eq!(statutes[0].citation, "Iowa Code 260H");
    }

    #[tokio::test]
    async fn test_injected_registry_is_used() {
        let store = seeded_store();
        let builder = ContextBuilder::new(Lookups::new(store.clone()));
        let registry = Arc::new(FreshnessRegistry::new(store));
        let options = ContextOptions {
            include_statutes: true,
            ..ContextOptions::none()
        };

        let _ = builder
            .build_with_registry(&kirkwood_pharmacy(), &options, Arc::clone(&registry))
            .await;
        assert_eq!(registry.cached_len(), 1);
    }

    #[test]
    fn test_framework_keywords_fallback() {
        let builder = builder().with_default_framework_keywords(vec!["workforce".to_string()]);
        let keywords = builder.framework_keywords(&kirkwood_pharmacy(), &ContextOptions::default());
        assert_eq!(keywords, ["pharmacy technician", "workforce"]);

        let options = ContextOptions {
            framework_keywords: vec!["healthcare".to_string()],
            ..ContextOptions::default()
        };
        assert_eq!(builder.framework_keywords(&kirkwood_pharmacy(), &options), ["healthcare"]);
    }
}
