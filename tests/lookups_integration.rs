//! Integration tests for lookups, the freshness registry and aggregators.
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

mod common;

use common::{FailingFactStore, SlowTableStore, seeded_lookups, seeded_store, uncited_store};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use workfacts::freshness::SOURCES_HEADING;
use workfacts::{
    Aggregators, AvailabilityRule, DataContext, FactTable, FreshnessRegistry, Lookups,
    generate_citations,
};

#[tokio::test]
async fn test_state_and_national_wages_are_distinct() {
    let lookups = seeded_lookups();

    let iowa = lookups.wages("29-2052", Some("IA")).await;
    let national = lookups.wages("29-2052", None).await;

    assert!(iowa.is_found());
    assert!(national.is_found());
    assert_eq!(iowa.data().unwrap().median_annual, 38120.0);
    assert_eq!(national.data().unwrap().median_annual, 40300.0);
    assert_eq!(iowa.citation(), "BLS Occupational Employment and Wage Statistics");
    assert_eq!(iowa.citation(), national.citation());
}

#[tokio::test]
async fn test_state_wages_do_not_fall_back_to_national() {
    let lookups = seeded_lookups();
    let nebraska = lookups.wages("29-2052", Some("NE")).await;

    assert!(!nebraska.is_found());
    assert!(nebraska.data().is_none());
    assert!(nebraska.citation().is_empty());
    assert!(nebraska.freshness().is_zero());
    assert_eq!(lookups.diagnostics().snapshot().total(), 0);
}

#[tokio::test]
async fn test_found_envelope_carries_registry_metadata() {
    let lookups = seeded_lookups();

    let visa = lookups.visa_demand("29-2052", None).await;
    assert!(visa.is_found());
    assert_eq!(visa.data().unwrap().len(), 2);
    assert!(visa.freshness().is_stale);
    assert_eq!(visa.freshness().period, "FY2024");

    let completions = lookups.program_completions(1, None).await;
    assert_eq!(completions.data().unwrap().len(), 3);
    assert_eq!(completions.data_context(), DataContext::CreditOnly);
    assert_eq!(completions.source_url(), Some("https://nces.ed.gov/ipeds/"));

    let health = lookups.program_completions(1, Some("51")).await;
    assert_eq!(health.data().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_keys_are_not_found_without_querying() {
    let store = Arc::new(FailingFactStore::new());
    let lookups = Lookups::new(Arc::clone(&store) as Arc<dyn workfacts::FactStore>);

    assert!(!lookups.wages("not-a-soc", Some("IA")).await.is_found());
    assert!(!lookups.skills("", None).await.is_found());
    assert_eq!(store.failures.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transport_failures_degrade_to_not_found() {
    let store = Arc::new(FailingFactStore::new());
    let lookups = Lookups::new(Arc::clone(&store) as Arc<dyn workfacts::FactStore>);

    let (wages, statutes, frameworks) = tokio::join!(
        lookups.wages("29-2052", Some("IA")),
        lookups.statutes("IA", None),
        lookups.frameworks(&["pharmacy"])
    );

    assert!(!wages.is_found());
    assert!(!statutes.is_found());
    assert!(!frameworks.is_found());

    let diagnostics = lookups.diagnostics().snapshot();
    assert_eq!(diagnostics.transport, 3);
    assert_eq!(diagnostics.total(), 3);
    assert_eq!(store.failures.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_deadline_expiry_degrades_to_not_found() {
    let store = Arc::new(SlowTableStore::new("occupation_wages", Duration::from_millis(400)));
    let lookups = Lookups::new(store).with_deadline(Some(Duration::from_millis(50)));

    let (wages, projections) = tokio::join!(
        lookups.wages("29-2052", Some("IA")),
        lookups.projections("29-2052", Some("IA"))
    );

    assert!(!wages.is_found());
    assert!(projections.is_found());
    let diagnostics = lookups.diagnostics().snapshot();
    assert_eq!(diagnostics.timeout, 1);
    assert_eq!(diagnostics.transport, 0);
}

#[tokio::test]
async fn test_data_without_citation_is_dropped() {
    let lookups = Lookups::new(uncited_store());
    let wages = lookups.wages("29-2052", Some("IA")).await;

    assert!(!wages.is_found());
    assert_eq!(lookups.diagnostics().snapshot().missing_citation, 1);
}

#[tokio::test]
async fn test_freshness_reads_are_idempotent_and_isolated() {
    let registry = FreshnessRegistry::new(seeded_store());

    let wages = registry.get("occupation_wages").await;
    let statutes = registry.get("state_statutes").await;
    let wages_again = registry.get("occupation_wages").await;

    assert_eq!(wages, wages_again);
    assert_eq!(wages.citation, "BLS Occupational Employment and Wage Statistics");
    assert_eq!(statutes.citation, "State legislative codes");
    assert_eq!(registry.cached_len(), 2);
}

#[tokio::test]
async fn test_citations_follow_first_occurrence_and_skip_duplicates() {
    let registry = FreshnessRegistry::new(seeded_store());
    let tables = [
        "state_statutes",
        "occupation_wages",
        "state_statutes",
        "not_a_table",
        "occupation_wages",
    ];

    let first = generate_citations(&registry, tables).await;
    let second = generate_citations(&registry, tables).await;

    assert_eq!(first, second);
    let lines: Vec<&str> = first.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], SOURCES_HEADING);
    assert_eq!(lines[1], "- State legislative codes (2025 session)");
    assert!(lines[2].starts_with("- BLS Occupational Employment and Wage Statistics (May 2024)"));
    assert_eq!(
        lines[2],
        "- BLS Occupational Employment and Wage Statistics (May 2024) — https://www.bls.gov/oes/"
    );
}

#[tokio::test]
async fn test_no_citable_tables_yield_empty_citations() {
    let registry = FreshnessRegistry::new(uncited_store());
    let citations = generate_citations(&registry, [FactTable::OccupationWages]).await;
    assert!(citations.is_empty());
}

#[tokio::test]
async fn test_brief_tables_used_match_found_lookups() {
    let aggregators = Aggregators::new(seeded_lookups());
    let brief = aggregators
        .occupation_brief("29-2052", Some("IA"), AvailabilityRule::AnyCore)
        .await;

    let found: Vec<FactTable> = [
        (brief.wages.is_found(), FactTable::OccupationWages),
        (brief.projections.is_found(), FactTable::OccupationProjections),
        (brief.skills.is_found(), FactTable::OccupationSkills),
        (brief.visa_demand.is_found(), FactTable::VisaDemand),
        (brief.state_priority.is_found(), FactTable::StatePriorityOccupations),
    ]
    .into_iter()
    .filter_map(|(found, table)| found.then_some(table))
    .collect();

    assert_eq!(brief.tables_used, found);
    assert!(!brief.tables_used.contains(&FactTable::VisaDemand));
}

#[tokio::test]
async fn test_service_area_sums_reporting_counties() {
    let aggregators = Aggregators::new(seeded_lookups());
    let economy = aggregators.service_area_economy(1).await;
    let economy = economy.data().expect("service area found");

    assert_eq!(economy.counties.len(), 3);
    assert_eq!(economy.counties_with_demographics, 2);
    assert_eq!(economy.total_population, 230_000 + 155_000);
    assert_eq!(economy.avg_median_household_income, Some(71000.0));
    assert_eq!(
        economy.total_employees,
        economy.top_industries.iter().map(|i| i.employees).sum::<i64>()
    );
    assert_eq!(economy.top_industries[0].naics_code, "62");
    assert_eq!(economy.top_industries[0].employees, 40_000);
    assert!(economy.top_employers.iter().all(|e| e.county_fips != "19153"));
}

#[tokio::test]
async fn test_service_area_requires_counties() {
    let aggregators = Aggregators::new(seeded_lookups());
    assert!(!aggregators.service_area_economy(2).await.is_found());
    assert!(!aggregators.service_area_economy(404).await.is_found());
}

#[tokio::test]
async fn test_wage_gap_between_instructor_and_practitioner() {
    let aggregators = Aggregators::new(seeded_lookups());

    let gap = aggregators.wage_gap("29-2052", "25-1071", Some("IA")).await;
    let gap = gap.data().expect("gap computed");
    assert_eq!(gap.gap, 92000.0 - 38120.0);
    assert_eq!(gap.gap_percent, 59);
    assert!(!gap.a_pays_more);
    assert_eq!(gap.area, "IA");

    let missing = aggregators.wage_gap("29-2052", "47-2111", None).await;
    assert!(!missing.is_found());
}

#[test]
fn test_lookups_from_a_sync_context() {
    let lookups = seeded_lookups();
    let priority = tokio_test::block_on(lookups.state_priority("29-2052", "IA"));

    let record = priority.data().expect("priority found");
    assert_eq!(record.priority_level, "high-demand");
    assert!(record.wioa_eligible);
}
