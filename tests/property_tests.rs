//! Property-based tests for resolution and citation assembly.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Resolution never panics and only yields known keys
//! - Program-name normalization is idempotent
//! - Citations are deduplicated and ordered by first occurrence

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::seeded_store;
use proptest::prelude::*;
use workfacts::freshness::SOURCES_HEADING;
use workfacts::lookups::is_valid_soc;
use workfacts::resolution::{
    OCCUPATIONS, is_known_state_code, match_program, normalize_program_name, resolve,
};
use workfacts::{FactTable, FreshnessRegistry, ProjectDescriptor, generate_citations};

fn any_table() -> impl Strategy<Value = FactTable> {
    prop::sample::select(FactTable::all().to_vec())
}

proptest! {
    /// Property: resolution of arbitrary text never panics and yields known keys.
    #[test]
    fn prop_resolution_yields_known_keys(
        geography in ".{0,80}",
        program in ".{0,80}",
        soc in prop::option::of("[0-9]{2}-[0-9]{4}|.{0,10}"),
        state in prop::option::of("[A-Za-z]{0,3}")
    ) {
        let project = ProjectDescriptor {
            geography: Some(geography),
            program_name: Some(program),
            soc_code: soc,
            institution_id: None,
            institution_state: state,
        };
        let resolution = resolve(&project);

        if let Some(state) = resolution.state.as_deref() {
            prop_assert!(is_known_state_code(state));
        }
        if let Some(occupation) = resolution.occupation.as_deref() {
            prop_assert!(is_valid_soc(occupation));
        }
    }

    /// Property: a known code token in the geography always resolves to itself.
    #[test]
    fn prop_code_token_resolves(
        prefix in "[a-z ]{0,20}",
        code in prop::sample::select(vec!["IA", "NE", "TX", "CA", "NY", "WV", "PR", "DC"])
    ) {
        let project = ProjectDescriptor::new().with_geography(format!("{prefix}, {code}"));
        let resolution = resolve(&project);
        prop_assert_eq!(resolution.state.as_deref(), Some(code));
    }

    /// Property: normalization is idempotent.
    #[test]
    fn prop_normalize_idempotent(name in "[A-Za-z0-9 ,.()&/-]{0,60}") {
        let once = normalize_program_name(&name);
        prop_assert_eq!(normalize_program_name(&once), once);
    }

    /// Property: every matched program maps to a table entry.
    #[test]
    fn prop_match_comes_from_table(name in "[a-z ]{0,40}") {
        if let Some(soc) = match_program(&normalize_program_name(&name)) {
            prop_assert!(OCCUPATIONS.iter().any(|(_, code)| *code == soc));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: one citation line per distinct table, in first-occurrence order.
    #[test]
    fn prop_citations_are_distinct_and_ordered(tables in prop::collection::vec(any_table(), 0..12)) {
        let registry = FreshnessRegistry::new(seeded_store());
        let citations = tokio_test::block_on(generate_citations(&registry, &tables));

        let mut distinct: Vec<FactTable> = Vec::new();
        for table in &tables {
            if !distinct.contains(table) {
                distinct.push(*table);
            }
        }

        if distinct.is_empty() {
            prop_assert!(citations.is_empty());
        } else {
            let lines: Vec<&str> = citations.lines().collect();
            prop_assert_eq!(lines[0], SOURCES_HEADING);
            prop_assert_eq!(lines.len(), distinct.len() + 1);

            for (line, table) in lines[1..].iter().zip(&distinct) {
                let entry = tokio_test::block_on(registry.get(table.as_str()));
                let expected = format!("- {} ", entry.citation);
                prop_assert!(line.starts_with(&expected));
            }
        }
    }
}
