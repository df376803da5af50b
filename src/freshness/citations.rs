//! Citation assembly.

use super::registry::FreshnessRegistry;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Heading of the assembled citation section.
pub const SOURCES_HEADING: &str = "## Sources";

/// Builds the sources section for a set of fact tables.
///
/// Each distinct table is looked up once, in first-occurrence order. Tables with
/// no registered citation are skipped. Returns an empty string when nothing is
/// citable.
///
/// Line format: `- {citation} ({period})`, followed by ` — {url}` when the
/// entry has a source URL.
pub async fn generate_citations<I>(registry: &FreshnessRegistry, tables: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for table in tables {
        let table = table.as_ref().trim();
        if table.is_empty() || !seen.insert(table.to_string()) {
            continue;
        }

        let entry = registry.get(table).await;
        if !entry.has_citation() {
            continue;
        }

        let mut line = format!("- {} ({})", entry.citation.trim(), entry.period);
        if let Some(url) = entry.source_url.as_deref().filter(|u| !u.is_empty()) {
            let _ = write!(line, " — {url}");
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("{SOURCES_HEADING}\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FactTable;
    use crate::storage::SqliteFactStore;
    use std::sync::Arc;

    fn registry() -> FreshnessRegistry {
        let store = SqliteFactStore::in_memory().unwrap();
        store
            .execute_batch(
                "INSERT INTO data_freshness VALUES
                 ('occupation_wages', 'May 2024', NULL, 0, 'BLS OEWS', 'https://www.bls.gov/oes/'),
                 ('state_statutes', '', NULL, 0, 'State legislative codes', NULL),
                 ('frameworks', '2024', NULL, 0, '', NULL);",
            )
            .unwrap();
        FreshnessRegistry::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_formats_lines() {
        let registry = registry();
        let out = generate_citations(
            &registry,
            [FactTable::OccupationWages, FactTable::StateStatutes],
        )
        .await;

        assert_eq!(
            out,
            "## Sources\n- BLS OEWS (May 2024) — https://www.bls.gov/oes/\n- State legislative codes ()"
        );
    }

    #[tokio::test]
    async fn test_skips_uncited_and_deduplicates() {
        let registry = registry();
        let out = generate_citations(
            &registry,
            ["frameworks", "occupation_wages", "occupation_wages", "visa_demand"],
        )
        .await;

        assert_eq!(out.matches("BLS OEWS").count(), 1);
        assert!(!out.contains("2024)\n"));
        assert_eq!(out.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_is_empty() {
        let registry = registry();
        assert!(generate_citations(&registry, Vec::<String>::new()).await.is_empty());
        assert!(generate_citations(&registry, ["visa_demand"]).await.is_empty());
    }
}
