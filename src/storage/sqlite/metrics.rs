//! Metrics recording for fact store queries.

use std::time::Instant;

/// Records a fact store query.
///
/// Emits `fact_store_queries_total{backend,table,status}` and
/// `fact_store_query_duration_ms{backend,table}`.
pub fn record_query_metrics(
    backend: &'static str,
    table: &str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "fact_store_queries_total",
        "backend" => backend,
        "table" => table.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "fact_store_query_duration_ms",
        "backend" => backend,
        "table" => table.to_string()
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}
