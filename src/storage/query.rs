//! The fact store query interface.
//!
//! A query names one table, a conjunction of predicates, an optional ordering and
//! an optional limit. Stores return zero or more rows or raise a transport error;
//! they never interpret "no rows" as an error.

use crate::Result;
use serde_json::Value;

/// A fact store row: column name to JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Trait for fact store backends.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn FactStore>`
/// - Use interior mutability (e.g., `Mutex<Connection>`) for connection state
/// - Bind all predicate values; never interpolate them into SQL
/// - `Contains` predicates are case-insensitive substring matches
pub trait FactStore: Send + Sync {
    /// Returns the backend name for metrics labels.
    fn backend_name(&self) -> &'static str;

    /// Runs a query.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the query is malformed.
    fn query(&self, query: &FactQuery) -> Result<Vec<Row>>;
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// One ordering term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to order by.
    pub column: String,
    /// Direction.
    pub direction: Direction,
}

/// A filter predicate. All predicates in a query are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`.
    Eq(String, Value),
    /// `column != value`.
    Ne(String, Value),
    /// Case-insensitive substring match on one column.
    Contains(String, String),
    /// Case-insensitive substring match on any of several columns.
    ContainsAny(Vec<String>, String),
    /// Prefix match (`column LIKE 'value%'`).
    StartsWith(String, String),
    /// `column IN (values)`. An empty list matches nothing.
    In(String, Vec<Value>),
}

/// A fact store query.
#[derive(Debug, Clone, PartialEq)]
pub struct FactQuery {
    /// Table to read.
    pub table: String,
    /// Conjunction of predicates.
    pub predicates: Vec<Predicate>,
    /// Ordering terms, applied in order.
    pub order_by: Vec<OrderBy>,
    /// Maximum number of rows.
    pub limit: Option<usize>,
}

impl FactQuery {
    /// Starts a query against a table.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            predicates: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Adds an equality predicate.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Eq(column.to_string(), value.into()));
        self
    }

    /// Adds an inequality predicate.
    #[must_use]
    pub fn ne(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Ne(column.to_string(), value.into()));
        self
    }

    /// Adds a case-insensitive substring predicate. Empty needles are ignored.
    #[must_use]
    pub fn contains(mut self, column: &str, needle: &str) -> Self {
        let needle = needle.trim();
        if !needle.is_empty() {
            self.predicates
                .push(Predicate::Contains(column.to_string(), needle.to_string()));
        }
        self
    }

    /// Adds a substring predicate over several columns. Empty needles are ignored.
    #[must_use]
    pub fn contains_any(mut self, columns: &[&str], needle: &str) -> Self {
        let needle = needle.trim();
        if !needle.is_empty() && !columns.is_empty() {
            self.predicates.push(Predicate::ContainsAny(
                columns.iter().map(|c| (*c).to_string()).collect(),
                needle.to_string(),
            ));
        }
        self
    }

    /// Adds a prefix predicate. Empty prefixes are ignored.
    #[must_use]
    pub fn starts_with(mut self, column: &str, prefix: &str) -> Self {
        let prefix = prefix.trim();
        if !prefix.is_empty() {
            self.predicates
                .push(Predicate::StartsWith(column.to_string(), prefix.to_string()));
        }
        self
    }

    /// Adds a containment predicate.
    #[must_use]
    pub fn is_in<V: Into<Value>>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.predicates.push(Predicate::In(
            column.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Adds an ordering term.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_collects_predicates() {
        let query = FactQuery::table("occupation_wages")
            .eq("soc_code", "29-2052")
            .eq("state_code", "IA")
            .ne("area_kind", "msa")
            .order_by("median_annual", Direction::Desc)
            .limit(1);

        assert_eq!(query.table, "occupation_wages");
        assert_eq!(
            query.predicates,
            vec![
                Predicate::Eq("soc_code".to_string(), json!("29-2052")),
                Predicate::Eq("state_code".to_string(), json!("IA")),
                Predicate::Ne("area_kind".to_string(), json!("msa")),
            ]
        );
        assert_eq!(query.limit, Some(1));
        assert_eq!(query.order_by[0].direction, Direction::Desc);
    }

    #[test]
    fn test_empty_substring_filters_are_dropped() {
        let query = FactQuery::table("state_statutes")
            .contains("category", "   ")
            .contains_any(&["title"], "")
            .starts_with("naics_code", "");
        assert!(query.predicates.is_empty());
    }
}
