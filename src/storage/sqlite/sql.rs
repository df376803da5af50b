//! SQL construction for the `SQLite` fact store.
//!
//! Translates a [`FactQuery`] into a parameterized `SELECT` statement:
//! - identifiers are validated, never quoted from user input
//! - every predicate value is bound as a numbered parameter
//! - LIKE wildcards in substring needles are escaped

use crate::storage::query::{Direction, FactQuery, Predicate};
use crate::{Error, Result};
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Escapes SQL LIKE wildcards in a string to make them literal.
///
/// # Examples
///
/// ```
/// use workfacts::storage::sqlite::escape_like_wildcards;
///
/// assert_eq!(escape_like_wildcards("100%"), "100\\%");
/// assert_eq!(escape_like_wildcards("user_name"), "user\\_name");
/// assert_eq!(escape_like_wildcards("path\\file"), "path\\\\file");
/// ```
#[must_use]
pub fn escape_like_wildcards(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            },
            _ => result.push(c),
        }
    }
    result
}

/// Returns true if `name` is a plain SQL identifier.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier(name: &str) -> Result<&str> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(Error::InvalidInput(format!("invalid identifier: {name:?}")))
    }
}

/// Converts a JSON value into a bindable `SQLite` value.
#[must_use]
pub fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => n.as_i64().map_or_else(
            || SqlValue::Real(n.as_f64().unwrap_or_default()),
            SqlValue::Integer,
        ),
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Builds a parameterized `SELECT *` for a query.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the table or any column name is not a
/// plain identifier.
pub fn build_select(query: &FactQuery) -> Result<(String, Vec<SqlValue>)> {
    let table = identifier(&query.table)?;
    let mut clauses = Vec::with_capacity(query.predicates.len());
    let mut params: Vec<SqlValue> = Vec::new();

    for predicate in &query.predicates {
        match predicate {
            Predicate::Eq(column, value) => {
                params.push(to_sql_value(value));
                clauses.push(format!("{} = ?{}", identifier(column)?, params.len()));
            },
            Predicate::Ne(column, value) => {
                params.push(to_sql_value(value));
                clauses.push(format!("{} != ?{}", identifier(column)?, params.len()));
            },
            Predicate::Contains(column, needle) => {
                params.push(SqlValue::Text(like_pattern(needle)));
                clauses.push(format!(
                    "LOWER({}) LIKE ?{} ESCAPE '\\'",
                    identifier(column)?,
                    params.len()
                ));
            },
            Predicate::ContainsAny(columns, needle) => {
                params.push(SqlValue::Text(like_pattern(needle)));
                let index = params.len();
                let alternatives = columns
                    .iter()
                    .map(|c| {
                        identifier(c).map(|c| format!("LOWER({c}) LIKE ?{index} ESCAPE '\\'"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                clauses.push(format!("({})", alternatives.join(" OR ")));
            },
            Predicate::StartsWith(column, prefix) => {
                params.push(SqlValue::Text(format!("{}%", escape_like_wildcards(prefix))));
                clauses.push(format!(
                    "{} LIKE ?{} ESCAPE '\\'",
                    identifier(column)?,
                    params.len()
                ));
            },
            Predicate::In(column, values) => {
                let column = identifier(column)?;
                if values.is_empty() {
                    clauses.push("0 = 1".to_string());
                    continue;
                }
                let placeholders = values
                    .iter()
                    .map(|value| {
                        params.push(to_sql_value(value));
                        format!("?{}", params.len())
                    })
                    .collect::<Vec<_>>();
                clauses.push(format!("{column} IN ({})", placeholders.join(", ")));
            },
        }
    }

    let mut sql = format!("SELECT * FROM {table}");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    if !query.order_by.is_empty() {
        let terms = query
            .order_by
            .iter()
            .map(|term| {
                let direction = match term.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                identifier(&term.column).map(|c| format!("{c} {direction}"))
            })
            .collect::<Result<Vec<_>>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));
    }
    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    Ok((sql, params))
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", escape_like_wildcards(&needle.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("normal"), "normal");
        assert_eq!(escape_like_wildcards("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("occupation_wages"));
        assert!(is_valid_identifier("_private"));
        assert!(!is_valid_identifier("1table"));
        assert!(!is_valid_identifier("wages; DROP TABLE x"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn test_build_select_with_all_predicates() {
        let query = FactQuery::table("state_statutes")
            .eq("state_code", "IA")
            .ne("naics_code", "00")
            .contains("category", "Workforce")
            .is_in("county_fips", ["19113", "19105"])
            .order_by("citation", Direction::Asc)
            .limit(20);

        let (sql, params) = build_select(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM state_statutes WHERE state_code = ?1 AND naics_code != ?2 AND LOWER(category) LIKE ?3 ESCAPE '\\' AND county_fips IN (?4, ?5) ORDER BY citation ASC LIMIT 20"
        );
        assert_eq!(params.len(), 5);
        assert_eq!(params[2], SqlValue::Text("%workforce%".to_string()));
    }

    #[test]
    fn test_build_select_contains_any_shares_parameter() {
        let query = FactQuery::table("frameworks").contains_any(&["framework_name", "keywords"], "nurse");
        let (sql, params) = build_select(&query).unwrap();
        assert!(sql.contains("(LOWER(framework_name) LIKE ?1 ESCAPE '\\' OR LOWER(keywords) LIKE ?1 ESCAPE '\\')"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let empty: Vec<String> = Vec::new();
        let query = FactQuery::table("county_demographics").is_in("county_fips", empty);
        let (sql, params) = build_select(&query).unwrap();
        assert!(sql.ends_with("WHERE 0 = 1"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_rejects_injected_identifiers() {
        let query = FactQuery::table("frameworks").eq("name = 1 OR 1", json!(1));
        assert!(build_select(&query).is_err());

        let query = FactQuery::table("frameworks; DROP TABLE frameworks");
        assert!(build_select(&query).is_err());
    }

    #[test]
    fn test_to_sql_value() {
        assert_eq!(to_sql_value(&json!(true)), SqlValue::Integer(1));
        assert_eq!(to_sql_value(&json!(7)), SqlValue::Integer(7));
        assert_eq!(to_sql_value(&json!(2.5)), SqlValue::Real(2.5));
        assert_eq!(to_sql_value(&json!(null)), SqlValue::Null);
    }
}
