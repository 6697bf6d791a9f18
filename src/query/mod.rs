//! Query construction.
//!
//! Pure functions mapping a (field, value) pair to an engine query document.
//! The engine uses different query shapes for numeric and string values: exact
//! equality for numbers, case-folded substring matching for everything else.
//! The branch is decided by the runtime type of the value, not by any schema.

use serde_json::{json, Value};

/// Field searched when the caller names none.
pub const DEFAULT_SEARCH_FIELD: &str = "full_name";

/// Field grouped when the caller names none.
pub const DEFAULT_DUPLICATES_FIELD: &str = "email";

/// Build the match condition for one field.
///
/// Numeric values get a `term` query against the field itself. Any other
/// value is rendered to text, lower-cased, and wrapped in wildcard markers for
/// a substring match against the field's raw `keyword` representation.
///
/// Field names are never validated against the record schema; an unknown
/// field simply yields a query that matches nothing.
pub fn build_search_query(field: &str, value: &Value) -> Value {
    match value {
        Value::Number(number) => json!({
            "term": { field: number.clone() }
        }),
        other => {
            let text = match other {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            };
            let keyword_field = format!("{}.keyword", field);
            json!({
                "wildcard": {
                    keyword_field: { "value": format!("*{}*", text.to_lowercase()) }
                }
            })
        }
    }
}

/// Build a duplicate-detection aggregation for one field.
///
/// A terms aggregation over the field's raw `keyword` representation,
/// restricted to buckets holding at least two documents. Filtering happens
/// engine-side; callers never see singleton groups.
pub fn build_duplicates_aggregation(field: &str) -> Value {
    let keyword_field = format!("{}.keyword", field);
    json!({
        "terms": {
            "field": keyword_field,
            "min_doc_count": 2
        }
    })
}
