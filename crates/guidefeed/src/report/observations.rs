//! Observation aggregation.

use indexmap::IndexSet;

use crate::normalize::{GuideTable, Row, NO_DATA};
use crate::schema::SemanticField;

/// Separator between distinct observations.
pub const OBSERVATION_SEPARATOR: &str = " | ";

/// Prefix in front of a non-empty observation list.
pub const OBSERVATION_PREFIX: &str = " --> ";

/// Whether an observation cell carries nothing worth printing.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || value == NO_DATA
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("none")
}

/// Distinct, trimmed, non-placeholder observations in first-seen order.
pub fn distinct_observations<'t>(table: &GuideTable, rows: &[&'t Row]) -> Vec<&'t str> {
    let set: IndexSet<&'t str> = rows
        .iter()
        .copied()
        .map(|row| table.value(row, SemanticField::Observation).trim())
        .filter(|value| !is_placeholder(value))
        .collect();
    set.into_iter().collect()
}

/// Join the distinct observations of `rows` for display.
///
/// Returns `placeholder` when there is nothing to show, never a bare prefix.
pub fn aggregate_observations(table: &GuideTable, rows: &[&Row], placeholder: &str) -> String {
    let distinct = distinct_observations(table, rows);
    if distinct.is_empty() {
        placeholder.to_string()
    } else {
        format!("{}{}", OBSERVATION_PREFIX, distinct.join(OBSERVATION_SEPARATOR))
    }
}
