//! Counting, ranking and grouping of guides.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::config::FeedbackConfig;
use super::observations::aggregate_observations;
use super::rules::{classify, DeviationRule};
use super::shift::Shift;
use crate::normalize::{GuideTable, Row};
use crate::schema::SemanticField;

/// A value and how many guides carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub value: String,
    pub count: usize,
}

/// Count values, most frequent first.
///
/// Equal counts keep the order in which the values first appeared.
pub fn rank_values<'a, I>(values: I) -> Vec<Ranked>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut ranked: Vec<Ranked> = counts
        .into_iter()
        .map(|(value, count)| Ranked {
            value: value.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps first-seen order among ties
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The `n` most frequent values of `field` among `rows`.
pub fn top_values(table: &GuideTable, rows: &[&Row], field: SemanticField, n: usize) -> Vec<Ranked> {
    let mut ranked = rank_values(rows.iter().map(|row| table.value(row, field)));
    ranked.truncate(n);
    ranked
}

/// Split rows by shift, in canonical shift order.
///
/// Shifts with no rows are left out, as are rows with an unrecognized shift.
pub fn split_by_shift<'t>(table: &GuideTable, rows: &[&'t Row]) -> Vec<(Shift, Vec<&'t Row>)> {
    let mut buckets: BTreeMap<Shift, Vec<&'t Row>> = BTreeMap::new();
    for &row in rows {
        if let Some(shift) = Shift::parse(table.value(row, SemanticField::Shift)) {
            buckets.entry(shift).or_default().push(row);
        }
    }
    buckets.into_iter().collect()
}

/// Group rows by (flight, destination), ordered by flight then destination.
pub fn group_by_flight_destination<'t>(
    table: &GuideTable,
    rows: &[&'t Row],
) -> Vec<((String, String), Vec<&'t Row>)> {
    let mut groups: BTreeMap<(String, String), Vec<&'t Row>> = BTreeMap::new();
    for &row in rows {
        let key = (
            table.value(row, SemanticField::Flight).to_string(),
            table.value(row, SemanticField::Destination).to_string(),
        );
        groups.entry(key).or_default().push(row);
    }
    groups.into_iter().collect()
}

/// Guides of one deviation category over the whole day.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub rule: DeviationRule,
    pub count: usize,
}

/// One flight/destination line inside a deviation block.
#[derive(Debug, Clone, Serialize)]
pub struct FlightGroup {
    pub flight: String,
    pub destination: String,
    pub count: usize,
    pub observations: String,
}

/// One deviation block inside a shift.
#[derive(Debug, Clone, Serialize)]
pub struct RuleBreakdown {
    pub rule: DeviationRule,
    pub count: usize,
    pub observations: String,
    pub groups: Vec<FlightGroup>,
}

/// Everything the DEP feedback shows about one shift.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftSummary {
    pub shift: Shift,
    pub total: usize,
    pub top_destinations: Vec<Ranked>,
    pub deviations: Vec<RuleBreakdown>,
}

/// Aggregates behind the DEP feedback for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DepSummary {
    pub department: String,
    pub date: NaiveDate,
    pub total: usize,
    pub top_deviations: Vec<Ranked>,
    /// Empty when the sheet has no flight column.
    pub top_flights: Vec<Ranked>,
    pub categories: Vec<CategoryCount>,
    /// Only shifts that have guides, in canonical order.
    pub shifts: Vec<ShiftSummary>,
    #[serde(skip)]
    pub(crate) has_flights: bool,
    #[serde(skip)]
    pub(crate) has_destinations: bool,
}

impl DepSummary {
    /// Aggregate a day's guides.
    ///
    /// Returns `None` when the sheet has no deviation detail column, since
    /// nothing meaningful can be said without it.
    pub fn build(table: &GuideTable, date: NaiveDate, config: &FeedbackConfig) -> Option<Self> {
        if !table.has(SemanticField::DeviationDetail) {
            return None;
        }

        let rows = table.all_rows();
        let total = rows.len();
        let has_flights = table.has(SemanticField::Flight);
        let has_destinations = table.has(SemanticField::Destination);

        let details: Vec<String> = rows
            .iter()
            .map(|row| table.value(row, SemanticField::DeviationDetail).to_uppercase())
            .collect();
        let mut top_deviations = rank_values(details.iter().map(String::as_str));
        top_deviations.truncate(config.top_deviations);

        let top_flights = if has_flights {
            top_values(table, &rows, SemanticField::Flight, config.top_flights)
        } else {
            Vec::new()
        };

        let categories = classify(table, &rows, &config.rules)
            .into_iter()
            .map(|m| CategoryCount {
                rule: *m.rule,
                count: m.count(),
            })
            .collect();

        let shifts = if table.has(SemanticField::Shift) {
            split_by_shift(table, &rows)
                .into_iter()
                .map(|(shift, shift_rows)| summarize_shift(table, shift, &shift_rows, config))
                .collect()
        } else {
            Vec::new()
        };

        Some(Self {
            department: config.department.clone(),
            date,
            total,
            top_deviations,
            top_flights,
            categories,
            shifts,
            has_flights,
            has_destinations,
        })
    }
}

fn summarize_shift(
    table: &GuideTable,
    shift: Shift,
    rows: &[&Row],
    config: &FeedbackConfig,
) -> ShiftSummary {
    let top_destinations = if table.has(SemanticField::Destination) {
        top_values(table, rows, SemanticField::Destination, config.top_destinations)
    } else {
        Vec::new()
    };

    let with_groups = table.has(SemanticField::Flight) && table.has(SemanticField::Destination);
    let deviations = classify(table, rows, &config.rules)
        .into_iter()
        .filter(|m| !m.is_empty())
        .map(|m| {
            let groups = if with_groups {
                group_by_flight_destination(table, &m.rows)
                    .into_iter()
                    .map(|((flight, destination), group_rows)| FlightGroup {
                        flight,
                        destination,
                        count: group_rows.len(),
                        observations: aggregate_observations(
                            table,
                            &group_rows,
                            &config.observation_placeholder,
                        ),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            RuleBreakdown {
                rule: *m.rule,
                count: m.count(),
                observations: aggregate_observations(table, &m.rows, &config.observation_placeholder),
                groups,
            }
        })
        .collect();

    ShiftSummary {
        shift,
        total: rows.len(),
        top_destinations,
        deviations,
    }
}
