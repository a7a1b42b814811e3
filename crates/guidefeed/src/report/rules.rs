//! Deviation categories and the classifier that applies them.

use serde::Serialize;

use crate::normalize::{GuideTable, Row};
use crate::schema::SemanticField;

/// A deviation category recognized by a substring of the detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviationRule {
    /// Matched case-insensitively anywhere in the detail text.
    pub pattern: &'static str,
    /// Icon in per-shift blocks.
    pub icon: &'static str,
    /// Title in per-shift blocks.
    pub label: &'static str,
    /// Icon in the day summary.
    pub summary_icon: &'static str,
    /// Title in the day summary.
    pub summary_label: &'static str,
}

impl DeviationRule {
    /// Whether a detail text falls in this category.
    ///
    /// Unanchored, so `PERCA` also hits `COMPERCADO`.
    pub fn matches(&self, detail: &str) -> bool {
        detail.to_uppercase().contains(&self.pattern.to_uppercase())
    }
}

/// Categories tracked by the DEP feedback.
pub static DEP_RULES: [DeviationRule; 4] = [
    DeviationRule {
        pattern: "ERRO DE MANIFESTO",
        icon: "⚠️",
        label: "Erro de manifesto",
        summary_icon: "❗",
        summary_label: "Erro de manifesto",
    },
    DeviationRule {
        pattern: "VOADO SEM MAN",
        icon: "📄",
        label: "Guias sem manifesto",
        summary_icon: "📄",
        summary_label: "Guias sem manifesto",
    },
    DeviationRule {
        pattern: "ERRO SCORECARD",
        icon: "📉",
        label: "Erro de Scorecard",
        summary_icon: "📝",
        summary_label: "Erro de Scorecard",
    },
    DeviationRule {
        pattern: "PERCA",
        icon: "⛔",
        label: "Perda de DEP",
        summary_icon: "⛔",
        summary_label: "Perdas de DEP",
    },
];

/// The rows one rule picked out of a subset.
#[derive(Debug, Clone)]
pub struct RuleMatch<'r, 't> {
    pub rule: &'r DeviationRule,
    pub rows: Vec<&'t Row>,
}

impl RuleMatch<'_, '_> {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Partition `rows` by rule.
///
/// Rules are evaluated independently: a row can land under several rules or
/// none. One entry per rule, in rule order, empty ones included.
pub fn classify<'r, 't>(
    table: &GuideTable,
    rows: &[&'t Row],
    rules: &'r [DeviationRule],
) -> Vec<RuleMatch<'r, 't>> {
    rules
        .iter()
        .map(|rule| RuleMatch {
            rule,
            rows: rows
                .iter()
                .copied()
                .filter(|row| rule.matches(table.value(row, SemanticField::DeviationDetail)))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let perca = &DEP_RULES[3];
        assert!(perca.matches("PERCA DE PRAZO"));
        assert!(perca.matches("perca"));
        assert!(perca.matches("COMPERCADO"));
        assert!(!perca.matches("PERDA"));
    }

    #[test]
    fn test_accented_detail_upper_cases() {
        let rule = DeviationRule {
            pattern: "NÃO",
            ..DEP_RULES[0]
        };
        assert!(rule.matches("base não corresponde"));
    }

    #[test]
    fn test_rules_are_independent() {
        let raw = DataTable::from_rows(
            ["DETALHE DESVIO"],
            [
                ["ERRO DE MANIFESTO E PERCA"],
                ["VOADO SEM MANIFESTO"],
                ["SEM DESVIO"],
            ],
        );
        let table = GuideTable::normalize(&raw);
        let rows = table.all_rows();
        let matches = classify(&table, &rows, &DEP_RULES);

        let counts: Vec<usize> = matches.iter().map(RuleMatch::count).collect();
        assert_eq!(counts, vec![1, 1, 0, 1]);
        assert!(std::ptr::eq(matches[0].rows[0], matches[3].rows[0]));
    }
}
