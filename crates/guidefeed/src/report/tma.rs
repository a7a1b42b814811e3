//! TMA analysis: lost dock passwords per shift and their reasons.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::{rank_values, top_values, Ranked};
use super::config::FeedbackConfig;
use super::text::{keycap, title_case};
use crate::dates::format_report_date;
use crate::error::{FeedbackError, Result};
use crate::normalize::GuideTable;
use crate::schema::SemanticField;

/// Sheet name used in error messages.
const SHEET: &str = "TMA";

/// Reasons that do not count against the operation.
pub const DISREGARDED_REASONS: [&str; 5] = [
    "SENHA OK",
    "DUPLICIDADE",
    "SENHA DOCA COMPUTADA COMO LOJA",
    "BASE NÃO CORRESPONDE",
    "QUEDA SISTEMA",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonClass {
    Valid,
    Disregarded,
}

impl ReasonClass {
    /// Classify an already trimmed, upper-cased reason.
    pub fn of(reason: &str) -> Self {
        if DISREGARDED_REASONS.contains(&reason) {
            ReasonClass::Disregarded
        } else {
            ReasonClass::Valid
        }
    }
}

/// Aggregates behind the TMA analysis for one day.
#[derive(Debug, Clone, Serialize)]
pub struct TmaSummary {
    pub date: NaiveDate,
    pub total: usize,
    /// Raw shift values, most frequent first.
    pub shifts: Vec<Ranked>,
    pub top_reasons: Vec<Ranked>,
    pub disregarded: usize,
}

/// Outcome of a TMA analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TmaReport {
    /// No password started on the requested day.
    NoData { date: NaiveDate },
    Summary(TmaSummary),
}

impl TmaReport {
    /// Analyze the full TMA sheet for `date`.
    ///
    /// The start-time column is always required; the deviation detail
    /// column only once there is something to classify.
    pub fn analyze(table: &GuideTable, date: NaiveDate, config: &FeedbackConfig) -> Result<Self> {
        if !table.has(SemanticField::StartTime) {
            return Err(FeedbackError::missing_column(SHEET, SemanticField::StartTime.header()));
        }

        let day = table.filter_by_date(SemanticField::StartTime, date);
        if day.is_empty() {
            return Ok(TmaReport::NoData { date });
        }

        if !day.has(SemanticField::DeviationDetail) {
            return Err(FeedbackError::missing_column(
                SHEET,
                SemanticField::DeviationDetail.header(),
            ));
        }

        let rows = day.all_rows();
        let reasons: Vec<String> = rows
            .iter()
            .map(|row| day.value(row, SemanticField::DeviationDetail).trim().to_uppercase())
            .collect();

        let valid: Vec<&str> = reasons
            .iter()
            .map(String::as_str)
            .filter(|r| ReasonClass::of(r) == ReasonClass::Valid)
            .collect();
        let disregarded = reasons.len() - valid.len();

        let mut top_reasons = rank_values(valid);
        top_reasons.truncate(config.top_reasons);

        let shifts = if day.has(SemanticField::Shift) {
            top_values(&day, &rows, SemanticField::Shift, usize::MAX)
        } else {
            Vec::new()
        };

        Ok(TmaReport::Summary(TmaSummary {
            date,
            total: rows.len(),
            shifts,
            top_reasons,
            disregarded,
        }))
    }
}

impl Display for TmaReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TmaReport::NoData { date } => {
                write!(f, "Nenhuma senha encontrada para {}.", format_report_date(*date))
            }
            TmaReport::Summary(s) => {
                write!(f, "📊 *ANÁLISE DO TMA – {}*\n\n", format_report_date(s.date))?;
                write!(f, "Total analisado: *{}*\n\n", s.total)?;

                writeln!(f, "🔻 Senhas perdidas por turno:")?;
                for shift in &s.shifts {
                    writeln!(f, "- {}: *{}*", shift.value, shift.count)?;
                }
                writeln!(f)?;

                writeln!(f, "🥉 Top 3 motivos válidos:")?;
                for (i, reason) in s.top_reasons.iter().enumerate() {
                    writeln!(f, "{} {} — {}", keycap(i + 1), title_case(&reason.value), reason.count)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sheet() -> GuideTable {
        let raw = DataTable::from_rows(
            ["Inicio", "Turno", "Detalhe_Desvio"],
            [
                ["10/11/2025 14:00:18", "TARDE", "erro de manifesto "],
                ["10/11/2025 15:10:00", "TARDE", "SENHA OK"],
                ["10/11/2025 03:00:00", "MADRUGADA", "ERRO DE MANIFESTO"],
                ["10/11/2025 09:00:00", "MANHÃ", "base não corresponde"],
                ["10/11/2025 09:30:00", "MANHÃ", "atraso no voo"],
                ["11/11/2025 09:30:00", "MANHÃ", "ATRASO NO VOO"],
            ],
        );
        GuideTable::normalize(&raw)
    }

    #[test]
    fn test_reason_class() {
        assert_eq!(ReasonClass::of("DUPLICIDADE"), ReasonClass::Disregarded);
        assert_eq!(ReasonClass::of("BASE NÃO CORRESPONDE"), ReasonClass::Disregarded);
        assert_eq!(ReasonClass::of("SENHA OK!"), ReasonClass::Valid);
    }

    #[test]
    fn test_tma_summary() {
        let report = TmaReport::analyze(&sheet(), ymd(2025, 11, 10), &FeedbackConfig::default()).unwrap();
        let TmaReport::Summary(summary) = &report else {
            panic!("expected a summary");
        };
        assert_eq!(summary.total, 5);
        assert_eq!(summary.disregarded, 2);
        assert_eq!(summary.shifts[0], Ranked { value: "TARDE".to_string(), count: 2 });

        let text = report.to_string();
        let expected = concat!(
            "📊 *ANÁLISE DO TMA – 10/11/2025*\n\n",
            "Total analisado: *5*\n\n",
            "🔻 Senhas perdidas por turno:\n",
            "- TARDE: *2*\n",
            "- MANHÃ: *2*\n",
            "- MADRUGADA: *1*\n",
            "\n",
            "🥉 Top 3 motivos válidos:\n",
            "1️⃣ Erro De Manifesto — 2\n",
            "2️⃣ Atraso No Voo — 1\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_data_for_day() {
        let report = TmaReport::analyze(&sheet(), ymd(2025, 11, 12), &FeedbackConfig::default()).unwrap();
        assert_eq!(report.to_string(), "Nenhuma senha encontrada para 12/11/2025.");
    }

    #[test]
    fn test_missing_start_column() {
        let raw = DataTable::from_rows(["TURNO"], [["TARDE"]]);
        let err = TmaReport::analyze(&GuideTable::normalize(&raw), ymd(2025, 11, 10), &FeedbackConfig::default())
            .unwrap_err();
        assert!(matches!(err, FeedbackError::MissingColumn { ref column, .. } if column == "INICIO"));
    }

    #[test]
    fn test_missing_detail_column_only_matters_with_rows() {
        let raw = DataTable::from_rows(["INICIO"], [["10/11/2025"]]);
        let table = GuideTable::normalize(&raw);
        let config = FeedbackConfig::default();
        assert!(TmaReport::analyze(&table, ymd(2025, 11, 11), &config).is_ok());
        assert!(TmaReport::analyze(&table, ymd(2025, 11, 10), &config).is_err());
    }
}
