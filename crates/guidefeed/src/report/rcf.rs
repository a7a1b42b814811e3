//! RCF analysis: guides with a registered deviation, by shift and reason.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::{top_values, Ranked};
use super::config::FeedbackConfig;
use super::shift::Shift;
use super::text::{format_percentage, keycap};
use crate::dates::format_report_date;
use crate::error::{FeedbackError, Result};
use crate::normalize::{GuideTable, Row, SYNTHETIC_OBSERVATION_HEADER};
use crate::schema::SemanticField;

const SHEET: &str = "RCF";

/// Observations at most this long do not describe a deviation.
const MIN_OBSERVATION_CHARS: usize = 3;

/// Columns the RCF analysis cannot run without.
const REQUIRED: [SemanticField; 5] = [
    SemanticField::RecordDate,
    SemanticField::Observation,
    SemanticField::Shift,
    SemanticField::Flight,
    SemanticField::Reason,
];

/// A reason and its share of the day's deviations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonShare {
    pub reason: String,
    pub count: usize,
    pub percent: String,
}

/// The flight with the most deviations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedFlight {
    pub flight: String,
    pub description: String,
}

/// Aggregates behind the RCF analysis for one day.
#[derive(Debug, Clone, Serialize)]
pub struct RcfReport {
    pub date: NaiveDate,
    pub total: usize,
    pub deviations: usize,
    pub pending: usize,
    /// Deviations per shift, in canonical shift order.
    pub per_shift: Vec<(Shift, usize)>,
    pub highlighted: Option<HighlightedFlight>,
    pub top_reasons: Vec<ReasonShare>,
    #[serde(skip)]
    slots: usize,
}

/// Whether an observation is long enough to describe a deviation.
pub fn has_deviation(observation: &str) -> bool {
    observation.chars().count() > MIN_OBSERVATION_CHARS
}

impl RcfReport {
    /// Analyze the full RCF sheet for `date`.
    pub fn analyze(table: &GuideTable, date: NaiveDate, config: &FeedbackConfig) -> Result<Self> {
        for field in REQUIRED {
            let synthetic = field == SemanticField::Observation
                && table.observation_header() == SYNTHETIC_OBSERVATION_HEADER;
            if !table.has(field) || synthetic {
                return Err(FeedbackError::missing_column(SHEET, field.header()));
            }
        }

        let day = table.filter_by_date(SemanticField::RecordDate, date);
        let total = day.len();

        let deviating: Vec<&Row> = day
            .rows()
            .iter()
            .filter(|row| has_deviation(day.value(row, SemanticField::Observation)))
            .collect();
        let deviations = deviating.len();

        let per_shift = Shift::ORDER
            .into_iter()
            .map(|shift| {
                let count = deviating
                    .iter()
                    .filter(|row| shift.matches_loose(day.value(row, SemanticField::Shift)))
                    .count();
                (shift, count)
            })
            .collect();

        let highlighted = top_values(&day, &deviating, SemanticField::Flight, 1)
            .into_iter()
            .next()
            .map(|top| {
                let description = deviating
                    .iter()
                    .find(|row| day.value(row, SemanticField::Flight) == top.value)
                    .map(|row| day.value(row, SemanticField::Observation).to_string())
                    .unwrap_or_default();
                HighlightedFlight {
                    flight: top.value,
                    description,
                }
            });

        let top_reasons = top_values(&day, &deviating, SemanticField::Reason, config.top_reasons)
            .into_iter()
            .map(|Ranked { value, count }| ReasonShare {
                percent: format_percentage(count, deviations),
                reason: value,
                count,
            })
            .collect();

        Ok(Self {
            date,
            total,
            deviations,
            pending: total - deviations,
            per_shift,
            highlighted,
            top_reasons,
            slots: config.top_reasons,
        })
    }

    fn shift_count(&self, shift: Shift) -> usize {
        self.per_shift
            .iter()
            .find(|(s, _)| *s == shift)
            .map_or(0, |(_, c)| *c)
    }
}

impl Display for RcfReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "📊 RCF — Análise de {}\n\n", format_report_date(self.date))?;

        writeln!(f, "📦 Total de guias: {}", self.total)?;
        writeln!(f, "✅ Guias com desvio: {}", self.deviations)?;
        write!(f, "⏳ Guias pendentes: {}\n\n", self.pending)?;

        writeln!(f, "🚨 Desvios por turno")?;
        writeln!(f, "🟡 Manhã: {}", self.shift_count(Shift::Morning))?;
        writeln!(f, "🟠 Tarde: {}", self.shift_count(Shift::Afternoon))?;
        write!(f, "🔵 Madrugada: {}\n\n", self.shift_count(Shift::Overnight))?;

        writeln!(f, "✈️ Voo em destaque")?;
        match &self.highlighted {
            Some(h) => write!(f, "{} — {}\n\n", h.flight, h.description)?,
            None => write!(f, "Nenhum — —\n\n")?,
        }

        writeln!(f, "📌 Top 3 motivos")?;
        for slot in 0..self.slots {
            match self.top_reasons.get(slot) {
                Some(r) => writeln!(f, "{} {} — {}%", keycap(slot + 1), r.reason, r.percent)?,
                None => writeln!(f, "{} Sem dados — 0.0%", keycap(slot + 1))?,
            }
        }
        Ok(())
    }
}
