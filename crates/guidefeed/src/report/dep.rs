//! The DEP operational feedback text.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use tracing::debug;

use super::aggregate::{DepSummary, RuleBreakdown, ShiftSummary};
use super::config::FeedbackConfig;
use super::text::{format_percentage, keycap};
use crate::dates::format_report_date;
use crate::normalize::GuideTable;

/// Printed instead of the report body when the sheet lacks deviation details.
pub const MISSING_DETAIL_PLACEHOLDER: &str = "(sem coluna DETALHE DESVIO)";

/// Title line of the DEP feedback.
pub fn dep_title(department: &str, date: NaiveDate) -> String {
    format!(
        "📌 *Feedback Operacional {{*{}*}} – {}*",
        department,
        format_report_date(date)
    )
}

/// Render the DEP feedback for a day's guides.
///
/// `table` must already be filtered to `date`. The output depends only on
/// its arguments.
pub fn render_dep_feedback(table: &GuideTable, date: NaiveDate, config: &FeedbackConfig) -> String {
    match DepSummary::build(table, date, config) {
        Some(summary) => {
            debug!(
                date = %date,
                total = summary.total,
                shifts = summary.shifts.len(),
                "rendering DEP feedback"
            );
            DepFeedback::new(&summary, config).to_string()
        }
        None => format!(
            "{}\n\n{}\n",
            dep_title(&config.department, date),
            MISSING_DETAIL_PLACEHOLDER
        ),
    }
}

/// Text rendering of a [`DepSummary`].
pub struct DepFeedback<'a> {
    summary: &'a DepSummary,
    config: &'a FeedbackConfig,
}

impl<'a> DepFeedback<'a> {
    pub fn new(summary: &'a DepSummary, config: &'a FeedbackConfig) -> Self {
        Self { summary, config }
    }

    /// ` (12.5%)` when percentages are on, nothing otherwise.
    fn share(&self, count: usize, total: usize) -> String {
        if self.config.show_percentages {
            format!(" ({}%)", format_percentage(count, total))
        } else {
            String::new()
        }
    }

    fn write_headline(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        if s.top_deviations.is_empty() {
            return write!(
                f,
                "📉 No total do dia, registramos **{} guias** com inconsistências.\n\n",
                s.total
            );
        }
        let listed: Vec<String> = s
            .top_deviations
            .iter()
            .map(|r| format!("\"{}\"", r.value))
            .collect();
        write!(
            f,
            "📉 No total do dia, registramos **{} guias** com inconsistências: {}.\n\n",
            s.total,
            listed.join(", ")
        )
    }

    fn write_flights(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        if !s.has_flights || s.top_flights.is_empty() {
            return Ok(());
        }
        writeln!(f, "✈️ *Voos mais impactados do dia:*")?;
        for flight in &s.top_flights {
            writeln!(
                f,
                "- {}: **{} guias**{}",
                flight.value,
                flight.count,
                self.share(flight.count, s.total)
            )?;
        }
        writeln!(f)
    }

    fn write_categories(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "👉 *Resumo geral de inconsistências:*")?;
        for category in &s.categories {
            writeln!(
                f,
                "- {} **{}:** {} guias{}",
                category.rule.summary_icon,
                category.rule.summary_label,
                category.count,
                self.share(category.count, s.total)
            )?;
        }
        writeln!(f)
    }

    fn write_shift(&self, f: &mut Formatter<'_>, shift: &ShiftSummary) -> fmt::Result {
        writeln!(f, "{} *Turno {}*", shift.shift.icon(), shift.shift.display_name())?;
        let day_share = if self.config.show_percentages {
            format!(
                " ({}% do dia)",
                format_percentage(shift.total, self.summary.total)
            )
        } else {
            String::new()
        };
        writeln!(f, "📦 Total: **{} guias**{}", shift.total, day_share)?;
        writeln!(f)?;

        if self.summary.has_destinations && !shift.top_destinations.is_empty() {
            writeln!(f, "📍 *Maiores destinos:*")?;
            for (i, dest) in shift.top_destinations.iter().enumerate() {
                writeln!(
                    f,
                    "{} {} → **{} guias**{}",
                    keycap(i + 1),
                    dest.value,
                    dest.count,
                    self.share(dest.count, shift.total)
                )?;
            }
            writeln!(f)?;
        }

        for block in &shift.deviations {
            self.write_block(f, shift, block)?;
        }
        Ok(())
    }

    fn write_block(&self, f: &mut Formatter<'_>, shift: &ShiftSummary, block: &RuleBreakdown) -> fmt::Result {
        let placement = self.config.observation_placement;
        if self.config.show_percentages {
            write!(
                f,
                "{} *{} ({} guias, {}% do turno)*",
                block.rule.icon,
                block.rule.label,
                block.count,
                format_percentage(block.count, shift.total)
            )?;
        } else {
            write!(f, "{} *{} ({} guia(s))*", block.rule.icon, block.rule.label, block.count)?;
        }
        if placement.at_rule() {
            write!(f, "{}", block.observations)?;
        }
        writeln!(f)?;

        for group in &block.groups {
            write!(
                f,
                "✈️ {} → {} → **{} guias**",
                group.flight, group.destination, group.count
            )?;
            if self.config.group_percentages {
                write!(f, " ({}%)", format_percentage(group.count, shift.total))?;
            }
            if placement.at_group() {
                write!(f, " {}", group.observations)?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

impl Display for DepFeedback<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        write!(f, "{}\n\n", dep_title(&s.department, s.date))?;
        self.write_headline(f)?;

        // Nothing else to say about an empty day
        if s.total == 0 {
            return Ok(());
        }

        self.write_flights(f)?;
        self.write_categories(f)?;
        for shift in &s.shifts {
            self.write_shift(f, shift)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;
    use crate::report::config::ObservationPlacement;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single_guide() -> GuideTable {
        let raw = DataTable::from_rows(
            ["VOO", "DESTINO", "TURNO", "DETALHE DESVIO", "OBSERVAÇÕES"],
            [["G3100", "GIG", "MANHÃ", "ERRO DE MANIFESTO", "INC123"]],
        );
        GuideTable::normalize(&raw)
    }

    #[test]
    fn test_full_report_layout() {
        let text = render_dep_feedback(&single_guide(), ymd(2025, 11, 10), &FeedbackConfig::default());
        let expected = concat!(
            "📌 *Feedback Operacional {*DEP*} – 10/11/2025*\n",
            "\n",
            "📉 No total do dia, registramos **1 guias** com inconsistências: \"ERRO DE MANIFESTO\".\n",
            "\n",
            "✈️ *Voos mais impactados do dia:*\n",
            "- G3100: **1 guias** (100.0%)\n",
            "\n",
            "👉 *Resumo geral de inconsistências:*\n",
            "- ❗ **Erro de manifesto:** 1 guias (100.0%)\n",
            "- 📄 **Guias sem manifesto:** 0 guias (0.0%)\n",
            "- 📝 **Erro de Scorecard:** 0 guias (0.0%)\n",
            "- ⛔ **Perdas de DEP:** 0 guias (0.0%)\n",
            "\n",
            "🌅 *Turno Manhã*\n",
            "📦 Total: **1 guias** (100.0% do dia)\n",
            "\n",
            "📍 *Maiores destinos:*\n",
            "1️⃣ GIG → **1 guias** (100.0%)\n",
            "\n",
            "⚠️ *Erro de manifesto (1 guias, 100.0% do turno)*\n",
            "✈️ G3100 → GIG → **1 guias**  --> INC123\n",
            "\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_without_percentages() {
        let config = FeedbackConfig::default().with_percentages(false);
        let text = render_dep_feedback(&single_guide(), ymd(2025, 11, 10), &config);
        assert!(text.contains("- G3100: **1 guias**\n"));
        assert!(text.contains("📦 Total: **1 guias**\n"));
        assert!(text.contains("⚠️ *Erro de manifesto (1 guia(s))*\n"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn test_rule_level_observations() {
        let config = FeedbackConfig::default()
            .with_observation_placement(ObservationPlacement::Rule)
            .with_group_percentages(true);
        let text = render_dep_feedback(&single_guide(), ymd(2025, 11, 10), &config);
        assert!(text.contains("⚠️ *Erro de manifesto (1 guias, 100.0% do turno)* --> INC123\n"));
        assert!(text.contains("✈️ G3100 → GIG → **1 guias** (100.0%)\n"));
    }

    #[test]
    fn test_missing_detail_column() {
        let raw = DataTable::from_rows(["VOO", "TURNO"], [["G3100", "MANHÃ"]]);
        let table = GuideTable::normalize(&raw);
        let text = render_dep_feedback(&table, ymd(2025, 11, 10), &FeedbackConfig::default());
        assert_eq!(
            text,
            "📌 *Feedback Operacional {*DEP*} – 10/11/2025*\n\n(sem coluna DETALHE DESVIO)\n"
        );
    }

    #[test]
    fn test_empty_day() {
        let raw = DataTable::from_rows(
            ["VOO", "TURNO", "DETALHE DESVIO"],
            Vec::<[&str; 3]>::new(),
        );
        let table = GuideTable::normalize(&raw);
        let text = render_dep_feedback(&table, ymd(2025, 11, 10), &FeedbackConfig::default());
        assert_eq!(
            text,
            concat!(
                "📌 *Feedback Operacional {*DEP*} – 10/11/2025*\n\n",
                "📉 No total do dia, registramos **0 guias** com inconsistências.\n\n",
            )
        );
    }

    #[test]
    fn test_department_label() {
        let config = FeedbackConfig::default().with_department("GRU");
        assert_eq!(
            dep_title(&config.department, ymd(2025, 1, 2)),
            "📌 *Feedback Operacional {*GRU*} – 02/01/2025*"
        );
    }
}
