//! Report configuration.

use serde::{Deserialize, Serialize};

use super::rules::{DeviationRule, DEP_RULES};

/// Where aggregated observations are printed in the DEP feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationPlacement {
    /// After each flight/destination line.
    #[default]
    Group,
    /// Once per deviation block, covering every guide in it.
    Rule,
    /// Both of the above.
    Both,
}

impl ObservationPlacement {
    pub fn at_group(&self) -> bool {
        matches!(self, ObservationPlacement::Group | ObservationPlacement::Both)
    }

    pub fn at_rule(&self) -> bool {
        matches!(self, ObservationPlacement::Rule | ObservationPlacement::Both)
    }
}

impl std::str::FromStr for ObservationPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "group" | "grupo" => Ok(ObservationPlacement::Group),
            "rule" | "desvio" => Ok(ObservationPlacement::Rule),
            "both" | "ambos" => Ok(ObservationPlacement::Both),
            _ => Err(format!("Unknown placement: {}. Use group, rule, or both.", s)),
        }
    }
}

impl std::fmt::Display for ObservationPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationPlacement::Group => write!(f, "group"),
            ObservationPlacement::Rule => write!(f, "rule"),
            ObservationPlacement::Both => write!(f, "both"),
        }
    }
}

/// Knobs for every report family.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// Department label in the DEP title.
    pub department: String,
    /// Days subtracted from today when the caller names no date (DEP, RCF).
    pub lookback_days: u32,
    /// Days subtracted from today for the TMA analysis.
    pub tma_lookback_days: u32,
    /// Print percentages next to day, destination and deviation counts.
    pub show_percentages: bool,
    /// Print the share of the shift next to each flight/destination line.
    pub group_percentages: bool,
    /// Where observations go.
    pub observation_placement: ObservationPlacement,
    /// Printed instead of observations when a group has none.
    pub observation_placeholder: String,
    /// How many deviation details the day headline lists.
    pub top_deviations: usize,
    /// How many flights the day ranking lists.
    pub top_flights: usize,
    /// How many destinations each shift lists.
    pub top_destinations: usize,
    /// How many reasons the TMA and RCF analyses list.
    pub top_reasons: usize,
    /// Deviation categories, in rendering order.
    pub rules: Vec<DeviationRule>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            department: "DEP".to_string(),
            lookback_days: 3,
            tma_lookback_days: 0,
            show_percentages: true,
            group_percentages: false,
            observation_placement: ObservationPlacement::Group,
            observation_placeholder: " - ".to_string(),
            top_deviations: 4,
            top_flights: 3,
            top_destinations: 3,
            top_reasons: 3,
            rules: DEP_RULES.to_vec(),
        }
    }
}

impl FeedbackConfig {
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_percentages(mut self, show: bool) -> Self {
        self.show_percentages = show;
        self
    }

    pub fn with_group_percentages(mut self, show: bool) -> Self {
        self.group_percentages = show;
        self
    }

    pub fn with_observation_placement(mut self, placement: ObservationPlacement) -> Self {
        self.observation_placement = placement;
        self
    }

    pub fn with_observation_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.observation_placeholder = placeholder.into();
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }
}
