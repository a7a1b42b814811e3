//! Report builders for the DEP, TMA and RCF sheets.
//!
//! Every builder is a pure function of a normalized [`GuideTable`](crate::normalize::GuideTable),
//! a date and a [`FeedbackConfig`]; fetching and caching happen elsewhere.

mod aggregate;
mod config;
mod dep;
mod observations;
mod rcf;
mod rules;
mod shift;
mod text;
mod tma;

pub use aggregate::{
    group_by_flight_destination, rank_values, split_by_shift, top_values, CategoryCount, DepSummary,
    FlightGroup, Ranked, RuleBreakdown, ShiftSummary,
};
pub use config::{FeedbackConfig, ObservationPlacement};
pub use dep::{dep_title, render_dep_feedback, DepFeedback, MISSING_DETAIL_PLACEHOLDER};
pub use observations::{
    aggregate_observations, distinct_observations, is_placeholder, OBSERVATION_PREFIX,
    OBSERVATION_SEPARATOR,
};
pub use rcf::{has_deviation, HighlightedFlight, RcfReport, ReasonShare};
pub use rules::{classify, DeviationRule, RuleMatch, DEP_RULES};
pub use shift::Shift;
pub use text::{format_percentage, keycap, percentage, title_case};
pub use tma::{ReasonClass, TmaReport, TmaSummary, DISREGARDED_REASONS};
