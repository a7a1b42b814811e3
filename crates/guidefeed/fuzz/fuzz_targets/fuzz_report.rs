//! Fuzz target for parse-then-render.
//!
//! Any bytes that parse as a sheet must go through normalization and every
//! report without panicking.

#![no_main]

use chrono::NaiveDate;
use guidefeed::{render_dep_feedback, FeedbackConfig, GuideTable, Parser, RcfReport, TmaReport};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok((raw, _)) = Parser::new().parse_bytes(data, "fuzz") else {
        return;
    };
    let table = GuideTable::normalize(&raw);
    let config = FeedbackConfig::default();
    let Some(date) = NaiveDate::from_ymd_opt(2025, 11, 10) else {
        return;
    };

    let _ = render_dep_feedback(&table, date, &config);
    let _ = TmaReport::analyze(&table, date, &config).map(|r| r.to_string());
    let _ = RcfReport::analyze(&table, date, &config).map(|r| r.to_string());
});
