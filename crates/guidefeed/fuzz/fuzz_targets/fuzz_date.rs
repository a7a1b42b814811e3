//! Fuzz target for date parsing.
//!
//! Loose sheet dates and strict request dates must never panic, and a
//! loosely parsed date must survive a round trip through the report format.

#![no_main]

use guidefeed::{format_report_date, parse_loose_date, parse_request_date};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(date) = parse_loose_date(text) {
            assert_eq!(parse_loose_date(&format_report_date(date)), Some(date));
        }
        let _ = parse_request_date(text);
    }
});
