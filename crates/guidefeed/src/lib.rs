//! Guidefeed: operational feedback reports over airport cargo guide sheets.
//!
//! Sheets (DEP, TMA, RCF) are fetched from a [`TableSource`], normalized
//! once per refresh, kept in a [`TableCache`], and turned into
//! chat-ready texts by the builders in [`report`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use guidefeed::{CacheConfig, DirectorySource, FeedbackConfig, FeedbackService, TableCache};
//!
//! let source = Arc::new(DirectorySource::new("sheets/"));
//! let cache = TableCache::new(source, CacheConfig::default());
//! let service = FeedbackService::new(cache, FeedbackConfig::default());
//!
//! println!("{}", service.dep_feedback(None).unwrap());
//! ```

pub mod cache;
pub mod dates;
pub mod error;
pub mod input;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod service;

pub use cache::{CacheConfig, Snapshot, TableCache, DEFAULT_TTL};
pub use dates::{default_report_date, format_report_date, parse_loose_date, parse_request_date};
pub use error::{FeedbackError, Result};
pub use input::{DataTable, DirectorySource, Parser, SheetExportSource, SourceMetadata, StaticSource, TableSource};
pub use normalize::{GuideTable, Row, NO_DATA};
pub use report::{
    render_dep_feedback, DepSummary, FeedbackConfig, ObservationPlacement, RcfReport, Shift, TmaReport,
};
pub use schema::{ColumnMap, SemanticField};
pub use service::{FeedbackService, SheetNames};
