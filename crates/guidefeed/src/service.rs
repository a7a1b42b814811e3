//! The request-facing service: cache + report builders + default dates.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::TableCache;
use crate::dates::default_report_date;
use crate::error::{FeedbackError, Result};
use crate::report::{render_dep_feedback, FeedbackConfig, RcfReport, TmaReport};
use crate::schema::SemanticField;

/// Most RCF texts kept per snapshot; the oldest date is evicted first.
pub const RCF_MEMO_CAPACITY: usize = 64;

type RcfMemo = IndexMap<(u64, NaiveDate), String>;

/// Names of the sheets each report reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNames {
    pub dep: String,
    pub tma: String,
    pub rcf: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            dep: "DEP".to_string(),
            tma: "TMA".to_string(),
            rcf: "RCF".to_string(),
        }
    }
}

/// Produces report texts from cached sheets.
pub struct FeedbackService {
    cache: TableCache,
    config: FeedbackConfig,
    sheets: SheetNames,
    rcf_memo: Mutex<RcfMemo>,
}

impl FeedbackService {
    pub fn new(cache: TableCache, config: FeedbackConfig) -> Self {
        Self {
            cache,
            config,
            sheets: SheetNames::default(),
            rcf_memo: Mutex::new(IndexMap::new()),
        }
    }

    pub fn with_sheets(mut self, sheets: SheetNames) -> Self {
        self.sheets = sheets;
        self
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// DEP operational feedback for `date`, or `lookback_days` before today.
    pub fn dep_feedback(&self, date: Option<NaiveDate>) -> Result<String> {
        let date = date.unwrap_or_else(|| default_report_date(Self::today(), self.config.lookback_days));
        let snapshot = self.cache.get(&self.sheets.dep)?;

        if !snapshot.table.has(SemanticField::FlightDeparture) {
            return Err(FeedbackError::missing_column(
                &self.sheets.dep,
                SemanticField::FlightDeparture.header(),
            ));
        }
        let day = snapshot.table.filter_by_date(SemanticField::FlightDeparture, date);
        debug!(sheet = %self.sheets.dep, %date, rows = day.len(), "selected DEP guides");

        Ok(render_dep_feedback(&day, date, &self.config))
    }

    /// TMA analysis for `date`, or `tma_lookback_days` before today.
    pub fn tma_analysis(&self, date: Option<NaiveDate>) -> Result<String> {
        let date = date.unwrap_or_else(|| default_report_date(Self::today(), self.config.tma_lookback_days));
        let snapshot = self.cache.get(&self.sheets.tma)?;
        let report = TmaReport::analyze(&snapshot.table, date, &self.config)?;
        Ok(report.to_string())
    }

    /// RCF analysis for `date`, or `lookback_days` before today.
    ///
    /// Texts are memoized until the sheet is refreshed, at most
    /// [`RCF_MEMO_CAPACITY`] dates at a time.
    pub fn rcf_analysis(&self, date: Option<NaiveDate>) -> Result<String> {
        let date = date.unwrap_or_else(|| default_report_date(Self::today(), self.config.lookback_days));
        let snapshot = self.cache.get(&self.sheets.rcf)?;
        let key = (snapshot.generation, date);

        if let Some(text) = self.memo().get(&key) {
            debug!(%date, generation = snapshot.generation, "RCF memo hit");
            return Ok(text.clone());
        }

        let text = RcfReport::analyze(&snapshot.table, date, &self.config)?.to_string();

        let mut memo = self.memo();
        // Older generations can never be asked for again
        memo.retain(|(generation, _), _| *generation >= snapshot.generation);
        while memo.len() >= RCF_MEMO_CAPACITY {
            memo.shift_remove_index(0);
        }
        memo.insert(key, text.clone());
        Ok(text)
    }

    fn memo(&self) -> MutexGuard<'_, RcfMemo> {
        self.rcf_memo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
