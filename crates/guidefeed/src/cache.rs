//! TTL refresh cache over a [`TableSource`].
//!
//! Each sheet has its own slot. A slot is refreshed at most once per TTL;
//! when a refresh fails, the previous snapshot keeps being served.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::Result;
use crate::input::TableSource;
use crate::normalize::GuideTable;

/// Default time a snapshot stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a snapshot is served before a refresh is attempted.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

impl CacheConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }
}

/// An immutable, normalized copy of a sheet.
#[derive(Debug)]
pub struct Snapshot {
    pub table: GuideTable,
    /// Monotonic fetch time, used for expiry.
    pub fetched_at: Instant,
    /// Wall-clock fetch time, for logs and diagnostics.
    pub fetched_at_utc: DateTime<Utc>,
    /// Unique per successful fetch across the whole cache, increasing.
    pub generation: u64,
}

impl Snapshot {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }
}

type Slot = Arc<Mutex<Option<Arc<Snapshot>>>>;

/// Per-sheet TTL cache with stale fallback.
pub struct TableCache {
    source: Arc<dyn TableSource>,
    config: CacheConfig,
    slots: Mutex<HashMap<String, Slot>>,
    generations: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding a slot leaves a complete snapshot or none
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TableCache {
    pub fn new(source: Arc<dyn TableSource>, config: CacheConfig) -> Self {
        Self {
            source,
            config,
            slots: Mutex::new(HashMap::new()),
            generations: AtomicU64::new(0),
        }
    }

    /// Current snapshot of `sheet`, refreshing it if it expired.
    pub fn get(&self, sheet: &str) -> Result<Arc<Snapshot>> {
        self.get_at(sheet, Instant::now())
    }

    /// Same as [`TableCache::get`] with an explicit clock reading.
    pub fn get_at(&self, sheet: &str, now: Instant) -> Result<Arc<Snapshot>> {
        let slot = self.slot(sheet);
        // Held across the fetch so one sheet is never fetched twice at once
        let mut current = lock(&slot);

        let previous = match current.as_ref() {
            Some(snapshot) if snapshot.age(now) <= self.config.ttl => {
                return Ok(Arc::clone(snapshot));
            }
            Some(snapshot) => Some(Arc::clone(snapshot)),
            None => None,
        };

        match self.source.fetch(sheet) {
            Ok(raw) => {
                let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
                let snapshot = Arc::new(Snapshot {
                    table: GuideTable::normalize(&raw),
                    fetched_at: now,
                    fetched_at_utc: Utc::now(),
                    generation,
                });
                info!(
                    sheet,
                    source = self.source.name(),
                    rows = snapshot.table.len(),
                    generation,
                    "refreshed sheet"
                );
                *current = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => match previous {
                Some(stale) => {
                    warn!(
                        sheet,
                        source = self.source.name(),
                        error = %e,
                        age_secs = stale.age(now).as_secs(),
                        fetched_at = %stale.fetched_at_utc,
                        "refresh failed, serving stale snapshot"
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Drop the snapshot of `sheet`; the next read must fetch.
    pub fn invalidate(&self, sheet: &str) {
        let slot = lock(&self.slots).get(sheet).cloned();
        if let Some(slot) = slot {
            *lock(&slot) = None;
        }
    }

    fn slot(&self, sheet: &str) -> Slot {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(sheet.to_string()).or_default())
    }
}
