//! Logged-minutes snapshot.
//!
//! The application keeps a CSV of work entries (`item_id,date,minutes`). This
//! module indexes it by item and date so the weekly aggregator can look up
//! minutes without touching the file again.

use crate::weekly::MinutesLookup;
use crate::Result;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One logged stretch of work
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkEntry {
    pub item_id: String,
    pub date: NaiveDate,
    pub minutes: u32,
}

/// Minutes per item and date
#[derive(Clone, Debug, Default)]
pub struct WorkLog {
    minutes: HashMap<(String, NaiveDate), u32>,
}

impl WorkLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; repeated entries for the same item and date accumulate,
    /// saturating at `u32::MAX`
    pub fn record(&mut self, entry: WorkEntry) {
        let total = self
            .minutes
            .entry((entry.item_id, entry.date))
            .or_insert(0);
        *total = total.saturating_add(entry.minutes);
    }

    /// Total minutes on `date` across all items
    pub fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.minutes
            .iter()
            .filter(|((_, d), _)| *d == date)
            .fold(0u32, |acc, (_, &m)| acc.saturating_add(m))
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Load a work log from a CSV file with an `item_id,date,minutes` header
    ///
    /// Returns an empty log if the file doesn't exist. Rows that fail to parse
    /// are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let mut log = Self::new();

        if !path.exists() {
            tracing::debug!("No work log found at {:?}", path);
            return Ok(log);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut count = 0;
        for (row_num, result) in reader.deserialize::<WorkEntry>().enumerate() {
            match result {
                Ok(entry) => {
                    log.record(entry);
                    count += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping work log row {}: {}", row_num + 1, e);
                }
            }
        }

        tracing::info!("Loaded {} work entries from {:?}", count, path);
        Ok(log)
    }
}

impl FromIterator<WorkEntry> for WorkLog {
    fn from_iter<I: IntoIterator<Item = WorkEntry>>(iter: I) -> Self {
        let mut log = Self::new();
        for entry in iter {
            log.record(entry);
        }
        log
    }
}

impl MinutesLookup for WorkLog {
    fn logged_minutes(&self, item_id: &str, date: NaiveDate) -> u32 {
        self.minutes
            .get(&(item_id.to_string(), date))
            .copied()
            .unwrap_or(0)
    }
}
