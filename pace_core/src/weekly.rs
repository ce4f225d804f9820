//! Weekly progress against a table of daily minute targets.
//!
//! Goals for a date come from an exact-date override when one exists (even an
//! empty one), otherwise from the weekday default. Logged minutes are credited
//! per item up to that item's target, so overachieving one item never hides a
//! shortfall on another.

use crate::dates::weekday_index;
use crate::{DayProgress, GoalItem, ItemProgress, Result, WeekProgress, WeeklyGoalTable};
use chrono::NaiveDate;
use std::path::Path;

/// Source of logged minutes per item and date
pub trait MinutesLookup {
    fn logged_minutes(&self, item_id: &str, date: NaiveDate) -> u32;
}

impl<F> MinutesLookup for F
where
    F: Fn(&str, NaiveDate) -> u32,
{
    fn logged_minutes(&self, item_id: &str, date: NaiveDate) -> u32 {
        self(item_id, date)
    }
}

impl WeeklyGoalTable {
    /// Goals in effect on `date`
    pub fn goals_for(&self, date: NaiveDate) -> &[GoalItem] {
        if let Some(items) = self.overrides.get(&date) {
            return items;
        }

        self.defaults
            .get(&weekday_index(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Set the default goals for a Sunday-first weekday
    pub fn set_default(&mut self, weekday: u8, items: Vec<GoalItem>) {
        self.defaults.insert(weekday, items);
    }

    /// Replace the goals for one exact date
    pub fn set_override(&mut self, date: NaiveDate, items: Vec<GoalItem>) {
        self.overrides.insert(date, items);
    }

    /// Load a goal table snapshot from a JSON file
    ///
    /// Returns an empty table if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No goal table found at {:?}, using empty table", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let table: WeeklyGoalTable = serde_json::from_str(&contents)?;

        tracing::info!(
            "Loaded goal table from {:?} ({} weekday defaults, {} overrides)",
            path,
            table.defaults.len(),
            table.overrides.len()
        );
        Ok(table)
    }
}

/// Sum of minute counts, saturating at `u32::MAX`
fn sum_minutes(minutes: impl Iterator<Item = u32>) -> u32 {
    minutes.fold(0, u32::saturating_add)
}

/// Rounded percentage of `completed` over `target`; 0 when there is no target
fn percentage(completed: u32, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    (100.0 * completed as f64 / target as f64).round() as u32
}

/// Progress for a single day
pub fn day_progress(
    date: NaiveDate,
    table: &WeeklyGoalTable,
    lookup: &impl MinutesLookup,
) -> DayProgress {
    let items: Vec<ItemProgress> = table
        .goals_for(date)
        .iter()
        .map(|goal| {
            let logged = lookup.logged_minutes(&goal.item_id, date);
            ItemProgress {
                item_id: goal.item_id.clone(),
                target_minutes: goal.target_minutes,
                logged_minutes: logged,
                credited_minutes: logged.min(goal.target_minutes),
            }
        })
        .collect();

    let completed_minutes = sum_minutes(items.iter().map(|i| i.credited_minutes));
    let target_minutes = sum_minutes(items.iter().map(|i| i.target_minutes));

    DayProgress {
        date,
        items,
        completed_minutes,
        target_minutes,
        percentage: percentage(completed_minutes, target_minutes),
    }
}

/// Progress for a week of seven dates
///
/// The weekly percentage is one ratio over the summed minutes, not a mean of
/// daily percentages, so days without a target do not drag it down.
pub fn week_progress(
    week_dates: &[NaiveDate; 7],
    table: &WeeklyGoalTable,
    lookup: &impl MinutesLookup,
) -> WeekProgress {
    let days: Vec<DayProgress> = week_dates
        .iter()
        .map(|&date| day_progress(date, table, lookup))
        .collect();

    let completed_minutes = sum_minutes(days.iter().map(|d| d.completed_minutes));
    let target_minutes = sum_minutes(days.iter().map(|d| d.target_minutes));

    tracing::debug!(
        "Week of {}: {}/{} minutes",
        week_dates[0],
        completed_minutes,
        target_minutes
    );

    WeekProgress {
        days,
        completed_minutes,
        target_minutes,
        percentage: percentage(completed_minutes, target_minutes),
    }
}
