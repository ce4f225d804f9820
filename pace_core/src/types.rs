//! Core domain types for Pace.
//!
//! This module defines the fundamental types used throughout the system:
//! - Allocation requests and the day-by-day plans computed from them
//! - Phase summaries grouping a plan's effective days
//! - Weekly goal tables and the progress reports derived from them
//! - Goal snapshots supplied by the caller

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Allocation Input
// ============================================================================

/// Shape of the per-day load curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Same load every effective day
    Linear,
    /// Light start, heavier load as the deadline approaches
    #[default]
    Exponential,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Linear => write!(f, "linear"),
            Distribution::Exponential => write!(f, "exponential"),
        }
    }
}

impl FromStr for Distribution {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "flat" => Ok(Distribution::Linear),
            "exponential" | "exp" | "curve" => Ok(Distribution::Exponential),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown distribution '{}' (expected linear or exponential)",
                other
            ))),
        }
    }
}

/// Everything the engine needs to plan one goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AllocationRequest {
    /// Units still to do (pages, minutes, ...)
    pub remaining_quantity: u32,
    /// Anchor day; the plan starts here
    pub today: NaiveDate,
    /// First day that is no longer part of the plan
    pub deadline: NaiveDate,
    /// Sunday-first weekday indices that receive no allocation
    #[serde(default)]
    pub excluded_weekdays: BTreeSet<u8>,
    #[serde(default)]
    pub distribution: Distribution,
    /// Curve strength in [0, 1]; only used by `Distribution::Exponential`
    #[serde(default)]
    pub intensity: f64,
}

impl AllocationRequest {
    /// Linear request with no excluded weekdays
    pub fn new(remaining_quantity: u32, today: NaiveDate, deadline: NaiveDate) -> Self {
        Self {
            remaining_quantity,
            today,
            deadline,
            excluded_weekdays: BTreeSet::new(),
            distribution: Distribution::Linear,
            intensity: 0.0,
        }
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_excluded_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.excluded_weekdays = weekdays.into_iter().collect();
        self
    }
}

// ============================================================================
// Allocation Output
// ============================================================================

/// One calendar day of a plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayAllocation {
    pub date: NaiveDate,
    /// Sunday-first weekday index
    pub weekday: u8,
    pub weekday_name: String,
    pub allocated: u32,
    pub is_excluded: bool,
    pub cumulative_allocated: u32,
    pub percent_of_average: u32,
    /// 1-based position among non-excluded days
    pub effective_index: Option<usize>,
}

/// A contiguous stretch of effective days
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PhaseSummary {
    pub name: String,
    pub symbol: String,
    /// 1-based, inclusive, counted over effective days only
    pub start_day_index: usize,
    pub end_day_index: usize,
    pub average_per_day: f64,
    pub total_allocated: u32,
    /// e.g. "30%-50%", relative to the plan's average per effective day
    pub percent_range_label: String,
}

impl PhaseSummary {
    /// Symbol and name, e.g. "🚀 Pico"
    pub fn label(&self) -> String {
        format!("{} {}", self.symbol, self.name)
    }

    /// Number of effective days covered
    pub fn day_count(&self) -> usize {
        self.end_day_index + 1 - self.start_day_index
    }

    pub fn contains(&self, effective_index: usize) -> bool {
        (self.start_day_index..=self.end_day_index).contains(&effective_index)
    }
}

/// Day-by-day plan for one goal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AllocationPlan {
    pub today: NaiveDate,
    pub deadline: NaiveDate,
    pub distribution: Distribution,
    /// Intensity actually used, after clamping
    pub intensity: f64,
    pub remaining_quantity: u32,
    pub days: Vec<DayAllocation>,
    pub total_allocated: u32,
    pub effective_day_count: usize,
    pub average_per_effective_day: f64,
    pub phases: Vec<PhaseSummary>,
    pub is_expired: bool,
}

impl AllocationPlan {
    /// Nothing left to do before a deadline that has not passed
    pub fn is_complete(&self) -> bool {
        !self.is_expired && self.remaining_quantity == 0
    }

    /// Work remains but every day in the window is excluded
    pub fn is_blocked(&self) -> bool {
        !self.is_expired && self.remaining_quantity > 0 && self.effective_day_count == 0
    }

    /// Entry for a specific date, if it falls inside the window
    pub fn day(&self, date: NaiveDate) -> Option<&DayAllocation> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Entry for the plan's anchor day
    pub fn today_allocation(&self) -> Option<&DayAllocation> {
        self.day(self.today)
    }

    /// Phase containing `date`; `None` for excluded or out-of-window dates
    pub fn phase_for(&self, date: NaiveDate) -> Option<&PhaseSummary> {
        let index = self.day(date)?.effective_index?;
        self.phases.iter().find(|p| p.contains(index))
    }

    /// Phase containing the anchor day
    pub fn current_phase(&self) -> Option<&PhaseSummary> {
        self.phase_for(self.today)
    }
}

// ============================================================================
// Weekly Goals
// ============================================================================

/// Daily minutes target for one tracked item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalItem {
    pub item_id: String,
    pub target_minutes: u32,
}

impl GoalItem {
    pub fn new(item_id: impl Into<String>, target_minutes: u32) -> Self {
        Self {
            item_id: item_id.into(),
            target_minutes,
        }
    }
}

/// Per-weekday default goals plus per-date overrides
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WeeklyGoalTable {
    /// Sunday-first weekday index -> goals
    #[serde(default)]
    pub defaults: BTreeMap<u8, Vec<GoalItem>>,
    /// Exact date -> goals; replaces the weekday default even when empty
    #[serde(default)]
    pub overrides: BTreeMap<NaiveDate, Vec<GoalItem>>,
}

/// Progress of one item on one day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemProgress {
    pub item_id: String,
    pub target_minutes: u32,
    pub logged_minutes: u32,
    /// Logged minutes capped at the target
    pub credited_minutes: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayProgress {
    pub date: NaiveDate,
    pub items: Vec<ItemProgress>,
    pub completed_minutes: u32,
    pub target_minutes: u32,
    pub percentage: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekProgress {
    pub days: Vec<DayProgress>,
    pub completed_minutes: u32,
    pub target_minutes: u32,
    pub percentage: u32,
}

// ============================================================================
// Goal Snapshot
// ============================================================================

/// A quantity-with-deadline goal as stored by the application
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub title: String,
    /// Unit label for display ("pages", "minutes")
    #[serde(default = "default_unit")]
    pub unit: String,
    pub total: u32,
    #[serde(default)]
    pub done: u32,
    pub deadline: NaiveDate,
}

fn default_unit() -> String {
    "units".into()
}
