//! Goal snapshot loader.
//!
//! A goal is a quantity with a deadline (e.g. a book with a page count). The
//! application stores it as JSON; this module reads it and turns it into an
//! allocation request.

use crate::config::PlannerConfig;
use crate::{AllocationRequest, Error, Goal, Result};
use chrono::NaiveDate;
use std::path::Path;

impl Goal {
    /// Units still to do; never negative even if `done` overshoots `total`
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.done)
    }

    /// Rounded share of `total` already done, capped at 100
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.done as f64 / self.total as f64 * 100.0).round() as u32;
        percent.min(100)
    }
}

impl AllocationRequest {
    /// Request for the remainder of `goal`, using the planner defaults
    pub fn from_goal(goal: &Goal, today: NaiveDate, planner: &PlannerConfig) -> Self {
        AllocationRequest::new(goal.remaining(), today, goal.deadline)
            .with_distribution(planner.distribution)
            .with_intensity(planner.intensity)
            .with_excluded_weekdays(planner.excluded_weekdays.iter().copied())
    }
}

/// Load a goal snapshot from a JSON file
///
/// Unlike the optional goal table, a goal file the caller asked for must exist
/// and parse.
pub fn load_goal(path: &Path) -> Result<Goal> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Goal(format!("cannot read {:?}: {}", path, e)))?;

    let goal: Goal = serde_json::from_str(&contents)?;

    if goal.title.trim().is_empty() {
        return Err(Error::Goal(format!("goal in {:?} has no title", path)));
    }

    tracing::info!(
        "Loaded goal '{}': {}/{} {} due {}",
        goal.title,
        goal.done,
        goal.total,
        goal.unit,
        goal.deadline
    );

    Ok(goal)
}
