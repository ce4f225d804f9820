//! CSV export of allocation plans.

use crate::{AllocationPlan, DayAllocation, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    weekday: &'a str,
    allocated: u32,
    cumulative: u32,
    percent_of_average: u32,
    excluded: bool,
}

impl<'a> From<&'a DayAllocation> for CsvRow<'a> {
    fn from(day: &'a DayAllocation) -> Self {
        CsvRow {
            date: day.date.to_string(),
            weekday: &day.weekday_name,
            allocated: day.allocated,
            cumulative: day.cumulative_allocated,
            percent_of_average: day.percent_of_average,
            excluded: day.is_excluded,
        }
    }
}

/// Write one row per plan day to `path`, replacing any existing file
///
/// Returns the number of rows written. An expired plan produces a header-only
/// file.
pub fn write_plan_csv(plan: &AllocationPlan, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Written by hand so an empty plan still gets a header
    writer.write_record([
        "date",
        "weekday",
        "allocated",
        "cumulative",
        "percent_of_average",
        "excluded",
    ])?;

    for day in &plan.days {
        writer.serialize(CsvRow::from(day))?;
    }

    writer.flush()?;

    tracing::info!("Wrote {} plan days to {:?}", plan.days.len(), path);
    Ok(plan.days.len())
}
