#![forbid(unsafe_code)]

//! Planning core for the Pace productivity tracker.
//!
//! This crate provides:
//! - Domain types (allocation requests and plans, phases, weekly goals)
//! - The deadline allocation engine and its weight curve
//! - Weekly progress aggregation
//! - Snapshot loading (goals, goal tables, work logs) and CSV export
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod dates;
pub mod config;
pub mod logging;
pub mod curve;
pub mod engine;
pub mod weekly;
pub mod goal;
pub mod worklog;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use dates::WeekStart;
pub use engine::allocate;
pub use weekly::{day_progress, week_progress, MinutesLookup};
pub use goal::load_goal;
pub use worklog::{WorkEntry, WorkLog};
pub use export::write_plan_csv;
