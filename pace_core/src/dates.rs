//! Calendar-day helpers shared by the allocation engine and the weekly aggregator.
//!
//! Everything works on `NaiveDate`, which is already midnight-normalized, so a
//! day difference is always a whole number of calendar days.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// English weekday names indexed Sunday-first (0 = Sunday)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// First day of the week used for week boundaries
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Day of week with Sunday = 0 through Saturday = 6
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// English name for a Sunday-first weekday index
///
/// Out-of-range indices wrap modulo 7.
pub fn weekday_name(index: u8) -> &'static str {
    WEEKDAY_NAMES[(index % 7) as usize]
}

/// `date` shifted by `days` (may be negative)
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// First day of the week containing `date`
pub fn week_start(date: NaiveDate, first_day: WeekStart) -> NaiveDate {
    let offset = match first_day {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    add_days(date, -(offset as i64))
}

/// The seven consecutive dates of the week containing `date`
pub fn week_dates(date: NaiveDate, first_day: WeekStart) -> [NaiveDate; 7] {
    let start = week_start(date, first_day);
    std::array::from_fn(|i| add_days(start, i as i64))
}

/// Parse a weekday given as a Sunday-first index ("0".."6") or an English
/// name or abbreviation ("sun", "Monday", "tue").
pub fn parse_weekday(s: &str) -> Option<u8> {
    let s = s.trim().to_lowercase();
    if let Ok(n) = s.parse::<u8>() {
        return (n < 7).then_some(n);
    }

    match s.as_str() {
        "sun" | "sunday" => Some(0),
        "mon" | "monday" => Some(1),
        "tue" | "tues" | "tuesday" => Some(2),
        "wed" | "wednesday" => Some(3),
        "thu" | "thur" | "thurs" | "thursday" => Some(4),
        "fri" | "friday" => Some(5),
        "sat" | "saturday" => Some(6),
        _ => None,
    }
}
