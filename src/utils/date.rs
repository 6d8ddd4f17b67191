//! Centralized date parsing.
//!
//! Every entry date read from user input or from the store goes through
//! `parse_entry_date`, so a bare `YYYY-MM-DD` is always treated as a local
//! calendar date. Going through a timestamp type here would shift entries
//! by one day for clients west of UTC; the reference data contains both
//! plain dates and ISO-datetimes-at-midnight, and both must land on the
//! same calendar day.

use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a bare `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse an entry date as stored or as typed: either `YYYY-MM-DD` or an
/// ISO datetime (`2026-01-03T00:00:00.000Z` and friends). The date part is
/// taken verbatim, never routed through a UTC conversion.
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split('T').next().unwrap_or(s);
    parse_date(date_part)
}

/// Monday of the week containing `d`.
pub fn start_of_week(d: NaiveDate) -> NaiveDate {
    let days_from_monday = d.weekday().num_days_from_monday() as i64;
    d - Duration::days(days_from_monday)
}

/// First day of the month containing `d`.
pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d)
}

/// True when `a` and `b` fall in the same calendar month and year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Display format used in lists and in free-text search: DD.MM.YYYY
pub fn display_date(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}
