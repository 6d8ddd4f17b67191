//! Balance aggregation. Pure functions over entry collections; the caller
//! supplies the relevant subset (one user's entries, or everything for the
//! admin overview).

use crate::models::entry::TimeEntry;
use crate::utils::date::same_month;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub overtime_total: f64,
    pub timeoff_total: f64,
}

/// Credited hours of one entry, with non-finite values counted as zero so a
/// corrupted row can never poison a whole balance.
fn credited(ev: &TimeEntry) -> f64 {
    if ev.credited_hours.is_finite() {
        ev.credited_hours
    } else {
        0.0
    }
}

/// Net balance: sum of credited hours (overtime positive, time off negative).
pub fn calculate_balance(entries: &[TimeEntry]) -> f64 {
    entries.iter().map(credited).sum()
}

/// Per-kind totals. For any consistent entry set,
/// `calculate_balance == overtime_total - timeoff_total`.
pub fn totals_by_type(entries: &[TimeEntry]) -> Totals {
    let overtime_total = entries
        .iter()
        .filter(|e| e.kind.is_overtime())
        .map(credited)
        .sum();
    let timeoff_total = entries
        .iter()
        .filter(|e| e.kind.is_timeoff())
        .map(|e| credited(e).abs())
        .sum();

    Totals {
        overtime_total,
        timeoff_total,
    }
}

/// Absolute hours moved in the calendar month of `reference` (local
/// calendar semantics; entry dates are already plain local dates).
pub fn month_hours(entries: &[TimeEntry], reference: NaiveDate) -> f64 {
    entries
        .iter()
        .filter(|e| same_month(e.date, reference))
        .map(|e| credited(e).abs())
        .sum()
}
