//! Date-bucket, free-text and sort filtering of entry lists.

use crate::models::entry::TimeEntry;
use crate::models::user::User;
use crate::utils::date::{display_date, start_of_month, start_of_week};
use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateBucket {
    All,
    Today,
    Week,
    Month,
}

impl DateBucket {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(DateBucket::All),
            "today" => Some(DateBucket::Today),
            "week" => Some(DateBucket::Week),
            "month" => Some(DateBucket::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Keep the entries falling inside `bucket`, evaluated against `today`.
///
/// The week window starts on Monday, not Sunday, and both week and month
/// windows are closed at `today` (future-dated entries fall outside them;
/// they still show under `All`).
pub fn filter_by_bucket(entries: &[TimeEntry], bucket: DateBucket, today: NaiveDate) -> Vec<TimeEntry> {
    match bucket {
        DateBucket::All => entries.to_vec(),
        DateBucket::Today => entries.iter().filter(|e| e.date == today).cloned().collect(),
        DateBucket::Week => {
            let monday = start_of_week(today);
            entries
                .iter()
                .filter(|e| e.date >= monday && e.date <= today)
                .cloned()
                .collect()
        }
        DateBucket::Month => {
            let first = start_of_month(today);
            entries
                .iter()
                .filter(|e| e.date >= first && e.date <= today)
                .cloned()
                .collect()
        }
    }
}

/// Case-insensitive substring search over comment and display date; when an
/// owner list is supplied (admin view) the owner's name and email match too.
/// A blank term returns the input unchanged.
pub fn search_entries(
    entries: &[TimeEntry],
    term: &str,
    owners: Option<&[User]>,
) -> Vec<TimeEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|e| {
            if e.comment.to_lowercase().contains(&term) {
                return true;
            }
            if display_date(e.date).contains(&term) {
                return true;
            }
            if let Some(users) = owners {
                if e.user_email.to_lowercase().contains(&term) {
                    return true;
                }
                let name = users
                    .iter()
                    .find(|u| u.email == e.user_email)
                    .map(|u| u.name.to_lowercase())
                    .unwrap_or_default();
                if name.contains(&term) {
                    return true;
                }
            }
            false
        })
        .cloned()
        .collect()
}

/// Sort by date with the entry id as tie-breaker, so repeated sorts of the
/// same collection always produce the same order.
pub fn sort_entries(entries: &[TimeEntry], order: SortOrder) -> Vec<TimeEntry> {
    let mut out = entries.to_vec();
    match order {
        SortOrder::Asc => out.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id))),
        SortOrder::Desc => out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id))),
    }
    out
}
