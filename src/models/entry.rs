use super::{change::ChangeRecord, entry_id::EntryId, entry_kind::EntryKind};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeEntry {
    pub id: EntryId,
    pub user_email: String,  // ⇔ entries.user_email (TEXT, lowercase)
    pub date: NaiveDate,     // ⇔ entries.date (TEXT "YYYY-MM-DD")
    pub kind: EntryKind,     // ⇔ entries.kind ('overtime' | 'timeoff')
    pub fact_hours: f64,     // ⇔ entries.fact_hours (REAL, 0 < h <= 24)
    pub credited_hours: f64, // ⇔ entries.credited_hours (REAL, signed)
    pub comment: String,
    pub approved_by: String,     // admin name, timeoff only
    pub acknowledged_by: String, // admin who acknowledged a post-approval edit
    pub edited_at: Option<String>,
    pub change_history: Vec<ChangeRecord>, // ⇔ entries.change_history (JSON TEXT)
    pub created_at: Option<String>,        // store-assigned; None on placeholders
}

impl TimeEntry {
    /// Build a not-yet-persisted placeholder for an in-flight create.
    /// Credited hours are derived from the *current* multiplier; `created_at`
    /// stays empty until the store confirms the record.
    #[allow(clippy::too_many_arguments)]
    pub fn placeholder(
        pending_id: u64,
        user_email: &str,
        date: NaiveDate,
        kind: EntryKind,
        fact_hours: f64,
        multiplier: f64,
        comment: &str,
        approved_by: &str,
    ) -> Self {
        Self {
            id: EntryId::Pending(pending_id),
            user_email: user_email.to_lowercase(),
            date,
            kind,
            fact_hours,
            credited_hours: kind.credited(fact_hours, multiplier),
            comment: comment.to_string(),
            approved_by: if kind.is_timeoff() {
                approved_by.to_string()
            } else {
                String::new()
            },
            acknowledged_by: String::new(),
            edited_at: None,
            change_history: Vec::new(),
            created_at: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// True for an approved time-off entry.
    pub fn is_approved(&self) -> bool {
        self.kind.is_timeoff() && !self.approved_by.is_empty()
    }

    /// Edited after approval and not yet acknowledged by an admin.
    pub fn needs_acknowledgement(&self) -> bool {
        self.edited_at.is_some()
            && self.acknowledged_by.is_empty()
            && self
                .change_history
                .iter()
                .any(|c| c.was_approved)
    }
}
