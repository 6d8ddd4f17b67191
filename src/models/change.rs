use serde::{Deserialize, Serialize};

/// One edited field inside a change record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub from: String,
    pub to: String,
}

/// Audit record appended to an entry's change history on every edit.
/// `was_approved` marks edits made after a time-off entry had already been
/// approved, so admins can spot them in the `history` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeRecord {
    pub changed_at: String, // RFC3339
    pub changed_by: String,
    pub changed_by_email: String,
    pub was_approved: bool,
    #[serde(default)]
    pub approved_by: Option<String>,
    pub changes: Vec<FieldChange>,
}

impl ChangeRecord {
    pub fn push_change(&mut self, field: &str, from: impl Into<String>, to: impl Into<String>) {
        self.changes.push(FieldChange {
            field: field.to_string(),
            from: from.into(),
            to: to.into(),
        });
    }
}
