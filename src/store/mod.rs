//! Persistence collaborator boundary.
//!
//! The optimistic mutation layer talks to storage only through the
//! [`EntryStore`] trait, so the backing engine can be swapped (the shipped
//! implementation is SQLite) and failures can be injected in tests. Any
//! method may fail; the caller reacts uniformly by rolling back its local
//! state.

pub mod sqlite;

use crate::errors::AppResult;
use crate::models::entry::TimeEntry;
use crate::models::entry_kind::EntryKind;
use crate::models::user::{Role, User};
use chrono::NaiveDate;

pub use crate::db::queries::EntryPatch;
pub use sqlite::SqliteStore;

/// Which entries a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// One user's own entries.
    User(String),
    /// Everything; admin views only.
    All,
}

/// Fields for a durable entry create. The id and creation timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub user_email: String,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub fact_hours: f64,
    pub credited_hours: f64,
    pub comment: String,
    pub approved_by: String,
}

impl EntryDraft {
    /// A draft carrying over the fields of an existing entry, used by the
    /// delete-undo path (a fresh create, never a reversal of the delete).
    pub fn from_entry(ev: &TimeEntry) -> Self {
        Self {
            user_email: ev.user_email.clone(),
            date: ev.date,
            kind: ev.kind,
            fact_hours: ev.fact_hours,
            credited_hours: ev.credited_hours,
            comment: ev.comment.clone(),
            approved_by: ev.approved_by.clone(),
        }
    }
}

pub trait EntryStore {
    fn list_entries(&mut self, scope: &Scope) -> AppResult<Vec<TimeEntry>>;
    fn create_entry(&mut self, draft: &EntryDraft) -> AppResult<TimeEntry>;
    fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> AppResult<TimeEntry>;
    fn delete_entry(&mut self, id: i64) -> AppResult<()>;

    fn list_users(&mut self) -> AppResult<Vec<User>>;
    fn find_user(&mut self, email: &str) -> AppResult<Option<User>>;
    fn create_user(&mut self, email: &str, name: &str, role: Role) -> AppResult<User>;
    fn update_user(
        &mut self,
        email: &str,
        name: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<User>;
    /// Cascades deletion of the user's entries.
    fn delete_user(&mut self, email: &str) -> AppResult<()>;

    fn get_setting(&mut self, key: &str) -> AppResult<Option<String>>;
    fn set_setting(&mut self, key: &str, value: &str) -> AppResult<()>;
}
