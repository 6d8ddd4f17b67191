//! SQLite-backed store, the shipped persistence collaborator.

use crate::db::pool::DbPool;
use crate::db::{queries, settings, users};
use crate::errors::AppResult;
use crate::models::entry::TimeEntry;
use crate::models::user::{Role, User};

use super::{EntryDraft, EntryPatch, EntryStore, Scope};

pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }
}

impl EntryStore for SqliteStore {
    fn list_entries(&mut self, scope: &Scope) -> AppResult<Vec<TimeEntry>> {
        match scope {
            Scope::User(email) => queries::load_entries(&self.pool.conn, Some(email)),
            Scope::All => queries::load_entries(&self.pool.conn, None),
        }
    }

    fn create_entry(&mut self, draft: &EntryDraft) -> AppResult<TimeEntry> {
        let ev = TimeEntry {
            id: crate::models::entry_id::EntryId::Pending(0), // ignored on insert
            user_email: draft.user_email.clone(),
            date: draft.date,
            kind: draft.kind,
            fact_hours: draft.fact_hours,
            credited_hours: draft.credited_hours,
            comment: draft.comment.clone(),
            approved_by: draft.approved_by.clone(),
            acknowledged_by: String::new(),
            edited_at: None,
            change_history: Vec::new(),
            created_at: None,
        };
        queries::insert_entry(&self.pool.conn, &ev)
    }

    fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> AppResult<TimeEntry> {
        queries::update_entry(&self.pool.conn, id, patch)
    }

    fn delete_entry(&mut self, id: i64) -> AppResult<()> {
        queries::delete_entry(&self.pool.conn, id)
    }

    fn list_users(&mut self) -> AppResult<Vec<User>> {
        users::load_users(&self.pool.conn)
    }

    fn find_user(&mut self, email: &str) -> AppResult<Option<User>> {
        users::find_user_by_email(&self.pool.conn, email)
    }

    fn create_user(&mut self, email: &str, name: &str, role: Role) -> AppResult<User> {
        users::insert_user(&self.pool.conn, email, name, role)
    }

    fn update_user(
        &mut self,
        email: &str,
        name: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<User> {
        users::update_user(&self.pool.conn, email, name, role)
    }

    fn delete_user(&mut self, email: &str) -> AppResult<()> {
        users::delete_user(&self.pool.conn, email)
    }

    fn get_setting(&mut self, key: &str) -> AppResult<Option<String>> {
        settings::get_setting(&self.pool.conn, key)
    }

    fn set_setting(&mut self, key: &str, value: &str) -> AppResult<()> {
        settings::set_setting(&self.pool.conn, key, value)
    }
}
