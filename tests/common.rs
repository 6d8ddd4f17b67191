#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use rtoil::errors::{AppError, AppResult};
use rtoil::models::entry::TimeEntry;
use rtoil::models::entry_id::EntryId;
use rtoil::models::entry_kind::EntryKind;
use rtoil::models::user::{Role, User};
use rtoil::state::AppState;
use rtoil::store::{EntryDraft, EntryPatch, EntryStore, Scope};

pub fn rtl() -> Command {
    cargo_bin_cmd!("rtoil")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtoil.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Register a user against a test DB via the CLI
pub fn register(db_path: &str, email: &str, name: &str, admin: bool) {
    let mut args = vec![
        "--db", db_path, "--test", "init", "--email", email, "--name", name,
    ];
    if admin {
        args.push("--admin");
    }
    rtl().args(&args).assert().success();
}

/// Initialize DB with one admin and one regular user, useful for many tests
pub fn init_two_users(db_path: &str) {
    register(db_path, "boss@x.com", "Boss", true);
    register(db_path, "a@x.com", "Alice", false);
}

// ------------------------------------------------
// Library-level test support
// ------------------------------------------------

pub fn user(email: &str, name: &str, role: Role) -> User {
    User {
        id: 1,
        email: email.to_lowercase(),
        name: name.to_string(),
        role,
    }
}

/// A session state for one user with the given multiplier, no entries.
pub fn state_for(email: &str, admin: bool, multiplier: f64) -> AppState {
    let role = if admin { Role::Admin } else { Role::User };
    let mut st = AppState::new();
    let u = user(email, "Tester", role);
    st.users = vec![u.clone()];
    st.current_user = Some(u);
    st.multiplier = multiplier;
    st
}

/// A bare durable entry for aggregation and filter tests.
pub fn entry(id: i64, email: &str, date: &str, kind: EntryKind, fact: f64, credited: f64) -> TimeEntry {
    TimeEntry {
        id: EntryId::Durable(id),
        user_email: email.to_lowercase(),
        date: rtoil::utils::date::parse_entry_date(date).expect("test date"),
        kind,
        fact_hours: fact,
        credited_hours: credited,
        comment: String::new(),
        approved_by: String::new(),
        acknowledged_by: String::new(),
        edited_at: None,
        change_history: Vec::new(),
        created_at: Some("2025-01-01T00:00:00+00:00".to_string()),
    }
}

/// In-memory store double with scripted failures. Every failure is the
/// uniform transport error the controller is expected to roll back on.
#[derive(Default)]
pub struct MemStore {
    pub entries: Vec<TimeEntry>,
    pub users: Vec<User>,
    pub settings: HashMap<String, String>,
    pub next_id: i64,

    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
    pub fail_set_setting: bool,
    pub fail_get_setting: bool,
    pub fail_users: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    fn boom<T>(&self) -> AppResult<T> {
        Err(AppError::Other("simulated store failure".into()))
    }

    pub fn has_entry(&self, id: i64) -> bool {
        self.entries.iter().any(|e| e.id == EntryId::Durable(id))
    }
}

impl EntryStore for MemStore {
    fn list_entries(&mut self, scope: &Scope) -> AppResult<Vec<TimeEntry>> {
        Ok(match scope {
            Scope::All => self.entries.clone(),
            Scope::User(email) => self
                .entries
                .iter()
                .filter(|e| e.user_email == email.to_lowercase())
                .cloned()
                .collect(),
        })
    }

    fn create_entry(&mut self, draft: &EntryDraft) -> AppResult<TimeEntry> {
        if self.fail_create {
            return self.boom();
        }
        let id = self.next_id;
        self.next_id += 1;
        let ev = TimeEntry {
            id: EntryId::Durable(id),
            user_email: draft.user_email.to_lowercase(),
            date: draft.date,
            kind: draft.kind,
            fact_hours: draft.fact_hours,
            credited_hours: draft.credited_hours,
            comment: draft.comment.clone(),
            approved_by: draft.approved_by.clone(),
            acknowledged_by: String::new(),
            edited_at: None,
            change_history: Vec::new(),
            created_at: Some("2025-06-01T08:00:00+00:00".to_string()),
        };
        self.entries.push(ev.clone());
        Ok(ev)
    }

    fn update_entry(&mut self, id: i64, patch: &EntryPatch) -> AppResult<TimeEntry> {
        if self.fail_update {
            return self.boom();
        }
        let ev = self
            .entries
            .iter_mut()
            .find(|e| e.id == EntryId::Durable(id))
            .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

        if let Some(d) = patch.date {
            ev.date = d;
        }
        if let Some(ref c) = patch.comment {
            ev.comment = c.clone();
        }
        if let Some(ref a) = patch.approved_by {
            ev.approved_by = a.clone();
        }
        if let Some(ref a) = patch.acknowledged_by {
            ev.acknowledged_by = a.clone();
        }
        if let Some(ref t) = patch.edited_at {
            ev.edited_at = Some(t.clone());
        }
        if let Some(ref h) = patch.change_history {
            ev.change_history = h.clone();
        }
        Ok(ev.clone())
    }

    fn delete_entry(&mut self, id: i64) -> AppResult<()> {
        if self.fail_delete {
            return self.boom();
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.id != EntryId::Durable(id));
        if self.entries.len() == before {
            return Err(AppError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    fn list_users(&mut self) -> AppResult<Vec<User>> {
        if self.fail_users {
            return self.boom();
        }
        Ok(self.users.clone())
    }

    fn find_user(&mut self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    fn create_user(&mut self, email: &str, name: &str, role: Role) -> AppResult<User> {
        if self.fail_users {
            return self.boom();
        }
        let u = User {
            id: self.users.len() as i64 + 1,
            email: email.to_lowercase(),
            name: name.to_string(),
            role,
        };
        self.users.push(u.clone());
        Ok(u)
    }

    fn update_user(
        &mut self,
        email: &str,
        name: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<User> {
        if self.fail_users {
            return self.boom();
        }
        let email = email.to_lowercase();
        let u = self
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| AppError::UserNotFound(email.clone()))?;
        if let Some(n) = name {
            u.name = n.to_string();
        }
        if let Some(r) = role {
            u.role = r;
        }
        Ok(u.clone())
    }

    fn delete_user(&mut self, email: &str) -> AppResult<()> {
        if self.fail_users {
            return self.boom();
        }
        let email = email.to_lowercase();
        let before = self.users.len();
        self.users.retain(|u| u.email != email);
        if self.users.len() == before {
            return Err(AppError::UserNotFound(email));
        }
        self.entries.retain(|e| e.user_email != email);
        Ok(())
    }

    fn get_setting(&mut self, key: &str) -> AppResult<Option<String>> {
        if self.fail_get_setting {
            return self.boom();
        }
        Ok(self.settings.get(key).cloned())
    }

    fn set_setting(&mut self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_set_setting {
            return self.boom();
        }
        self.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
