//! Explicit application state container.
//!
//! The web original kept `currentUser`/`currentLogs`/`currentMultiplier` as
//! module-level globals; here all session state lives in one `AppState`
//! value with defined mutation entry points, which is what makes the
//! optimistic rollback logic testable in isolation.

use std::collections::HashSet;

use crate::core::settings::load_multiplier;
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::models::entry_id::EntryId;
use crate::models::user::User;
use crate::store::{EntryStore, Scope};

/// A mutation target, keyed for the in-flight registry. While a mutation
/// for a target is in flight, re-entrant mutations for the same target are
/// rejected instead of interleaved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationTarget {
    Entry(EntryId),
    User(String),
    Multiplier,
}

impl MutationTarget {
    pub fn describe(&self) -> String {
        match self {
            MutationTarget::Entry(id) => format!("entry {}", id),
            MutationTarget::User(email) => format!("user {}", email),
            MutationTarget::Multiplier => "the multiplier".to_string(),
        }
    }
}

pub struct AppState {
    pub current_user: Option<User>,
    pub entries: Vec<TimeEntry>,
    pub users: Vec<User>,
    pub multiplier: f64,

    in_flight: HashSet<MutationTarget>,
    next_pending_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_user: None,
            entries: Vec::new(),
            users: Vec::new(),
            multiplier: crate::core::settings::DEFAULT_MULTIPLIER,
            in_flight: HashSet::new(),
            next_pending_id: 1,
        }
    }

    /// Load session data from the store, the CLI equivalent of the web
    /// app's `loadData`: the user's entries (all entries plus the user
    /// table for admins) and the overtime multiplier.
    pub fn load<S: EntryStore>(store: &mut S, user: User) -> AppResult<Self> {
        let mut state = Self::new();

        let scope = if user.is_admin() {
            Scope::All
        } else {
            Scope::User(user.email.clone())
        };

        state.entries = store.list_entries(&scope)?;
        if user.is_admin() {
            state.users = store.list_users()?;
        }
        state.multiplier = load_multiplier(store);
        state.current_user = Some(user);

        Ok(state)
    }

    // ------------------------------------------------
    // In-flight mutation registry
    // ------------------------------------------------

    /// Claim a target for a mutation. Fails when the same target already
    /// has a mutation in flight (double-submit guard).
    pub fn begin_mutation(&mut self, target: MutationTarget) -> AppResult<()> {
        if !self.in_flight.insert(target.clone()) {
            return Err(AppError::MutationInFlight(target.describe()));
        }
        Ok(())
    }

    pub fn finish_mutation(&mut self, target: &MutationTarget) {
        self.in_flight.remove(target);
    }

    pub fn is_in_flight(&self, target: &MutationTarget) -> bool {
        self.in_flight.contains(target)
    }

    // ------------------------------------------------
    // Defined mutation entry points (no other code touches `entries`
    // or `users` directly)
    // ------------------------------------------------

    pub fn next_pending_id(&mut self) -> u64 {
        let id = self.next_pending_id;
        self.next_pending_id += 1;
        id
    }

    pub fn add_entry(&mut self, entry: TimeEntry) {
        self.entries.push(entry);
    }

    pub fn insert_entry_at(&mut self, index: usize, entry: TimeEntry) {
        let idx = index.min(self.entries.len());
        self.entries.insert(idx, entry);
    }

    pub fn find_entry(&self, id: EntryId) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Remove and return an entry together with its position, so a failed
    /// delete can put it back where it was.
    pub fn take_entry(&mut self, id: EntryId) -> Option<(usize, TimeEntry)> {
        let pos = self.entry_position(id)?;
        Some((pos, self.entries.remove(pos)))
    }

    pub fn replace_entry(&mut self, id: EntryId, entry: TimeEntry) -> bool {
        if let Some(pos) = self.entry_position(id) {
            self.entries[pos] = entry;
            true
        } else {
            false
        }
    }

    pub fn find_user(&self, email: &str) -> Option<&User> {
        let email = email.to_lowercase();
        self.users.iter().find(|u| u.email == email)
    }

    pub fn replace_user(&mut self, email: &str, user: User) -> bool {
        let email = email.to_lowercase();
        if let Some(pos) = self.users.iter().position(|u| u.email == email) {
            self.users[pos] = user;
            true
        } else {
            false
        }
    }

    /// Remove a user and that user's entries (local side of the cascading
    /// delete); returns what was removed for rollback.
    pub fn take_user_cascade(&mut self, email: &str) -> Option<(usize, User, Vec<TimeEntry>)> {
        let email = email.to_lowercase();
        let pos = self.users.iter().position(|u| u.email == email)?;
        let user = self.users.remove(pos);

        let mut removed = Vec::new();
        let mut kept = Vec::new();
        for e in self.entries.drain(..) {
            if e.user_email == email {
                removed.push(e);
            } else {
                kept.push(e);
            }
        }
        self.entries = kept;

        Some((pos, user, removed))
    }

    pub fn restore_user_cascade(&mut self, pos: usize, user: User, entries: Vec<TimeEntry>) {
        let idx = pos.min(self.users.len());
        self.users.insert(idx, user);
        self.entries.extend(entries);
    }

    /// Entries owned by the current user (the admin's personal view).
    pub fn own_entries(&self) -> Vec<&TimeEntry> {
        match &self.current_user {
            Some(u) => self
                .entries
                .iter()
                .filter(|e| e.user_email == u.email)
                .collect(),
            None => Vec::new(),
        }
    }
}
