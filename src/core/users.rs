//! User management: registration at first sign-in, optimistic name/role
//! edits, and deletion with cascading removal of the user's entries.

use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use crate::state::{AppState, MutationTarget};
use crate::store::EntryStore;

use super::optimistic::transact;

/// First-sign-in semantics: return the user when known, create the record
/// otherwise. The display name defaults to the mailbox part of the email.
pub fn ensure_user<S: EntryStore>(
    store: &mut S,
    email: &str,
    name: Option<&str>,
    role: Role,
) -> AppResult<User> {
    let email = email.to_lowercase();

    if let Some(existing) = store.find_user(&email)? {
        return Ok(existing);
    }

    let fallback = email.split('@').next().unwrap_or(&email).to_string();
    let name = name.map(str::to_string).unwrap_or(fallback);
    store.create_user(&email, &name, role)
}

/// Optimistic rename. Applies to the user table (and the session user when
/// renaming oneself), restores both on failure.
pub fn update_user_name<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    email: &str,
    new_name: &str,
) -> AppResult<User> {
    let email = email.to_lowercase();
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(AppError::Other("name cannot be empty".into()));
    }

    let snapshot = state.find_user(&email).cloned();
    let session_snapshot = state.current_user.clone();

    let mut updated = match (&snapshot, &state.current_user) {
        (Some(u), _) => u.clone(),
        (None, Some(u)) if u.email == email => u.clone(),
        _ => store
            .find_user(&email)?
            .ok_or_else(|| AppError::UserNotFound(email.clone()))?,
    };
    updated.name = new_name.to_string();

    let stored = transact(
        state,
        store,
        MutationTarget::User(email.clone()),
        |st| {
            st.replace_user(&email, updated.clone());
            if let Some(ref mut me) = st.current_user
                && me.email == email
            {
                me.name = updated.name.clone();
            }
        },
        |s| s.update_user(&email, Some(new_name), None),
        |st| {
            if let Some(u) = snapshot.clone() {
                st.replace_user(&email, u);
            }
            st.current_user = session_snapshot.clone();
        },
    )?;

    state.replace_user(&email, stored.clone());
    Ok(stored)
}

/// Optimistic role change.
pub fn update_user_role<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    email: &str,
    new_role: Role,
) -> AppResult<User> {
    let email = email.to_lowercase();

    let snapshot = state
        .find_user(&email)
        .cloned()
        .ok_or_else(|| AppError::UserNotFound(email.clone()))?;

    let mut updated = snapshot.clone();
    updated.role = new_role;

    let snap = snapshot.clone();
    let stored = transact(
        state,
        store,
        MutationTarget::User(email.clone()),
        |st| {
            st.replace_user(&email, updated.clone());
        },
        |s| s.update_user(&email, None, Some(new_role)),
        |st| {
            st.replace_user(&email, snap.clone());
        },
    )?;

    state.replace_user(&email, stored.clone());
    Ok(stored)
}

/// Optimistic user deletion with local cascade: the user and all of the
/// user's entries leave the in-memory state immediately and come back
/// exactly as they were if the store rejects the delete. Deleting the
/// session user's own account is rejected up front.
pub fn delete_user<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    email: &str,
) -> AppResult<()> {
    let email = email.to_lowercase();

    if let Some(me) = &state.current_user
        && me.email == email
    {
        return Err(AppError::NotPermitted(
            "you cannot delete your own account".into(),
        ));
    }

    let target = MutationTarget::User(email.clone());
    state.begin_mutation(target.clone())?;

    let Some((pos, user, entries)) = state.take_user_cascade(&email) else {
        state.finish_mutation(&target);
        return Err(AppError::UserNotFound(email));
    };

    match store.delete_user(&email) {
        Ok(()) => {
            state.finish_mutation(&target);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            // gone remotely; the local removal stands
            state.finish_mutation(&target);
            Err(e)
        }
        Err(e) => {
            state.restore_user_cascade(pos, user, entries);
            state.finish_mutation(&target);
            Err(e)
        }
    }
}
