//! Optimistic mutations over the in-memory entry collection.
//!
//! Every mutation follows the same contract: validate, apply to local state,
//! persist through the store, then either reconcile with the durable record
//! or roll the local state back to exactly what it was. A failure is
//! terminal for that attempt; nothing here retries.

use chrono::{Local, NaiveDate};

use crate::errors::{AppError, AppResult};
use crate::models::change::ChangeRecord;
use crate::models::entry::TimeEntry;
use crate::models::entry_id::EntryId;
use crate::models::entry_kind::EntryKind;
use crate::models::user::User;
use crate::state::{AppState, MutationTarget};
use crate::store::{EntryDraft, EntryPatch, EntryStore};

/// Run one optimistic transaction: claim the target, apply the local
/// mutation, persist, and revert the local mutation if persisting fails.
/// The in-flight guard is released in every outcome.
pub fn transact<S: EntryStore, T>(
    state: &mut AppState,
    store: &mut S,
    target: MutationTarget,
    apply: impl FnOnce(&mut AppState),
    persist: impl FnOnce(&mut S) -> AppResult<T>,
    revert: impl FnOnce(&mut AppState),
) -> AppResult<T> {
    state.begin_mutation(target.clone())?;

    apply(state);

    match persist(store) {
        Ok(value) => {
            state.finish_mutation(&target);
            Ok(value)
        }
        Err(e) => {
            revert(state);
            state.finish_mutation(&target);
            Err(e)
        }
    }
}

/// Hours must be a finite value in (0, 24].
pub fn validate_hours(hours: f64) -> AppResult<()> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::InvalidHours(format!(
            "{} (must be greater than 0)",
            hours
        )));
    }
    if hours > 24.0 {
        return Err(AppError::InvalidHours(format!(
            "{} (cannot exceed 24 hours per day)",
            hours
        )));
    }
    Ok(())
}

fn current_user(state: &AppState) -> AppResult<User> {
    state
        .current_user
        .clone()
        .ok_or_else(|| AppError::Other("no session user loaded".into()))
}

/// Optimistic create.
///
/// A placeholder with a pending id goes into the collection first, credited
/// at the *current* multiplier; the durable record then replaces it. When
/// the store call fails the placeholder is removed again, leaving no
/// residue. Reconciliation is skipped entirely if the placeholder has
/// disappeared in the meantime (deleted while the create was in flight), so
/// a deleted entry is never resurrected.
pub fn create_entry<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    date: NaiveDate,
    kind: EntryKind,
    fact_hours: f64,
    comment: &str,
    approved_by: &str,
) -> AppResult<TimeEntry> {
    validate_hours(fact_hours)?;
    let user = current_user(state)?;

    let pending = state.next_pending_id();
    let placeholder = TimeEntry::placeholder(
        pending,
        &user.email,
        date,
        kind,
        fact_hours,
        state.multiplier,
        comment,
        approved_by,
    );
    let pending_id = placeholder.id;
    let draft = EntryDraft::from_entry(&placeholder);

    let durable = transact(
        state,
        store,
        MutationTarget::Entry(pending_id),
        |st| st.add_entry(placeholder.clone()),
        |s| s.create_entry(&draft),
        |st| {
            st.take_entry(pending_id);
        },
    )?;

    confirm_create(state, pending_id, durable.clone());
    Ok(durable)
}

/// Swap a placeholder for its durable record, keeping its position in the
/// collection. Returns false (and merges nothing) when the placeholder is
/// no longer present.
pub fn confirm_create(state: &mut AppState, pending_id: EntryId, durable: TimeEntry) -> bool {
    match state.take_entry(pending_id) {
        Some((pos, _)) => {
            state.insert_entry_at(pos, durable);
            true
        }
        None => false,
    }
}

/// Build the audit record for an edit, or None when nothing changed.
fn build_change_record(
    old: &TimeEntry,
    new_date: Option<NaiveDate>,
    new_comment: Option<&str>,
    new_approved_by: Option<&str>,
    actor: &User,
) -> Option<ChangeRecord> {
    let mut record = ChangeRecord {
        changed_at: Local::now().to_rfc3339(),
        changed_by: actor.name.clone(),
        changed_by_email: actor.email.clone(),
        was_approved: old.is_approved(),
        approved_by: if old.approved_by.is_empty() {
            None
        } else {
            Some(old.approved_by.clone())
        },
        changes: Vec::new(),
    };

    if let Some(d) = new_date
        && d != old.date
    {
        record.push_change("date", old.date_str(), d.format("%Y-%m-%d").to_string());
    }
    if let Some(c) = new_comment
        && c != old.comment
    {
        record.push_change("comment", old.comment.clone(), c);
    }
    if let Some(a) = new_approved_by
        && a != old.approved_by
    {
        record.push_change("approved_by", old.approved_by.clone(), a);
    }

    if record.changes.is_empty() {
        None
    } else {
        Some(record)
    }
}

/// Optimistic edit of date/comment/approved-by (hours and kind are
/// immutable after creation). The prior field values are snapshotted and
/// restored verbatim when the store rejects the update.
///
/// Editing an approved time-off entry does not drop the approval: the edit
/// is appended to the change history with `was_approved` set and any prior
/// acknowledgement is cleared, so it resurfaces for admin review.
pub fn update_entry<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    id: EntryId,
    new_date: Option<NaiveDate>,
    new_comment: Option<&str>,
    new_approved_by: Option<&str>,
) -> AppResult<TimeEntry> {
    let durable_id = id
        .durable()
        .ok_or_else(|| AppError::MutationInFlight(format!("entry {}", id)))?;
    let actor = current_user(state)?;

    let snapshot = state
        .find_entry(id)
        .cloned()
        .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

    let record = match build_change_record(&snapshot, new_date, new_comment, new_approved_by, &actor)
    {
        Some(r) => r,
        None => return Ok(snapshot), // nothing changed
    };

    let edited_at = record.changed_at.clone();
    let mut history = snapshot.change_history.clone();
    history.push(record);

    // local merge, applied optimistically
    let mut merged = snapshot.clone();
    if let Some(d) = new_date {
        merged.date = d;
    }
    if let Some(c) = new_comment {
        merged.comment = c.to_string();
    }
    if let Some(a) = new_approved_by {
        merged.approved_by = a.to_string();
    }
    merged.edited_at = Some(edited_at.clone());
    merged.change_history = history.clone();
    if snapshot.is_approved() {
        merged.acknowledged_by = String::new();
    }

    let patch = EntryPatch {
        date: new_date,
        comment: new_comment.map(str::to_string),
        approved_by: new_approved_by.map(str::to_string),
        acknowledged_by: if snapshot.is_approved() {
            Some(String::new())
        } else {
            None
        },
        edited_at: Some(edited_at),
        change_history: Some(history),
    };

    let snap = snapshot.clone();
    let stored = transact(
        state,
        store,
        MutationTarget::Entry(id),
        |st| {
            st.replace_entry(id, merged.clone());
        },
        |s| s.update_entry(durable_id, &patch),
        |st| {
            st.replace_entry(id, snap.clone());
        },
    )?;

    // reconcile with the store's canonical row
    state.replace_entry(id, stored.clone());
    Ok(stored)
}

/// Optimistic delete. The entry leaves the collection immediately; a store
/// failure puts it back at its prior position. A not-found from the store
/// is NOT rolled back: the entry is gone remotely, so the local removal
/// stands and the caller surfaces a notice.
pub fn delete_entry<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    id: EntryId,
) -> AppResult<TimeEntry> {
    let durable_id = id
        .durable()
        .ok_or_else(|| AppError::MutationInFlight(format!("entry {}", id)))?;

    let target = MutationTarget::Entry(id);
    state.begin_mutation(target.clone())?;

    let Some((pos, removed)) = state.take_entry(id) else {
        state.finish_mutation(&target);
        return Err(AppError::EntryNotFound(id.to_string()));
    };

    match store.delete_entry(durable_id) {
        Ok(()) => {
            state.finish_mutation(&target);
            Ok(removed)
        }
        Err(e) if e.is_not_found() => {
            state.finish_mutation(&target);
            Err(e)
        }
        Err(e) => {
            state.insert_entry_at(pos, removed);
            state.finish_mutation(&target);
            Err(e)
        }
    }
}

/// Undo of a delete: a fresh create carrying the removed entry's fields.
/// The restored entry gets a new durable id; callers must not assume id
/// stability across an undo.
pub fn undo_delete<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    removed: &TimeEntry,
) -> AppResult<TimeEntry> {
    let draft = EntryDraft::from_entry(removed);
    let restored = store.create_entry(&draft)?;
    state.add_entry(restored.clone());
    Ok(restored)
}

/// Admin approval of a time-off entry (sets the approving admin's name).
pub fn approve_timeoff<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    id: EntryId,
    admin_name: &str,
) -> AppResult<TimeEntry> {
    let durable_id = id
        .durable()
        .ok_or_else(|| AppError::MutationInFlight(format!("entry {}", id)))?;

    let snapshot = state
        .find_entry(id)
        .cloned()
        .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

    if !snapshot.kind.is_timeoff() {
        return Err(AppError::InvalidKind(
            "only time-off entries can be approved".into(),
        ));
    }

    let mut merged = snapshot.clone();
    merged.approved_by = admin_name.to_string();

    let patch = EntryPatch {
        approved_by: Some(admin_name.to_string()),
        ..EntryPatch::default()
    };

    let snap = snapshot.clone();
    let stored = transact(
        state,
        store,
        MutationTarget::Entry(id),
        |st| {
            st.replace_entry(id, merged.clone());
        },
        |s| s.update_entry(durable_id, &patch),
        |st| {
            st.replace_entry(id, snap.clone());
        },
    )?;

    state.replace_entry(id, stored.clone());
    Ok(stored)
}

/// Admin acknowledgement of a post-approval edit.
pub fn acknowledge_edit<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    id: EntryId,
    admin_name: &str,
) -> AppResult<TimeEntry> {
    let durable_id = id
        .durable()
        .ok_or_else(|| AppError::MutationInFlight(format!("entry {}", id)))?;

    let snapshot = state
        .find_entry(id)
        .cloned()
        .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

    let mut merged = snapshot.clone();
    merged.acknowledged_by = admin_name.to_string();

    let patch = EntryPatch {
        acknowledged_by: Some(admin_name.to_string()),
        ..EntryPatch::default()
    };

    let snap = snapshot.clone();
    let stored = transact(
        state,
        store,
        MutationTarget::Entry(id),
        |st| {
            st.replace_entry(id, merged.clone());
        },
        |s| s.update_entry(durable_id, &patch),
        |st| {
            st.replace_entry(id, snap.clone());
        },
    )?;

    state.replace_entry(id, stored.clone());
    Ok(stored)
}
