mod common;
use common::{MemStore, state_for, user};

use chrono::NaiveDate;
use rtoil::core::optimistic::create_entry;
use rtoil::core::settings::{
    DEFAULT_MULTIPLIER, MULTIPLIER_KEY, load_multiplier, set_multiplier,
};
use rtoil::core::users::{delete_user, ensure_user, update_user_name, update_user_role};
use rtoil::errors::AppError;
use rtoil::models::entry_kind::EntryKind;
use rtoil::models::user::Role;
use rtoil::store::EntryStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ------------------------------------------------
// Multiplier
// ------------------------------------------------

#[test]
fn multiplier_defaults_when_store_fails_or_is_empty() {
    let mut store = MemStore::new();
    assert_eq!(load_multiplier(&mut store), DEFAULT_MULTIPLIER);

    store.fail_get_setting = true;
    assert_eq!(load_multiplier(&mut store), DEFAULT_MULTIPLIER);

    store.fail_get_setting = false;
    store
        .set_setting(MULTIPLIER_KEY, "not-a-number")
        .expect("seed");
    assert_eq!(load_multiplier(&mut store), DEFAULT_MULTIPLIER);

    store.set_setting(MULTIPLIER_KEY, "-3").expect("seed");
    assert_eq!(load_multiplier(&mut store), DEFAULT_MULTIPLIER);

    store.set_setting(MULTIPLIER_KEY, "2").expect("seed");
    assert_eq!(load_multiplier(&mut store), 2.0);
}

#[test]
fn invalid_multiplier_is_rejected_without_any_state_change() {
    let mut state = state_for("boss@x.com", true, 1.5);
    let mut store = MemStore::new();

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = set_multiplier(&mut state, &mut store, bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidMultiplier(_)), "value {}", bad);
    }

    assert_eq!(state.multiplier, 1.5);
    assert!(store.settings.is_empty()); // never reached the store
}

#[test]
fn multiplier_update_applies_and_persists() {
    let mut state = state_for("boss@x.com", true, 1.5);
    let mut store = MemStore::new();

    set_multiplier(&mut state, &mut store, 2.0).expect("set");
    assert_eq!(state.multiplier, 2.0);
    assert_eq!(store.settings.get(MULTIPLIER_KEY).unwrap(), "2");

    // new entries credit at the new rate
    let created = create_entry(
        &mut state,
        &mut store,
        d(2025, 1, 10),
        EntryKind::Overtime,
        2.0,
        "",
        "",
    )
    .expect("create");
    assert_eq!(created.credited_hours, 4.0);
}

#[test]
fn failed_multiplier_update_rolls_back() {
    let mut state = state_for("boss@x.com", true, 1.5);
    let mut store = MemStore::new();
    store.fail_set_setting = true;

    let err = set_multiplier(&mut state, &mut store, 2.5).unwrap_err();
    assert!(matches!(err, AppError::Other(_)));
    assert_eq!(state.multiplier, 1.5); // old value restored
    assert!(store.settings.is_empty());
}

// ------------------------------------------------
// Users
// ------------------------------------------------

#[test]
fn ensure_user_creates_once_and_derives_name() {
    let mut store = MemStore::new();

    let u = ensure_user(&mut store, "Carol@X.com", None, Role::User).expect("ensure");
    assert_eq!(u.email, "carol@x.com");
    assert_eq!(u.name, "carol"); // mailbox part

    let again = ensure_user(&mut store, "carol@x.com", Some("Ignored"), Role::Admin)
        .expect("ensure again");
    assert_eq!(again.id, u.id); // no duplicate registration
    assert_eq!(again.role, Role::User);
    assert_eq!(store.users.len(), 1);
}

#[test]
fn rename_applies_optimistically_and_rolls_back_on_failure() {
    let mut state = state_for("boss@x.com", true, 1.5);
    state.users.push(user("a@x.com", "Alice", Role::User));
    let mut store = MemStore::new();
    store.users = state.users.clone();

    let renamed = update_user_name(&mut state, &mut store, "a@x.com", "Alicia").expect("rename");
    assert_eq!(renamed.name, "Alicia");
    assert_eq!(state.find_user("a@x.com").unwrap().name, "Alicia");

    store.fail_users = true;
    let err = update_user_name(&mut state, &mut store, "a@x.com", "Broken").unwrap_err();
    assert!(matches!(err, AppError::Other(_)));
    assert_eq!(state.find_user("a@x.com").unwrap().name, "Alicia");
}

#[test]
fn renaming_self_updates_the_session_user() {
    let mut state = state_for("boss@x.com", true, 1.5);
    let mut store = MemStore::new();
    store.users = state.users.clone();

    update_user_name(&mut state, &mut store, "boss@x.com", "Big Boss").expect("rename");
    assert_eq!(state.current_user.as_ref().unwrap().name, "Big Boss");
}

#[test]
fn role_change_round_trips() {
    let mut state = state_for("boss@x.com", true, 1.5);
    state.users.push(user("a@x.com", "Alice", Role::User));
    let mut store = MemStore::new();
    store.users = state.users.clone();

    let promoted = update_user_role(&mut state, &mut store, "a@x.com", Role::Admin).expect("role");
    assert!(promoted.is_admin());
    assert!(store.users.iter().any(|u| u.email == "a@x.com" && u.is_admin()));
}

#[test]
fn deleting_a_user_cascades_to_their_entries() {
    let mut state = state_for("boss@x.com", true, 1.5);
    state.users.push(user("a@x.com", "Alice", Role::User));
    let mut store = MemStore::new();
    store.users = state.users.clone();

    // one entry each for the admin and for Alice
    create_entry(&mut state, &mut store, d(2025, 1, 9), EntryKind::Overtime, 1.0, "", "")
        .expect("own entry");
    state.current_user = Some(user("a@x.com", "Alice", Role::User));
    create_entry(&mut state, &mut store, d(2025, 1, 10), EntryKind::Timeoff, 2.0, "", "")
        .expect("alice entry");
    state.current_user = Some(user("boss@x.com", "Tester", Role::Admin));

    delete_user(&mut state, &mut store, "a@x.com").expect("delete");

    assert!(state.find_user("a@x.com").is_none());
    assert!(state.entries.iter().all(|e| e.user_email != "a@x.com"));
    assert!(store.users.iter().all(|u| u.email != "a@x.com"));
    assert!(store.entries.iter().all(|e| e.user_email != "a@x.com"));

    // the admin's own entry is untouched
    assert_eq!(state.entries.len(), 1);
}

#[test]
fn failed_user_delete_restores_user_and_entries() {
    let mut state = state_for("boss@x.com", true, 1.5);
    state.users.push(user("a@x.com", "Alice", Role::User));
    let mut store = MemStore::new();
    store.users = state.users.clone();

    state.current_user = Some(user("a@x.com", "Alice", Role::User));
    create_entry(&mut state, &mut store, d(2025, 1, 10), EntryKind::Timeoff, 2.0, "", "")
        .expect("alice entry");
    state.current_user = Some(user("boss@x.com", "Tester", Role::Admin));

    let users_before = state.users.clone();
    let entries_before = state.entries.len();

    store.fail_users = true;
    let err = delete_user(&mut state, &mut store, "a@x.com").unwrap_err();
    assert!(matches!(err, AppError::Other(_)));

    assert_eq!(state.users, users_before);
    assert_eq!(state.entries.len(), entries_before);
}

#[test]
fn self_deletion_is_rejected_up_front() {
    let mut state = state_for("boss@x.com", true, 1.5);
    let mut store = MemStore::new();
    store.users = state.users.clone();

    let err = delete_user(&mut state, &mut store, "boss@x.com").unwrap_err();
    assert!(matches!(err, AppError::NotPermitted(_)));
    assert!(state.find_user("boss@x.com").is_some());
    assert_eq!(store.users.len(), 1);
}
