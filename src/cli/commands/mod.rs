pub mod add;
pub mod approve;
pub mod balance;
pub mod config;
pub mod del;
pub mod edit;
pub mod history;
pub mod init;
pub mod list;
pub mod log;
pub mod settings;
pub mod users;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::state::AppState;
use crate::store::{EntryStore, SqliteStore};

/// Open the store and resolve the acting user for this invocation.
/// Schema migrations are idempotent and run on every open, so a database
/// created by an older version is upgraded transparently.
pub fn open_session(cli: &Cli, cfg: &Config) -> AppResult<(SqliteStore, User)> {
    let mut store = SqliteStore::open(&cfg.database)?;
    init_db(store.conn())?;

    let email = cli
        .acting_as
        .clone()
        .unwrap_or_else(|| cfg.user_email.clone());

    if email.trim().is_empty() {
        return Err(AppError::Config(
            "no session user configured. Run: rtoil init --email you@example.com".into(),
        ));
    }

    let user = store
        .find_user(&email)?
        .ok_or_else(|| AppError::UserNotFound(email.clone()))?;

    Ok((store, user))
}

/// Open a session and load the in-memory application state, the same way
/// the web original pulled everything down on login.
pub fn load_session(cli: &Cli, cfg: &Config) -> AppResult<(SqliteStore, AppState)> {
    let (mut store, user) = open_session(cli, cfg)?;
    let state = AppState::load(&mut store, user)?;
    Ok((store, state))
}

/// Guard for admin-only operations.
pub fn require_admin(user: &User) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::NotPermitted(format!(
            "{} is not an admin",
            user.email
        )));
    }
    Ok(())
}
