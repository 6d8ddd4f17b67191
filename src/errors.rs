//! Unified application error type.
//! All modules (db, store, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors (rejected before any local mutation)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid hours: {0}")]
    InvalidHours(String),

    #[error("Invalid entry kind: {0}")]
    InvalidKind(String),

    #[error("Invalid multiplier: {0}")]
    InvalidMultiplier(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Not-found (surfaced as a notice, never fatal)
    // ---------------------------
    #[error("Entry {0} not found")]
    EntryNotFound(String),

    #[error("User {0} not found")]
    UserNotFound(String),

    // ---------------------------
    // Optimistic mutation logic
    // ---------------------------
    #[error("Another change for {0} is still in flight")]
    MutationInFlight(String),

    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Not-found errors are downgraded to a notice at the CLI layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::EntryNotFound(_) | AppError::UserNotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
