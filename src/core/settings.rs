//! The single configurable setting: the overtime credit multiplier.

use crate::errors::{AppError, AppResult};
use crate::state::{AppState, MutationTarget};
use crate::store::EntryStore;

pub const DEFAULT_MULTIPLIER: f64 = 1.5;
pub const MULTIPLIER_KEY: &str = "overtimeMultiplier";

/// Load the multiplier from the store. Any failure (missing row, broken
/// store, unparsable value) falls back to the default; the app stays usable
/// at the standard rate.
pub fn load_multiplier<S: EntryStore>(store: &mut S) -> f64 {
    match store.get_setting(MULTIPLIER_KEY) {
        Ok(Some(raw)) => raw
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite() && *m > 0.0)
            .unwrap_or(DEFAULT_MULTIPLIER),
        _ => DEFAULT_MULTIPLIER,
    }
}

/// Multiplier values must be finite and strictly positive.
pub fn validate_multiplier(value: f64) -> AppResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::InvalidMultiplier(format!(
            "{} (must be a finite number > 0)",
            value
        )));
    }
    Ok(())
}

/// Optimistic multiplier update: validated up front, applied to in-memory
/// state immediately, written to the store, and restored on failure.
pub fn set_multiplier<S: EntryStore>(
    state: &mut AppState,
    store: &mut S,
    value: f64,
) -> AppResult<()> {
    validate_multiplier(value)?;

    let old = state.multiplier;
    super::optimistic::transact(
        state,
        store,
        MutationTarget::Multiplier,
        |st| st.multiplier = value,
        |s| s.set_setting(MULTIPLIER_KEY, &value.to_string()),
        |st| st.multiplier = old,
    )
}
