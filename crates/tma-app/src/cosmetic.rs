//! Policy for host calls whose failure must never fail the caller.
//!
//! Viewport expansion, theme-listener registration and button show/hide are
//! cosmetic: the screen works without them. Their errors are logged and
//! dropped here, in one place, instead of ad hoc `let _ =` at call sites.

use std::fmt::Display;

/// Log a failed cosmetic call at `warn` and discard the error.
///
/// Returns the value on success so callers can still use it.
pub fn ignore_cosmetic<T, E: Display>(operation: &'static str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(operation, error = %err, "cosmetic host call failed, ignoring");
            None
        }
    }
}
