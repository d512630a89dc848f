//! Diagnostic warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning on every
//! frame: style and layout passes are re-run on each tick, and a malformed
//! declaration would otherwise be reported once per pass.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A poisoned set only means another thread panicked mid-insert; the set
/// itself is still usable for deduplication.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a non-fatal anomaly (prints once per unique message).
///
/// Returns `true` if the message was printed, `false` if it had already
/// been reported since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use fennec_common::warning::warn_once;
///
/// let first = warn_once("CSS", "unknown color 'blurple' in 'background'");
/// let second = warn_once("CSS", "unknown color 'blurple' in 'background'");
/// assert!(first && !second);
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[Fennec {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Check whether a message has been reported since the last clear.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when loading a new document or theme).
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
