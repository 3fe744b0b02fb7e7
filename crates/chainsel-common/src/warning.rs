//! Deduplicated warnings with colored terminal output.
//!
//! Parsing and matching never fail on these conditions; they are reported once
//! per unique message so a caller evaluating thousands of chains is not flooded.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Every warning key printed so far, formatted as `[component] message`.
static WARNED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

/// Lock the warning set. A panic while holding the lock cannot leave the set
/// in a torn state, so a poisoned lock is simply recovered.
fn warned() -> MutexGuard<'static, BTreeSet<String>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a recoverable problem (prints once per unique message).
///
/// Returns `true` if this call printed the warning, `false` if the same
/// component/message pair had already been reported.
///
/// # Example
/// ```ignore
/// let _ = warn_once("HTML", "unknown character reference '&bogus;'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = warned().insert(key);
    if first {
        eprintln!(
            "{} {}",
            format!("[chainsel {component}]").yellow().bold(),
            message.yellow()
        );
    }
    first
}

/// Snapshot of the warnings reported so far, in sorted order.
#[must_use]
pub fn recorded_warnings() -> Vec<String> {
    warned().iter().cloned().collect()
}

/// Forget every recorded warning so they can be reported again.
pub fn clear_warnings() {
    warned().clear();
}
