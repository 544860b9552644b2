//! Deduplicated browser warnings with colored terminal output.
//!
//! Recoverable conditions (a stylesheet that failed to fetch, a font-size we
//! cannot parse) are reported here instead of failing the pipeline. Each
//! unique message prints once per loaded page.

use std::collections::HashSet;
use std::sync::Mutex;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Messages already printed since the last [`clear_warnings`].
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable condition, printing once per unique message.
///
/// # Example
/// ```ignore
/// warn_once("CSS", "could not fetch stylesheet http://example.com/missing.css");
/// ```
///
/// # Panics
/// Panics if the warning-set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        eprintln!("{YELLOW}[wren {component}] {message}{RESET}");
    }
}

/// Forget recorded warnings; called when a new page is loaded so the same
/// condition on the next page is reported again.
///
/// # Panics
/// Panics if the warning-set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
