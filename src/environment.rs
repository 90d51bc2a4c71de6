//! Process-wide environment helpers.
//!
//! Jenkins hands pull request coordinates to `jecket` through environment
//! variables. Reads and writes go through a shared mutex so tests that
//! rewrite `SLUG` or `GIT_COMMIT` cannot race the resolver.

use std::env;
use std::ffi::OsStr;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Set an environment variable while holding the global lock.
pub fn set_var<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) {
    let _guard = lock();
    // SAFETY: the mutex serialises access to the unsynchronised std env calls.
    unsafe { env::set_var(key, value) };
}

/// Remove an environment variable while holding the global lock.
pub fn remove_var<K: AsRef<OsStr>>(key: K) {
    let _guard = lock();
    // SAFETY: the mutex serialises access to the unsynchronised std env calls.
    unsafe { env::remove_var(key) };
}

/// Read an environment variable while holding the global lock.
///
/// # Errors
///
/// Returns [`env::VarError`] when the variable is unset or contains invalid
/// Unicode.
pub fn var<K: AsRef<OsStr>>(key: K) -> Result<String, env::VarError> {
    let _guard = lock();
    env::var(key)
}

/// Return the first of `keys` that is set, with its value.
///
/// Keys are consulted in order, so `["PROJECT_NAME", "PROJECT"]` prefers the
/// long name when both are present. A variable set to the empty string
/// counts as set.
#[must_use]
pub fn first_set(keys: &[&str]) -> Option<(String, String)> {
    let _guard = lock();
    keys.iter()
        .find_map(|key| env::var(key).ok().map(|value| ((*key).to_owned(), value)))
}
