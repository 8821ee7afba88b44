//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation holds a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("ARCHIVE_CONFIG_RESOURCES", "/tmp/resources");
//! // The variable is set for the duration of the guard.
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around [`std::env::set_var`].
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX` so no other thread reads or writes the
/// environment concurrently.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around [`std::env::remove_var`].
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX` so no other thread reads or writes the
/// environment concurrently.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// RAII guard serialising environment access for its lifetime.
///
/// Hold it across a whole test when the code under test reads variables that
/// other tests mutate.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

/// Acquires the global environment lock.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] may be called
/// while it is held.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` runs the closure while holding `ENV_MUTEX`.
    mutate(key.into(), |name| unsafe { env_set_var(name, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` runs the closure while holding `ENV_MUTEX`.
    mutate(key.into(), |name| unsafe { env_remove_var(name) })
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        // SAFETY: We hold `ENV_MUTEX` during restoration.
        match self.original.take() {
            Some(value) => unsafe { env_set_var(&self.key, &value) },
            None => unsafe { env_remove_var(&self.key) },
        }
    }
}
