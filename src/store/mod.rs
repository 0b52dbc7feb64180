pub mod progress;
pub mod settings;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use progress::ProgressStore;
pub use settings::{SettingsStore, StudySettings};

/// Shared handle to the progress store
pub type ProgressPool = Arc<Mutex<ProgressStore>>;

/// Shared handle to the settings store
pub type SettingsPool = Arc<Mutex<SettingsStore>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when a store lock cannot be acquired
#[derive(Debug)]
pub struct StoreLockError;

impl std::fmt::Display for StoreLockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store unavailable")
    }
}

impl std::error::Error for StoreLockError {}

/// Try to acquire a store lock, returning an error if poisoned
pub fn try_lock<T>(pool: &Arc<Mutex<T>>) -> Result<MutexGuard<'_, T>, StoreLockError> {
    pool.lock().map_err(|_: PoisonError<_>| {
        tracing::error!("Store mutex poisoned - a thread panicked while holding the lock");
        StoreLockError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_lock_acquires() {
        let pool = Arc::new(Mutex::new(5_i64));
        let guard = try_lock(&pool).unwrap();
        assert_eq!(*guard, 5);
    }

    #[test]
    fn test_log_warn_default_on_error() {
        let result: Result<i64, &str> = Err("boom");
        assert_eq!(result.log_warn_default("test context"), 0);
    }

    #[test]
    fn test_log_warn_passes_ok_through() {
        let result: Result<i64, &str> = Ok(7);
        assert_eq!(result.log_warn("test context"), Some(7));
    }
}
