use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

// A poisoned lock means another thread panicked mid-update; the cached state
// is still structurally sound, so recover the guard and keep serving.

pub(crate) fn read_or_recover<'a, T>(
    lock: &'a RwLock<T>,
    source: &'static str,
    operation: &'static str,
) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!(
            source,
            operation,
            lock_kind = "rwlock.read",
            "recovered poisoned lock; state may be stale"
        );
        poisoned.into_inner()
    })
}

pub(crate) fn write_or_recover<'a, T>(
    lock: &'a RwLock<T>,
    source: &'static str,
    operation: &'static str,
) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!(
            source,
            operation,
            lock_kind = "rwlock.write",
            "recovered poisoned lock; state may be stale"
        );
        poisoned.into_inner()
    })
}

pub(crate) fn lock_or_recover<'a, T>(
    lock: &'a Mutex<T>,
    source: &'static str,
    operation: &'static str,
) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        warn!(
            source,
            operation,
            lock_kind = "mutex.lock",
            "recovered poisoned lock; state may be stale"
        );
        poisoned.into_inner()
    })
}
