//! Single-flight request deduplication.
//!
//! At most one underlying call runs per key. Callers arriving while a call
//! is in flight attach to its shared settlement instead of starting new
//! work, and every attached caller observes the identical outcome. The
//! pending registration is removed exactly once, when the call settles
//! (success, failure or abort), so the key is immediately reusable. This is
//! not a cache: settled values are not retained past the dedup window.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture, Shared};
use tracing::debug;

use super::lock::lock_or_recover;

const SOURCE: &str = "cache::dedup";

/// How a deduplicated call settled.
///
/// Abort is a first-class settlement rather than an error: every attached
/// caller observes it, nothing downstream should treat it as a failure, and
/// the key is free for fresh work the moment it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Completed(T),
    Aborted,
}

type SharedSettlement<T, E> = Shared<BoxFuture<'static, Result<CallOutcome<T>, E>>>;

struct PendingCall<T, E> {
    // Guards cleanup: a superseded call must not evict its replacement.
    generation: u64,
    settlement: SharedSettlement<T, E>,
    abort: AbortHandle,
}

/// Per-key single-flight table.
pub struct RequestDeduplicator<T, E> {
    pending: Arc<Mutex<HashMap<String, PendingCall<T, E>>>>,
    generation: AtomicU64,
}

impl<T, E> RequestDeduplicator<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Run the operation under `key`, or attach to the call already in
    /// flight for it.
    ///
    /// `make_operation` is invoked only when no call is pending, so the
    /// underlying operation runs exactly once per dedup window no matter how
    /// many callers attach.
    pub async fn execute<F>(&self, key: &str, make_operation: F) -> Result<CallOutcome<T>, E>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, E>>,
    {
        let settlement = {
            let mut pending = lock_or_recover(&self.pending, SOURCE, "execute");
            if let Some(call) = pending.get(key) {
                debug!(key, "attached to in-flight call");
                call.settlement.clone()
            } else {
                let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                let (abort, registration) = AbortHandle::new_pair();
                let operation = Abortable::new(make_operation(), registration);
                let table = Arc::clone(&self.pending);
                let owned_key = key.to_string();
                let settlement = async move {
                    let result = match operation.await {
                        Ok(Ok(value)) => Ok(CallOutcome::Completed(value)),
                        Ok(Err(error)) => Err(error),
                        Err(Aborted) => Ok(CallOutcome::Aborted),
                    };
                    // Unconditional cleanup on settlement, but only of this
                    // call's own registration.
                    let mut pending = lock_or_recover(&table, SOURCE, "settle");
                    if pending
                        .get(&owned_key)
                        .is_some_and(|call| call.generation == generation)
                    {
                        pending.remove(&owned_key);
                    }
                    result
                }
                .boxed()
                .shared();
                pending.insert(
                    key.to_string(),
                    PendingCall {
                        generation,
                        settlement: settlement.clone(),
                        abort,
                    },
                );
                settlement
            }
        };
        settlement.await
    }

    /// Abort the pending call for `key`, if any.
    ///
    /// Attached callers observe an aborted settlement; the registration is
    /// removed eagerly so the next `execute` starts fresh work.
    pub fn cancel(&self, key: &str) -> bool {
        let removed = lock_or_recover(&self.pending, SOURCE, "cancel").remove(key);
        match removed {
            Some(call) => {
                call.abort.abort();
                debug!(key, "cancelled in-flight call");
                true
            }
            None => false,
        }
    }

    /// Abort every pending call. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let calls: Vec<PendingCall<T, E>> = {
            let mut pending = lock_or_recover(&self.pending, SOURCE, "cancel_all");
            pending.drain().map(|(_, call)| call).collect()
        };
        for call in &calls {
            call.abort.abort();
        }
        calls.len()
    }

    /// Keys with a call currently in flight, for the debug surface.
    pub fn pending_keys(&self) -> Vec<String> {
        lock_or_recover(&self.pending, SOURCE, "pending_keys")
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.pending, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, E> Default for RequestDeduplicator<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
