//! Fetch orchestration.
//!
//! `fetch_with_policy` is the single entry point every data fetcher goes
//! through: consult the response cache, track the dispatch, run the
//! operation through the single-flight table, then write the fresh result
//! back. Cache writes for one key are ordered by completion, which is why a
//! force-refresh supersedes (cancels) any call still in flight for the key
//! instead of letting a stale settlement land after the authoritative one.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use metrics::counter;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::lock::{read_or_recover, write_or_recover};
use crate::cache::{
    CacheConfig, CacheOp, CallOutcome, CallTracker, RequestDeduplicator, ResponseCache,
};

use super::outcome::{FetchError, FetchOutcome, Fetched};
use super::policy::FetchPolicy;

const SOURCE: &str = "fetch::orchestrator";

const METRIC_DISPATCH: &str = "prepdeck_fetch_dispatch_total";
const METRIC_ABORTED: &str = "prepdeck_fetch_aborted_total";

/// Future type produced by fetch operations.
pub type FetchFuture = BoxFuture<'static, Result<Arc<Value>, FetchError>>;

/// The deduplicator instantiation shared across the data layer.
pub type PayloadDeduplicator = RequestDeduplicator<Arc<Value>, FetchError>;

/// Snapshot of the data layer's observable state, for debug displays.
///
/// Pull-based: a debug view calls [`FetchOrchestrator::debug_snapshot`] on
/// whatever cadence it refreshes at.
#[derive(Debug, Clone)]
pub struct DebugSnapshot {
    pub cache_entries: usize,
    pub last_cache_op: Option<CacheOp>,
    pub pending: Vec<String>,
    pub calls: HashMap<String, u64>,
    pub last_error: Option<String>,
}

pub struct FetchOrchestrator {
    config: CacheConfig,
    cache: Arc<ResponseCache>,
    dedup: Arc<PayloadDeduplicator>,
    tracker: Arc<CallTracker>,
    // Most recent non-abort failure, for the debug surface.
    last_error: RwLock<Option<String>>,
}

impl FetchOrchestrator {
    pub fn new(
        config: CacheConfig,
        cache: Arc<ResponseCache>,
        dedup: Arc<PayloadDeduplicator>,
        tracker: Arc<CallTracker>,
    ) -> Self {
        Self {
            config,
            cache,
            dedup,
            tracker,
            last_error: RwLock::new(None),
        }
    }

    /// Fetch the payload for `key` under `policy`.
    ///
    /// `make_operation` builds the underlying backend call; it is invoked
    /// only when the cache cannot serve the key and no call for it is
    /// already in flight. Failures propagate verbatim and are never cached;
    /// a cancelled call settles as [`FetchOutcome::Aborted`].
    pub async fn fetch_with_policy<F>(
        &self,
        key: &str,
        make_operation: F,
        policy: FetchPolicy,
    ) -> Result<FetchOutcome, FetchError>
    where
        F: FnOnce() -> FetchFuture,
    {
        let use_cache = self.config.enabled && !policy.skip_cache;

        if use_cache && !policy.force_refresh {
            if let Some(value) = self.cache.get(key) {
                debug!(key, "fetch served from cache");
                return Ok(FetchOutcome::Completed(Fetched {
                    value,
                    from_cache: true,
                }));
            }
        }

        // Only dispatches reach the tracker; cache hits never count.
        self.tracker.track(key);
        counter!(METRIC_DISPATCH).increment(1);

        if policy.force_refresh && self.dedup.cancel(key) {
            debug!(key, "superseded in-flight call");
        }

        match self.dedup.execute(key, make_operation).await {
            Ok(CallOutcome::Completed(value)) => {
                if use_cache {
                    let ttl = policy.ttl.unwrap_or_else(|| self.config.default_ttl());
                    self.cache.set(key, Arc::clone(&value), ttl);
                }
                Ok(FetchOutcome::Completed(Fetched {
                    value,
                    from_cache: false,
                }))
            }
            Ok(CallOutcome::Aborted) => {
                counter!(METRIC_ABORTED).increment(1);
                debug!(key, "fetch aborted before settling");
                Ok(FetchOutcome::Aborted)
            }
            Err(error) => {
                warn!(key, error = %error, "fetch failed");
                *write_or_recover(&self.last_error, SOURCE, "record_error") =
                    Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Abort the in-flight call for `key`, if any.
    pub fn cancel(&self, key: &str) -> bool {
        self.dedup.cancel(key)
    }

    /// Remove every cached entry whose key contains `pattern`.
    pub fn invalidate(&self, pattern: &str) -> usize {
        self.cache.invalidate(pattern)
    }

    /// Drop every cached entry.
    pub fn clear(&self) -> usize {
        self.cache.clear()
    }

    /// Per-key dispatch counts.
    pub fn stats(&self) -> HashMap<String, u64> {
        self.tracker.stats()
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            cache_entries: self.cache.len(),
            last_cache_op: self.cache.last_op(),
            pending: self.dedup.pending_keys(),
            calls: self.tracker.stats(),
            last_error: read_or_recover(&self.last_error, SOURCE, "debug_snapshot").clone(),
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn tracker(&self) -> &Arc<CallTracker> {
        &self.tracker
    }
}
