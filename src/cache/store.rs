//! Response cache storage.
//!
//! Keyed store of resolved backend payloads with absolute expiry. Expiry is
//! strictly time-based: a read past the deadline removes the entry rather
//! than masking it, so a later read for the same key is also a miss.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use metrics::{counter, gauge};
use serde_json::Value;

use super::lock::{read_or_recover, write_or_recover};

const SOURCE: &str = "cache::store";

const METRIC_HIT: &str = "prepdeck_cache_hit_total";
const METRIC_MISS: &str = "prepdeck_cache_miss_total";
const METRIC_EXPIRED: &str = "prepdeck_cache_expired_total";
const METRIC_INVALIDATED: &str = "prepdeck_cache_invalidated_total";
const METRIC_ENTRIES: &str = "prepdeck_cache_entries";

/// A cached payload and the instant it stops being servable.
#[derive(Clone)]
struct CacheEntry {
    value: Arc<Value>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Most recent state-changing operation, kept for the debug surface.
///
/// Advisory only; nothing in the caching contract depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Set { key: String },
    ExpiredRead { key: String },
    Invalidate { pattern: String, removed: usize },
    Clear { removed: usize },
}

/// Keyed TTL store shared by every fetch in the process.
///
/// Entry lifecycle: absent, then `set`, then valid until TTL elapse,
/// explicit invalidation or a full clear returns it to absent. There is no
/// stale-but-servable state.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    last_op: RwLock<Option<CacheOp>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            last_op: RwLock::new(None),
        }
    }

    /// Store `value` under `key`, servable for `ttl` from now.
    ///
    /// Overwrites any existing entry unconditionally.
    pub fn set(&self, key: &str, value: Arc<Value>, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        let mut entries = write_or_recover(&self.entries, SOURCE, "set");
        entries.insert(key.to_string(), entry);
        gauge!(METRIC_ENTRIES).set(entries.len() as f64);
        drop(entries);
        self.record_op(CacheOp::Set {
            key: key.to_string(),
        });
    }

    /// Return the payload for `key` if present and unexpired.
    ///
    /// A read of an expired entry removes it, so the miss is permanent until
    /// the key is repopulated.
    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        let now = Instant::now();
        let mut entries = write_or_recover(&self.entries, SOURCE, "get");
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                counter!(METRIC_HIT).increment(1);
                return Some(Arc::clone(&entry.value));
            }
            None => {
                counter!(METRIC_MISS).increment(1);
                return None;
            }
            Some(_) => {}
        }

        // Expired: purge so the miss is permanent, then report it.
        entries.remove(key);
        gauge!(METRIC_ENTRIES).set(entries.len() as f64);
        drop(entries);
        counter!(METRIC_EXPIRED).increment(1);
        counter!(METRIC_MISS).increment(1);
        self.record_op(CacheOp::ExpiredRead {
            key: key.to_string(),
        });
        None
    }

    /// Remove every entry whose key contains `pattern`.
    ///
    /// Patterns are plain substrings matched against the flat key namespace;
    /// the key builders in [`super::keys`] establish the prefixes callers
    /// target. Returns the number of entries removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let mut entries = write_or_recover(&self.entries, SOURCE, "invalidate");
        let before = entries.len();
        entries.retain(|key, _| !key.contains(pattern));
        let removed = before - entries.len();
        gauge!(METRIC_ENTRIES).set(entries.len() as f64);
        drop(entries);
        counter!(METRIC_INVALIDATED).increment(removed as u64);
        self.record_op(CacheOp::Invalidate {
            pattern: pattern.to_string(),
            removed,
        });
        removed
    }

    /// Remove all entries. Returns the number removed.
    pub fn clear(&self) -> usize {
        let mut entries = write_or_recover(&self.entries, SOURCE, "clear");
        let removed = entries.len();
        entries.clear();
        gauge!(METRIC_ENTRIES).set(0.0);
        drop(entries);
        counter!(METRIC_INVALIDATED).increment(removed as u64);
        self.record_op(CacheOp::Clear { removed });
        removed
    }

    /// Number of live entries, expired or not.
    pub fn len(&self) -> usize {
        read_or_recover(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent state-changing operation.
    pub fn last_op(&self) -> Option<CacheOp> {
        read_or_recover(&self.last_op, SOURCE, "last_op").clone()
    }

    fn record_op(&self, op: CacheOp) {
        *write_or_recover(&self.last_op, SOURCE, "record_op") = Some(op);
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::thread;

    use serde_json::json;

    use super::*;

    fn payload(text: &str) -> Arc<Value> {
        Arc::new(json!({ "data": text }))
    }

    const LONG_TTL: Duration = Duration::from_secs(60);

    #[test]
    fn set_then_get_returns_value() {
        let cache = ResponseCache::new();

        assert!(cache.get("interviews-a").is_none());

        cache.set("interviews-a", payload("one"), LONG_TTL);

        let cached = cache.get("interviews-a").expect("cached payload");
        assert_eq!(cached["data"], "one");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let cache = ResponseCache::new();

        cache.set("profile-a", payload("old"), LONG_TTL);
        cache.set("profile-a", payload("new"), LONG_TTL);

        let cached = cache.get("profile-a").expect("cached payload");
        assert_eq!(cached["data"], "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_read_purges_the_entry() {
        let cache = ResponseCache::new();

        cache.set("analytics-a", payload("stale"), Duration::from_millis(5));
        thread::sleep(Duration::from_millis(25));

        assert!(cache.get("analytics-a").is_none());
        // Purged, not masked: the entry is gone from the store entirely.
        assert_eq!(cache.len(), 0);
        assert!(cache.get("analytics-a").is_none());
        assert_eq!(
            cache.last_op(),
            Some(CacheOp::ExpiredRead {
                key: "analytics-a".to_string()
            })
        );
    }

    #[test]
    fn unexpired_entry_survives_reads() {
        let cache = ResponseCache::new();

        cache.set("profile-a", payload("fresh"), LONG_TTL);

        assert!(cache.get("profile-a").is_some());
        assert!(cache.get("profile-a").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_removes_exactly_the_matching_keys() {
        let cache = ResponseCache::new();

        cache.set("interviews-a-recent", payload("1"), LONG_TTL);
        cache.set("interviews-b-recent", payload("2"), LONG_TTL);
        cache.set("interview-stats-a", payload("3"), LONG_TTL);
        cache.set("analytics-a", payload("4"), LONG_TTL);

        let removed = cache.invalidate("interviews-");
        assert_eq!(removed, 2);

        assert!(cache.get("interviews-a-recent").is_none());
        assert!(cache.get("interviews-b-recent").is_none());
        assert!(cache.get("interview-stats-a").is_some());
        assert!(cache.get("analytics-a").is_some());
    }

    #[test]
    fn clear_empties_everything() {
        let cache = ResponseCache::new();

        cache.set("interviews-a-recent", payload("1"), LONG_TTL);
        cache.set("analytics-a", payload("2"), LONG_TTL);

        let removed = cache.clear();
        assert_eq!(removed, 2);
        assert!(cache.is_empty());
        assert!(cache.get("interviews-a-recent").is_none());
        assert!(cache.get("analytics-a").is_none());
        assert_eq!(cache.last_op(), Some(CacheOp::Clear { removed: 2 }));
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let cache = ResponseCache::new();

        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = cache.entries.write().expect("entries lock");
            panic!("poison entries lock");
        }));

        cache.set("profile-a", payload("after poison"), LONG_TTL);
        assert!(cache.get("profile-a").is_some());
    }
}
