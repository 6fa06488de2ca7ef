//! Call tracking.
//!
//! Counts how many times each key was dispatched toward the backend. Purely
//! observational: the numbers feed the debug surface and never influence
//! fetch results.

use std::collections::HashMap;

use dashmap::DashMap;

#[derive(Default)]
pub struct CallTracker {
    counts: DashMap<String, u64>,
}

impl CallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dispatch for `key`. Atomic with respect to concurrent tracks.
    pub fn track(&self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).map(|entry| *entry).unwrap_or(0)
    }

    /// Snapshot of all observed counts.
    pub fn stats(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn reset(&self) {
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn track_accumulates_per_key() {
        let tracker = CallTracker::new();

        tracker.track("interviews-a");
        tracker.track("interviews-a");
        tracker.track("analytics-a");

        assert_eq!(tracker.count("interviews-a"), 2);
        assert_eq!(tracker.count("analytics-a"), 1);
        assert_eq!(tracker.count("profile-a"), 0);

        let stats = tracker.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["interviews-a"], 2);
    }

    #[test]
    fn reset_zeroes_all_counts() {
        let tracker = CallTracker::new();

        tracker.track("interviews-a");
        tracker.reset();

        assert_eq!(tracker.count("interviews-a"), 0);
        assert!(tracker.stats().is_empty());
    }

    #[test]
    fn concurrent_tracks_do_not_lose_increments() {
        let tracker = Arc::new(CallTracker::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let tracker = Arc::clone(&tracker);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    tracker.track("interviews-contended");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("tracking thread");
        }

        assert_eq!(tracker.count("interviews-contended"), 800);
    }
}
