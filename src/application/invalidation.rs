//! Event-driven cache invalidation.
//!
//! Write flows elsewhere in the app (interview mutations, profile edits,
//! authentication) report domain events here; this surface maps them onto
//! the cache patterns they affect. Identity changes are the
//! correctness-critical case: everything cached belongs to the previous
//! user, and a call still in flight for them must not repopulate the cache
//! after the clear, so those events also cancel all pending work.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CallTracker, ResponseCache, keys};
use crate::fetch::PayloadDeduplicator;

/// Domain events that affect cached data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    InterviewCreated,
    InterviewStarted,
    InterviewCompleted,
    InterviewDeleted,
    ProfileUpdated,
    UserSwitched,
    LoggedOut,
}

pub struct InvalidationTrigger {
    cache: Arc<ResponseCache>,
    dedup: Arc<PayloadDeduplicator>,
    tracker: Arc<CallTracker>,
}

impl InvalidationTrigger {
    pub fn new(
        cache: Arc<ResponseCache>,
        dedup: Arc<PayloadDeduplicator>,
        tracker: Arc<CallTracker>,
    ) -> Self {
        Self {
            cache,
            dedup,
            tracker,
        }
    }

    /// Apply the cache consequences of a domain event.
    pub fn apply(&self, event: DataEvent) {
        match event {
            DataEvent::InterviewCreated | DataEvent::InterviewStarted => {
                let removed = self.cache.invalidate(keys::INTERVIEWS_PREFIX)
                    + self.cache.invalidate(keys::INTERVIEW_STATS_PREFIX);
                info!(?event, removed, "invalidated interview data");
            }
            DataEvent::InterviewCompleted | DataEvent::InterviewDeleted => {
                // Aggregate scoring may have changed along with the lists.
                let removed = self.cache.invalidate(keys::INTERVIEWS_PREFIX)
                    + self.cache.invalidate(keys::INTERVIEW_STATS_PREFIX)
                    + self.cache.invalidate(keys::ANALYTICS_PREFIX);
                info!(?event, removed, "invalidated interview and analytics data");
            }
            DataEvent::ProfileUpdated => {
                // Profile fields feed many views; a full clear is cheaper
                // than enumerating them.
                let removed = self.cache.clear();
                info!(?event, removed, "cleared cache after profile update");
            }
            DataEvent::UserSwitched | DataEvent::LoggedOut => {
                let removed = self.cache.clear();
                let cancelled = self.dedup.cancel_all();
                self.tracker.reset();
                info!(
                    ?event,
                    removed, cancelled, "cleared cached state for identity change"
                );
            }
        }
    }

    pub fn interview_created(&self) {
        self.apply(DataEvent::InterviewCreated);
    }

    pub fn interview_started(&self) {
        self.apply(DataEvent::InterviewStarted);
    }

    pub fn interview_completed(&self) {
        self.apply(DataEvent::InterviewCompleted);
    }

    pub fn interview_deleted(&self) {
        self.apply(DataEvent::InterviewDeleted);
    }

    pub fn profile_updated(&self) {
        self.apply(DataEvent::ProfileUpdated);
    }

    pub fn user_switched(&self) {
        self.apply(DataEvent::UserSwitched);
    }

    pub fn logged_out(&self) {
        self.apply(DataEvent::LoggedOut);
    }
}
