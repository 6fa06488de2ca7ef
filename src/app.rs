//! Composition root for the Prepdeck data layer.

use std::sync::Arc;

use crate::application::{
    DashboardService, HistoryService, InvalidationTrigger, ProfileService,
};
use crate::cache::{CacheConfig, CallTracker, ResponseCache};
use crate::config::Settings;
use crate::fetch::{DebugSnapshot, FetchOrchestrator, PayloadDeduplicator};
use crate::infra::error::InfraError;
use crate::infra::http::{BackendApi, HttpBackend};

/// Fully wired data layer.
///
/// One cache/dedup/tracker set sits behind the orchestrator and is shared by
/// every service; nothing here is a module-level singleton, so tests can
/// build as many isolated layers as they need.
pub struct DataLayer {
    fetcher: Arc<FetchOrchestrator>,
    invalidation: InvalidationTrigger,
    dashboard: DashboardService,
    profile: ProfileService,
    history: HistoryService,
}

impl DataLayer {
    /// Wire the data layer against the HTTP backend described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, InfraError> {
        let backend: Arc<dyn BackendApi> = Arc::new(HttpBackend::new(&settings.backend)?);
        Ok(Self::new(CacheConfig::from(&settings.cache), backend))
    }

    /// Wire the data layer against any backend implementation.
    ///
    /// Tests substitute a scripted backend here.
    pub fn new(config: CacheConfig, backend: Arc<dyn BackendApi>) -> Self {
        let cache = Arc::new(ResponseCache::new());
        let dedup = Arc::new(PayloadDeduplicator::new());
        let tracker = Arc::new(CallTracker::new());

        let fetcher = Arc::new(FetchOrchestrator::new(
            config.clone(),
            Arc::clone(&cache),
            Arc::clone(&dedup),
            Arc::clone(&tracker),
        ));
        let invalidation = InvalidationTrigger::new(cache, dedup, tracker);

        let dashboard = DashboardService::new(
            Arc::clone(&fetcher),
            Arc::clone(&backend),
            config.clone(),
        );
        let profile = ProfileService::new(
            Arc::clone(&fetcher),
            Arc::clone(&backend),
            config.clone(),
        );
        let history = HistoryService::new(Arc::clone(&fetcher), backend, config);

        Self {
            fetcher,
            invalidation,
            dashboard,
            profile,
            history,
        }
    }

    pub fn fetcher(&self) -> &Arc<FetchOrchestrator> {
        &self.fetcher
    }

    pub fn invalidation(&self) -> &InvalidationTrigger {
        &self.invalidation
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Snapshot of cache/dedup/tracker state for debug displays.
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        self.fetcher.debug_snapshot()
    }
}
