//! Interview history aggregate loader.

use std::sync::Arc;

use prepdeck_api_types::{InterviewScope, InterviewStats, InterviewSummary};
use uuid::Uuid;

use crate::cache::{CacheConfig, keys};
use crate::fetch::{FetchOrchestrator, FetchPolicy};
use crate::infra::http::BackendApi;

use super::loader::{SectionLoad, load_section};

/// History page payload: completed interviews plus the per-user aggregates.
#[derive(Debug)]
pub struct HistoryData {
    pub interviews: SectionLoad<Vec<InterviewSummary>>,
    pub stats: SectionLoad<InterviewStats>,
}

#[derive(Clone)]
pub struct HistoryService {
    fetcher: Arc<FetchOrchestrator>,
    backend: Arc<dyn BackendApi>,
    config: CacheConfig,
}

impl HistoryService {
    pub fn new(
        fetcher: Arc<FetchOrchestrator>,
        backend: Arc<dyn BackendApi>,
        config: CacheConfig,
    ) -> Self {
        Self {
            fetcher,
            backend,
            config,
        }
    }

    pub async fn load(&self, user: Uuid) -> HistoryData {
        self.load_with(user, FetchPolicy::default()).await
    }

    pub async fn load_with(&self, user: Uuid, policy: FetchPolicy) -> HistoryData {
        let interviews_backend = Arc::clone(&self.backend);
        let stats_backend = Arc::clone(&self.backend);

        let interviews_key = keys::interview_list_key(user, InterviewScope::Completed);
        let stats_key = keys::interview_stats_key(user);

        let interviews = load_section(
            &self.fetcher,
            &interviews_key,
            move || {
                Box::pin(async move {
                    interviews_backend
                        .interviews(user, InterviewScope::Completed)
                        .await
                        .map(Arc::new)
                })
            },
            policy.or_ttl(self.config.interview_list_ttl()),
        );
        let stats = load_section(
            &self.fetcher,
            &stats_key,
            move || Box::pin(async move { stats_backend.interview_stats(user).await.map(Arc::new) }),
            policy.or_ttl(self.config.interview_stats_ttl()),
        );

        let (interviews, stats) = tokio::join!(interviews, stats);
        HistoryData { interviews, stats }
    }
}
