//! Dashboard aggregate loader.

use std::sync::Arc;

use prepdeck_api_types::{AnalyticsSummary, InterviewScope, InterviewStats, InterviewSummary};
use uuid::Uuid;

use crate::cache::{CacheConfig, keys};
use crate::fetch::{FetchOrchestrator, FetchPolicy};
use crate::infra::http::BackendApi;

use super::loader::{SectionLoad, load_section};

/// Everything the dashboard view needs, loaded in one fan-out.
#[derive(Debug)]
pub struct DashboardData {
    pub interviews: SectionLoad<Vec<InterviewSummary>>,
    pub analytics: SectionLoad<AnalyticsSummary>,
    pub stats: SectionLoad<InterviewStats>,
}

#[derive(Clone)]
pub struct DashboardService {
    fetcher: Arc<FetchOrchestrator>,
    backend: Arc<dyn BackendApi>,
    config: CacheConfig,
}

impl DashboardService {
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

    /// Load the dashboard sections concurrently.
    ///
    /// Sections settle independently; the caller renders what loaded and
    /// reports what did not.
    pub async fn load(&self, user: Uuid) -> DashboardData {
        self.load_with(user, FetchPolicy::default()).await
    }

    /// Same as [`DashboardService::load`] with an explicit policy, e.g. a
    /// force-refresh after the user completes an interview.
    pub async fn load_with(&self, user: Uuid, policy: FetchPolicy) -> DashboardData {
        let interviews_backend = Arc::clone(&self.backend);
        let analytics_backend = Arc::clone(&self.backend);
        let stats_backend = Arc::clone(&self.backend);

        let interviews_key = keys::interview_list_key(user, InterviewScope::Recent);
        let analytics_key = keys::analytics_key(user);
        let stats_key = keys::interview_stats_key(user);

        let interviews = load_section(
            &self.fetcher,
            &interviews_key,
            move || {
                Box::pin(async move {
                    interviews_backend
                        .interviews(user, InterviewScope::Recent)
                        .await
                        .map(Arc::new)
                })
            },
            policy.or_ttl(self.config.interview_list_ttl()),
        );
        let analytics = load_section(
            &self.fetcher,
            &analytics_key,
            move || {
                Box::pin(async move { analytics_backend.analytics_summary(user).await.map(Arc::new) })
            },
            policy.or_ttl(self.config.analytics_ttl()),
        );
        let stats = load_section(
            &self.fetcher,
            &stats_key,
            move || Box::pin(async move { stats_backend.interview_stats(user).await.map(Arc::new) }),
            policy.or_ttl(self.config.interview_stats_ttl()),
        );

        let (interviews, analytics, stats) = tokio::join!(interviews, analytics, stats);
        DashboardData {
            interviews,
            analytics,
            stats,
        }
    }
}
