//! Profile analytics aggregate loader.

use std::sync::Arc;

use prepdeck_api_types::{AnalyticsSummary, UserProfile};
use uuid::Uuid;

use crate::cache::{CacheConfig, keys};
use crate::fetch::{FetchOrchestrator, FetchPolicy};
use crate::infra::http::BackendApi;

use super::loader::{SectionLoad, load_section};

/// Profile page payload: the profile record plus scoring analytics.
#[derive(Debug)]
pub struct ProfileData {
    pub profile: SectionLoad<UserProfile>,
    pub analytics: SectionLoad<AnalyticsSummary>,
}

#[derive(Clone)]
pub struct ProfileService {
    fetcher: Arc<FetchOrchestrator>,
    backend: Arc<dyn BackendApi>,
    config: CacheConfig,
}

impl ProfileService {
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

    pub async fn load(&self, user: Uuid) -> ProfileData {
        self.load_with(user, FetchPolicy::default()).await
    }

    pub async fn load_with(&self, user: Uuid, policy: FetchPolicy) -> ProfileData {
        let profile_backend = Arc::clone(&self.backend);
        let analytics_backend = Arc::clone(&self.backend);

        let profile_key = keys::profile_key(user);
        let analytics_key = keys::analytics_key(user);

        let profile = load_section(
            &self.fetcher,
            &profile_key,
            move || Box::pin(async move { profile_backend.profile(user).await.map(Arc::new) }),
            policy.or_ttl(self.config.profile_ttl()),
        );
        let analytics = load_section(
            &self.fetcher,
            &analytics_key,
            move || {
                Box::pin(async move { analytics_backend.analytics_summary(user).await.map(Arc::new) })
            },
            policy.or_ttl(self.config.analytics_ttl()),
        );

        let (profile, analytics) = tokio::join!(profile, analytics);
        ProfileData { profile, analytics }
    }
}
