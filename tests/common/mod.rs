//! Shared test fixtures: a scripted backend standing in for the Prepdeck API.

// Each test binary uses a different slice of these fixtures.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use prepdeck::fetch::FetchError;
use prepdeck::infra::http::BackendApi;
use prepdeck_api_types::InterviewScope;
use serde_json::{Value, json};
use uuid::Uuid;

/// Backend stub with per-endpoint call counts and scripted failures.
pub struct StubBackend {
    pub interviews_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub analytics_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    fail_analytics: bool,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            interviews_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
            analytics_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            fail_analytics: false,
        })
    }

    /// A stub whose analytics endpoint always fails with a 500.
    pub fn with_failing_analytics() -> Arc<Self> {
        Arc::new(Self {
            interviews_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
            analytics_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            fail_analytics: true,
        })
    }
}

pub fn interviews_payload() -> Value {
    json!([
        {
            "id": "9f3c1a52-6d2e-4f4a-9a47-0d8b7c2e5f10",
            "role": "Backend Engineer",
            "status": "completed",
            "score": 82.5,
            "question_count": 6,
            "started_at": "2026-07-30T09:00:00Z",
            "completed_at": "2026-07-30T09:42:00Z",
            "created_at": "2026-07-29T18:12:00Z"
        },
        {
            "id": "3b8e2d71-90af-4c55-8a3e-6f1d2b9c4e77",
            "role": "Staff Engineer",
            "status": "in_progress",
            "score": null,
            "question_count": 8,
            "started_at": "2026-08-05T14:00:00Z",
            "completed_at": null,
            "created_at": "2026-08-05T13:55:00Z"
        }
    ])
}

pub fn stats_payload() -> Value {
    json!({
        "total": 12,
        "completed": 9,
        "in_progress": 1,
        "average_score": 78.4,
        "best_score": 93.0,
        "practice_minutes": 540
    })
}

pub fn analytics_payload() -> Value {
    json!({
        "average_score": 78.4,
        "strongest_skill": "system design",
        "weakest_skill": "behavioral",
        "sessions_last_30_days": 7,
        "trend": [
            { "recorded_at": "2026-07-20T00:00:00Z", "score": 71.0 },
            { "recorded_at": "2026-08-01T00:00:00Z", "score": 82.5 }
        ]
    })
}

pub fn profile_payload(user: Uuid) -> Value {
    json!({
        "id": user,
        "display_name": "Sam Rivera",
        "email": "sam@example.com",
        "target_role": "Backend Engineer",
        "experience_years": 4,
        "created_at": "2026-01-10T08:30:00Z",
        "updated_at": "2026-08-01T12:00:00Z"
    })
}

#[async_trait]
impl BackendApi for StubBackend {
    async fn interviews(&self, _user: Uuid, _scope: InterviewScope) -> Result<Value, FetchError> {
        self.interviews_calls.fetch_add(1, Ordering::SeqCst);
        Ok(interviews_payload())
    }

    async fn interview_stats(&self, _user: Uuid) -> Result<Value, FetchError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        Ok(stats_payload())
    }

    async fn analytics_summary(&self, _user: Uuid) -> Result<Value, FetchError> {
        self.analytics_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_analytics {
            return Err(FetchError::status(500, "analytics pipeline offline"));
        }
        Ok(analytics_payload())
    }

    async fn profile(&self, user: Uuid) -> Result<Value, FetchError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Ok(profile_payload(user))
    }
}
