//! Backend API boundary.

mod client;

pub use client::HttpBackend;

use async_trait::async_trait;
use prepdeck_api_types::InterviewScope;
use serde_json::Value;
use uuid::Uuid;

use crate::fetch::FetchError;

/// Read operations the Prepdeck backend exposes to this client.
///
/// Implementations return raw JSON payloads; typed decoding happens at the
/// fetch layer so cached and fresh payloads take the same path.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn interviews(&self, user: Uuid, scope: InterviewScope) -> Result<Value, FetchError>;

    async fn interview_stats(&self, user: Uuid) -> Result<Value, FetchError>;

    async fn analytics_summary(&self, user: Uuid) -> Result<Value, FetchError>;

    async fn profile(&self, user: Uuid) -> Result<Value, FetchError>;
}
