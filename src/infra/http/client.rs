//! `reqwest`-backed implementation of the backend API.

use async_trait::async_trait;
use prepdeck_api_types::InterviewScope;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::BackendSettings;
use crate::fetch::FetchError;
use crate::infra::error::InfraError;

use super::BackendApi;

#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, InfraError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| InfraError::backend_url(&settings.base_url, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(InfraError::backend_url(
                &settings.base_url,
                "URL cannot serve as a base for endpoint paths",
            ));
        }

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Constructor rejected cannot-be-a-base URLs, so segments always apply.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value, FetchError> {
        debug!(%url, "backend GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(FetchError::http)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(FetchError::status(status.as_u16(), message));
        }

        response.json::<Value>().await.map_err(FetchError::http)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn interviews(&self, user: Uuid, scope: InterviewScope) -> Result<Value, FetchError> {
        let url = self.endpoint(&["users", &user.to_string(), "interviews"]);
        self.get_json(url, &[("scope", scope.as_str().to_string())])
            .await
    }

    async fn interview_stats(&self, user: Uuid) -> Result<Value, FetchError> {
        let url = self.endpoint(&["users", &user.to_string(), "interviews", "stats"]);
        self.get_json(url, &[]).await
    }

    async fn analytics_summary(&self, user: Uuid) -> Result<Value, FetchError> {
        let url = self.endpoint(&["users", &user.to_string(), "analytics", "summary"]);
        self.get_json(url, &[]).await
    }

    async fn profile(&self, user: Uuid) -> Result<Value, FetchError> {
        let url = self.endpoint(&["users", &user.to_string(), "profile"]);
        self.get_json(url, &[]).await
    }
}
