use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("invalid backend base URL `{url}`: {message}")]
    BackendUrl { url: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn backend_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn http_client(message: impl Into<String>) -> Self {
        Self::HttpClient(message.into())
    }
}
