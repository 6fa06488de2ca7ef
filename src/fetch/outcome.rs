//! Fetch results and the fetch error taxonomy.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A payload produced by an orchestrated fetch, tagged with its origin.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub value: Arc<Value>,
    pub from_cache: bool,
}

impl Fetched {
    /// Decode the raw payload into a typed record.
    ///
    /// Cached and freshly fetched payloads take the same decoding path, so a
    /// shape mismatch surfaces identically for both.
    pub fn decode<'de, T: Deserialize<'de>>(&'de self) -> Result<T, FetchError> {
        T::deserialize(self.value.as_ref()).map_err(FetchError::decode)
    }
}

/// How an orchestrated fetch concluded.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Completed(Fetched),
    /// The underlying call was cancelled before settling. Nothing was
    /// cached, nothing failed, and the key is immediately reusable.
    Aborted,
}

impl FetchOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchOutcome::Aborted)
    }

    pub fn fetched(&self) -> Option<&Fetched> {
        match self {
            FetchOutcome::Completed(fetched) => Some(fetched),
            FetchOutcome::Aborted => None,
        }
    }

    pub fn into_fetched(self) -> Option<Fetched> {
        match self {
            FetchOutcome::Completed(fetched) => Some(fetched),
            FetchOutcome::Aborted => None,
        }
    }
}

/// Failures surfaced by the fetch layer.
///
/// Cloneable so one settlement can be shared by every caller attached to the
/// same dedup window. Cancellation is not represented here; it surfaces as
/// [`FetchOutcome::Aborted`].
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("backend request failed: {0}")]
    Http(Arc<reqwest::Error>),
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode backend payload: {0}")]
    Decode(Arc<serde_json::Error>),
}

impl FetchError {
    pub fn http(error: reqwest::Error) -> Self {
        Self::Http(Arc::new(error))
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn decode(error: serde_json::Error) -> Self {
        Self::Decode(Arc::new(error))
    }
}
