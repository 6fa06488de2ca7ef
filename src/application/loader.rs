//! Shared machinery for aggregate loads.

use serde::de::DeserializeOwned;

use crate::fetch::{FetchError, FetchFuture, FetchOrchestrator, FetchOutcome, FetchPolicy};

/// Outcome of one named section in an aggregate load.
///
/// Sections settle independently: a failed or aborted section never prevents
/// its siblings from loading, and the view decides how to render the mix.
#[derive(Debug)]
pub enum SectionLoad<T> {
    Loaded { value: T, from_cache: bool },
    Failed(FetchError),
    Aborted,
}

impl<T> SectionLoad<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SectionLoad::Loaded { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            SectionLoad::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SectionLoad::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionLoad::Failed(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, SectionLoad::Aborted)
    }
}

/// Run one orchestrated fetch and decode it into the section's record type.
pub(crate) async fn load_section<T, F>(
    fetcher: &FetchOrchestrator,
    key: &str,
    make_operation: F,
    policy: FetchPolicy,
) -> SectionLoad<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> FetchFuture,
{
    match fetcher.fetch_with_policy(key, make_operation, policy).await {
        Ok(FetchOutcome::Completed(fetched)) => match fetched.decode() {
            Ok(value) => SectionLoad::Loaded {
                value,
                from_cache: fetched.from_cache,
            },
            Err(error) => SectionLoad::Failed(error),
        },
        Ok(FetchOutcome::Aborted) => SectionLoad::Aborted,
        Err(error) => SectionLoad::Failed(error),
    }
}
