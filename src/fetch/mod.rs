//! Policy-driven fetching over the cache layer.

mod orchestrator;
mod outcome;
mod policy;

pub use orchestrator::{DebugSnapshot, FetchFuture, FetchOrchestrator, PayloadDeduplicator};
pub use outcome::{FetchError, FetchOutcome, Fetched};
pub use policy::FetchPolicy;
