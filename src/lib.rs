//! Prepdeck client data layer.
//!
//! Every Prepdeck surface (dashboard, profile, interview history) loads its
//! data through this crate instead of calling the backend directly. The
//! layer provides:
//!
//! - a keyed, TTL-based **response cache** so repeated views do not refetch
//! - **single-flight deduplication** so concurrent callers share one call
//! - a policy-driven **fetch orchestrator** with force-refresh, skip-cache,
//!   cancellation and supersession semantics
//! - **aggregate loaders** that fan out named sub-fetches with independent
//!   failure isolation
//! - an **invalidation surface** driven by domain events, including the
//!   full clear on identity change that keeps user sessions isolated
//!
//! Wiring happens once, at the application's composition root:
//!
//! ```no_run
//! use prepdeck::{DataLayer, config::Settings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! prepdeck::infra::telemetry::init(&settings.logging)?;
//! let data = DataLayer::from_settings(&settings)?;
//! # let _ = data;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod application;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod infra;

pub use app::DataLayer;
pub use application::{
    DashboardData, DashboardService, DataEvent, HistoryData, HistoryService, InvalidationTrigger,
    ProfileData, ProfileService, SectionLoad,
};
pub use cache::{CacheConfig, CallOutcome, CallTracker, RequestDeduplicator, ResponseCache};
pub use fetch::{DebugSnapshot, FetchError, FetchOrchestrator, FetchOutcome, FetchPolicy, Fetched};
