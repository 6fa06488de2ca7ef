//! Shared request and response types for the Prepdeck interview API.
//!
//! These types describe the JSON payloads exchanged with the Prepdeck
//! backend. They are kept in their own crate so every Prepdeck client
//! (the data layer, tooling, future SDKs) agrees on the wire shape.

mod analytics;
mod interview;
mod user;

pub use analytics::{AnalyticsSummary, ScoreTrendPoint};
pub use interview::{InterviewScope, InterviewStats, InterviewStatus, InterviewSummary};
pub use user::UserProfile;
