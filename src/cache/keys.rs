//! Cache key vocabulary.
//!
//! Keys are opaque strings; related keys share a prefix so the invalidation
//! surface can target a whole family with one substring pattern. Every
//! parameter that affects a payload must be encoded into its key.

use prepdeck_api_types::InterviewScope;
use uuid::Uuid;

/// Prefix shared by all interview list keys.
pub const INTERVIEWS_PREFIX: &str = "interviews-";
/// Prefix shared by all interview aggregate keys.
pub const INTERVIEW_STATS_PREFIX: &str = "interview-stats-";
/// Prefix shared by all analytics keys.
pub const ANALYTICS_PREFIX: &str = "analytics-";
/// Prefix shared by all profile keys.
pub const PROFILE_PREFIX: &str = "profile-";

pub fn interview_list_key(user: Uuid, scope: InterviewScope) -> String {
    format!("{INTERVIEWS_PREFIX}{user}-{}", scope.as_str())
}

pub fn interview_stats_key(user: Uuid) -> String {
    format!("{INTERVIEW_STATS_PREFIX}{user}")
}

pub fn analytics_key(user: Uuid) -> String {
    format!("{ANALYTICS_PREFIX}{user}")
}

pub fn profile_key(user: Uuid) -> String {
    format!("{PROFILE_PREFIX}{user}")
}
