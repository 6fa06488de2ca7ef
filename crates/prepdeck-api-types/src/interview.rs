//! Interview records and aggregates.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle state of a practice interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

/// Which slice of a user's interviews a list request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewScope {
    All,
    Recent,
    Completed,
}

impl InterviewScope {
    /// Stable textual form, used in query strings and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewScope::All => "all",
            InterviewScope::Recent => "recent",
            InterviewScope::Completed => "completed",
        }
    }
}

/// One practice interview as listed on dashboards and history views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub id: Uuid,
    pub role: String,
    pub status: InterviewStatus,
    pub score: Option<f32>,
    pub question_count: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Per-user interview aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewStats {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub average_score: Option<f32>,
    pub best_score: Option<f32>,
    pub practice_minutes: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn interview_summary_decodes_wire_payload() {
        let payload = json!({
            "id": "9f3c1a52-6d2e-4f4a-9a47-0d8b7c2e5f10",
            "role": "Backend Engineer",
            "status": "completed",
            "score": 82.5,
            "question_count": 6,
            "started_at": "2026-07-30T09:00:00Z",
            "completed_at": "2026-07-30T09:42:00Z",
            "created_at": "2026-07-29T18:12:00Z"
        });

        let summary: InterviewSummary =
            serde_json::from_value(payload).expect("payload should decode");
        assert_eq!(summary.status, InterviewStatus::Completed);
        assert_eq!(summary.question_count, 6);
        assert!(summary.started_at.is_some());
    }

    #[test]
    fn scope_round_trips_through_its_textual_form() {
        for scope in [
            InterviewScope::All,
            InterviewScope::Recent,
            InterviewScope::Completed,
        ] {
            let encoded = serde_json::to_value(scope).expect("scope should encode");
            assert_eq!(encoded, json!(scope.as_str()));
        }
    }
}
