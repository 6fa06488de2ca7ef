//! Scoring analytics aggregates.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One point on a user's score trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrendPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    pub score: f32,
}

/// Aggregated scoring analytics for a user, computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub average_score: Option<f32>,
    pub strongest_skill: Option<String>,
    pub weakest_skill: Option<String>,
    pub sessions_last_30_days: u32,
    pub trend: Vec<ScoreTrendPoint>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn analytics_summary_decodes_with_empty_trend() {
        let payload = json!({
            "average_score": null,
            "strongest_skill": null,
            "weakest_skill": null,
            "sessions_last_30_days": 0,
            "trend": []
        });

        let summary: AnalyticsSummary =
            serde_json::from_value(payload).expect("payload should decode");
        assert!(summary.average_score.is_none());
        assert!(summary.trend.is_empty());
    }
}
