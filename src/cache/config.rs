//! Cache configuration.
//!
//! TTL defaults follow how fast each payload family changes: interview lists
//! churn with every session, aggregate analytics move slowly.

use std::time::Duration;

use serde::Deserialize;

// Default values for cache configuration
const DEFAULT_TTL_SECS: u64 = 60;
const DEFAULT_INTERVIEW_LIST_TTL_SECS: u64 = 30;
const DEFAULT_INTERVIEW_STATS_TTL_SECS: u64 = 120;
const DEFAULT_ANALYTICS_TTL_SECS: u64 = 300;
const DEFAULT_PROFILE_TTL_SECS: u64 = 600;

/// Cache behavior knobs, sourced from `prepdeck.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the response cache; disabling it leaves deduplication active.
    pub enabled: bool,
    /// Fallback TTL for fetches without a policy-supplied TTL.
    pub default_ttl_secs: u64,
    /// TTL for interview list payloads.
    pub interview_list_ttl_secs: u64,
    /// TTL for interview aggregate payloads.
    pub interview_stats_ttl_secs: u64,
    /// TTL for analytics payloads.
    pub analytics_ttl_secs: u64,
    /// TTL for profile payloads.
    pub profile_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl_secs: DEFAULT_TTL_SECS,
            interview_list_ttl_secs: DEFAULT_INTERVIEW_LIST_TTL_SECS,
            interview_stats_ttl_secs: DEFAULT_INTERVIEW_STATS_TTL_SECS,
            analytics_ttl_secs: DEFAULT_ANALYTICS_TTL_SECS,
            profile_ttl_secs: DEFAULT_PROFILE_TTL_SECS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            default_ttl_secs: settings.default_ttl_secs,
            interview_list_ttl_secs: settings.interview_list_ttl_secs,
            interview_stats_ttl_secs: settings.interview_stats_ttl_secs,
            analytics_ttl_secs: settings.analytics_ttl_secs,
            profile_ttl_secs: settings.profile_ttl_secs,
        }
    }
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn interview_list_ttl(&self) -> Duration {
        Duration::from_secs(self.interview_list_ttl_secs)
    }

    pub fn interview_stats_ttl(&self) -> Duration {
        Duration::from_secs(self.interview_stats_ttl_secs)
    }

    pub fn analytics_ttl(&self) -> Duration {
        Duration::from_secs(self.analytics_ttl_secs)
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.default_ttl_secs, 60);
        assert_eq!(config.interview_list_ttl_secs, 30);
        assert_eq!(config.interview_stats_ttl_secs, 120);
        assert_eq!(config.analytics_ttl_secs, 300);
        assert_eq!(config.profile_ttl_secs, 600);
    }

    #[test]
    fn ttl_accessors_convert_to_durations() {
        let config = CacheConfig {
            default_ttl_secs: 7,
            ..Default::default()
        };
        assert_eq!(config.default_ttl(), Duration::from_secs(7));
        assert_eq!(config.analytics_ttl(), Duration::from_secs(300));
    }
}
