//! Configuration layer: typed settings with layered precedence (file → env).

use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "prepdeck";
const ENV_PREFIX: &str = "PREPDECK";

const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Typed settings for the Prepdeck data layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings by layering the bundled defaults, an optional local
    /// `prepdeck.toml`, and `PREPDECK_*` environment variables.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Same as [`Settings::load`] with an extra explicit file layered on top.
    pub fn load_from(path: Option<&str>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
            .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let loaded = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Ok(loaded.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the Prepdeck backend API.
    pub base_url: String,
    /// Total per-request timeout.
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
        }
    }
}

/// Cache settings as they appear in the configuration file.
///
/// Converted into [`crate::cache::CacheConfig`] at wiring time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub default_ttl_secs: u64,
    pub interview_list_ttl_secs: u64,
    pub interview_stats_ttl_secs: u64,
    pub analytics_ttl_secs: u64,
    pub profile_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = crate::cache::CacheConfig::default();
        Self {
            enabled: defaults.enabled,
            default_ttl_secs: defaults.default_ttl_secs,
            interview_list_ttl_secs: defaults.interview_list_ttl_secs,
            interview_stats_ttl_secs: defaults.interview_stats_ttl_secs,
            analytics_ttl_secs: defaults.analytics_ttl_secs,
            profile_ttl_secs: defaults.profile_ttl_secs,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggingSettings {
    pub fn level_filter(&self) -> LevelFilter {
        self.level.into()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.backend.base_url, DEFAULT_BACKEND_BASE_URL);
        assert_eq!(settings.backend.timeout(), Duration::from_secs(10));
        assert!(settings.cache.enabled);
        assert_eq!(settings.logging.level, LogLevel::Info);
        assert_eq!(settings.logging.format, LogFormat::Compact);
    }

    #[test]
    fn cache_settings_convert_to_cache_config() {
        let settings = CacheSettings {
            enabled: false,
            default_ttl_secs: 11,
            ..Default::default()
        };

        let config = crate::cache::CacheConfig::from(&settings);
        assert!(!config.enabled);
        assert_eq!(config.default_ttl_secs, 11);
        assert_eq!(config.analytics_ttl_secs, settings.analytics_ttl_secs);
    }

    #[test]
    fn log_levels_map_to_level_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
        assert_eq!(
            LoggingSettings::default().level_filter(),
            LevelFilter::INFO
        );
    }

    #[test]
    fn log_settings_deserialize_from_lowercase_names() {
        let logging: LoggingSettings =
            serde_json::from_value(serde_json::json!({ "level": "warn", "format": "json" }))
                .expect("logging settings should decode");
        assert_eq!(logging.level, LogLevel::Warn);
        assert_eq!(logging.format, LogFormat::Json);
    }
}
