use std::sync::Once;

use metrics::{Unit, describe_counter, describe_gauge};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level_filter().into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "prepdeck_cache_hit_total",
            Unit::Count,
            "Total number of response-cache hits."
        );
        describe_counter!(
            "prepdeck_cache_miss_total",
            Unit::Count,
            "Total number of response-cache misses, expired reads included."
        );
        describe_counter!(
            "prepdeck_cache_expired_total",
            Unit::Count,
            "Total number of entries purged by an expired read."
        );
        describe_counter!(
            "prepdeck_cache_invalidated_total",
            Unit::Count,
            "Total number of entries removed by invalidation or clear."
        );
        describe_gauge!(
            "prepdeck_cache_entries",
            Unit::Count,
            "Current number of live cache entries."
        );
        describe_counter!(
            "prepdeck_fetch_dispatch_total",
            Unit::Count,
            "Total number of fetches dispatched past the cache."
        );
        describe_counter!(
            "prepdeck_fetch_aborted_total",
            Unit::Count,
            "Total number of fetches that settled as aborted."
        );
    });
}
