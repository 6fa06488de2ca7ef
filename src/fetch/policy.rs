//! Per-call fetch policy.

use std::time::Duration;

/// Controls how one orchestrated fetch interacts with the response cache.
///
/// The default policy reads and writes the cache with the configured TTL.
/// `force_refresh` is the post-mutation policy: skip the read, supersede any
/// in-flight call for the key, and write the fresh result. `skip_cache` is
/// for one-off requests that must never be served stale: no read, no write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// How long a fresh result stays servable. `None` falls back to the
    /// configured default for the call's domain.
    pub ttl: Option<Duration>,
    /// Bypass the cache read but still write the fresh result.
    pub force_refresh: bool,
    /// Bypass both cache read and cache write.
    pub skip_cache: bool,
}

impl FetchPolicy {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Fill in `ttl` only if the policy does not already carry one.
    pub fn or_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = self.ttl.or(Some(ttl));
        self
    }

    pub fn refreshed(mut self) -> Self {
        self.force_refresh = true;
        self
    }

    pub fn uncached(mut self) -> Self {
        self.skip_cache = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_uses_the_cache() {
        let policy = FetchPolicy::default();
        assert!(policy.ttl.is_none());
        assert!(!policy.force_refresh);
        assert!(!policy.skip_cache);
    }

    #[test]
    fn or_ttl_keeps_an_explicit_ttl() {
        let explicit = FetchPolicy::default()
            .with_ttl(Duration::from_secs(5))
            .or_ttl(Duration::from_secs(60));
        assert_eq!(explicit.ttl, Some(Duration::from_secs(5)));

        let defaulted = FetchPolicy::default().or_ttl(Duration::from_secs(60));
        assert_eq!(defaulted.ttl, Some(Duration::from_secs(60)));
    }

    #[test]
    fn builders_compose() {
        let policy = FetchPolicy::default().refreshed().uncached();
        assert!(policy.force_refresh);
        assert!(policy.skip_cache);
    }
}
