//! Cluster monitor configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot cache and probe timeout settings.
///
/// The timeouts are a hardening addition: probes are issued inside request
/// handling, so an unresponsive endpoint must not hold a request open
/// indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Freshness window for cached snapshots, in seconds.
    pub cache_ttl_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub query_timeout_seconds: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 5,
            connect_timeout_seconds: 3,
            query_timeout_seconds: 5,
        }
    }
}

impl MonitorConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_config_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
    }
}
