//! Cluster status domain types.
//!
//! Everything here is built fresh by a probe, folded into a
//! [`ClusterSnapshot`], and discarded when the next snapshot supersedes it.
//! Router admin tables are passed through as opaque JSON rows; their schema
//! is owned by ProxySQL, not by us.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key-value row from a router admin table, passed through verbatim.
pub type StatusRow = Map<String, Value>;

/// Outcome class for a single data-plane endpoint.
///
/// `Offline` means the connection itself failed; `Error` means we connected
/// but a status query failed afterwards. The scorer treats both as down, the
/// UI messages them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Online,
    Offline,
    Error,
}

/// Replication thread state reported by a replica's `SHOW SLAVE STATUS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationInfo {
    pub io_running: bool,
    pub sql_running: bool,
    /// Raw lag value as reported by the server: a number, a numeric string,
    /// the "Unknown" sentinel, or null. Use
    /// [`replication_lag`](super::score::replication_lag) to interpret it.
    pub seconds_behind_master: Value,
    pub master_host: String,
    pub last_error: String,
}

/// Status record for one MySQL server (primary or replica).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication: Option<ReplicationInfo>,
}

impl BackendStatus {
    /// Connection-level failure: the endpoint could not be reached.
    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Offline,
            error: Some(error.into()),
            uptime: None,
            connections: None,
            queries: None,
            replication: None,
        }
    }

    /// Query-level failure after a successful connection.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            error: Some(error.into()),
            uptime: None,
            connections: None,
            queries: None,
            replication: None,
        }
    }

    pub fn online(
        uptime: u64,
        connections: u64,
        queries: u64,
        replication: Option<ReplicationInfo>,
    ) -> Self {
        Self {
            status: ProbeStatus::Online,
            error: None,
            uptime: Some(uptime),
            connections: Some(connections),
            queries: Some(queries),
            replication,
        }
    }
}

/// Status record for the query router's admin interface.
///
/// On a mid-probe query failure the record is downgraded to `Error` but keeps
/// whatever tables were fetched before the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterStatus {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub backends: Vec<StatusRow>,
    pub query_rules: Vec<StatusRow>,
    pub stats: Vec<StatusRow>,
    pub connection_pool: Vec<StatusRow>,
}

impl RouterStatus {
    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Offline,
            error: Some(error.into()),
            backends: Vec::new(),
            query_rules: Vec::new(),
            stats: Vec::new(),
            connection_pool: Vec::new(),
        }
    }

    /// Empty online record, filled in table by table during the probe.
    pub fn online() -> Self {
        Self {
            status: ProbeStatus::Online,
            error: None,
            backends: Vec::new(),
            query_rules: Vec::new(),
            stats: Vec::new(),
            connection_pool: Vec::new(),
        }
    }
}

/// Categorical health label derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLabel {
    Healthy,
    Warning,
    Critical,
}

/// Weighted composite health score, always in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u8,
    #[serde(rename = "status")]
    pub label: HealthLabel,
}

/// Fully aggregated cluster state at one point in time. This is the cached
/// unit: immutable once built, superseded wholesale by the next poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub timestamp: DateTime<Utc>,
    pub router: RouterStatus,
    pub primary: BackendStatus,
    pub replica: BackendStatus,
    pub health: HealthScore,
    pub replication_lag_seconds: Option<i64>,
}

/// Live router counters for the realtime traffic endpoint. Never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    pub timestamp: DateTime<Utc>,
    pub global_stats: Vec<StatusRow>,
    pub connection_pool: Vec<StatusRow>,
    pub query_rules: Vec<StatusRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Offline).unwrap(),
            "\"offline\""
        );
    }

    #[test]
    fn test_offline_backend_carries_cause() {
        let status = BackendStatus::offline("Cannot connect to MySQL primary");
        assert_eq!(status.status, ProbeStatus::Offline);
        assert_eq!(
            status.error.as_deref(),
            Some("Cannot connect to MySQL primary")
        );
        assert!(status.uptime.is_none());
        assert!(status.replication.is_none());
    }

    #[test]
    fn test_health_score_json_shape() {
        let score = HealthScore {
            score: 100,
            label: HealthLabel::Healthy,
        };
        let value = serde_json::to_value(score).unwrap();
        assert_eq!(value, json!({"score": 100, "status": "healthy"}));
    }

    #[test]
    fn test_online_backend_omits_error_field() {
        let status = BackendStatus::online(3600, 12, 1042, None);
        let value = serde_json::to_value(&status).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["uptime"], 3600);
    }
}
