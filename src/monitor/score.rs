//! Cluster health scoring and replication lag extraction.
//!
//! Both functions are pure: they look only at the status records handed to
//! them and never touch the network.

use super::types::{BackendStatus, HealthLabel, HealthScore, ProbeStatus, RouterStatus};
use serde_json::Value;

/// Weight of the query router in the composite score.
pub const ROUTER_WEIGHT: u8 = 30;
/// Weight of the primary database.
pub const PRIMARY_WEIGHT: u8 = 40;
/// Weight of the replica database.
pub const REPLICA_WEIGHT: u8 = 20;
/// Weight of healthy replication (IO and SQL threads both running).
pub const REPLICATION_WEIGHT: u8 = 10;

const HEALTHY_THRESHOLD: u8 = 80;
const WARNING_THRESHOLD: u8 = 60;

/// Map the three backend status records to a weighted composite score.
///
/// The weighting is fixed policy, not configuration: router 30, primary 40,
/// replica 20, replication 10. Offline and Error both contribute nothing.
pub fn score_cluster(
    router: &RouterStatus,
    primary: &BackendStatus,
    replica: &BackendStatus,
) -> HealthScore {
    let mut score = 0;

    if router.status == ProbeStatus::Online {
        score += ROUTER_WEIGHT;
    }
    if primary.status == ProbeStatus::Online {
        score += PRIMARY_WEIGHT;
    }
    if replica.status == ProbeStatus::Online {
        score += REPLICA_WEIGHT;
    }
    if let Some(replication) = &replica.replication {
        if replication.io_running && replication.sql_running {
            score += REPLICATION_WEIGHT;
        }
    }

    let label = if score >= HEALTHY_THRESHOLD {
        HealthLabel::Healthy
    } else if score >= WARNING_THRESHOLD {
        HealthLabel::Warning
    } else {
        HealthLabel::Critical
    };

    HealthScore { score, label }
}

/// Extract the replication lag in seconds from a replica status record.
///
/// The server reports `Seconds_Behind_Master` as a number, a numeric string,
/// the "Unknown" sentinel, or NULL. Only the first two produce a value.
pub fn replication_lag(replica: &BackendStatus) -> Option<i64> {
    let replication = replica.replication.as_ref()?;
    match &replication.seconds_behind_master {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::types::ReplicationInfo;
    use serde_json::json;

    fn replication(io: bool, sql: bool, lag: Value) -> ReplicationInfo {
        ReplicationInfo {
            io_running: io,
            sql_running: sql,
            seconds_behind_master: lag,
            master_host: "mysql-primary".to_string(),
            last_error: String::new(),
        }
    }

    fn online_replica(io: bool, sql: bool) -> BackendStatus {
        BackendStatus::online(3600, 4, 900, Some(replication(io, sql, json!(0))))
    }

    #[test]
    fn test_all_online_scores_100_healthy() {
        let health = score_cluster(
            &RouterStatus::online(),
            &BackendStatus::online(3600, 10, 1000, None),
            &online_replica(true, true),
        );
        assert_eq!(health.score, 100);
        assert_eq!(health.label, HealthLabel::Healthy);
    }

    #[test]
    fn test_all_offline_scores_0_critical() {
        let health = score_cluster(
            &RouterStatus::offline("down"),
            &BackendStatus::offline("down"),
            &BackendStatus::offline("down"),
        );
        assert_eq!(health.score, 0);
        assert_eq!(health.label, HealthLabel::Critical);
    }

    #[test]
    fn test_broken_replication_drops_exactly_10() {
        let health = score_cluster(
            &RouterStatus::online(),
            &BackendStatus::online(3600, 10, 1000, None),
            &online_replica(true, false),
        );
        assert_eq!(health.score, 90);
        // 90 >= 80, so still healthy
        assert_eq!(health.label, HealthLabel::Healthy);
    }

    #[test]
    fn test_router_offline_scores_70_warning() {
        let health = score_cluster(
            &RouterStatus::offline("Cannot connect to router admin"),
            &BackendStatus::online(3600, 10, 1000, None),
            &online_replica(true, true),
        );
        assert_eq!(health.score, 70);
        assert_eq!(health.label, HealthLabel::Warning);
    }

    #[test]
    fn test_error_status_contributes_nothing() {
        let health = score_cluster(
            &RouterStatus::online(),
            &BackendStatus::error("query failed"),
            &BackendStatus::error("query failed"),
        );
        assert_eq!(health.score, 30);
        assert_eq!(health.label, HealthLabel::Critical);
    }

    #[test]
    fn test_lag_absent_replication_is_none() {
        let replica = BackendStatus::online(3600, 4, 900, None);
        assert_eq!(replication_lag(&replica), None);
    }

    #[test]
    fn test_lag_numeric_value() {
        let replica = BackendStatus::online(3600, 4, 900, Some(replication(true, true, json!(42))));
        assert_eq!(replication_lag(&replica), Some(42));
    }

    #[test]
    fn test_lag_numeric_string_value() {
        let replica =
            BackendStatus::online(3600, 4, 900, Some(replication(true, true, json!("42"))));
        assert_eq!(replication_lag(&replica), Some(42));
    }

    #[test]
    fn test_lag_unknown_sentinel_is_none() {
        let replica =
            BackendStatus::online(3600, 4, 900, Some(replication(true, true, json!("Unknown"))));
        assert_eq!(replication_lag(&replica), None);
    }

    #[test]
    fn test_lag_null_is_none() {
        let replica =
            BackendStatus::online(3600, 4, 900, Some(replication(true, true, Value::Null)));
        assert_eq!(replication_lag(&replica), None);
    }
}
