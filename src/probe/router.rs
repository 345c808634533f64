//! Probe for the ProxySQL admin interface.

use super::rows::row_to_json;
use super::{ProbeError, RouterSource};
use crate::config::{DatabaseConfig, MonitorConfig};
use crate::monitor::types::{ProbeStatus, RouterStatus, StatusRow, TrafficSnapshot};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::ConnectOptions;
use sqlx::Connection;
use std::time::Duration;
use tokio::time::timeout;

/// Global counters included in the status snapshot.
const GLOBAL_STATS_SQL: &str = "SELECT * FROM stats_mysql_global \
     WHERE variable_name IN ('Queries', 'Client_Connections_created', 'Server_Connections_created')";

/// Byte and query counters for the realtime traffic endpoint.
const TRAFFIC_STATS_SQL: &str = "SELECT variable_name, variable_value FROM stats_mysql_global \
     WHERE variable_name IN ('Queries_backends_bytes_recv', 'Queries_backends_bytes_sent', \
     'Queries_frontends_bytes_recv', 'Queries_frontends_bytes_sent', 'Questions', 'Slow_queries')";

const CONNECTION_POOL_TRAFFIC_SQL: &str = "SELECT hostgroup, srv_host, srv_port, status, \
     ConnUsed, ConnFree, ConnOK, ConnERR, Queries, Bytes_data_sent, Bytes_data_recv, Latency_us \
     FROM stats_mysql_connection_pool";

const QUERY_RULE_HITS_SQL: &str =
    "SELECT rule_id, hits FROM stats_mysql_query_rules ORDER BY hits DESC LIMIT 10";

/// Probe for the router's admin interface. Connects fresh per invocation.
pub struct RouterProbe {
    options: MySqlConnectOptions,
    connect_timeout: Duration,
    query_timeout: Duration,
}

impl RouterProbe {
    pub fn new(router: &DatabaseConfig, monitor: &MonitorConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&router.host)
            .port(router.port)
            .username(&router.user)
            .password(&router.password)
            .charset("utf8mb4");

        Self {
            options,
            connect_timeout: monitor.connect_timeout(),
            query_timeout: monitor.query_timeout(),
        }
    }

    async fn connect(&self) -> Result<MySqlConnection, ProbeError> {
        match timeout(self.connect_timeout, self.options.connect()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(ProbeError::Connect(e.to_string())),
            Err(_) => Err(ProbeError::Timeout(self.connect_timeout)),
        }
    }

    async fn fetch_rows(
        &self,
        conn: &mut MySqlConnection,
        sql: &str,
    ) -> Result<Vec<StatusRow>, ProbeError> {
        let rows = timeout(self.query_timeout, sqlx::query(sql).fetch_all(&mut *conn))
            .await
            .map_err(|_| ProbeError::Timeout(self.query_timeout))??;

        Ok(rows.iter().map(row_to_json).collect())
    }

    /// Fill the status record table by table so a mid-probe failure keeps
    /// whatever was already fetched.
    async fn collect_status(
        &self,
        conn: &mut MySqlConnection,
        status: &mut RouterStatus,
    ) -> Result<(), ProbeError> {
        status.backends = self.fetch_rows(conn, "SELECT * FROM mysql_servers").await?;
        status.query_rules = self
            .fetch_rows(conn, "SELECT * FROM mysql_query_rules")
            .await?;
        status.stats = self.fetch_rows(conn, GLOBAL_STATS_SQL).await?;
        status.connection_pool = self
            .fetch_rows(conn, "SELECT * FROM stats_mysql_connection_pool")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RouterSource for RouterProbe {
    async fn probe(&self) -> RouterStatus {
        let mut conn = match self.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Router admin connection failed");
                return RouterStatus::offline(format!("Cannot connect to router admin: {e}"));
            }
        };

        let mut status = RouterStatus::online();
        let outcome = self.collect_status(&mut conn, &mut status).await;
        let _ = conn.close().await;

        if let Err(e) = outcome {
            tracing::warn!(error = %e, "Router status query failed");
            status.status = ProbeStatus::Error;
            status.error = Some(e.to_string());
        }
        status
    }

    async fn realtime_traffic(&self) -> Result<TrafficSnapshot, ProbeError> {
        let mut conn = self.connect().await?;

        let result = async {
            let global_stats = self.fetch_rows(&mut conn, TRAFFIC_STATS_SQL).await?;
            let connection_pool = self
                .fetch_rows(&mut conn, CONNECTION_POOL_TRAFFIC_SQL)
                .await?;
            let query_rules = self.fetch_rows(&mut conn, QUERY_RULE_HITS_SQL).await?;
            Ok(TrafficSnapshot {
                timestamp: Utc::now(),
                global_stats,
                connection_pool,
                query_rules,
            })
        }
        .await;

        let _ = conn.close().await;
        result
    }
}
