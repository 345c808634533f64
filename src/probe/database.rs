//! Probe for a single MySQL server (primary or replica).

use super::rows::row_to_json;
use super::{DatabaseSource, ProbeError};
use crate::config::{DatabaseConfig, MonitorConfig};
use crate::monitor::types::{BackendStatus, ReplicationInfo};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Row};
use std::time::Duration;
use tokio::time::timeout;

/// Role tag deciding which status queries a probe issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseRole {
    Primary,
    Replica,
}

impl DatabaseRole {
    fn as_str(self) -> &'static str {
        match self {
            DatabaseRole::Primary => "primary",
            DatabaseRole::Replica => "replica",
        }
    }
}

/// Connects fresh on every probe; the connection never outlives the call.
pub struct DatabaseProbe {
    options: MySqlConnectOptions,
    role: DatabaseRole,
    connect_timeout: Duration,
    query_timeout: Duration,
}

impl DatabaseProbe {
    pub fn new(database: &DatabaseConfig, role: DatabaseRole, monitor: &MonitorConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&database.host)
            .port(database.port)
            .username(&database.user)
            .password(&database.password)
            .charset("utf8mb4");

        Self {
            options,
            role,
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

    async fn query_status(&self, conn: &mut MySqlConnection) -> Result<BackendStatus, ProbeError> {
        let uptime = self.status_variable(conn, "Uptime").await?;
        let connections = self.status_variable(conn, "Threads_connected").await?;
        let queries = self.status_variable(conn, "Queries").await?;

        let replication = match self.role {
            DatabaseRole::Replica => self.replication_status(conn).await?,
            DatabaseRole::Primary => None,
        };

        Ok(BackendStatus::online(uptime, connections, queries, replication))
    }

    /// Fetch one `SHOW STATUS LIKE` counter. A missing variable counts as 0,
    /// matching how the dashboard treats servers that omit a counter.
    async fn status_variable(
        &self,
        conn: &mut MySqlConnection,
        name: &str,
    ) -> Result<u64, ProbeError> {
        let sql = format!("SHOW STATUS LIKE '{name}'");
        let row = timeout(self.query_timeout, sqlx::query(&sql).fetch_optional(&mut *conn))
            .await
            .map_err(|_| ProbeError::Timeout(self.query_timeout))??;

        Ok(row
            .and_then(|r| r.try_get::<String, _>("Value").ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0))
    }

    /// `SHOW SLAVE STATUS` returns no rows when replication is not
    /// configured; that is an empty result, not an error.
    async fn replication_status(
        &self,
        conn: &mut MySqlConnection,
    ) -> Result<Option<ReplicationInfo>, ProbeError> {
        let row = timeout(
            self.query_timeout,
            sqlx::query("SHOW SLAVE STATUS").fetch_optional(&mut *conn),
        )
        .await
        .map_err(|_| ProbeError::Timeout(self.query_timeout))??;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = row_to_json(&row);
        let text = |key: &str, fallback: &str| -> String {
            record
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };

        Ok(Some(ReplicationInfo {
            io_running: record.get("Slave_IO_Running").and_then(Value::as_str) == Some("Yes"),
            sql_running: record.get("Slave_SQL_Running").and_then(Value::as_str) == Some("Yes"),
            seconds_behind_master: record
                .get("Seconds_Behind_Master")
                .cloned()
                .unwrap_or(Value::Null),
            master_host: text("Master_Host", "Unknown"),
            last_error: text("Last_Error", ""),
        }))
    }
}

#[async_trait]
impl DatabaseSource for DatabaseProbe {
    async fn probe(&self) -> BackendStatus {
        let mut conn = match self.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(role = self.role.as_str(), error = %e, "MySQL connection failed");
                return BackendStatus::offline(format!(
                    "Cannot connect to MySQL {}: {e}",
                    self.role.as_str()
                ));
            }
        };

        let result = self.query_status(&mut conn).await;
        // Connection is released on every exit path
        let _ = conn.close().await;

        match result {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(role = self.role.as_str(), error = %e, "MySQL status query failed");
                BackendStatus::error(e.to_string())
            }
        }
    }
}
