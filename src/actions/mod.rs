//! Remote-control actions against the cluster's containers.
//!
//! All three operations bypass the snapshot cache and act directly on the
//! container runtime. Service names are validated against the fixed
//! allow-list before any runtime call is made, and every failure mode is
//! folded into [`ActionError`] so nothing escapes to the API boundary
//! unclassified.

use crate::config::{BackupConfig, ContainersConfig};
use crate::runtime::{ContainerRuntime, RuntimeError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Log lines returned per fetch.
const LOG_TAIL_LINES: usize = 100;

/// The fixed allow-list of services eligible for restart and log retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceName {
    Router,
    Primary,
    Replica,
}

impl ServiceName {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceName::Router => "router",
            ServiceName::Primary => "primary",
            ServiceName::Replica => "replica",
        }
    }

    /// Container name this service maps to.
    pub fn container(self, containers: &ContainersConfig) -> &str {
        match self {
            ServiceName::Router => &containers.router,
            ServiceName::Primary => &containers.primary,
            ServiceName::Replica => &containers.replica,
        }
    }
}

impl FromStr for ServiceName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "router" => Ok(ServiceName::Router),
            "primary" => Ok(ServiceName::Primary),
            "replica" => Ok(ServiceName::Replica),
            _ => Err(()),
        }
    }
}

/// Action failure taxonomy, mapped by the API layer to 400/404/500.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid service name: {0}")]
    InvalidService(String),

    #[error("Container {0} not found")]
    NotFound(String),

    #[error("container runtime not available: {0}")]
    Unavailable(String),

    #[error("{message}")]
    Failed { message: String, output: String },

    #[error("{0}")]
    Runtime(String),
}

impl From<RuntimeError> for ActionError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::NotFound(name) => ActionError::NotFound(name),
            RuntimeError::Unavailable(cause) => ActionError::Unavailable(cause),
            RuntimeError::Api(cause) => ActionError::Runtime(cause),
        }
    }
}

/// Result of a restart action.
#[derive(Debug, Clone, Serialize)]
pub struct RestartReport {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of a backup action.
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Size of the captured dump output in bytes.
    pub size: usize,
}

/// Result of a log fetch.
#[derive(Debug, Clone, Serialize)]
pub struct LogsReport {
    pub success: bool,
    pub logs: Vec<String>,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub container_status: String,
}

/// Gateway for restart, backup, and log retrieval.
///
/// The runtime handle is optional: when the runtime client failed to
/// initialize at startup every action reports `Unavailable` instead of
/// panicking.
pub struct ActionGateway {
    runtime: Option<Arc<dyn ContainerRuntime>>,
    containers: ContainersConfig,
    backup: BackupConfig,
}

impl ActionGateway {
    pub fn new(
        runtime: Option<Arc<dyn ContainerRuntime>>,
        containers: ContainersConfig,
        backup: BackupConfig,
    ) -> Self {
        Self {
            runtime,
            containers,
            backup,
        }
    }

    fn runtime(&self) -> Result<&Arc<dyn ContainerRuntime>, ActionError> {
        self.runtime
            .as_ref()
            .ok_or_else(|| ActionError::Unavailable("runtime client not initialized".to_string()))
    }

    fn resolve(&self, service: &str) -> Result<ServiceName, ActionError> {
        service
            .parse()
            .map_err(|_| ActionError::InvalidService(service.to_string()))
    }

    /// Restart the named service's container.
    pub async fn restart(&self, service: &str) -> Result<RestartReport, ActionError> {
        let service = self.resolve(service)?;
        let runtime = self.runtime()?;
        let container = service.container(&self.containers);

        runtime.restart(container).await?;
        tracing::info!(container = %container, "Container restarted");

        Ok(RestartReport {
            success: true,
            message: format!("{container} restarted successfully"),
            timestamp: Utc::now(),
        })
    }

    /// Run a consistent full-database dump inside the primary's container.
    pub async fn backup(&self) -> Result<BackupReport, ActionError> {
        let runtime = self.runtime()?;
        let container = self.containers.primary.clone();

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let backup_filename = format!("mysql_cluster_backup_{stamp}.sql");

        let result = runtime.exec(&container, self.backup_command()).await?;

        if result.exit_code == Some(0) {
            tracing::info!(file = %backup_filename, size = result.output.len(), "Backup completed");
            Ok(BackupReport {
                success: true,
                message: format!("Backup created successfully: {backup_filename}"),
                timestamp: Utc::now(),
                size: result.output.len(),
            })
        } else {
            tracing::error!(exit_code = ?result.exit_code, "Backup command failed");
            Err(ActionError::Failed {
                message: "Backup failed".to_string(),
                output: String::from_utf8_lossy(&result.output).into_owned(),
            })
        }
    }

    /// Fetch the last 100 timestamped log lines for the named service.
    pub async fn fetch_logs(&self, service: &str) -> Result<LogsReport, ActionError> {
        let service = self.resolve(service)?;
        let runtime = self.runtime()?;
        let container = service.container(&self.containers);

        let tailed = runtime.tail_logs(container, LOG_TAIL_LINES).await?;

        Ok(LogsReport {
            success: true,
            logs: tailed.lines,
            service: service.as_str().to_string(),
            timestamp: Utc::now(),
            container_status: tailed.container_status,
        })
    }

    /// Consistent snapshot, binlog position captured, logs flushed.
    fn backup_command(&self) -> Vec<String> {
        vec![
            "mysqldump".to_string(),
            "-h".to_string(),
            "localhost".to_string(),
            "-u".to_string(),
            self.backup.user.clone(),
            format!("-p{}", self.backup.password),
            "--all-databases".to_string(),
            "--routines".to_string(),
            "--triggers".to_string(),
            "--single-transaction".to_string(),
            "--master-data=2".to_string(),
            "--flush-logs".to_string(),
        ]
    }
}
