//! Container runtime access.
//!
//! The [`ContainerRuntime`] trait is the narrow seam to the runtime: a
//! stats snapshot by container name, restart, in-container command
//! execution, and log tailing. Production uses the Docker-backed
//! [`DockerRuntime`]; tests substitute stubs.

mod docker;
pub mod stats;

pub use docker::DockerRuntime;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Runtime faults, classified so callers can tell a missing container from
/// everything else.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Container {0} not found")]
    NotFound(String),

    #[error("container runtime unavailable: {0}")]
    Unavailable(String),

    #[error("container runtime error: {0}")]
    Api(String),
}

/// Point-in-time resource snapshot for a running container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerStats {
    pub status: String,
    pub health: String,
    pub created: String,
    pub started: String,
    pub cpu_percent: f64,
    pub memory_usage_mb: f64,
    pub memory_percent: f64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
}

/// Per-container status as reported by the API: either live stats or an
/// explicit not_found/error marker. Never a partial record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContainerStatus {
    Running(ContainerStats),
    Unavailable { status: &'static str, error: String },
}

impl ContainerStatus {
    pub fn not_found(name: &str) -> Self {
        Self::Unavailable {
            status: "not_found",
            error: format!("Container {name} not found"),
        }
    }

    pub fn error(cause: impl Into<String>) -> Self {
        Self::Unavailable {
            status: "error",
            error: cause.into(),
        }
    }
}

/// Captured output of an in-container command.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub exit_code: Option<i64>,
    pub output: Vec<u8>,
}

/// Tail of a container's log stream plus its current status.
#[derive(Debug, Clone)]
pub struct TailedLogs {
    pub lines: Vec<String>,
    pub container_status: String,
}

/// Capability set required of a container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn stats(&self, name: &str) -> Result<ContainerStats, RuntimeError>;
    async fn restart(&self, name: &str) -> Result<(), RuntimeError>;
    async fn exec(&self, name: &str, cmd: Vec<String>) -> Result<ExecOutput, RuntimeError>;
    async fn tail_logs(&self, name: &str, lines: usize) -> Result<TailedLogs, RuntimeError>;
}

/// Probe one container, folding runtime faults into an explicit status.
/// Never fails past this boundary.
pub async fn probe_container(runtime: &dyn ContainerRuntime, name: &str) -> ContainerStatus {
    match runtime.stats(name).await {
        Ok(stats) => ContainerStatus::Running(stats),
        Err(RuntimeError::NotFound(_)) => ContainerStatus::not_found(name),
        Err(e) => ContainerStatus::error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_status_shape() {
        let status = ContainerStatus::not_found("mysql-primary");
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "not_found",
                "error": "Container mysql-primary not found"
            })
        );
    }

    #[test]
    fn test_running_status_serializes_flat() {
        let status = ContainerStatus::Running(ContainerStats {
            status: "running".to_string(),
            health: "healthy".to_string(),
            created: "2024-01-01T00:00:00Z".to_string(),
            started: "2024-01-02T00:00:00Z".to_string(),
            cpu_percent: 1.5,
            memory_usage_mb: 512.25,
            memory_percent: 12.5,
            network_rx_bytes: 100,
            network_tx_bytes: 200,
        });
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "running");
        assert_eq!(value["cpu_percent"], 1.5);
        assert!(value.get("error").is_none());
    }
}
