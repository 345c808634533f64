//! Docker Engine implementation of the container runtime seam.

use super::stats::{bytes_to_mb, cpu_percent, memory_percent, round2};
use super::{ContainerRuntime, ContainerStats, ExecOutput, RuntimeError, TailedLogs};
use async_trait::async_trait;
use bollard::container::{
    InspectContainerOptions, LogsOptions, RestartContainerOptions, Stats, StatsOptions,
};
use bollard::exec::{CreateExecOptions, StartExecResults};
use bollard::models::ContainerInspectResponse;
use bollard::Docker;
use futures_util::StreamExt;

/// Container runtime backed by the local Docker daemon.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using the environment defaults (unix socket or DOCKER_HOST).
    pub fn connect() -> Result<Self, RuntimeError> {
        Docker::connect_with_local_defaults()
            .map(|docker| Self { docker })
            .map_err(|e| RuntimeError::Unavailable(e.to_string()))
    }

    fn classify(name: &str, err: bollard::errors::Error) -> RuntimeError {
        match err {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            } => RuntimeError::NotFound(name.to_string()),
            other => RuntimeError::Api(other.to_string()),
        }
    }

    async fn inspect(&self, name: &str) -> Result<ContainerInspectResponse, RuntimeError> {
        self.docker
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
            .map_err(|e| Self::classify(name, e))
    }
}

fn container_state(inspect: &ContainerInspectResponse) -> String {
    inspect
        .state
        .as_ref()
        .and_then(|state| state.status.as_ref())
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_stats(inspect: &ContainerInspectResponse, stats: &Stats) -> ContainerStats {
    let cpu_delta = stats
        .cpu_stats
        .cpu_usage
        .total_usage
        .saturating_sub(stats.precpu_stats.cpu_usage.total_usage);
    let system_delta = stats
        .cpu_stats
        .system_cpu_usage
        .unwrap_or(0)
        .saturating_sub(stats.precpu_stats.system_cpu_usage.unwrap_or(0));

    let memory_usage = stats.memory_stats.usage.unwrap_or(0);
    let memory_limit = stats.memory_stats.limit.unwrap_or(0);

    // Sum across all attached networks
    let (rx, tx) = stats
        .networks
        .as_ref()
        .map(|networks| {
            networks.values().fold((0u64, 0u64), |(rx, tx), n| {
                (rx + n.rx_bytes, tx + n.tx_bytes)
            })
        })
        .unwrap_or((0, 0));

    let state = inspect.state.as_ref();

    ContainerStats {
        status: container_state(inspect),
        health: state
            .and_then(|s| s.health.as_ref())
            .and_then(|h| h.status.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string()),
        created: inspect.created.clone().unwrap_or_default(),
        started: state
            .and_then(|s| s.started_at.clone())
            .unwrap_or_default(),
        cpu_percent: round2(cpu_percent(cpu_delta, system_delta)),
        memory_usage_mb: round2(bytes_to_mb(memory_usage)),
        memory_percent: round2(memory_percent(memory_usage, memory_limit)),
        network_rx_bytes: rx,
        network_tx_bytes: tx,
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn stats(&self, name: &str) -> Result<ContainerStats, RuntimeError> {
        let inspect = self.inspect(name).await?;

        let mut stream = self.docker.stats(
            name,
            Some(StatsOptions {
                stream: false,
                one_shot: false,
            }),
        );
        let stats = stream
            .next()
            .await
            .ok_or_else(|| RuntimeError::Api(format!("no stats reported for container {name}")))?
            .map_err(|e| Self::classify(name, e))?;

        Ok(build_stats(&inspect, &stats))
    }

    async fn restart(&self, name: &str) -> Result<(), RuntimeError> {
        self.docker
            .restart_container(name, None::<RestartContainerOptions>)
            .await
            .map_err(|e| Self::classify(name, e))
    }

    async fn exec(&self, name: &str, cmd: Vec<String>) -> Result<ExecOutput, RuntimeError> {
        let exec = self
            .docker
            .create_exec(
                name,
                CreateExecOptions {
                    cmd: Some(cmd),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| Self::classify(name, e))?;

        let mut captured = Vec::new();
        match self
            .docker
            .start_exec(&exec.id, None)
            .await
            .map_err(|e| Self::classify(name, e))?
        {
            StartExecResults::Attached { mut output, .. } => {
                while let Some(chunk) = output.next().await {
                    let log = chunk.map_err(|e| Self::classify(name, e))?;
                    captured.extend_from_slice(&log.into_bytes());
                }
            }
            StartExecResults::Detached => {}
        }

        let inspect = self
            .docker
            .inspect_exec(&exec.id)
            .await
            .map_err(|e| Self::classify(name, e))?;

        Ok(ExecOutput {
            exit_code: inspect.exit_code,
            output: captured,
        })
    }

    async fn tail_logs(&self, name: &str, lines: usize) -> Result<TailedLogs, RuntimeError> {
        let inspect = self.inspect(name).await?;

        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            timestamps: true,
            tail: lines.to_string(),
            ..Default::default()
        };

        let mut stream = self.docker.logs(name, Some(options));
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            let log = chunk.map_err(|e| Self::classify(name, e))?;
            let text = String::from_utf8_lossy(&log.into_bytes()).into_owned();
            for line in text.lines() {
                if !line.is_empty() {
                    collected.push(line.to_string());
                }
            }
        }

        Ok(TailedLogs {
            lines: collected,
            container_status: container_state(&inspect),
        })
    }
}
