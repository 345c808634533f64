//! Data-plane probes for the router admin interface and the two MySQL
//! servers.
//!
//! Each probe opens a fresh connection per invocation, issues its fixed set
//! of status queries, and releases the connection on every exit path. Probe
//! sources are traits so the monitor and API can be exercised with stubs.

mod database;
mod router;
mod rows;

pub use database::{DatabaseProbe, DatabaseRole};
pub use router::RouterProbe;
pub use rows::row_to_json;

use crate::monitor::types::{BackendStatus, RouterStatus, TrafficSnapshot};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Probe-level errors. Connection failures are folded into status records by
/// the probes themselves; these surface only for query-phase faults and for
/// the realtime traffic path, which has no status record to hide behind.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of router status and live traffic counters.
#[async_trait]
pub trait RouterSource: Send + Sync {
    /// Probe the router admin interface. Never fails; faults are folded
    /// into the returned status record.
    async fn probe(&self) -> RouterStatus;

    /// Fetch live traffic counters, bypassing the snapshot cache.
    async fn realtime_traffic(&self) -> Result<TrafficSnapshot, ProbeError>;
}

/// Source of status for one MySQL server.
#[async_trait]
pub trait DatabaseSource: Send + Sync {
    /// Probe the server. Never fails; faults are folded into the record.
    async fn probe(&self) -> BackendStatus;
}
