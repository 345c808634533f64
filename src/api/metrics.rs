//! Cluster snapshot and router backend endpoints.

use crate::api::AppState;
use crate::monitor::{ClusterSnapshot, StatusRow};
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/metrics - Return the aggregated cluster snapshot.
///
/// Served from the cache when fresh; otherwise this request pays for the
/// probe cycle itself.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<ClusterSnapshot> {
    let snapshot = state.monitor.snapshot().await;
    Json(snapshot.as_ref().clone())
}

/// GET /api/proxysql/backends - Return the router's backend server rows.
///
/// Probes the router directly; an unreachable router yields an empty array,
/// matching the probe's offline record.
pub async fn handle_backends(State(state): State<Arc<AppState>>) -> Json<Vec<StatusRow>> {
    let status = state.router_source.probe().await;
    Json(status.backends)
}
