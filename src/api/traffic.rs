//! Realtime router traffic endpoint.

use crate::api::{ApiError, AppState};
use crate::monitor::TrafficSnapshot;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/traffic/realtime - Live router counters, never cached.
pub async fn handle(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrafficSnapshot>, ApiError> {
    state
        .router_source
        .realtime_traffic()
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(format!("Cannot read router traffic: {e}")))
}
