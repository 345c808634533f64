//! Container status endpoint.

use crate::api::{ApiError, AppState};
use crate::runtime::{probe_container, ContainerStatus};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Response for GET /api/container/status.
#[derive(Debug, Serialize)]
pub struct ContainerStatusResponse {
    pub timestamp: DateTime<Utc>,
    pub containers: BTreeMap<String, ContainerStatus>,
}

/// GET /api/container/status - Resource stats for the three well-known
/// containers. A missing or faulty container gets an explicit marker entry
/// instead of failing the whole response.
pub async fn handle(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContainerStatusResponse>, ApiError> {
    let runtime = state
        .runtime
        .as_ref()
        .ok_or_else(|| ApiError::internal("Container runtime not available"))?;

    let mut containers = BTreeMap::new();
    for name in state.config.containers.names() {
        let status = probe_container(runtime.as_ref(), name).await;
        containers.insert(name.to_string(), status);
    }

    Ok(Json(ContainerStatusResponse {
        timestamp: Utc::now(),
        containers,
    }))
}
