//! Remote action endpoints.

use crate::actions::{BackupReport, LogsReport, RestartReport};
use crate::api::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// GET /api/actions/restart/:service
pub async fn handle_restart(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> Result<Json<RestartReport>, ApiError> {
    state
        .actions
        .restart(&service)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

/// GET /api/actions/backup
pub async fn handle_backup(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BackupReport>, ApiError> {
    state.actions.backup().await.map(Json).map_err(ApiError::from)
}

/// GET /api/logs/:service
pub async fn handle_logs(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> Result<Json<LogsReport>, ApiError> {
    state
        .actions
        .fetch_logs(&service)
        .await
        .map(Json)
        .map_err(ApiError::from)
}
