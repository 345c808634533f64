//! API error responses.
//!
//! Every failure path returns a valid JSON body with an `error` field and an
//! appropriate status code; nothing reaches the wire as a bare string or a
//! partial body.

use crate::actions::ActionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    /// Diagnostic command output, present for failed backup runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// API-level error: a status code plus a JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                output: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::InvalidService(_) => Self::bad_request(err.to_string()),
            ActionError::NotFound(_) => Self::not_found(err.to_string()),
            ActionError::Failed { message, output } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    error: message,
                    output: Some(output),
                },
            },
            ActionError::Unavailable(_) | ActionError::Runtime(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_service_maps_to_400() {
        let err: ApiError = ActionError::InvalidService("postgres".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = ActionError::NotFound("proxysql".to_string()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.body.error.contains("proxysql"));
    }

    #[test]
    fn test_failed_backup_keeps_diagnostic_output() {
        let err: ApiError = ActionError::Failed {
            message: "Backup failed".to_string(),
            output: "mysqldump: access denied".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.output.as_deref(), Some("mysqldump: access denied"));
    }

    #[test]
    fn test_unavailable_maps_to_500() {
        let err: ApiError = ActionError::Unavailable("no socket".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
