use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::session::TrackerService;
use crate::tracker::TrackerError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<TrackerService>,
}

impl AppState {
    pub fn new(tracker: Arc<TrackerService>) -> Self {
        Self { tracker }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        let message = err.to_string();
        match err {
            TrackerError::InvalidInput(_)
            | TrackerError::InvalidOutcome { .. }
            | TrackerError::InvalidShotType(_) => AppError::BadRequest(message),
            TrackerError::DuplicateNumber { .. } => AppError::Conflict(message),
            TrackerError::UnknownPlayer(_) | TrackerError::NotFound(_) => {
                AppError::NotFound(message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
