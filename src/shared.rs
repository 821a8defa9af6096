use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::matches::{repository::MatchRepository, StoreError};
use crate::sync::{ArchiveSynchronizer, SyncError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub match_repository: Arc<dyn MatchRepository>,
    pub synchronizer: Arc<ArchiveSynchronizer>,
    /// Window used when a sync request does not name one
    pub sync_months: usize,
}

impl AppState {
    pub fn new(
        match_repository: Arc<dyn MatchRepository>,
        synchronizer: Arc<ArchiveSynchronizer>,
        sync_months: usize,
    ) -> Self {
        Self {
            match_repository,
            synchronizer,
            sync_months,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => AppError::BadRequest(msg),
            not_found @ StoreError::NotFound(_) => AppError::NotFound(not_found.to_string()),
            StoreError::Database(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Sync(err) => {
                let status = match &err {
                    SyncError::RemoteNotFound(_) => StatusCode::NOT_FOUND,
                    SyncError::RemoteRejected(_) | SyncError::RemoteUnavailable(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                    SyncError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
