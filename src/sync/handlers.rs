use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{SyncReport, SyncRequest};
use crate::shared::{AppError, AppState};

/// Body of POST /sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncHttpRequest {
    pub player_id: String,
    /// Defaults to the configured window
    #[serde(default)]
    pub months: Option<usize>,
    #[serde(default)]
    pub time_classes: Option<Vec<String>>,
}

/// HTTP handler for a sync pass
///
/// POST /sync
/// Runs one pass to completion and returns its counters. A pass that adds
/// nothing still answers 200, with the reason in `message`.
#[instrument(name = "sync_matches", skip(state))]
pub async fn sync_matches(
    State(state): State<AppState>,
    Json(request): Json<SyncHttpRequest>,
) -> Result<Json<SyncReport>, AppError> {
    let player_id = request.player_id.trim();
    if player_id.is_empty() {
        return Err(AppError::BadRequest("player_id must not be empty".to_string()));
    }

    let months = request.months.unwrap_or(state.sync_months);
    if months == 0 {
        return Err(AppError::BadRequest("months must be at least 1".to_string()));
    }

    let mut sync_request = SyncRequest::new(player_id, months);
    if let Some(time_classes) = request.time_classes {
        sync_request = sync_request.with_time_classes(time_classes);
    }

    let summary = state.synchronizer.synchronize_with(&sync_request).await?;
    let report = SyncReport::from(summary);

    info!(
        player_id = %player_id,
        inserted = report.summary.inserted,
        "Sync request handled"
    );
    Ok(Json(report))
}
