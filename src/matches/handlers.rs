use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{MatchRecord, MatchTotals},
    service::MatchService,
    types::{CreateMatchRequest, UpdateMatchRequest},
};
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> MatchService {
    MatchService::new(Arc::clone(&state.match_repository))
}

/// GET /matches
#[instrument(name = "list_matches", skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let records = service(&state).list().await?;
    info!(match_count = records.len(), "Matches listed");
    Ok(Json(records))
}

/// POST /matches
///
/// Manual entry; returns 201 with the stored record
#[instrument(name = "create_match", skip(state))]
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchRecord>), AppError> {
    let new_match = request.into_new_match()?;
    let record = service(&state).add(new_match).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /matches/:id
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MatchRecord>, AppError> {
    Ok(Json(service(&state).get(id).await?))
}

/// PATCH /matches/:id
#[instrument(name = "update_match", skip(state))]
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let update = request.into_update()?;
    Ok(Json(service(&state).edit(id, update).await?))
}

/// DELETE /matches/:id
#[instrument(name = "delete_match", skip(state))]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /matches
///
/// Removes every record and restarts id assignment
#[instrument(name = "reset_matches", skip(state))]
pub async fn reset_matches(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    service(&state).reset().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /matches/totals
#[instrument(name = "match_totals", skip(state))]
pub async fn match_totals(State(state): State<AppState>) -> Result<Json<MatchTotals>, AppError> {
    Ok(Json(service(&state).totals().await?))
}
