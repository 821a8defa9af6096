use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::matches::handlers::{
    create_match, delete_match, get_match, list_matches, match_totals, reset_matches,
    update_match,
};
use crate::shared::AppState;
use crate::sync::handlers::sync_matches;

/// All HTTP routes of the tracker
pub fn create_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/matches",
            get(list_matches).post(create_match).delete(reset_matches),
        )
        .route("/matches/totals", get(match_totals))
        .route(
            "/matches/:id",
            get(get_match).patch(update_match).delete(delete_match),
        )
        .route("/sync", post(sync_matches))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
