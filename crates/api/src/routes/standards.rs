//! Route definitions for the threshold catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::standards;
use crate::state::AppState;

/// ```text
/// GET /standards                                  -> list_standards
/// GET /standards/{standard}/{category}/thresholds -> get_thresholds
/// GET /panel                                      -> get_panel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/standards", get(standards::list_standards))
        .route(
            "/standards/{standard}/{category}/thresholds",
            get(standards::get_thresholds),
        )
        .route("/panel", get(standards::get_panel))
}
