//! Route definitions for analysis and measurement import.

use axum::routing::post;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// ```text
/// POST /analysis             -> analyze
/// POST /analysis/export      -> export_analysis  (CSV)
/// POST /measurements/import  -> import_measurements
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(analysis::analyze))
        .route("/analysis/export", post(analysis::export_analysis))
        .route("/measurements/import", post(analysis::import_measurements))
}
