pub mod analysis;
pub mod health;
pub mod standards;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /standards                                        catalog (GET)
/// /standards/{standard}/{category}/thresholds       resolved thresholds (GET)
/// /panel                                            panel with labels (GET)
///
/// /analysis                                         run an analysis (POST)
/// /analysis/export                                  analysis as CSV (POST)
/// /measurements/import                              CSV -> measurements (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Threshold catalog and panel.
        .merge(standards::router())
        // Analysis, export and import.
        .merge(analysis::router())
}
