//! Handlers for the threshold catalog and the parameter panel.

use aquacheck_core::registry::{StandardSummary, ThresholdSet};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One panel parameter with its display label.
#[derive(Debug, Serialize)]
pub struct PanelEntry {
    pub parameter: String,
    pub label: String,
}

/// GET /api/v1/standards
///
/// List every standard with the water categories it covers.
pub async fn list_standards(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<StandardSummary>>> {
    Json(DataResponse {
        data: state.engine.registry().catalog(),
    })
}

/// GET /api/v1/standards/{standard}/{category}/thresholds
///
/// Resolved thresholds for one selection, in panel order. Returns 404 for
/// an unknown standard or category.
pub async fn get_thresholds(
    State(state): State<AppState>,
    Path((standard, category)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<ThresholdSet>>> {
    let thresholds = state.engine.thresholds(&standard, &category)?;
    Ok(Json(DataResponse { data: thresholds }))
}

/// GET /api/v1/panel
pub async fn get_panel(State(state): State<AppState>) -> Json<DataResponse<Vec<PanelEntry>>> {
    let labels = state.engine.labels();
    let data = state
        .engine
        .panel()
        .iter()
        .map(|parameter| PanelEntry {
            parameter: parameter.to_string(),
            label: labels.display_name(parameter).to_string(),
        })
        .collect();
    Json(DataResponse { data })
}
