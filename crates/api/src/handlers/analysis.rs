//! Handlers for compliance analysis, report export and measurement import.

use aquacheck_core::compliance::{Analysis, MeasurementSet, Reading};
use aquacheck_core::measurement_import::{import_csv, MeasurementImport};
use aquacheck_core::parameters::Panel;
use aquacheck_core::report_export::build_csv;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::Json;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body shared by `/analysis` and `/analysis/export`.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub standard: String,
    pub category: String,
    /// Parameter -> number, numeric string, or null. Unknown parameters
    /// are ignored by the evaluator.
    #[serde(default)]
    pub measurements: IndexMap<String, Value>,
}

impl AnalysisRequest {
    /// Convert request values into a snapshot keyed by panel parameter.
    ///
    /// Keys are matched to the panel case-insensitively, aliases included;
    /// keys matching no panel parameter are kept verbatim. When several keys
    /// resolve to the same parameter the first one wins.
    fn measurement_set(&self, panel: &Panel) -> MeasurementSet {
        let mut readings: IndexMap<String, Reading> = IndexMap::new();
        for (key, value) in &self.measurements {
            let parameter = panel.match_name(key).unwrap_or(key.as_str());
            readings
                .entry(parameter.to_string())
                .or_insert_with(|| Reading::from_json(value));
        }
        readings.into_iter().collect()
    }
}

fn run_analysis(state: &AppState, input: &AnalysisRequest) -> AppResult<Analysis> {
    let measurements = input.measurement_set(state.engine.panel());
    let analysis = state
        .engine
        .analyze(&input.standard, &input.category, &measurements)?;

    tracing::info!(
        standard = %analysis.standard,
        category = %analysis.category,
        verdict = ?analysis.verdict.tier,
        worst = analysis.verdict.worst_parameter.as_deref().unwrap_or("-"),
        "Analysis completed",
    );

    Ok(analysis)
}

/// POST /api/v1/analysis
///
/// Evaluate the submitted measurements against the selected standard and
/// water category. Returns per-parameter rows, the verdict and tier counts.
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalysisRequest>,
) -> AppResult<Json<DataResponse<Analysis>>> {
    let analysis = run_analysis(&state, &input)?;
    Ok(Json(DataResponse { data: analysis }))
}

/// POST /api/v1/analysis/export
///
/// Same input as [`analyze`], returned as a CSV report.
pub async fn export_analysis(
    State(state): State<AppState>,
    Json(input): Json<AnalysisRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, &'static str); 1], String)> {
    let analysis = run_analysis(&state, &input)?;
    let csv = build_csv(&analysis.rows)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], csv))
}

/// POST /api/v1/measurements/import
///
/// Parse a raw CSV body into panel measurements. Rows naming no panel
/// parameter are reported in `unrecognized`; a file without usable
/// parameter/value columns is rejected with 422.
pub async fn import_measurements(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<DataResponse<MeasurementImport>>> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Request body is empty".to_string()));
    }

    let imported = import_csv(&body, state.engine.panel())?;

    tracing::debug!(
        matched = imported.matched.len(),
        unrecognized = imported.unrecognized.len(),
        "Measurements imported",
    );

    Ok(Json(DataResponse { data: imported }))
}
