//! Panel evaluator: one classified row per panel parameter.

use serde::Serialize;

use super::classifier::{classify_with_margin, MARGIN_RATIO};
use super::measurement::{MeasurementSet, Reading};
use super::status::StatusTier;
use crate::error::CoreError;
use crate::parameters::Panel;
use crate::registry::{ThresholdSet, ThresholdSpec};

/// Classified result for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRow {
    pub parameter: String,
    pub reading: Reading,
    pub threshold: ThresholdSpec,
    pub status: StatusTier,
}

impl EvaluationRow {
    /// `value / max` for a numeric reading against a scalar ceiling.
    pub fn ratio(&self) -> Option<f64> {
        self.reading.finite().and_then(|v| self.threshold.ratio(v))
    }
}

/// Evaluate every panel parameter using [`MARGIN_RATIO`].
pub fn evaluate(
    measurements: &MeasurementSet,
    thresholds: &ThresholdSet,
    panel: &Panel,
) -> Result<Vec<EvaluationRow>, CoreError> {
    evaluate_with_margin(measurements, thresholds, panel, MARGIN_RATIO)
}

/// Evaluate every panel parameter, in panel order.
///
/// A parameter with no supplied measurement yields a `Missing` row. A panel
/// parameter with no threshold fails the whole run: that is a registry/panel
/// mismatch, not a data problem.
pub fn evaluate_with_margin(
    measurements: &MeasurementSet,
    thresholds: &ThresholdSet,
    panel: &Panel,
    margin: f64,
) -> Result<Vec<EvaluationRow>, CoreError> {
    thresholds.ensure_covers(panel)?;

    panel
        .iter()
        .map(|parameter| {
            let threshold = *thresholds.get(parameter).ok_or_else(|| {
                CoreError::Configuration(format!("no threshold configured for '{parameter}'"))
            })?;
            let reading = measurements.get(parameter).clone();
            let status = classify_with_margin(&reading, &threshold, margin);
            Ok(EvaluationRow {
                parameter: parameter.to_string(),
                reading,
                threshold,
                status,
            })
        })
        .collect()
}
