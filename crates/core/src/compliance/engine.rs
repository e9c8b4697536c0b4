//! Configured engine: registry, panel, margin and labels bundled together.

use serde::Serialize;

use super::classifier::{validate_margin_ratio, MARGIN_RATIO};
use super::evaluator::{evaluate_with_margin, EvaluationRow};
use super::measurement::MeasurementSet;
use super::verdict::{aggregate_with_labels, summarize, TierSummary, Verdict};
use crate::error::CoreError;
use crate::parameters::{Panel, ParameterLabels};
use crate::registry::{ThresholdRegistry, ThresholdSet};

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub standard: String,
    pub category: String,
    pub rows: Vec<EvaluationRow>,
    pub verdict: Verdict,
    pub summary: TierSummary,
}

/// Immutable engine configuration. Safe to share across threads; every call
/// works on its own input snapshot.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    registry: ThresholdRegistry,
    panel: Panel,
    margin_ratio: f64,
    labels: ParameterLabels,
}

impl ComplianceEngine {
    /// Build an engine. Fails if the margin ratio is outside `(0, 1]` or the
    /// panel is empty.
    pub fn new(
        registry: ThresholdRegistry,
        panel: Panel,
        margin_ratio: f64,
        labels: ParameterLabels,
    ) -> Result<Self, CoreError> {
        validate_margin_ratio(margin_ratio)?;
        if panel.is_empty() {
            return Err(CoreError::Validation("panel must not be empty".to_string()));
        }
        Ok(Self {
            registry,
            panel,
            margin_ratio,
            labels,
        })
    }

    pub fn registry(&self) -> &ThresholdRegistry {
        &self.registry
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn margin_ratio(&self) -> f64 {
        self.margin_ratio
    }

    pub fn labels(&self) -> &ParameterLabels {
        &self.labels
    }

    /// Thresholds for a selection, restricted to and ordered by the panel.
    pub fn thresholds(&self, standard: &str, category: &str) -> Result<ThresholdSet, CoreError> {
        self.registry
            .resolve(standard, category)?
            .for_panel(&self.panel)
    }

    /// Resolve, evaluate, aggregate and summarize in one call.
    pub fn analyze(
        &self,
        standard: &str,
        category: &str,
        measurements: &MeasurementSet,
    ) -> Result<Analysis, CoreError> {
        let thresholds = self.thresholds(standard, category)?;
        let rows = evaluate_with_margin(measurements, &thresholds, &self.panel, self.margin_ratio)?;
        let verdict = aggregate_with_labels(&rows, &self.labels);
        let summary = summarize(&rows);

        Ok(Analysis {
            standard: standard.trim().to_string(),
            category: category.trim().to_string(),
            rows,
            verdict,
            summary,
        })
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self {
            registry: ThresholdRegistry::builtin(),
            panel: Panel::standard(),
            margin_ratio: MARGIN_RATIO,
            labels: ParameterLabels::standard(),
        }
    }
}
