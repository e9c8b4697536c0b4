//! Threshold classification for a single reading.

use super::measurement::Reading;
use super::status::StatusTier;
use crate::error::CoreError;
use crate::registry::ThresholdSpec;

/// Fraction of a scalar ceiling at or below which a reading is safely
/// compliant. Readings above it, up to the ceiling, are near-limit.
pub const MARGIN_RATIO: f64 = 0.9;

/// Classify `reading` against `spec` using [`MARGIN_RATIO`].
pub fn classify(reading: &Reading, spec: &ThresholdSpec) -> StatusTier {
    classify_with_margin(reading, spec, MARGIN_RATIO)
}

/// Classify `reading` against `spec` with an explicit margin ratio.
///
/// Rules apply in order:
/// 1. absent or `NaN` -> `Missing`
/// 2. not a finite number -> `Invalid`
/// 3. `Indicative` / `Unset` spec -> `Indicative`, no comparison
/// 4. `Range` -> `Compliant` inside `[min, max]`, else `NonCompliant`
/// 5. `Scalar` -> `Compliant` up to `margin * max`, `NearLimit` up to `max`,
///    `NonCompliant` above
///
/// All boundaries are inclusive on the compliant side.
pub fn classify_with_margin(reading: &Reading, spec: &ThresholdSpec, margin: f64) -> StatusTier {
    if reading.is_missing() {
        return StatusTier::Missing;
    }
    let Some(value) = reading.finite() else {
        return StatusTier::Invalid;
    };

    match *spec {
        ThresholdSpec::Indicative | ThresholdSpec::Unset => StatusTier::Indicative,
        ThresholdSpec::Range { min, max } => {
            if min <= value && value <= max {
                StatusTier::Compliant
            } else {
                StatusTier::NonCompliant
            }
        }
        ThresholdSpec::Scalar { max } => {
            if value <= margin * max {
                StatusTier::Compliant
            } else if value <= max {
                StatusTier::NearLimit
            } else {
                StatusTier::NonCompliant
            }
        }
    }
}

/// Validate that a margin ratio falls within `(0.0, 1.0]`.
pub fn validate_margin_ratio(margin: f64) -> Result<(), CoreError> {
    if !(margin > 0.0 && margin <= 1.0) {
        return Err(CoreError::Validation(format!(
            "margin ratio must be in (0.0, 1.0], got {margin}"
        )));
    }
    Ok(())
}
