//! Threshold specifications and the resolved per-category threshold set.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::parameters::Panel;

/// Loose-form marker for a threshold with no regulatory force.
pub const LOOSE_INDICATIVE: &str = "indicative";

/// The limit attached to one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdSpec {
    /// Must not exceed `max`; a soft margin below `max` flags near-limit values.
    Scalar { max: f64 },
    /// Must lie within `[min, max]` inclusive.
    Range { min: f64, max: f64 },
    /// Informational only, never enforced.
    Indicative,
    /// No limit configured.
    Unset,
}

impl ThresholdSpec {
    pub fn scalar(max: f64) -> Self {
        Self::Scalar { max }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Ratio of `value` to the scalar ceiling. `None` for every other variant.
    pub fn ratio(&self, value: f64) -> Option<f64> {
        match self {
            Self::Scalar { max } => Some(value / max),
            _ => None,
        }
    }

    /// Resolve the loose representation used in threshold table files.
    ///
    /// | Loose form          | Resolved            |
    /// |---------------------|---------------------|
    /// | `50`                | `Scalar { max: 50 }`|
    /// | `[6.5, 8.5]`        | `Range`             |
    /// | `"indicative"`      | `Indicative`        |
    /// | `null`              | `Unset`             |
    /// | `{"kind": ...}`     | tagged form as-is   |
    pub fn from_loose(value: &Value) -> Result<Self, CoreError> {
        let spec = match value {
            Value::Null => Self::Unset,
            Value::Number(n) => {
                let max = n.as_f64().ok_or_else(|| {
                    CoreError::Configuration(format!("threshold {n} is not representable"))
                })?;
                Self::Scalar { max }
            }
            Value::Array(items) => match items.as_slice() {
                [min, max] => match (min.as_f64(), max.as_f64()) {
                    (Some(min), Some(max)) => Self::Range { min, max },
                    _ => {
                        return Err(CoreError::Configuration(format!(
                            "range bounds must be numbers, got {value}"
                        )))
                    }
                },
                _ => {
                    return Err(CoreError::Configuration(format!(
                        "range must have exactly two bounds, got {value}"
                    )))
                }
            },
            Value::String(s) if s.trim().eq_ignore_ascii_case(LOOSE_INDICATIVE) => {
                Self::Indicative
            }
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
                CoreError::Configuration(format!("invalid threshold {value}: {e}"))
            })?,
            other => {
                return Err(CoreError::Configuration(format!(
                    "unsupported threshold value {other}"
                )))
            }
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check that bounds are usable for classification.
    pub fn validate(&self) -> Result<(), CoreError> {
        match *self {
            Self::Scalar { max } if !max.is_finite() || max <= 0.0 => {
                Err(CoreError::Configuration(format!(
                    "scalar limit must be a positive number, got {max}"
                )))
            }
            Self::Range { min, max } if !min.is_finite() || !max.is_finite() || min > max => {
                Err(CoreError::Configuration(format!(
                    "range limit must satisfy min <= max, got [{min}, {max}]"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ThresholdSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { max } => write!(f, "{max}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
            Self::Indicative => f.write_str(LOOSE_INDICATIVE),
            Self::Unset => f.write_str("unset"),
        }
    }
}

/// Resolved thresholds for one standard/category pair, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdSet(IndexMap<String, ThresholdSpec>);

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter: impl Into<String>, spec: ThresholdSpec) {
        self.0.insert(parameter.into(), spec);
    }

    pub fn get(&self, parameter: &str) -> Option<&ThresholdSpec> {
        self.0.get(parameter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThresholdSpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fail if any panel parameter has no entry.
    pub fn ensure_covers(&self, panel: &Panel) -> Result<(), CoreError> {
        let missing: Vec<&str> = panel.iter().filter(|p| !self.0.contains_key(*p)).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Configuration(format!(
                "no threshold configured for panel parameter(s): {}",
                missing.join(", ")
            )))
        }
    }

    /// Restrict to the panel's parameters, in panel order.
    pub fn for_panel(&self, panel: &Panel) -> Result<Self, CoreError> {
        self.ensure_covers(panel)?;
        Ok(panel
            .iter()
            .filter_map(|p| self.0.get(p).map(|spec| (p.to_string(), *spec)))
            .collect())
    }
}

impl FromIterator<(String, ThresholdSpec)> for ThresholdSet {
    fn from_iter<T: IntoIterator<Item = (String, ThresholdSpec)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
