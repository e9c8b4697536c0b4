//! Measurement values and the per-run measurement snapshot.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// A single measured value as supplied by the caller.
///
/// Absence is its own state, never zero. A `NaN` value is treated as absent
/// by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    Absent,
    Value(f64),
    /// Supplied text that could not be read as a number.
    Unparseable(String),
}

impl Reading {
    /// Parse a free-text cell. Blank cells are absent; a lone decimal comma
    /// (`"12,5"`) is accepted.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Self::Value(v);
        }
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            if let Ok(v) = trimmed.replace(',', ".").parse::<f64>() {
                return Self::Value(v);
            }
        }
        Self::Unparseable(trimmed.to_string())
    }

    /// Interpret a JSON request value: `null` is absent, numbers are taken
    /// as-is, strings go through [`Reading::parse`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Number(n) => n
                .as_f64()
                .map(Self::Value)
                .unwrap_or_else(|| Self::Unparseable(n.to_string())),
            Value::String(s) => Self::parse(s),
            other => Self::Unparseable(other.to_string()),
        }
    }

    /// True when no usable value was supplied (absent or `NaN`).
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Value(v) => v.is_nan(),
            Self::Unparseable(_) => false,
        }
    }

    /// The value when it is a finite number.
    pub fn finite(&self) -> Option<f64> {
        match self {
            Self::Value(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::Value)
    }
}

static ABSENT: Reading = Reading::Absent;

/// Immutable snapshot of parameter -> reading for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MeasurementSet(HashMap<String, Reading>);

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, parameter: impl Into<String>, reading: impl Into<Reading>) -> Self {
        self.0.insert(parameter.into(), reading.into());
        self
    }

    pub fn insert(&mut self, parameter: impl Into<String>, reading: impl Into<Reading>) {
        self.0.insert(parameter.into(), reading.into());
    }

    /// Reading for `parameter`, [`Reading::Absent`] when none was supplied.
    pub fn get(&self, parameter: &str) -> &Reading {
        self.0.get(parameter).unwrap_or(&ABSENT)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Reading)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a set from JSON request values (see [`Reading::from_json`]).
    pub fn from_json_map<'a>(values: impl IntoIterator<Item = (&'a String, &'a Value)>) -> Self {
        values
            .into_iter()
            .map(|(k, v)| (k.clone(), Reading::from_json(v)))
            .collect()
    }
}

impl FromIterator<(String, Reading)> for MeasurementSet {
    fn from_iter<T: IntoIterator<Item = (String, Reading)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
