//! Parameter catalog: well-known parameter keys, the default test panel,
//! and human-readable display labels.
//!
//! A parameter key names both the measured property and its unit
//! (`"nitrates (mg/L)"`). Keys must match the threshold tables exactly;
//! unit consistency is the registry's responsibility.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter keys
// ---------------------------------------------------------------------------

/// Nitrate concentration.
pub const PARAM_NITRATES: &str = "nitrates (mg/L)";
/// Lead concentration.
pub const PARAM_LEAD: &str = "lead (µg/L)";
/// Acidity / alkalinity. Bounded by a range, not a ceiling.
pub const PARAM_PH: &str = "pH";
/// Turbidity in nephelometric turbidity units.
pub const PARAM_TURBIDITY: &str = "turbidity (NTU)";
/// Iron concentration.
pub const PARAM_IRON: &str = "iron (mg/L)";
/// Magnesium concentration.
pub const PARAM_MAGNESIUM: &str = "magnesium (mg/L)";
/// Residual chlorine concentration.
pub const PARAM_CHLORINE: &str = "chlorine (mg/L)";

/// The default panel, in display order.
pub const DEFAULT_PANEL: &[&str] = &[
    PARAM_NITRATES,
    PARAM_LEAD,
    PARAM_PH,
    PARAM_TURBIDITY,
    PARAM_IRON,
    PARAM_MAGNESIUM,
    PARAM_CHLORINE,
];

/// Alternate spellings accepted for the well-known keys, including the
/// French names used by older measurement templates.
pub const PARAMETER_ALIASES: &[(&str, &[&str])] = &[
    (PARAM_NITRATES, &["nitrates", "nitrate"]),
    (PARAM_LEAD, &["plomb (µg/L)", "plomb", "lead"]),
    (
        PARAM_TURBIDITY,
        &["turbidite (NTU)", "turbidité (NTU)", "turbidite", "turbidité", "turbidity"],
    ),
    (PARAM_IRON, &["fer (mg/L)", "fer", "iron"]),
    (PARAM_MAGNESIUM, &["magnésium (mg/L)", "magnesium", "magnésium"]),
    (PARAM_CHLORINE, &["chlore (mg/L)", "chlore", "chlorine"]),
];

const DEFAULT_LABELS: &[(&str, &str)] = &[
    (PARAM_NITRATES, "Nitrates"),
    (PARAM_LEAD, "Lead"),
    (PARAM_PH, "pH"),
    (PARAM_TURBIDITY, "Turbidity"),
    (PARAM_IRON, "Iron"),
    (PARAM_MAGNESIUM, "Magnesium"),
    (PARAM_CHLORINE, "Chlorine"),
];

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// The ordered list of parameters evaluated in one run.
///
/// Order is significant: evaluation rows are emitted in panel order and the
/// worst-offender tie-break prefers earlier entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Panel(Vec<String>);

impl Panel {
    pub fn new<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parameters.into_iter().map(Into::into).collect())
    }

    /// The seven-parameter panel used by the built-in threshold tables.
    pub fn standard() -> Self {
        Self::new(DEFAULT_PANEL.iter().copied())
    }

    pub fn parameters(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Find the panel key matching `name`, ignoring case and surrounding
    /// whitespace on both sides. Aliases of well-known keys (see
    /// [`canonical_name`]) match too.
    pub fn match_name(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.iter()
            .find(|p| p.trim().to_lowercase() == needle)
            .or_else(|| {
                let canonical = canonical_name(name)?;
                self.iter().find(|p| *p == canonical)
            })
    }
}

/// Resolve an alias from [`PARAMETER_ALIASES`] to its well-known key,
/// ignoring case and surrounding whitespace.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    let needle = name.trim().to_lowercase();
    PARAMETER_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| a.to_lowercase() == needle))
        .map(|(key, _)| *key)
}

impl Default for Panel {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Secondary lookup from parameter key to a human label.
///
/// Missing labels are not an error: [`ParameterLabels::display_name`] falls
/// back to the raw key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterLabels(HashMap<String, String>);

impl ParameterLabels {
    /// An empty lookup; every parameter displays as its key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Labels for the built-in parameter catalog.
    pub fn standard() -> Self {
        DEFAULT_LABELS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn insert(&mut self, parameter: impl Into<String>, label: impl Into<String>) {
        self.0.insert(parameter.into(), label.into());
    }

    pub fn display_name<'a>(&'a self, parameter: &'a str) -> &'a str {
        self.0.get(parameter).map(String::as_str).unwrap_or(parameter)
    }
}

impl FromIterator<(String, String)> for ParameterLabels {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
