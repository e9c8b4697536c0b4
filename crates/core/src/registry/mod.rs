//! Threshold registry: standard -> water category -> parameter -> limit.
//!
//! The catalog is fixed once built. Adding a standard is a data change,
//! either in [`builtin`] or in a table file loaded with
//! [`ThresholdRegistry::from_json_str`].

pub mod builtin;
pub mod spec;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::parameters::canonical_name;
pub use spec::{ThresholdSet, ThresholdSpec};

/// A water category under one standard, with its thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub id: String,
    pub label: String,
    pub thresholds: ThresholdSet,
}

/// A regulatory or reference body.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardEntry {
    pub id: String,
    pub label: String,
    pub categories: Vec<CategoryEntry>,
}

/// Catalog listing entry (id + label), for selection menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub label: String,
}

/// A standard and the categories it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSummary {
    pub id: String,
    pub label: String,
    pub categories: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRegistry {
    standards: Vec<StandardEntry>,
}

impl ThresholdRegistry {
    /// Build a registry from explicit entries. Ids must be non-empty and
    /// unique (case-insensitively) at each level, and every threshold must
    /// pass [`ThresholdSpec::validate`].
    pub fn new(standards: Vec<StandardEntry>) -> Result<Self, CoreError> {
        validate_ids(standards.iter().map(|s| s.id.as_str()), "standard")?;
        for standard in &standards {
            validate_ids(
                standard.categories.iter().map(|c| c.id.as_str()),
                "category",
            )?;
            for category in &standard.categories {
                for (parameter, spec) in category.thresholds.iter() {
                    spec.validate().map_err(|e| {
                        CoreError::Configuration(format!(
                            "{}/{}/{parameter}: {e}",
                            standard.id, category.id
                        ))
                    })?;
                }
            }
        }
        Ok(Self { standards })
    }

    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            standards: builtin::standards(),
        }
    }

    /// Load a registry from a JSON table file.
    ///
    /// ```json
    /// {"standards": [{"id": "who", "label": "WHO", "categories": [
    ///   {"id": "tap", "label": "Tap water",
    ///    "thresholds": {"nitrates (mg/L)": 50, "pH": [6.5, 8.5]}}]}]}
    /// ```
    ///
    /// Threshold values use the loose form accepted by
    /// [`ThresholdSpec::from_loose`].
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let file: RegistryFile = serde_json::from_str(json)
            .map_err(|e| CoreError::Configuration(format!("invalid threshold table: {e}")))?;

        let standards = file
            .standards
            .into_iter()
            .map(|s| {
                let categories = s
                    .categories
                    .into_iter()
                    .map(|c| {
                        let thresholds = c
                            .thresholds
                            .into_iter()
                            .map(|(parameter, raw)| {
                                let spec = ThresholdSpec::from_loose(&raw).map_err(|e| {
                                    CoreError::Configuration(format!(
                                        "{}/{}/{parameter}: {e}",
                                        s.id, c.id
                                    ))
                                })?;
                                let key = canonical_name(&parameter)
                                    .map(str::to_string)
                                    .unwrap_or(parameter);
                                Ok((key, spec))
                            })
                            .collect::<Result<ThresholdSet, CoreError>>()?;
                        Ok(CategoryEntry {
                            label: c.label.unwrap_or_else(|| c.id.clone()),
                            id: c.id,
                            thresholds,
                        })
                    })
                    .collect::<Result<Vec<_>, CoreError>>()?;
                Ok(StandardEntry {
                    label: s.label.unwrap_or_else(|| s.id.clone()),
                    id: s.id,
                    categories,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Self::new(standards)
    }

    /// Enumerate standards and their categories, in declaration order.
    pub fn catalog(&self) -> Vec<StandardSummary> {
        self.standards
            .iter()
            .map(|s| StandardSummary {
                id: s.id.clone(),
                label: s.label.clone(),
                categories: s
                    .categories
                    .iter()
                    .map(|c| CatalogItem {
                        id: c.id.clone(),
                        label: c.label.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn standards(&self) -> impl Iterator<Item = &StandardEntry> {
        self.standards.iter()
    }

    /// Look up a standard by id, ignoring case and surrounding whitespace.
    pub fn standard(&self, id: &str) -> Result<&StandardEntry, CoreError> {
        self.standards
            .iter()
            .find(|s| same_id(&s.id, id))
            .ok_or_else(|| CoreError::NotFound {
                kind: "standard",
                key: id.to_string(),
            })
    }

    pub fn categories(&self, standard: &str) -> Result<&[CategoryEntry], CoreError> {
        Ok(&self.standard(standard)?.categories)
    }

    /// Resolve the thresholds for one standard/category pair.
    pub fn resolve(&self, standard: &str, category: &str) -> Result<ThresholdSet, CoreError> {
        let entry = self
            .standard(standard)?
            .categories
            .iter()
            .find(|c| same_id(&c.id, category))
            .ok_or_else(|| CoreError::NotFound {
                kind: "water category",
                key: format!("{}/{}", standard.trim(), category.trim()),
            })?;
        Ok(entry.thresholds.clone())
    }
}

impl Default for ThresholdRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn same_id(stored: &str, requested: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(requested.trim())
}

fn validate_ids<'a>(ids: impl Iterator<Item = &'a str>, kind: &str) -> Result<(), CoreError> {
    let mut seen: Vec<String> = Vec::new();
    for id in ids {
        let normalized = id.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::Configuration(format!("{kind} id must not be empty")));
        }
        if seen.contains(&normalized) {
            return Err(CoreError::Configuration(format!("duplicate {kind} id '{id}'")));
        }
        seen.push(normalized);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RegistryFile {
    standards: Vec<StandardFile>,
}

#[derive(Debug, Deserialize)]
struct StandardFile {
    id: String,
    label: Option<String>,
    categories: Vec<CategoryFile>,
}

#[derive(Debug, Deserialize)]
struct CategoryFile {
    id: String,
    label: Option<String>,
    thresholds: IndexMap<String, Value>,
}
