//! Tabular measurement import (CSV).
//!
//! Accepts loosely-named columns: one naming the parameter, one holding the
//! measured value. Rows are matched to the panel by case-insensitive,
//! whitespace-trimmed name; unrecognized rows are reported, never fatal.

use serde::Serialize;

use crate::compliance::{MeasurementSet, Reading};
use crate::error::CoreError;
use crate::parameters::Panel;

/// Accepted headers for the parameter-name column.
pub const PARAMETER_COLUMN_ALIASES: &[&str] = &["test", "parameter", "paramètre", "parametre"];

/// Accepted headers for the value column, in priority order.
pub const VALUE_COLUMN_ALIASES: &[&str] = &[
    "valeur mesurée",
    "valeur mesuree",
    "measured value",
    "valeur",
    "mesure",
    "value",
];

/// Result of importing one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementImport {
    /// Readings keyed by panel parameter.
    pub measurements: MeasurementSet,
    /// Panel parameters that received a value, in panel order.
    pub matched: Vec<String>,
    /// Row names that matched no panel parameter, in file order.
    pub unrecognized: Vec<String>,
}

impl MeasurementImport {
    /// Overlay imported readings on `base`, returning a new snapshot.
    /// Parameters absent from the import keep their `base` reading.
    pub fn apply_to(&self, base: &MeasurementSet) -> MeasurementSet {
        let mut merged = base.clone();
        for (parameter, reading) in self.measurements.iter() {
            merged.insert(parameter, reading.clone());
        }
        merged
    }
}

/// Parse CSV bytes and map rows onto `panel`.
///
/// Fails with [`CoreError::Import`] when the file is not valid CSV or the
/// parameter/value columns cannot be found. When a parameter appears on
/// several rows the first one wins. A `;` delimiter is detected from the
/// header line.
pub fn import_csv(data: &[u8], panel: &Panel) -> Result<MeasurementImport, CoreError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| CoreError::Import(format!("Invalid UTF-8: {e}")))?;
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text
        .lines()
        .next()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| CoreError::Import("CSV is empty".to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Import(format!("Unreadable CSV header: {e}")))?
        .clone();

    let parameter_col = find_column(&headers, PARAMETER_COLUMN_ALIASES);
    let value_col = VALUE_COLUMN_ALIASES
        .iter()
        .find_map(|alias| find_column(&headers, &[*alias]));

    let (Some(parameter_col), Some(value_col)) = (parameter_col, value_col) else {
        return Err(CoreError::Import(format!(
            "CSV not recognized: expected a parameter column ({}) and a value column ({})",
            PARAMETER_COLUMN_ALIASES.join(", "),
            VALUE_COLUMN_ALIASES.join(", ")
        )));
    };

    let mut import = MeasurementImport::default();
    let mut seen: Vec<&str> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Import(format!("Malformed CSV row: {e}")))?;
        let name = record.get(parameter_col).unwrap_or("");
        if name.is_empty() {
            continue;
        }
        let Some(parameter) = panel.match_name(name) else {
            import.unrecognized.push(name.to_string());
            continue;
        };
        if seen.contains(&parameter) {
            continue;
        }
        seen.push(parameter);
        let reading = Reading::parse(record.get(value_col).unwrap_or(""));
        import.measurements.insert(parameter, reading);
    }

    import.matched = panel
        .iter()
        .filter(|p| seen.contains(p))
        .map(str::to_string)
        .collect();

    Ok(import)
}

fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') && !header_line.contains(',') {
        b';'
    } else {
        b','
    }
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        aliases.iter().any(|a| h == *a)
    })
}
