//! Flat CSV export of evaluation rows.
//!
//! Column order is fixed: `parameter,measured_value,limit,status`. Download
//! paths depend on it, so new columns go at the end.

use crate::compliance::{EvaluationRow, Reading};
use crate::error::CoreError;

/// Export header, in column order.
pub const EXPORT_COLUMNS: [&str; 4] = ["parameter", "measured_value", "limit", "status"];

/// Render rows as CSV with a header line.
///
/// Absent readings export as an empty cell, unparseable readings as their
/// original text.
pub fn build_csv(rows: &[EvaluationRow]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS).map_err(export_error)?;

    for row in rows {
        let measured = match &row.reading {
            Reading::Absent => String::new(),
            Reading::Value(v) if v.is_nan() => String::new(),
            Reading::Value(v) => v.to_string(),
            Reading::Unparseable(s) => s.clone(),
        };
        let limit = row.threshold.to_string();
        writer
            .write_record([
                row.parameter.as_str(),
                measured.as_str(),
                limit.as_str(),
                row.status.as_str(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV is not UTF-8: {e}")))
}

fn export_error(e: csv::Error) -> CoreError {
    CoreError::Internal(format!("CSV export failed: {e}"))
}
