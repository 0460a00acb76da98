//! Delimited envelope output.
//!
//! Column layout: identity fields, one column per file in input order, then
//! the three derived columns (level mode only).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::EnvelopeError;
use crate::record::{Envelope, EnvelopeMode, EnvelopeRecord};

/// Decimal places applied to floats unless rounding is disabled.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Upper bound on decimal places; larger requests are capped.
pub const MAX_DECIMALS: u32 = 15;

const IDENTITY_COLUMNS: [&str; 5] = ["location_id", "file_type", "x", "y", "invert_level"];
const SUMMARY_COLUMNS: [&str; 3] = ["max_of_max_level", "max_of_max_depth", "critical_duration"];

/// Header row for `files` in the given mode.
pub fn csv_header(files: &[String], mode: EnvelopeMode) -> Vec<String> {
    let mut header: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(files.iter().cloned());
    if mode == EnvelopeMode::Level {
        header.extend(SUMMARY_COLUMNS.iter().map(|c| c.to_string()));
    }
    header
}

/// Write the envelope as CSV. Floats are rounded to `decimals` places when
/// given; missing values are empty fields.
///
/// # Errors
///
/// Returns [`EnvelopeError::Csv`] if writing fails.
pub fn write_csv<W: Write>(
    writer: W,
    envelope: &Envelope,
    decimals: Option<u32>,
) -> Result<(), EnvelopeError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(csv_header(envelope.files(), envelope.mode()))?;
    for row in envelope.rows() {
        wtr.write_record(csv_row(row, envelope.mode(), decimals))?;
    }
    wtr.flush().map_err(|e| EnvelopeError::Csv {
        reason: e.to_string(),
    })
}

/// Write the envelope to a CSV file at `path`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Csv`] if the file cannot be created or written.
pub fn write_csv_file(
    path: &Path,
    envelope: &Envelope,
    decimals: Option<u32>,
) -> Result<(), EnvelopeError> {
    let file = File::create(path).map_err(|e| EnvelopeError::Csv {
        reason: format!("{}: {e}", path.display()),
    })?;
    write_csv(file, envelope, decimals)?;
    info!(path = %path.display(), n_rows = envelope.len(), "envelope written");
    Ok(())
}

fn csv_row(row: &EnvelopeRecord, mode: EnvelopeMode, decimals: Option<u32>) -> Vec<String> {
    let float = |v: Option<f64>| v.map(|v| format_float(v, decimals)).unwrap_or_default();
    let mut fields = vec![
        row.location_id.clone(),
        row.file_type.label().to_string(),
        float(row.x),
        float(row.y),
        float(row.invert_level),
    ];
    fields.extend(row.per_file.iter().map(|v| match mode {
        EnvelopeMode::Level => float(*v),
        EnvelopeMode::Timing => v.map(|t| format!("{t:.0}")).unwrap_or_default(),
    }));
    if let Some(summary) = &row.summary {
        fields.push(float(summary.max_of_max_level));
        fields.push(float(summary.max_of_max_depth));
        fields.push(summary.critical_duration.clone().unwrap_or_default());
    }
    fields
}

/// Round half away from zero to `decimals` places, then print the shortest
/// representation.
pub fn format_float(value: f64, decimals: Option<u32>) -> String {
    match decimals {
        Some(d) => {
            let scale = 10f64.powi(d.min(MAX_DECIMALS) as i32);
            let rounded = (value * scale).round() / scale;
            // Avoid "-0" for values that round to zero.
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            rounded.to_string()
        }
        None => value.to_string(),
    }
}
