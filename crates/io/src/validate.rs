//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus the structural checks applied
//! to result tables.

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that every row carries exactly one value per column.
///
/// Records one message per offending row.
pub(crate) fn validate_row_widths(n_columns: usize, rows: &[Vec<f64>]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_columns {
            c.push(format!(
                "row {i} has {} values (expected {n_columns})",
                row.len()
            ));
        }
    }

    c
}

/// Check that no column header appears twice.
pub(crate) fn validate_unique_columns(columns: &[String]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut seen = std::collections::BTreeSet::new();

    for name in columns {
        if !seen.insert(name.as_str()) {
            c.push(format!("duplicate column '{name}'"));
        }
    }

    c
}
