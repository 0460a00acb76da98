//! Envelope rows.

use crest_io::FileType;

/// Which per-file value fills the file columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvelopeMode {
    /// Extreme water level per file, with the derived summary.
    #[default]
    Level,
    /// Timestep index of the extreme per file; no summary.
    Timing,
}

/// Derived envelope values for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSummary {
    /// Highest of the per-file values.
    pub max_of_max_level: Option<f64>,
    /// `max_of_max_level - invert_level` when both are known.
    pub max_of_max_depth: Option<f64>,
    /// Label of the earliest file whose value equals `max_of_max_level`.
    pub critical_duration: Option<String>,
}

/// One location across every input file.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeRecord {
    pub location_id: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub invert_level: Option<f64>,
    pub file_type: FileType,
    /// One value per file column, in file order.
    pub per_file: Vec<Option<f64>>,
    /// `None` in timing mode.
    pub summary: Option<EnvelopeSummary>,
}

/// Merged rows with the file columns they are laid out against.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    files: Vec<String>,
    mode: EnvelopeMode,
    rows: Vec<EnvelopeRecord>,
}

impl Envelope {
    pub(crate) fn new(files: Vec<String>, mode: EnvelopeMode, rows: Vec<EnvelopeRecord>) -> Self {
        Self { files, mode, rows }
    }

    /// File column names, in declared input order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn mode(&self) -> EnvelopeMode {
        self.mode
    }

    /// Rows sorted by location id.
    pub fn rows(&self) -> &[EnvelopeRecord] {
        &self.rows
    }

    /// Row for a location, if any file reported it.
    pub fn row(&self, location_id: &str) -> Option<&EnvelopeRecord> {
        self.rows
            .binary_search_by(|r| r.location_id.as_str().cmp(location_id))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Value of `file`'s column in `row`.
    pub fn value(&self, row: &EnvelopeRecord, file: &str) -> Option<f64> {
        let index = self.files.iter().position(|f| f == file)?;
        row.per_file.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
