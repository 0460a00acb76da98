//! Per-file location records.

use crest_io::FileType;

use crate::extremum::Reduction;

/// Canonical values for one location in one file.
///
/// Every field after `location_id` is optional: a location stays in the
/// output even when some of its values could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    /// Source file name (final path component).
    pub file: String,
    pub file_type: FileType,
    pub projection: String,
    pub location_id: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub invert_level: Option<f64>,
    pub extreme_value: Option<f64>,
    /// Index of the timestep where the extreme last occurs.
    pub extreme_timestep: Option<usize>,
    /// Raw element series when extraction ran without aggregation.
    pub series: Option<Vec<Vec<f64>>>,
}

impl LocationRecord {
    /// A record with only its identity set.
    pub fn new(
        file: impl Into<String>,
        file_type: FileType,
        projection: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            file_type,
            projection: projection.into(),
            location_id: location_id.into(),
            x: None,
            y: None,
            invert_level: None,
            extreme_value: None,
            extreme_timestep: None,
            series: None,
        }
    }

    /// Fill the extreme fields from a reduction.
    pub fn with_reduction(mut self, reduction: Option<Reduction>) -> Self {
        match reduction {
            Some(Reduction::Extreme(e)) => {
                self.extreme_value = Some(e.value);
                self.extreme_timestep = Some(e.timestep);
            }
            Some(Reduction::Series(series)) => self.series = Some(series),
            None => {}
        }
        self
    }

    /// `true` when both horizontal coordinates are known.
    pub fn has_position(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}
