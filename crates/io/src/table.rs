//! Flattened time-indexed result table.

use serde::{Deserialize, Serialize};

use crate::error::IoError;
use crate::result::nullable_series;
use crate::validate;

/// A table whose columns are locations and whose rows are timesteps.
///
/// Column headers encode `<prefix>:<location-base-id>:<chainage>`; the
/// header grammar is interpreted by `crest-extract`, not here. Construction
/// validates that every row has one value per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    #[serde(default, deserialize_with = "nullable_series")]
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawTable> for ResultTable {
    type Error = IoError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        ResultTable::new(raw.columns, raw.rows)
    }
}

impl ResultTable {
    /// Creates a new `ResultTable` after validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any row width differs from the
    /// number of columns or a column header is repeated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, IoError> {
        validate::validate_unique_columns(&columns).finish()?;
        validate::validate_row_widths(columns.len(), &rows).finish()?;
        Ok(Self { columns, rows })
    }

    /// Column headers in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of timesteps (rows).
    pub fn n_timesteps(&self) -> usize {
        self.rows.len()
    }

    /// The time series stored in column `index`, or `None` if out of range.
    pub fn column_series(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable::new(
            vec!["WaterLevel:A:0".into(), "Discharge:A:0".into()],
            vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![1.5, 15.0]],
        )
        .unwrap()
    }

    #[test]
    fn column_series_reads_down_rows() {
        let t = table();
        assert_eq!(t.n_timesteps(), 3);
        assert_eq!(t.column_series(0).unwrap(), vec![1.0, 2.0, 1.5]);
        assert_eq!(t.column_series(1).unwrap(), vec![10.0, 20.0, 15.0]);
        assert!(t.column_series(2).is_none());
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = ResultTable::new(vec!["a".into(), "b".into()], vec![vec![1.0]]).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }

    #[test]
    fn deserialize_validates_shape() {
        let ok: ResultTable =
            serde_json::from_str(r#"{"columns":["a"],"rows":[[1.0],[2.0]]}"#).unwrap();
        assert_eq!(ok.columns(), &["a".to_string()]);

        let bad = serde_json::from_str::<ResultTable>(r#"{"columns":["a"],"rows":[[1.0,2.0]]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn null_cells_decode_as_nan() {
        let t: ResultTable =
            serde_json::from_str(r#"{"columns":["a","b"],"rows":[[1.0,null],[2.0,3.0]]}"#)
                .unwrap();
        assert_eq!(t.column_series(0).unwrap(), vec![1.0, 2.0]);
        let b = t.column_series(1).unwrap();
        assert!(b[0].is_nan());
        assert_eq!(b[1], 3.0);
    }

    #[test]
    fn rows_default_to_empty() {
        let t: ResultTable = serde_json::from_str(r#"{"columns":["a","b"]}"#).unwrap();
        assert_eq!(t.n_timesteps(), 0);
        assert_eq!(t.column_series(1).unwrap(), Vec::<f64>::new());
    }
}
