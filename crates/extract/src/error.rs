//! Extraction error types.

/// Errors that can occur before or during extraction.
///
/// Per-location problems are never errors; they surface as
/// [`Omission`](crate::Omission)s instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// One or more configuration checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// A spatial field name other than `x` or `y` was requested.
    #[error("invalid coordinate axis '{name}': expected 'x' or 'y'")]
    InvalidAxis { name: String },

    /// No aggregation name matched.
    #[error("unknown aggregation '{name}': expected 'max', 'min' or 'none'")]
    UnknownAggregation { name: String },

    /// Not a single input file could be loaded.
    #[error("none of the {attempted} input file(s) could be loaded")]
    NoFilesLoaded { attempted: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ExtractError::Validation {
            count: 2,
            details: "empty marker; empty separator".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2 validation error(s)"));
        assert!(msg.contains("empty separator"));
    }

    #[test]
    fn test_invalid_axis_display() {
        let err = ExtractError::InvalidAxis {
            name: "z".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate axis 'z': expected 'x' or 'y'"
        );
    }

    #[test]
    fn test_unknown_aggregation_display() {
        let err = ExtractError::UnknownAggregation {
            name: "mean".to_string(),
        };
        assert!(err.to_string().contains("'mean'"));
    }

    #[test]
    fn test_no_files_loaded_display() {
        let err = ExtractError::NoFilesLoaded { attempted: 3 };
        assert_eq!(
            err.to_string(),
            "none of the 3 input file(s) could be loaded"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExtractError>();
    }
}
