//! Error types for crest-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the crest-io crate.
///
/// Covers missing inputs, unsupported result formats, undecodable result
/// documents and structural problems found while validating a table.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a directory to scan does not exist.
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file extension does not map to a known result format.
    #[error("unsupported result format '{extension}': {}", path.display())]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: PathBuf,
        /// Extension found on the path (empty if none).
        extension: String,
    },

    /// Wraps an operating system error raised while reading a file.
    #[error("failed to read {}: {reason}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a result document cannot be decoded.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode {
        /// Path of the document.
        path: PathBuf,
        /// Description of the decoding failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl IoError {
    pub(crate) fn read(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        IoError::Read {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}
