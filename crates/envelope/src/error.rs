//! Envelope error types.

/// Errors that can occur while merging or writing envelopes.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Writing delimited output failed.
    #[error("CSV error: {reason}")]
    Csv { reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// A coordinate transform could not be built or applied.
    #[error("projection error: {reason}")]
    Projection { reason: String },
}

impl From<csv::Error> for EnvelopeError {
    fn from(e: csv::Error) -> Self {
        Self::Csv {
            reason: e.to_string(),
        }
    }
}
