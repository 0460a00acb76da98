//! Diagnostics sink injected into the extraction engine.

use tracing::{debug, error, warn};

use crate::omission::Omission;

/// Receives warnings and errors raised while extracting a file.
///
/// The engine never logs on its own; it reports through this trait so
/// callers decide where diagnostics go.
pub trait Observer {
    fn warn(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Called before a file is processed.
    fn begin_file(&mut self, _file: &str) {}

    /// Called once for every omitted field.
    fn omitted(&mut self, omission: &Omission) {
        self.warn(&omission.to_string());
    }
}

/// Forwards diagnostics to `tracing`, tagged with the file being processed.
///
/// Omissions that follow from the data layout are logged at debug level.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    file: String,
}

impl TracingObserver {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

impl Observer for TracingObserver {
    fn warn(&mut self, message: &str) {
        warn!(file = %self.file, "{message}");
    }

    fn error(&mut self, message: &str) {
        error!(file = %self.file, "{message}");
    }

    fn begin_file(&mut self, file: &str) {
        self.file = file.to_string();
    }

    fn omitted(&mut self, omission: &Omission) {
        if omission.reason.is_expected() {
            debug!(file = %self.file, "{omission}");
        } else {
            self.warn(&omission.to_string());
        }
    }
}

/// Keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    files: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl CollectingObserver {
    /// Files announced through [`Observer::begin_file`], in order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Observer for CollectingObserver {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn begin_file(&mut self, file: &str) {
        self.files.push(file.to_string());
    }
}
