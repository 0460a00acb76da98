//! JSON record of one run, written next to its outputs.
//!
//! The log is written once before extraction starts, so a failed run still
//! leaves its inputs on record, and rewritten with the outputs at the end.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crest_io::InputFile;

#[derive(Debug, Serialize)]
pub struct RunLog {
    pub description: String,
    pub license: String,
    pub user: String,
    pub machine_id: String,
    pub utc_timestamp: String,
    pub command: Vec<String>,
    pub input_files: Vec<PathBuf>,
    /// One entry per input file, in input order.
    pub critical_durations: Vec<Option<String>>,
    /// Projection declared by the first loaded result file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_projection: Option<String>,
    pub output_files: Vec<PathBuf>,
}

impl RunLog {
    /// Start a log for the current process.
    pub fn new(
        description: impl Into<String>,
        license: impl Into<String>,
        inputs: &[InputFile],
    ) -> Self {
        Self {
            description: description.into(),
            license: license.into(),
            user: env_or_unknown(&["USER", "USERNAME"]),
            machine_id: env_or_unknown(&["HOSTNAME", "COMPUTERNAME"]),
            utc_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            command: std::env::args().collect(),
            input_files: inputs.iter().map(|i| i.path().to_path_buf()).collect(),
            critical_durations: inputs
                .iter()
                .map(|i| i.critical_duration().map(str::to_string))
                .collect(),
            model_projection: None,
            output_files: Vec::new(),
        }
    }

    pub fn push_output(&mut self, path: impl Into<PathBuf>) {
        self.output_files.push(path.into());
    }

    /// Write the log as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize run log")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write run log: {}", path.display()))?;
        info!(path = %path.display(), "run log written");
        Ok(())
    }
}

fn env_or_unknown(vars: &[&str]) -> String {
    vars.iter()
        .find_map(|v| std::env::var(v).ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
