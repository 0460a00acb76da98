//! Input discovery by directory scan.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;

/// Prefix of editor lock/backup files that are never inputs.
const BACKUP_PREFIX: &str = "~$";

/// Configuration for scanning a directory for result files.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    /// Accepted extensions, lower case, without the dot.
    extensions: Vec<String>,
    /// Files whose name contains this text are skipped.
    exclude_text: Option<String>,
    /// Whether to descend into subdirectories.
    recursive: bool,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["prf".into(), "res11".into()],
            exclude_text: Some("HDADD".into()),
            recursive: false,
        }
    }
}

impl DiscoverConfig {
    /// Replace the accepted extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Set the name fragment that excludes a file, or `None` to keep all.
    pub fn with_exclude_text(mut self, text: Option<impl Into<String>>) -> Self {
        self.exclude_text = text.map(Into::into);
        self
    }

    /// Enable or disable descending into subdirectories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    fn accepts(&self, name: &str) -> bool {
        if name.starts_with(BACKUP_PREFIX) {
            return false;
        }
        if let Some(text) = &self.exclude_text
            && name.contains(text.as_str())
        {
            return false;
        }
        let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        ext.is_some_and(|e| self.extensions.iter().any(|a| *a == e))
    }
}

/// Collect result files under `root`, sorted by path.
///
/// A `root` that is itself a file is returned as the only entry, without
/// any filtering.
///
/// # Errors
///
/// Returns [`IoError::DirectoryNotFound`] if `root` does not exist, or
/// [`IoError::Read`] if a directory cannot be listed.
pub fn discover(root: &Path, config: &DiscoverConfig) -> Result<Vec<PathBuf>, IoError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Err(IoError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    walk(root, config, &mut found)?;
    found.sort();
    debug!(root = %root.display(), n_files = found.len(), "discovered result files");
    Ok(found)
}

fn walk(dir: &Path, config: &DiscoverConfig, found: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IoError::read(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| IoError::read(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if config.recursive {
                walk(&path, config, found)?;
            }
            continue;
        }
        let name = entry.file_name();
        if config.accepts(&name.to_string_lossy()) {
            found.push(path);
        }
    }
    Ok(())
}
