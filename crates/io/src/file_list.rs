//! Input file lists with optional critical-duration labels.
//!
//! One entry per line. When a line holds more than one whitespace-separated
//! token, the last token is the critical-duration label for that file:
//!
//! ```text
//! /runs/100yr/model_1h.prf 1h
//! /runs/100yr/model_6h.prf 6h
//! /runs/100yr/model_24h.res11
//! ```
//!
//! A path containing spaces must therefore be followed by a label.

use std::path::{Path, PathBuf};

use crate::error::IoError;

/// One input file and the label attributed to it when it produces a peak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
    critical_duration: Option<String>,
}

impl InputFile {
    /// Creates an entry from a path and optional label.
    pub fn new(path: impl Into<PathBuf>, critical_duration: Option<String>) -> Self {
        Self {
            path: path.into(),
            critical_duration,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn critical_duration(&self) -> Option<&str> {
        self.critical_duration.as_deref()
    }

    /// Final path component, used as the file's column key in outputs.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Parse the text of a file list. Blank lines are skipped.
pub fn parse_file_list(text: &str) -> Vec<InputFile> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.rsplit_once(char::is_whitespace) {
            Some((path, label)) => InputFile::new(path.trim_end(), Some(label.to_string())),
            None => InputFile::new(line, None),
        })
        .collect()
}

/// Read and parse a file list from disk.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the list does not exist or
/// [`IoError::Read`] if it cannot be read.
pub fn read_file_list(path: &Path) -> Result<Vec<InputFile>, IoError> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    Ok(parse_file_list(&text))
}

/// Render paths as a file list (one per line, no labels, no trailing newline).
pub fn render_file_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_taken_from_last_token() {
        let files = parse_file_list("/a/m_1h.prf 1h\n/a/m_6h.prf   6h\n");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path(), Path::new("/a/m_1h.prf"));
        assert_eq!(files[0].critical_duration(), Some("1h"));
        assert_eq!(files[1].path(), Path::new("/a/m_6h.prf"));
        assert_eq!(files[1].critical_duration(), Some("6h"));
    }

    #[test]
    fn single_token_has_no_label() {
        let files = parse_file_list("/a/m.res11");
        assert_eq!(files[0].path(), Path::new("/a/m.res11"));
        assert_eq!(files[0].critical_duration(), None);
    }

    #[test]
    fn path_with_spaces_needs_label() {
        let files = parse_file_list("/my runs/m.prf 2h");
        assert_eq!(files[0].path(), Path::new("/my runs/m.prf"));
        assert_eq!(files[0].critical_duration(), Some("2h"));
    }

    #[test]
    fn blank_lines_and_crlf_skipped() {
        let files = parse_file_list("\r\n/a/x.prf 1h\r\n\r\n   \n/a/y.prf\r\n");
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].critical_duration(), None);
    }

    #[test]
    fn file_name_is_last_component() {
        let f = InputFile::new("/a/b/model_1h.prf", None);
        assert_eq!(f.file_name(), "model_1h.prf");
    }

    #[test]
    fn render_joins_without_trailing_newline() {
        let text = render_file_list(&[PathBuf::from("/a/x.prf"), PathBuf::from("/a/y.res11")]);
        assert_eq!(text, "/a/x.prf\n/a/y.res11");
        assert_eq!(parse_file_list(&text).len(), 2);
    }
}
