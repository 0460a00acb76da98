//! Critical-duration labels per input file.

use std::collections::BTreeMap;

use crest_io::InputFile;

/// Maps a file name to the label attributed when that file holds the peak.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalDurations {
    labels: BTreeMap<String, Option<String>>,
}

impl CriticalDurations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of the given input files, keyed by file name. The first entry
    /// for a repeated file name is kept.
    pub fn from_inputs(inputs: &[InputFile]) -> Self {
        let mut durations = Self::new();
        for input in inputs {
            durations.insert(
                input.file_name(),
                input.critical_duration().map(str::to_string),
            );
        }
        durations
    }

    /// Add a label unless the file already has an entry.
    pub fn insert(&mut self, file: impl Into<String>, label: Option<String>) {
        self.labels.entry(file.into()).or_insert(label);
    }

    /// Label for `file`; `None` when unlabelled or unknown.
    pub fn get(&self, file: &str) -> Option<&str> {
        self.labels.get(file).and_then(|l| l.as_deref())
    }

    /// Labels in file-name order, for the run log.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.labels.iter().map(|(f, l)| (f.as_str(), l.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_inputs_first_wins() {
        let inputs = vec![
            InputFile::new("/a/run.prf", Some("1h".into())),
            InputFile::new("/b/run.prf", Some("2h".into())),
            InputFile::new("/a/other.prf", None),
        ];
        let durations = CriticalDurations::from_inputs(&inputs);
        assert_eq!(durations.get("run.prf"), Some("1h"));
        assert_eq!(durations.get("other.prf"), None);
        assert_eq!(durations.get("missing.prf"), None);
        assert_eq!(durations.iter().count(), 2);
    }
}
