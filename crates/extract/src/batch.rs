//! Sequential extraction over a list of input files.
//!
//! A file that fails to load contributes nothing and the run continues. Only
//! a run where no file loads at all is an error; a file that loads but holds
//! no locations is a normal, empty contribution.

use std::path::Path;

use crest_io::{FileType, InputFile, IoError, LoadedResult, load_result};
use tracing::{info, info_span};

use crate::assemble::assemble_file;
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::observer::Observer;
use crate::omission::Omission;
use crate::record::LocationRecord;

/// Opens result files for extraction.
pub trait ResultLoader {
    fn load(&mut self, path: &Path) -> Result<(FileType, LoadedResult), IoError>;
}

impl<F> ResultLoader for F
where
    F: FnMut(&Path) -> Result<(FileType, LoadedResult), IoError>,
{
    fn load(&mut self, path: &Path) -> Result<(FileType, LoadedResult), IoError> {
        self(path)
    }
}

/// Loads exported result documents from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl ResultLoader for FsLoader {
    fn load(&mut self, path: &Path) -> Result<(FileType, LoadedResult), IoError> {
        load_result(path)
    }
}

/// A file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file: String,
    pub reason: String,
}

/// Combined output of extracting every input file.
#[derive(Debug, Clone, Default)]
pub struct BatchExtraction {
    /// Records of all loaded files, file by file in input order.
    pub records: Vec<LocationRecord>,
    /// Projection of the first loaded file.
    pub projection: Option<String>,
    pub omissions: Vec<Omission>,
    /// Names of the files that loaded, in input order.
    pub loaded: Vec<String>,
    pub failed: Vec<FailedFile>,
}

/// Load and assemble every file in order.
///
/// # Errors
///
/// Returns [`ExtractError::Validation`] for an invalid configuration and
/// [`ExtractError::NoFilesLoaded`] when no file could be loaded.
pub fn extract_all(
    files: &[InputFile],
    loader: &mut dyn ResultLoader,
    config: &ExtractConfig,
    observer: &mut dyn Observer,
) -> Result<BatchExtraction, ExtractError> {
    config.validate()?;
    let _span = info_span!("extract_all", n_files = files.len()).entered();

    let mut batch = BatchExtraction::default();
    for input in files {
        let name = input.file_name();
        observer.begin_file(&name);

        let (file_type, loaded) = match loader.load(input.path()) {
            Ok(loaded) => loaded,
            Err(e) => {
                observer.warn(&format!("skipping '{}': {e}", input.path().display()));
                batch.failed.push(FailedFile {
                    file: name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let extraction = assemble_file(&name, file_type, &loaded, config, observer);
        info!(
            file = %name,
            %file_type,
            n_records = extraction.len(),
            "extracted"
        );
        if batch.projection.is_none() {
            batch.projection = Some(extraction.projection);
        }
        batch.records.extend(extraction.records);
        batch.omissions.extend(extraction.omissions);
        batch.loaded.push(name);
    }

    if batch.loaded.is_empty() {
        return Err(ExtractError::NoFilesLoaded {
            attempted: files.len(),
        });
    }
    Ok(batch)
}
