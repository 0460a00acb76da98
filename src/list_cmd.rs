//! List command: write the result files found in a directory to a file list.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use crest_io::{discover, render_file_list};

use crate::cli::ListArgs;
use crate::config::CrestConfig;
use crate::convert;

/// Scan the input directory and write one path per line.
pub fn run(args: ListArgs) -> Result<()> {
    let _cmd = info_span!("list").entered();
    let config = CrestConfig::load(args.config.as_deref())?;
    let discover_cfg = convert::build_discover_config(&config.discover, args.subdir);

    let paths = discover(&args.input_directory, &discover_cfg).with_context(|| {
        format!(
            "failed to scan input directory: {}",
            args.input_directory.display()
        )
    })?;
    if paths.is_empty() {
        bail!(
            "no result files found in {}",
            args.input_directory.display()
        );
    }

    std::fs::write(&args.output, render_file_list(&paths))
        .with_context(|| format!("failed to write file list: {}", args.output.display()))?;
    info!(path = %args.output.display(), n_files = paths.len(), "file list written");
    Ok(())
}
