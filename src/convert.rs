//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::*;

use crest_envelope::MAX_DECIMALS;
use crest_extract::{ExtractConfig, parse_aggregation};
use crest_io::DiscoverConfig;

/// Builds an [`ExtractConfig`] from the TOML extraction settings.
pub fn build_extract_config(t: &ExtractToml) -> Result<ExtractConfig> {
    let aggregation = parse_aggregation(&t.aggregation).context("invalid [extract].aggregation")?;
    let cfg = ExtractConfig::default()
        .with_water_level_quantities(t.water_level_quantities.iter().cloned())
        .with_table_marker(&t.table_marker)
        .with_reach_separator(&t.reach_separator)
        .with_node_separator(&t.node_separator)
        .with_aggregation(aggregation);
    cfg.validate().context("invalid [extract] configuration")?;
    Ok(cfg)
}

/// Builds a [`DiscoverConfig`]; `subdir` from the command line forces a
/// recursive scan.
pub fn build_discover_config(t: &DiscoverToml, subdir: bool) -> DiscoverConfig {
    let exclude = (!t.exclude_text.is_empty()).then(|| t.exclude_text.clone());
    DiscoverConfig::default()
        .with_extensions(t.extensions.iter().cloned())
        .with_exclude_text(exclude)
        .with_recursive(t.recursive || subdir)
}

/// Splits a `dir/name` output argument into its directory and base name.
///
/// A bare name keeps `default_dir`.
pub fn split_output_name(arg: &Path, default_dir: &Path) -> Result<(PathBuf, String)> {
    let Some(name) = arg.file_name() else {
        bail!("output name has no file name: {}", arg.display());
    };
    let dir = match arg.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => default_dir.to_path_buf(),
    };
    Ok((dir, name.to_string_lossy().into_owned()))
}

/// Normalises a projection argument: bare EPSG codes gain an `EPSG:` prefix.
pub fn normalize_projection(projection: &str) -> String {
    let p = projection.trim();
    if !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) {
        format!("EPSG:{p}")
    } else {
        p.to_string()
    }
}

/// Decimal places for output, or `None` when rounding is off.
pub fn output_decimals(t: &OutputToml, no_round: bool) -> Result<Option<u32>> {
    if t.decimals > MAX_DECIMALS {
        bail!(
            "invalid [output].decimals: {} (at most {MAX_DECIMALS})",
            t.decimals
        );
    }
    Ok((t.round && !no_round).then_some(t.decimals))
}
