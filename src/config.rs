use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Crest configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrestConfig {
    /// Location and series extraction settings.
    #[serde(default)]
    pub extract: ExtractToml,

    /// Directory scan settings.
    #[serde(default)]
    pub discover: DiscoverToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl CrestConfig {
    /// Read a TOML config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractToml {
    #[serde(default = "default_water_level_quantities")]
    pub water_level_quantities: Vec<String>,
    #[serde(default = "default_table_marker")]
    pub table_marker: String,
    #[serde(default = "default_separator")]
    pub reach_separator: String,
    #[serde(default = "default_separator")]
    pub node_separator: String,
    /// `"max"`, `"min"` or `"none"`.
    #[serde(default = "default_aggregation")]
    pub aggregation: String,
}

impl Default for ExtractToml {
    fn default() -> Self {
        Self {
            water_level_quantities: default_water_level_quantities(),
            table_marker: default_table_marker(),
            reach_separator: default_separator(),
            node_separator: default_separator(),
            aggregation: default_aggregation(),
        }
    }
}

fn default_water_level_quantities() -> Vec<String> {
    vec!["WaterLevel".to_string(), "Water Level".to_string()]
}
fn default_table_marker() -> String {
    "WaterLevel".to_string()
}
fn default_separator() -> String {
    "-".to_string()
}
fn default_aggregation() -> String {
    "max".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverToml {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// File names containing this text are skipped. Empty disables it.
    #[serde(default = "default_exclude_text")]
    pub exclude_text: String,
    #[serde(default)]
    pub recursive: bool,
}

impl Default for DiscoverToml {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude_text: default_exclude_text(),
            recursive: false,
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["prf".to_string(), "res11".to_string()]
}
fn default_exclude_text() -> String {
    "HDADD".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Base name shared by every output file.
    #[serde(default = "default_name")]
    pub name: String,
    /// Decimal places; ignored when `round` is false.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    #[serde(default = "default_true")]
    pub round: bool,
    #[serde(default)]
    pub timings: bool,
    #[serde(default)]
    pub projection: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Licence statement recorded in the run log.
    #[serde(default = "default_license")]
    pub license: String,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            name: default_name(),
            decimals: default_decimals(),
            round: true,
            timings: false,
            projection: None,
            description: String::new(),
            license: default_license(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_name() -> String {
    "formatted_node_data".to_string()
}
fn default_decimals() -> u32 {
    crest_envelope::DEFAULT_DECIMALS
}
fn default_license() -> String {
    "TBC".to_string()
}
fn default_true() -> bool {
    true
}
