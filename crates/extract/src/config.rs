//! Extraction configuration.

use std::str::FromStr;

use crate::error::ExtractError;
use crate::extremum::Aggregation;

/// Configuration for resolving locations and reducing their series.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Accepted spellings of the water-level quantity identifier.
    water_level_quantities: Vec<String>,
    /// Text a table column header must contain to be a water level.
    table_marker: String,
    /// Separator after the base part of a reach identifier.
    reach_separator: String,
    /// Separator between base id and chainage in node identifiers.
    node_separator: String,
    /// `None` passes series through without reducing them.
    aggregation: Option<Aggregation>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            water_level_quantities: vec!["WaterLevel".into(), "Water Level".into()],
            table_marker: "WaterLevel".into(),
            reach_separator: "-".into(),
            node_separator: "-".into(),
            aggregation: Some(Aggregation::Max),
        }
    }
}

impl ExtractConfig {
    /// Set the accepted water-level quantity spellings.
    pub fn with_water_level_quantities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.water_level_quantities = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the water-level marker for table column headers.
    pub fn with_table_marker(mut self, marker: impl Into<String>) -> Self {
        self.table_marker = marker.into();
        self
    }

    /// Set the reach identifier separator.
    pub fn with_reach_separator(mut self, separator: impl Into<String>) -> Self {
        self.reach_separator = separator.into();
        self
    }

    /// Set the node identifier separator.
    pub fn with_node_separator(mut self, separator: impl Into<String>) -> Self {
        self.node_separator = separator.into();
        self
    }

    /// Set the aggregation, or `None` for pass-through.
    pub fn with_aggregation(mut self, aggregation: Option<Aggregation>) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn water_level_quantities(&self) -> &[String] {
        &self.water_level_quantities
    }

    pub fn table_marker(&self) -> &str {
        &self.table_marker
    }

    pub fn reach_separator(&self) -> &str {
        &self.reach_separator
    }

    pub fn node_separator(&self) -> &str {
        &self.node_separator
    }

    pub fn aggregation(&self) -> Option<Aggregation> {
        self.aggregation
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Validation`] listing every empty setting.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let mut problems = Vec::new();
        if self.water_level_quantities.iter().all(|q| q.is_empty()) {
            problems.push("water_level_quantities must name at least one quantity");
        }
        if self.table_marker.is_empty() {
            problems.push("table_marker must not be empty");
        }
        if self.reach_separator.is_empty() {
            problems.push("reach_separator must not be empty");
        }
        if self.node_separator.is_empty() {
            problems.push("node_separator must not be empty");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ExtractError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

/// Parses `"max"`, `"min"` or `"none"` (pass-through).
pub fn parse_aggregation(name: &str) -> Result<Option<Aggregation>, ExtractError> {
    match name.to_lowercase().as_str() {
        "max" => Ok(Some(Aggregation::Max)),
        "min" => Ok(Some(Aggregation::Min)),
        "none" => Ok(None),
        _ => Err(ExtractError::UnknownAggregation {
            name: name.to_string(),
        }),
    }
}

impl FromStr for Aggregation {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_aggregation(s)?.ok_or_else(|| ExtractError::UnknownAggregation {
            name: s.to_string(),
        })
    }
}
