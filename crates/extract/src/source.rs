//! The extraction contract shared by every source representation.
//!
//! ```text
//! FileType::Graph    ──▶ NodeSource
//! FileType::Tabular  ──▶ TabularSource   (file carries a table)
//!                    └─▶ ReachSource     (graph only)
//! ```
//!
//! The variant is chosen once per file from its declared type; nodes are
//! never read from tabular files and reaches never from graph files.

use std::str::FromStr;

use crest_io::{FileType, LoadedResult};

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extremum::Reduction;
use crate::node::NodeSource;
use crate::observer::Observer;
use crate::omission::{Field, Resolved};
use crate::reach::ReachSource;
use crate::tabular::TabularSource;

/// Horizontal coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Resolve a spatial field name, reporting anything other than `x`/`y`
    /// to the observer and yielding `None`.
    pub fn parse(name: &str, observer: &mut dyn Observer) -> Option<Self> {
        match name.parse() {
            Ok(axis) => Some(axis),
            Err(e) => {
                observer.error(&e.to_string());
                None
            }
        }
    }

    pub fn field(self) -> Field {
        match self {
            Self::X => Field::X,
            Self::Y => Field::Y,
        }
    }
}

impl FromStr for Axis {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            _ => Err(ExtractError::InvalidAxis {
                name: s.to_string(),
            }),
        }
    }
}

/// Which representation a source reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    GraphNodes,
    GraphReaches,
    Table,
}

/// A view over one file that resolves locations and their series.
pub trait LocationSource {
    fn kind(&self) -> SourceKind;

    /// Coordinate per location. A `None` value keeps the location in the
    /// file's master set even though its position is unknown.
    fn coordinates(&self, axis: Axis, observer: &mut dyn Observer) -> Resolved<Option<f64>>;

    /// Bed level per location.
    fn invert_levels(&self, observer: &mut dyn Observer) -> Resolved<f64>;

    /// Reduced water-level series per location.
    fn extremes(&self, observer: &mut dyn Observer) -> Resolved<Reduction>;

    /// Coordinates for a spatial field given by name (`"x"` or `"y"`). Any
    /// other name is reported to the observer and resolves no locations.
    fn named_coordinates(&self, name: &str, observer: &mut dyn Observer) -> Resolved<Option<f64>> {
        match Axis::parse(name, observer) {
            Some(axis) => self.coordinates(axis, observer),
            None => Resolved::new(),
        }
    }
}

/// Select the sources for a loaded file from its declared type.
pub fn sources_for<'a>(
    file_type: FileType,
    loaded: &'a LoadedResult,
    config: &'a ExtractConfig,
) -> Vec<Box<dyn LocationSource + 'a>> {
    let mut sources: Vec<Box<dyn LocationSource + 'a>> = Vec::new();
    if file_type.includes_nodes() {
        sources.push(Box::new(NodeSource::new(loaded.graph(), config)));
    }
    if file_type.includes_reaches() {
        match loaded.table() {
            Some(table) => sources.push(Box::new(TabularSource::new(
                loaded.graph(),
                table,
                config,
            ))),
            None => sources.push(Box::new(ReachSource::new(loaded.graph(), config))),
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CollectingObserver;
    use crest_io::{GraphResult, ResultTable};

    fn kinds(file_type: FileType, loaded: &LoadedResult) -> Vec<SourceKind> {
        let config = ExtractConfig::default();
        sources_for(file_type, loaded, &config)
            .iter()
            .map(|s| s.kind())
            .collect()
    }

    #[test]
    fn graph_files_read_nodes_only() {
        let loaded = LoadedResult::Graph(GraphResult::default());
        assert_eq!(kinds(FileType::Graph, &loaded), vec![SourceKind::GraphNodes]);
    }

    #[test]
    fn tabular_files_prefer_the_table() {
        let table = ResultTable::new(vec![], vec![]).unwrap();
        let loaded = LoadedResult::GraphWithTable(GraphResult::default(), table);
        assert_eq!(kinds(FileType::Tabular, &loaded), vec![SourceKind::Table]);
    }

    #[test]
    fn tabular_files_without_table_read_reaches() {
        let loaded = LoadedResult::Graph(GraphResult::default());
        assert_eq!(
            kinds(FileType::Tabular, &loaded),
            vec![SourceKind::GraphReaches]
        );
    }

    #[test]
    fn axis_parse_reports_bad_names() {
        let mut obs = CollectingObserver::default();
        assert_eq!(Axis::parse("x", &mut obs), Some(Axis::X));
        assert_eq!(Axis::parse("Y", &mut obs), Some(Axis::Y));
        assert_eq!(Axis::parse("z", &mut obs), None);
        assert_eq!(obs.errors().len(), 1);
        assert!(obs.errors()[0].contains("'z'"));
    }

    #[test]
    fn unknown_spatial_field_resolves_nothing() {
        let graph = GraphResult {
            nodes: vec![crest_io::Node {
                id: "MH1".into(),
                x: Some(3.0),
                y: Some(4.0),
                ..Default::default()
            }],
            ..GraphResult::default()
        };
        let config = ExtractConfig::default();
        let source = NodeSource::new(&graph, &config);
        let mut obs = CollectingObserver::default();

        assert_eq!(source.named_coordinates("y", &mut obs).get("MH1"), Some(&Some(4.0)));
        let none = source.named_coordinates("elevation", &mut obs);
        assert!(none.values().is_empty());
        assert!(none.omissions().is_empty());
        assert_eq!(obs.errors().len(), 1);
        assert!(obs.errors()[0].contains("'elevation'"));
    }

    #[test]
    fn axis_fields() {
        assert_eq!(Axis::X.field(), Field::X);
        assert_eq!(Axis::Y.field(), Field::Y);
    }
}
