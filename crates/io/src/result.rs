//! Graph result model: node and reach collections with their data items.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// FileType
// ---------------------------------------------------------------------------

/// Result file format, decided by the file extension.
///
/// The format fixes which collections a file contributes: graph files
/// (`prf`) contribute nodes only, tabular files (`res11`) contribute reach
/// locations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// Graph-only result file (`.prf`).
    Graph,
    /// Result file with a flattened time table (`.res11`).
    Tabular,
}

impl FileType {
    /// Maps a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "prf" => Some(Self::Graph),
            "res11" => Some(Self::Tabular),
            _ => None,
        }
    }

    /// Label written to output files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Graph => "prf",
            Self::Tabular => "res11",
        }
    }

    /// Whether node collections are read for this format.
    pub fn includes_nodes(self) -> bool {
        matches!(self, Self::Graph)
    }

    /// Whether reach collections are read for this format.
    pub fn includes_reaches(self) -> bool {
        matches!(self, Self::Tabular)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Graph model
// ---------------------------------------------------------------------------

/// In-memory result object graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResult {
    /// Projection string of the model coordinates.
    #[serde(default)]
    pub projection: String,
    /// Node collection.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Reach collection.
    #[serde(default)]
    pub reaches: Vec<Reach>,
}

impl GraphResult {
    /// Nodes keyed by their exact native identifier. A repeated id keeps
    /// the first node.
    pub fn node_index(&self) -> BTreeMap<&str, &Node> {
        let mut index = BTreeMap::new();
        for node in &self.nodes {
            index.entry(node.id.as_str()).or_insert(node);
        }
        index
    }

    /// `true` when the graph has neither nodes nor reaches.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.reaches.is_empty()
    }
}

/// A node (manhole, junction, boundary) with direct attributes.
///
/// Attributes are optional: a `None` models a value the exporter could not
/// read for this node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    /// Bed (invert) level.
    #[serde(default)]
    pub bottom_level: Option<f64>,
    #[serde(default)]
    pub data_items: Vec<DataItem>,
}

/// A reach addressed by chainage along its length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reach {
    pub id: String,
    #[serde(default)]
    pub grid_points: Vec<GridPoint>,
    #[serde(default)]
    pub data_items: Vec<DataItem>,
}

impl Reach {
    /// Grid points that carry a water level, in reach order.
    pub fn water_level_points(&self) -> impl Iterator<Item = &GridPoint> {
        self.grid_points
            .iter()
            .filter(|gp| gp.point_type.is_water_level())
    }
}

/// A computational point along a reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub chainage: f64,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    /// Bed level at the point.
    #[serde(default)]
    pub z: Option<f64>,
    pub point_type: GridPointType,
}

/// Grid point classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPointType {
    WaterLevel,
    InterpolatedWaterLevel,
    Discharge,
    Structure,
    #[serde(other)]
    Other,
}

impl GridPointType {
    /// `true` for the two point types that carry water levels.
    pub fn is_water_level(self) -> bool {
        matches!(self, Self::WaterLevel | Self::InterpolatedWaterLevel)
    }
}

/// A result quantity attached to a node or reach.
///
/// `series` holds one time series per spatial element: a node item has a
/// single element, a reach item has one element per water-level point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub quantity: String,
    #[serde(default, deserialize_with = "nullable_series")]
    pub series: Vec<Vec<f64>>,
}

/// Decodes sample arrays where a `null` sample stands for a missing value.
///
/// Missing samples become NaN, which every reduction skips.
pub(crate) fn nullable_series<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|samples| samples.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_extension("prf"), Some(FileType::Graph));
        assert_eq!(FileType::from_extension("PRF"), Some(FileType::Graph));
        assert_eq!(FileType::from_extension("res11"), Some(FileType::Tabular));
        assert_eq!(FileType::from_extension("Res11"), Some(FileType::Tabular));
        assert_eq!(FileType::from_extension("res1d"), None);
        assert_eq!(FileType::from_extension(""), None);
    }

    #[test]
    fn file_type_dispatch_is_exclusive() {
        assert!(FileType::Graph.includes_nodes());
        assert!(!FileType::Graph.includes_reaches());
        assert!(FileType::Tabular.includes_reaches());
        assert!(!FileType::Tabular.includes_nodes());
    }

    #[test]
    fn file_type_labels() {
        assert_eq!(FileType::Graph.to_string(), "prf");
        assert_eq!(FileType::Tabular.to_string(), "res11");
    }

    #[test]
    fn water_level_points_filter() {
        let reach = Reach {
            id: "R1".into(),
            grid_points: vec![
                GridPoint {
                    chainage: 0.0,
                    x: None,
                    y: None,
                    z: None,
                    point_type: GridPointType::WaterLevel,
                },
                GridPoint {
                    chainage: 50.0,
                    x: None,
                    y: None,
                    z: None,
                    point_type: GridPointType::Discharge,
                },
                GridPoint {
                    chainage: 100.0,
                    x: None,
                    y: None,
                    z: None,
                    point_type: GridPointType::InterpolatedWaterLevel,
                },
            ],
            data_items: vec![],
        };
        let chainages: Vec<f64> = reach.water_level_points().map(|g| g.chainage).collect();
        assert_eq!(chainages, vec![0.0, 100.0]);
    }

    #[test]
    fn null_samples_decode_as_nan() {
        let item: DataItem =
            serde_json::from_str(r#"{"quantity":"WaterLevel","series":[[1.0,null,2.0]]}"#)
                .unwrap();
        assert_eq!(item.series[0][0], 1.0);
        assert!(item.series[0][1].is_nan());
        assert_eq!(item.series[0][2], 2.0);
    }

    #[test]
    fn unknown_point_type_decodes_as_other() {
        let gp: GridPoint =
            serde_json::from_str(r#"{"chainage":1.0,"point_type":"culvert"}"#).unwrap();
        assert_eq!(gp.point_type, GridPointType::Other);
        assert!(gp.x.is_none());
    }

    #[test]
    fn node_index_is_exact_and_first_wins() {
        let graph = GraphResult {
            projection: String::new(),
            nodes: vec![
                Node {
                    id: "MH-12.5".into(),
                    x: Some(1.0),
                    ..Node::default()
                },
                Node {
                    id: "MH-12.5".into(),
                    x: Some(2.0),
                    ..Node::default()
                },
            ],
            reaches: vec![],
        };
        let index = graph.node_index();
        assert_eq!(index.len(), 1);
        assert_eq!(index["MH-12.5"].x, Some(1.0));
        assert!(!index.contains_key("MH-12.50"));
        assert!(!graph.is_empty());
        assert!(GraphResult::default().is_empty());
    }
}
