//! Per-file assembly of location records.

use std::collections::BTreeSet;

use crest_io::{FileType, LoadedResult};
use tracing::debug;

use crate::config::ExtractConfig;
use crate::observer::Observer;
use crate::omission::{Omission, Resolved};
use crate::record::LocationRecord;
use crate::source::sources_for;

/// Records extracted from one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileExtraction {
    /// One record per location, sorted by location id.
    pub records: Vec<LocationRecord>,
    pub projection: String,
    /// Every field that could not be resolved, in extraction order.
    pub omissions: Vec<Omission>,
}

impl FileExtraction {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Assemble the location records of one loaded file.
///
/// x and y are gathered independently; the file's locations are the union
/// of both coordinate maps. Locations without an invert level or extreme
/// keep those fields empty.
pub fn assemble_file(
    file_name: &str,
    file_type: FileType,
    loaded: &LoadedResult,
    config: &ExtractConfig,
    observer: &mut dyn Observer,
) -> FileExtraction {
    let mut xs = Resolved::new();
    let mut ys = Resolved::new();
    let mut inverts = Resolved::new();
    let mut extremes = Resolved::new();

    for source in sources_for(file_type, loaded, config) {
        debug!(file = file_name, kind = ?source.kind(), "reading source");
        xs.absorb(source.named_coordinates("x", observer));
        ys.absorb(source.named_coordinates("y", observer));
        inverts.absorb(source.invert_levels(observer));
        extremes.absorb(source.extremes(observer));
    }

    let projection = loaded.graph().projection.clone();
    let (xs, x_omitted) = xs.into_parts();
    let (ys, y_omitted) = ys.into_parts();
    let (inverts, invert_omitted) = inverts.into_parts();
    let (mut extremes, extreme_omitted) = extremes.into_parts();

    let ids: BTreeSet<&String> = xs.keys().chain(ys.keys()).collect();
    let records: Vec<LocationRecord> = ids
        .into_iter()
        .map(|id| {
            let mut record =
                LocationRecord::new(file_name, file_type, projection.as_str(), id.as_str())
                    .with_reduction(extremes.remove(id));
            record.x = xs.get(id).copied().flatten();
            record.y = ys.get(id).copied().flatten();
            record.invert_level = inverts.get(id).copied();
            record
        })
        .collect();

    let omissions: Vec<Omission> = x_omitted
        .into_iter()
        .chain(y_omitted)
        .chain(invert_omitted)
        .chain(extreme_omitted)
        .collect();

    debug!(
        file = file_name,
        n_records = records.len(),
        n_omissions = omissions.len(),
        "file assembled"
    );

    FileExtraction {
        records,
        projection,
        omissions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CollectingObserver;
    use crest_io::{DataItem, GraphResult, GridPoint, GridPointType, Node, Reach};

    fn node(id: &str, x: Option<f64>, y: Option<f64>) -> Node {
        Node {
            id: id.into(),
            x,
            y,
            bottom_level: Some(1.0),
            data_items: vec![DataItem {
                quantity: "WaterLevel".into(),
                series: vec![vec![1.0, 2.0]],
            }],
        }
    }

    fn graph() -> GraphResult {
        GraphResult {
            projection: "EPSG:28355".into(),
            nodes: vec![
                node("B", Some(1.0), Some(1.0)),
                node("A", Some(2.0), None),
                node("C", None, None),
            ],
            reaches: vec![Reach {
                id: "R-1".into(),
                grid_points: vec![GridPoint {
                    chainage: 0.0,
                    x: Some(0.0),
                    y: Some(0.0),
                    z: Some(0.0),
                    point_type: GridPointType::WaterLevel,
                }],
                data_items: vec![],
            }],
        }
    }

    #[test]
    fn union_of_coordinate_keys_sorted() {
        let loaded = LoadedResult::Graph(graph());
        let mut obs = CollectingObserver::default();
        let out = assemble_file(
            "run.prf",
            FileType::Graph,
            &loaded,
            &ExtractConfig::default(),
            &mut obs,
        );

        let ids: Vec<&str> = out.records.iter().map(|r| r.location_id.as_str()).collect();
        // C has neither coordinate so it is not a location of this file.
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(out.projection, "EPSG:28355");
        assert_eq!(out.records[0].x, Some(2.0));
        assert_eq!(out.records[0].y, None);
        assert_eq!(out.records[0].extreme_value, Some(2.0));
        assert_eq!(out.records[0].extreme_timestep, Some(1));
        assert_eq!(out.records[0].file, "run.prf");
    }

    #[test]
    fn graph_file_ignores_reaches() {
        let loaded = LoadedResult::Graph(graph());
        let mut obs = CollectingObserver::default();
        let out = assemble_file(
            "run.prf",
            FileType::Graph,
            &loaded,
            &ExtractConfig::default(),
            &mut obs,
        );
        assert!(out.records.iter().all(|r| r.location_id != "R 0.0"));
    }

    #[test]
    fn tabular_file_without_table_reads_reaches_only() {
        let loaded = LoadedResult::Graph(graph());
        let mut obs = CollectingObserver::default();
        let out = assemble_file(
            "run.res11",
            FileType::Tabular,
            &loaded,
            &ExtractConfig::default(),
            &mut obs,
        );
        assert_eq!(out.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.location_id, "R 0.0");
        assert_eq!(r.file_type, FileType::Tabular);
        assert_eq!(r.invert_level, Some(0.0));
        assert_eq!(r.extreme_value, None);
    }

    #[test]
    fn empty_file_yields_no_records() {
        let loaded = LoadedResult::Graph(GraphResult::default());
        let mut obs = CollectingObserver::default();
        let out = assemble_file(
            "empty.prf",
            FileType::Graph,
            &loaded,
            &ExtractConfig::default(),
            &mut obs,
        );
        assert!(out.is_empty());
        assert!(out.omissions.is_empty());
        assert!(obs.warnings().is_empty());
    }
}
