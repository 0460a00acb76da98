//! Graph node source: one location per node, keyed by its native id.

use crest_io::{GraphResult, Node};

use crate::config::ExtractConfig;
use crate::extremum::{Reduction, first_water_level_item, reduce};
use crate::observer::Observer;
use crate::omission::{Field, Omission, OmissionReason, Resolved};
use crate::source::{Axis, LocationSource, SourceKind};

pub struct NodeSource<'a> {
    graph: &'a GraphResult,
    config: &'a ExtractConfig,
}

impl<'a> NodeSource<'a> {
    pub fn new(graph: &'a GraphResult, config: &'a ExtractConfig) -> Self {
        Self { graph, config }
    }

    fn attribute(
        &self,
        field: Field,
        read: impl Fn(&Node) -> Option<f64>,
        observer: &mut dyn Observer,
    ) -> Resolved<f64> {
        let mut resolved = Resolved::new();
        for node in &self.graph.nodes {
            match read(node) {
                Some(v) => resolved.insert(node.id.clone(), v),
                None => resolved.omit(
                    Omission::new(&node.id, field, OmissionReason::MissingAttribute),
                    observer,
                ),
            }
        }
        resolved
    }
}

impl LocationSource for NodeSource<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::GraphNodes
    }

    fn coordinates(&self, axis: Axis, observer: &mut dyn Observer) -> Resolved<Option<f64>> {
        let read = move |n: &Node| match axis {
            Axis::X => n.x,
            Axis::Y => n.y,
        };
        self.attribute(axis.field(), read, observer).map(Some)
    }

    fn invert_levels(&self, observer: &mut dyn Observer) -> Resolved<f64> {
        self.attribute(Field::InvertLevel, |n| n.bottom_level, observer)
    }

    fn extremes(&self, observer: &mut dyn Observer) -> Resolved<Reduction> {
        let mut resolved = Resolved::new();
        let quantities = self.config.water_level_quantities();
        for node in &self.graph.nodes {
            let Some(item) = first_water_level_item(&node.data_items, quantities) else {
                resolved.omit(
                    Omission::new(&node.id, Field::Extreme, OmissionReason::NoWaterLevelSeries),
                    observer,
                );
                continue;
            };
            let series = item.series.first().map(Vec::as_slice).unwrap_or_default();
            match reduce(series, self.config.aggregation()) {
                Some(r) => resolved.insert(node.id.clone(), r),
                None => resolved.omit(
                    Omission::new(&node.id, Field::Extreme, OmissionReason::EmptySeries),
                    observer,
                ),
            }
        }
        resolved
    }
}
