//! Graph reach source: one location per water-level grid point.
//!
//! Locations are keyed `"<base> <chainage>"` where `<base>` is the reach id
//! truncated at the first separator, so branches of the same physical
//! channel share an identity.

use std::collections::BTreeMap;

use crest_io::{GraphResult, GridPoint, Reach};

use crate::config::ExtractConfig;
use crate::extremum::{Reduction, first_water_level_item, reduce_elements};
use crate::identity::{reach_base_id, reach_location_id};
use crate::observer::Observer;
use crate::omission::{Field, Omission, OmissionReason, Resolved};
use crate::source::{Axis, LocationSource, SourceKind};

pub struct ReachSource<'a> {
    graph: &'a GraphResult,
    config: &'a ExtractConfig,
}

impl<'a> ReachSource<'a> {
    pub fn new(graph: &'a GraphResult, config: &'a ExtractConfig) -> Self {
        Self { graph, config }
    }

    fn location_id(&self, reach: &Reach, gp: &GridPoint) -> String {
        let base = reach_base_id(&reach.id, self.config.reach_separator());
        reach_location_id(base, gp.chainage)
    }

    fn attribute(
        &self,
        field: Field,
        read: impl Fn(&GridPoint) -> Option<f64>,
        observer: &mut dyn Observer,
    ) -> Resolved<f64> {
        let mut resolved = Resolved::new();
        for reach in &self.graph.reaches {
            for gp in reach.water_level_points() {
                let id = self.location_id(reach, gp);
                match read(gp) {
                    Some(v) => resolved.insert(id, v),
                    None => resolved.omit(
                        Omission::new(id, field, OmissionReason::MissingAttribute),
                        observer,
                    ),
                }
            }
        }
        resolved
    }
}

impl LocationSource for ReachSource<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::GraphReaches
    }

    fn coordinates(&self, axis: Axis, observer: &mut dyn Observer) -> Resolved<Option<f64>> {
        let read = move |gp: &GridPoint| match axis {
            Axis::X => gp.x,
            Axis::Y => gp.y,
        };
        self.attribute(axis.field(), read, observer).map(Some)
    }

    fn invert_levels(&self, observer: &mut dyn Observer) -> Resolved<f64> {
        self.attribute(Field::InvertLevel, |gp| gp.z, observer)
    }

    fn extremes(&self, observer: &mut dyn Observer) -> Resolved<Reduction> {
        let mut resolved = Resolved::new();
        let quantities = self.config.water_level_quantities();

        // Element series per location, each group in reach order.
        let mut grouped: BTreeMap<String, Vec<&[f64]>> = BTreeMap::new();
        for reach in &self.graph.reaches {
            let item = first_water_level_item(&reach.data_items, quantities);
            for (index, gp) in reach.water_level_points().enumerate() {
                let id = self.location_id(reach, gp);
                let Some(item) = item else {
                    resolved.omit(
                        Omission::new(id, Field::Extreme, OmissionReason::NoWaterLevelSeries),
                        observer,
                    );
                    continue;
                };
                match item.series.get(index) {
                    Some(series) => grouped.entry(id).or_default().push(series),
                    None => resolved.omit(
                        Omission::new(
                            id,
                            Field::Extreme,
                            OmissionReason::MissingElement { index },
                        ),
                        observer,
                    ),
                }
            }
        }

        for (id, elements) in grouped {
            match reduce_elements(&elements, self.config.aggregation()) {
                Some(r) => resolved.insert(id, r),
                None => resolved.omit(
                    Omission::new(id, Field::Extreme, OmissionReason::EmptySeries),
                    observer,
                ),
            }
        }
        resolved
    }
}
