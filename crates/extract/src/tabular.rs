//! Tabular source: one location per water-level table column.
//!
//! Columns carry no geometry. Coordinates and bed levels are borrowed from
//! the graph node whose identifier is rebuilt from the column header, by
//! exact lookup only.

use std::collections::BTreeMap;

use crest_io::{GraphResult, Node, ResultTable};
use tracing::trace;

use crate::config::ExtractConfig;
use crate::extremum::{Reduction, reduce_elements};
use crate::identity::{ColumnKey, parse_column_header};
use crate::observer::Observer;
use crate::omission::{Field, Omission, OmissionReason, Resolved};
use crate::source::{Axis, LocationSource, SourceKind};

pub struct TabularSource<'a> {
    nodes: BTreeMap<&'a str, &'a Node>,
    table: &'a ResultTable,
    config: &'a ExtractConfig,
}

impl<'a> TabularSource<'a> {
    pub fn new(graph: &'a GraphResult, table: &'a ResultTable, config: &'a ExtractConfig) -> Self {
        Self {
            nodes: graph.node_index(),
            table,
            config,
        }
    }

    /// Water-level columns with their index and parsed key. Unparseable
    /// headers are omitted under their raw header text.
    fn columns<T>(
        &self,
        field: Field,
        resolved: &mut Resolved<T>,
        observer: &mut dyn Observer,
    ) -> Vec<(usize, ColumnKey)> {
        let marker = self.config.table_marker();
        let mut keys = Vec::new();
        for (index, header) in self.table.columns().iter().enumerate() {
            if !header.contains(marker) {
                continue;
            }
            match parse_column_header(header) {
                Some(key) => keys.push((index, key)),
                None => resolved.omit(
                    Omission::new(header.as_str(), field, OmissionReason::MalformedHeader),
                    observer,
                ),
            }
        }
        keys
    }

    /// Location id, expected node id and matched node for each column.
    fn matched_columns<T>(
        &self,
        field: Field,
        resolved: &mut Resolved<T>,
        observer: &mut dyn Observer,
    ) -> Vec<(String, String, Option<&'a Node>)> {
        let separator = self.config.node_separator();
        self.columns(field, resolved, observer)
            .into_iter()
            .map(|(_, key)| {
                let node_id = key.expected_node_id(separator);
                let node = self.nodes.get(node_id.as_str()).copied();
                (key.location_id(), node_id, node)
            })
            .collect()
    }
}

impl LocationSource for TabularSource<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::Table
    }

    fn coordinates(&self, axis: Axis, observer: &mut dyn Observer) -> Resolved<Option<f64>> {
        let field = axis.field();
        let mut resolved = Resolved::new();
        for (id, node_id, node) in self.matched_columns(field, &mut resolved, observer) {
            let Some(node) = node else {
                // Kept with an unknown position so the column still yields a record.
                resolved.insert(id.clone(), None);
                resolved.omit(
                    Omission::new(id, field, OmissionReason::NoMatchingNode { node_id }),
                    observer,
                );
                continue;
            };
            let value = match axis {
                Axis::X => node.x,
                Axis::Y => node.y,
            };
            match value {
                Some(v) => resolved.insert(id, Some(v)),
                None => resolved.omit(
                    Omission::new(id, field, OmissionReason::MissingAttribute),
                    observer,
                ),
            }
        }
        resolved
    }

    fn invert_levels(&self, observer: &mut dyn Observer) -> Resolved<f64> {
        let field = Field::InvertLevel;
        let mut resolved = Resolved::new();
        for (id, node_id, node) in self.matched_columns(field, &mut resolved, observer) {
            let reason = match node {
                Some(node) => match node.bottom_level {
                    Some(v) => {
                        resolved.insert(id, v);
                        continue;
                    }
                    None => OmissionReason::MissingAttribute,
                },
                None => OmissionReason::NoMatchingNode { node_id },
            };
            resolved.omit(Omission::new(id, field, reason), observer);
        }
        resolved
    }

    fn extremes(&self, observer: &mut dyn Observer) -> Resolved<Reduction> {
        let field = Field::Extreme;
        let mut resolved = Resolved::new();
        let keys = self.columns(field, &mut resolved, observer);

        let mut grouped: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
        for (index, key) in keys {
            if let Some(series) = self.table.column_series(index) {
                grouped.entry(key.location_id()).or_default().push(series);
            }
        }
        trace!(locations = grouped.len(), "grouped table columns");

        for (id, columns) in grouped {
            let elements: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();
            match reduce_elements(&elements, self.config.aggregation()) {
                Some(r) => resolved.insert(id, r),
                None => resolved.omit(
                    Omission::new(id, field, OmissionReason::EmptySeries),
                    observer,
                ),
            }
        }
        resolved
    }
}
