//! Location identity resolution and extremum extraction.
//!
//! Hydraulic result files expose the same physical locations in different
//! shapes: graph nodes keyed by native id, reach grid points addressed by
//! chainage, and flattened table columns whose headers encode
//! `<prefix>:<base>:<chainage>`. This crate reduces each file to one
//! [`LocationRecord`] per canonical location, ready for cross-file merging.
//!
//! # Quick start
//!
//! ```
//! use crest_extract::{CollectingObserver, ExtractConfig, assemble_file};
//! use crest_io::{DataItem, FileType, GraphResult, LoadedResult, Node};
//!
//! let graph = GraphResult {
//!     projection: "LOCAL".into(),
//!     nodes: vec![Node {
//!         id: "MH1".into(),
//!         x: Some(10.0),
//!         y: Some(20.0),
//!         bottom_level: Some(1.0),
//!         data_items: vec![DataItem {
//!             quantity: "WaterLevel".into(),
//!             series: vec![vec![1.0, 3.0, 3.0, 2.0]],
//!         }],
//!     }],
//!     reaches: vec![],
//! };
//! let loaded = LoadedResult::Graph(graph);
//! let mut observer = CollectingObserver::default();
//!
//! let out = assemble_file("run_1h.prf", FileType::Graph, &loaded, &ExtractConfig::default(), &mut observer);
//! assert_eq!(out.records[0].extreme_value, Some(3.0));
//! assert_eq!(out.records[0].extreme_timestep, Some(2));
//! ```
//!
//! # Architecture
//!
//! ```text
//! extract_all()                      (batch.rs)
//!   └─ assemble_file()               (assemble.rs)
//!        ├─ sources_for()            (source.rs)
//!        │    ├─ NodeSource          (node.rs)
//!        │    ├─ ReachSource         (reach.rs)
//!        │    └─ TabularSource       (tabular.rs)
//!        ├─ location identities      (identity.rs)
//!        └─ reduce()                 (extremum.rs)
//! ```
//!
//! Per-location failures never abort a file. They are returned as typed
//! [`Omission`]s and reported through the injected [`Observer`].

pub mod assemble;
pub mod batch;
pub mod config;
pub mod error;
pub mod extremum;
pub mod identity;
pub mod observer;
pub mod omission;
pub mod record;
pub mod source;

pub(crate) mod node;
pub(crate) mod reach;
pub(crate) mod tabular;

pub use assemble::{FileExtraction, assemble_file};
pub use batch::{BatchExtraction, FailedFile, FsLoader, ResultLoader, extract_all};
pub use config::{ExtractConfig, parse_aggregation};
pub use error::ExtractError;
pub use extremum::{Aggregation, Extreme, Reduction, reduce, reduce_elements};
pub use identity::{ColumnKey, format_chainage, parse_column_header, round_chainage};
pub use observer::{CollectingObserver, Observer, TracingObserver};
pub use omission::{Field, Omission, OmissionReason, Resolved};
pub use record::LocationRecord;
pub use source::{Axis, LocationSource, SourceKind, sources_for};
