//! Result document loading.
//!
//! The native binary result formats are decoded by an external exporter
//! into JSON documents that mirror the result object graph:
//!
//! ```text
//! { "projection": "...",
//!   "nodes":   [ { "id", "x", "y", "bottom_level", "data_items": [..] } ],
//!   "reaches": [ { "id", "grid_points": [..], "data_items": [..] } ],
//!   "table":   { "columns": [..], "rows": [[..], ..] } }      // optional
//! ```
//!
//! The file extension of the exported document is kept from the original
//! result file and decides the [`FileType`].

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::result::{FileType, GraphResult};
use crate::table::ResultTable;

/// A loaded result file: the graph alone, or the graph with its table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedResult {
    Graph(GraphResult),
    GraphWithTable(GraphResult, ResultTable),
}

impl LoadedResult {
    /// The graph part of the result.
    pub fn graph(&self) -> &GraphResult {
        match self {
            Self::Graph(g) | Self::GraphWithTable(g, _) => g,
        }
    }

    /// The table, when the file carries one.
    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            Self::Graph(_) => None,
            Self::GraphWithTable(_, t) => Some(t),
        }
    }
}

#[derive(Deserialize)]
struct ResultDocument {
    #[serde(flatten)]
    graph: GraphResult,
    #[serde(default)]
    table: Option<ResultTable>,
}

/// Determine the [`FileType`] of a path from its extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for any extension other than
/// `prf` or `res11`.
pub fn file_type_of(path: &Path) -> Result<FileType, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    FileType::from_extension(ext).ok_or_else(|| IoError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: ext.to_string(),
    })
}

/// Load a result file.
///
/// A document with no nodes, reaches or table still loads successfully;
/// only a missing, unreadable, unsupported or undecodable file is an error.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::UnsupportedFormat`],
/// [`IoError::Read`] or [`IoError::Decode`].
pub fn load_result(path: &Path) -> Result<(FileType, LoadedResult), IoError> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file_type = file_type_of(path)?;

    info!(path = %path.display(), file_type = %file_type, "loading result file");
    let text = std::fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    let doc: ResultDocument = serde_json::from_str(&text).map_err(|e| IoError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        n_nodes = doc.graph.nodes.len(),
        n_reaches = doc.graph.reaches.len(),
        n_timesteps = doc.table.as_ref().map(ResultTable::n_timesteps),
        "result document decoded"
    );

    let loaded = match doc.table {
        Some(table) => LoadedResult::GraphWithTable(doc.graph, table),
        None => LoadedResult::Graph(doc.graph),
    };
    Ok((file_type, loaded))
}
