//! # crest-io
//!
//! Loads exported hydraulic result documents and resolves the list of input
//! files for a run. Bridges files on disk into the in-memory graph and table
//! model consumed by `crest-extract`.

mod discover;
mod error;
mod file_list;
mod reader;
mod result;
mod table;
mod validate;

pub use discover::{DiscoverConfig, discover};
pub use error::IoError;
pub use file_list::{InputFile, parse_file_list, read_file_list, render_file_list};
pub use reader::{LoadedResult, file_type_of, load_result};
pub use result::{DataItem, FileType, GraphResult, GridPoint, GridPointType, Node, Reach};
pub use table::ResultTable;
