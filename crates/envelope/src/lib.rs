//! # crest-envelope
//!
//! Merges per-file location records into a cross-file envelope: one row per
//! location, one column per input file, plus the peak over all files, the
//! depth of that peak above the invert and the critical duration that
//! produced it.
//!
//! ```text
//! LocationRecord (per file) ──▶ merge() ──▶ Envelope ──▶ write_csv()
//!                                 ▲
//!                      CriticalDurations
//! LocationRecord (per file) ──▶ to_geojson(transform)
//! ```
//!
//! Enable the `proj` feature for [`ProjTransform`], which projects model
//! coordinates to longitude/latitude for GeoJSON output.

mod critical;
mod error;
mod geojson;
mod merge;
mod output;
mod record;
mod transform;

pub use critical::CriticalDurations;
pub use error::EnvelopeError;
pub use geojson::{to_geojson, write_geojson_file};
pub use merge::merge;
pub use output::{
    DEFAULT_DECIMALS, MAX_DECIMALS, csv_header, format_float, write_csv, write_csv_file,
};
pub use record::{Envelope, EnvelopeMode, EnvelopeRecord, EnvelopeSummary};
#[cfg(feature = "proj")]
pub use transform::{ProjTransform, TARGET_CRS};
pub use transform::{CoordinateTransform, Identity};
