//! Cross-file envelope merge.
//!
//! File order is load-bearing. It fixes the column layout, decides which
//! file supplies a location's position and invert level, and breaks ties
//! when several files reach the same peak.

use std::collections::BTreeMap;

use crest_extract::LocationRecord;
use tracing::{debug, warn};

use crate::critical::CriticalDurations;
use crate::record::{Envelope, EnvelopeMode, EnvelopeRecord, EnvelopeSummary};

/// Merge per-file records into one row per location.
///
/// `file_order` names the file columns in declared input order. Repeated
/// names keep their first position; records from files not listed are
/// ignored. When a file holds several records for one location the first
/// is used.
pub fn merge(
    records: &[LocationRecord],
    file_order: &[String],
    durations: &CriticalDurations,
    mode: EnvelopeMode,
) -> Envelope {
    let mut files: Vec<String> = Vec::with_capacity(file_order.len());
    for name in file_order {
        if files.contains(name) {
            warn!(file = %name, "duplicate file name, later columns merged into the first");
        } else {
            files.push(name.clone());
        }
    }

    // location -> file column -> record
    let mut by_location: BTreeMap<&str, BTreeMap<usize, &LocationRecord>> = BTreeMap::new();
    for record in records {
        let Some(column) = files.iter().position(|f| *f == record.file) else {
            debug!(file = %record.file, "record from unlisted file ignored");
            continue;
        };
        by_location
            .entry(record.location_id.as_str())
            .or_default()
            .entry(column)
            .or_insert(record);
    }

    let rows: Vec<EnvelopeRecord> = by_location
        .into_iter()
        .filter_map(|(location_id, per_column)| {
            let (_, first) = per_column.first_key_value()?;
            let per_file: Vec<Option<f64>> = (0..files.len())
                .map(|column| per_column.get(&column).and_then(|r| column_value(r, mode)))
                .collect();
            let summary = match mode {
                EnvelopeMode::Level => Some(summarise(
                    &per_file,
                    first.invert_level,
                    &files,
                    durations,
                )),
                EnvelopeMode::Timing => None,
            };
            Some(EnvelopeRecord {
                location_id: location_id.to_string(),
                x: first.x,
                y: first.y,
                invert_level: first.invert_level,
                file_type: first.file_type,
                per_file,
                summary,
            })
        })
        .collect();

    debug!(
        n_locations = rows.len(),
        n_files = files.len(),
        ?mode,
        "envelope merged"
    );
    Envelope::new(files, mode, rows)
}

fn column_value(record: &LocationRecord, mode: EnvelopeMode) -> Option<f64> {
    match mode {
        EnvelopeMode::Level => record.extreme_value,
        EnvelopeMode::Timing => record.extreme_timestep.map(|t| t as f64),
    }
}

fn summarise(
    per_file: &[Option<f64>],
    invert_level: Option<f64>,
    files: &[String],
    durations: &CriticalDurations,
) -> EnvelopeSummary {
    let max_of_max_level = per_file.iter().flatten().copied().reduce(f64::max);
    let Some(level) = max_of_max_level else {
        return EnvelopeSummary {
            max_of_max_level: None,
            max_of_max_depth: None,
            critical_duration: None,
        };
    };
    let critical_duration = per_file
        .iter()
        .position(|v| *v == Some(level))
        .and_then(|column| durations.get(&files[column]))
        .map(str::to_string);
    EnvelopeSummary {
        max_of_max_level,
        max_of_max_depth: invert_level.map(|invert| level - invert),
        critical_duration,
    }
}
