//! Canonical location identifiers.
//!
//! Graph nodes keep their native identifier. Reach points and table columns
//! are addressed as `"<base> <chainage>"` with the chainage rounded to one
//! decimal place, so the same physical point gets the same key whichever
//! representation it came from. Matching is exact string equality only.

/// Round a chainage to one decimal place.
///
/// Chainages sitting exactly on a half-way point at one decimal (two
/// fractional digits ending in `5`, e.g. `12.25`) are nudged by `+0.01`
/// first, so that binary float representation cannot flip them downwards.
pub fn round_chainage(chainage: f64) -> f64 {
    let text = chainage.to_string();
    let on_half = text
        .split_once('.')
        .is_some_and(|(_, frac)| frac.len() == 2 && frac.ends_with('5'));
    let nudged = if on_half { chainage + 0.01 } else { chainage };
    (nudged * 10.0).round() / 10.0
}

/// Rounded chainage with exactly one decimal digit (`12` -> `"12.0"`).
pub fn format_chainage(chainage: f64) -> String {
    format!("{:.1}", round_chainage(chainage))
}

/// The part of a reach identifier before the first `separator`.
pub fn reach_base_id<'a>(reach_id: &'a str, separator: &str) -> &'a str {
    reach_id
        .split_once(separator)
        .map_or(reach_id, |(base, _)| base)
}

/// Location identifier for a point on a reach.
pub fn reach_location_id(base_id: &str, chainage: f64) -> String {
    format!("{base_id} {}", format_chainage(chainage))
}

/// A parsed `<prefix>:<base-id>:<chainage>` table column header.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnKey {
    pub prefix: String,
    pub base_id: String,
    /// Chainage exactly as written in the header.
    pub chainage_raw: String,
    pub chainage: f64,
}

impl ColumnKey {
    /// Canonical location identifier of the column.
    pub fn location_id(&self) -> String {
        reach_location_id(&self.base_id, self.chainage)
    }

    /// Native node identifier this column corresponds to in the graph.
    ///
    /// Built from the un-rounded chainage text.
    pub fn expected_node_id(&self, separator: &str) -> String {
        format!("{}{separator}{}", self.base_id, self.chainage_raw)
    }
}

/// Parse a table column header. Returns `None` unless the header has
/// exactly three `:`-separated parts and a numeric chainage.
pub fn parse_column_header(header: &str) -> Option<ColumnKey> {
    let mut parts = header.split(':');
    let prefix = parts.next()?.trim();
    let base_id = parts.next()?.trim();
    let chainage_raw = parts.next()?.trim();
    if parts.next().is_some() || base_id.is_empty() {
        return None;
    }
    let chainage = chainage_raw.parse::<f64>().ok()?;
    Some(ColumnKey {
        prefix: prefix.to_string(),
        base_id: base_id.to_string(),
        chainage_raw: chainage_raw.to_string(),
        chainage,
    })
}
