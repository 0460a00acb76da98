//! Typed per-location extraction outcomes.
//!
//! A location that cannot supply a field is not an error: it is recorded as
//! an [`Omission`] with its reason, reported to the observer, and the rest
//! of the file carries on.

use std::collections::BTreeMap;
use std::fmt;

use crate::observer::Observer;

/// The per-location field an extraction step produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    X,
    Y,
    InvertLevel,
    Extreme,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::InvertLevel => "invert_level",
            Self::Extreme => "extreme",
        })
    }
}

/// Why a field was omitted for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmissionReason {
    /// The source object has no value for the attribute.
    MissingAttribute,
    /// A table column has no node with the reconstructed identifier.
    NoMatchingNode { node_id: String },
    /// A table column header is not `<prefix>:<base>:<chainage>`.
    MalformedHeader,
    /// The location carries no water-level data item.
    NoWaterLevelSeries,
    /// The water-level series has no finite values.
    EmptySeries,
    /// A reach data item has fewer elements than water-level points.
    MissingElement { index: usize },
}

impl OmissionReason {
    /// Omissions that are an expected consequence of the data layout rather
    /// than a fault in the source.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingNode { .. } | Self::NoWaterLevelSeries
        )
    }
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAttribute => f.write_str("attribute not available"),
            Self::NoMatchingNode { node_id } => write!(f, "no node '{node_id}'"),
            Self::MalformedHeader => f.write_str("malformed column header"),
            Self::NoWaterLevelSeries => f.write_str("no water level data item"),
            Self::EmptySeries => f.write_str("water level series is empty"),
            Self::MissingElement { index } => write!(f, "no series for element {index}"),
        }
    }
}

/// One omitted field for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub location_id: String,
    pub field: Field,
    pub reason: OmissionReason,
}

impl Omission {
    pub fn new(location_id: impl Into<String>, field: Field, reason: OmissionReason) -> Self {
        Self {
            location_id: location_id.into(),
            field,
            reason,
        }
    }
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} omitted for '{}': {}",
            self.field, self.location_id, self.reason
        )
    }
}

/// Values resolved per location plus the locations that were omitted.
///
/// The first value inserted for a location is kept; a location identity is
/// never reassigned within a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    values: BTreeMap<String, T>,
    omissions: Vec<Omission>,
}

impl<T> Default for Resolved<T> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            omissions: Vec::new(),
        }
    }
}

impl<T> Resolved<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless the location already has one.
    pub fn insert(&mut self, location_id: String, value: T) {
        self.values.entry(location_id).or_insert(value);
    }

    /// Record an omission and report it to the observer.
    pub fn omit(&mut self, omission: Omission, observer: &mut dyn Observer) {
        observer.omitted(&omission);
        self.omissions.push(omission);
    }

    pub fn get(&self, location_id: &str) -> Option<&T> {
        self.values.get(location_id)
    }

    pub fn values(&self) -> &BTreeMap<String, T> {
        &self.values
    }

    pub fn omissions(&self) -> &[Omission] {
        &self.omissions
    }

    /// Fold another result into this one, keeping existing values.
    pub fn absorb(&mut self, other: Resolved<T>) {
        for (id, value) in other.values {
            self.insert(id, value);
        }
        self.omissions.extend(other.omissions);
    }

    /// Transform every resolved value, keeping the omissions.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Resolved<U> {
        let mut f = f;
        Resolved {
            values: self.values.into_iter().map(|(k, v)| (k, f(v))).collect(),
            omissions: self.omissions,
        }
    }

    pub fn into_parts(self) -> (BTreeMap<String, T>, Vec<Omission>) {
        (self.values, self.omissions)
    }
}
