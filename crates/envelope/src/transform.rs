//! Coordinate transforms applied to spatial output.

use crate::error::EnvelopeError;

/// Converts model coordinates into output coordinates.
pub trait CoordinateTransform {
    /// Transform one point.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Projection`] if the point cannot be converted.
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), EnvelopeError>;
}

/// Leaves coordinates unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordinateTransform for Identity {
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), EnvelopeError> {
        Ok((x, y))
    }
}

#[cfg(feature = "proj")]
pub use self::projected::{ProjTransform, TARGET_CRS};

#[cfg(feature = "proj")]
mod projected {
    use proj::Proj;
    use tracing::debug;

    use super::CoordinateTransform;
    use crate::error::EnvelopeError;

    /// Longitude/latitude on WGS 84.
    pub const TARGET_CRS: &str = "EPSG:4326";

    /// Projects model coordinates to longitude/latitude with PROJ.
    pub struct ProjTransform {
        source: String,
        proj: Proj,
    }

    impl ProjTransform {
        /// Build a transform from `source` (any CRS definition PROJ knows,
        /// e.g. `"EPSG:28356"`) to [`TARGET_CRS`].
        ///
        /// # Errors
        ///
        /// Returns [`EnvelopeError::Projection`] if PROJ rejects the source.
        pub fn new(source: &str) -> Result<Self, EnvelopeError> {
            debug!(source, target = TARGET_CRS, "building coordinate transform");
            let proj = Proj::new_known_crs(source, TARGET_CRS, None).map_err(|e| {
                EnvelopeError::Projection {
                    reason: format!("cannot transform {source} -> {TARGET_CRS}: {e}"),
                }
            })?;
            Ok(Self {
                source: source.to_string(),
                proj,
            })
        }

        pub fn source(&self) -> &str {
            &self.source
        }
    }

    impl CoordinateTransform for ProjTransform {
        fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), EnvelopeError> {
            self.proj
                .convert((x, y))
                .map_err(|e| EnvelopeError::Projection {
                    reason: format!("cannot convert ({x:.3}, {y:.3}) from {}: {e}", self.source),
                })
        }
    }
}
