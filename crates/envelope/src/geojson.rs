//! GeoJSON point output of per-file locations.

use std::path::Path;

use crest_extract::LocationRecord;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::EnvelopeError;
use crate::transform::CoordinateTransform;

/// Build a `FeatureCollection` with one point per record.
///
/// Records without both coordinates are skipped, as are points the
/// transform cannot convert.
pub fn to_geojson(records: &[LocationRecord], transform: &dyn CoordinateTransform) -> Value {
    let mut features = Vec::with_capacity(records.len());
    for record in records.iter().filter(|r| r.has_position()) {
        let (Some(x), Some(y)) = (record.x, record.y) else {
            continue;
        };
        let (lon, lat) = match transform.transform(x, y) {
            Ok(point) => point,
            Err(e) => {
                warn!(
                    file = %record.file,
                    location = %record.location_id,
                    "point skipped: {e}"
                );
                continue;
            }
        };
        features.push(json!({
            "type": "Feature",
            "properties": {
                "file": record.file,
                "location_id": record.location_id,
                "invert_level": record.invert_level,
            },
            "geometry": {
                "type": "Point",
                "coordinates": [lon, lat],
            },
        }));
    }
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write [`to_geojson`] output to `path`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Serialization`] if the file cannot be written.
pub fn write_geojson_file(
    path: &Path,
    records: &[LocationRecord],
    transform: &dyn CoordinateTransform,
) -> Result<(), EnvelopeError> {
    let value = to_geojson(records, transform);
    let text = serde_json::to_string(&value).map_err(|e| EnvelopeError::Serialization {
        reason: e.to_string(),
    })?;
    std::fs::write(path, text).map_err(|e| EnvelopeError::Serialization {
        reason: format!("{}: {e}", path.display()),
    })?;
    info!(path = %path.display(), "geojson written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Identity;
    use crest_io::FileType;

    struct RejectNegative;

    impl CoordinateTransform for RejectNegative {
        fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), EnvelopeError> {
            if x < 0.0 {
                return Err(EnvelopeError::Projection {
                    reason: "out of range".into(),
                });
            }
            Ok((x / 100.0, y / 100.0))
        }
    }

    fn record(id: &str, x: Option<f64>, y: Option<f64>) -> LocationRecord {
        let mut r = LocationRecord::new("a.prf", FileType::Graph, "LOCAL", id);
        r.x = x;
        r.y = y;
        r.invert_level = Some(1.5);
        r
    }

    #[test]
    fn features_carry_location_properties() {
        let records = vec![record("MH1", Some(10.0), Some(20.0))];
        let gj = to_geojson(&records, &Identity);
        assert_eq!(gj["type"], "FeatureCollection");
        let feature = &gj["features"][0];
        assert_eq!(feature["properties"]["location_id"], "MH1");
        assert_eq!(feature["properties"]["file"], "a.prf");
        assert_eq!(feature["properties"]["invert_level"], 1.5);
        assert_eq!(feature["geometry"]["coordinates"], json!([10.0, 20.0]));
    }

    #[test]
    fn unpositioned_and_failed_points_are_skipped() {
        let records = vec![
            record("A", Some(100.0), None),
            record("B", Some(-1.0), Some(0.0)),
            record("C", Some(100.0), Some(200.0)),
        ];
        let gj = to_geojson(&records, &RejectNegative);
        let features = gj["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["properties"]["location_id"], "C");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([1.0, 2.0]));
    }
}
