//! Record Validator

use crate::error::ValidationError;
use crate::record::{Coordinate, IntersectionRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Step distance valid range (m)
    pub distance_range_m: (f64, f64),
    /// Step duration valid range (s)
    pub duration_range_s: (f64, f64),
    /// Latitude valid range (degrees)
    pub lat_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub lon_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            distance_range_m: (0.0, f64::MAX),
            duration_range_s: (0.0, f64::MAX),
            lat_range: (-90.0, 90.0),
            lon_range: (-180.0, 180.0),
        }
    }
}

/// Validator for intersection records
///
/// Upstream extraction is expected to hand over well-formed numbers, so a
/// bad record rejects the whole batch rather than being patched up.
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    fn validate_coordinate(
        &self,
        lat_field: &'static str,
        lon_field: &'static str,
        coord: &Coordinate,
    ) -> Result<(), ValidationError> {
        self.validate_range(lat_field, coord.lat, self.config.lat_range)?;
        self.validate_range(lon_field, coord.lon, self.config.lon_range)
    }

    /// Validate one record
    pub fn validate_record(&self, record: &IntersectionRecord) -> Result<(), ValidationError> {
        self.validate_range("distance_m", record.distance_m, self.config.distance_range_m)?;
        self.validate_range("duration_s", record.duration_s, self.config.duration_range_s)?;
        self.validate_coordinate("start_lat", "start_lon", &record.start_coord)?;
        self.validate_coordinate("end_lat", "end_lon", &record.end_coord)?;
        if let Some(mid) = &record.intermediate_coord {
            self.validate_coordinate("intermediate_lat", "intermediate_lon", mid)?;
        }
        Ok(())
    }

    /// Validate a batch, stopping at the first bad record
    pub fn validate_batch(&self, records: &[IntersectionRecord]) -> Result<(), ValidationError> {
        for (index, record) in records.iter().enumerate() {
            if let Err(e) = self.validate_record(record) {
                warn!("Rejecting record batch: record {} invalid ({})", index, e);
                return Err(ValidationError::InvalidRecord {
                    index,
                    source: Box::new(e),
                });
            }
        }
        debug!("Validated {} intersection records", records.len());
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ManeuverType, Modifier, RoadType};

    fn record(distance_m: f64, duration_s: f64) -> IntersectionRecord {
        IntersectionRecord {
            start_coord: Coordinate::new(49.14, 9.21),
            end_coord: Coordinate::new(49.15, 9.22),
            intermediate_coord: None,
            name: "Neckartalstraße".into(),
            road_ref: "B27".into(),
            distance_m,
            duration_s,
            modifier: Modifier::Straight,
            maneuver_type: ManeuverType::Continue,
            road_type: RoadType::Highway,
            is_road_change: false,
        }
    }

    #[test]
    fn test_valid_record() {
        let validator = Validator::default();
        assert!(validator.validate_record(&record(0.0, 0.0)).is_ok());
        assert!(validator.validate_record(&record(1500.0, 72.5)).is_ok());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let validator = Validator::default();
        assert!(matches!(
            validator.validate_record(&record(-1.0, 10.0)),
            Err(ValidationError::OutOfRange { field: "distance_m", .. })
        ));
    }

    #[test]
    fn test_nan_duration_rejected() {
        let validator = Validator::default();
        assert!(matches!(
            validator.validate_record(&record(10.0, f64::NAN)),
            Err(ValidationError::NotFinite { field: "duration_s" })
        ));
    }

    #[test]
    fn test_bad_latitude_rejected() {
        let validator = Validator::default();
        let mut r = record(10.0, 1.0);
        r.end_coord = Coordinate::new(95.0, 9.0);
        assert!(validator.validate_record(&r).is_err());
    }

    #[test]
    fn test_batch_fails_fast_with_index() {
        let validator = Validator::default();
        let batch = vec![record(10.0, 1.0), record(f64::INFINITY, 1.0), record(-5.0, 1.0)];
        match validator.validate_batch(&batch) {
            Err(ValidationError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let validator = Validator::default();
        assert!(validator.validate_batch(&[]).is_ok());
    }
}
