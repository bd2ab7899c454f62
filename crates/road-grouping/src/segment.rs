//! Road Segments

use route_data::Coordinate;
use serde::{Deserialize, Serialize};

/// Round to a fixed number of decimal places
///
/// Rounds the exact binary value, so 5.0005 (stored just below the tie)
/// becomes 5.0, not 5.001. Scaling by `10^k` first would round the product
/// instead and land on the wrong side of such values.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Contiguous span of one road type (or two, once stitched)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub start_coord: Coordinate,

    pub end_coord: Coordinate,

    /// Single road type, or "TypeA+TypeB" after stitching
    pub road_type_label: String,

    /// Length (km, 3 decimals)
    pub distance_km: f64,

    /// Travel time (min, 2 decimals)
    pub duration_min: f64,
}

impl RoadSegment {
    /// Seal raw meter/second totals into a segment
    pub fn from_totals(
        start_coord: Coordinate,
        end_coord: Coordinate,
        road_type_label: impl Into<String>,
        distance_m: f64,
        duration_s: f64,
    ) -> Self {
        Self {
            start_coord,
            end_coord,
            road_type_label: road_type_label.into(),
            distance_km: round_to(distance_m / 1000.0, 3),
            duration_min: round_to(duration_s / 60.0, 2),
        }
    }
}
