//! Analyzer input documents

use route_data::{extract_records, Coordinate, HighwayTagLookup, IntersectionRecord, RouteResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AnalyzerError;

/// One route ready for analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteInput {
    /// Intersection records in route order
    pub records: Vec<IntersectionRecord>,

    /// Route polyline as GeoJSON positions (`[longitude, latitude]`)
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,

    /// Total route distance (m), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,

    /// Total route duration (s), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,
}

impl RouteInput {
    /// Parse a route document
    pub fn from_json(body: &str) -> Result<Self, AnalyzerError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Build from a raw OSRM `/route` response body
    pub fn from_osrm_json(
        body: &str,
        lookup: &dyn HighwayTagLookup,
    ) -> Result<Self, AnalyzerError> {
        let route = RouteResponse::from_json(body)?.into_route()?;
        let records = extract_records(route.steps(), lookup)?;
        debug!(
            "OSRM route: {} steps, {} polyline points",
            records.len(),
            route.geometry.coordinates.len()
        );

        Ok(Self {
            records,
            geometry: route.geometry.coordinates,
            distance_m: Some(route.distance),
            duration_s: Some(route.duration),
        })
    }

    /// Polyline as (lat, lon) coordinates
    pub fn polyline(&self) -> Vec<Coordinate> {
        self.geometry.iter().copied().map(Coordinate::from_lon_lat).collect()
    }
}
