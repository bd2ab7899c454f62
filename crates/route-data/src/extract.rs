//! OSRM Step Extraction
//!
//! Turns the `steps` of an OSRM route (requested with `geometries=geojson`
//! and `steps=true`) into intersection records.

use crate::classify::{classify_road, HighwayTagLookup};
use crate::error::ExtractError;
use crate::record::{Coordinate, IntersectionRecord, ManeuverType, Modifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const NOT_AVAILABLE: &str = "N/A";

/// Top-level OSRM `/route` response
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Parse a raw JSON response body
    pub fn from_json(body: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(body)?)
    }

    /// First route of an Ok response
    pub fn into_route(self) -> Result<Route, ExtractError> {
        if self.code != "Ok" {
            return Err(ExtractError::Service {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "No message provided".to_string()),
            });
        }
        self.routes.into_iter().next().ok_or(ExtractError::NoRoute)
    }
}

/// One route alternative
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Total distance (m)
    pub distance: f64,
    /// Total duration (s)
    pub duration: f64,
    pub geometry: LineString,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl Route {
    /// Steps of the first leg
    pub fn steps(&self) -> &[RouteStep] {
        self.legs.first().map(|leg| leg.steps.as_slice()).unwrap_or(&[])
    }
}

/// GeoJSON LineString (`[longitude, latitude]` positions)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn to_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates
            .iter()
            .copied()
            .map(Coordinate::from_lon_lat)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Maneuver {
    #[serde(rename = "type", default)]
    pub maneuver_type: Option<String>,
    #[serde(default)]
    pub modifier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub geometry: Option<LineString>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ref", default)]
    pub road_ref: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub maneuver: Maneuver,
}

impl RouteStep {
    fn name_or_na(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Build one intersection record per step
///
/// Steps without distance, duration or geometry are rejected rather than
/// defaulted.
pub fn extract_records(
    steps: &[RouteStep],
    lookup: &dyn HighwayTagLookup,
) -> Result<Vec<IntersectionRecord>, ExtractError> {
    let mut records = Vec::with_capacity(steps.len());
    let mut previous_name: Option<&str> = None;

    for (i, step) in steps.iter().enumerate() {
        let geometry = step
            .geometry
            .as_ref()
            .ok_or(ExtractError::MissingField { step: i, field: "geometry" })?;
        let (first, last) = match (geometry.coordinates.first(), geometry.coordinates.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(ExtractError::EmptyGeometry { step: i }),
        };
        let distance_m = step
            .distance
            .ok_or(ExtractError::MissingField { step: i, field: "distance" })?;
        let duration_s = step
            .duration
            .ok_or(ExtractError::MissingField { step: i, field: "duration" })?;

        let start_coord = Coordinate::from_lon_lat(first);
        let end_coord = Coordinate::from_lon_lat(last);
        let intermediate_coord = if geometry.coordinates.len() > 2 {
            Some(Coordinate::from_lon_lat(
                geometry.coordinates[geometry.coordinates.len() / 2],
            ))
        } else {
            None
        };

        let name = step.name_or_na();
        let road_ref = step.road_ref.as_deref().unwrap_or(NOT_AVAILABLE);
        let modifier = step
            .maneuver
            .modifier
            .as_deref()
            .map(Modifier::parse)
            .unwrap_or_default();
        let maneuver_type = step
            .maneuver
            .maneuver_type
            .as_deref()
            .map(ManeuverType::parse)
            .unwrap_or_default();

        let road_type = classify_road(road_ref, intermediate_coord.unwrap_or(end_coord), lookup);

        let is_road_change = if maneuver_type.is_endpoint() {
            false
        } else {
            let next_name = steps.get(i + 1).map(RouteStep::name_or_na);
            match (previous_name, next_name) {
                (Some(prev), Some(next)) => name.is_empty() && prev != next,
                _ => false,
            }
        };

        records.push(IntersectionRecord {
            start_coord,
            end_coord,
            intermediate_coord,
            name: name.to_string(),
            road_ref: road_ref.to_string(),
            distance_m,
            duration_s,
            modifier,
            maneuver_type,
            road_type,
            is_road_change,
        });
        previous_name = Some(name);
    }

    debug!("Extracted {} intersection records", records.len());
    info!(
        "Road change points: {}",
        records.iter().filter(|r| r.is_road_change).count()
    );

    Ok(records)
}
