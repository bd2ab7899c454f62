//! Road-Type Classification

use crate::error::LookupError;
use crate::record::{Coordinate, RoadType};
use tracing::debug;

/// Source of OSM `highway=*` tags near a coordinate
///
/// Implemented by whatever map-data service the caller has access to. A
/// lookup that finds no tagged way returns `Ok(None)`.
pub trait HighwayTagLookup {
    fn highway_tag(&self, coord: Coordinate) -> Result<Option<String>, LookupError>;
}

impl<F> HighwayTagLookup for F
where
    F: Fn(Coordinate) -> Result<Option<String>, LookupError>,
{
    fn highway_tag(&self, coord: Coordinate) -> Result<Option<String>, LookupError> {
        self(coord)
    }
}

/// Lookup for offline use: classification relies on road refs alone
#[derive(Debug, Clone, Copy, Default)]
pub struct RefOnlyLookup;

impl HighwayTagLookup for RefOnlyLookup {
    fn highway_tag(&self, _coord: Coordinate) -> Result<Option<String>, LookupError> {
        Ok(None)
    }
}

/// Autobahn ("A") and Bundesstraße ("B") refs are highways
pub fn is_highway_ref(road_ref: &str) -> bool {
    !road_ref.is_empty()
        && road_ref != "N/A"
        && (road_ref.starts_with('A') || road_ref.starts_with('B'))
}

/// Classify a step from its ref, falling back to the tag at `coord`
pub fn classify_road(road_ref: &str, coord: Coordinate, lookup: &dyn HighwayTagLookup) -> RoadType {
    if is_highway_ref(road_ref) {
        return RoadType::Highway;
    }

    match lookup.highway_tag(coord) {
        Ok(Some(tag)) => RoadType::from_highway_tag(&tag),
        Ok(None) => RoadType::Unknown,
        Err(e) => {
            debug!("Road type lookup failed at {}: {}", coord, e);
            RoadType::Error
        }
    }
}
