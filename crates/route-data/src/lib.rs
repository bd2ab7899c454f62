//! Route Data Model
//!
//! Intersection records as produced from turn-by-turn routing data, plus the
//! pieces needed to produce and vet them:
//! - Road-type classification from road refs and OSM highway tags
//! - Extraction of records from OSRM route steps
//! - Batch validation before records enter the analysis pipeline

mod classify;
mod error;
mod extract;
mod record;
mod validator;

pub use classify::{classify_road, is_highway_ref, HighwayTagLookup, RefOnlyLookup};
pub use error::{ExtractError, LookupError, ValidationError};
pub use extract::{extract_records, Leg, LineString, Maneuver, Route, RouteResponse, RouteStep};
pub use record::{Coordinate, IntersectionRecord, ManeuverType, Modifier, RoadType};
pub use validator::{ValidationConfig, Validator};
