//! Intersection Records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON position (`[longitude, latitude]`)
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self {
            lat: position[1],
            lon: position[0],
        }
    }

    /// Exact positional match: both components must be bit-identical
    pub fn same_position(&self, other: &Coordinate) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }

    /// Squared planar distance in degree space
    pub fn planar_distance_sq(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Maneuver direction modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Modifier {
    SlightLeft,
    SlightRight,
    Straight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    UTurn,
    #[default]
    NotAvailable,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::SlightLeft => "slight left",
            Modifier::SlightRight => "slight right",
            Modifier::Straight => "straight",
            Modifier::Left => "left",
            Modifier::Right => "right",
            Modifier::SharpLeft => "sharp left",
            Modifier::SharpRight => "sharp right",
            Modifier::UTurn => "uturn",
            Modifier::NotAvailable => "N/A",
        }
    }

    /// Unknown modifiers collapse to `NotAvailable`
    pub fn parse(value: &str) -> Self {
        match value {
            "slight left" => Modifier::SlightLeft,
            "slight right" => Modifier::SlightRight,
            "straight" => Modifier::Straight,
            "left" => Modifier::Left,
            "right" => Modifier::Right,
            "sharp left" => Modifier::SharpLeft,
            "sharp right" => Modifier::SharpRight,
            "uturn" => Modifier::UTurn,
            _ => Modifier::NotAvailable,
        }
    }

    /// Gentle enough to stay on a through carriageway
    pub fn is_gentle(&self) -> bool {
        matches!(
            self,
            Modifier::SlightLeft | Modifier::SlightRight | Modifier::Straight
        )
    }
}

impl From<String> for Modifier {
    fn from(value: String) -> Self {
        Modifier::parse(&value)
    }
}

impl From<Modifier> for &'static str {
    fn from(value: Modifier) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OSRM maneuver type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ManeuverType {
    Depart,
    Arrive,
    Turn,
    Continue,
    Merge,
    NewName,
    OnRamp,
    OffRamp,
    Fork,
    EndOfRoad,
    Roundabout,
    Rotary,
    RoundaboutTurn,
    ExitRoundabout,
    ExitRotary,
    UseLane,
    Notification,
    #[default]
    NotAvailable,
}

impl ManeuverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManeuverType::Depart => "depart",
            ManeuverType::Arrive => "arrive",
            ManeuverType::Turn => "turn",
            ManeuverType::Continue => "continue",
            ManeuverType::Merge => "merge",
            ManeuverType::NewName => "new name",
            ManeuverType::OnRamp => "on ramp",
            ManeuverType::OffRamp => "off ramp",
            ManeuverType::Fork => "fork",
            ManeuverType::EndOfRoad => "end of road",
            ManeuverType::Roundabout => "roundabout",
            ManeuverType::Rotary => "rotary",
            ManeuverType::RoundaboutTurn => "roundabout turn",
            ManeuverType::ExitRoundabout => "exit roundabout",
            ManeuverType::ExitRotary => "exit rotary",
            ManeuverType::UseLane => "use lane",
            ManeuverType::Notification => "notification",
            ManeuverType::NotAvailable => "N/A",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "depart" => ManeuverType::Depart,
            "arrive" => ManeuverType::Arrive,
            "turn" => ManeuverType::Turn,
            "continue" => ManeuverType::Continue,
            "merge" => ManeuverType::Merge,
            "new name" => ManeuverType::NewName,
            "on ramp" => ManeuverType::OnRamp,
            "off ramp" => ManeuverType::OffRamp,
            "fork" => ManeuverType::Fork,
            "end of road" => ManeuverType::EndOfRoad,
            "roundabout" => ManeuverType::Roundabout,
            "rotary" => ManeuverType::Rotary,
            "roundabout turn" => ManeuverType::RoundaboutTurn,
            "exit roundabout" => ManeuverType::ExitRoundabout,
            "exit rotary" => ManeuverType::ExitRotary,
            "use lane" => ManeuverType::UseLane,
            "notification" => ManeuverType::Notification,
            _ => ManeuverType::NotAvailable,
        }
    }

    /// Route endpoints never count as a road change
    pub fn is_endpoint(&self) -> bool {
        matches!(self, ManeuverType::Depart | ManeuverType::Arrive)
    }
}

impl From<String> for ManeuverType {
    fn from(value: String) -> Self {
        ManeuverType::parse(&value)
    }
}

impl From<ManeuverType> for &'static str {
    fn from(value: ManeuverType) -> Self {
        value.as_str()
    }
}

impl fmt::Display for ManeuverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Road classification of a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum RoadType {
    Highway,
    HighwayLink,
    MajorRoad,
    MajorRoadLink,
    LocalRoad,
    ServiceRoad,
    Other,
    #[default]
    Unknown,
    /// Classification lookup failed
    Error,
}

impl RoadType {
    /// Label used in segment output and exports
    pub fn label(&self) -> &'static str {
        match self {
            RoadType::Highway => "Highway",
            RoadType::HighwayLink => "Highway_link",
            RoadType::MajorRoad => "Major Road",
            RoadType::MajorRoadLink => "MajorRoad_link",
            RoadType::LocalRoad => "Local Road",
            RoadType::ServiceRoad => "Service Road",
            RoadType::Other => "Other",
            RoadType::Unknown => "Unknown",
            RoadType::Error => "Error",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Highway" => RoadType::Highway,
            "Highway_link" => RoadType::HighwayLink,
            "Major Road" => RoadType::MajorRoad,
            "MajorRoad_link" => RoadType::MajorRoadLink,
            "Local Road" => RoadType::LocalRoad,
            "Service Road" => RoadType::ServiceRoad,
            "Other" => RoadType::Other,
            "Error" => RoadType::Error,
            _ => RoadType::Unknown,
        }
    }

    /// Map an OSM `highway=*` tag onto a road class
    pub fn from_highway_tag(tag: &str) -> Self {
        match tag {
            "motorway" | "trunk" => RoadType::Highway,
            "motorway_link" | "trunk_link" => RoadType::HighwayLink,
            "primary" | "secondary" | "tertiary" => RoadType::MajorRoad,
            "primary_link" | "secondary_link" | "tertiary_link" => RoadType::MajorRoadLink,
            "residential" | "unclassified" | "living_street" => RoadType::LocalRoad,
            "service" | "rest_area" => RoadType::ServiceRoad,
            _ => RoadType::Other,
        }
    }
}

impl From<String> for RoadType {
    fn from(value: String) -> Self {
        RoadType::parse(&value)
    }
}

impl From<RoadType> for &'static str {
    fn from(value: RoadType) -> Self {
        value.label()
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One step of a turn-by-turn route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    /// First vertex of the step geometry
    pub start_coord: Coordinate,

    /// Last vertex of the step geometry
    pub end_coord: Coordinate,

    /// Middle vertex, only present for steps with 3 or more vertices
    #[serde(default)]
    pub intermediate_coord: Option<Coordinate>,

    /// Street name ("N/A" when the service gave none)
    pub name: String,

    /// Road reference number, e.g. "A6"
    #[serde(rename = "ref")]
    pub road_ref: String,

    /// Step length (meters)
    pub distance_m: f64,

    /// Step travel time (seconds)
    pub duration_s: f64,

    #[serde(default)]
    pub modifier: Modifier,

    #[serde(default)]
    pub maneuver_type: ManeuverType,

    #[serde(default)]
    pub road_type: RoadType,

    /// Unnamed connector between two differently named roads
    #[serde(default)]
    pub is_road_change: bool,
}
