//! ADAS segment results and map colouring

use route_data::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::feature::{FeatureCode, FeatureSet};

/// Colour of the plain route, where no feature overrides it
pub const DEFAULT_ROUTE_COLOR: &str = "blue";

/// Highlight colour for a stretch with active features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapColor {
    Red,
    Green,
    Orange,
    Yellow,
}

impl MapColor {
    /// Colour for a feature set, `None` keeps the default route colour
    ///
    /// Precedence: CAS; ACC+LKA, ACC+LDW or LDW+TSR; TSR alone; ELKA alone;
    /// TJA alone.
    pub fn for_features(features: &FeatureSet) -> Option<MapColor> {
        use FeatureCode::*;
        let has = |code| features.contains(code);

        if has(Cas) {
            Some(MapColor::Red)
        } else if (has(Acc) && has(Lka)) || (has(Acc) && has(Ldw)) || (has(Ldw) && has(Tsr)) {
            Some(MapColor::Green)
        } else if features.is_only(Tsr) {
            Some(MapColor::Orange)
        } else if features.is_only(Elka) {
            Some(MapColor::Yellow)
        } else if features.is_only(Tja) {
            Some(MapColor::Orange)
        } else {
            None
        }
    }

    pub fn css_name(&self) -> &'static str {
        match self {
            MapColor::Red => "red",
            MapColor::Green => "green",
            MapColor::Orange => "orange",
            MapColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for MapColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Route segment with its assigned features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdasSegment {
    pub start_coord: Coordinate,

    pub end_coord: Coordinate,

    /// Road type, when the level reports it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub road_type_label: Option<String>,

    /// Active features ("None" sentinel when nothing applies)
    pub features: FeatureSet,

    /// Length (km)
    pub distance_km: f64,

    /// Travel time (min)
    pub duration_min: f64,
}

impl AdasSegment {
    /// Whether any feature is active on this segment
    pub fn has_features(&self) -> bool {
        !self.features.is_none()
    }

    pub fn color(&self) -> Option<MapColor> {
        MapColor::for_features(&self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(codes: &[FeatureCode]) -> Option<MapColor> {
        MapColor::for_features(&FeatureSet::of(codes))
    }

    #[test]
    fn test_cas_takes_precedence() {
        assert_eq!(color(&[FeatureCode::Cas]), Some(MapColor::Red));
        assert_eq!(
            color(&[FeatureCode::Acc, FeatureCode::Lka, FeatureCode::Cas]),
            Some(MapColor::Red)
        );
    }

    #[test]
    fn test_green_pairs() {
        assert_eq!(color(&[FeatureCode::Acc, FeatureCode::Lka]), Some(MapColor::Green));
        assert_eq!(color(&[FeatureCode::Acc, FeatureCode::Ldw]), Some(MapColor::Green));
        assert_eq!(color(&[FeatureCode::Ldw, FeatureCode::Tsr]), Some(MapColor::Green));
    }

    #[test]
    fn test_single_feature_colors() {
        assert_eq!(color(&[FeatureCode::Tsr]), Some(MapColor::Orange));
        assert_eq!(color(&[FeatureCode::Elka]), Some(MapColor::Yellow));
        assert_eq!(color(&[FeatureCode::Tja]), Some(MapColor::Orange));
    }

    #[test]
    fn test_no_override() {
        assert_eq!(color(&[]), None);
        assert_eq!(color(&[FeatureCode::Pa]), None);
        assert_eq!(color(&[FeatureCode::Tja, FeatureCode::Pa]), None);
        assert_eq!(color(&[FeatureCode::Acc]), None);
    }

    #[test]
    fn test_segment_serializes_features_as_labels() {
        let segment = AdasSegment {
            start_coord: Coordinate::new(49.0, 9.0),
            end_coord: Coordinate::new(49.1, 9.1),
            road_type_label: None,
            features: FeatureSet::none(),
            distance_km: 1.5,
            duration_min: 2.0,
        };
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["features"], serde_json::json!(["None"]));
        assert!(json.get("road_type_label").is_none());
        assert!(!segment.has_features());
        assert_eq!(segment.color(), None);
    }
}
