//! Curvature arc detection

use route_data::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::geo::{haversine_km, turn_angle_deg};

/// Direction of the turn at a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnSign {
    Left,
    Straight,
    Right,
}

impl TurnSign {
    pub fn of(angle_deg: f64) -> Self {
        if angle_deg > 0.0 {
            TurnSign::Right
        } else if angle_deg < 0.0 {
            TurnSign::Left
        } else {
            TurnSign::Straight
        }
    }
}

/// Maximal run of same-direction turns along the polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvatureArc {
    pub start_point: Coordinate,

    pub end_point: Coordinate,

    /// Polyline index of `start_point`
    pub start_index: usize,

    /// Polyline index of `end_point`
    pub end_index: usize,

    /// Sum of absolute turn angles (degrees)
    pub total_angle_deg: f64,

    /// Haversine length of the accumulated legs (km)
    pub total_distance_km: f64,
}

impl fmt::Display for CurvatureArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start: {}, End: {}, Total Angle: {:.2} degrees, Total Distance: {:.2} km",
            self.start_point, self.end_point, self.total_angle_deg, self.total_distance_km
        )
    }
}

/// Arc under construction
struct OpenArc {
    start_index: usize,
    start_point: Coordinate,
    total_angle_deg: f64,
    total_distance_km: f64,
}

impl OpenArc {
    fn open(start_index: usize, start_point: Coordinate) -> Self {
        Self {
            start_index,
            start_point,
            total_angle_deg: 0.0,
            total_distance_km: 0.0,
        }
    }

    fn seal(self, end_index: usize, end_point: Coordinate) -> CurvatureArc {
        CurvatureArc {
            start_point: self.start_point,
            end_point,
            start_index: self.start_index,
            end_index,
            total_angle_deg: self.total_angle_deg,
            total_distance_km: self.total_distance_km,
        }
    }
}

/// Single-pass turn-arc detector
///
/// Slides a three-vertex window along the polyline. An arc opens on the
/// first non-zero turn, accumulates every further turn of the same sign and
/// is sealed when the sign changes (zero counts as a sign of its own) or the
/// polyline ends. No smoothing is applied, so noisy geometry yields many
/// short arcs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurvatureDetector;

impl CurvatureDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect arcs on a (lat, lon) polyline
    pub fn detect(&self, polyline: &[Coordinate]) -> Vec<CurvatureArc> {
        let mut arcs = Vec::new();
        if polyline.len() < 3 {
            return arcs;
        }

        let mut open: Option<OpenArc> = None;
        let mut previous: Option<TurnSign> = None;

        for i in 1..polyline.len() - 1 {
            let (p1, p2, p3) = (&polyline[i - 1], &polyline[i], &polyline[i + 1]);
            let angle = turn_angle_deg(p1, p2, p3);
            let sign = TurnSign::of(angle);

            if matches!(previous, Some(prev) if prev != sign) {
                if let Some(arc) = open.take() {
                    arcs.push(arc.seal(i, *p2));
                }
            }

            if angle != 0.0 {
                let arc = open.get_or_insert_with(|| OpenArc::open(i - 1, *p1));
                arc.total_angle_deg += angle.abs();
                arc.total_distance_km += haversine_km(p1, p2);
            }

            previous = Some(sign);
        }

        if let Some(arc) = open {
            let last = polyline.len() - 1;
            arcs.push(arc.seal(last, polyline[last]));
        }

        debug!("Detected {} curvature arcs over {} points", arcs.len(), polyline.len());
        arcs
    }

    /// Detect arcs on GeoJSON positions (`[longitude, latitude]`)
    pub fn detect_lon_lat(&self, positions: &[[f64; 2]]) -> Vec<CurvatureArc> {
        let polyline: Vec<Coordinate> = positions
            .iter()
            .copied()
            .map(Coordinate::from_lon_lat)
            .collect();
        self.detect(&polyline)
    }
}
