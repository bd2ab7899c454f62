//! Curvature Analysis
//!
//! Partitions a route polyline into arcs of same-direction turns:
//! - Signed turn angle at each interior vertex
//! - Great-circle (Haversine) leg lengths
//! - Single-pass arc detection on turn-sign changes

mod detector;
mod geo;

pub use detector::{CurvatureArc, CurvatureDetector, TurnSign};
pub use geo::{haversine_km, turn_angle_deg, EARTH_RADIUS_KM};
