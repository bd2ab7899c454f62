//! Geometry helpers

use route_data::Coordinate;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Signed turn angle at `p2` (degrees)
///
/// Edge vectors are plain (lat, lon) differences in radians, not spherical
/// bearings. Positive is a right turn, negative a left turn. A zero-length
/// edge gives 0.
pub fn turn_angle_deg(p1: &Coordinate, p2: &Coordinate, p3: &Coordinate) -> f64 {
    let (lat1, lon1) = (p1.lat.to_radians(), p1.lon.to_radians());
    let (lat2, lon2) = (p2.lat.to_radians(), p2.lon.to_radians());
    let (lat3, lon3) = (p3.lat.to_radians(), p3.lon.to_radians());

    let v1 = (lat2 - lat1, lon2 - lon1);
    let v2 = (lat3 - lat2, lon3 - lon2);

    let m1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let m2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if m1 == 0.0 || m2 == 0.0 {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    // float error can push the cosine just past ±1
    let cos = (dot / (m1 * m2)).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();

    let cross = v1.0 * v2.1 - v1.1 * v2.0;
    if cross < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Great-circle distance (km)
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = b.lon.to_radians() - a.lon.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
