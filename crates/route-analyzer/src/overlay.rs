//! Map overlay
//!
//! Projects ADAS segments onto the route polyline: which stretches to paint
//! in which colour, and what to tell the driver at a given vehicle position.

use adas::{AdasSegment, FeatureSet, MapColor};
use route_data::Coordinate;
use serde::Serialize;

use crate::settings::AdvisoryConfig;

/// Index of the polyline point nearest to `target`
///
/// Plain squared distance in degrees; the first point wins a tie.
pub fn closest_index(polyline: &[Coordinate], target: &Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in polyline.iter().enumerate() {
        let d = point.planar_distance_sq(target);
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Polyline index range covered by a segment, ordered
fn segment_span(polyline: &[Coordinate], segment: &AdasSegment) -> Option<(usize, usize)> {
    let start = closest_index(polyline, &segment.start_coord)?;
    let end = closest_index(polyline, &segment.end_coord)?;
    Some((start.min(end), start.max(end)))
}

/// Inclusive run of polyline points drawn in one colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStretch {
    pub start_index: usize,

    pub end_index: usize,

    /// `None` is the default route colour
    pub color: Option<MapColor>,
}

impl RouteStretch {
    pub fn css_color(&self) -> &'static str {
        self.color
            .map(|c| c.css_name())
            .unwrap_or(adas::DEFAULT_ROUTE_COLOR)
    }
}

/// Split the polyline into coloured and default stretches
///
/// Coloured ranges are drawn in start order. Gaps before, between and after
/// them get the default colour. Overlapping ranges are drawn as-is.
pub fn paint_route(polyline: &[Coordinate], segments: &[AdasSegment]) -> Vec<RouteStretch> {
    let mut ranges: Vec<(usize, usize, MapColor)> = segments
        .iter()
        .filter_map(|segment| {
            let color = segment.color()?;
            let (start, end) = segment_span(polyline, segment)?;
            Some((start, end, color))
        })
        .collect();
    ranges.sort();

    let mut stretches = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut next = 0;
    for (start, end, color) in ranges {
        if next < start {
            stretches.push(RouteStretch {
                start_index: next,
                end_index: start - 1,
                color: None,
            });
        }
        stretches.push(RouteStretch {
            start_index: start,
            end_index: end,
            color: Some(color),
        });
        next = next.max(end + 1);
    }

    if next < polyline.len() {
        stretches.push(RouteStretch {
            start_index: next,
            end_index: polyline.len() - 1,
            color: None,
        });
    }
    stretches
}

/// Driver message for the current position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "features")]
pub enum Advisory {
    Enable(FeatureSet),
    Disable(FeatureSet),
}

/// Advisory for a vehicle at polyline index `vehicle_index`
///
/// "Disable" applies within `disable_window_points` of a segment end,
/// "Enable" from `enable_lead_points` before its start up to that window.
/// The first segment that matches wins. Segments without features are
/// skipped.
pub fn advisory_at(
    vehicle_index: usize,
    polyline: &[Coordinate],
    segments: &[AdasSegment],
    config: &AdvisoryConfig,
) -> Option<Advisory> {
    let last = polyline.len().checked_sub(1)?;

    for segment in segments.iter().filter(|s| s.has_features()) {
        let Some((start, end)) = segment_span(polyline, segment) else {
            continue;
        };

        let disable_from = end.saturating_sub(config.disable_window_points);
        let disable_to = (end + config.disable_window_points).min(last);
        if (disable_from..=disable_to).contains(&vehicle_index) {
            return Some(Advisory::Disable(segment.features.clone()));
        }

        let enable_from = start.saturating_sub(config.enable_lead_points);
        if (enable_from..disable_from).contains(&vehicle_index) {
            return Some(Advisory::Enable(segment.features.clone()));
        }
    }
    None
}
