//! Route analysis pipeline

use adas::{AdasRuleEngine, AdasSegment, AutonomyLevel, FeatureCode, MapColor};
use curvature::{CurvatureArc, CurvatureDetector};
use road_grouping::{round_to, RouteSegments};
use route_data::{Coordinate, Validator};
use serde::Serialize;
use tracing::{debug, info};

use crate::input::RouteInput;
use crate::overlay::{self, Advisory, RouteStretch};
use crate::settings::AnalyzerConfig;
use crate::AnalyzerError;

/// ADAS segment with its map colour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredAdasSegment {
    #[serde(flatten)]
    pub segment: AdasSegment,

    /// `None` keeps the default route colour
    pub color: Option<MapColor>,
}

impl From<AdasSegment> for ColoredAdasSegment {
    fn from(segment: AdasSegment) -> Self {
        let color = segment.color();
        Self { segment, color }
    }
}

/// Headline numbers for a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Total route distance (km), when the input carries it
    pub route_distance_km: Option<f64>,

    /// Total route duration (min), when the input carries it
    pub estimated_duration_min: Option<f64>,

    pub record_count: usize,

    pub polyline_points: usize,

    pub adas_segment_count: usize,

    /// ADAS segments with at least one active feature
    pub active_segment_count: usize,

    pub curvature_count: usize,

    /// Sum of all arc angles (degrees)
    pub total_turn_angle_deg: f64,
}

/// Full result for one route
#[derive(Debug, Clone, Serialize)]
pub struct RouteAnalysis {
    /// Selector the rules were evaluated for
    pub autonomy_level: String,

    /// Feature catalog of that level, empty when the selector is unrecognized
    pub supported_features: Vec<FeatureCode>,

    pub summary: RouteSummary,

    pub segments: RouteSegments,

    pub adas_segments: Vec<ColoredAdasSegment>,

    pub route_paint: Vec<RouteStretch>,

    pub curvatures: Vec<CurvatureArc>,

    #[serde(skip)]
    polyline: Vec<Coordinate>,
}

impl RouteAnalysis {
    /// One report line per curvature arc
    pub fn curvature_report(&self) -> Vec<String> {
        self.curvatures.iter().map(ToString::to_string).collect()
    }
}

/// Runs the full pipeline for one configuration
pub struct RouteAnalyzer {
    config: AnalyzerConfig,
    validator: Validator,
    detector: CurvatureDetector,
}

impl RouteAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            validator: Validator::default(),
            detector: CurvatureDetector::new(),
        }
    }

    /// Analyze one route
    ///
    /// Records are validated first; the first bad record aborts the run.
    /// An unrecognized autonomy level yields no ADAS segments.
    pub fn analyze(&self, input: &RouteInput) -> Result<RouteAnalysis, AnalyzerError> {
        self.validator.validate_batch(&input.records)?;

        let segments = RouteSegments::from_records(&input.records);
        let adas = AdasRuleEngine::evaluate_selector(&self.config.autonomy_level, &segments);

        let polyline = input.polyline();
        let route_paint = overlay::paint_route(&polyline, &adas);
        let curvatures = self.detector.detect(&polyline);
        debug!(
            "{} paint stretches, {} curvature arcs",
            route_paint.len(),
            curvatures.len()
        );

        let summary = RouteSummary {
            route_distance_km: input.distance_m.map(|m| round_to(m / 1000.0, 2)),
            estimated_duration_min: input.duration_s.map(|s| round_to(s / 60.0, 2)),
            record_count: input.records.len(),
            polyline_points: polyline.len(),
            adas_segment_count: adas.len(),
            active_segment_count: adas.iter().filter(|s| s.has_features()).count(),
            curvature_count: curvatures.len(),
            total_turn_angle_deg: curvatures.iter().map(|a| a.total_angle_deg).sum(),
        };
        info!(
            "Analyzed route: {} records, {} ADAS segments ({} active), {} curves",
            summary.record_count,
            summary.adas_segment_count,
            summary.active_segment_count,
            summary.curvature_count
        );

        let supported_features = AutonomyLevel::from_selector(&self.config.autonomy_level)
            .map(|level| level.supported_features().to_vec())
            .unwrap_or_default();

        Ok(RouteAnalysis {
            autonomy_level: self.config.autonomy_level.clone(),
            supported_features,
            summary,
            segments,
            adas_segments: adas.into_iter().map(ColoredAdasSegment::from).collect(),
            route_paint,
            curvatures,
            polyline,
        })
    }

    /// Advisory for a vehicle at a polyline index of an analyzed route
    pub fn advisory(&self, analysis: &RouteAnalysis, vehicle_index: usize) -> Option<Advisory> {
        let segments: Vec<AdasSegment> = analysis
            .adas_segments
            .iter()
            .map(|s| s.segment.clone())
            .collect();
        overlay::advisory_at(vehicle_index, &analysis.polyline, &segments, &self.config.advisory)
    }
}
