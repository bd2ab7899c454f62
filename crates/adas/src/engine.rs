//! ADAS rule engine

use road_grouping::RouteSegments;
use tracing::{debug, info, warn};

use crate::analysis::AdasSegment;
use crate::feature::AutonomyLevel;
use crate::policy::LevelPolicy;

/// Assigns features to route segments per autonomy level
#[derive(Debug, Clone)]
pub struct AdasRuleEngine {
    policy: LevelPolicy,
}

impl AdasRuleEngine {
    pub fn new(level: AutonomyLevel) -> Self {
        Self {
            policy: LevelPolicy::for_level(level),
        }
    }

    /// Engine for a UI selector string, `None` if unrecognized
    pub fn from_selector(selector: &str) -> Option<Self> {
        AutonomyLevel::from_selector(selector).map(Self::new)
    }

    /// Run every pass of the level and concatenate the results
    pub fn evaluate(&self, segments: &RouteSegments) -> Vec<AdasSegment> {
        let mut output = Vec::new();

        for pass in &self.policy.passes {
            let input = pass.source.select(segments);
            let before = output.len();

            for segment in input {
                let Some(features) = pass.policy.evaluate(segment) else {
                    continue;
                };
                output.push(AdasSegment {
                    start_coord: segment.start_coord,
                    end_coord: segment.end_coord,
                    road_type_label: pass
                        .keep_road_type
                        .then(|| segment.road_type_label.clone()),
                    features,
                    distance_km: segment.distance_km,
                    duration_min: segment.duration_min,
                });
            }

            debug!(
                "{} {:?} pass: {} in, {} out",
                self.policy.level,
                pass.source,
                input.len(),
                output.len() - before
            );
        }

        info!(
            "{}: {} ADAS segments ({} with active features)",
            self.policy.level,
            output.len(),
            output.iter().filter(|s| s.has_features()).count()
        );
        output
    }

    /// Evaluate by selector; an unrecognized selector yields no segments
    pub fn evaluate_selector(selector: &str, segments: &RouteSegments) -> Vec<AdasSegment> {
        match Self::from_selector(selector) {
            Some(engine) => engine.evaluate(segments),
            None => {
                warn!("Unrecognized autonomy level {:?}, no ADAS features assigned", selector);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureCode, FeatureSet};
    use proptest::prelude::*;
    use road_grouping::RoadSegment;
    use route_data::Coordinate;

    fn seg(label: &str, distance_km: f64, duration_min: f64) -> RoadSegment {
        RoadSegment {
            start_coord: Coordinate::new(49.0 + distance_km, 9.0),
            end_coord: Coordinate::new(49.5 + distance_km, 9.0),
            road_type_label: label.into(),
            distance_km,
            duration_min,
        }
    }

    fn features(out: &[AdasSegment]) -> Vec<FeatureSet> {
        out.iter().map(|s| s.features.clone()).collect()
    }

    fn set(codes: &[FeatureCode]) -> FeatureSet {
        FeatureSet::of(codes)
    }

    #[test]
    fn test_level0_tiers() {
        let segments = RouteSegments {
            combined: vec![
                seg("Highway+Major Road", 12.0, 6.0),
                seg("Highway", 12.0, 5.0),
                seg("Highway", 6.0, 20.0),
                seg("Major Road", 2.0, 3.0),
            ],
            ..Default::default()
        };
        let out = AdasRuleEngine::new(AutonomyLevel::Level0).evaluate(&segments);
        assert_eq!(
            features(&out),
            vec![
                set(&[FeatureCode::Ldw, FeatureCode::Tsr]),
                set(&[FeatureCode::Tsr]),
                set(&[FeatureCode::Tsr]),
                FeatureSet::none(),
            ]
        );
        assert!(out.iter().all(|s| s.road_type_label.is_none()));
    }

    #[test]
    fn test_level0_reads_combined_only() {
        let segments = RouteSegments {
            highways: vec![seg("Highway", 30.0, 20.0)],
            ..Default::default()
        };
        assert!(AdasRuleEngine::new(AutonomyLevel::Level0).evaluate(&segments).is_empty());
    }

    #[test]
    fn test_level1_highway_boundaries() {
        let segments = RouteSegments {
            highways: vec![
                seg("Highway", 5.001, 3.0),
                seg("Highway", 5.0, 3.0),
                seg("Highway", 3.0, 2.0),
                seg("Highway", 1.0, 1.0),
                seg("Highway", 0.5, 1.0),
            ],
            ..Default::default()
        };
        let out = AdasRuleEngine::new(AutonomyLevel::Level1).evaluate(&segments);
        assert_eq!(
            features(&out),
            vec![
                set(&[FeatureCode::Acc, FeatureCode::Ldw]),
                set(&[FeatureCode::Elka]),
                set(&[FeatureCode::Elka]),
                FeatureSet::none(),
                FeatureSet::none(),
            ]
        );
        assert_eq!(out[0].road_type_label.as_deref(), Some("Highway"));
    }

    #[test]
    fn test_level1_highways_before_major_roads() {
        let segments = RouteSegments {
            highways: vec![seg("Highway", 0.2, 1.0)],
            major_roads: vec![seg("Major Road", 2.5, 3.0), seg("Major Road", 2.0, 3.0)],
            combined: vec![seg("Highway+Major Road", 50.0, 30.0)],
            ..Default::default()
        };
        let out = AdasRuleEngine::new(AutonomyLevel::Level1).evaluate(&segments);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].road_type_label.as_deref(), Some("Highway"));
        assert_eq!(out[1].features, set(&[FeatureCode::Tsr]));
        assert_eq!(out[2].features, FeatureSet::none());
    }

    #[test]
    fn test_level2_drops_unmatched() {
        let segments = RouteSegments {
            highways: vec![
                seg("Highway", 8.0, 5.0),
                seg("Highway", 1.0, 1.0),
                seg("Highway", 4.0, 3.0),
            ],
            major_roads: vec![seg("Major Road", 1.0, 2.0), seg("Major Road", 1.5, 2.0)],
            local_roads: vec![seg("Local Road", 1.0, 2.0), seg("Local Road", 1.01, 2.0)],
            ..Default::default()
        };
        let out = AdasRuleEngine::new(AutonomyLevel::Level2).evaluate(&segments);
        assert_eq!(
            features(&out),
            vec![
                set(&[FeatureCode::Acc, FeatureCode::Lka]),
                set(&[FeatureCode::Elka]),
                set(&[FeatureCode::Tja]),
                set(&[FeatureCode::Cas]),
            ]
        );
        assert!(out.iter().all(|s| s.has_features()));
        assert_eq!(out[3].distance_km, 1.01);
    }

    #[test]
    fn test_unrecognized_selector_is_empty() {
        let segments = RouteSegments {
            combined: vec![seg("Highway", 30.0, 20.0)],
            ..Default::default()
        };
        assert!(AdasRuleEngine::evaluate_selector("Level 4", &segments).is_empty());
        assert_eq!(AdasRuleEngine::evaluate_selector("Level 0", &segments).len(), 1);
    }

    #[test]
    fn test_segment_fields_copied() {
        let input = seg("Highway", 7.25, 4.5);
        let segments = RouteSegments {
            highways: vec![input.clone()],
            ..Default::default()
        };
        let out = AdasRuleEngine::new(AutonomyLevel::Level2).evaluate(&segments);
        assert_eq!(out[0].start_coord, input.start_coord);
        assert_eq!(out[0].end_coord, input.end_coord);
        assert_eq!(out[0].distance_km, 7.25);
        assert_eq!(out[0].duration_min, 4.5);
    }

    proptest! {
        #[test]
        fn prop_rules_are_deterministic(distance in 0.0f64..30.0, duration in 0.0f64..30.0) {
            let segments = RouteSegments {
                highways: vec![seg("Highway", distance, duration)],
                major_roads: vec![seg("Major Road", distance, duration)],
                local_roads: vec![seg("Local Road", distance, duration)],
                combined: vec![seg("Highway", distance, duration)],
            };
            for level in AutonomyLevel::ALL {
                let engine = AdasRuleEngine::new(level);
                prop_assert_eq!(engine.evaluate(&segments), engine.evaluate(&segments));
            }
        }

        #[test]
        fn prop_levels_0_and_1_keep_every_segment(
            distances in prop::collection::vec(0.0f64..20.0, 0..10),
        ) {
            let runs: Vec<RoadSegment> =
                distances.iter().map(|d| seg("Highway", *d, 1.0)).collect();
            let segments = RouteSegments {
                highways: runs.clone(),
                major_roads: runs.clone(),
                combined: runs.clone(),
                ..Default::default()
            };
            let level0 = AdasRuleEngine::new(AutonomyLevel::Level0).evaluate(&segments);
            let level1 = AdasRuleEngine::new(AutonomyLevel::Level1).evaluate(&segments);
            prop_assert_eq!(level0.len(), runs.len());
            prop_assert_eq!(level1.len(), 2 * runs.len());
        }
    }
}
