//! Per-level rule tables
//!
//! Each autonomy level is a list of passes. A pass reads one segment list
//! and runs an ordered rule table over it: the first rule whose condition
//! holds assigns its features, otherwise the pass fallback either tags the
//! segment "None" or drops it.

use road_grouping::{RoadSegment, RouteSegments};
use serde::{Deserialize, Serialize};

use crate::feature::{AutonomyLevel, FeatureCode, FeatureSet};

/// Threshold test on a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `distance_km > km`
    DistanceAbove(f64),
    /// `above < distance_km <= at_most`
    DistanceWithin { above: f64, at_most: f64 },
    /// `distance_km > distance AND duration_min > duration`
    DistanceAndDurationAbove { distance_km: f64, duration_min: f64 },
}

impl Condition {
    pub fn holds(&self, segment: &RoadSegment) -> bool {
        match *self {
            Condition::DistanceAbove(km) => segment.distance_km > km,
            Condition::DistanceWithin { above, at_most } => {
                above < segment.distance_km && segment.distance_km <= at_most
            }
            Condition::DistanceAndDurationAbove {
                distance_km,
                duration_min,
            } => segment.distance_km > distance_km && segment.duration_min > duration_min,
        }
    }
}

/// One row of a rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub condition: Condition,
    pub features: FeatureSet,
}

impl Rule {
    pub fn new(condition: Condition, features: &[FeatureCode]) -> Self {
        Self {
            condition,
            features: FeatureSet::of(features),
        }
    }
}

/// What happens to a segment no rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fallback {
    /// Keep the segment with the "None" feature set
    TagNone,
    /// Leave the segment out of the output
    Drop,
}

/// Ordered rule table, first match wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePolicy {
    pub rules: Vec<Rule>,
    pub fallback: Fallback,
}

impl RulePolicy {
    pub fn new(rules: Vec<Rule>, fallback: Fallback) -> Self {
        Self { rules, fallback }
    }

    /// Features for a segment, or `None` when the segment is dropped
    pub fn evaluate(&self, segment: &RoadSegment) -> Option<FeatureSet> {
        self.rules
            .iter()
            .find(|rule| rule.condition.holds(segment))
            .map(|rule| rule.features.clone())
            .or_else(|| match self.fallback {
                Fallback::TagNone => Some(FeatureSet::none()),
                Fallback::Drop => None,
            })
    }
}

/// Segment list a pass reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentSource {
    /// Highway runs stitched with major-road runs
    Combined,
    Highway,
    MajorRoad,
    LocalRoad,
}

impl SegmentSource {
    pub fn select<'a>(&self, segments: &'a RouteSegments) -> &'a [RoadSegment] {
        match self {
            SegmentSource::Combined => &segments.combined,
            SegmentSource::Highway => &segments.highways,
            SegmentSource::MajorRoad => &segments.major_roads,
            SegmentSource::LocalRoad => &segments.local_roads,
        }
    }
}

/// One rule pass of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePass {
    pub source: SegmentSource,
    pub policy: RulePolicy,
    /// Copy the road-type label onto the output segments
    pub keep_road_type: bool,
}

/// Complete rule set of one autonomy level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPolicy {
    pub level: AutonomyLevel,
    /// Evaluated in order; outputs are concatenated
    pub passes: Vec<RulePass>,
}

impl LevelPolicy {
    pub fn for_level(level: AutonomyLevel) -> Self {
        let passes = match level {
            AutonomyLevel::Level0 => Self::level0(),
            AutonomyLevel::Level1 => Self::level1(),
            AutonomyLevel::Level2 => Self::level2(),
        };
        Self { level, passes }
    }

    /// Combined segments; unmatched segments are kept as "None"
    fn level0() -> Vec<RulePass> {
        use FeatureCode::*;
        vec![RulePass {
            source: SegmentSource::Combined,
            policy: RulePolicy::new(
                vec![
                    Rule::new(
                        Condition::DistanceAndDurationAbove {
                            distance_km: 10.0,
                            duration_min: 5.0,
                        },
                        &[Ldw, Tsr],
                    ),
                    Rule::new(Condition::DistanceAbove(2.0), &[Tsr]),
                ],
                Fallback::TagNone,
            ),
            keep_road_type: false,
        }]
    }

    /// Highway then major-road runs, unmerged; unmatched kept as "None"
    fn level1() -> Vec<RulePass> {
        use FeatureCode::*;
        vec![
            RulePass {
                source: SegmentSource::Highway,
                policy: RulePolicy::new(
                    vec![
                        Rule::new(Condition::DistanceAbove(5.0), &[Acc, Ldw]),
                        Rule::new(
                            Condition::DistanceWithin {
                                above: 1.0,
                                at_most: 5.0,
                            },
                            &[Elka],
                        ),
                    ],
                    Fallback::TagNone,
                ),
                keep_road_type: true,
            },
            RulePass {
                source: SegmentSource::MajorRoad,
                policy: RulePolicy::new(
                    vec![Rule::new(Condition::DistanceAbove(2.0), &[Tsr])],
                    Fallback::TagNone,
                ),
                keep_road_type: true,
            },
        ]
    }

    /// Highway, major-road and local-road runs; unmatched segments dropped
    fn level2() -> Vec<RulePass> {
        use FeatureCode::*;
        vec![
            RulePass {
                source: SegmentSource::Highway,
                policy: RulePolicy::new(
                    vec![
                        Rule::new(Condition::DistanceAbove(5.0), &[Acc, Lka]),
                        Rule::new(
                            Condition::DistanceWithin {
                                above: 1.0,
                                at_most: 5.0,
                            },
                            &[Elka],
                        ),
                    ],
                    Fallback::Drop,
                ),
                keep_road_type: true,
            },
            RulePass {
                source: SegmentSource::MajorRoad,
                policy: RulePolicy::new(
                    vec![Rule::new(Condition::DistanceAbove(1.0), &[Tja])],
                    Fallback::Drop,
                ),
                keep_road_type: true,
            },
            RulePass {
                source: SegmentSource::LocalRoad,
                policy: RulePolicy::new(
                    vec![Rule::new(Condition::DistanceAbove(1.0), &[Cas])],
                    Fallback::Drop,
                ),
                keep_road_type: true,
            },
        ]
    }
}
