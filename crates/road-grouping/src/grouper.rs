//! Run-Length Road-Type Grouper

use crate::segment::RoadSegment;
use route_data::{Coordinate, IntersectionRecord, ManeuverType, RoadType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Road class a grouper collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadClass {
    /// Highway steps that keep to the carriageway (no turns, gentle modifiers)
    Highway,
    MajorRoad,
    LocalRoad,
}

impl RoadClass {
    pub fn road_type(&self) -> RoadType {
        match self {
            RoadClass::Highway => RoadType::Highway,
            RoadClass::MajorRoad => RoadType::MajorRoad,
            RoadClass::LocalRoad => RoadType::LocalRoad,
        }
    }

    /// Membership predicate, evaluated on one record with no lookahead
    pub fn admits(&self, record: &IntersectionRecord) -> bool {
        if record.road_type != self.road_type() {
            return false;
        }
        match self {
            RoadClass::Highway => {
                record.maneuver_type != ManeuverType::Turn && record.modifier.is_gentle()
            }
            RoadClass::MajorRoad | RoadClass::LocalRoad => true,
        }
    }
}

/// Accumulator of the run currently being built
#[derive(Debug, Clone)]
struct OpenRun {
    start: Coordinate,
    end: Coordinate,
    distance_m: f64,
    duration_s: f64,
}

impl OpenRun {
    fn start(record: &IntersectionRecord) -> Self {
        Self {
            start: record.start_coord,
            end: record.end_coord,
            distance_m: record.distance_m,
            duration_s: record.duration_s,
        }
    }

    fn extend(&mut self, record: &IntersectionRecord) {
        self.end = record.end_coord;
        self.distance_m += record.distance_m;
        self.duration_s += record.duration_s;
    }

    fn seal(self, class: RoadClass) -> RoadSegment {
        RoadSegment::from_totals(
            self.start,
            self.end,
            class.road_type().label(),
            self.distance_m,
            self.duration_s,
        )
    }
}

/// Grouping state between records
#[derive(Debug, Clone)]
enum RunState {
    Idle,
    Open(OpenRun),
}

/// Groups maximal runs of consecutive records of one road class
#[derive(Debug, Clone, Copy)]
pub struct RoadTypeGrouper {
    class: RoadClass,
}

impl RoadTypeGrouper {
    pub fn new(class: RoadClass) -> Self {
        Self { class }
    }

    /// Collapse the record sequence into one segment per maximal run
    pub fn group(&self, records: &[IntersectionRecord]) -> Vec<RoadSegment> {
        let mut segments = Vec::new();
        let mut state = RunState::Idle;

        for record in records {
            let admitted = self.class.admits(record);
            state = match (state, admitted) {
                (RunState::Idle, true) => RunState::Open(OpenRun::start(record)),
                (RunState::Open(mut run), true) => {
                    run.extend(record);
                    RunState::Open(run)
                }
                (RunState::Open(run), false) => {
                    segments.push(run.seal(self.class));
                    RunState::Idle
                }
                (RunState::Idle, false) => RunState::Idle,
            };
        }

        if let RunState::Open(run) = state {
            segments.push(run.seal(self.class));
        }

        debug!(
            "Grouped {} records into {} {:?} segments",
            records.len(),
            segments.len(),
            self.class
        );
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use route_data::Modifier;

    fn record(
        i: usize,
        road_type: RoadType,
        modifier: Modifier,
        maneuver: ManeuverType,
    ) -> IntersectionRecord {
        IntersectionRecord {
            start_coord: Coordinate::new(49.0 + i as f64 * 0.01, 9.0),
            end_coord: Coordinate::new(49.0 + (i + 1) as f64 * 0.01, 9.0),
            intermediate_coord: None,
            name: format!("step {}", i),
            road_ref: "N/A".into(),
            distance_m: 1000.0,
            duration_s: 60.0,
            modifier,
            maneuver_type: maneuver,
            road_type,
            is_road_change: false,
        }
    }

    fn simple(i: usize, road_type: RoadType) -> IntersectionRecord {
        record(i, road_type, Modifier::Straight, ManeuverType::Continue)
    }

    #[test]
    fn test_empty_input() {
        let grouper = RoadTypeGrouper::new(RoadClass::Highway);
        assert!(grouper.group(&[]).is_empty());
    }

    #[test]
    fn test_groups_consecutive_runs() {
        let records = vec![
            simple(0, RoadType::LocalRoad),
            simple(1, RoadType::MajorRoad),
            simple(2, RoadType::MajorRoad),
            simple(3, RoadType::LocalRoad),
            simple(4, RoadType::MajorRoad),
        ];
        let segments = RoadTypeGrouper::new(RoadClass::MajorRoad).group(&records);
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].start_coord, records[1].start_coord);
        assert_eq!(segments[0].end_coord, records[2].end_coord);
        assert_eq!(segments[0].distance_km, 2.0);
        assert_eq!(segments[0].duration_min, 2.0);
        assert_eq!(segments[0].road_type_label, "Major Road");

        // trailing run is sealed after the scan
        assert_eq!(segments[1].start_coord, records[4].start_coord);
        assert_eq!(segments[1].end_coord, records[4].end_coord);
    }

    #[test]
    fn test_single_record_run() {
        let records = vec![simple(0, RoadType::LocalRoad)];
        let segments = RoadTypeGrouper::new(RoadClass::LocalRoad).group(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_coord, records[0].start_coord);
        assert_eq!(segments[0].end_coord, records[0].end_coord);
        assert_eq!(segments[0].distance_km, 1.0);
    }

    #[test]
    fn test_highway_turn_breaks_run() {
        let records = vec![
            simple(0, RoadType::Highway),
            record(1, RoadType::Highway, Modifier::Straight, ManeuverType::Turn),
            simple(2, RoadType::Highway),
        ];
        let segments = RoadTypeGrouper::new(RoadClass::Highway).group(&records);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_highway_requires_gentle_modifier() {
        let records = vec![
            record(0, RoadType::Highway, Modifier::SlightLeft, ManeuverType::Merge),
            record(1, RoadType::Highway, Modifier::Right, ManeuverType::Continue),
            record(2, RoadType::Highway, Modifier::NotAvailable, ManeuverType::Continue),
            record(3, RoadType::Highway, Modifier::SlightRight, ManeuverType::OffRamp),
        ];
        let segments = RoadTypeGrouper::new(RoadClass::Highway).group(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].end_coord, records[0].end_coord);
        assert_eq!(segments[1].start_coord, records[3].start_coord);
    }

    #[test]
    fn test_major_road_ignores_maneuver() {
        let records = vec![
            record(0, RoadType::MajorRoad, Modifier::Left, ManeuverType::Turn),
            record(1, RoadType::MajorRoad, Modifier::SharpRight, ManeuverType::Turn),
        ];
        let segments = RoadTypeGrouper::new(RoadClass::MajorRoad).group(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].distance_km, 2.0);
    }

    #[test]
    fn test_link_roads_are_not_members() {
        let records = vec![
            simple(0, RoadType::Highway),
            simple(1, RoadType::HighwayLink),
            simple(2, RoadType::Highway),
        ];
        let segments = RoadTypeGrouper::new(RoadClass::Highway).group(&records);
        assert_eq!(segments.len(), 2);
    }

    fn arb_record() -> impl Strategy<Value = IntersectionRecord> {
        (
            prop_oneof![
                Just(RoadType::Highway),
                Just(RoadType::MajorRoad),
                Just(RoadType::LocalRoad),
                Just(RoadType::Unknown),
            ],
            prop_oneof![
                Just(Modifier::Straight),
                Just(Modifier::SlightLeft),
                Just(Modifier::Left),
            ],
            prop_oneof![Just(ManeuverType::Continue), Just(ManeuverType::Turn)],
            0.0f64..5000.0,
            0.0f64..600.0,
        )
            .prop_map(|(road_type, modifier, maneuver_type, distance_m, duration_s)| {
                let mut r = record(0, road_type, modifier, maneuver_type);
                r.distance_m = distance_m;
                r.duration_s = duration_s;
                r
            })
    }

    proptest! {
        #[test]
        fn prop_grouping_preserves_totals(records in prop::collection::vec(arb_record(), 0..40)) {
            for class in [RoadClass::Highway, RoadClass::MajorRoad, RoadClass::LocalRoad] {
                let segments = RoadTypeGrouper::new(class).group(&records);
                let admitted: Vec<&IntersectionRecord> =
                    records.iter().filter(|r| class.admits(r)).collect();

                let raw_km: f64 = admitted.iter().map(|r| r.distance_m).sum::<f64>() / 1000.0;
                let raw_min: f64 = admitted.iter().map(|r| r.duration_s).sum::<f64>() / 60.0;
                let seg_km: f64 = segments.iter().map(|s| s.distance_km).sum();
                let seg_min: f64 = segments.iter().map(|s| s.duration_min).sum();

                let n = segments.len() as f64;
                prop_assert!((raw_km - seg_km).abs() <= 0.0005 * n + 1e-9);
                prop_assert!((raw_min - seg_min).abs() <= 0.005 * n + 1e-9);
            }
        }

        #[test]
        fn prop_segment_count_matches_runs(records in prop::collection::vec(arb_record(), 0..40)) {
            let class = RoadClass::MajorRoad;
            let mut runs = 0;
            let mut previous = false;
            for r in &records {
                let admitted = class.admits(r);
                if admitted && !previous {
                    runs += 1;
                }
                previous = admitted;
            }
            prop_assert_eq!(RoadTypeGrouper::new(class).group(&records).len(), runs);
        }
    }
}
