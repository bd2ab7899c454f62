//! Highway / Major-Road Stitching

use crate::segment::{round_to, RoadSegment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which input runs a merged segment was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeSource {
    /// Highway run passed through unchanged
    Highway(usize),
    /// Major-road run that matched no highway
    MajorRoad(usize),
    /// Highway run fused with a major-road run
    Fused { highway: usize, major_road: usize },
}

/// Output segment together with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSegment {
    pub segment: RoadSegment,
    pub source: MergeSource,
}

/// Fuses highway runs with the major-road run they hand over to (or from)
pub struct SegmentMerger;

impl SegmentMerger {
    /// Stitched segment list
    pub fn merge(highways: &[RoadSegment], major_roads: &[RoadSegment]) -> Vec<RoadSegment> {
        Self::merge_with_sources(highways, major_roads)
            .into_iter()
            .map(|m| m.segment)
            .collect()
    }

    /// Stitched segment list with the runs each output came from
    ///
    /// Highways are processed in order; each takes the first unused major
    /// road whose start equals the highway end, or whose end equals the
    /// highway start. Unused major roads follow in their original order.
    pub fn merge_with_sources(
        highways: &[RoadSegment],
        major_roads: &[RoadSegment],
    ) -> Vec<MergedSegment> {
        let mut merged = Vec::with_capacity(highways.len() + major_roads.len());
        let mut used = vec![false; major_roads.len()];

        for (h_idx, highway) in highways.iter().enumerate() {
            let mut fused = None;
            for (m_idx, major) in major_roads.iter().enumerate() {
                if used[m_idx] {
                    continue;
                }
                if highway.end_coord.same_position(&major.start_coord) {
                    fused = Some((m_idx, fuse(highway, major)));
                    break;
                }
                if major.end_coord.same_position(&highway.start_coord) {
                    fused = Some((m_idx, fuse(major, highway)));
                    break;
                }
            }

            match fused {
                Some((m_idx, segment)) => {
                    used[m_idx] = true;
                    merged.push(MergedSegment {
                        segment,
                        source: MergeSource::Fused {
                            highway: h_idx,
                            major_road: m_idx,
                        },
                    });
                }
                None => merged.push(MergedSegment {
                    segment: highway.clone(),
                    source: MergeSource::Highway(h_idx),
                }),
            }
        }

        let fused_count = used.iter().filter(|u| **u).count();
        for (m_idx, major) in major_roads.iter().enumerate() {
            if !used[m_idx] {
                merged.push(MergedSegment {
                    segment: major.clone(),
                    source: MergeSource::MajorRoad(m_idx),
                });
            }
        }

        debug!(
            "Merged {} highway and {} major-road runs ({} fused) into {} segments",
            highways.len(),
            major_roads.len(),
            fused_count,
            merged.len()
        );
        merged
    }
}

/// Join two runs in traversal order
fn fuse(first: &RoadSegment, second: &RoadSegment) -> RoadSegment {
    RoadSegment {
        start_coord: first.start_coord,
        end_coord: second.end_coord,
        road_type_label: format!("{}+{}", first.road_type_label, second.road_type_label),
        distance_km: round_to(first.distance_km + second.distance_km, 3),
        duration_min: round_to(first.duration_min + second.duration_min, 2),
    }
}
