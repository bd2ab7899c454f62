//! Road-Type Segmentation
//!
//! Collapses consecutive intersection records of one road class into
//! contiguous segments, and stitches highway runs to adjoining major-road
//! runs.

mod grouper;
mod merger;
mod segment;

pub use grouper::{RoadClass, RoadTypeGrouper};
pub use merger::{MergeSource, MergedSegment, SegmentMerger};
pub use segment::{round_to, RoadSegment};

use route_data::IntersectionRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

/// All segment views of one route
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSegments {
    /// Highway runs
    pub highways: Vec<RoadSegment>,
    /// Major-road runs
    pub major_roads: Vec<RoadSegment>,
    /// Local-road runs
    pub local_roads: Vec<RoadSegment>,
    /// Highway runs stitched to adjoining major-road runs
    pub combined: Vec<RoadSegment>,
}

impl RouteSegments {
    /// Run the three groupers and the merger over one record sequence
    pub fn from_records(records: &[IntersectionRecord]) -> Self {
        let highways = RoadTypeGrouper::new(RoadClass::Highway).group(records);
        let major_roads = RoadTypeGrouper::new(RoadClass::MajorRoad).group(records);
        let local_roads = RoadTypeGrouper::new(RoadClass::LocalRoad).group(records);
        let combined = SegmentMerger::merge(&highways, &major_roads);

        info!(
            "Segmented route: {} highway, {} major-road, {} local-road, {} combined",
            highways.len(),
            major_roads.len(),
            local_roads.len(),
            combined.len()
        );

        Self {
            highways,
            major_roads,
            local_roads,
            combined,
        }
    }
}
