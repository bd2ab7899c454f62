//! Benchmark road-type grouping and stitching.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use road_grouping::{RoadClass, RoadTypeGrouper, RouteSegments};
use route_data::{Coordinate, IntersectionRecord, ManeuverType, Modifier, RoadType};

/// Alternate highway and major-road stretches of a few steps each.
fn synthetic_route(n: usize) -> Vec<IntersectionRecord> {
    (0..n)
        .map(|i| {
            let road_type = match (i / 4) % 3 {
                0 => RoadType::Highway,
                1 => RoadType::MajorRoad,
                _ => RoadType::LocalRoad,
            };
            IntersectionRecord {
                start_coord: Coordinate::new(49.0 + i as f64 * 1e-3, 9.0),
                end_coord: Coordinate::new(49.0 + (i + 1) as f64 * 1e-3, 9.0),
                intermediate_coord: None,
                name: String::new(),
                road_ref: "N/A".into(),
                distance_m: 250.0 + (i % 7) as f64 * 40.0,
                duration_s: 12.0 + (i % 5) as f64,
                modifier: Modifier::Straight,
                maneuver_type: ManeuverType::Continue,
                road_type,
                is_road_change: false,
            }
        })
        .collect()
}

fn bench_grouper(c: &mut Criterion) {
    let mut group = c.benchmark_group("road_type_grouper");

    for n in [100, 1_000, 10_000].iter() {
        let records = synthetic_route(*n);
        let grouper = RoadTypeGrouper::new(RoadClass::Highway);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| black_box(grouper.group(black_box(&records))))
        });
    }

    group.finish();
}

fn bench_full_segmentation(c: &mut Criterion) {
    let records = synthetic_route(1_000);
    c.bench_function("route_segments_1000", |b| {
        b.iter(|| black_box(RouteSegments::from_records(black_box(&records))))
    });
}

criterion_group!(benches, bench_grouper, bench_full_segmentation);
criterion_main!(benches);
