//! Search and planning benchmarks on a generated grid campus.

use campusnav_core::loading::{LineFeature, build_graph};
use campusnav_core::prelude::*;
use campusnav_core::routing::{astar, nearest_node};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geo::{Coord, Point};

const SPACING_M: f64 = 25.0;
const METERS_PER_DEGREE: f64 = 111_194.9;

fn grid_coord(col: usize, row: usize) -> Coord<f64> {
    Coord {
        x: 77.43 + col as f64 * SPACING_M / (METERS_PER_DEGREE * 12.86f64.to_radians().cos()),
        y: 12.86 + row as f64 * SPACING_M / METERS_PER_DEGREE,
    }
}

/// Square grid where every third row is walking only
fn grid_lines(size: usize) -> Vec<LineFeature> {
    let mut lines = Vec::with_capacity(size * 2);
    for i in 0..size {
        let row = (0..size).map(|col| grid_coord(col, i)).collect();
        let modes: &[&str] = if i % 3 == 0 { &["W"] } else { &["W", "2", "4"] };
        lines.push(LineFeature::new(row, modes.iter().copied()));

        let column = (0..size).map(|row| grid_coord(i, row)).collect();
        lines.push(LineFeature::new(column, ["W", "2", "4"]));
    }
    lines
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");
    for size in [10, 30, 60] {
        let lines = grid_lines(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| build_graph(black_box(lines), &[], DEFAULT_SNAP_TOLERANCE_M));
        });
    }
    group.finish();
}

fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar");
    let config = RoutingConfig::default();
    let trip = TripContext::default();

    for size in [10, 30, 60] {
        let graph = build_graph(&grid_lines(size), &[], DEFAULT_SNAP_TOLERANCE_M);
        let far = grid_coord(size - 1, size - 1);
        let (Some(start), Some(goal)) = (
            nearest_node(&graph, &Point::from(grid_coord(0, 0))),
            nearest_node(&graph, &Point::from(far)),
        ) else {
            continue;
        };

        for mode in Mode::ALL {
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), size),
                &(start, goal),
                |b, &(start, goal)| {
                    b.iter(|| {
                        astar(&graph, black_box(start), black_box(goal), mode, &trip, &config)
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_graph_build, bench_astar);
criterion_main!(benches);
