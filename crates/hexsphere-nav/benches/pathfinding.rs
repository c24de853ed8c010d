use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hexsphere_config::EdgeCostModel;
use hexsphere_nav::*;
use hexsphere_tiles::{TileId, TileSet, TileSetOptions};

fn sphere(level: u8) -> TileSet {
    TileSet::from_detail_level(level, &TileSetOptions::default()).unwrap()
}

fn bench_build_level_4(c: &mut Criterion) {
    c.bench_function("build_level_4", |bencher| {
        bencher.iter(|| black_box(sphere(black_box(4))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let tiles = sphere(4);
    c.bench_function("nav_snapshot_level_4", |bencher| {
        bencher.iter(|| black_box(NavGraph::snapshot(&tiles)))
    });
}

fn bench_cross_sphere_path(c: &mut Criterion) {
    let graph = NavGraph::snapshot(&sphere(4));
    // Tiles 0 and 11 sit at opposite icosahedron corners.
    let (start, goal) = (TileId(0), TileId(11));
    let mut finder = PathFinder::new();
    c.bench_function("path_antipodal_level_4", |bencher| {
        bencher.iter(|| {
            black_box(finder.find(
                &graph,
                black_box(start),
                black_box(goal),
                EdgeCostModel::Angular,
            ))
        })
    });
}

fn bench_weighted_path(c: &mut Criterion) {
    let mut graph = NavGraph::snapshot(&sphere(4));
    for i in (0..graph.len()).step_by(7) {
        graph.set_weight(TileId::from(i), 25);
    }
    let mut finder = PathFinder::new();
    c.bench_function("path_weighted_level_4", |bencher| {
        bencher.iter(|| {
            black_box(finder.find(
                &graph,
                TileId(0),
                TileId(11),
                EdgeCostModel::DestinationWeighted,
            ))
        })
    });
}

fn bench_pipeline_batch(c: &mut Criterion) {
    let graph = Arc::new(NavGraph::snapshot(&sphere(4)));
    let pipeline = PathfindingPipeline::new(4, 64, EdgeCostModel::Angular);
    c.bench_function("pipeline_batch_32", |bencher| {
        bencher.iter(|| {
            for request_id in 0..32u64 {
                pipeline.submit(PathRequest {
                    request_id,
                    generation: 0,
                    graph: Arc::clone(&graph),
                    start: TileId(0),
                    goal: TileId(100 + request_id as u32 * 50),
                });
            }
            let mut done = 0;
            while done < 32 {
                done += pipeline.drain_results().len();
                std::thread::yield_now();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_build_level_4,
    bench_snapshot,
    bench_cross_sphere_path,
    bench_weighted_path,
    bench_pipeline_batch,
);
criterion_main!(benches);
