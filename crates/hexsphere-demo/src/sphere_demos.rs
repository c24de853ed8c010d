//! Walkthroughs of sphere construction, editing, and pathfinding.

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hexsphere_config::{Config, SphereConfig};
use hexsphere_geometry::{GeodesicMesh, MAX_DETAIL_LEVEL};
use hexsphere_nav::{
    NavGraph, PathFinder, PathRequest, PathResult, PathfindingPipeline, TilePath,
    find_path_async, path_length,
};
use hexsphere_tiles::{Hexsphere, ObjectHandle, SphereRegistry, TileEvent, TileId};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{info, warn};

/// Name of the sphere the pathfinding walkthrough runs on.
pub const MAIN_SPHERE: &str = "Terra";

/// Inverted sphere, viewed from the inside.
const HOLLOW_SPHERE: &str = "Hollow";

/// How long to wait for pooled searches before giving up.
const PIPELINE_TIMEOUT: Duration = Duration::from_secs(10);

/// Logs geodesic mesh sizes for every level up to `max_level`.
pub fn demonstrate_tessellation(max_level: u8) {
    for level in 0..=max_level.min(MAX_DETAIL_LEVEL) {
        match GeodesicMesh::build(level) {
            Ok(mesh) => info!(
                level,
                vertices = mesh.vertices.len(),
                triangles = mesh.triangle_count(),
                "geodesic sphere"
            ),
            Err(e) => warn!("Tessellation failed: {e}"),
        }
    }
}

/// Builds the main sphere from config plus a small inverted one.
pub fn build_registry(config: &Config) -> Result<SphereRegistry, Box<dyn Error>> {
    let mut registry = SphereRegistry::new();

    let mut main = Hexsphere::from_config(MAIN_SPHERE, config.sphere.clone());
    let tiles = main.build()?;
    info!(
        sphere = MAIN_SPHERE,
        tiles = tiles.len(),
        pentagons = tiles.pentagon_count(),
        hexagons = tiles.hexagons().count(),
        "tile set ready"
    );
    registry.register(main)?;

    let mut hollow = Hexsphere::from_config(
        HOLLOW_SPHERE,
        SphereConfig {
            detail_level: 1,
            invert: true,
            single_mesh: true,
            ..config.sphere.clone()
        },
    );
    hollow.build()?;
    if let Some(mesh) = hollow.combined_mesh() {
        info!(
            sphere = HOLLOW_SPHERE,
            vertices = mesh.positions.len(),
            triangles = mesh.triangle_count(),
            "combined mesh"
        );
    }
    registry.register(hollow)?;

    Ok(registry)
}

/// Random navigable tile, giving up after a bounded number of draws.
fn random_open_tile(graph: &NavGraph, rng: &mut Xoshiro256StarStar) -> Option<TileId> {
    (0..64)
        .map(|_| TileId::from(rng.gen_range(0..graph.len())))
        .find(|&id| graph.is_navigable(id))
}

/// Walls off random tiles, runs sync, async, and pooled searches, then
/// raises the longest route and marks its goal.
pub fn demonstrate_pathfinding(sphere: &mut Hexsphere, config: &Config) {
    let events = sphere.subscribe();
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.demo.seed);
    let edge_cost = config.nav.edge_cost;

    let Some(tile_count) = sphere.tiles().map(|t| t.len()) else {
        warn!(sphere = sphere.name(), "sphere is not built");
        return;
    };

    let wall_count = (tile_count as f32 * config.demo.wall_fraction.clamp(0.0, 0.9)) as usize;
    for _ in 0..wall_count {
        let id = TileId::from(rng.gen_range(0..tile_count));
        if let Err(e) = sphere.set_navigable(id, false) {
            warn!("Failed to place wall: {e}");
        }
    }

    let Some(tiles) = sphere.tiles_mut() else {
        return;
    };
    for index in (0..tile_count).step_by(5) {
        let cost = rng.gen_range(1..=100u8);
        if let Err(e) = tiles.set_path_cost(TileId::from(index), cost) {
            warn!("Failed to set path cost: {e}");
        }
    }

    let graph = Arc::new(NavGraph::snapshot(tiles));
    let blocked = (0..tile_count)
        .filter(|&i| !graph.is_navigable(TileId::from(i)))
        .count();
    info!(walls = blocked, tiles = tile_count, ?edge_cost, "navigation snapshot");

    let queries: Vec<(TileId, TileId)> = (0..config.demo.queries)
        .filter_map(|_| {
            Some((
                random_open_tile(&graph, &mut rng)?,
                random_open_tile(&graph, &mut rng)?,
            ))
        })
        .collect();

    // Synchronous searches, reusing one finder.
    let mut finder = PathFinder::new();
    let mut longest = TilePath::new();
    for &(start, goal) in &queries {
        let path = finder.find(&graph, start, goal, edge_cost);
        if path.is_empty() {
            info!(%start, %goal, "no path");
            continue;
        }
        info!(
            %start,
            %goal,
            tiles = path.len(),
            radians = path_length(&graph, &path),
            "path found"
        );
        if path.len() > longest.len() {
            longest = path;
        }
    }

    // One-off background search.
    if let Some(&(start, goal)) = queries.first() {
        let path = find_path_async(Arc::clone(&graph), start, goal, edge_cost).wait();
        info!(%start, %goal, tiles = path.len(), "async path");
    }

    // Raise the longest route and pin a marker on its goal.
    for &id in &longest {
        if let Err(e) = sphere.extrude(id, config.demo.extrude_height) {
            warn!("Failed to extrude {id}: {e}");
        }
    }
    if let Some(&goal) = longest.last() {
        sphere.notify_clicked(goal);
        if let Some(tiles) = sphere.tiles_mut() {
            match tiles.place_object(goal, ObjectHandle(1)) {
                Ok(marker) => {
                    let coords = tiles.tile(goal).coordinates();
                    info!(
                        tile = %goal,
                        latitude = coords.latitude,
                        longitude = coords.longitude,
                        position = ?marker.position,
                        "marker placed"
                    );
                }
                Err(e) => warn!("Failed to place marker: {e}"),
            }
        }
    }

    let (mut extruded, mut navigability, mut pointer) = (0, 0, 0);
    for event in events.try_iter() {
        match event {
            TileEvent::Extruded { .. } => extruded += 1,
            TileEvent::NavigabilityChanged { .. } => navigability += 1,
            TileEvent::Clicked(_) | TileEvent::PointerEntered(_) | TileEvent::PointerExited(_) => {
                pointer += 1;
            }
        }
    }
    info!(extruded, navigability, pointer, "tile events received");

    // Rebuilding mid-flight also clears the walls and the raised route.
    let tally = run_pipeline(sphere, &graph, &queries, config);
    info!(
        submitted = tally.submitted,
        received = tally.received,
        found = tally.found,
        stale = tally.stale,
        "pipeline searches"
    );
}

/// Outcome of [`run_pipeline`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PipelineTally {
    submitted: usize,
    received: usize,
    found: usize,
    stale: usize,
}

impl PipelineTally {
    /// Counts `results`, treating any generation other than `current` as stale.
    fn record(&mut self, results: &[PathResult], current: u64) {
        self.received += results.len();
        for result in results {
            if result.generation != current {
                self.stale += 1;
            } else if !result.path.is_empty() {
                self.found += 1;
            }
        }
    }
}

/// Queues one request per query, numbering them from `first_id`.
fn submit_batch(
    pipeline: &PathfindingPipeline,
    generation: u64,
    graph: &Arc<NavGraph>,
    queries: &[(TileId, TileId)],
    first_id: u64,
) -> usize {
    queries
        .iter()
        .zip(first_id..)
        .filter(|&(&(start, goal), request_id)| {
            pipeline.submit(PathRequest {
                request_id,
                generation,
                graph: Arc::clone(graph),
                start,
                goal,
            })
        })
        .count()
}

/// Collects `count` results, giving up after [`PIPELINE_TIMEOUT`].
fn wait_for(pipeline: &PathfindingPipeline, count: usize) -> Vec<PathResult> {
    let started = Instant::now();
    let mut results = Vec::with_capacity(count);
    while results.len() < count && started.elapsed() < PIPELINE_TIMEOUT {
        results.extend(pipeline.drain_results());
        std::thread::sleep(Duration::from_millis(1));
    }
    results
}

/// Runs the queries through a worker pool in two batches.
///
/// The first batch is collected before anything changes. The sphere is
/// rebuilt while the second batch is queued, so those answers carry the old
/// generation and are discarded as stale.
fn run_pipeline(
    sphere: &mut Hexsphere,
    graph: &Arc<NavGraph>,
    queries: &[(TileId, TileId)],
    config: &Config,
) -> PipelineTally {
    let mut pipeline = PathfindingPipeline::from_config(&config.nav);
    let mut tally = PipelineTally::default();
    let (early, late) = queries.split_at(queries.len() / 2);
    let generation = sphere.generation();

    let submitted = submit_batch(&pipeline, generation, graph, early, 0);
    tally.submitted += submitted;
    tally.record(&wait_for(&pipeline, submitted), sphere.generation());

    tally.submitted += submit_batch(&pipeline, generation, graph, late, early.len() as u64);
    if let Err(e) = sphere.build().map(|_| ()) {
        warn!(sphere = sphere.name(), "Failed to rebuild: {e}");
    }

    // Workers finish every queued request before exiting.
    pipeline.shutdown();
    tally.record(&pipeline.drain_results(), sphere.generation());
    tally
}
