//! A* search over the tile adjacency graph.
//!
//! Step cost and heuristic are great-circle angles between unit tile
//! positions, so results do not depend on planet scale or extrusion.

use glam::Vec3;
use hexsphere_config::EdgeCostModel;
use hexsphere_tiles::{TileId, TileSet};
use tracing::{debug, trace};

use crate::graph::NavGraph;
use crate::heap::{IndexedHeap, NavCost};

/// Tiles from start to goal inclusive. Empty when the goal is unreachable.
pub type TilePath = Vec<TileId>;

/// Great-circle angle in radians between two directions.
#[must_use]
pub fn angular_distance(a: Vec3, b: Vec3) -> f32 {
    a.normalize_or_zero()
        .dot(b.normalize_or_zero())
        .clamp(-1.0, 1.0)
        .acos()
}

/// Per-tile search state. Valid only when `stamp` matches the current search.
#[derive(Clone, Copy, Debug, Default)]
struct NodeScratch {
    stamp: u32,
    g: f32,
    parent: Option<TileId>,
    closed: bool,
}

/// Reusable A* search state.
///
/// Each finder owns its scratch table and open set, so separate finders can
/// search the same [`NavGraph`] concurrently.
#[derive(Debug, Default)]
pub struct PathFinder {
    scratch: Vec<NodeScratch>,
    open: IndexedHeap<NavCost>,
    stamp: u32,
}

impl PathFinder {
    /// Creates a finder with empty scratch state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates all scratch entries without touching them.
    fn begin_search(&mut self, nodes: usize) {
        self.open.clear();
        if self.scratch.len() < nodes {
            self.scratch.resize(nodes, NodeScratch::default());
        }
        // Stamp 0 marks never-visited entries.
        self.stamp = self.stamp.wrapping_add(1).max(1);
        if self.stamp == u32::MAX {
            self.scratch.fill(NodeScratch::default());
            self.stamp = 1;
        }
    }

    fn state(&mut self, id: TileId) -> &mut NodeScratch {
        let stamp = self.stamp;
        let entry = &mut self.scratch[id.index()];
        if entry.stamp != stamp {
            *entry = NodeScratch {
                stamp,
                ..NodeScratch::default()
            };
        }
        entry
    }

    /// Finds the cheapest path from `start` to `goal`.
    ///
    /// Returns an empty path if the goal cannot be reached or either endpoint
    /// is not in the graph. The start tile itself is never checked for
    /// navigability; every other tile on the path is navigable.
    ///
    /// # Panics
    ///
    /// Panics if a node lists a neighbor id outside the graph.
    pub fn find(
        &mut self,
        graph: &NavGraph,
        start: TileId,
        goal: TileId,
        cost_model: EdgeCostModel,
    ) -> TilePath {
        let nodes = graph.nodes();
        if start.index() >= nodes.len() || goal.index() >= nodes.len() {
            debug!(%start, %goal, tiles = nodes.len(), "path endpoint outside graph");
            return TilePath::new();
        }

        self.begin_search(nodes.len());
        let goal_pos = nodes[goal.index()].position;

        let h = angular_distance(nodes[start.index()].position, goal_pos);
        self.state(start).g = 0.0;
        self.open.add(start.index(), NavCost::new(0.0, h));

        let mut expanded = 0usize;
        while let Some((current, _)) = self.open.remove_first() {
            let current = TileId::from(current);
            self.state(current).closed = true;
            expanded += 1;

            if current == goal {
                let path = self.retrace(start, goal);
                debug!(%start, %goal, steps = path.len(), expanded, "path found");
                return path;
            }

            let node = &nodes[current.index()];
            let g_current = self.state(current).g;
            for &neighbor in &node.neighbors {
                let Some(next) = nodes.get(neighbor.index()) else {
                    panic!("tile {current} lists neighbor {neighbor} outside the graph");
                };
                if !next.navigable || self.state(neighbor).closed {
                    continue;
                }

                let angle = angular_distance(node.position, next.position);
                let step = match cost_model {
                    EdgeCostModel::Angular => angle,
                    EdgeCostModel::DestinationWeighted => angle * f32::from(next.weight),
                };
                let tentative = g_current + step;

                let queued = self.open.contains(neighbor.index());
                let entry = self.state(neighbor);
                if queued && tentative >= entry.g {
                    continue;
                }
                entry.g = tentative;
                entry.parent = Some(current);

                let h = angular_distance(next.position, goal_pos);
                let cost = NavCost::new(tentative, h);
                if queued {
                    self.open.update_item(neighbor.index(), cost);
                } else {
                    self.open.add(neighbor.index(), cost);
                }
                trace!(from = %current, to = %neighbor, g = tentative, h, "relaxed");
            }
        }

        debug!(%start, %goal, expanded, "goal unreachable");
        TilePath::new()
    }

    /// Walks back-pointers from `goal` and returns the path in start-to-goal order.
    fn retrace(&mut self, start: TileId, goal: TileId) -> TilePath {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            let Some(parent) = self.state(current).parent else {
                break;
            };
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// One-off search on `graph` with a fresh [`PathFinder`].
#[must_use]
pub fn find_path(
    graph: &NavGraph,
    start: TileId,
    goal: TileId,
    cost_model: EdgeCostModel,
) -> TilePath {
    PathFinder::new().find(graph, start, goal, cost_model)
}

/// Snapshots `tiles` and searches it.
#[must_use]
pub fn find_tile_path(
    tiles: &TileSet,
    start: TileId,
    goal: TileId,
    cost_model: EdgeCostModel,
) -> TilePath {
    find_path(&NavGraph::snapshot(tiles), start, goal, cost_model)
}

/// Total great-circle length of a path in radians.
#[must_use]
pub fn path_length(graph: &NavGraph, path: &[TileId]) -> f32 {
    path.windows(2)
        .filter_map(|w| Some((graph.node(w[0])?, graph.node(w[1])?)))
        .map(|(a, b)| angular_distance(a.position, b.position))
        .sum()
}
