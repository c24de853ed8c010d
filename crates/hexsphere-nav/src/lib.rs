//! Pathfinding over a hexsphere's tile graph.
//!
//! A* with great-circle step costs, an indexed min-heap for the open set,
//! and background search on graph snapshots.

mod async_path;
mod graph;
mod heap;
mod pathfinder;

pub use async_path::{PathRequest, PathResult, PathTask, PathfindingPipeline, find_path_async};
pub use graph::{NavGraph, NavNode};
pub use heap::{IndexedHeap, NavCost};
pub use pathfinder::{
    PathFinder, TilePath, angular_distance, find_path, find_tile_path, path_length,
};
