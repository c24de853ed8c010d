//! Read-only navigation snapshot of a tile set.

use glam::Vec3;
use hexsphere_tiles::{MAX_PATH_COST, MIN_PATH_COST, TileId, TileSet};

/// One tile as the pathfinder sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct NavNode {
    /// Unit-sphere direction of the tile center.
    pub position: Vec3,
    /// Adjacent tiles.
    pub neighbors: Vec<TileId>,
    /// Whether the tile may be entered.
    pub navigable: bool,
    /// Path-cost weight in `1..=100`.
    pub weight: u8,
}

impl NavNode {
    /// A navigable node with the lowest weight.
    #[must_use]
    pub fn new(position: Vec3, neighbors: Vec<TileId>) -> Self {
        Self {
            position: position.normalize_or_zero(),
            neighbors,
            navigable: true,
            weight: MIN_PATH_COST,
        }
    }
}

/// Adjacency, positions, and walkability copied out of a [`TileSet`].
///
/// Searches only read the graph, so one snapshot can be shared between
/// threads behind an `Arc` while the live tiles keep changing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavGraph {
    nodes: Vec<NavNode>,
}

impl NavGraph {
    /// Copies the navigation state of every tile.
    #[must_use]
    pub fn snapshot(tiles: &TileSet) -> Self {
        let nodes = tiles
            .iter()
            .map(|tile| NavNode {
                position: tile.nav_position().normalize_or_zero(),
                neighbors: tile.neighbors().to_vec(),
                navigable: tile.is_navigable(),
                weight: tile.path_cost(),
            })
            .collect();
        Self { nodes }
    }

    /// Wraps hand-built nodes. Node `i` is tile `TileId(i)`.
    #[must_use]
    pub fn from_nodes(nodes: Vec<NavNode>) -> Self {
        Self { nodes }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: TileId) -> Option<&NavNode> {
        self.nodes.get(id.index())
    }

    /// Whether `id` exists and may be entered.
    #[must_use]
    pub fn is_navigable(&self, id: TileId) -> bool {
        self.node(id).is_some_and(|n| n.navigable)
    }

    /// Blocks or unblocks a node. Unknown ids are ignored.
    pub fn set_navigable(&mut self, id: TileId, navigable: bool) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.navigable = navigable;
        }
    }

    /// Sets a node's weight, clamped like [`Tile::set_path_cost`](hexsphere_tiles::Tile::set_path_cost).
    pub fn set_weight(&mut self, id: TileId, weight: u8) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.weight = weight.clamp(MIN_PATH_COST, MAX_PATH_COST);
        }
    }

    pub(crate) fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }
}
