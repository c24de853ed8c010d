//! Geodesic sphere tessellation: a fixed icosahedron, 4-way edge-midpoint
//! subdivision with shared-vertex deduplication, and per-triangle helpers.

mod geodesic;
mod icosahedron;
mod subdivide;
mod triangle;

pub use geodesic::{GeodesicMesh, MAX_DETAIL_LEVEL, TessellationError};
pub use icosahedron::{ICOSAHEDRON_INDICES, icosahedron};
pub use subdivide::subdivide;
pub use triangle::MeshTriangle;
