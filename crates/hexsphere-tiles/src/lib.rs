//! Dual tiling of a geodesic sphere: one hexagonal or pentagonal tile per
//! mesh vertex, their adjacency graph, and per-tile polygon editing
//! (clockwise ordering, UVs, fan triangulation, extrusion).

mod builder;
mod collider;
mod error;
mod events;
mod extrude;
mod placement;
mod polygon;
mod registry;
mod sphere;
mod tile;
mod tile_set;

pub use builder::TileSetOptions;
pub use collider::{ColliderShape, TileCollider};
pub use error::{BuildError, RegistryError, TileError};
pub use events::{TileEvent, TileEventBus};
pub use extrude::extruded_uvs;
pub use placement::{ObjectHandle, PlacedObject};
pub use polygon::{TileMesh, circular_uvs, compare_clockwise, fan_triangulate, sort_clockwise};
pub use registry::SphereRegistry;
pub use sphere::Hexsphere;
pub use tile::{LatLong, MAX_PATH_COST, MIN_PATH_COST, Tile, TileFrame, TileId, TileShape};
pub use tile_set::{SphereMesh, TileSet};
