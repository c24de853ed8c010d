//! Error types for tile set construction, tile edits, and the sphere registry.

use hexsphere_geometry::TessellationError;

use crate::TileId;

/// Errors that abort a tile set build. No partial tile set is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// The geodesic mesh could not be produced.
    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    /// A vertex is not shared by five or six triangles, so it cannot bound a tile.
    #[error("vertex {vertex} is shared by {triangles} triangles, expected 5 or 6")]
    MalformedVertexGroup {
        /// Index of the offending vertex.
        vertex: u32,
        /// Number of triangles incident to it.
        triangles: usize,
    },

    /// A triangle has zero perimeter and no incenter.
    #[error("triangle {triangle} is degenerate")]
    DegenerateTriangle {
        /// Creation id of the triangle.
        triangle: u32,
    },

    /// The world scale must be finite and positive.
    #[error("invalid planet scale {0}")]
    InvalidScale(f32),
}

/// Errors raised by edits to a single tile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TileError {
    /// The tile mesh does not have the vertex count of a pentagon or hexagon.
    #[error("tile {tile} has an inconsistent polygon with {vertices} vertices")]
    InconsistentPolygon {
        /// The tile being edited.
        tile: TileId,
        /// Vertex count found in its mesh.
        vertices: usize,
    },

    /// The id does not belong to this tile set.
    #[error("unknown tile {0}")]
    UnknownTile(TileId),

    /// The sphere has no tiles yet.
    #[error("sphere has not been built")]
    NotBuilt,
}

/// Errors raised by the sphere registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A sphere with this name already exists.
    #[error("sphere with name '{0}' already exists")]
    DuplicateName(String),

    /// No sphere is registered under this name.
    #[error("no sphere named '{0}'")]
    UnknownSphere(String),
}
