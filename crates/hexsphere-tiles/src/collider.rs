//! Collision shapes derived from a tile's mesh.
//!
//! Shapes live in the tile's local space, like the mesh they come from.

use glam::Vec3;
use hexsphere_config::TileColliderType;

use crate::polygon::TileMesh;

/// Geometry of a tile collider.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShape {
    /// A copy of the render mesh.
    Mesh {
        /// Vertex positions.
        vertices: Vec<Vec3>,
        /// Triangle list.
        indices: Vec<u32>,
    },
    /// Bounding sphere centered on the mesh bounds.
    Sphere {
        /// Sphere center.
        center: Vec3,
        /// Distance to the farthest vertex.
        radius: f32,
    },
    /// Axis-aligned bounding box.
    Box {
        /// Minimum corner.
        min: Vec3,
        /// Maximum corner.
        max: Vec3,
    },
}

/// Collider attached to a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileCollider {
    /// Current shape.
    pub shape: ColliderShape,
}

impl TileCollider {
    /// Derives a collider of the given kind from `mesh`.
    #[must_use]
    pub fn from_mesh(kind: TileColliderType, mesh: &TileMesh) -> Self {
        let shape = match kind {
            TileColliderType::Mesh => ColliderShape::Mesh {
                vertices: mesh.vertices.clone(),
                indices: mesh.indices.clone(),
            },
            TileColliderType::Sphere => {
                let center = mesh.bounds_center();
                let radius = mesh
                    .vertices
                    .iter()
                    .map(|v| v.distance(center))
                    .fold(0.0, f32::max);
                ColliderShape::Sphere { center, radius }
            }
            TileColliderType::Box => {
                let (min, max) = mesh.bounds();
                ColliderShape::Box { min, max }
            }
        };
        Self { shape }
    }

    /// Which kind of shape this collider holds.
    #[must_use]
    pub fn kind(&self) -> TileColliderType {
        match self.shape {
            ColliderShape::Mesh { .. } => TileColliderType::Mesh,
            ColliderShape::Sphere { .. } => TileColliderType::Sphere,
            ColliderShape::Box { .. } => TileColliderType::Box,
        }
    }

    /// Rebuilds the shape from an edited mesh, keeping its kind.
    pub fn refresh(&mut self, mesh: &TileMesh) {
        *self = Self::from_mesh(self.kind(), mesh);
    }
}
