//! Geodesic polyhedron: the subdivided, renormalized icosahedron.

use glam::Vec3;
use tracing::debug;

use crate::{MeshTriangle, icosahedron, subdivide};

/// Deepest supported subdivision level. Each level roughly quadruples the
/// triangle count, so level 5 already yields 20,480 triangles.
pub const MAX_DETAIL_LEVEL: u8 = 5;

/// Errors raised while tessellating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TessellationError {
    /// The requested subdivision level exceeds [`MAX_DETAIL_LEVEL`].
    #[error("detail level {requested} exceeds the maximum of {max}")]
    DetailLevelOutOfRange {
        /// Level asked for.
        requested: u8,
        /// Highest accepted level.
        max: u8,
    },
}

/// Flat vertex/index buffers of a geodesic sphere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeodesicMesh {
    /// Shared vertex buffer.
    pub vertices: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl GeodesicMesh {
    /// The unsubdivided icosahedron.
    #[must_use]
    pub fn icosahedron() -> Self {
        let (vertices, indices) = icosahedron();
        Self { vertices, indices }
    }

    /// Builds a unit geodesic sphere at `detail_level`.
    ///
    /// The icosahedron is subdivided `detail_level` times (source triangles
    /// removed each time) and every vertex is then pushed out to unit length.
    pub fn build(detail_level: u8) -> Result<Self, TessellationError> {
        if detail_level > MAX_DETAIL_LEVEL {
            return Err(TessellationError::DetailLevelOutOfRange {
                requested: detail_level,
                max: MAX_DETAIL_LEVEL,
            });
        }

        let mut mesh = Self::icosahedron();
        for _ in 0..detail_level {
            mesh.subdivide(true);
        }
        mesh.normalize();

        debug!(
            detail_level,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "tessellated geodesic sphere"
        );
        Ok(mesh)
    }

    /// Applies one level of 4-way subdivision in place.
    pub fn subdivide(&mut self, remove_source_triangles: bool) {
        subdivide(
            &mut self.vertices,
            &mut self.indices,
            remove_source_triangles,
        );
    }

    /// Projects every vertex onto the unit sphere.
    pub fn normalize(&mut self) {
        for v in &mut self.vertices {
            *v = v.normalize();
        }
    }

    /// Number of triangles in the index buffer.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles in creation order.
    pub fn triangles(&self) -> impl Iterator<Item = MeshTriangle> + '_ {
        self.indices
            .chunks_exact(3)
            .enumerate()
            .map(|(id, tri)| MeshTriangle {
                id: id as u32,
                indices: [tri[0], tri[1], tri[2]],
                vertices: [
                    self.vertices[tri[0] as usize],
                    self.vertices[tri[1] as usize],
                    self.vertices[tri[2] as usize],
                ],
            })
    }
}
