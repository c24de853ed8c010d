//! Dual-tiling construction: one tile per geodesic vertex.
//!
//! Each vertex is surrounded by five or six triangles. The incenters of those
//! triangles form the tile polygon, expressed in a local frame whose up axis
//! is the sphere normal at the tile and whose forward axis points at the first
//! incenter. Two tiles are neighbors when their vertices share a triangle.

use glam::Vec3;
use hexsphere_config::{SphereConfig, TileColliderType};
use hexsphere_geometry::GeodesicMesh;

use crate::collider::TileCollider;
use crate::error::BuildError;
use crate::polygon::TileMesh;
use crate::tile::{Tile, TileFrame, TileId};

/// Knobs for building a [`TileSet`](crate::TileSet) from a geodesic mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSetOptions {
    /// Point tile up axes toward the sphere center.
    pub invert: bool,
    /// Uniform world scale. Must be finite and positive.
    pub scale: f32,
    /// Collider generated for every tile, if any.
    pub collider: Option<TileColliderType>,
}

impl Default for TileSetOptions {
    fn default() -> Self {
        Self {
            invert: false,
            scale: 1.0,
            collider: None,
        }
    }
}

impl From<&SphereConfig> for TileSetOptions {
    fn from(config: &SphereConfig) -> Self {
        Self {
            invert: config.invert,
            scale: config.planet_scale,
            collider: config
                .generate_colliders
                .then_some(config.collider_type),
        }
    }
}

/// Triangle ids incident to each vertex, in triangle creation order.
fn group_by_vertex(mesh: &GeodesicMesh) -> Vec<Vec<u32>> {
    let mut groups = vec![Vec::with_capacity(6); mesh.vertices.len()];
    for tri in mesh.triangles() {
        for vertex in tri.indices {
            groups[vertex as usize].push(tri.id);
        }
    }
    groups
}

/// Builds every tile with its polygon, frame, collider, and neighbor list.
pub(crate) fn build_tiles(
    mesh: &GeodesicMesh,
    options: &TileSetOptions,
) -> Result<Vec<Tile>, BuildError> {
    let incenters = mesh
        .triangles()
        .map(|tri| {
            tri.incenter()
                .ok_or(BuildError::DegenerateTriangle { triangle: tri.id })
        })
        .collect::<Result<Vec<Vec3>, _>>()?;

    let groups = group_by_vertex(mesh);
    let mut tiles = Vec::with_capacity(groups.len());

    for (vertex, group) in groups.iter().enumerate() {
        if !(5..=6).contains(&group.len()) {
            return Err(BuildError::MalformedVertexGroup {
                vertex: vertex as u32,
                triangles: group.len(),
            });
        }

        let corners: Vec<Vec3> = group.iter().map(|&t| incenters[t as usize]).collect();
        let sum: Vec3 = corners.iter().copied().sum();
        let barycenter = sum / corners.len() as f32;
        let up_hint = if options.invert { -sum } else { sum };
        let frame = TileFrame::look_rotation(corners[0] - barycenter, up_hint);

        let local = corners
            .iter()
            .map(|&p| frame.to_local(p - barycenter))
            .collect();

        let mut tile = Tile::new(
            TileId::from(vertex),
            barycenter,
            frame,
            options.invert,
            TileMesh::flat(local),
        );
        tile.neighbors = neighbors_of(vertex as u32, group, &mesh.indices);
        tile.collider = options
            .collider
            .map(|kind| TileCollider::from_mesh(kind, &tile.mesh));
        tiles.push(tile);
    }

    Ok(tiles)
}

/// Other vertices of the triangles around `vertex`, deduplicated in first-seen order.
fn neighbors_of(vertex: u32, group: &[u32], indices: &[u32]) -> Vec<TileId> {
    let mut neighbors = Vec::with_capacity(group.len());
    for &tri in group {
        let start = tri as usize * 3;
        for &other in &indices[start..start + 3] {
            let id = TileId(other);
            if other != vertex && !neighbors.contains(&id) {
                neighbors.push(id);
            }
        }
    }
    neighbors
}
