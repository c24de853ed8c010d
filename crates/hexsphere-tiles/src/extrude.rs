//! Vertical extrusion of a tile into a prism.
//!
//! The first extrusion turns the flat polygon into a raised cap plus one quad
//! per side. The mesh then has `5 * sides` vertices:
//!
//! ```text
//! [0, sides)                 cap (raised copies of the polygon)
//! [sides + 4k, sides + 4k+4) side k: base a, base b, rim a, rim b
//! ```
//!
//! Later extrusions only move the cap and rim vertices.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::collider::ColliderShape;
use crate::error::TileError;
use crate::polygon::fan_triangulate;
use crate::tile::{Tile, TileShape};

/// Vertices contributed by each side wall quad.
const VERTICES_PER_SIDE: usize = 4;

/// Fixed "unwrapped side strip plus cap" UV layout of an extruded tile.
///
/// Hexagons get 30 entries, pentagons 25: one per cap vertex followed by four
/// per side quad, with the side strip spanning the bottom 60% of the texture.
#[must_use]
pub fn extruded_uvs(shape: TileShape) -> Vec<Vec2> {
    let sides = shape.sides();
    let mut uvs = match shape {
        TileShape::Hexagon => vec![
            Vec2::new(0.293, 0.798),
            Vec2::new(0.397, 0.977),
            Vec2::new(0.604, 0.977),
            Vec2::new(0.707, 0.798),
            Vec2::new(0.604, 0.619),
            Vec2::new(0.397, 0.619),
        ],
        TileShape::Pentagon => vec![
            Vec2::new(0.389, 0.97),
            Vec2::new(0.611, 0.97),
            Vec2::new(0.68, 0.758),
            Vec2::new(0.5, 0.627),
            Vec2::new(0.32, 0.758),
        ],
    };
    uvs.reserve(sides * VERTICES_PER_SIDE);

    let strip_top = 0.6;
    let n = sides as f32;
    for k in 0..sides {
        let h = n - k as f32;
        uvs.push(Vec2::new(h / n, 0.0));
        uvs.push(Vec2::new((h - 1.0) / n, 0.0));
        uvs.push(Vec2::new(h / n, strip_top));
        uvs.push(Vec2::new((h - 1.0) / n, strip_top));
    }
    uvs
}

impl Tile {
    /// Raises (or lowers, for negative `height_delta`) the tile's top face.
    ///
    /// Vertices move radially away from the sphere center, so the tile reads
    /// as a prism standing on the surface. `height_delta` is cumulative and in
    /// unit-sphere units; world displacement is `height_delta * planet_scale`.
    pub fn extrude(&mut self, height_delta: f32) -> Result<(), TileError> {
        let sides = self.shape.sides();
        let expected = if self.has_been_extruded {
            sides + sides * VERTICES_PER_SIDE
        } else {
            sides
        };
        if self.mesh.vertices.len() != expected {
            return Err(TileError::InconsistentPolygon {
                tile: self.id,
                vertices: self.mesh.vertices.len(),
            });
        }

        if self.has_been_extruded {
            self.raise_cap(height_delta);
        } else {
            self.build_prism(height_delta);
        }

        self.extruded_height += height_delta;
        self.refresh_face_center();
        if let Some(collider) = &mut self.collider
            && matches!(collider.shape, ColliderShape::Mesh { .. })
        {
            collider.refresh(&self.mesh);
        }

        debug!(
            tile = %self.id,
            height = self.extruded_height,
            "extruded tile"
        );
        Ok(())
    }

    /// Extrudes by whatever delta brings the cumulative height to `height`.
    pub fn set_extrusion_height(&mut self, height: f32) -> Result<(), TileError> {
        self.extrude(height - self.extruded_height)
    }

    /// Local-space offset moving `local` radially by `height_delta`.
    fn radial_offset(&self, local: Vec3, height_delta: f32) -> Vec3 {
        let outward = (self.center + self.frame.to_planet(local)).normalize_or_zero();
        self.frame.to_local(outward * height_delta)
    }

    /// First extrusion: duplicate the polygon upward and stitch side walls.
    fn build_prism(&mut self, height_delta: f32) {
        let base = std::mem::take(&mut self.mesh.vertices);
        let sides = base.len();

        let cap: Vec<Vec3> = base
            .iter()
            .map(|&v| v + self.radial_offset(v, height_delta))
            .collect();

        let mut vertices = Vec::with_capacity(sides + sides * VERTICES_PER_SIDE);
        vertices.extend_from_slice(&cap);

        let mut indices = fan_triangulate(sides);
        for k in 0..sides {
            let next = (k + 1) % sides;
            let first = vertices.len() as u32;
            vertices.extend_from_slice(&[base[k], base[next], cap[k], cap[next]]);
            indices.extend_from_slice(&[
                first,
                first + 1,
                first + 2,
                first + 1,
                first + 3,
                first + 2,
            ]);
        }

        self.mesh.vertices = vertices;
        self.mesh.indices = indices;
        self.mesh.uvs = extruded_uvs(self.shape);
        self.has_been_extruded = true;
    }

    /// Later extrusions: move the cap and the top edge of every side quad.
    fn raise_cap(&mut self, height_delta: f32) {
        let sides = self.shape.sides();
        let rim = (0..sides).flat_map(|k| {
            let first = sides + k * VERTICES_PER_SIDE;
            [first + 2, first + 3]
        });

        let moved: Vec<usize> = (0..sides).chain(rim).collect();
        for i in moved {
            let v = self.mesh.vertices[i];
            self.mesh.vertices[i] = v + self.radial_offset(v, height_delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TileId, TileSet, TileSetOptions};
    use hexsphere_config::TileColliderType;

    fn sample_tiles() -> TileSet {
        TileSet::from_detail_level(2, &TileSetOptions::default()).unwrap()
    }

    fn tiles_with_collider(kind: TileColliderType) -> TileSet {
        let options = TileSetOptions {
            collider: Some(kind),
            ..TileSetOptions::default()
        };
        TileSet::from_detail_level(1, &options).unwrap()
    }

    fn assert_collider_matches_mesh(tile: &Tile) {
        match tile.collider().map(|c| &c.shape) {
            Some(ColliderShape::Mesh { vertices, indices }) => {
                assert_eq!(vertices, &tile.mesh().vertices);
                assert_eq!(indices, &tile.mesh().indices);
            }
            other => panic!("expected a mesh collider, got {other:?}"),
        }
    }

    fn radius_of(tile: &Tile, local: Vec3) -> f32 {
        tile.local_to_planet(local, 1.0).length()
    }

    #[test]
    fn test_first_extrusion_builds_prism() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        tile.extrude(0.1).unwrap();

        assert!(tile.has_been_extruded());
        assert_eq!(tile.mesh().vertices.len(), 30);
        assert_eq!(tile.mesh().uvs.len(), 30);
        // 4 cap triangles + 2 per side.
        assert_eq!(tile.mesh().triangle_count(), 4 + 12);
    }

    #[test]
    fn test_pentagon_prism_counts() {
        let mut tiles = sample_tiles();
        let id = tiles.pentagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        tile.extrude(0.1).unwrap();

        assert_eq!(tile.mesh().vertices.len(), 25);
        assert_eq!(tile.mesh().uvs.len(), 25);
        assert_eq!(tile.mesh().triangle_count(), 3 + 10);
    }

    #[test]
    fn test_cap_rises_by_delta() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        let radii = |t: &Tile| -> Vec<f32> { t.polygon().iter().map(|&v| radius_of(t, v)).collect() };
        let before = radii(tile);

        tile.extrude(0.25).unwrap();
        let after = radii(tile);
        for (b, a) in before.iter().zip(&after) {
            assert!((a - b - 0.25).abs() < 1e-4);
        }
    }

    #[test]
    fn test_side_walls_connect_base_to_rim() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        let base = tile.polygon().to_vec();
        tile.extrude(0.2).unwrap();

        let mesh = tile.mesh();
        for k in 0..6 {
            let first = 6 + k * 4;
            assert_eq!(mesh.vertices[first], base[k]);
            assert_eq!(mesh.vertices[first + 1], base[(k + 1) % 6]);
            assert_eq!(mesh.vertices[first + 2], mesh.vertices[k]);
            assert_eq!(mesh.vertices[first + 3], mesh.vertices[(k + 1) % 6]);
        }
    }

    #[test]
    fn test_later_extrusion_keeps_topology() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        tile.extrude(0.2).unwrap();
        let indices = tile.mesh().indices.clone();
        let uvs = tile.mesh().uvs.clone();
        let base: Vec<Vec3> = (0..6).map(|k| tile.mesh().vertices[6 + k * 4]).collect();

        tile.extrude(0.3).unwrap();
        assert_eq!(tile.mesh().indices, indices);
        assert_eq!(tile.mesh().uvs, uvs);
        // Base edge stays on the surface; rim follows the cap.
        for k in 0..6 {
            assert_eq!(tile.mesh().vertices[6 + k * 4], base[k]);
            assert_eq!(tile.mesh().vertices[6 + k * 4 + 2], tile.mesh().vertices[k]);
        }
        assert!((tile.extruded_height() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_extrude_up_then_down_restores_height() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().nth(3).unwrap();
        let tile = tiles.tile_mut(id);
        let start = tile.extruded_height();
        tile.extrude(5.0).unwrap();
        tile.extrude(-5.0).unwrap();
        assert!((tile.extruded_height() - start).abs() < 1e-6);
    }

    #[test]
    fn test_set_extrusion_height_is_absolute() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        tile.set_extrusion_height(0.4).unwrap();
        tile.set_extrusion_height(0.1).unwrap();
        assert!((tile.extruded_height() - 0.1).abs() < 1e-6);
        tile.set_extrusion_height(0.0).unwrap();
        assert_eq!(tile.extruded_height(), 0.0);
    }

    #[test]
    fn test_face_center_follows_height() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        let flat = tile.face_center(2.0);
        tile.extrude(0.5).unwrap();
        let raised = tile.face_center(2.0);
        assert!((raised.length() - flat.length() - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_inconsistent_polygon_rejected() {
        let mut tiles = sample_tiles();
        let id = tiles.hexagons().next().unwrap();
        let tile = tiles.tile_mut(id);
        tile.mesh.vertices.pop();
        assert_eq!(
            tile.extrude(0.1),
            Err(TileError::InconsistentPolygon {
                tile: id,
                vertices: 5
            })
        );
        assert_eq!(tile.extruded_height(), 0.0);
    }

    #[test]
    fn test_extruded_uv_layout() {
        let hex = extruded_uvs(TileShape::Hexagon);
        let pent = extruded_uvs(TileShape::Pentagon);
        assert_eq!(hex.len(), 30);
        assert_eq!(pent.len(), 25);
        assert_eq!(hex[6], Vec2::new(1.0, 0.0));
        assert_eq!(hex[29], Vec2::new(0.0, 0.6));
        assert_eq!(pent[5], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_mesh_collider_tracks_extrusion() {
        let mut tiles = tiles_with_collider(TileColliderType::Mesh);
        let tile = tiles.tile_mut(TileId(20));
        assert_collider_matches_mesh(tile);

        tile.extrude(0.2).unwrap();
        assert_eq!(tile.mesh().vertices.len(), 30);
        assert_collider_matches_mesh(tile);

        tile.extrude(0.2).unwrap();
        assert_collider_matches_mesh(tile);
    }

    #[test]
    fn test_bounding_colliders_untouched_by_extrusion() {
        for kind in [TileColliderType::Box, TileColliderType::Sphere] {
            let mut tiles = tiles_with_collider(kind);
            let tile = tiles.tile_mut(TileId(20));
            let before = tile.collider().cloned();
            assert!(before.is_some());

            tile.extrude(0.2).unwrap();
            tile.extrude(0.2).unwrap();
            assert_eq!(tile.collider().cloned(), before);
        }
    }
}
