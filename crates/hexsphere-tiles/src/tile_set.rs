//! The collection of tiles making up one sphere.

use glam::Vec3;
use hexsphere_geometry::GeodesicMesh;
use tracing::info;

use crate::builder::{TileSetOptions, build_tiles};
use crate::error::{BuildError, TileError};
use crate::placement::{ObjectHandle, PlacedObject};
use crate::tile::{Tile, TileId, TileShape};

/// One planet-space mesh covering every tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions, scaled to world size.
    pub positions: Vec<Vec3>,
    /// Per-vertex normal: the owning tile's up axis.
    pub normals: Vec<Vec3>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// All tiles of one sphere plus its world scale.
///
/// Tiles are indexed by [`TileId`], which equals the geodesic vertex index
/// the tile was built around.
#[derive(Clone, Debug)]
pub struct TileSet {
    tiles: Vec<Tile>,
    scale: f32,
}

fn check_scale(scale: f32) -> Result<f32, BuildError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(BuildError::InvalidScale(scale))
    }
}

impl TileSet {
    /// Builds the dual tiling of `mesh`.
    pub fn build(mesh: &GeodesicMesh, options: &TileSetOptions) -> Result<Self, BuildError> {
        let scale = check_scale(options.scale)?;
        let tiles = build_tiles(mesh, options)?;
        let set = Self { tiles, scale };

        info!(
            tiles = set.len(),
            pentagons = set.pentagon_count(),
            triangles = mesh.triangle_count(),
            scale,
            inverted = options.invert,
            "built tile set"
        );
        Ok(set)
    }

    /// Tessellates a geodesic sphere at `detail_level` and builds its tiles.
    pub fn from_detail_level(detail_level: u8, options: &TileSetOptions) -> Result<Self, BuildError> {
        let mesh = GeodesicMesh::build(detail_level)?;
        Self::build(&mesh, options)
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if there are no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Looks up a tile.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Looks up a tile for editing.
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    /// Looks up a tile.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this set.
    #[must_use]
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Looks up a tile for editing.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this set.
    pub fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    fn try_tile_mut(&mut self, id: TileId) -> Result<&mut Tile, TileError> {
        self.tiles
            .get_mut(id.index())
            .ok_or(TileError::UnknownTile(id))
    }

    /// Iterates over all tiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterates over all tile ids.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + use<> {
        (0..self.tiles.len()).map(TileId::from)
    }

    /// Neighbors of `id`, or an empty slice for an unknown id.
    #[must_use]
    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        self.get(id).map(Tile::neighbors).unwrap_or_default()
    }

    /// Ids of the six-sided tiles.
    pub fn hexagons(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids_of(TileShape::Hexagon)
    }

    /// Ids of the five-sided tiles.
    pub fn pentagons(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids_of(TileShape::Pentagon)
    }

    fn ids_of(&self, shape: TileShape) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .filter(move |t| t.shape() == shape)
            .map(Tile::id)
    }

    /// Number of pentagons. Twelve on any closed sphere.
    #[must_use]
    pub fn pentagon_count(&self) -> usize {
        self.pentagons().count()
    }

    /// World scale applied to unit-sphere geometry.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Changes the world scale. Navigation positions are unaffected.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), BuildError> {
        self.scale = check_scale(scale)?;
        Ok(())
    }

    /// Extrusion-aware planet-space center of a tile's top face.
    pub fn face_center(&self, id: TileId) -> Result<Vec3, TileError> {
        self.get(id)
            .map(|t| t.face_center(self.scale))
            .ok_or(TileError::UnknownTile(id))
    }

    /// Marks every tile navigable again.
    pub fn reset_navigation(&mut self) {
        for tile in &mut self.tiles {
            tile.set_navigable(true);
        }
    }

    /// Extrudes one tile by `height_delta`. See [`Tile::extrude`].
    pub fn extrude(&mut self, id: TileId, height_delta: f32) -> Result<(), TileError> {
        self.try_tile_mut(id)?.extrude(height_delta)
    }

    /// Sets one tile's cumulative extrusion height.
    pub fn set_extrusion_height(&mut self, id: TileId, height: f32) -> Result<(), TileError> {
        self.try_tile_mut(id)?.set_extrusion_height(height)
    }

    /// Sets whether the pathfinder may enter a tile.
    pub fn set_navigable(&mut self, id: TileId, navigable: bool) -> Result<(), TileError> {
        self.try_tile_mut(id)?.set_navigable(navigable);
        Ok(())
    }

    /// Sets a tile's path-cost weight, clamped to `1..=100`.
    pub fn set_path_cost(&mut self, id: TileId, cost: u8) -> Result<(), TileError> {
        self.try_tile_mut(id)?.set_path_cost(cost);
        Ok(())
    }

    /// Pins an object at a tile's face center.
    pub fn place_object(
        &mut self,
        id: TileId,
        handle: ObjectHandle,
    ) -> Result<PlacedObject, TileError> {
        let scale = self.scale;
        Ok(self.try_tile_mut(id)?.place_object(handle, scale))
    }

    /// Merges every tile mesh into one planet-space mesh.
    ///
    /// Each vertex takes its tile's up axis as normal, so normals agree with
    /// the triangle winding and face the center on an inverted sphere.
    #[must_use]
    pub fn combined_mesh(&self) -> SphereMesh {
        let vertex_count: usize = self.tiles.iter().map(|t| t.mesh().vertices.len()).sum();
        let index_count: usize = self.tiles.iter().map(|t| t.mesh().indices.len()).sum();
        let mut out = SphereMesh {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        };

        for tile in &self.tiles {
            let base = out.positions.len() as u32;
            let mesh = tile.mesh();
            out.positions.extend(
                mesh.vertices
                    .iter()
                    .map(|&v| tile.local_to_planet(v, self.scale)),
            );
            out.normals
                .extend(std::iter::repeat_n(tile.frame().up, mesh.vertices.len()));
            out.indices.extend(mesh.indices.iter().map(|i| base + i));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexsphere_geometry::{MAX_DETAIL_LEVEL, TessellationError};

    fn tiles_at(level: u8) -> TileSet {
        TileSet::from_detail_level(level, &TileSetOptions::default()).unwrap()
    }

    #[test]
    fn test_tile_count_matches_vertices() {
        for level in 0..=3u8 {
            let mesh = GeodesicMesh::build(level).unwrap();
            let tiles = TileSet::build(&mesh, &TileSetOptions::default()).unwrap();
            assert_eq!(tiles.len(), mesh.vertices.len());
            assert_eq!(tiles.pentagon_count(), 12);
            assert_eq!(tiles.hexagons().count(), tiles.len() - 12);
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let tiles = tiles_at(3);
        for tile in tiles.iter() {
            for &n in tile.neighbors() {
                assert!(
                    tiles.neighbors(n).contains(&tile.id()),
                    "{} lists {} but not the reverse",
                    tile.id(),
                    n
                );
            }
        }
    }

    #[test]
    fn test_pentagons_are_icosahedron_corners() {
        let tiles = tiles_at(2);
        let ids: Vec<TileId> = tiles.pentagons().collect();
        assert_eq!(ids, (0..12).map(TileId).collect::<Vec<_>>());
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = tiles_at(2);
        let b = tiles_at(2);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.neighbors(), y.neighbors());
            assert_eq!(x.polygon(), y.polygon());
            assert_eq!(x.center(), y.center());
        }
    }

    #[test]
    fn test_detail_level_above_max_rejected() {
        let err = TileSet::from_detail_level(MAX_DETAIL_LEVEL + 1, &TileSetOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::Tessellation(TessellationError::DetailLevelOutOfRange {
                requested: 6,
                max: 5
            })
        );
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let opts = TileSetOptions {
            scale: 0.0,
            ..TileSetOptions::default()
        };
        assert_eq!(
            TileSet::from_detail_level(1, &opts).unwrap_err(),
            BuildError::InvalidScale(0.0)
        );

        let mut tiles = tiles_at(0);
        assert!(tiles.set_scale(f32::NAN).is_err());
        tiles.set_scale(10.0).unwrap();
        assert_eq!(tiles.scale(), 10.0);
    }

    #[test]
    fn test_inverted_frames_face_inward() {
        let opts = TileSetOptions {
            invert: true,
            ..TileSetOptions::default()
        };
        let tiles = TileSet::from_detail_level(2, &opts).unwrap();
        for tile in tiles.iter() {
            assert!(tile.is_inverted());
            assert!(tile.frame().up.dot(tile.center()) < 0.0);
        }
    }

    #[test]
    fn test_world_vertices_lie_near_sphere() {
        let opts = TileSetOptions {
            scale: 5.0,
            ..TileSetOptions::default()
        };
        let tiles = TileSet::from_detail_level(3, &opts).unwrap();
        for tile in tiles.iter() {
            for &v in tile.polygon() {
                let r = tile.local_to_planet(v, tiles.scale()).length();
                assert!(r > 4.8 && r <= 5.0 + 1e-4, "radius {r}");
            }
        }
    }

    #[test]
    fn test_unknown_tile_edits_fail() {
        let mut tiles = tiles_at(0);
        let missing = TileId(12);
        assert_eq!(tiles.extrude(missing, 1.0), Err(TileError::UnknownTile(missing)));
        assert_eq!(
            tiles.set_navigable(missing, false),
            Err(TileError::UnknownTile(missing))
        );
        assert_eq!(tiles.face_center(missing), Err(TileError::UnknownTile(missing)));
        assert!(tiles.get(missing).is_none());
        assert!(tiles.neighbors(missing).is_empty());
    }

    #[test]
    fn test_reset_navigation() {
        let mut tiles = tiles_at(1);
        for id in [TileId(3), TileId(17), TileId(40)] {
            tiles.set_navigable(id, false).unwrap();
        }
        assert_eq!(tiles.iter().filter(|t| !t.is_navigable()).count(), 3);
        tiles.reset_navigation();
        assert!(tiles.iter().all(Tile::is_navigable));
    }

    #[test]
    fn test_set_path_cost_through_set() {
        let mut tiles = tiles_at(0);
        tiles.set_path_cost(TileId(2), 200).unwrap();
        assert_eq!(tiles.tile(TileId(2)).path_cost(), 100);
    }

    #[test]
    fn test_place_object_uses_world_scale() {
        let opts = TileSetOptions {
            scale: 2.0,
            ..TileSetOptions::default()
        };
        let mut tiles = TileSet::from_detail_level(1, &opts).unwrap();
        let placed = tiles.place_object(TileId(30), ObjectHandle(9)).unwrap();
        assert_eq!(placed.position, tiles.face_center(TileId(30)).unwrap());
        assert!((placed.position.length() - 2.0 * tiles.tile(TileId(30)).center().length()).abs() < 1e-5);
    }

    #[test]
    fn test_combined_mesh_covers_every_tile() {
        let mut tiles = tiles_at(2);
        tiles.extrude(TileId(50), 0.1).unwrap();
        let mesh = tiles.combined_mesh();

        let vertices: usize = tiles.iter().map(|t| t.mesh().vertices.len()).sum();
        let triangles: usize = tiles.iter().map(|t| t.mesh().triangle_count()).sum();
        assert_eq!(mesh.positions.len(), vertices);
        assert_eq!(mesh.normals.len(), vertices);
        assert_eq!(mesh.triangle_count(), triangles);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < vertices));
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(p.dot(*n) > 0.0);
        }
    }

    #[test]
    fn test_inverted_combined_mesh_faces_center() {
        for invert in [false, true] {
            let opts = TileSetOptions {
                invert,
                ..TileSetOptions::default()
            };
            let mesh = TileSet::from_detail_level(2, &opts).unwrap().combined_mesh();
            let sign = if invert { -1.0 } else { 1.0 };

            for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
                assert!(p.dot(*n) * sign > 0.0);
            }
            for tri in mesh.indices.chunks_exact(3) {
                let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
                let winding = (b - a).cross(c - a);
                assert!(winding.dot(mesh.normals[tri[0] as usize]) > 0.0);
            }
        }
    }
}
