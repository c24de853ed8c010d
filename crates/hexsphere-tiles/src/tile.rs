//! The tile entity: one cell of the dual tiling.

use glam::Vec3;

use crate::collider::TileCollider;
use crate::placement::PlacedObject;
use crate::polygon::TileMesh;

/// Lowest path-cost weight a tile can carry.
pub const MIN_PATH_COST: u8 = 1;
/// Highest path-cost weight a tile can carry.
pub const MAX_PATH_COST: u8 = 100;

/// Stable identifier of a tile within its [`TileSet`](crate::TileSet).
///
/// Equal to the index of the geodesic-mesh vertex the tile was built around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Position of the tile in its tile set.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for TileId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hexagon or pentagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileShape {
    /// Five sides. Exactly twelve per sphere, one per icosahedron corner.
    Pentagon,
    /// Six sides.
    Hexagon,
}

impl TileShape {
    /// Classifies a polygon by its vertex count. Anything but six is a pentagon.
    #[must_use]
    pub fn from_sides(sides: usize) -> Self {
        if sides == 6 { Self::Hexagon } else { Self::Pentagon }
    }

    /// Number of polygon sides.
    #[must_use]
    pub const fn sides(self) -> usize {
        match self {
            Self::Pentagon => 5,
            Self::Hexagon => 6,
        }
    }
}

/// Orthonormal basis of a tile's local space, expressed in planet space.
///
/// `up` follows the sphere normal at the tile (or its opposite on inverted
/// spheres); `forward` points from the tile center toward its first polygon
/// vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileFrame {
    /// Local +X.
    pub right: Vec3,
    /// Local +Y.
    pub up: Vec3,
    /// Local +Z.
    pub forward: Vec3,
}

impl TileFrame {
    /// Builds a frame looking along `forward` with `up_hint` as the approximate up.
    ///
    /// `forward` is kept exactly; `up` is re-orthogonalized against it.
    #[must_use]
    pub fn look_rotation(forward: Vec3, up_hint: Vec3) -> Self {
        let forward = forward.normalize();
        let right = up_hint.cross(forward).normalize();
        let up = forward.cross(right);
        Self { right, up, forward }
    }

    /// Rotates a local-space direction into planet space.
    #[must_use]
    pub fn to_planet(&self, local: Vec3) -> Vec3 {
        self.right * local.x + self.up * local.y + self.forward * local.z
    }

    /// Rotates a planet-space direction into local space.
    #[must_use]
    pub fn to_local(&self, planet: Vec3) -> Vec3 {
        Vec3::new(
            planet.dot(self.right),
            planet.dot(self.up),
            planet.dot(self.forward),
        )
    }
}

/// Geographic coordinates in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLong {
    /// +90 at the planet's +Y pole, -90 at the -Y pole.
    pub latitude: f32,
    /// Signed angle about +Y from the tile's horizontal direction to +Z.
    pub longitude: f32,
}

/// One cell of the dual tiling.
///
/// Geometry is stored on the unit sphere; planet scale is applied by the
/// owning [`TileSet`](crate::TileSet) when world positions are requested.
#[derive(Clone, Debug)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) shape: TileShape,
    pub(crate) center: Vec3,
    pub(crate) frame: TileFrame,
    pub(crate) inverted: bool,
    pub(crate) mesh: TileMesh,
    pub(crate) neighbors: Vec<TileId>,
    pub(crate) navigable: bool,
    pub(crate) path_cost: u8,
    pub(crate) extruded_height: f32,
    pub(crate) has_been_extruded: bool,
    pub(crate) face_center: Vec3,
    pub(crate) collider: Option<TileCollider>,
    pub(crate) placed_objects: Vec<PlacedObject>,
}

impl Tile {
    pub(crate) fn new(
        id: TileId,
        center: Vec3,
        frame: TileFrame,
        inverted: bool,
        mesh: TileMesh,
    ) -> Self {
        Self {
            id,
            shape: TileShape::from_sides(mesh.vertices.len()),
            center,
            frame,
            inverted,
            mesh,
            neighbors: Vec::new(),
            navigable: true,
            path_cost: MIN_PATH_COST,
            extruded_height: 0.0,
            has_been_extruded: false,
            face_center: center,
            collider: None,
            placed_objects: Vec::new(),
        }
    }

    /// This tile's id.
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Hexagon or pentagon.
    #[must_use]
    pub fn shape(&self) -> TileShape {
        self.shape
    }

    /// True for six-sided tiles.
    #[must_use]
    pub fn is_hexagon(&self) -> bool {
        self.shape == TileShape::Hexagon
    }

    /// Unit-scale center of the tile before any extrusion.
    ///
    /// This is the barycenter of the bounding incenters, so it sits slightly
    /// inside the unit sphere. Pathfinding uses its direction only.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Position used for great-circle distances. Independent of scale and height.
    #[must_use]
    pub fn nav_position(&self) -> Vec3 {
        self.center
    }

    /// Local orientation.
    #[must_use]
    pub fn frame(&self) -> &TileFrame {
        &self.frame
    }

    /// True when the tile's up axis faces the sphere center.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Local-space vertices of the top face, in clockwise order.
    #[must_use]
    pub fn polygon(&self) -> &[Vec3] {
        &self.mesh.vertices[..self.shape.sides()]
    }

    /// Full render mesh: the flat polygon, or cap plus side walls once extruded.
    #[must_use]
    pub fn mesh(&self) -> &TileMesh {
        &self.mesh
    }

    /// Tiles sharing at least one triangle with this one.
    #[must_use]
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    /// Whether the pathfinder may enter this tile.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.navigable
    }

    /// Path-cost weight in `1..=100`.
    #[must_use]
    pub fn path_cost(&self) -> u8 {
        self.path_cost
    }

    /// Cumulative extrusion height, in unit-sphere units.
    #[must_use]
    pub fn extruded_height(&self) -> f32 {
        self.extruded_height
    }

    /// True once side walls have been generated.
    #[must_use]
    pub fn has_been_extruded(&self) -> bool {
        self.has_been_extruded
    }

    /// Collision representation, if the tile set generates colliders.
    #[must_use]
    pub fn collider(&self) -> Option<&TileCollider> {
        self.collider.as_ref()
    }

    /// Objects attached at the face center.
    #[must_use]
    pub fn placed_objects(&self) -> &[PlacedObject] {
        &self.placed_objects
    }

    /// Center of the top face in planet space, accounting for extrusion.
    #[must_use]
    pub fn face_center(&self, planet_scale: f32) -> Vec3 {
        self.face_center * planet_scale
    }

    /// Converts a local-space vertex of this tile to planet space.
    #[must_use]
    pub fn local_to_planet(&self, local: Vec3, planet_scale: f32) -> Vec3 {
        (self.center + self.frame.to_planet(local)) * planet_scale
    }

    /// Latitude and longitude of the tile center.
    #[must_use]
    pub fn coordinates(&self) -> LatLong {
        let to_tile = self.center;
        let latitude = 90.0 - to_tile.angle_between(Vec3::Y).to_degrees();

        let horizontal = Vec3::new(to_tile.x, 0.0, to_tile.z);
        let longitude = if horizontal.length_squared() <= f32::EPSILON {
            0.0
        } else {
            let angle = horizontal.angle_between(Vec3::Z).to_degrees();
            if horizontal.cross(Vec3::Z).dot(Vec3::Y) < 0.0 {
                -angle
            } else {
                angle
            }
        };

        LatLong {
            latitude,
            longitude,
        }
    }

    /// Sets whether the pathfinder may enter this tile.
    pub fn set_navigable(&mut self, navigable: bool) {
        self.navigable = navigable;
    }

    /// Sets the path-cost weight, clamped to `1..=100`.
    pub fn set_path_cost(&mut self, cost: u8) {
        self.path_cost = cost.clamp(MIN_PATH_COST, MAX_PATH_COST);
    }

    /// Signed multiplier applied to heights along the up axis.
    pub(crate) fn height_sign(&self) -> f32 {
        if self.inverted { -1.0 } else { 1.0 }
    }

    pub(crate) fn refresh_face_center(&mut self) {
        self.face_center =
            self.center + self.frame.up * self.extruded_height * self.height_sign();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> TileFrame {
        TileFrame::look_rotation(Vec3::new(0.0, 0.2, 1.0), Vec3::Y)
    }

    #[test]
    fn test_look_rotation_is_orthonormal() {
        let f = frame();
        assert!((f.right.length() - 1.0).abs() < 1e-6);
        assert!((f.up.length() - 1.0).abs() < 1e-6);
        assert!(f.right.dot(f.up).abs() < 1e-6);
        assert!(f.up.dot(f.forward).abs() < 1e-6);
        assert!(f.forward.dot(f.right).abs() < 1e-6);
    }

    #[test]
    fn test_look_rotation_keeps_forward() {
        let f = frame();
        assert!((f.forward - Vec3::new(0.0, 0.2, 1.0).normalize()).length() < 1e-6);
        assert!(f.up.dot(Vec3::Y) > 0.9);
    }

    #[test]
    fn test_local_planet_roundtrip() {
        let f = frame();
        let v = Vec3::new(0.3, -0.7, 2.0);
        assert!((f.to_local(f.to_planet(v)) - v).length() < 1e-5);
    }

    #[test]
    fn test_shape_from_sides() {
        assert_eq!(TileShape::from_sides(6), TileShape::Hexagon);
        assert_eq!(TileShape::from_sides(5), TileShape::Pentagon);
        assert_eq!(TileShape::Hexagon.sides(), 6);
    }

    #[test]
    fn test_coordinates_of_poles_and_equator() {
        let mesh = TileMesh::default();
        let mut tile = Tile::new(TileId(0), Vec3::Y, frame(), false, mesh);
        tile.shape = TileShape::Hexagon;
        assert!((tile.coordinates().latitude - 90.0).abs() < 1e-3);
        assert_eq!(tile.coordinates().longitude, 0.0);

        tile.center = Vec3::Z;
        let c = tile.coordinates();
        assert!(c.latitude.abs() < 1e-3);
        assert!(c.longitude.abs() < 1e-3);

        tile.center = Vec3::X;
        assert!((tile.coordinates().longitude + 90.0).abs() < 1e-3);
        tile.center = -Vec3::X;
        assert!((tile.coordinates().longitude - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_path_cost_is_clamped() {
        let mut tile = Tile::new(TileId(3), Vec3::Z, frame(), false, TileMesh::default());
        tile.set_path_cost(0);
        assert_eq!(tile.path_cost(), MIN_PATH_COST);
        tile.set_path_cost(250);
        assert_eq!(tile.path_cost(), MAX_PATH_COST);
        tile.set_path_cost(37);
        assert_eq!(tile.path_cost(), 37);
    }

    #[test]
    fn test_tile_id_display_and_index() {
        assert_eq!(TileId(12).to_string(), "#12");
        assert_eq!(TileId::from(7usize).index(), 7);
    }
}
