//! Objects attached to a tile's face center.
//!
//! The tile set only records where an object sits and which way is up; the
//! object itself is owned by whoever handed out the handle.

use glam::Vec3;

use crate::tile::Tile;

/// Opaque caller-side identifier of a placed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// An object pinned to a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedObject {
    /// Caller-side identifier.
    pub handle: ObjectHandle,
    /// Planet-space position at the time of placement.
    pub position: Vec3,
    /// Orientation: the tile's up axis, toward the center on an inverted sphere.
    pub up: Vec3,
}

impl Tile {
    /// Pins `handle` at the current face center.
    pub fn place_object(&mut self, handle: ObjectHandle, planet_scale: f32) -> PlacedObject {
        let placed = PlacedObject {
            handle,
            position: self.face_center(planet_scale),
            up: self.frame.up,
        };
        self.placed_objects.push(placed);
        placed
    }

    /// Detaches the most recently placed object.
    pub fn delete_last_placed_object(&mut self) -> Option<PlacedObject> {
        self.placed_objects.pop()
    }

    /// Detaches every placed object, most recent first.
    pub fn delete_placed_objects(&mut self) -> Vec<PlacedObject> {
        let mut removed = std::mem::take(&mut self.placed_objects);
        removed.reverse();
        removed
    }
}
