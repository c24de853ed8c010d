//! Flat tile polygons: ordering, triangulation, and UVs.

use std::cmp::Ordering;

use glam::{Vec2, Vec3};

/// Mesh data for a single tile, in the tile's local space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileMesh {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// One texture coordinate per vertex.
    pub uvs: Vec<Vec2>,
}

impl TileMesh {
    /// A flat polygon: vertices sorted clockwise, fan triangles, circular UVs.
    #[must_use]
    pub fn flat(mut vertices: Vec<Vec3>) -> Self {
        sort_clockwise(&mut vertices, Vec3::ZERO);
        let indices = fan_triangulate(vertices.len());
        let uvs = circular_uvs(vertices.len());
        Self {
            vertices,
            indices,
            uvs,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Center of the axis-aligned bounds of the vertices.
    #[must_use]
    pub fn bounds_center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Axis-aligned bounds `(min, max)`. Zero-sized at the origin for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let Some(first) = self.vertices.first() else {
            return (Vec3::ZERO, Vec3::ZERO);
        };
        self.vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }
}

/// Orders two local-space points around `origin` by heading in the XZ plane.
///
/// Heading is `atan2(x, z)`; points with the same heading put the one closer
/// to `origin` first, which keeps collinear input stable.
#[must_use]
pub fn compare_clockwise(a: Vec3, b: Vec3, origin: Vec3) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let a_offset = a - origin;
    let b_offset = b - origin;

    let a_heading = a_offset.x.atan2(a_offset.z);
    let b_heading = b_offset.x.atan2(b_offset.z);

    a_heading.total_cmp(&b_heading).then_with(|| {
        if a_offset.length_squared() < b_offset.length_squared() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    })
}

/// Sorts local-space polygon vertices clockwise around `origin`.
///
/// The local up axis is +Y. After sorting, fan triangles built by
/// [`fan_triangulate`] all face +Y.
pub fn sort_clockwise(vertices: &mut [Vec3], origin: Vec3) {
    vertices.sort_by(|a, b| compare_clockwise(*a, *b, origin));
}

/// Triangle fan around vertex 0 of an `n`-gon.
#[must_use]
pub fn fan_triangulate(n: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(n.saturating_sub(2) * 3);
    for t in 1..n.saturating_sub(1) {
        indices.extend_from_slice(&[0, t as u32, t as u32 + 1]);
    }
    indices
}

/// UVs laying the `n` polygon vertices out on a circle in the unit square.
///
/// Vertex `i` sits at angle `360° * i / n + 90°`; the list is then reversed to
/// match the clockwise vertex order.
#[must_use]
pub fn circular_uvs(n: usize) -> Vec<Vec2> {
    let start = 90f32.to_radians();
    let mut uvs: Vec<Vec2> = (0..n)
        .map(|i| {
            let angle = std::f32::consts::TAU * (i as f32 / n as f32) + start;
            Vec2::new(angle.cos(), angle.sin()) / 2.0 + Vec2::splat(0.5)
        })
        .collect();
    uvs.reverse();
    uvs
}
