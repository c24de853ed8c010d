//! The base icosahedron.
//!
//! The vertex and index tables are fixed rather than derived so that every
//! subdivision level produces the same buffers bit for bit.

use glam::Vec3;

const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

const VERTICES: [Vec3; 12] = [
    Vec3::new(0.0, Z, X),
    Vec3::new(0.0, Z, -X),
    Vec3::new(Z, X, 0.0),
    Vec3::new(-Z, X, 0.0),
    Vec3::new(-X, 0.0, Z),
    Vec3::new(X, 0.0, Z),
    Vec3::new(-X, 0.0, -Z),
    Vec3::new(X, 0.0, -Z),
    Vec3::new(Z, -X, 0.0),
    Vec3::new(-Z, -X, 0.0),
    Vec3::new(0.0, -Z, X),
    Vec3::new(0.0, -Z, -X),
];

/// Triangle list of the base icosahedron, three indices per face.
pub const ICOSAHEDRON_INDICES: [u32; 60] = [
    4, 0, 5, //
    4, 3, 0, //
    3, 1, 0, //
    0, 1, 2, //
    0, 2, 5, //
    2, 8, 5, //
    2, 7, 8, //
    1, 7, 2, //
    1, 6, 7, //
    6, 11, 7, //
    11, 8, 7, //
    11, 10, 8, //
    11, 9, 10, //
    9, 4, 10, //
    4, 5, 10, //
    10, 5, 8, //
    3, 4, 9, //
    3, 9, 6, //
    3, 6, 1, //
    11, 6, 9, //
];

/// Returns the 12 vertices and 60 indices (20 triangles) of a unit icosahedron.
#[must_use]
pub fn icosahedron() -> (Vec<Vec3>, Vec<u32>) {
    (VERTICES.to_vec(), ICOSAHEDRON_INDICES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let (vertices, indices) = icosahedron();
        assert_eq!(vertices.len(), 12);
        assert_eq!(indices.len(), 60);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_icosahedron_vertices_on_unit_sphere() {
        let (vertices, _) = icosahedron();
        for v in vertices {
            assert!((v.length() - 1.0).abs() < 1e-5, "vertex {v} off the unit sphere");
        }
    }

    #[test]
    fn test_every_vertex_touches_five_faces() {
        let (_, indices) = icosahedron();
        let mut valence = [0u32; 12];
        for &i in &indices {
            valence[i as usize] += 1;
        }
        assert!(valence.iter().all(|&n| n == 5));
    }

    #[test]
    fn test_faces_wind_outward_consistently() {
        let (vertices, indices) = icosahedron();
        let outward: Vec<bool> = indices
            .chunks_exact(3)
            .map(|tri| {
                let a = vertices[tri[0] as usize];
                let b = vertices[tri[1] as usize];
                let c = vertices[tri[2] as usize];
                (b - a).cross(c - a).dot(a + b + c) > 0.0
            })
            .collect();
        assert!(outward.iter().all(|&o| o == outward[0]));
    }
}
