//! A triangle view over the shared vertex/index buffers.

use glam::Vec3;

/// One triangle of a [`GeodesicMesh`](crate::GeodesicMesh), with its corner
/// positions copied out of the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTriangle {
    /// Creation order within the mesh. Only used for ordering and diagnostics.
    pub id: u32,
    /// Indices into the shared vertex buffer.
    pub indices: [u32; 3],
    /// Corner positions.
    pub vertices: [Vec3; 3],
}

impl MeshTriangle {
    /// Sum of the three edge lengths.
    #[must_use]
    pub fn perimeter(&self) -> f32 {
        let [a, b, c] = self.vertices;
        a.distance(b) + b.distance(c) + c.distance(a)
    }

    /// The point equidistant from all three sides.
    ///
    /// Each corner is weighted by the length of the side opposite it.
    /// Returns `None` for a degenerate triangle whose corners coincide.
    #[must_use]
    pub fn incenter(&self) -> Option<Vec3> {
        let perimeter = self.perimeter();
        if perimeter <= f32::EPSILON {
            return None;
        }
        let [a, b, c] = self.vertices;
        Some((a * c.distance(b) + b * a.distance(c) + c * a.distance(b)) / perimeter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroid(t: &MeshTriangle) -> Vec3 {
        t.vertices.iter().sum::<Vec3>() / 3.0
    }

    fn tri(a: Vec3, b: Vec3, c: Vec3) -> MeshTriangle {
        MeshTriangle {
            id: 0,
            indices: [0, 1, 2],
            vertices: [a, b, c],
        }
    }

    #[test]
    fn test_incenter_of_equilateral_is_centroid() {
        let t = tri(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 3f32.sqrt() / 2.0, 0.0),
        );
        let incenter = t.incenter().unwrap();
        assert!(incenter.distance(centroid(&t)) < 1e-6);
    }

    #[test]
    fn test_incenter_of_right_triangle() {
        // 3-4-5 triangle: inradius is 1, so the incenter sits at (1, 1).
        let t = tri(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        let incenter = t.incenter().unwrap();
        assert!(incenter.distance(Vec3::new(1.0, 1.0, 0.0)) < 1e-5);
        assert!(incenter.distance(centroid(&t)) > 0.1);
    }

    #[test]
    fn test_degenerate_triangle_has_no_incenter() {
        let p = Vec3::new(0.3, 0.2, 0.1);
        assert!(tri(p, p, p).incenter().is_none());
        assert_eq!(tri(p, p, p).perimeter(), 0.0);
    }

    #[test]
    fn test_perimeter_sums_edges() {
        let t = tri(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert!((t.perimeter() - 12.0).abs() < 1e-5);
    }
}
