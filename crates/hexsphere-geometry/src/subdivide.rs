//! One level of 4-way triangle subdivision.
//!
//! ```text
//!       i0
//!      /  \
//!    m02--m01
//!    / \  / \
//!  i2--m12--i1
//! ```

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Undirected edge key: the smaller endpoint index first.
type EdgeKey = (u32, u32);

fn edge_key(a: u32, b: u32) -> EdgeKey {
    (a.min(b), a.max(b))
}

/// Index of the midpoint of edge `(i0, i1)`, inserting it on first use.
fn midpoint_index(
    midpoints: &mut FxHashMap<EdgeKey, u32>,
    vertices: &mut Vec<Vec3>,
    i0: u32,
    i1: u32,
) -> u32 {
    *midpoints.entry(edge_key(i0, i1)).or_insert_with(|| {
        let midpoint = (vertices[i0 as usize] + vertices[i1 as usize]) * 0.5;
        vertices.push(midpoint);
        (vertices.len() - 1) as u32
    })
}

/// Splits every triangle in `indices` into four.
///
/// Each edge midpoint is appended to `vertices` exactly once, no matter how
/// many triangles share the edge or in which direction they traverse it.
/// When `remove_source_triangles` is false the original triangles are kept at
/// the front of the index buffer, ahead of their children.
pub fn subdivide(vertices: &mut Vec<Vec3>, indices: &mut Vec<u32>, remove_source_triangles: bool) {
    let mut midpoints = FxHashMap::default();
    let mut new_indices = Vec::with_capacity(indices.len() * 4);

    if !remove_source_triangles {
        new_indices.extend_from_slice(indices);
    }

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);

        let m01 = midpoint_index(&mut midpoints, vertices, i0, i1);
        let m12 = midpoint_index(&mut midpoints, vertices, i1, i2);
        let m02 = midpoint_index(&mut midpoints, vertices, i2, i0);

        new_indices.extend_from_slice(&[
            i0, m01, m02, //
            i1, m12, m01, //
            i2, m02, m12, //
            m02, m01, m12,
        ]);
    }

    *indices = new_indices;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::icosahedron;

    fn distinct_edges(indices: &[u32]) -> usize {
        let mut edges = HashSet::new();
        for tri in indices.chunks_exact(3) {
            edges.insert(edge_key(tri[0], tri[1]));
            edges.insert(edge_key(tri[1], tri[2]));
            edges.insert(edge_key(tri[2], tri[0]));
        }
        edges.len()
    }

    #[test]
    fn test_subdivide_quadruples_triangles() {
        let (mut vertices, mut indices) = icosahedron();
        for _ in 0..3 {
            let before = indices.len() / 3;
            subdivide(&mut vertices, &mut indices, true);
            assert_eq!(indices.len() / 3, before * 4);
        }
    }

    #[test]
    fn test_vertex_growth_equals_distinct_edges() {
        let (mut vertices, mut indices) = icosahedron();
        for _ in 0..3 {
            let edges = distinct_edges(&indices);
            let before = vertices.len();
            subdivide(&mut vertices, &mut indices, true);
            assert_eq!(vertices.len(), before + edges);
        }
    }

    #[test]
    fn test_shared_edges_produce_no_duplicate_vertices() {
        let (mut vertices, mut indices) = icosahedron();
        subdivide(&mut vertices, &mut indices, true);
        subdivide(&mut vertices, &mut indices, true);

        let unique: HashSet<[u32; 3]> = vertices
            .iter()
            .map(|v| [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
            .collect();
        assert_eq!(unique.len(), vertices.len());
    }

    #[test]
    fn test_keep_source_triangles() {
        let (mut vertices, mut indices) = icosahedron();
        let source = indices.clone();
        subdivide(&mut vertices, &mut indices, false);
        assert_eq!(indices.len(), source.len() * 5);
        assert_eq!(&indices[..source.len()], source.as_slice());
        assert_eq!(vertices.len(), 42);
    }

    #[test]
    fn test_center_triangle_uses_only_midpoints() {
        let (mut vertices, mut indices) = icosahedron();
        subdivide(&mut vertices, &mut indices, true);
        // Fourth child of each source triangle is the center one.
        for children in indices.chunks_exact(12) {
            assert!(children[9..12].iter().all(|&i| i >= 12));
        }
    }
}
