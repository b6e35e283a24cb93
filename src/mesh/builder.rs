//! Mesh construction utilities.
//!
//! This module provides functions for building meshes from face-vertex lists
//! as commonly found in mesh file formats and procedural generators, and for
//! going back to that representation.
//!
//! Unlike [`BMesh::add_face`], which treats bad input as a programming error,
//! the builders validate their input and report problems as [`MeshError`]s.

use nalgebra::Point3;

use super::bmesh::BMesh;
use super::index::{MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a mesh from vertices and triangle faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of triangle faces, each as [v0, v1, v2] indices
///
/// # Returns
/// A mesh, or an error if the input is invalid.
///
/// # Example
/// ```
/// use bmesh::mesh::{build_from_triangles, BMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: BMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_edges(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<BMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a mesh from vertices and quad faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of quad faces, each as [v0, v1, v2, v3] indices (counter-clockwise)
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<BMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a mesh from vertices and faces of any size.
///
/// Each face needs at least three distinct, in-range vertex indices.
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<BMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate vertex indices
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        for &vi in face {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        // Check for degenerate faces
        if face.len() < 3 || has_duplicates(face) {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    let mut mesh = BMesh::with_capacity(vertices.len(), faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices
        .iter()
        .map(|&pos| mesh.add_vertex(pos))
        .collect();

    let mut face_vertices = Vec::new();
    for face in faces {
        face_vertices.clear();
        face_vertices.extend(face.as_ref().iter().map(|&vi| vertex_ids[vi]));
        mesh.add_face(&face_vertices);
    }

    Ok(mesh)
}

fn has_duplicates(face: &[usize]) -> bool {
    face.iter()
        .enumerate()
        .any(|(i, v)| face[i + 1..].contains(v))
}

/// Convert a mesh back to a face-vertex representation.
///
/// Vertices are numbered densely in iteration order. Returns (vertices, faces).
pub fn to_face_vertex<I: MeshIndex>(mesh: &BMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let mut dense = vec![usize::MAX; mesh.vertices.slot_count()];
    let mut vertices = Vec::with_capacity(mesh.num_vertices());
    for (vid, v) in mesh.vertices() {
        dense[vid.index()] = vertices.len();
        vertices.push(v.position);
    }

    let faces = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| dense[v.index()]).collect())
        .collect();

    (vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2]];
        (vertices, faces)
    }

    fn two_triangles() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        // Two triangles sharing an edge
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3]];
        (vertices, faces)
    }

    #[test]
    fn test_single_triangle() {
        let (vertices, faces) = single_triangle();
        let mesh: BMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_loops(), 3);
        assert!(mesh.is_valid());

        // Every edge is used by exactly one face
        for e in mesh.edge_ids() {
            assert_eq!(mesh.edge_loops(e).count(), 1);
        }
    }

    #[test]
    fn test_two_triangles() {
        let (vertices, faces) = two_triangles();
        let mesh: BMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        // Five edges, the shared one used twice
        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_loops(), 6);
        assert!(mesh.is_valid());

        let shared = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert_eq!(mesh.edge_loops(shared).count(), 2);
    }

    #[test]
    fn test_roundtrip() {
        let (vertices, faces) = two_triangles();
        let mesh: BMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        let (out_verts, out_faces) = to_face_vertex(&mesh);

        assert_eq!(vertices.len(), out_verts.len());
        assert_eq!(faces.len(), out_faces.len());

        // Positions should match
        for (v_in, v_out) in vertices.iter().zip(out_verts.iter()) {
            assert!((v_in - v_out).norm() < 1e-10);
        }
        // Faces come back in the order and winding they were given
        for (f_in, f_out) in faces.iter().zip(out_faces.iter()) {
            assert_eq!(&f_in[..], &f_out[..]);
        }
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let faces = vec![[0, 1, 2]]; // Indices 1 and 2 are invalid

        let result: Result<BMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert_eq!(
            result.unwrap_err(),
            MeshError::InvalidVertexIndex { face: 0, vertex: 1 }
        );
    }

    #[test]
    fn test_degenerate_face() {
        let (vertices, _) = single_triangle();
        let faces = vec![[0, 0, 2]]; // Degenerate: v0 == v1

        let result: Result<BMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });
    }

    #[test]
    fn test_empty_input() {
        let (vertices, _) = single_triangle();
        let faces: Vec<[usize; 3]> = Vec::new();
        let result: Result<BMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::EmptyMesh);
    }

    // ==================== Quad Tests ====================

    fn single_quad() -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
        // A simple planar quad
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3]];
        (vertices, faces)
    }

    fn two_quads() -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
        // Two quads sharing an edge (1-2)
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3], [1, 4, 5, 2]];
        (vertices, faces)
    }

    #[test]
    fn test_build_from_quads_single_quad() {
        let (vertices, faces) = single_quad();
        let mesh: BMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_loops(), 4);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert_eq!(mesh.vertex_degree(v), 2);
        }
    }

    #[test]
    fn test_build_from_quads_two_quads() {
        let (vertices, faces) = two_quads();
        let mesh: BMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        // 8 face sides, one of them shared
        assert_eq!(mesh.num_edges(), 7);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_roundtrip_quads() {
        let (vertices, faces) = two_quads();
        let mesh: BMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        let (out_verts, out_faces) = to_face_vertex(&mesh);

        assert_eq!(vertices.len(), out_verts.len());
        assert_eq!(faces.len(), out_faces.len());
        assert!(out_faces.iter().all(|f| f.len() == 4));
    }

    #[test]
    fn test_quad_degenerate_face() {
        let (vertices, _) = single_quad();
        // Degenerate: v0 == v2 (diagonal vertices the same)
        let faces = vec![[0, 1, 0, 3]];

        let result: Result<BMesh<u32>> = build_from_quads(&vertices, &faces);
        assert!(result.is_err());
    }

    #[test]
    fn test_quad_geometry() {
        let (vertices, faces) = single_quad();
        let mesh: BMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        let f = mesh.face_ids().next().unwrap();
        assert_eq!(mesh.face(f).vertcount, 4);

        // Check centroid (should be at (0.5, 0.5, 0))
        let centroid = mesh.face_center(f);
        assert!((centroid.x - 0.5).abs() < 1e-10);
        assert!((centroid.y - 0.5).abs() < 1e-10);
        assert!(centroid.z.abs() < 1e-10);
    }

    #[test]
    fn test_polygons() {
        // A pentagon with a triangle on one side
        let vertices: Vec<_> = (0..6)
            .map(|i| Point3::new(i as f64, (i % 2) as f64, 0.0))
            .collect();
        let faces = vec![vec![0, 1, 2, 3, 4], vec![4, 3, 5]];
        let mesh: BMesh<u16> = build_from_polygons(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 7);
        assert_eq!(mesh.num_loops(), 8);
        assert!(mesh.is_valid());

        let too_small = vec![vec![0, 1]];
        let result: Result<BMesh<u16>> = build_from_polygons(&vertices, &too_small);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });
    }
}
