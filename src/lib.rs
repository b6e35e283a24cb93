//! # BMesh
//!
//! An editable polygon mesh kernel for procedural modeling.
//!
//! Meshes are made of vertices, edges, loops (face corners) and faces, tied
//! together by circular lists so that adjacency queries and local edits stay
//! cheap. Every element kind carries a map of typed attributes driven by a
//! per-kind schema.
//!
//! ## Features
//!
//! - **N-gon topology**: faces of any size, non-manifold edges, wire edges and loose vertices
//! - **Local edits**: add and remove vertices, edges, faces and loops while keeping all cycles consistent
//! - **Typed attributes**: integer and float vectors with defaults, per element kind
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Export**: indexed triangle buffers for rendering
//!
//! ## Quick Start
//!
//! ```
//! use bmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let mut mesh: BMesh = BMesh::new();
//! mesh.add_vertex_attribute("uv", AttributeBaseType::Float, 2);
//!
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
//! let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! let quad = mesh.add_quad(a, b, c, d);
//!
//! assert_eq!(mesh.num_edges(), 4);
//! assert_eq!(mesh.face_vertices(quad).collect::<Vec<_>>(), vec![a, b, c, d]);
//!
//! // Removing an edge takes the faces using it along
//! let ab = mesh.find_edge(a, b).unwrap();
//! mesh.remove_edge(ab);
//! assert_eq!(mesh.num_faces(), 0);
//! assert_eq!(mesh.num_edges(), 3);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use bmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let faces = vec![[0, 1, 2]];
//! # let mesh: BMesh = build_from_triangles(&vertices, &faces).unwrap();
//! // Edges around a vertex
//! let v = VertexId::new(0);
//! for e in mesh.vertex_edges(v) {
//!     println!("Edge {:?} leads to {:?}", e, mesh.edge(e).other_vertex(v));
//! }
//!
//! // Faces using an edge
//! let e = mesh.vertex(v).edge;
//! for f in mesh.edge_faces(e) {
//!     println!("Adjacent face: {:?}", f);
//! }
//!
//! // Corners of a face
//! let f = FaceId::new(0);
//! let corners: Vec<_> = mesh.face_vertices(f).collect();
//! assert_eq!(corners.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod error;
pub mod export;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use bmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attribute::{
        AttributeBaseType, AttributeDefinition, AttributeType, AttributeValue, ElementKind,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::export::{export_triangles, ExportOptions, TriangleBuffers};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex, BMesh, Edge,
        EdgeId, Face, FaceId, Loop, LoopId, MeshIndex, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mesh: BMesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 6);
        // One loop per face corner
        assert_eq!(mesh.num_loops(), 12);
        assert!(mesh.is_valid());

        // Closed mesh: every edge has exactly two faces
        for e in mesh.edge_ids() {
            assert_eq!(mesh.edge_faces(e).count(), 2, "edge {:?} should have two faces", e);
        }
        for v in mesh.vertex_ids() {
            assert_eq!(mesh.vertex_degree(v), 3);
            assert_eq!(mesh.vertex_faces(v).len(), 3);
        }
    }
}
