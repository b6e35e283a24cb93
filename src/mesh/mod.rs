//! Core mesh data structures.
//!
//! This module provides the editable polygon mesh and its element types.
//!
//! # Overview
//!
//! The primary type is [`BMesh`], which stores vertices, edges, loops and
//! faces in arenas and links them through three families of circular lists:
//!
//! - the **disk cycle** of a vertex links every edge touching it;
//! - the **radial cycle** of an edge links every loop using it, one per
//!   adjacent face;
//! - the **face cycle** of a face links its loops in winding order.
//!
//! Faces of any size are allowed, edges may have any number of faces, and
//! vertices or edges may stand alone.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an edge
//! - [`LoopId`] - Identifies a loop (a face corner)
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size. Ids are
//! never reused: removing an element leaves a hole behind.
//!
//! # Construction
//!
//! Meshes are built incrementally, or in one go from face-vertex lists:
//!
//! ```
//! use bmesh::mesh::{BMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: BMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_loops(), 3);
//! ```

mod attributes;
mod bmesh;
mod builder;
mod edit;
mod element;
mod index;
mod store;
mod validate;

pub use bmesh::{BMesh, DiskIter, FaceLoopIter, RadialIter};
pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex};
pub use element::{Edge, Face, Loop, Vertex};
pub use index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
