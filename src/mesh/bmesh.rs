//! The mesh container.
//!
//! [`BMesh`] owns every vertex, edge, loop and face, plus one attribute schema
//! per element kind. Construction and destruction live in `edit.rs`,
//! attribute registration and access in `attributes.rs`. This file holds the
//! storage, accessors and read-only traversal.
//!
//! # Traversal
//!
//! All adjacency queries walk one of the three cycles and stop when the walk
//! returns to the entry element, so their cost is the local degree:
//!
//! - [`BMesh::vertex_edges`] walks the disk cycle of a vertex;
//! - [`BMesh::edge_loops`] walks the radial cycle of an edge;
//! - [`BMesh::face_loops`] walks the face cycle of a face.
//!
//! Walks assume the cycle is not modified while they run. The borrow checker
//! enforces this for the iterators returned here.

use std::collections::HashSet;
use std::fmt::Debug;

use nalgebra::Point3;

use super::element::{Edge, Face, Loop, Vertex};
use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
use super::store::ElementStore;
use crate::attribute::{AttributeSchema, ElementKind};

/// An editable polygon mesh with per-element attributes.
///
/// # Example
///
/// ```
/// use bmesh::prelude::*;
/// use nalgebra::Point3;
///
/// let mut mesh: BMesh = BMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
///
/// let f = mesh.add_triangle(a, b, c);
/// assert_eq!(mesh.num_edges(), 3);
/// assert_eq!(mesh.face_vertices(f).collect::<Vec<_>>(), vec![a, b, c]);
///
/// let ab = mesh.find_edge(a, b).unwrap();
/// assert_eq!(mesh.edge_faces(ab).collect::<Vec<_>>(), vec![f]);
/// ```
#[derive(Debug, Clone)]
pub struct BMesh<I: MeshIndex = u32> {
    pub(crate) vertices: ElementStore<Vertex<I>>,
    pub(crate) edges: ElementStore<Edge<I>>,
    pub(crate) loops: ElementStore<Loop<I>>,
    pub(crate) faces: ElementStore<Face<I>>,

    pub(crate) vertex_attributes: AttributeSchema,
    pub(crate) edge_attributes: AttributeSchema,
    pub(crate) loop_attributes: AttributeSchema,
    pub(crate) face_attributes: AttributeSchema,
}

impl<I: MeshIndex> Default for BMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cold]
#[inline(never)]
fn not_live(id: impl Debug) -> ! {
    panic!("{:?} is not a live element of this mesh", id)
}

impl<I: MeshIndex> BMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // Quad-dominant meshes have about as many faces as vertices and twice
        // as many edges; every face corner is a loop.
        Self {
            vertices: ElementStore::with_capacity(num_vertices),
            edges: ElementStore::with_capacity(num_faces * 2),
            loops: ElementStore::with_capacity(num_faces * 4),
            faces: ElementStore::with_capacity(num_faces),
            vertex_attributes: AttributeSchema::new(ElementKind::Vertex),
            edge_attributes: AttributeSchema::new(ElementKind::Edge),
            loop_attributes: AttributeSchema::new(ElementKind::Loop),
            face_attributes: AttributeSchema::new(ElementKind::Face),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of loops.
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether `v` names a vertex of this mesh.
    #[inline]
    pub fn contains_vertex(&self, v: VertexId<I>) -> bool {
        v.is_valid() && self.vertices.contains(v.index())
    }

    /// Whether `e` names a live edge of this mesh.
    #[inline]
    pub fn contains_edge(&self, e: EdgeId<I>) -> bool {
        e.is_valid() && self.edges.contains(e.index())
    }

    /// Whether `l` names a live loop of this mesh.
    #[inline]
    pub fn contains_loop(&self, l: LoopId<I>) -> bool {
        l.is_valid() && self.loops.contains(l.index())
    }

    /// Whether `f` names a live face of this mesh.
    #[inline]
    pub fn contains_face(&self, f: FaceId<I>) -> bool {
        f.is_valid() && self.faces.contains(f.index())
    }

    /// Get a vertex by ID.
    ///
    /// # Panics
    /// Panics if `id` does not name a vertex of this mesh.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        self.vertices.get(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a mutable vertex by ID.
    ///
    /// Rewiring `edge` by hand breaks the disk cycle; use the editing methods.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        self.vertices.get_mut(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get an edge by ID.
    ///
    /// # Panics
    /// Panics if `id` has been removed or never existed.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        self.edges.get(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a mutable edge by ID.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId<I>) -> &mut Edge<I> {
        self.edges.get_mut(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a loop by ID.
    ///
    /// # Panics
    /// Panics if `id` has been removed or never existed.
    #[inline]
    pub fn get_loop(&self, id: LoopId<I>) -> &Loop<I> {
        self.loops.get(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a mutable loop by ID.
    #[inline]
    pub fn get_loop_mut(&mut self, id: LoopId<I>) -> &mut Loop<I> {
        self.loops.get_mut(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a face by ID.
    ///
    /// # Panics
    /// Panics if `id` has been removed or never existed.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        self.faces.get(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        self.faces.get_mut(id.index()).unwrap_or_else(|| not_live(id))
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices.iter().map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices.iter().map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all live edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.edges.iter().map(|(i, _)| EdgeId::new(i))
    }

    /// Iterate over all live edges with their IDs.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId<I>, &Edge<I>)> + '_ {
        self.edges.iter().map(|(i, e)| (EdgeId::new(i), e))
    }

    /// Iterate over all live loop IDs.
    pub fn loop_ids(&self) -> impl Iterator<Item = LoopId<I>> + '_ {
        self.loops.iter().map(|(i, _)| LoopId::new(i))
    }

    /// Iterate over all live loops with their IDs.
    pub fn loops(&self) -> impl Iterator<Item = (LoopId<I>, &Loop<I>)> + '_ {
        self.loops.iter().map(|(i, l)| (LoopId::new(i), l))
    }

    /// Iterate over all live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces.iter().map(|(i, _)| FaceId::new(i))
    }

    /// Iterate over all live faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces.iter().map(|(i, f)| (FaceId::new(i), f))
    }

    // ==================== Topology Queries ====================

    /// Iterate over the edges around a vertex (its disk cycle).
    pub fn vertex_edges(&self, v: VertexId<I>) -> DiskIter<'_, I> {
        DiskIter::new(self, v)
    }

    /// Number of edges touching a vertex.
    pub fn vertex_degree(&self, v: VertexId<I>) -> usize {
        self.vertex_edges(v).count()
    }

    /// Iterate over the vertices sharing an edge with `v`.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_edges(v)
            .map(move |e| self.edge(e).other_vertex(v))
    }

    /// Faces touching a vertex, each listed once, in disk-cycle order.
    pub fn vertex_faces(&self, v: VertexId<I>) -> Vec<FaceId<I>> {
        let mut seen = HashSet::new();
        let mut faces = Vec::new();
        for e in self.vertex_edges(v) {
            for f in self.edge_faces(e) {
                if seen.insert(f) {
                    faces.push(f);
                }
            }
        }
        faces
    }

    /// Iterate over the loops using an edge (its radial cycle).
    pub fn edge_loops(&self, e: EdgeId<I>) -> RadialIter<'_, I> {
        RadialIter::new(self, e)
    }

    /// Iterate over the faces using an edge, one per loop.
    pub fn edge_faces(&self, e: EdgeId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.edge_loops(e).map(|l| self.get_loop(l).face)
    }

    /// Iterate over the loops of a face in winding order.
    pub fn face_loops(&self, f: FaceId<I>) -> FaceLoopIter<'_, I> {
        FaceLoopIter::new(self, f)
    }

    /// Iterate over the vertices of a face in winding order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_loops(f).map(|l| self.get_loop(l).vert)
    }

    /// Iterate over the edges of a face.
    ///
    /// The i-th edge joins the i-th and (i+1)-th vertex of
    /// [`face_vertices`](Self::face_vertices).
    pub fn face_edges(&self, f: FaceId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.face_loops(f).map(|l| self.get_loop(l).edge)
    }

    // ==================== Geometry ====================

    /// Compute the midpoint of an edge.
    pub fn edge_center(&self, e: EdgeId<I>) -> Point3<f64> {
        let edge = self.edge(e);
        let p0 = self.position(edge.vert1);
        let p1 = self.position(edge.vert2);
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    /// Compute the centroid of a face (mean of its vertex positions).
    pub fn face_center(&self, f: FaceId<I>) -> Point3<f64> {
        let mut sum = nalgebra::Vector3::zeros();
        let mut count = 0usize;
        for v in self.face_vertices(f) {
            sum += self.position(v).coords;
            count += 1;
        }
        Point3::from(sum / count.max(1) as f64)
    }

    /// Compute the bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut positions = self.vertices().map(|(_, v)| v.position);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }
}

/// Iterator over the disk cycle of a vertex.
pub struct DiskIter<'a, I: MeshIndex = u32> {
    mesh: &'a BMesh<I>,
    vertex: VertexId<I>,
    start: EdgeId<I>,
    current: EdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> DiskIter<'a, I> {
    fn new(mesh: &'a BMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).edge;
        Self {
            mesh,
            vertex: v,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for DiskIter<'a, I> {
    type Item = EdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.edge(self.current).next(self.vertex);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the radial cycle of an edge.
pub struct RadialIter<'a, I: MeshIndex = u32> {
    mesh: &'a BMesh<I>,
    start: LoopId<I>,
    current: LoopId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> RadialIter<'a, I> {
    fn new(mesh: &'a BMesh<I>, e: EdgeId<I>) -> Self {
        let start = mesh.edge(e).loop_id;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for RadialIter<'a, I> {
    type Item = LoopId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.get_loop(self.current).radial_next;

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the loops of a face.
pub struct FaceLoopIter<'a, I: MeshIndex = u32> {
    mesh: &'a BMesh<I>,
    start: LoopId<I>,
    current: LoopId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceLoopIter<'a, I> {
    fn new(mesh: &'a BMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).loop_id;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceLoopIter<'a, I> {
    type Item = LoopId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.get_loop(self.current).next;

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
