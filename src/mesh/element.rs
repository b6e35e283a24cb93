//! Mesh elements.
//!
//! Elements only refer to each other through indices into the owning
//! [`BMesh`](super::BMesh). Three circular doubly-linked lists are threaded
//! through them:
//!
//! - the **disk cycle** of a vertex: every edge touching it, linked through
//!   [`Edge::next`] / [`Edge::prev`];
//! - the **radial cycle** of an edge: every loop using it, linked through
//!   `radial_next` / `radial_prev`;
//! - the **face cycle** of a face: its loops in winding order, linked through
//!   `next` / `prev`.
//!
//! An element whose entry point into a cycle is invalid has no members in that
//! cycle (a vertex without edges, an edge without faces).

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
use crate::attribute::AttributeMap;

/// A vertex of the mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// Free-form id. The mesh never reads it; export overwrites it.
    pub id: usize,

    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Extra per-vertex data.
    pub attributes: AttributeMap,

    /// Any edge touching this vertex, entry point of its disk cycle.
    pub edge: EdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new, unconnected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            id: 0,
            position,
            attributes: AttributeMap::new(),
            edge: EdgeId::invalid(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Whether no edge touches this vertex.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        !self.edge.is_valid()
    }
}

/// An edge between two distinct vertices.
///
/// An edge sits in two disk cycles at once, one per endpoint. Which pair of
/// links to follow depends on the vertex the walk is centered on, so the links
/// are read through [`next`](Self::next) and [`prev`](Self::prev).
///
/// Edges are created by [`BMesh::add_edge`](super::BMesh::add_edge) or
/// [`BMesh::add_face`](super::BMesh::add_face), never on their own:
///
/// ```compile_fail
/// use bmesh::mesh::{Edge, VertexId};
///
/// let loose: Edge = Edge::new(VertexId::new(0), VertexId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct Edge<I: MeshIndex = u32> {
    /// Free-form id. The mesh never reads it.
    pub id: usize,

    /// Extra per-edge data.
    pub attributes: AttributeMap,

    /// First endpoint.
    pub vert1: VertexId<I>,

    /// Second endpoint.
    pub vert2: VertexId<I>,

    /// Next edge around `vert1`.
    pub next1: EdgeId<I>,

    /// Previous edge around `vert1`.
    pub prev1: EdgeId<I>,

    /// Next edge around `vert2`.
    pub next2: EdgeId<I>,

    /// Previous edge around `vert2`.
    pub prev2: EdgeId<I>,

    /// Any loop using this edge, entry point of its radial cycle.
    pub loop_id: LoopId<I>,
}

impl<I: MeshIndex> Edge<I> {
    /// Create an edge between `vert1` and `vert2` that is not linked into any cycle yet.
    pub(crate) fn new(vert1: VertexId<I>, vert2: VertexId<I>) -> Self {
        Self {
            id: 0,
            attributes: AttributeMap::new(),
            vert1,
            vert2,
            next1: EdgeId::invalid(),
            prev1: EdgeId::invalid(),
            next2: EdgeId::invalid(),
            prev2: EdgeId::invalid(),
            loop_id: LoopId::invalid(),
        }
    }

    /// Whether `v` is one of the endpoints.
    #[inline]
    pub fn contains_vertex(&self, v: VertexId<I>) -> bool {
        v == self.vert1 || v == self.vert2
    }

    /// The endpoint that is not `v`.
    #[inline]
    pub fn other_vertex(&self, v: VertexId<I>) -> VertexId<I> {
        debug_assert!(self.contains_vertex(v), "{:?} is not an endpoint", v);
        if v == self.vert1 {
            self.vert2
        } else {
            self.vert1
        }
    }

    /// The two endpoints.
    #[inline]
    pub fn vertices(&self) -> [VertexId<I>; 2] {
        [self.vert1, self.vert2]
    }

    /// Next edge in the disk cycle of `v`.
    #[inline]
    pub fn next(&self, v: VertexId<I>) -> EdgeId<I> {
        debug_assert!(self.contains_vertex(v), "{:?} is not an endpoint", v);
        if v == self.vert1 {
            self.next1
        } else {
            self.next2
        }
    }

    /// Previous edge in the disk cycle of `v`.
    #[inline]
    pub fn prev(&self, v: VertexId<I>) -> EdgeId<I> {
        debug_assert!(self.contains_vertex(v), "{:?} is not an endpoint", v);
        if v == self.vert1 {
            self.prev1
        } else {
            self.prev2
        }
    }

    /// Set the next edge in the disk cycle of `v`.
    #[inline]
    pub fn set_next(&mut self, v: VertexId<I>, other: EdgeId<I>) {
        debug_assert!(self.contains_vertex(v), "{:?} is not an endpoint", v);
        if v == self.vert1 {
            self.next1 = other;
        } else {
            self.next2 = other;
        }
    }

    /// Set the previous edge in the disk cycle of `v`.
    #[inline]
    pub fn set_prev(&mut self, v: VertexId<I>, other: EdgeId<I>) {
        debug_assert!(self.contains_vertex(v), "{:?} is not an endpoint", v);
        if v == self.vert1 {
            self.prev1 = other;
        } else {
            self.prev2 = other;
        }
    }

    /// Whether no face uses this edge.
    #[inline]
    pub fn is_wire(&self) -> bool {
        !self.loop_id.is_valid()
    }
}

/// One face's use of one edge, starting at one vertex.
///
/// Loops are created and destroyed by the mesh together with their face.
#[derive(Debug, Clone)]
pub struct Loop<I: MeshIndex = u32> {
    /// Extra per-corner data.
    pub attributes: AttributeMap,

    /// Vertex the loop starts at.
    pub vert: VertexId<I>,

    /// Edge from `vert` to the vertex of the next loop.
    pub edge: EdgeId<I>,

    /// Face owning this loop.
    pub face: FaceId<I>,

    /// Next loop around the face.
    pub next: LoopId<I>,

    /// Previous loop around the face.
    pub prev: LoopId<I>,

    /// Next loop around the edge.
    pub radial_next: LoopId<I>,

    /// Previous loop around the edge.
    pub radial_prev: LoopId<I>,
}

impl<I: MeshIndex> Loop<I> {
    pub(crate) fn new(vert: VertexId<I>, edge: EdgeId<I>, face: FaceId<I>) -> Self {
        Self {
            attributes: AttributeMap::new(),
            vert,
            edge,
            face,
            next: LoopId::invalid(),
            prev: LoopId::invalid(),
            radial_next: LoopId::invalid(),
            radial_prev: LoopId::invalid(),
        }
    }
}

/// A polygonal face.
#[derive(Debug, Clone)]
pub struct Face<I: MeshIndex = u32> {
    /// Free-form id. The mesh never reads it.
    pub id: usize,

    /// Extra per-face data.
    pub attributes: AttributeMap,

    /// Number of loops (and vertices) around the face.
    pub vertcount: usize,

    /// First loop of the face, entry point of its face cycle.
    pub loop_id: LoopId<I>,
}

impl<I: MeshIndex> Face<I> {
    pub(crate) fn new(vertcount: usize) -> Self {
        Self {
            id: 0,
            attributes: AttributeMap::new(),
            vertcount,
            loop_id: LoopId::invalid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(v.is_isolated());
        assert!(v.attributes.is_empty());
    }

    #[test]
    fn test_edge_links_follow_endpoint() {
        let a = VertexId::<u32>::new(0);
        let b = VertexId::<u32>::new(1);
        let mut e = Edge::new(a, b);

        e.set_next(a, EdgeId::new(10));
        e.set_prev(a, EdgeId::new(11));
        e.set_next(b, EdgeId::new(20));
        e.set_prev(b, EdgeId::new(21));

        assert_eq!(e.next1, EdgeId::new(10));
        assert_eq!(e.prev1, EdgeId::new(11));
        assert_eq!(e.next(b), EdgeId::new(20));
        assert_eq!(e.prev(b), EdgeId::new(21));

        assert_eq!(e.other_vertex(a), b);
        assert_eq!(e.other_vertex(b), a);
        assert!(!e.contains_vertex(VertexId::new(2)));
        assert!(e.is_wire());
    }
}
