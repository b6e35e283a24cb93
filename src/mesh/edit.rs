//! Construction and destruction of mesh elements.
//!
//! Each public operation here is the smallest unit of mutation: it updates
//! every cycle it touches before returning, so callers never observe a
//! half-linked element.
//!
//! New members are spliced into a cycle just before its entry element (the
//! tail of the list), and the entry reference itself is left alone. For face
//! cycles this keeps the entry loop on the first vertex given to
//! [`BMesh::add_face`] and the loops in the order the vertices were given.
//!
//! Removal cascades downwards only. Removing an edge removes the faces using
//! it; removing a face removes its loops; vertices and edges are never removed
//! implicitly.

use nalgebra::Point3;

use super::bmesh::BMesh;
use super::element::{Edge, Face, Loop, Vertex};
use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};

impl<I: MeshIndex> BMesh<I> {
    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    ///
    /// The vertex gets the default value of every registered vertex attribute.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        self.insert_vertex(Vertex::new(position))
    }

    /// Add a vertex built by the caller, keeping the attributes it carries.
    ///
    /// Attributes that clash with the vertex schema are reset to their default
    /// with a warning; missing ones are filled in.
    ///
    /// # Panics
    /// Panics if the vertex already references an edge.
    pub fn insert_vertex(&mut self, mut vertex: Vertex<I>) -> VertexId<I> {
        assert!(
            vertex.is_isolated(),
            "a new vertex cannot reference an edge"
        );
        self.vertex_attributes.ensure(&mut vertex.attributes);
        VertexId::new(self.vertices.push(vertex))
    }

    /// Find the edge between two vertices.
    ///
    /// Walks both disk cycles side by side, so the cost is bounded by the
    /// smaller of the two degrees: a connecting edge belongs to both cycles
    /// and is reached once the shorter one has been walked.
    ///
    /// # Panics
    /// Panics if `v1 == v2`.
    pub fn find_edge(&self, v1: VertexId<I>, v2: VertexId<I>) -> Option<EdgeId<I>> {
        assert_ne!(v1, v2, "an edge needs two distinct vertices");

        let start1 = self.vertex(v1).edge;
        let start2 = self.vertex(v2).edge;
        if !start1.is_valid() || !start2.is_valid() {
            return None;
        }

        let mut e1 = start1;
        let mut e2 = start2;
        loop {
            if self.edge(e1).contains_vertex(v2) {
                return Some(e1);
            }
            if self.edge(e2).contains_vertex(v1) {
                return Some(e2);
            }
            e1 = self.edge(e1).next(v1);
            e2 = self.edge(e2).next(v2);
            if e1 == start1 || e2 == start2 {
                return None;
            }
        }
    }

    /// Add an edge between two vertices, or return the one already there.
    ///
    /// # Panics
    /// Panics if `v1 == v2`.
    pub fn add_edge(&mut self, v1: VertexId<I>, v2: VertexId<I>) -> EdgeId<I> {
        if let Some(existing) = self.find_edge(v1, v2) {
            return existing;
        }

        let mut edge = Edge::new(v1, v2);
        self.edge_attributes.ensure(&mut edge.attributes);
        let e = EdgeId::new(self.edges.push(edge));

        self.disk_link(e, v1);
        self.disk_link(e, v2);
        e
    }

    /// Add a face through the given vertices, in winding order.
    ///
    /// Missing edges between consecutive vertices (including last to first)
    /// are created. An empty slice adds nothing and returns `None`.
    ///
    /// # Panics
    /// Panics if a vertex is not part of the mesh or two consecutive vertices
    /// are equal.
    pub fn add_face(&mut self, vertices: &[VertexId<I>]) -> Option<FaceId<I>> {
        if vertices.is_empty() {
            return None;
        }
        Some(self.create_face(vertices))
    }

    /// Add a triangle.
    pub fn add_triangle(&mut self, v0: VertexId<I>, v1: VertexId<I>, v2: VertexId<I>) -> FaceId<I> {
        self.create_face(&[v0, v1, v2])
    }

    /// Add a quad.
    pub fn add_quad(
        &mut self,
        v0: VertexId<I>,
        v1: VertexId<I>,
        v2: VertexId<I>,
        v3: VertexId<I>,
    ) -> FaceId<I> {
        self.create_face(&[v0, v1, v2, v3])
    }

    /// Add a face from raw vertex indices.
    ///
    /// Vertices are never removed, so the n-th vertex added has index n.
    pub fn add_face_indices(&mut self, indices: &[usize]) -> Option<FaceId<I>> {
        let vertices: Vec<VertexId<I>> = indices.iter().map(|&i| VertexId::new(i)).collect();
        self.add_face(&vertices)
    }

    fn create_face(&mut self, vertices: &[VertexId<I>]) -> FaceId<I> {
        debug_assert!(!vertices.is_empty());
        for &v in vertices {
            assert!(self.contains_vertex(v), "{:?} is not a vertex of this mesh", v);
        }

        let n = vertices.len();
        let edges: Vec<EdgeId<I>> = (0..n)
            .map(|i| self.add_edge(vertices[i], vertices[(i + 1) % n]))
            .collect();

        let mut face = Face::new(n);
        self.face_attributes.ensure(&mut face.attributes);
        let f = FaceId::new(self.faces.push(face));

        for (&v, &e) in vertices.iter().zip(&edges) {
            let mut lp = Loop::new(v, e, f);
            self.loop_attributes.ensure(&mut lp.attributes);
            let l = LoopId::new(self.loops.push(lp));
            self.radial_link(l);
            self.face_link(l);
        }

        f
    }

    // ==================== Destruction ====================

    /// Remove a face and its loops. Its edges and vertices stay.
    ///
    /// # Panics
    /// Panics if the face was already removed.
    pub fn remove_face(&mut self, f: FaceId<I>) {
        // Collect first: unlinking rewrites the cycle being walked.
        let loops: Vec<LoopId<I>> = self.face_loops(f).collect();
        for l in loops {
            self.radial_unlink(l);
            self.loops.remove(l.index());
        }
        self.faces.remove(f.index());
    }

    /// Remove a loop. A face cannot lose a single corner, so this removes the
    /// loop's whole face.
    pub fn remove_loop(&mut self, l: LoopId<I>) {
        let f = self.get_loop(l).face;
        self.remove_face(f);
    }

    /// Remove an edge together with every face that uses it.
    ///
    /// The endpoints stay, even if they end up without edges.
    ///
    /// # Panics
    /// Panics if the edge was already removed.
    pub fn remove_edge(&mut self, e: EdgeId<I>) {
        let mut removed_faces = 0usize;
        while let Some(l) = self.edge(e).loop_id.valid() {
            let f = self.get_loop(l).face;
            self.remove_face(f);
            removed_faces += 1;
        }
        if removed_faces > 0 {
            log::debug!("removing {:?} also removed {} face(s)", e, removed_faces);
        }

        let [v1, v2] = self.edge(e).vertices();
        self.disk_unlink(e, v1);
        self.disk_unlink(e, v2);
        self.edges.remove(e.index());
    }

    // ==================== Cycle splicing ====================

    /// Insert `e` into the disk cycle of `v`, before the vertex's entry edge.
    fn disk_link(&mut self, e: EdgeId<I>, v: VertexId<I>) {
        let entry = self.vertex(v).edge;
        if !entry.is_valid() {
            self.vertex_mut(v).edge = e;
            let edge = self.edge_mut(e);
            edge.set_next(v, e);
            edge.set_prev(v, e);
            return;
        }

        let prev = self.edge(entry).prev(v);
        {
            let edge = self.edge_mut(e);
            edge.set_next(v, entry);
            edge.set_prev(v, prev);
        }
        self.edge_mut(prev).set_next(v, e);
        self.edge_mut(entry).set_prev(v, e);
    }

    /// Take `e` out of the disk cycle of `v`.
    fn disk_unlink(&mut self, e: EdgeId<I>, v: VertexId<I>) {
        let (next, prev) = {
            let edge = self.edge(e);
            (edge.next(v), edge.prev(v))
        };

        if next == e {
            debug_assert_eq!(self.vertex(v).edge, e);
            self.vertex_mut(v).edge = EdgeId::invalid();
            return;
        }

        if self.vertex(v).edge == e {
            self.vertex_mut(v).edge = next;
        }
        self.edge_mut(prev).set_next(v, next);
        self.edge_mut(next).set_prev(v, prev);
    }

    /// Insert `l` into the radial cycle of its edge.
    fn radial_link(&mut self, l: LoopId<I>) {
        let e = self.get_loop(l).edge;
        let entry = self.edge(e).loop_id;
        if !entry.is_valid() {
            self.edge_mut(e).loop_id = l;
            let lp = self.get_loop_mut(l);
            lp.radial_next = l;
            lp.radial_prev = l;
            return;
        }

        let prev = self.get_loop(entry).radial_prev;
        {
            let lp = self.get_loop_mut(l);
            lp.radial_next = entry;
            lp.radial_prev = prev;
        }
        self.get_loop_mut(prev).radial_next = l;
        self.get_loop_mut(entry).radial_prev = l;
    }

    /// Take `l` out of the radial cycle of its edge.
    fn radial_unlink(&mut self, l: LoopId<I>) {
        let (e, next, prev) = {
            let lp = self.get_loop(l);
            (lp.edge, lp.radial_next, lp.radial_prev)
        };

        if next == l {
            self.edge_mut(e).loop_id = LoopId::invalid();
            return;
        }

        if self.edge(e).loop_id == l {
            self.edge_mut(e).loop_id = next;
        }
        self.get_loop_mut(prev).radial_next = next;
        self.get_loop_mut(next).radial_prev = prev;
    }

    /// Append `l` to the face cycle of its face.
    fn face_link(&mut self, l: LoopId<I>) {
        let f = self.get_loop(l).face;
        let entry = self.face(f).loop_id;
        if !entry.is_valid() {
            self.face_mut(f).loop_id = l;
            let lp = self.get_loop_mut(l);
            lp.next = l;
            lp.prev = l;
            return;
        }

        let prev = self.get_loop(entry).prev;
        {
            let lp = self.get_loop_mut(l);
            lp.next = entry;
            lp.prev = prev;
        }
        self.get_loop_mut(prev).next = l;
        self.get_loop_mut(entry).prev = l;
    }
}
