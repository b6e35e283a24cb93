//! Structural consistency checks.
//!
//! [`BMesh::validate`] walks every cycle of the mesh and reports the first
//! broken invariant it finds. Walks are bounded by the number of elements
//! that should be in the cycle, so a corrupted mesh produces an error instead
//! of an endless loop.

use std::collections::HashSet;

use super::bmesh::BMesh;
use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(MeshError::invalid_state(message()))
    }
}

impl<I: MeshIndex> BMesh<I> {
    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check every topological invariant and describe the first violation.
    ///
    /// - edges join two distinct live vertices and no two edges join the same pair;
    /// - walking a disk cycle forwards visits every edge of the vertex exactly
    ///   once, and `prev` undoes `next`;
    /// - walking a radial cycle visits every loop of the edge exactly once;
    /// - walking a face cycle takes exactly `vertcount` steps, and each loop's
    ///   edge joins its vertex to the next loop's vertex.
    pub fn validate(&self) -> Result<()> {
        self.validate_edges()?;
        self.validate_disk_cycles()?;
        self.validate_radial_cycles()?;
        self.validate_face_cycles()?;
        Ok(())
    }

    fn validate_edges(&self) -> Result<()> {
        let mut pairs = HashSet::new();
        for (eid, e) in self.edges() {
            ensure(e.vert1 != e.vert2, || format!("{:?} is a self-loop", eid))?;
            for v in e.vertices() {
                ensure(self.contains_vertex(v), || {
                    format!("{:?} references missing {:?}", eid, v)
                })?;
            }
            let key = (e.vert1.min(e.vert2), e.vert1.max(e.vert2));
            ensure(pairs.insert(key), || {
                format!("{:?} duplicates an edge between {:?} and {:?}", eid, key.0, key.1)
            })?;
            if e.loop_id.is_valid() {
                ensure(self.contains_loop(e.loop_id), || {
                    format!("{:?} references removed {:?}", eid, e.loop_id)
                })?;
            }
        }
        Ok(())
    }

    fn validate_disk_cycles(&self) -> Result<()> {
        let mut degree = vec![0usize; self.vertices.slot_count()];
        for (_, e) in self.edges() {
            degree[e.vert1.index()] += 1;
            degree[e.vert2.index()] += 1;
        }

        for (vid, v) in self.vertices() {
            let expected = degree[vid.index()];
            let Some(start) = v.edge.valid() else {
                ensure(expected == 0, || {
                    format!("{:?} has {} edges but no entry edge", vid, expected)
                })?;
                continue;
            };

            let mut seen = 0usize;
            let mut e = start;
            loop {
                ensure(self.contains_edge(e), || {
                    format!("disk cycle of {:?} reaches removed {:?}", vid, e)
                })?;
                let edge = self.edge(e);
                ensure(edge.contains_vertex(vid), || {
                    format!("disk cycle of {:?} contains foreign {:?}", vid, e)
                })?;
                let next = edge.next(vid);
                ensure(self.contains_edge(next) && self.edge(next).prev(vid) == e, || {
                    format!("disk cycle of {:?} has a broken back-link at {:?}", vid, e)
                })?;

                seen += 1;
                ensure(seen <= expected, || {
                    format!("disk cycle of {:?} does not close after {} edges", vid, expected)
                })?;
                e = next;
                if e == start {
                    break;
                }
            }
            ensure(seen == expected, || {
                format!("disk cycle of {:?} has {} of {} edges", vid, seen, expected)
            })?;
        }
        Ok(())
    }

    fn validate_radial_cycles(&self) -> Result<()> {
        let mut uses = vec![0usize; self.edges.slot_count()];
        for (lid, l) in self.loops() {
            ensure(self.contains_edge(l.edge), || {
                format!("{:?} references removed {:?}", lid, l.edge)
            })?;
            uses[l.edge.index()] += 1;
        }

        for (eid, e) in self.edges() {
            let expected = uses[eid.index()];
            let Some(start) = e.loop_id.valid() else {
                ensure(expected == 0, || {
                    format!("{:?} is used by {} loops but has no entry loop", eid, expected)
                })?;
                continue;
            };

            let mut seen = 0usize;
            let mut l = start;
            loop {
                ensure(self.contains_loop(l), || {
                    format!("radial cycle of {:?} reaches removed {:?}", eid, l)
                })?;
                let lp = self.get_loop(l);
                ensure(lp.edge == eid, || {
                    format!("radial cycle of {:?} contains {:?} of another edge", eid, l)
                })?;
                let next = lp.radial_next;
                ensure(
                    self.contains_loop(next) && self.get_loop(next).radial_prev == l,
                    || format!("radial cycle of {:?} has a broken back-link at {:?}", eid, l),
                )?;

                seen += 1;
                ensure(seen <= expected, || {
                    format!("radial cycle of {:?} does not close after {} loops", eid, expected)
                })?;
                l = next;
                if l == start {
                    break;
                }
            }
            ensure(seen == expected, || {
                format!("radial cycle of {:?} has {} of {} loops", eid, seen, expected)
            })?;
        }
        Ok(())
    }

    fn validate_face_cycles(&self) -> Result<()> {
        let mut corners = vec![0usize; self.faces.slot_count()];
        for (lid, l) in self.loops() {
            ensure(self.contains_face(l.face), || {
                format!("{:?} belongs to removed {:?}", lid, l.face)
            })?;
            corners[l.face.index()] += 1;
        }

        for (fid, f) in self.faces() {
            ensure(corners[fid.index()] == f.vertcount, || {
                format!(
                    "{:?} owns {} loops but has vertcount {}",
                    fid,
                    corners[fid.index()],
                    f.vertcount
                )
            })?;
            self.validate_face_cycle(fid, f.loop_id, f.vertcount)?;
        }
        Ok(())
    }

    fn validate_face_cycle(&self, fid: FaceId<I>, start: LoopId<I>, vertcount: usize) -> Result<()> {
        ensure(self.contains_loop(start), || format!("{:?} has no entry loop", fid))?;

        let mut seen = 0usize;
        let mut l = start;
        loop {
            let lp = self.get_loop(l);
            ensure(lp.face == fid, || {
                format!("face cycle of {:?} contains {:?} of another face", fid, l)
            })?;
            let next = lp.next;
            ensure(self.contains_loop(next) && self.get_loop(next).prev == l, || {
                format!("face cycle of {:?} has a broken back-link at {:?}", fid, l)
            })?;
            self.validate_loop_edge(l, lp.vert, lp.edge, self.get_loop(next).vert)?;

            seen += 1;
            ensure(seen <= vertcount, || {
                format!("face cycle of {:?} does not close after {} loops", fid, vertcount)
            })?;
            l = next;
            if l == start {
                break;
            }
        }
        ensure(seen == vertcount, || {
            format!("face cycle of {:?} has {} of {} loops", fid, seen, vertcount)
        })
    }

    fn validate_loop_edge(
        &self,
        l: LoopId<I>,
        from: VertexId<I>,
        e: EdgeId<I>,
        to: VertexId<I>,
    ) -> Result<()> {
        let edge = self.edge(e);
        ensure(edge.contains_vertex(from) && edge.other_vertex(from) == to, || {
            format!("{:?} uses {:?}, which does not join {:?} to {:?}", l, e, from, to)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn triangle() -> (BMesh, FaceId) {
        let mut mesh = BMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let f = mesh.add_triangle(a, b, c);
        (mesh, f)
    }

    #[test]
    fn test_valid_triangle() {
        let (mesh, _) = triangle();
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_detects_wrong_vertcount() {
        let (mut mesh, f) = triangle();
        mesh.face_mut(f).vertcount = 4;
        let err = mesh.validate().unwrap_err();
        assert!(matches!(err, MeshError::InvalidState(_)));
    }

    #[test]
    fn test_detects_broken_disk_link() {
        let (mut mesh, _) = triangle();
        let v = VertexId::new(0);
        let e = mesh.vertex(v).edge;
        // Point the cycle back at itself, skipping the other edge
        mesh.edge_mut(e).set_next(v, e);
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_detects_broken_radial_link() {
        let (mut mesh, f) = triangle();
        let l = mesh.face(f).loop_id;
        let other = mesh.face_loops(f).nth(1).unwrap();
        mesh.get_loop_mut(l).radial_next = other;
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_detects_misaligned_loop() {
        let (mut mesh, f) = triangle();
        let loops: Vec<_> = mesh.face_loops(f).collect();
        let e0 = mesh.get_loop(loops[0]).edge;
        let e1 = mesh.get_loop(loops[1]).edge;
        mesh.get_loop_mut(loops[0]).edge = e1;
        mesh.get_loop_mut(loops[1]).edge = e0;
        assert!(!mesh.is_valid());
    }
}
