//! Export to flat triangle buffers.
//!
//! Renderers and rasterizers want an indexed triangle list, not a polygon
//! mesh. [`export_triangles`] produces one from meshes made of triangles and
//! quads:
//!
//! - every live vertex gets a dense index in iteration order, which is also
//!   written to [`Vertex::id`](crate::mesh::Vertex::id) unless disabled;
//! - triangles are copied as they are;
//! - a quad `(v0, v1, v2, v3)` is split along the `v0`–`v2` diagonal into
//!   `(v0, v1, v2)` and `(v2, v3, v0)`, both keeping the quad's winding.
//!
//! ```
//! use bmesh::prelude::*;
//! use bmesh::export::{export_triangles, ExportOptions};
//! use nalgebra::Point3;
//!
//! let mut mesh: BMesh = BMesh::new();
//! let v: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
//!     .iter()
//!     .map(|&(x, y)| mesh.add_vertex(Point3::new(x, y, 0.0)))
//!     .collect();
//! mesh.add_face(&v);
//!
//! let buffers = export_triangles(&mut mesh, &ExportOptions::default()).unwrap();
//! assert_eq!(buffers.positions.len(), 4);
//! assert_eq!(buffers.indices, vec![0, 1, 2, 2, 3, 0]);
//! ```

use nalgebra::Point3;

use crate::attribute::{AttributeBaseType, AttributeType, AttributeValue, ElementKind};
use crate::error::{MeshError, Result};
use crate::mesh::{BMesh, MeshIndex, VertexId};

/// Options for [`export_triangles`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Float vertex attribute with at least two components to export as
    /// texture coordinates. `None` skips texture coordinates.
    pub uv_attribute: Option<String>,

    /// Whether to write each vertex's dense index into its `id` (default: true).
    pub assign_ids: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            uv_attribute: None,
            assign_ids: true,
        }
    }
}

impl ExportOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export texture coordinates from the named vertex attribute.
    pub fn with_uv_attribute(mut self, name: impl Into<String>) -> Self {
        self.uv_attribute = Some(name.into());
        self
    }

    /// Leave vertex ids untouched.
    pub fn without_id_assignment(mut self) -> Self {
        self.assign_ids = false;
        self
    }
}

/// Indexed triangle list produced by [`export_triangles`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleBuffers {
    /// One position per exported vertex.
    pub positions: Vec<Point3<f64>>,

    /// Three indices into `positions` per triangle.
    pub indices: Vec<u32>,

    /// One texture coordinate per exported vertex, if requested.
    pub uvs: Option<Vec<[f64; 2]>>,
}

impl TriangleBuffers {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` array of `f32`, as GPU
    /// vertex buffers expect.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }
}

/// Convert a triangle/quad mesh into an indexed triangle list.
///
/// Fails without touching the mesh if a face has any other number of
/// vertices, or if the requested uv attribute is missing or too small.
pub fn export_triangles<I: MeshIndex>(
    mesh: &mut BMesh<I>,
    options: &ExportOptions,
) -> Result<TriangleBuffers> {
    for (fid, face) in mesh.faces() {
        if face.vertcount != 3 && face.vertcount != 4 {
            return Err(MeshError::UnsupportedFace {
                face: fid.index(),
                vertcount: face.vertcount,
            });
        }
    }
    if let Some(name) = &options.uv_attribute {
        check_uv_attribute(mesh, name)?;
    }

    // Dense index per vertex slot
    let mut dense = vec![u32::MAX; mesh.vertices.slot_count()];
    let mut positions = Vec::with_capacity(mesh.num_vertices());
    for (vid, vertex) in mesh.vertices() {
        dense[vid.index()] = positions.len() as u32;
        positions.push(vertex.position);
    }

    let mut indices = Vec::with_capacity(mesh.num_faces() * 6);
    for fid in mesh.face_ids() {
        let verts: Vec<u32> = mesh
            .face_vertices(fid)
            .map(|v: VertexId<I>| dense[v.index()])
            .collect();
        match verts.as_slice() {
            &[a, b, c] => indices.extend_from_slice(&[a, b, c]),
            &[a, b, c, d] => indices.extend_from_slice(&[a, b, c, c, d, a]),
            _ => unreachable!("face sizes were checked above"),
        }
    }

    let uvs = options.uv_attribute.as_deref().map(|name| {
        mesh.vertices()
            .map(|(_, vertex)| {
                vertex
                    .attributes
                    .get(name)
                    .and_then(AttributeValue::as_vector3)
                    .map_or([0.0, 0.0], |uv| [uv.x, uv.y])
            })
            .collect()
    });

    if options.assign_ids {
        for (i, vertex) in mesh.vertices.iter_mut() {
            vertex.id = dense[i] as usize;
        }
    }

    log::debug!(
        "exported {} vertices and {} triangles",
        positions.len(),
        indices.len() / 3
    );

    Ok(TriangleBuffers {
        positions,
        indices,
        uvs,
    })
}

fn check_uv_attribute<I: MeshIndex>(mesh: &BMesh<I>, name: &str) -> Result<()> {
    let def = mesh
        .vertex_attributes()
        .get(name)
        .ok_or_else(|| MeshError::UnknownAttribute {
            kind: ElementKind::Vertex,
            name: name.to_string(),
        })?;
    let found = def.attr_type;
    if found.base_type != AttributeBaseType::Float || found.dimensions < 2 {
        return Err(MeshError::AttributeTypeMismatch {
            name: name.to_string(),
            expected: AttributeType::new(AttributeBaseType::Float, 2),
            found,
        });
    }
    Ok(())
}
