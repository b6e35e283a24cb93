//! Attribute registration and typed access on [`BMesh`].
//!
//! Each element kind has its own schema. Registering a name that is already
//! taken is a no-op that returns the existing definition. A new definition is
//! applied to every existing element of that kind right away, and to elements
//! created later when they are added.
//!
//! ```
//! use bmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let mut mesh: BMesh = BMesh::new();
//! let v = mesh.add_vertex(Point3::origin());
//!
//! mesh.add_vertex_attribute("uv", AttributeBaseType::Float, 2);
//! assert_eq!(mesh.vertex_attribute(v, "uv").unwrap(), &AttributeValue::Float(vec![0.0, 0.0]));
//!
//! mesh.set_vertex_attribute(v, "uv", AttributeValue::from([0.5, 1.0])).unwrap();
//! assert!(mesh.set_vertex_attribute(v, "uv", AttributeValue::from(3)).is_err());
//! ```

use super::bmesh::BMesh;
use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
use crate::attribute::{
    AttributeBaseType, AttributeDefinition, AttributeMap, AttributeSchema, AttributeValue,
    ElementKind,
};
use crate::error::{MeshError, Result};

fn unknown(kind: ElementKind, name: &str) -> MeshError {
    MeshError::UnknownAttribute {
        kind,
        name: name.to_string(),
    }
}

/// Register `def` in `schema` and, if it is new, give every element in
/// `elements` its own copy of the default.
fn register<'a>(
    schema: &'a mut AttributeSchema,
    elements: impl Iterator<Item = &'a mut AttributeMap>,
    def: AttributeDefinition,
) -> &'a AttributeDefinition {
    let (index, inserted) = schema.register(def);
    let def = schema.definition(index);
    if inserted {
        for attributes in elements {
            attributes.insert(def.name.clone(), def.default_value.clone());
        }
    }
    def
}

macro_rules! impl_attribute_access {
    (
        $kind:ident, $label:literal, $id:ident, $schema:ident, $store:ident,
        $get_el:ident, $get_el_mut:ident,
        $add:ident, $add_def:ident, $has:ident, $schema_fn:ident, $get:ident, $set:ident
    ) => {
        impl<I: MeshIndex> BMesh<I> {
            #[doc = concat!("Register a ", $label, " attribute whose default is all zeros.")]
            ///
            /// Returns the definition registered under `name`, which is the
            /// existing one if the name was already taken.
            pub fn $add(
                &mut self,
                name: impl Into<String>,
                base_type: AttributeBaseType,
                dimensions: usize,
            ) -> &AttributeDefinition {
                register(
                    &mut self.$schema,
                    self.$store.iter_mut().map(|(_, el)| &mut el.attributes),
                    AttributeDefinition::new(name, base_type, dimensions),
                )
            }

            #[doc = concat!("Register a ", $label, " attribute definition.")]
            ///
            /// Fails without touching the mesh if the definition's default
            /// value does not match its declared type.
            pub fn $add_def(&mut self, def: AttributeDefinition) -> Result<&AttributeDefinition> {
                def.check(&def.default_value)?;
                Ok(register(
                    &mut self.$schema,
                    self.$store.iter_mut().map(|(_, el)| &mut el.attributes),
                    def,
                ))
            }

            #[doc = concat!("Whether a ", $label, " attribute named `name` is registered.")]
            pub fn $has(&self, name: &str) -> bool {
                self.$schema.contains(name)
            }

            #[doc = concat!("The ", $label, " attribute schema.")]
            pub fn $schema_fn(&self) -> &AttributeSchema {
                &self.$schema
            }

            #[doc = concat!("Read a registered ", $label, " attribute.")]
            pub fn $get(&self, id: $id<I>, name: &str) -> Result<&AttributeValue> {
                if !self.$schema.contains(name) {
                    return Err(unknown(ElementKind::$kind, name));
                }
                self.$get_el(id)
                    .attributes
                    .get(name)
                    .ok_or_else(|| unknown(ElementKind::$kind, name))
            }

            #[doc = concat!("Write a registered ", $label, " attribute.")]
            ///
            /// The value must match the definition's type and arity.
            pub fn $set(&mut self, id: $id<I>, name: &str, value: AttributeValue) -> Result<()> {
                self.$schema
                    .get(name)
                    .ok_or_else(|| unknown(ElementKind::$kind, name))?
                    .check(&value)?;
                self.$get_el_mut(id)
                    .attributes
                    .insert(name.to_string(), value);
                Ok(())
            }
        }
    };
}

impl_attribute_access!(
    Vertex, "vertex", VertexId, vertex_attributes, vertices,
    vertex, vertex_mut,
    add_vertex_attribute, add_vertex_attribute_def, has_vertex_attribute,
    vertex_attributes, vertex_attribute, set_vertex_attribute
);

impl_attribute_access!(
    Edge, "edge", EdgeId, edge_attributes, edges,
    edge, edge_mut,
    add_edge_attribute, add_edge_attribute_def, has_edge_attribute,
    edge_attributes, edge_attribute, set_edge_attribute
);

impl_attribute_access!(
    Loop, "loop", LoopId, loop_attributes, loops,
    get_loop, get_loop_mut,
    add_loop_attribute, add_loop_attribute_def, has_loop_attribute,
    loop_attributes, loop_attribute, set_loop_attribute
);

impl_attribute_access!(
    Face, "face", FaceId, face_attributes, faces,
    face, face_mut,
    add_face_attribute, add_face_attribute_def, has_face_attribute,
    face_attributes, face_attribute, set_face_attribute
);

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn five_vertices() -> (BMesh, Vec<VertexId>) {
        let mut mesh = BMesh::new();
        let verts = (0..5)
            .map(|i| mesh.add_vertex(Point3::new(i as f64, 0.0, 0.0)))
            .collect();
        (mesh, verts)
    }

    #[test]
    fn test_default_propagation() {
        let (mut mesh, verts) = five_vertices();
        mesh.add_vertex_attribute("weight", AttributeBaseType::Float, 3);

        for &v in &verts {
            assert_eq!(
                mesh.vertex_attribute(v, "weight").unwrap(),
                &AttributeValue::Float(vec![0.0; 3])
            );
        }

        let late = mesh.add_vertex(Point3::new(9.0, 0.0, 0.0));
        assert_eq!(
            mesh.vertex_attribute(late, "weight").unwrap(),
            &AttributeValue::Float(vec![0.0; 3])
        );
    }

    #[test]
    fn test_defaults_are_not_shared() {
        let (mut mesh, verts) = five_vertices();
        mesh.add_vertex_attribute("weight", AttributeBaseType::Float, 3);

        mesh.vertex_mut(verts[1])
            .attributes
            .get_mut("weight")
            .and_then(AttributeValue::as_float_mut)
            .unwrap()[0] = 7.0;

        assert_eq!(
            mesh.vertex_attribute(verts[1], "weight").unwrap(),
            &AttributeValue::Float(vec![7.0, 0.0, 0.0])
        );
        assert_eq!(
            mesh.vertex_attribute(verts[2], "weight").unwrap(),
            &AttributeValue::Float(vec![0.0; 3])
        );
        assert_eq!(
            mesh.vertex_attributes().get("weight").unwrap().default_value,
            AttributeValue::Float(vec![0.0; 3])
        );
    }

    #[test]
    fn test_reregistration_is_noop() {
        let (mut mesh, verts) = five_vertices();
        mesh.add_vertex_attribute("id", AttributeBaseType::Int, 1);
        mesh.set_vertex_attribute(verts[0], "id", AttributeValue::from(42))
            .unwrap();

        let def = mesh
            .add_vertex_attribute("id", AttributeBaseType::Int, 1)
            .clone();
        assert_eq!(def, AttributeDefinition::new("id", AttributeBaseType::Int, 1));
        assert_eq!(mesh.vertex_attributes().len(), 1);
        assert_eq!(
            mesh.vertex_attribute(verts[0], "id").unwrap(),
            &AttributeValue::Int(vec![42])
        );

        // A clashing type under the same name does not replace the definition
        mesh.add_vertex_attribute("id", AttributeBaseType::Float, 4);
        assert!(mesh.vertex_attributes().get("id").unwrap().attr_type
            == crate::attribute::AttributeType::new(AttributeBaseType::Int, 1));
        assert_eq!(
            mesh.vertex_attribute(verts[0], "id").unwrap(),
            &AttributeValue::Int(vec![42])
        );
    }

    #[test]
    fn test_custom_default() {
        let (mut mesh, verts) = five_vertices();
        let def = AttributeDefinition::new("scale", AttributeBaseType::Float, 1)
            .with_default(AttributeValue::from(1.0))
            .unwrap();
        mesh.add_vertex_attribute_def(def).unwrap();
        assert_eq!(
            mesh.vertex_attribute(verts[4], "scale").unwrap(),
            &AttributeValue::Float(vec![1.0])
        );
    }

    #[test]
    fn test_typed_access_errors() {
        let (mut mesh, verts) = five_vertices();
        mesh.add_vertex_attribute("uv", AttributeBaseType::Float, 2);

        assert!(matches!(
            mesh.vertex_attribute(verts[0], "missing"),
            Err(MeshError::UnknownAttribute { kind: ElementKind::Vertex, .. })
        ));
        assert!(matches!(
            mesh.set_vertex_attribute(verts[0], "uv", AttributeValue::from(vec![1.0, 2.0, 3.0])),
            Err(MeshError::AttributeTypeMismatch { .. })
        ));
        assert!(!mesh.has_edge_attribute("uv"));
        assert!(matches!(
            mesh.set_vertex_attribute(verts[0], "nope", AttributeValue::from(1)),
            Err(MeshError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn test_edge_loop_face_schemas() {
        let (mut mesh, v) = five_vertices();
        let f = mesh.add_triangle(v[0], v[1], v[2]);

        mesh.add_edge_attribute("crease", AttributeBaseType::Float, 1);
        mesh.add_loop_attribute("uv", AttributeBaseType::Float, 2);
        mesh.add_face_attribute("material", AttributeBaseType::Int, 1);

        // Existing elements pick the new attributes up
        for e in mesh.face_edges(f).collect::<Vec<_>>() {
            assert!(mesh.edge_attribute(e, "crease").is_ok());
        }
        for l in mesh.face_loops(f).collect::<Vec<_>>() {
            assert_eq!(
                mesh.loop_attribute(l, "uv").unwrap(),
                &AttributeValue::Float(vec![0.0, 0.0])
            );
        }
        mesh.set_face_attribute(f, "material", AttributeValue::from(3))
            .unwrap();
        assert_eq!(
            mesh.face_attribute(f, "material").unwrap(),
            &AttributeValue::Int(vec![3])
        );

        // And so do new ones
        let g = mesh.add_triangle(v[2], v[3], v[4]);
        let new_edge = mesh.find_edge(v[3], v[4]).unwrap();
        assert_eq!(
            mesh.edge_attribute(new_edge, "crease").unwrap(),
            &AttributeValue::Float(vec![0.0])
        );
        assert_eq!(
            mesh.face_attribute(g, "material").unwrap(),
            &AttributeValue::Int(vec![0])
        );
        assert!(mesh.has_loop_attribute("uv"));
        assert!(!mesh.has_face_attribute("uv"));
    }

    #[test]
    fn test_definition_with_mismatched_default_is_rejected() {
        let (mut mesh, verts) = five_vertices();
        let mut def = AttributeDefinition::new("uv", AttributeBaseType::Float, 2);
        def.default_value = AttributeValue::from(vec![1, 2, 3]);

        assert!(matches!(
            mesh.add_vertex_attribute_def(def),
            Err(MeshError::AttributeTypeMismatch { .. })
        ));
        assert!(!mesh.has_vertex_attribute("uv"));
        assert!(!mesh.vertex(verts[0]).attributes.contains_key("uv"));

        // A consistent definition under the same name still registers afterwards
        let def = AttributeDefinition::new("uv", AttributeBaseType::Float, 2);
        mesh.add_vertex_attribute_def(def).unwrap();
        for &v in &verts {
            let value = mesh.vertex_attribute(v, "uv").unwrap();
            assert!(mesh.vertex_attributes().get("uv").unwrap().attr_type.check_value(value));
        }
    }
}
