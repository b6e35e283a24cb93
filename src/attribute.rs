//! Typed per-element attributes.
//!
//! Every element of a [`BMesh`](crate::mesh::BMesh) carries an [`AttributeMap`]
//! from attribute name to [`AttributeValue`]. The mesh keeps one
//! [`AttributeSchema`] per [`ElementKind`] and makes sure that every element of
//! that kind holds a value of the declared type for every registered name.
//!
//! Values are small fixed-length vectors of integers or floats:
//!
//! ```
//! use bmesh::attribute::{AttributeBaseType, AttributeDefinition, AttributeValue};
//!
//! let def = AttributeDefinition::new("uv", AttributeBaseType::Float, 2);
//! assert_eq!(def.default_value, AttributeValue::Float(vec![0.0, 0.0]));
//!
//! let a = AttributeValue::from([3.0, 0.0]);
//! let b = AttributeValue::from([0.0, 4.0]);
//! assert_eq!(a.distance(&b), 5.0);
//!
//! // Values of different kinds are incomparable, not an error.
//! assert_eq!(a.distance(&AttributeValue::from(1)), f64::INFINITY);
//! ```

use std::collections::HashMap;
use std::fmt;

use nalgebra::Vector3;

use crate::error::{MeshError, Result};

/// Attribute values of one element, keyed by attribute name.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// The four kinds of mesh elements that carry attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Vertices.
    Vertex,
    /// Edges.
    Edge,
    /// Loops (face corners).
    Loop,
    /// Faces.
    Face,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Loop => "loop",
            ElementKind::Face => "face",
        };
        f.write_str(name)
    }
}

/// Scalar type of the components of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeBaseType {
    /// 32-bit signed integers.
    Int,
    /// 64-bit floats.
    Float,
}

/// Base type plus number of components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeType {
    /// Scalar type of each component.
    pub base_type: AttributeBaseType,
    /// Number of components, at least 1.
    pub dimensions: usize,
}

impl AttributeType {
    /// Create a new attribute type.
    ///
    /// # Panics
    /// Panics if `dimensions` is zero.
    pub fn new(base_type: AttributeBaseType, dimensions: usize) -> Self {
        assert!(dimensions > 0, "attribute dimensions must be at least 1");
        Self {
            base_type,
            dimensions,
        }
    }

    /// Check whether `value` has this base type and arity.
    pub fn check_value(&self, value: &AttributeValue) -> bool {
        value.attribute_type() == *self
    }

    /// The all-zero value of this type.
    pub fn null_value(&self) -> AttributeValue {
        match self.base_type {
            AttributeBaseType::Int => AttributeValue::Int(vec![0; self.dimensions]),
            AttributeBaseType::Float => AttributeValue::Float(vec![0.0; self.dimensions]),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base_type {
            AttributeBaseType::Int => write!(f, "int{}", self.dimensions),
            AttributeBaseType::Float => write!(f, "float{}", self.dimensions),
        }
    }
}

/// A fixed-length vector of integers or floats.
///
/// Cloning copies the data, so defaults handed to different elements never
/// share storage.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Integer components.
    Int(Vec<i32>),
    /// Float components.
    Float(Vec<f64>),
}

impl AttributeValue {
    /// Scalar type of this value.
    pub fn base_type(&self) -> AttributeBaseType {
        match self {
            AttributeValue::Int(_) => AttributeBaseType::Int,
            AttributeValue::Float(_) => AttributeBaseType::Float,
        }
    }

    /// Number of components.
    pub fn dimensions(&self) -> usize {
        match self {
            AttributeValue::Int(data) => data.len(),
            AttributeValue::Float(data) => data.len(),
        }
    }

    /// Base type and arity of this value.
    pub fn attribute_type(&self) -> AttributeType {
        AttributeType {
            base_type: self.base_type(),
            dimensions: self.dimensions(),
        }
    }

    /// Euclidean distance between two values.
    ///
    /// Values of a different base type or arity are infinitely far apart.
    pub fn distance(&self, other: &AttributeValue) -> f64 {
        match (self, other) {
            (AttributeValue::Int(a), AttributeValue::Int(b)) if a.len() == b.len() => a
                .iter()
                .zip(b)
                .map(|(&x, &y)| {
                    let d = f64::from(x) - f64::from(y);
                    d * d
                })
                .sum::<f64>()
                .sqrt(),
            (AttributeValue::Float(a), AttributeValue::Float(b)) if a.len() == b.len() => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            _ => f64::INFINITY,
        }
    }

    /// Integer components, if this is an integer value.
    pub fn as_int(&self) -> Option<&[i32]> {
        match self {
            AttributeValue::Int(data) => Some(data.as_slice()),
            AttributeValue::Float(_) => None,
        }
    }

    /// Mutable integer components, if this is an integer value.
    pub fn as_int_mut(&mut self) -> Option<&mut [i32]> {
        match self {
            AttributeValue::Int(data) => Some(data.as_mut_slice()),
            AttributeValue::Float(_) => None,
        }
    }

    /// Float components, if this is a float value.
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            AttributeValue::Float(data) => Some(data.as_slice()),
            AttributeValue::Int(_) => None,
        }
    }

    /// Mutable float components, if this is a float value.
    pub fn as_float_mut(&mut self) -> Option<&mut [f64]> {
        match self {
            AttributeValue::Float(data) => Some(data.as_mut_slice()),
            AttributeValue::Int(_) => None,
        }
    }

    /// Read a float value as a 3D vector. Missing components read as zero.
    pub fn as_vector3(&self) -> Option<Vector3<f64>> {
        let data = self.as_float()?;
        let at = |i: usize| data.get(i).copied().unwrap_or(0.0);
        Some(Vector3::new(at(0), at(1), at(2)))
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(vec![value])
    }
}

impl From<[i32; 2]> for AttributeValue {
    fn from(value: [i32; 2]) -> Self {
        AttributeValue::Int(value.to_vec())
    }
}

impl From<Vec<i32>> for AttributeValue {
    fn from(value: Vec<i32>) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(vec![value])
    }
}

impl From<[f64; 2]> for AttributeValue {
    fn from(value: [f64; 2]) -> Self {
        AttributeValue::Float(value.to_vec())
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(value: Vec<f64>) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<Vector3<f64>> for AttributeValue {
    fn from(value: Vector3<f64>) -> Self {
        AttributeValue::Float(vec![value.x, value.y, value.z])
    }
}

/// A named, typed attribute with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    /// Name, unique within the schema of one element kind.
    pub name: String,
    /// Declared type.
    pub attr_type: AttributeType,
    /// Value installed on elements that lack one. All zeros unless set with
    /// [`with_default`](Self::with_default).
    pub default_value: AttributeValue,
}

impl AttributeDefinition {
    /// Create a definition whose default is all zeros.
    ///
    /// # Panics
    /// Panics if `dimensions` is zero.
    pub fn new(name: impl Into<String>, base_type: AttributeBaseType, dimensions: usize) -> Self {
        let attr_type = AttributeType::new(base_type, dimensions);
        Self {
            name: name.into(),
            attr_type,
            default_value: attr_type.null_value(),
        }
    }

    /// Replace the default value. The value must match the declared type.
    pub fn with_default(mut self, value: AttributeValue) -> Result<Self> {
        self.check(&value)?;
        self.default_value = value;
        Ok(self)
    }

    /// Check `value` against the declared type.
    pub fn check(&self, value: &AttributeValue) -> Result<()> {
        if self.attr_type.check_value(value) {
            Ok(())
        } else {
            Err(MeshError::AttributeTypeMismatch {
                name: self.name.clone(),
                expected: self.attr_type,
                found: value.attribute_type(),
            })
        }
    }

    /// Keep `value` if it matches, otherwise hand back a fresh default.
    pub fn conform(
        &self,
        value: AttributeValue,
    ) -> std::result::Result<AttributeValue, AttributeValue> {
        if self.attr_type.check_value(&value) {
            Ok(value)
        } else {
            Err(self.default_value.clone())
        }
    }
}

/// The ordered set of attribute definitions registered for one element kind.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    kind: ElementKind,
    definitions: Vec<AttributeDefinition>,
}

impl AttributeSchema {
    /// Create an empty schema for `kind`.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            definitions: Vec::new(),
        }
    }

    /// Element kind this schema describes.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no attribute is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// Whether a definition with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over the definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> + '_ {
        self.definitions.iter()
    }

    /// Register `def` unless its name is taken.
    ///
    /// Returns the index of the definition under that name and whether it was
    /// newly inserted. An existing definition is left untouched.
    pub(crate) fn register(&mut self, def: AttributeDefinition) -> (usize, bool) {
        if let Some(index) = self.definitions.iter().position(|d| d.name == def.name) {
            return (index, false);
        }
        log::debug!(
            "registered {} attribute '{}' ({})",
            self.kind,
            def.name,
            def.attr_type
        );
        self.definitions.push(def);
        (self.definitions.len() - 1, true)
    }

    pub(crate) fn definition(&self, index: usize) -> &AttributeDefinition {
        &self.definitions[index]
    }

    /// Bring `attributes` in line with the schema.
    ///
    /// Missing names get a copy of their default. Values of the wrong type are
    /// replaced by the default and reported with a warning. Names the schema
    /// does not know are left alone.
    pub fn ensure(&self, attributes: &mut AttributeMap) {
        for def in &self.definitions {
            match attributes.remove(&def.name) {
                None => {
                    attributes.insert(def.name.clone(), def.default_value.clone());
                }
                Some(value) => {
                    let found = value.attribute_type();
                    let value = def.conform(value).unwrap_or_else(|default| {
                        log::warn!(
                            "{} attribute '{}' is {} but the mesh declares {}, resetting to default",
                            self.kind,
                            def.name,
                            found,
                            def.attr_type
                        );
                        default
                    });
                    attributes.insert(def.name.clone(), value);
                }
            }
        }
    }
}
