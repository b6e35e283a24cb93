//! Error types for bmesh.
//!
//! Structural misuse of the kernel (an edge between a vertex and itself,
//! removing an element twice) panics. The errors here cover the recoverable
//! paths: bulk construction from untrusted lists, typed attribute access and
//! export.

use thiserror::Error;

use crate::attribute::{AttributeType, ElementKind};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The input has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face uses the same vertex more than once, or has fewer than three vertices.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// No attribute with this name is registered for the element kind.
    #[error("no {kind} attribute named '{name}'")]
    UnknownAttribute {
        /// Element kind that was queried.
        kind: ElementKind,
        /// Attribute name.
        name: String,
    },

    /// A value does not match the type of its attribute definition.
    #[error("attribute '{name}' expects {expected}, got {found}")]
    AttributeTypeMismatch {
        /// Attribute name.
        name: String,
        /// Type declared by the definition.
        expected: AttributeType,
        /// Type of the offending value.
        found: AttributeType,
    },

    /// Export only handles triangles and quads.
    #[error("face {face} has {vertcount} vertices, only triangles and quads can be exported")]
    UnsupportedFace {
        /// The face index.
        face: usize,
        /// Number of vertices of the face.
        vertcount: usize,
    },

    /// A topological invariant does not hold.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),
}

impl MeshError {
    /// Create an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        MeshError::InvalidState(message.into())
    }
}
