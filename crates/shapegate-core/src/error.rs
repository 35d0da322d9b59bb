//! # Error Types
//!
//! Errors raised while turning a [`TypeDefinition`](crate::TypeDefinition)
//! into a schema document. All use `thiserror`.
//!
//! Derivation happens once at startup, so every variant is meant to stop
//! the process (or at least the route) with enough context for an operator
//! to fix the offending definition.

use thiserror::Error;

/// A type definition could not be turned into a schema.
///
/// `field_path` values use the form `Type.field`, with `[]` marking a step
/// into a list element type: `Model.materials[].colour`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDerivationError {
    /// The field's type has no schema mapping.
    #[error("unsupported type \"{type_name}\" for field {field_path}")]
    UnsupportedType {
        /// Path of the offending field.
        field_path: String,
        /// The unsupported type tag.
        type_name: String,
    },

    /// A list descriptor that does not name exactly one element type.
    #[error("list field {field_path} must name exactly one element type, found {count}")]
    AmbiguousList {
        /// Path of the offending field.
        field_path: String,
        /// Number of element types the descriptor named.
        count: usize,
    },

    /// Two fields of one definition share a name.
    #[error("type {type_name} declares field \"{field}\" more than once")]
    DuplicateField {
        /// The definition containing the duplicate.
        type_name: String,
        /// The repeated field name.
        field: String,
    },

    /// A different definition is already registered under this type name.
    #[error("type {name} is already registered with a different definition")]
    DuplicateType {
        /// The contested type name.
        name: String,
    },

    /// A catalog referenced a type name it does not define.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A catalog type refers back to itself through its fields.
    #[error("recursive type reference: {}", chain.join(" -> "))]
    RecursiveType {
        /// Type names from the first occurrence to the repeat.
        chain: Vec<String>,
    },
}

impl SchemaDerivationError {
    /// The field path the error refers to, when it refers to one.
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { field_path, .. } | Self::AmbiguousList { field_path, .. } => {
                Some(field_path)
            }
            _ => None,
        }
    }
}
