//! # Type Definitions
//!
//! Declarative descriptions of an object's fields and their types. A
//! definition is the only input the schema deriver needs; it is built once
//! at startup and never mutated afterwards.
//!
//! ```
//! use shapegate_core::{FieldType, TypeDefinition};
//!
//! let material = TypeDefinition::new("Material")
//!     .field("object", FieldType::String)
//!     .field("material", FieldType::String);
//!
//! let model = TypeDefinition::new("Model")
//!     .field("id", FieldType::Integer)
//!     .optional("materials", FieldType::list_of(FieldType::Object(material)));
//!
//! assert_eq!(model.fields().len(), 2);
//! assert_eq!(model.required_field_names(), vec!["id"]);
//! ```

use std::fmt;

/// The declared type of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// A nested object described by its own definition.
    Object(TypeDefinition),
    /// A homogeneous list. Exactly one element type is valid; any other
    /// count is rejected when the schema is derived.
    List(Vec<FieldType>),
    /// A type tag the deriver cannot map to a schema (e.g. `boolean`,
    /// `datetime`). Carried through so the failure can name it.
    Unsupported(String),
}

impl FieldType {
    /// A list whose elements are all of `element`.
    pub fn list_of(element: FieldType) -> Self {
        Self::List(vec![element])
    }

    /// A nested object whose definition comes from `T`'s [`Describe`] impl.
    pub fn object<T: Describe>() -> Self {
        Self::Object(T::type_definition())
    }

    /// An unsupported type tag.
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::Unsupported(tag.into())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Object(def) => f.write_str(def.name()),
            Self::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Self::Unsupported(tag) => f.write_str(tag),
        }
    }
}

/// One field of a [`TypeDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name, unique within its definition.
    pub name: String,
    /// Declared type.
    pub field_type: FieldType,
    /// Whether the field declares a default. Fields with a default are
    /// optional in the derived schema.
    pub has_default: bool,
}

impl FieldDefinition {
    /// A field without a default.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            has_default: false,
        }
    }

    /// A field with a default.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            has_default: true,
        }
    }
}

/// An ordered field list under a type name.
///
/// Field order is declaration order and is preserved in the derived schema.
/// Name uniqueness is enforced by the deriver rather than the builder so
/// that definitions loaded from a catalog fail with the same error as
/// definitions written in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    name: String,
    fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    /// An empty definition named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field without a default.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDefinition::required(name, field_type));
        self
    }

    /// Append a field with a default.
    pub fn optional(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDefinition::optional(name, field_type));
        self
    }

    /// Append a prepared field.
    pub fn push(&mut self, field: FieldDefinition) {
        self.fields.push(field);
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Names of the fields that lack a default, in declaration order.
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.has_default)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Implemented by types that declare their own field list.
///
/// This replaces runtime reflection: each type states its fields explicitly
/// and the deriver works on the returned definition.
pub trait Describe {
    /// The declarative definition of `Self`.
    fn type_definition() -> TypeDefinition;
}
