//! # Schema Derivation
//!
//! Turns a [`TypeDefinition`] into a [`Schema`] document. Derivation is a
//! pure function of the definition: no I/O, no caching, no logging.
//!
//! ## Failure policy
//!
//! Fields are processed in declaration order. The first field whose type
//! cannot be described fails the whole derivation with a
//! [`SchemaDerivationError`] naming the field path. No partial document is
//! ever returned.

use std::collections::HashSet;

use shapegate_core::{Describe, FieldType, SchemaDerivationError, TypeDefinition};

use crate::document::{ObjectSchema, Schema};

/// Derive the object schema for `T`.
pub fn describe<T: Describe>() -> Result<Schema, SchemaDerivationError> {
    describe_object(&T::type_definition())
}

/// Derive the object schema for a definition.
///
/// Every field becomes one entry of `properties`; fields without a default
/// are listed in `required`, in declaration order.
pub fn describe_object(definition: &TypeDefinition) -> Result<Schema, SchemaDerivationError> {
    describe_fields(definition, definition.name()).map(Schema::Object)
}

/// Derive the sub-schema for a single field type.
///
/// `field_path` names the field for error reporting and prefixes the paths
/// of any nested fields.
pub fn describe_type(
    field_type: &FieldType,
    field_path: &str,
) -> Result<Schema, SchemaDerivationError> {
    match field_type {
        FieldType::String => Ok(Schema::String),
        FieldType::Integer => Ok(Schema::Integer),
        FieldType::Number => Ok(Schema::Number),
        FieldType::Object(definition) => describe_fields(definition, field_path).map(Schema::Object),
        FieldType::List(elements) => match elements.as_slice() {
            [element] => {
                let items = describe_type(element, &format!("{field_path}[]"))?;
                Ok(Schema::Array {
                    items: Box::new(items),
                })
            }
            other => Err(SchemaDerivationError::AmbiguousList {
                field_path: field_path.to_string(),
                count: other.len(),
            }),
        },
        FieldType::Unsupported(tag) => Err(SchemaDerivationError::UnsupportedType {
            field_path: field_path.to_string(),
            type_name: tag.clone(),
        }),
    }
}

fn describe_fields(
    definition: &TypeDefinition,
    prefix: &str,
) -> Result<ObjectSchema, SchemaDerivationError> {
    let mut seen = HashSet::new();
    let mut body = ObjectSchema {
        properties: Vec::with_capacity(definition.fields().len()),
        required: Vec::new(),
    };

    for field in definition.fields() {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaDerivationError::DuplicateField {
                type_name: definition.name().to_string(),
                field: field.name.clone(),
            });
        }

        let field_path = format!("{prefix}.{}", field.name);
        let schema = describe_type(&field.field_type, &field_path)?;
        body.properties.push((field.name.clone(), schema));

        if !field.has_default {
            body.required.push(field.name.clone());
        }
    }

    Ok(body)
}
