//! # Served Types
//!
//! The request types the server validates. Each one carries a
//! [`Describe`] impl that mirrors its serde shape, so the schema derived for
//! it is the schema the handler's deserializer expects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shapegate_core::{Describe, FieldType, TypeDefinition};
use utoipa::ToSchema;

/// A type the server validates before handing it to a handler.
pub trait RegisteredType: Describe + DeserializeOwned {
    /// Registry key. Must equal the name in [`Describe::type_definition`].
    const TYPE_NAME: &'static str;
}

/// A material assignment on one object of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Material {
    /// Object the material applies to.
    pub object: String,
    /// Material name.
    pub material: String,
}

impl Describe for Material {
    fn type_definition() -> TypeDefinition {
        TypeDefinition::new(Self::TYPE_NAME)
            .field("object", FieldType::String)
            .field("material", FieldType::String)
    }
}

impl RegisteredType for Material {
    const TYPE_NAME: &'static str = "Material";
}

/// A 3D model record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Model {
    pub id: i64,
    pub name: String,
    /// Rotation per axis.
    pub rotation: Vec<f64>,
    pub scale: f64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl Describe for Model {
    fn type_definition() -> TypeDefinition {
        TypeDefinition::new(Self::TYPE_NAME)
            .field("id", FieldType::Integer)
            .field("name", FieldType::String)
            .field("rotation", FieldType::list_of(FieldType::Number))
            .field("scale", FieldType::Number)
            .optional("thumbnail_url", FieldType::String)
            .optional("materials", FieldType::list_of(FieldType::object::<Material>()))
    }
}

impl RegisteredType for Model {
    const TYPE_NAME: &'static str = "Model";
}
