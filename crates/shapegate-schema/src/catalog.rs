//! # Type Catalogs
//!
//! Language-agnostic type definitions loaded from YAML or JSON. A catalog
//! maps type names to ordered field lists:
//!
//! ```yaml
//! types:
//!   Material:
//!     - { name: object, type: string }
//!     - { name: material, type: string }
//!   Model:
//!     - { name: id, type: integer }
//!     - { name: rotation, type: list, items: number }
//!     - { name: thumbnail_url, type: string, default: true }
//!     - { name: materials, type: list, items: [Material], default: true }
//! ```
//!
//! `type` is one of `string`, `integer`, `number`, `list`, or the name of
//! another type in the same catalog. `items` names the list element type;
//! it may be a single tag or a list of tags, and anything other than
//! exactly one tag is reported by the deriver as an ambiguous list. Any
//! other tag resolves to [`FieldType::Unsupported`] and fails derivation
//! with the field named.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use shapegate_core::{FieldDefinition, FieldType, SchemaDerivationError, TypeDefinition};

use crate::validate::SchemaValidationError;

/// One field entry as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Element type tag(s) for `list` fields.
    #[serde(default)]
    pub items: Option<ItemsSpec>,
    /// Whether the field has a default (and is therefore optional).
    #[serde(default)]
    pub default: bool,
}

/// The `items` of a list field: one tag or several.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemsSpec {
    /// `items: number`
    One(String),
    /// `items: [number]`
    Many(Vec<String>),
}

impl ItemsSpec {
    fn tags(&self) -> Vec<&str> {
        match self {
            Self::One(tag) => vec![tag.as_str()],
            Self::Many(tags) => tags.iter().map(String::as_str).collect(),
        }
    }
}

/// A set of named type definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeCatalog {
    types: BTreeMap<String, Vec<FieldSpec>>,
}

impl TypeCatalog {
    /// Parse a YAML catalog.
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaValidationError> {
        serde_yaml::from_str(content).map_err(|e| SchemaValidationError::CatalogLoadError {
            path: "<yaml>".to_string(),
            reason: format!("YAML parse error: {e}"),
        })
    }

    /// Parse a JSON catalog.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaValidationError> {
        serde_json::from_str(content).map_err(|e| SchemaValidationError::CatalogLoadError {
            path: "<json>".to_string(),
            reason: format!("JSON parse error: {e}"),
        })
    }

    /// Load a catalog file. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, SchemaValidationError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SchemaValidationError::CatalogLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };

        parsed.map_err(|e| match e {
            SchemaValidationError::CatalogLoadError { reason, .. } => {
                SchemaValidationError::CatalogLoadError {
                    path: path.display().to_string(),
                    reason,
                }
            }
            other => other,
        })
    }

    /// Type names defined by the catalog, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Resolve `name` into a full definition, inlining referenced types.
    ///
    /// # Errors
    ///
    /// [`SchemaDerivationError::UnknownType`] if `name` is not defined, and
    /// [`SchemaDerivationError::RecursiveType`] if resolution reaches a type
    /// that is already being resolved.
    pub fn resolve(&self, name: &str) -> Result<TypeDefinition, SchemaDerivationError> {
        self.resolve_with(name, &mut Vec::new())
    }

    /// Resolve every type in the catalog.
    pub fn definitions(&self) -> Result<Vec<TypeDefinition>, SchemaDerivationError> {
        self.types.keys().map(|name| self.resolve(name)).collect()
    }

    fn resolve_with(
        &self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<TypeDefinition, SchemaDerivationError> {
        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut chain = stack[pos..].to_vec();
            chain.push(name.to_string());
            return Err(SchemaDerivationError::RecursiveType { chain });
        }

        let fields = self
            .types
            .get(name)
            .ok_or_else(|| SchemaDerivationError::UnknownType(name.to_string()))?;

        stack.push(name.to_string());
        let mut definition = TypeDefinition::new(name);
        for spec in fields {
            let field_type = self.resolve_tag(&spec.type_tag, spec.items.as_ref(), stack)?;
            definition.push(FieldDefinition {
                name: spec.name.clone(),
                field_type,
                has_default: spec.default,
            });
        }
        stack.pop();

        Ok(definition)
    }

    fn resolve_tag(
        &self,
        tag: &str,
        items: Option<&ItemsSpec>,
        stack: &mut Vec<String>,
    ) -> Result<FieldType, SchemaDerivationError> {
        match tag {
            "string" => Ok(FieldType::String),
            "integer" => Ok(FieldType::Integer),
            "number" => Ok(FieldType::Number),
            "list" => {
                let tags = items.map(ItemsSpec::tags).unwrap_or_default();
                let elements = tags
                    .into_iter()
                    .map(|element| self.resolve_tag(element, None, stack))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldType::List(elements))
            }
            other if self.types.contains_key(other) => {
                self.resolve_with(other, stack).map(FieldType::Object)
            }
            other => Ok(FieldType::unsupported(other)),
        }
    }
}
