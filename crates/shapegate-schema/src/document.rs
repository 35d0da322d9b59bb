//! # Schema Documents
//!
//! The JSON-Schema subset produced by the deriver: objects with
//! `properties` and `required`, arrays with `items`, and the three scalar
//! types. Documents are immutable once derived.
//!
//! Object properties keep declaration order, both in memory and when
//! serialized, so the same definition always produces byte-identical JSON.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A node of a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// `{"type": "object", "properties": {...}, "required": [...]}`
    Object(ObjectSchema),
    /// `{"type": "array", "items": {...}}`
    Array {
        /// Schema every element must satisfy.
        items: Box<Schema>,
    },
    /// `{"type": "string"}`
    String,
    /// `{"type": "integer"}`
    Integer,
    /// `{"type": "number"}`
    Number,
}

/// The body of an object schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Property name to sub-schema, in declaration order.
    pub properties: Vec<(String, Schema)>,
    /// Names of properties that must be present. Always a subset of
    /// `properties`.
    pub required: Vec<String>,
}

impl ObjectSchema {
    /// Look up a property's sub-schema.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    /// Whether the object declares no properties at all.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Schema {
    /// The JSON Schema `type` keyword for this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array { .. } => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }

    /// The object body, if this is an object schema.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Number of top-level properties; zero for non-object schemas.
    pub fn property_count(&self) -> usize {
        self.as_object().map_or(0, |obj| obj.properties.len())
    }

    /// Render as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(self.type_name()));
        match self {
            Self::Object(obj) => {
                let properties: Map<String, Value> = obj
                    .properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_value()))
                    .collect();
                map.insert("properties".into(), Value::Object(properties));
                map.insert(
                    "required".into(),
                    Value::Array(obj.required.iter().cloned().map(Value::String).collect()),
                );
            }
            Self::Array { items } => {
                map.insert("items".into(), items.to_value());
            }
            Self::String | Self::Integer | Self::Number => {}
        }
        Value::Object(map)
    }

    /// Parse a document previously produced by [`Schema::to_value`].
    ///
    /// Accepts only the subset this crate emits. `properties` and `required`
    /// default to empty; a `required` entry without a matching property is
    /// rejected.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| format!("schema node must be an object, got {value}"))?;
        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| "schema node is missing a string \"type\"".to_string())?;

        match type_name {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| "array schema is missing \"items\"".to_string())?;
                Ok(Self::Array {
                    items: Box::new(Self::from_value(items)?),
                })
            }
            "object" => {
                let mut body = ObjectSchema::default();
                if let Some(props) = obj.get("properties") {
                    let props = props
                        .as_object()
                        .ok_or_else(|| "\"properties\" must be an object".to_string())?;
                    for (name, sub) in props {
                        body.properties.push((name.clone(), Self::from_value(sub)?));
                    }
                }
                if let Some(required) = obj.get("required") {
                    let required = required
                        .as_array()
                        .ok_or_else(|| "\"required\" must be an array".to_string())?;
                    for name in required {
                        let name = name
                            .as_str()
                            .ok_or_else(|| "\"required\" entries must be strings".to_string())?;
                        if body.property(name).is_none() {
                            return Err(format!("required property \"{name}\" is not declared"));
                        }
                        body.required.push(name.to_string());
                    }
                }
                Ok(Self::Object(body))
            }
            other => Err(format!("unsupported schema type \"{other}\"")),
        }
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn material() -> Schema {
        Schema::Object(ObjectSchema {
            properties: vec![
                ("object".into(), Schema::String),
                ("material".into(), Schema::String),
            ],
            required: vec!["object".into(), "material".into()],
        })
    }

    #[test]
    fn scalar_serializes_to_type_only() {
        assert_eq!(serde_json::to_value(Schema::Integer).unwrap(), json!({"type": "integer"}));
    }

    #[test]
    fn array_serializes_items() {
        let schema = Schema::Array {
            items: Box::new(Schema::Number),
        };
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "array", "items": {"type": "number"}})
        );
    }

    #[test]
    fn object_keeps_declaration_order_in_text() {
        let schema = Schema::Object(ObjectSchema {
            properties: vec![("zeta".into(), Schema::String), ("alpha".into(), Schema::Integer)],
            required: vec!["zeta".into()],
        });
        let text = serde_json::to_string(&schema).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha, "declaration order lost: {text}");
    }

    #[test]
    fn parses_emitted_document() {
        let original = Schema::Object(ObjectSchema {
            properties: vec![(
                "materials".into(),
                Schema::Array {
                    items: Box::new(material()),
                },
            )],
            required: vec![],
        });
        let text = serde_json::to_string(&original).unwrap();
        let parsed: Schema = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn rejects_required_without_property() {
        let err = Schema::from_value(&json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "required": ["b"]
        }))
        .unwrap_err();
        assert!(err.contains("\"b\""), "got: {err}");
    }

    #[test]
    fn rejects_unknown_type_keyword() {
        let err = Schema::from_value(&json!({"type": "boolean"})).unwrap_err();
        assert!(err.contains("boolean"));
    }

    #[test]
    fn property_lookup_and_counts() {
        let schema = material();
        let obj = schema.as_object().unwrap();
        assert_eq!(obj.property("material"), Some(&Schema::String));
        assert_eq!(obj.property("colour"), None);
        assert_eq!(schema.property_count(), 2);
        assert_eq!(Schema::String.property_count(), 0);
    }
}
