//! # Payload Validation
//!
//! Compiles a [`Schema`] document into a [`Validator`] and checks JSON
//! payloads against it, reporting the first violation with the exact path
//! from the payload root to the offending node.
//!
//! ## Design
//!
//! Compilation builds a `jsonschema` validator (Draft 2020-12) from the
//! document, so a malformed document fails at startup rather than per
//! request. Conforming payloads are accepted by that compiled validator
//! alone. A rejected payload is then walked against the document to find
//! the violation to report, in a fixed order:
//!
//! 1. the node's own `type`;
//! 2. for objects, missing `required` keys in `required` order, each
//!    reported at the path of the missing key (`materials[0].material`);
//! 3. present properties in declaration order, depth-first;
//! 4. for arrays, elements in index order.
//!
//! The first rule that fires is the reported outcome, so the same payload
//! always yields the same error.
//!
//! ## Empty schemas
//!
//! A document whose root declares no properties accepts every payload,
//! whatever its shape. This is an explicit rule, checked before anything
//! else.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use shapegate_core::{JsonPath, SchemaDerivationError};

use crate::document::Schema;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A payload does not conform to its schema.
///
/// Serializes as `{"message": ..., "path": "a.b[2].c"}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message} (at {path})")]
pub struct ValidationFailure {
    /// Human-readable description of the violation.
    pub message: String,
    /// Location of the violating node inside the payload.
    pub path: JsonPath,
}

impl ValidationFailure {
    fn missing_property(path: &JsonPath, name: &str) -> Self {
        Self {
            message: format!("\"{name}\" is a required property"),
            path: path.key(name),
        }
    }

    fn type_mismatch(path: &JsonPath, value: &Value, expected: &str) -> Self {
        Self {
            message: format!("{value} is not of type \"{expected}\""),
            path: path.clone(),
        }
    }
}

/// Errors raised while building validators or loading their inputs.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document could not be compiled into a validator.
    #[error("failed to compile schema {schema_id}: {reason}")]
    SchemaCompileError {
        /// The type name or identifier of the schema.
        schema_id: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A type catalog could not be read or parsed.
    #[error("failed to load catalog {path}: {reason}")]
    CatalogLoadError {
        /// Path or label of the catalog.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A type definition could not be turned into a schema.
    #[error(transparent)]
    Derivation(#[from] SchemaDerivationError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The payload conforms; it is handed back unchanged.
    Valid(Value),
    /// The payload violates the schema.
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    /// Whether the payload conformed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Convert into a `Result` for `?`-style consumption.
    pub fn into_result(self) -> Result<Value, ValidationFailure> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(failure) => Err(failure),
        }
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// A compiled, immutable schema ready to check payloads.
///
/// Cheap to share behind an `Arc`; validation takes `&self` and keeps no
/// state between calls.
pub struct Validator {
    schema: Schema,
    /// `None` for the empty-schema shortcut.
    compiled: Option<jsonschema::Validator>,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("schema_type", &self.schema.type_name())
            .field("property_count", &self.schema.property_count())
            .field("accepts_everything", &self.compiled.is_none())
            .finish()
    }
}

impl Validator {
    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::SchemaCompileError`] if `jsonschema`
    /// rejects the rendered document.
    pub fn compile(schema: Schema) -> Result<Self, SchemaValidationError> {
        if Self::is_empty_schema(&schema) {
            return Ok(Self {
                schema,
                compiled: None,
            });
        }

        let compiled = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&schema.to_value())
            .map_err(|e| SchemaValidationError::SchemaCompileError {
                schema_id: schema.type_name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema,
            compiled: Some(compiled),
        })
    }

    /// The document this validator enforces.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether this validator accepts every payload.
    pub fn accepts_everything(&self) -> bool {
        self.compiled.is_none()
    }

    /// Validate an owned payload, handing it back on success.
    pub fn validate(&self, payload: Value) -> ValidationOutcome {
        match self.check(&payload) {
            Ok(()) => ValidationOutcome::Valid(payload),
            Err(failure) => ValidationOutcome::Invalid(failure),
        }
    }

    /// Validate a borrowed payload.
    pub fn check(&self, payload: &Value) -> Result<(), ValidationFailure> {
        let Some(compiled) = &self.compiled else {
            return Ok(());
        };

        if compiled.is_valid(payload) {
            return Ok(());
        }

        if let Some(failure) = first_violation(&self.schema, payload, &JsonPath::root()) {
            return Err(failure);
        }

        // The walk covers every keyword this crate emits, so this only
        // runs if the two disagree. Report what jsonschema saw.
        match compiled.iter_errors(payload).next() {
            Some(err) => Err(ValidationFailure {
                message: err.to_string(),
                path: JsonPath::from_pointer(&err.instance_path.to_string(), payload),
            }),
            None => Ok(()),
        }
    }

    /// Run `handler` with the payload if it conforms.
    ///
    /// The handler is not invoked when validation fails; the failure is
    /// returned instead.
    pub fn guard<R>(
        &self,
        payload: Value,
        handler: impl FnOnce(Value) -> R,
    ) -> Result<R, ValidationFailure> {
        self.validate(payload).into_result().map(handler)
    }

    /// Like [`Validator::guard`], for handlers that do not take the payload.
    pub fn guard_discarding<R>(
        &self,
        payload: &Value,
        handler: impl FnOnce() -> R,
    ) -> Result<R, ValidationFailure> {
        self.check(payload).map(|()| handler())
    }

    fn is_empty_schema(schema: &Schema) -> bool {
        schema.as_object().is_some_and(|obj| obj.is_empty())
    }
}

/// Find the first violation of `schema` in `value`, in the documented order.
fn first_violation(schema: &Schema, value: &Value, path: &JsonPath) -> Option<ValidationFailure> {
    match schema {
        Schema::Object(obj) => {
            let Some(map) = value.as_object() else {
                return Some(ValidationFailure::type_mismatch(path, value, "object"));
            };
            if let Some(missing) = obj.required.iter().find(|name| !map.contains_key(*name)) {
                return Some(ValidationFailure::missing_property(path, missing));
            }
            obj.properties.iter().find_map(|(name, sub)| {
                map.get(name)
                    .and_then(|child| first_violation(sub, child, &path.key(name)))
            })
        }
        Schema::Array { items } => {
            let Some(elements) = value.as_array() else {
                return Some(ValidationFailure::type_mismatch(path, value, "array"));
            };
            elements
                .iter()
                .enumerate()
                .find_map(|(i, element)| first_violation(items, element, &path.index(i)))
        }
        Schema::String => {
            (!value.is_string()).then(|| ValidationFailure::type_mismatch(path, value, "string"))
        }
        Schema::Integer => {
            (!is_integer(value)).then(|| ValidationFailure::type_mismatch(path, value, "integer"))
        }
        Schema::Number => {
            (!value.is_number()).then(|| ValidationFailure::type_mismatch(path, value, "number"))
        }
    }
}

/// JSON Schema treats numbers with a zero fractional part as integers.
fn is_integer(value: &Value) -> bool {
    value.is_i64()
        || value.is_u64()
        || value.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::describe_object;
    use crate::document::ObjectSchema;
    use proptest::prelude::*;
    use serde_json::json;
    use shapegate_core::{FieldType, TypeDefinition};

    fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Schema {
        Schema::Object(ObjectSchema {
            properties: properties
                .into_iter()
                .map(|(n, s)| (n.to_string(), s))
                .collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn model_validator() -> Validator {
        let material = TypeDefinition::new("Material")
            .field("object", FieldType::String)
            .field("material", FieldType::String);
        let model = TypeDefinition::new("Model")
            .field("id", FieldType::Integer)
            .field("name", FieldType::String)
            .field("rotation", FieldType::list_of(FieldType::Number))
            .field("scale", FieldType::Number)
            .optional("thumbnail_url", FieldType::String)
            .optional("materials", FieldType::list_of(FieldType::Object(material)));
        Validator::compile(describe_object(&model).unwrap()).unwrap()
    }

    fn failure(outcome: ValidationOutcome) -> ValidationFailure {
        match outcome {
            ValidationOutcome::Invalid(f) => f,
            ValidationOutcome::Valid(v) => panic!("expected failure, payload accepted: {v}"),
        }
    }

    #[test]
    fn missing_required_reports_key_path() {
        let validator =
            Validator::compile(object(vec![("id", Schema::Integer)], &["id"])).unwrap();
        let f = failure(validator.validate(json!({})));
        assert_eq!(f.path.to_string(), "id");
        assert_eq!(f.message, "\"id\" is a required property");
    }

    #[test]
    fn type_mismatch_reports_key_path() {
        let validator =
            Validator::compile(object(vec![("id", Schema::Integer)], &[])).unwrap();
        let f = failure(validator.validate(json!({"id": "not-a-number"})));
        assert_eq!(f.path.to_string(), "id");
        assert_eq!(f.message, "\"not-a-number\" is not of type \"integer\"");
    }

    #[test]
    fn nested_missing_property_inside_array() {
        let validator = model_validator();
        let f = failure(validator.validate(json!({
            "id": 1, "name": "chair", "rotation": [0.0, 90.0, 0.0], "scale": 1.0,
            "materials": [{"object": "x"}]
        })));
        assert_eq!(f.path.to_string(), "materials[0].material");
    }

    #[test]
    fn required_checks_run_before_property_types() {
        let validator = model_validator();
        let f = failure(validator.validate(json!({
            "id": 1, "name": "chair", "rotation": [], "scale": 1,
            "materials": [{"object": 1}]
        })));
        assert_eq!(f.path.to_string(), "materials[0].material");
    }

    #[test]
    fn wrong_element_type_reports_index() {
        let validator = model_validator();
        let f = failure(validator.validate(json!({
            "id": 1, "name": "chair", "rotation": [0, "ninety", 0], "scale": 1
        })));
        assert_eq!(f.path.to_string(), "rotation[1]");
        assert!(f.message.contains("\"number\""), "got: {}", f.message);
    }

    #[test]
    fn first_declared_property_wins() {
        let validator = model_validator();
        let f = failure(validator.validate(json!({
            "id": "one", "name": 2, "rotation": [], "scale": 1
        })));
        assert_eq!(f.path.to_string(), "id");
    }

    #[test]
    fn non_object_root_is_reported_at_root() {
        let validator = model_validator();
        let f = failure(validator.validate(json!([1, 2, 3])));
        assert!(f.path.is_root());
        assert!(f.message.contains("\"object\""));
    }

    #[test]
    fn conforming_payload_is_returned_unchanged() {
        let validator = model_validator();
        let payload = json!({
            "id": 7, "name": "lamp", "rotation": [0, 0, 0], "scale": 0.5,
            "thumbnail_url": "https://cdn.example/lamp.png",
            "materials": [{"object": "shade", "material": "linen"}]
        });
        assert_eq!(validator.validate(payload.clone()), ValidationOutcome::Valid(payload));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let validator = model_validator();
        let outcome = validator.validate(json!({
            "id": 7, "name": "lamp", "rotation": [], "scale": 2
        }));
        assert!(outcome.is_valid());
    }

    #[test]
    fn integral_floats_count_as_integers() {
        let validator =
            Validator::compile(object(vec![("id", Schema::Integer)], &["id"])).unwrap();
        assert!(validator.check(&json!({"id": 3.0})).is_ok());
        assert!(validator.check(&json!({"id": 3.5})).is_err());
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let validator = model_validator();
        assert!(validator
            .check(&json!({"id": 1, "name": "n", "rotation": [], "scale": 1, "extra": true}))
            .is_ok());
    }

    #[test]
    fn empty_schema_accepts_any_shape() {
        let validator = Validator::compile(object(vec![], &[])).unwrap();
        assert!(validator.accepts_everything());
        for payload in [json!({}), json!([1, 2]), json!("text"), json!(null), json!({"a": 1})] {
            assert!(validator.validate(payload).is_valid());
        }
    }

    #[test]
    fn empty_nested_object_still_type_checks() {
        let validator = Validator::compile(object(
            vec![("meta", object(vec![], &[]))],
            &["meta"],
        ))
        .unwrap();
        let f = validator.check(&json!({"meta": 5})).unwrap_err();
        assert_eq!(f.path.to_string(), "meta");
    }

    #[test]
    fn guard_runs_handler_only_on_success() {
        let validator = model_validator();
        let ok = validator.guard(
            json!({"id": 1, "name": "n", "rotation": [], "scale": 1}),
            |payload| payload["id"].as_i64(),
        );
        assert_eq!(ok, Ok(Some(1)));

        let mut called = false;
        let err = validator.guard(json!({}), |_| called = true);
        assert!(err.is_err());
        assert!(!called);
    }

    #[test]
    fn guard_discarding_does_not_consume_payload() {
        let validator = model_validator();
        let payload = json!({"id": 1, "name": "n", "rotation": [], "scale": 1});
        assert_eq!(validator.guard_discarding(&payload, || "done"), Ok("done"));
        assert_eq!(payload["id"], 1);
    }

    #[test]
    fn failure_serializes_with_rendered_path() {
        let f = ValidationFailure {
            message: "bad".into(),
            path: JsonPath::root().key("a").index(0),
        };
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({"message": "bad", "path": "a[0]"})
        );
    }

    // -- Agreement with jsonschema --

    fn field_type() -> impl Strategy<Value = FieldType> {
        prop_oneof![
            Just(FieldType::String),
            Just(FieldType::Integer),
            Just(FieldType::Number),
        ]
        .prop_recursive(3, 12, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(FieldType::list_of),
                proptest::collection::vec((inner, any::<bool>()), 0..3).prop_map(|fields| {
                    let mut def = TypeDefinition::new("Nested");
                    for (i, (ty, optional)) in fields.into_iter().enumerate() {
                        let name = format!("k{i}");
                        def = if optional { def.optional(name, ty) } else { def.field(name, ty) };
                    }
                    FieldType::Object(def)
                }),
            ]
        })
    }

    fn schema() -> impl Strategy<Value = Schema> {
        proptest::collection::vec((field_type(), any::<bool>()), 1..5).prop_map(|fields| {
            let mut def = TypeDefinition::new("Generated");
            for (i, (ty, optional)) in fields.into_iter().enumerate() {
                let name = format!("k{i}");
                def = if optional { def.optional(name, ty) } else { def.field(name, ty) };
            }
            describe_object(&def).unwrap()
        })
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            (-1.0e6..1.0e6f64).prop_map(Value::from),
            (-1000i32..1000).prop_map(|n| Value::from(f64::from(n))),
            "[a-z]{0,4}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("k[0-4]", inner, 0..5)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn walk_agrees_with_compiled_schema(schema in schema(), value in json_value()) {
            let validator = Validator::compile(schema).unwrap();
            let compiled = validator.compiled.as_ref().unwrap();
            let walked = first_violation(&validator.schema, &value, &JsonPath::root());
            prop_assert_eq!(walked.is_none(), compiled.is_valid(&value), "walk: {:?}", walked);
        }
    }
}
