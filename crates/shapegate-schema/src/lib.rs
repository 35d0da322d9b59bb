//! # shapegate-schema: Schema Derivation & Payload Validation
//!
//! Turns declarative type definitions into JSON Schema documents and uses
//! those documents to validate incoming JSON payloads.
//!
//! ## Derivation (`derive`)
//!
//! [`describe_object`] maps a [`TypeDefinition`](shapegate_core::TypeDefinition)
//! to a [`Schema`]: scalars to primitive schemas, nested types to nested
//! objects, lists to arrays. Fields without a default are required. An
//! unsupported field type fails the whole derivation.
//!
//! ## Validation (`validate`)
//!
//! [`Validator::compile`] turns a document into a reusable validator;
//! [`Validator::validate`] returns a [`ValidationOutcome`] carrying either
//! the payload or the first violation with its [`JsonPath`](shapegate_core::JsonPath).
//!
//! ## Caching (`registry`) and catalogs (`catalog`)
//!
//! [`SchemaRegistry`] derives each type once and shares the compiled
//! validator. [`TypeCatalog`] loads type definitions from YAML or JSON
//! files for tooling that cannot implement
//! [`Describe`](shapegate_core::Describe).
//!
//! ## Crate Policy
//!
//! - Depends only on `shapegate-core` internally.
//! - Derivation is pure; validators are immutable once compiled.
//! - Malformed definitions fail at startup, never per request.

pub mod catalog;
pub mod derive;
pub mod document;
pub mod registry;
pub mod validate;

pub use catalog::TypeCatalog;
pub use derive::{describe, describe_object, describe_type};
pub use document::{ObjectSchema, Schema};
pub use registry::SchemaRegistry;
pub use validate::{SchemaValidationError, ValidationFailure, ValidationOutcome, Validator};
