#![deny(missing_docs)]

//! # shapegate-core: Foundational Types
//!
//! Defines the types every other crate in the workspace builds on. It has no
//! internal crate dependencies: only `serde`, `serde_json` and `thiserror`.
//!
//! ## Design Principles
//!
//! 1. **Declared, not reflected.** A type describes its own fields by
//!    implementing [`Describe`] and returning a [`TypeDefinition`]. Nothing
//!    in the workspace inspects Rust types at runtime.
//!
//! 2. **Typed payload paths.** A location inside a JSON payload is a
//!    [`JsonPath`] of key and index segments, rendered as `a.b[2].c` only
//!    at the edges.
//!
//! 3. **Loud derivation failures.** An unsupported field type is a
//!    [`SchemaDerivationError`] naming the field, never a silently
//!    shortened schema.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `shapegate-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod definition;
pub mod error;
pub mod path;

pub use definition::{Describe, FieldDefinition, FieldType, TypeDefinition};
pub use error::SchemaDerivationError;
pub use path::{JsonPath, PathSegment};
