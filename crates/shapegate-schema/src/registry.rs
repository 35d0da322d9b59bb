//! # Schema Registry
//!
//! Process-wide cache of compiled validators keyed by type name. Each type
//! is derived and compiled at most once; afterwards every request shares
//! the same immutable [`Validator`] through an `Arc`.
//!
//! A name belongs to the first definition registered under it. Each entry
//! keeps that definition, and a later registration of the same name must
//! match it exactly.
//!
//! The map sits behind a `parking_lot::RwLock`. Lookups take the read
//! lock; a miss takes the write lock and checks again before deriving, so
//! two concurrent first registrations of one type do the work only once.
//! The lock is never held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shapegate_core::{Describe, SchemaDerivationError, TypeDefinition};

use crate::derive::describe_object;
use crate::validate::{SchemaValidationError, Validator};

/// A compiled validator and the definition it was derived from.
struct Entry {
    definition: TypeDefinition,
    validator: Arc<Validator>,
}

/// Thread-safe, cloneable registry of compiled schemas.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the validator for `definition`, deriving and compiling it on
    /// first use.
    ///
    /// Registration is keyed by [`TypeDefinition::name`]. Registering an
    /// identical definition again returns the cached validator.
    ///
    /// # Errors
    ///
    /// Derivation and compile failures are returned and nothing is cached,
    /// so a broken definition fails every time it is registered. A
    /// definition that derives cleanly but differs from the one already
    /// registered under its name is rejected with
    /// [`SchemaDerivationError::DuplicateType`].
    pub fn register(
        &self,
        definition: &TypeDefinition,
    ) -> Result<Arc<Validator>, SchemaValidationError> {
        if let Some(entry) = self.entries.read().get(definition.name()) {
            if entry.definition == *definition {
                return Ok(Arc::clone(&entry.validator));
            }
        }

        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(definition.name()) {
            if entry.definition == *definition {
                return Ok(Arc::clone(&entry.validator));
            }
        }

        let schema = describe_object(definition)?;
        let property_count = schema.property_count();
        let validator = Arc::new(Validator::compile(schema)?);

        if entries.contains_key(definition.name()) {
            tracing::warn!(type_name = definition.name(), "conflicting type definition");
            return Err(SchemaDerivationError::DuplicateType {
                name: definition.name().to_string(),
            }
            .into());
        }

        tracing::info!(
            type_name = definition.name(),
            property_count,
            accepts_everything = validator.accepts_everything(),
            "registered schema"
        );

        entries.insert(
            definition.name().to_string(),
            Entry {
                definition: definition.clone(),
                validator: Arc::clone(&validator),
            },
        );
        Ok(validator)
    }

    /// Register `T` through its [`Describe`] impl.
    pub fn register_type<T: Describe>(&self) -> Result<Arc<Validator>, SchemaValidationError> {
        self.register(&T::type_definition())
    }

    /// Look up a registered validator.
    pub fn get(&self, type_name: &str) -> Option<Arc<Validator>> {
        self.entries
            .read()
            .get(type_name)
            .map(|entry| Arc::clone(&entry.validator))
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
