//! # Startup Registration
//!
//! Derives and compiles every served schema before the listener is bound.
//! A type whose definition cannot be turned into a schema stops startup
//! with the offending field named, instead of surfacing on the first
//! request.
//!
//! ## Sequence
//!
//! 1. Register the built-in request types ([`Model`], [`Material`]).
//! 2. If `SHAPEGATE_CATALOG` is set, load it and register every type in it.
//! 3. Log the registered type names.

use shapegate_schema::{SchemaValidationError, TypeCatalog};

use crate::config::AppConfig;
use crate::model::{Material, Model};
use crate::state::AppState;

/// Errors during startup registration.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A built-in or catalog type failed to register.
    #[error("failed to register schema: {0}")]
    Schema(#[from] SchemaValidationError),
}

/// Build the application state with every served type registered.
pub fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let catalog_path = config.catalog_path.clone();
    let state = AppState::new(config);

    state.schemas.register_type::<Material>()?;
    state.schemas.register_type::<Model>()?;

    if let Some(path) = catalog_path {
        let catalog = TypeCatalog::load(&path)?;
        let definitions = catalog
            .definitions()
            .map_err(SchemaValidationError::from)?;
        for definition in &definitions {
            state.schemas.register(definition)?;
        }
        tracing::info!(
            catalog = %path.display(),
            types = definitions.len(),
            "loaded type catalog"
        );
    }

    tracing::info!(types = ?state.schemas.names(), "schema registry ready");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegate_core::SchemaDerivationError;

    #[test]
    fn registers_builtin_types() {
        let state = bootstrap(AppConfig::default()).unwrap();
        assert_eq!(state.schemas.names(), vec!["Material", "Model"]);
    }

    #[test]
    fn registers_catalog_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.yaml");
        std::fs::write(
            &path,
            "types:\n  Point:\n    - { name: x, type: number }\n    - { name: y, type: number }\n",
        )
        .unwrap();

        let config = AppConfig {
            catalog_path: Some(path),
            ..AppConfig::default()
        };
        let state = bootstrap(config).unwrap();
        assert!(state.schemas.get("Point").is_some());
        assert_eq!(state.schemas.len(), 3);
    }

    #[test]
    fn broken_catalog_type_stops_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.yaml");
        std::fs::write(&path, "types:\n  Event:\n    - { name: at, type: datetime }\n").unwrap();

        let config = AppConfig {
            catalog_path: Some(path),
            ..AppConfig::default()
        };
        match bootstrap(config).unwrap_err() {
            BootstrapError::Schema(SchemaValidationError::Derivation(
                SchemaDerivationError::UnsupportedType { field_path, .. },
            )) => assert_eq!(field_path, "Event.at"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
    }

    #[test]
    fn broken_catalog_type_colliding_with_builtin_stops_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.yaml");
        std::fs::write(&path, "types:\n  Model:\n    - { name: at, type: datetime }\n").unwrap();

        let config = AppConfig {
            catalog_path: Some(path),
            ..AppConfig::default()
        };
        match bootstrap(config).unwrap_err() {
            BootstrapError::Schema(SchemaValidationError::Derivation(
                SchemaDerivationError::UnsupportedType { field_path, .. },
            )) => assert_eq!(field_path, "Model.at"),
            other => panic!("expected unsupported type, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_catalog_type_stops_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.yaml");
        std::fs::write(&path, "types:\n  Model:\n    - { name: label, type: string }\n").unwrap();

        let config = AppConfig {
            catalog_path: Some(path),
            ..AppConfig::default()
        };
        match bootstrap(config).unwrap_err() {
            BootstrapError::Schema(SchemaValidationError::Derivation(
                SchemaDerivationError::DuplicateType { name },
            )) => assert_eq!(name, "Model"),
            other => panic!("expected duplicate type, got {other:?}"),
        }
    }

    #[test]
    fn shipped_catalog_matches_builtin_types() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../catalogs/model.yaml");
        let config = AppConfig {
            catalog_path: Some(path),
            ..AppConfig::default()
        };
        let state = bootstrap(config).unwrap();
        assert_eq!(state.schemas.names(), vec!["Material", "Model"]);
    }

    #[test]
    fn missing_catalog_file_stops_startup() {
        let config = AppConfig {
            catalog_path: Some("/nonexistent/shapegate/types.yaml".into()),
            ..AppConfig::default()
        };
        assert!(matches!(
            bootstrap(config).unwrap_err(),
            BootstrapError::Schema(SchemaValidationError::CatalogLoadError { .. })
        ));
    }
}
