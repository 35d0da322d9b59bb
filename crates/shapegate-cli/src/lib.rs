//! # shapegate-cli: Schema Command-Line Interface
//!
//! Offline access to the deriver and the validation pipeline, driven by a
//! type catalog file instead of compiled-in types.
//!
//! ## Subcommands
//!
//! - `list`: Type names defined by a catalog
//! - `describe`: Print the schema derived for one catalog type
//! - `validate`: Check a JSON payload file against a catalog type
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success / payload conforms                               |
//! | 1    | Derivation failed (`describe`) / payload rejected (`validate`) |
//! | 2    | Operational error: unreadable file, malformed catalog or JSON |

pub mod describe;
pub mod list;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use shapegate_schema::TypeCatalog;

/// Load a catalog file, attaching the path to any error.
pub fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    let catalog = TypeCatalog::load(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    tracing::debug!(
        catalog = %path.display(),
        types = catalog.type_names().len(),
        "loaded catalog"
    );
    Ok(catalog)
}


#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[test]
    fn load_catalog_reads_yaml() {
        let (_dir, path) = write_temp("types.yaml", MODEL_CATALOG);
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.type_names(), vec!["Event", "Material", "Model"]);
    }

    #[test]
    fn load_catalog_error_names_the_file() {
        let err = load_catalog(Path::new("/nonexistent/types.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/types.yaml"));
    }
}
