//! # Describe Subcommand
//!
//! Derives and prints the schema for one catalog type. A type that cannot
//! be derived (an unsupported field type, an ambiguous list, a duplicate
//! field, an unknown or recursive reference) is reported with the field it
//! concerns and exits with status 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shapegate_core::SchemaDerivationError;
use shapegate_schema::{describe_object, Schema, TypeCatalog};

use crate::load_catalog;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Type catalog file (YAML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub catalog: PathBuf,

    /// Name of the type to describe.
    pub type_name: String,

    /// Pretty-print the schema document.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let catalog = load_catalog(&args.catalog)?;

    match derive_schema(&catalog, &args.type_name) {
        Ok(schema) => {
            println!("{}", render_schema(&schema, args.pretty)?);
            Ok(0)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(1)
        }
    }
}

/// Resolve `type_name` in `catalog` and derive its schema.
pub fn derive_schema(catalog: &TypeCatalog, type_name: &str) -> Result<Schema, SchemaDerivationError> {
    let definition = catalog.resolve(type_name)?;
    describe_object(&definition)
}

/// Render a schema document as JSON text.
pub fn render_schema(schema: &Schema, pretty: bool) -> Result<String> {
    let value = schema.to_value();
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.context("failed to render schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_yaml_str(MODEL_CATALOG).unwrap()
    }

    #[test]
    fn renders_compact_schema_in_declaration_order() {
        let schema = derive_schema(&catalog(), "Material").unwrap();
        assert_eq!(
            render_schema(&schema, false).unwrap(),
            r#"{"type":"object","properties":{"object":{"type":"string"},"material":{"type":"string"}},"required":["object","material"]}"#
        );
    }

    #[test]
    fn pretty_output_parses_to_same_document() {
        let schema = derive_schema(&catalog(), "Model").unwrap();
        let pretty = render_schema(&schema, true).unwrap();
        assert!(pretty.contains('\n'));
        let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, schema.to_value());
    }

    #[test]
    fn unsupported_field_is_named() {
        let err = derive_schema(&catalog(), "Event").unwrap_err();
        assert_eq!(err.field_path(), Some("Event.at"));
        assert!(err.to_string().contains("datetime"));
    }

    #[test]
    fn unknown_type_is_a_derivation_error() {
        assert_eq!(
            derive_schema(&catalog(), "Widget").unwrap_err(),
            SchemaDerivationError::UnknownType("Widget".into())
        );
    }

    #[test]
    fn run_describe_exit_codes() {
        let (_dir, path) = write_temp("types.yaml", MODEL_CATALOG);
        let args = |type_name: &str| DescribeArgs {
            catalog: path.clone(),
            type_name: type_name.into(),
            pretty: false,
        };
        assert_eq!(run_describe(&args("Model")).unwrap(), 0);
        assert_eq!(run_describe(&args("Event")).unwrap(), 1);
    }

    #[test]
    fn run_describe_malformed_catalog_is_an_error() {
        let (_dir, path) = write_temp("types.json", "{not json");
        let args = DescribeArgs {
            catalog: path,
            type_name: "Model".into(),
            pretty: false,
        };
        assert!(run_describe(&args).is_err());
    }
}
