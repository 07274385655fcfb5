//! Bundle creation command.
//!
//! Creates `.cbp` bundles from an AsyncAPI document, an optional producer
//! catalog, and optional generated sources.

use anyhow::{Context, Result};
use contractbridge_bundle::{BUNDLE_EXTENSION, BundleBuilder, Manifest};
use contractbridge_catalog::load_module;
use contractbridge_logging::report_diagnostics;
use std::path::PathBuf;

#[derive(Debug)]
pub struct BundleArgs {
    pub document: PathBuf,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub catalog: Option<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub output: Option<PathBuf>,
}

impl BundleArgs {
    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}-{}.{BUNDLE_EXTENSION}", self.name, self.version))
        })
    }
}

/// Run the bundle command.
pub fn run(args: BundleArgs) -> Result<()> {
    println!("Creating bundle: {} v{}", args.name, args.version);

    let mut manifest = Manifest::new(&args.name, &args.version);
    manifest.contract.description = args.description.clone();
    manifest.contract.authors = args.authors.clone();

    println!("  Adding document: {}", args.document.display());
    let mut builder = BundleBuilder::new(manifest)
        .add_document(&args.document)
        .with_context(|| format!("Failed to add document: {}", args.document.display()))?;

    if let Some(catalog_path) = &args.catalog {
        println!("  Adding catalog: {}", catalog_path.display());
        let loaded = load_module(catalog_path)
            .with_context(|| format!("Failed to load catalog: {}", catalog_path.display()))?;
        report_diagnostics(&loaded.diagnostics);
        builder = builder
            .add_catalog_value(&loaded.catalog)
            .context("Failed to add catalog")?;
    }

    for source in &args.sources {
        println!("  Adding source: {}", source.display());
        builder = builder
            .add_source(source)
            .with_context(|| format!("Failed to add source: {}", source.display()))?;
    }

    let output_path = args.output_path();
    builder
        .write(&output_path)
        .with_context(|| format!("Failed to write bundle: {}", output_path.display()))?;

    println!("Bundle created: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use contractbridge_bundle::BundleLoader;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
  "asyncapi": "3.0.0",
  "info": { "title": "Orders", "version": "1.0.0" },
  "defaultContentType": "application/json",
  "channels": {},
  "operations": {},
  "components": { "messages": {}, "schemas": {} }
}"#;

    fn args(temp_dir: &TempDir) -> BundleArgs {
        let document = temp_dir.path().join("orders.json");
        std::fs::write(&document, DOCUMENT).unwrap();
        BundleArgs {
            document,
            name: "orders".to_string(),
            version: "1.0.0".to_string(),
            description: Some("Order events".to_string()),
            authors: vec!["Orders Team".to_string()],
            catalog: None,
            sources: Vec::new(),
            output: None,
        }
    }

    #[test]
    fn output_path___defaults_to_name_and_version() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(args(&temp_dir).output_path(), PathBuf::from("orders-1.0.0.cbp"));
    }

    #[test]
    fn run___writes_bundle_with_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.cbp");

        run(BundleArgs {
            output: Some(output.clone()),
            ..args(&temp_dir)
        })
        .unwrap();

        let mut loader = BundleLoader::open(&output).unwrap();
        assert_eq!(
            loader.manifest().contract.description.as_deref(),
            Some("Order events")
        );
        assert_eq!(loader.manifest().contract.authors, vec!["Orders Team"]);
        assert_eq!(loader.read_document().unwrap().info.title, "Orders");
    }

    #[test]
    fn run___missing_source___names_file() {
        let temp_dir = TempDir::new().unwrap();

        let err = run(BundleArgs {
            sources: vec![temp_dir.path().join("Missing.generated.cs")],
            output: Some(temp_dir.path().join("out.cbp")),
            ..args(&temp_dir)
        })
        .unwrap_err();

        assert!(format!("{err:#}").contains("Missing.generated.cs"));
    }
}
