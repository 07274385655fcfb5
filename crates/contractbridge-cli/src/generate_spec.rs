//! generate-spec command implementation

use crate::config::{Config, ProducerConfig};
use anyhow::{Context, Result};
use contractbridge_catalog::{LoadedCatalog, ScanOptions, load_module, load_module_with};
use contractbridge_core::{DocumentFormat, write_document};
use contractbridge_logging::report_diagnostics;
use contractbridge_producer::{ConflictPolicy, DiscoveryPattern, DocumentOptions, generate_document};
use std::path::{Path, PathBuf};

/// Flags for generate-spec; set values override the config file
#[derive(Debug, Default)]
pub struct SpecArgs {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub module: Option<String>,
    pub patterns: Vec<DiscoveryPattern>,
    pub title: Option<String>,
    pub version: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<DocumentFormat>,
    pub strict: bool,
}

/// Merge flags over the `[producer]` section
pub fn resolve(args: SpecArgs) -> Result<ProducerConfig> {
    let config = Config::discover(args.config.as_deref())?;
    let mut producer = config.producer.unwrap_or_default();

    if args.catalog.is_some() {
        producer.catalog = args.catalog;
    }
    if args.module.is_some() {
        producer.module = args.module;
    }
    if !args.patterns.is_empty() {
        producer.patterns = args.patterns;
    }
    if let Some(title) = args.title {
        producer.title = title;
    }
    if let Some(version) = args.version {
        producer.version = version;
    }
    if args.output.is_some() {
        producer.output = args.output;
    }
    if args.format.is_some() {
        producer.format = args.format;
    }
    if args.strict {
        producer.conflict_policy = ConflictPolicy::Reject;
    }

    producer.validate()?;
    Ok(producer)
}

fn load_catalog(path: &Path, module: Option<&str>) -> Result<LoadedCatalog> {
    let loaded = match module {
        Some(module) => load_module_with(path, &ScanOptions::new(module)),
        None => load_module(path),
    };
    loaded.with_context(|| format!("Failed to load catalog: {}", path.display()))
}

/// Run the generate-spec command
pub fn run(args: SpecArgs) -> Result<()> {
    let producer = resolve(args)?;
    let catalog_path = producer
        .catalog
        .as_deref()
        .context("No catalog configured")?;

    println!("Generating document: {} v{}", producer.title, producer.version);
    println!("  Catalog: {}", catalog_path.display());

    let loaded = load_catalog(catalog_path, producer.module.as_deref())?;
    report_diagnostics(&loaded.diagnostics);

    let options = DocumentOptions {
        title: producer.title.clone(),
        version: producer.version.clone(),
        description: producer.description.clone(),
        conflict_policy: producer.conflict_policy,
    };
    let assembly = generate_document(&loaded.catalog, &producer.patterns, &options)
        .context("Failed to generate document")?;
    let warnings = report_diagnostics(&assembly.diagnostics);

    let output = producer.output_path();
    let format = producer.document_format();
    write_document(&assembly.document, &output, format)
        .with_context(|| format!("Failed to write document: {}", output.display()))?;

    println!(
        "✓ Channels: {}, schemas: {}",
        assembly.document.channels.len(),
        assembly.document.components.schemas.len()
    );
    if warnings > 0 {
        println!("  {warnings} warning(s)");
    }
    println!("Document written: {}", output.display());

    Ok(())
}
