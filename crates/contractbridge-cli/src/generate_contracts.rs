//! generate-contracts command implementation

use crate::config::{Config, ConsumerConfig};
use anyhow::{Context, Result};
use contractbridge_codegen::{ClassStyle, Language};
use contractbridge_consumer::{BatchReport, ContractBatch, ContractEmitter, ExternalTypeIndex};
use contractbridge_logging::report_diagnostics;
use std::path::PathBuf;

/// Flags for generate-contracts; set values override the config file
#[derive(Debug, Default)]
pub struct ContractArgs {
    pub config: Option<PathBuf>,
    pub inputs: Vec<PathBuf>,
    pub references: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub lang: Option<Language>,
    pub class_style: Option<ClassStyle>,
    pub annotations: Option<bool>,
    pub nullable: Option<bool>,
}

/// Merge flags over the `[consumer]` section
pub fn resolve(args: ContractArgs) -> Result<ConsumerConfig> {
    let config = Config::discover(args.config.as_deref())?;
    let mut consumer = config.consumer.unwrap_or_default();

    if !args.inputs.is_empty() {
        consumer.documents = args.inputs;
    }
    if !args.references.is_empty() {
        consumer.references = args.references;
    }
    if let Some(output) = args.output {
        consumer.output_dir = output;
    }
    if let Some(language) = args.lang {
        consumer.language = language;
    }
    if let Some(class_style) = args.class_style {
        consumer.class_style = class_style;
    }
    if let Some(annotations) = args.annotations {
        consumer.generate_data_annotations = annotations;
    }
    if let Some(nullable) = args.nullable {
        consumer.generate_nullable_reference_types = nullable;
    }

    consumer
        .validate()
        .context("Nothing to generate; pass --input or set [consumer] documents")?;
    Ok(consumer)
}

/// Run the generate-contracts command
pub fn run(args: ContractArgs) -> Result<()> {
    let consumer = resolve(args)?;

    println!(
        "Generating {} contracts into {}",
        consumer.language,
        consumer.output_dir.display()
    );

    let mut index = ExternalTypeIndex::new();
    if !consumer.references.is_empty() {
        let diagnostics = index.load_modules(consumer.references.as_slice());
        report_diagnostics(&diagnostics);
        println!(
            "  Reference types: {} from {} module(s)",
            index.len(),
            consumer.references.len()
        );
    }

    let emitter = ContractEmitter::new(&index, consumer.language, consumer.generator_options());
    let mut report = BatchReport::default();
    let outcome = ContractBatch::new(emitter, &consumer.output_dir).run_into(
        consumer.documents.as_slice(),
        None,
        &mut report,
    );

    print_report(&report);
    outcome.context("Contract generation failed")?;

    Ok(())
}

/// Print finished artifacts and their written files
fn print_report(report: &BatchReport) {
    for artifact in &report.artifacts {
        println!(
            "✓ {}: {} generated, {} external",
            artifact.input.display(),
            artifact.result.generated_types.len(),
            artifact.result.external_types.len()
        );
        report_diagnostics(&artifact.result.diagnostics);
    }
    for path in report.written() {
        println!("{}", path.display());
    }
}
