//! contractbridge CLI - Message contract generation
//!
//! Commands:
//! - `contractbridge generate-spec` - Build an AsyncAPI document from a type catalog
//! - `contractbridge generate-contracts` - Generate C# or Kotlin sources from documents
//! - `contractbridge bundle` - Package a document into a `.cbp` bundle
//! - `contractbridge check` - Validate a contracts.toml
//! - `contractbridge init` - Write a starter contracts.toml

use clap::{Parser, Subcommand};
use contractbridge_codegen::{ClassStyle, Language};
use contractbridge_core::DocumentFormat;
use contractbridge_logging::{LogLevel, init_logging};
use contractbridge_producer::DiscoveryPattern;
use std::path::PathBuf;

mod bundle;
mod config;
mod generate_contracts;
mod generate_spec;
mod init;

#[derive(Parser)]
#[command(name = "contractbridge")]
#[command(author, version, about = "Message contracts between producers and consumers", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an AsyncAPI document from a type catalog
    GenerateSpec {
        /// Path to contracts.toml (default: ./contracts.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Type catalog (.json) or Rust source (.rs)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Module name for scanned Rust sources
        #[arg(long)]
        module: Option<String>,

        /// Discovery pattern as PATTERN=event|command (repeatable)
        #[arg(short, long = "pattern")]
        patterns: Vec<DiscoveryPattern>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document version
        #[arg(long = "version")]
        doc_version: Option<String>,

        /// Output path for the document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, yaml); inferred from --output when omitted
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Reject types claimed by patterns with different classifications
        #[arg(long)]
        strict: bool,
    },

    /// Generate C# or Kotlin sources from AsyncAPI documents
    GenerateContracts {
        /// Path to contracts.toml (default: ./contracts.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input document (.json, .yaml, .yml or .cbp; repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<PathBuf>,

        /// Reference module whose public types are not generated (repeatable)
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language (csharp, kotlin)
        #[arg(short, long)]
        lang: Option<Language>,

        /// Object style (class, record)
        #[arg(long)]
        class_style: Option<ClassStyle>,

        /// Emit data annotations
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        annotations: Option<bool>,

        /// Emit nullable reference type annotations
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        nullable: Option<bool>,
    },

    /// Package a document into a .cbp bundle
    Bundle {
        /// AsyncAPI document (.json, .yaml or .yml)
        #[arg(short, long)]
        document: PathBuf,

        /// Contract name
        #[arg(short, long)]
        name: String,

        /// Contract version
        #[arg(short = 'v', long = "version")]
        contract_version: String,

        /// Contract description
        #[arg(long)]
        description: Option<String>,

        /// Author (repeatable)
        #[arg(long = "author")]
        authors: Vec<String>,

        /// Producer type catalog (.json or .rs)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Generated source file to include (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<PathBuf>,

        /// Output path (default: <name>-<version>.cbp)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a contracts.toml
    Check {
        /// Path to contracts.toml (default: ./contracts.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter contracts.toml
    Init {
        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Namespace used in the example patterns
        #[arg(long, default_value = "MyCompany.Orders")]
        namespace: String,

        /// Overwrite an existing contracts.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::GenerateSpec {
            config,
            catalog,
            module,
            patterns,
            title,
            doc_version,
            output,
            format,
            strict,
        } => {
            generate_spec::run(generate_spec::SpecArgs {
                config,
                catalog,
                module,
                patterns,
                title,
                version: doc_version,
                output,
                format,
                strict,
            })?;
        }
        Commands::GenerateContracts {
            config,
            inputs,
            references,
            output,
            lang,
            class_style,
            annotations,
            nullable,
        } => {
            generate_contracts::run(generate_contracts::ContractArgs {
                config,
                inputs,
                references,
                output,
                lang,
                class_style,
                annotations,
                nullable,
            })?;
        }
        Commands::Bundle {
            document,
            name,
            contract_version,
            description,
            authors,
            catalog,
            sources,
            output,
        } => {
            bundle::run(bundle::BundleArgs {
                document,
                name,
                version: contract_version,
                description,
                authors,
                catalog,
                sources,
                output,
            })?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
        Commands::Init {
            path,
            namespace,
            force,
        } => {
            init::run(path, &namespace, force)?;
        }
    }

    Ok(())
}
