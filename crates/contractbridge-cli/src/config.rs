//! contracts.toml parsing and validation

use anyhow::{Context, Result};
use contractbridge_codegen::{ClassStyle, GeneratorOptions, Language, TypeMappings};
use contractbridge_core::DocumentFormat;
use contractbridge_producer::{ConflictPolicy, DiscoveryPattern};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name
pub const CONFIG_FILE: &str = "contracts.toml";

/// contracts.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub producer: Option<ProducerConfig>,

    #[serde(default)]
    pub consumer: Option<ConsumerConfig>,
}

/// `[producer]`: how to build a document from a module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerConfig {
    /// Module name recorded for scanned Rust sources (default: file stem)
    #[serde(default)]
    pub module: Option<String>,

    /// Catalog file (`.json`) or Rust source (`.rs`)
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub format: Option<DocumentFormat>,

    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    #[serde(default)]
    pub patterns: Vec<DiscoveryPattern>,
}

/// `[consumer]`: how to generate sources from documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerConfig {
    #[serde(default)]
    pub documents: Vec<PathBuf>,

    #[serde(default)]
    pub references: Vec<PathBuf>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub class_style: ClassStyle,

    #[serde(default = "default_true")]
    pub generate_data_annotations: bool,

    #[serde(default = "default_true")]
    pub generate_nullable_reference_types: bool,

    #[serde(default)]
    pub type_mappings: TypeMappings,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_true() -> bool {
    true
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            references: Vec::new(),
            output_dir: default_output_dir(),
            language: Language::default(),
            class_style: ClassStyle::default(),
            generate_data_annotations: true,
            generate_nullable_reference_types: true,
            type_mappings: TypeMappings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse contracts.toml")
    }

    /// Load `path` when given, else `./contracts.toml` when it exists
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE).is_file() => {
                debug!("Using {CONFIG_FILE} from the working directory");
                Self::from_file(CONFIG_FILE)
            }
            None => {
                debug!("No {CONFIG_FILE}; using command-line flags only");
                Ok(Self::default())
            }
        }
    }

    /// Validate every section that is present
    pub fn validate(&self) -> Result<()> {
        if self.producer.is_none() && self.consumer.is_none() {
            anyhow::bail!("contracts.toml needs a [producer] or [consumer] section");
        }
        if let Some(producer) = &self.producer {
            producer.validate().context("[producer]")?;
        }
        if let Some(consumer) = &self.consumer {
            consumer.validate().context("[consumer]")?;
        }
        Ok(())
    }
}

impl ProducerConfig {
    pub fn validate(&self) -> Result<()> {
        let Some(catalog) = &self.catalog else {
            anyhow::bail!("catalog is required (a .json catalog or .rs source)");
        };
        if catalog.as_os_str().is_empty() {
            anyhow::bail!("catalog cannot be empty");
        }
        if self.title.trim().is_empty() {
            anyhow::bail!("title cannot be empty");
        }
        if self.version.trim().is_empty() {
            anyhow::bail!("version cannot be empty");
        }
        if self.patterns.is_empty() {
            anyhow::bail!(
                "at least one pattern is required, e.g. [[producer.patterns]] pattern = \"Orders.Events.**\""
            );
        }
        for (i, pattern) in self.patterns.iter().enumerate() {
            pattern
                .target()
                .with_context(|| format!("patterns[{i}] = '{}'", pattern.pattern))?;
        }
        Ok(())
    }

    /// Output path, defaulting to `asyncapi.{ext}`
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("asyncapi.{}", self.document_format().extension()))
        })
    }

    /// Explicit format, else the output extension, else JSON
    pub fn document_format(&self) -> DocumentFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(DocumentFormat::from_path))
            .unwrap_or(DocumentFormat::Json)
    }
}

impl ConsumerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            anyhow::bail!("documents cannot be empty");
        }
        if self.output_dir.as_os_str().is_empty() {
            anyhow::bail!("output_dir cannot be empty");
        }
        Ok(())
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            class_style: self.class_style,
            generate_data_annotations: self.generate_data_annotations,
            generate_nullable_reference_types: self.generate_nullable_reference_types,
            type_mappings: self.type_mappings.clone(),
            ..GeneratorOptions::default()
        }
    }
}

/// Check command implementation
pub fn check(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    println!("Checking config: {}", path.display());

    let config = Config::from_file(&path)?;
    config.validate()?;

    if let Some(producer) = &config.producer {
        println!(
            "✓ Producer: {} v{} ({} patterns)",
            producer.title,
            producer.version,
            producer.patterns.len()
        );
    }
    if let Some(consumer) = &config.consumer {
        println!(
            "✓ Consumer: {} documents, {} references, {} {}",
            consumer.documents.len(),
            consumer.references.len(),
            consumer.language,
            consumer.class_style
        );
    }
    println!("\nConfig is valid!");

    Ok(())
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
