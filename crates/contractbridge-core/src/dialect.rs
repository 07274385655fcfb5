//! JSON and YAML renderings of the same document

use crate::document::Document;
use crate::error::{ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Serialization dialect of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Infer the format from a file extension (`json`, `yaml`, `yml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    /// Render a document; output always ends with a newline
    pub fn serialize(self, document: &Document) -> ContractResult<String> {
        let mut out = match self {
            DocumentFormat::Json => serde_json::to_string_pretty(document)?,
            DocumentFormat::Yaml => serde_yaml::to_string(document)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    pub fn parse(self, content: &str) -> ContractResult<Document> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(ContractError::configuration(format!(
                "unknown document format '{}' (expected 'json' or 'yaml')",
                other
            ))),
        }
    }
}

/// Read a document, choosing the dialect from the file extension
pub fn read_document(path: &Path) -> ContractResult<Document> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        ContractError::InvalidDocument(format!(
            "cannot infer document format from '{}'",
            path.display()
        ))
    })?;
    let content = std::fs::read_to_string(path)?;
    format.parse(&content)
}

/// Write a document, creating parent directories as needed
pub fn write_document(
    document: &Document,
    path: &Path,
    format: DocumentFormat,
) -> ContractResult<()> {
    let content = format.serialize(document)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "dialect/dialect_tests.rs"]
mod dialect_tests;
