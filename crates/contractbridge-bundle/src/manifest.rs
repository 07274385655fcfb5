//! Manifest schema for contract bundles.
//!
//! The manifest names the contract and lists every payload file in the bundle
//! with its SHA-256 checksum.

use crate::{BUNDLE_VERSION, BundleError, BundleResult};
use contractbridge_core::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bundle manifest, stored as `manifest.json` in the bundle root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Bundle format version (e.g., "1.0").
    pub bundle_version: String,

    pub contract: ContractInfo,

    /// The AsyncAPI document.
    pub document: DocumentInfo,

    /// Type catalog of the producing module (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<FileInfo>,

    /// Generated sources shipped with the contract, keyed by file name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<String, SourceInfo>,
}

/// Contract metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub name: String,

    /// Contract version (usually the document's `info.version`).
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Path within the archive.
    pub path: String,
    pub format: DocumentFormat,
    /// `sha256:{hex}`
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: String,
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    /// Source language (e.g., "csharp", "kotlin").
    pub language: String,
    pub checksum: String,
}

impl Manifest {
    /// Create a manifest with no payload yet.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            bundle_version: BUNDLE_VERSION.to_string(),
            contract: ContractInfo {
                name: name.to_string(),
                version: version.to_string(),
                description: None,
                authors: Vec::new(),
            },
            document: DocumentInfo::default(),
            catalog: None,
            sources: BTreeMap::new(),
        }
    }

    pub fn set_document(&mut self, path: &str, format: DocumentFormat, checksum: &str) {
        self.document = DocumentInfo {
            path: path.to_string(),
            format,
            checksum: checksum.to_string(),
        };
    }

    pub fn set_catalog(&mut self, path: &str, checksum: &str) {
        self.catalog = Some(FileInfo {
            path: path.to_string(),
            checksum: checksum.to_string(),
        });
    }

    pub fn add_source(&mut self, name: &str, path: &str, language: &str, checksum: &str) {
        self.sources.insert(
            name.to_string(),
            SourceInfo {
                path: path.to_string(),
                language: language.to_string(),
                checksum: checksum.to_string(),
            },
        );
    }

    /// Every archive path with its expected checksum.
    pub fn checksummed_files(&self) -> Vec<(&str, &str)> {
        let mut files = vec![(self.document.path.as_str(), self.document.checksum.as_str())];
        if let Some(catalog) = &self.catalog {
            files.push((catalog.path.as_str(), catalog.checksum.as_str()));
        }
        for source in self.sources.values() {
            files.push((source.path.as_str(), source.checksum.as_str()));
        }
        files
    }

    /// Validate the manifest.
    pub fn validate(&self) -> BundleResult<()> {
        if self.bundle_version.is_empty() {
            return Err(BundleError::InvalidManifest(
                "bundle_version is required".to_string(),
            ));
        }

        if self.contract.name.trim().is_empty() {
            return Err(BundleError::InvalidManifest(
                "contract.name is required".to_string(),
            ));
        }

        if self.contract.version.trim().is_empty() {
            return Err(BundleError::InvalidManifest(
                "contract.version is required".to_string(),
            ));
        }

        if self.document.path.is_empty() {
            return Err(BundleError::InvalidManifest(
                "a document must be added to the bundle".to_string(),
            ));
        }

        for (path, checksum) in self.checksummed_files() {
            if is_unsafe_path(path) {
                return Err(BundleError::InvalidManifest(format!(
                    "archive path escapes the bundle: {path}"
                )));
            }
            if !checksum.starts_with("sha256:") {
                return Err(BundleError::InvalidManifest(format!(
                    "{path}: checksum must have the form sha256:<hex>"
                )));
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> BundleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> BundleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn is_unsafe_path(path: &str) -> bool {
    path.starts_with('/') || path.split(['/', '\\']).any(|segment| segment == "..")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn complete() -> Manifest {
        let mut manifest = Manifest::new("orders", "1.0.0");
        manifest.set_document("document/orders.json", DocumentFormat::Json, "sha256:abc");
        manifest
    }

    #[test]
    fn Manifest___new___has_bundle_version_and_no_document() {
        let manifest = Manifest::new("orders", "1.0.0");

        assert_eq!(manifest.bundle_version, BUNDLE_VERSION);
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn Manifest___validate___accepts_complete_manifest() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn Manifest___validate___rejects_blank_name() {
        let mut manifest = complete();
        manifest.contract.name = " ".to_string();

        let err = manifest.validate().unwrap_err();

        assert!(err.to_string().contains("contract.name"));
    }

    #[test]
    fn Manifest___validate___rejects_parent_traversal() {
        let mut manifest = complete();
        manifest.add_source("Evil.cs", "src/../../Evil.cs", "csharp", "sha256:abc");

        let err = manifest.validate().unwrap_err();

        assert!(err.to_string().contains("escapes"));
    }

    #[test]
    fn Manifest___validate___rejects_bare_checksum() {
        let mut manifest = complete();
        manifest.set_catalog("catalog.json", "abc");

        assert!(manifest.validate().is_err());
    }

    #[test]
    fn Manifest___json___keeps_sources_sorted() {
        let mut manifest = complete();
        manifest.add_source("b.kt", "src/b.kt", "kotlin", "sha256:2");
        manifest.add_source("a.cs", "src/a.cs", "csharp", "sha256:1");

        let json = manifest.to_json().unwrap();
        let back = Manifest::from_json(&json).unwrap();

        assert!(json.find("a.cs").unwrap() < json.find("b.kt").unwrap());
        assert_eq!(back, manifest);
        assert!(json.contains("\"format\": \"json\""));
    }
}
