//! External type index
//!
//! Records which fully-qualified type names are already provided by
//! reference modules, so the emitter can skip them.

use crate::modules::open_module;
use contractbridge_catalog::TypeCatalog;
use contractbridge_core::identity::join_identity;
use contractbridge_core::{Diagnostic, DiagnosticCode, Diagnostics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A type seen by the emitter, either generated or provided externally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub name: String,
    pub namespace: String,
    pub external: bool,
    /// Module that provides the type, for external types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_module: Option<String>,
}

impl TypeInfo {
    pub fn generated(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            external: false,
            origin_module: None,
        }
    }

    pub fn external(
        name: impl Into<String>,
        namespace: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            external: true,
            origin_module: Some(module.into()),
        }
    }

    /// Fully-qualified name
    pub fn identity(&self) -> String {
        join_identity(&self.namespace, &self.name)
    }
}

/// Public types of loaded reference modules, keyed by fully-qualified name
///
/// The first module to provide a name wins; later duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct ExternalTypeIndex {
    types: BTreeMap<String, TypeInfo>,
}

impl ExternalTypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load reference modules in order
    ///
    /// A module that cannot be opened is skipped with a `module-load-failed`
    /// warning; loading never fails as a whole.
    pub fn load_modules<P: AsRef<Path>>(&mut self, paths: &[P]) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for path in paths {
            let path = path.as_ref();
            match open_module(path) {
                Ok(loaded) => {
                    let added = self.insert_catalog(&loaded.catalog);
                    tracing::debug!(
                        "Indexed {} external types from {}",
                        added,
                        path.display()
                    );
                    diagnostics.extend(loaded.diagnostics);
                }
                Err(e) => {
                    tracing::warn!("Skipping reference module {}: {}", path.display(), e);
                    diagnostics.push(
                        Diagnostic::warning(DiagnosticCode::ModuleLoadFailed, e.to_string())
                            .with_subject(path.display().to_string()),
                    );
                }
            }
        }

        diagnostics
    }

    /// Index the public types of one catalog; returns how many were new
    pub fn insert_catalog(&mut self, catalog: &TypeCatalog) -> usize {
        let mut added = 0;
        for (_, descriptor) in catalog.iter().filter(|(_, d)| d.is_public()) {
            let identity = descriptor.identity();
            if self.types.contains_key(&identity) {
                continue;
            }
            self.types.insert(
                identity,
                TypeInfo::external(&descriptor.name, &descriptor.namespace, catalog.module()),
            );
            added += 1;
        }
        added
    }

    pub fn exists(&self, identity: &str) -> bool {
        self.types.contains_key(identity)
    }

    pub fn lookup(&self, identity: &str) -> Option<&TypeInfo> {
        self.types.get(identity)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
