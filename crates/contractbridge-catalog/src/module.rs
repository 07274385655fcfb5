//! Loading catalogs from module files

use crate::catalog::TypeCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::scan::{LoadedCatalog, ScanOptions, scan_file};
use std::path::Path;

/// Module file formats the catalog crate reads directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// JSON catalog file
    Catalog,
    /// Rust source scanned with `syn`
    RustSource,
}

impl ModuleFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ModuleFormat::Catalog),
            "rs" => Some(ModuleFormat::RustSource),
            _ => None,
        }
    }
}

/// Load a module catalog from a `.json` catalog or `.rs` source file
///
/// Rust sources are scanned with the file stem as module name and no root
/// namespace.
pub fn load_module(path: &Path) -> CatalogResult<LoadedCatalog> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    load_module_with(path, &ScanOptions::new(stem))
}

/// Load a module catalog, scanning Rust sources with the given options
pub fn load_module_with(path: &Path, options: &ScanOptions) -> CatalogResult<LoadedCatalog> {
    match ModuleFormat::from_path(path) {
        Some(ModuleFormat::Catalog) => {
            tracing::debug!("Loading catalog {}", path.display());
            Ok(LoadedCatalog {
                catalog: TypeCatalog::from_file(path)?,
                diagnostics: Default::default(),
            })
        }
        Some(ModuleFormat::RustSource) => {
            tracing::debug!("Scanning Rust source {}", path.display());
            scan_file(path, options)
        }
        None => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn load_module___reads_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(
            &path,
            r#"{"module": "Shop", "types": [{"name": "Order", "namespace": "Shop", "kind": "class"}]}"#,
        )
        .unwrap();

        let loaded = load_module(&path).unwrap();

        assert_eq!(loaded.catalog.module(), "Shop");
        assert!(loaded.catalog.find("Shop.Order").is_some());
    }

    #[test]
    fn load_module___scans_rust_source_with_stem_as_module() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.rs");
        std::fs::write(&path, "pub struct OrderCreated { pub id: u64 }").unwrap();

        let loaded = load_module(&path).unwrap();

        assert_eq!(loaded.catalog.module(), "events");
        assert!(loaded.catalog.find("OrderCreated").is_some());
    }

    #[test]
    fn load_module_with___applies_root_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.rs");
        std::fs::write(&path, "pub struct OrderCreated {}").unwrap();

        let options = ScanOptions::new("Orders").with_root_namespace("Orders.Events");
        let loaded = load_module_with(&path, &options).unwrap();

        assert!(loaded.catalog.find("Orders.Events.OrderCreated").is_some());
    }

    #[test]
    fn load_module___unsupported_extension___fails() {
        let err = load_module(Path::new("native/libshop.so")).unwrap_err();

        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[test]
    fn load_module___missing_file___is_io_error() {
        let err = load_module(Path::new("/nonexistent/shop.json")).unwrap_err();

        assert!(matches!(err, CatalogError::Io(_)));
    }
}
