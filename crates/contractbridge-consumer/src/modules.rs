//! Reference module loading

use contractbridge_bundle::{BUNDLE_EXTENSION, BundleError, BundleLoader};
use contractbridge_catalog::{CatalogError, LoadedCatalog, load_module};
use contractbridge_core::Diagnostics;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a reference module could not be used
#[derive(Error, Debug)]
pub enum ModuleLoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("bundle {0} carries no type catalog")]
    NoCatalog(PathBuf),

    #[error("unsupported module format: {0} (expected .json, .rs or .cbp)")]
    Unsupported(PathBuf),
}

/// Open one reference module as a catalog
///
/// `.json` catalogs and `.rs` sources go through the catalog loader;
/// `.cbp` bundles contribute their embedded catalog.
pub fn open_module(path: &Path) -> Result<LoadedCatalog, ModuleLoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some(ext) if ext == BUNDLE_EXTENSION => {
            let mut loader = BundleLoader::open(path)?;
            let catalog = loader
                .read_catalog()?
                .ok_or_else(|| ModuleLoadError::NoCatalog(path.to_path_buf()))?;
            Ok(LoadedCatalog {
                catalog,
                diagnostics: Diagnostics::new(),
            })
        }
        Some("json") | Some("rs") => Ok(load_module(path)?),
        _ => Err(ModuleLoadError::Unsupported(path.to_path_buf())),
    }
}
