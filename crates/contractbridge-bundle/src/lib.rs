//! Contract bundle format for contractbridge
//!
//! This crate creates and loads `.cbp` (contractbridge package) bundles:
//! archives that carry an AsyncAPI contract from a producer to its consumers,
//! optionally with the producer's type catalog and pre-generated sources.
//!
//! # Bundle Structure
//!
//! ```text
//! orders-1.0.0.cbp
//! ├── manifest.json
//! ├── document/
//! │   └── orders.json              # AsyncAPI document
//! ├── catalog.json                 # Producer type catalog (optional)
//! └── src/                         # Generated sources (optional)
//!     ├── Orders.Events.generated.cs
//!     └── Orders.Events.generated.kt
//! ```
//!
//! # Example
//!
//! ```no_run
//! use contractbridge_bundle::{BundleBuilder, BundleLoader, Manifest};
//!
//! BundleBuilder::new(Manifest::new("orders", "1.0.0"))
//!     .add_document("contracts/orders.json")?
//!     .write("orders-1.0.0.cbp")?;
//!
//! let mut loader = BundleLoader::open("orders-1.0.0.cbp")?;
//! let document = loader.read_document()?;
//! # Ok::<(), contractbridge_bundle::BundleError>(())
//! ```

mod error;
mod manifest;

pub mod builder;
pub mod loader;

pub use builder::BundleBuilder;
pub use error::BundleError;
pub use loader::BundleLoader;
pub use manifest::{ContractInfo, DocumentInfo, FileInfo, Manifest, SourceInfo};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Bundle file extension.
pub const BUNDLE_EXTENSION: &str = "cbp";

/// Current bundle format version.
pub const BUNDLE_VERSION: &str = "1.0";

/// Manifest file name within the bundle.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Directory holding the document.
pub const DOCUMENT_DIR: &str = "document";

/// Catalog file name within the bundle.
pub const CATALOG_FILE: &str = "catalog.json";

/// Directory holding generated sources.
pub const SOURCES_DIR: &str = "src";
