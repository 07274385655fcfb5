//! # contractbridge
//!
//! Message contracts between producers and consumers, described with AsyncAPI 3.0.
//!
//! A producer describes its message types in a type catalog. Discovery patterns
//! select the events and commands to publish, and the assembler turns them into
//! an AsyncAPI document. Consumers generate C# or Kotlin sources from that
//! document; types already provided by reference modules are imported rather
//! than regenerated.
//!
//! ## Producing a document
//!
//! ```no_run
//! use contractbridge::prelude::*;
//! use std::path::Path;
//!
//! let loaded = load_module(Path::new("orders.json"))?;
//! let assembly = generate_document(
//!     &loaded.catalog,
//!     &[DiscoveryPattern::event("Orders.Events.**")],
//!     &DocumentOptions::new("Orders", "1.0.0"),
//! )?;
//! write_document(&assembly.document, Path::new("asyncapi.yaml"), DocumentFormat::Yaml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Generating sources
//!
//! ```no_run
//! use contractbridge::prelude::*;
//! use std::path::Path;
//!
//! let mut index = ExternalTypeIndex::new();
//! index.load_modules(&["shared-models.cbp"]);
//!
//! let document = read_document(Path::new("asyncapi.yaml"))?;
//! let result = ContractEmitter::new(&index, Language::CSharp, GeneratorOptions::default())
//!     .generate(&document)?;
//! result.write_to(Path::new("generated"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`contractbridge_core`] - Document model, schema nodes, diagnostics, errors
//! - [`contractbridge_catalog`] - Type catalogs and Rust source scanning
//! - [`contractbridge_producer`] - Discovery, schema walking, document assembly
//! - [`contractbridge_codegen`] - C# and Kotlin type generators
//! - [`contractbridge_consumer`] - External type index and source emitter
//! - [`contractbridge_bundle`] - `.cbp` contract bundles
//! - [`contractbridge_logging`] - Log levels and subscriber setup

pub use contractbridge_bundle as bundle;
pub use contractbridge_catalog as catalog;
pub use contractbridge_codegen as codegen;
pub use contractbridge_consumer as consumer;
pub use contractbridge_core as core;
pub use contractbridge_logging as logging;
pub use contractbridge_producer as producer;

// Re-export the types most callers touch
pub use contractbridge_bundle::{BundleBuilder, BundleError, BundleLoader, Manifest};
pub use contractbridge_catalog::{
    CatalogError, LoadedCatalog, TypeCatalog, TypeDescriptor, TypeKind, load_module,
};
pub use contractbridge_consumer::{
    ContractBatch, ContractEmitter, ContractGenerationResult, ExternalTypeIndex,
    GeneratedSourceFile, TypeInfo,
};
pub use contractbridge_core::{
    Classification, ContractError, ContractResult, Diagnostics, Document, DocumentFormat,
    read_document, write_document,
};
pub use contractbridge_logging::{LogLevel, init_logging};
pub use contractbridge_producer::{
    Assembly, ConflictPolicy, DiscoveryPattern, DocumentOptions, generate_document,
};

// Re-export common dependencies
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use contractbridge::prelude::*;` for the producer and consumer entry points.
pub mod prelude {
    pub use crate::{
        Classification, ConflictPolicy, ContractEmitter, ContractError, ContractResult,
        DiscoveryPattern, Document, DocumentFormat, DocumentOptions, ExternalTypeIndex,
        TypeCatalog, generate_document, load_module, read_document, write_document,
    };

    pub use contractbridge_codegen::{ClassStyle, GeneratorOptions, Language};
}
