//! contractbridge-producer - Producer side of contract generation
//!
//! Selects message types from a [`TypeCatalog`] with [`DiscoveryPattern`]s,
//! collects their structural dependencies, and assembles the AsyncAPI
//! [`Document`](contractbridge_core::Document) that describes them.
//!
//! ```ignore
//! let loaded = contractbridge_catalog::load_module(path)?;
//! let patterns = vec![DiscoveryPattern::event("Orders.Events.**")];
//! let assembly = generate_document(&loaded.catalog, &patterns, &options)?;
//! ```

mod assembler;
mod discovery;
mod pattern;
mod walker;

pub use assembler::{Assembly, DocumentAssembler, assemble, channel_address, primitive_schema};
pub use discovery::{ConflictPolicy, DiscoveredType, Discovery, discover, discover_with};
pub use pattern::{DiscoveryPattern, PatternTarget};
pub use walker::{Closure, SchemaWalker, collect_closure};

use contractbridge_catalog::TypeCatalog;
use contractbridge_core::ContractResult;

/// Document-level settings for [`generate_document`]
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub conflict_policy: ConflictPolicy,
}

impl DocumentOptions {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}

/// Discover, walk and assemble in one pass
///
/// Diagnostics from discovery come first, followed by those from the walk.
pub fn generate_document(
    catalog: &TypeCatalog,
    patterns: &[DiscoveryPattern],
    options: &DocumentOptions,
) -> ContractResult<Assembly> {
    let discovery = discover_with(catalog, patterns, options.conflict_policy)?;

    let mut assembler = DocumentAssembler::new()
        .title(&options.title)
        .version(&options.version)
        .types(discovery.types);
    if let Some(description) = &options.description {
        assembler = assembler.description(description);
    }

    let assembly = assembler.assemble(catalog)?;

    let mut diagnostics = discovery.diagnostics;
    diagnostics.extend(assembly.diagnostics);

    Ok(Assembly {
        document: assembly.document,
        diagnostics,
    })
}
