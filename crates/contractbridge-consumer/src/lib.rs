//! contractbridge-consumer - Contract sources from message documents
//!
//! The consumer half of the toolchain reads a contract document, decides
//! which of its schemas are already provided by reference modules, and
//! generates C# or Kotlin sources for the rest, one file per namespace.
//!
//! ```text
//! reference modules ──→ [ExternalTypeIndex]
//!                               │
//! Document ──→ [ContractEmitter] ┴─→ adapter ─→ contractbridge-codegen
//!                    │
//!                    └─→ {Namespace}.generated.{cs,kt}
//! ```

mod adapter;
mod batch;
mod emitter;
mod index;
mod layout;
mod modules;

pub use adapter::to_codegen_schema;
pub use batch::{ArtifactReport, BatchReport, ContractBatch, load_input};
pub use emitter::{ContractEmitter, ContractGenerationResult, GeneratedSourceFile};
pub use index::{ExternalTypeIndex, TypeInfo};
pub use layout::SourceLayout;
pub use modules::{ModuleLoadError, open_module};

pub use contractbridge_codegen::{ClassStyle, GeneratorOptions, Language, TypeMappings};
