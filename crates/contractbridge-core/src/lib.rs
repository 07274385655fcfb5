//! contractbridge-core - Shared types for message contract generation
//!
//! This crate provides the types passed between the producer and consumer
//! halves of the toolchain:
//! - [`Document`] and its parts, the AsyncAPI contract that crosses the boundary
//! - [`SchemaNode`] for structural type descriptions
//! - [`ContractError`] for error handling
//! - [`Diagnostics`] for non-fatal findings returned next to results

mod classification;
mod dialect;
mod diagnostics;
mod document;
mod error;
pub mod identity;
pub mod schema;

pub use classification::Classification;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use dialect::{DocumentFormat, read_document, write_document};
pub use document::{
    ASYNCAPI_VERSION, Action, CHANNEL_REF_PREFIX, Channel, Components, Document, Info,
    JSON_CONTENT_TYPE, MESSAGE_REF_PREFIX, Message, MultiFormatSchema, Operation, Reference,
    SCHEMA_FORMAT,
};
pub use error::{ContractError, ContractResult};
pub use schema::{
    ORIGIN_IDENTITY, ORIGIN_NAMESPACE, PrimitiveType, Property, SCHEMA_REF_PREFIX, SchemaKind,
    SchemaNode,
};

/// Name used in generated-file markers
pub const TOOL_NAME: &str = "contractbridge";

/// Version used in generated-file markers
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Classification, ContractError, ContractResult, Diagnostic, DiagnosticCode, Diagnostics,
        Document, DocumentFormat, SchemaKind, SchemaNode,
    };
}
