//! Error types for type catalogs

use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two descriptors share one fully-qualified name
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A field type expression could not be parsed
    #[error("invalid type expression '{input}': {reason}")]
    InvalidTypeRef { input: String, reason: String },

    /// A descriptor is missing required information
    #[error("invalid descriptor '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// Rust source could not be parsed
    #[error("failed to parse Rust source: {0}")]
    Source(#[from] syn::Error),

    /// The module path has an extension no loader understands
    #[error("unsupported module format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
