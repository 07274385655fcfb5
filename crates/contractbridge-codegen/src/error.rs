//! Error types for code generation

use thiserror::Error;

/// Errors raised while reading schemas or selecting a generator
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("invalid schema for {name}: {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("unsupported language: {0} (expected csharp or kotlin)")]
    UnsupportedLanguage(String),

    #[error("unknown class style: {0} (expected class or record)")]
    UnknownClassStyle(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for code generation
pub type CodegenResult<T> = Result<T, CodegenError>;

impl CodegenError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        CodegenError::InvalidSchema {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
