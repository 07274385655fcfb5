//! Error types for contract generation

use thiserror::Error;

/// Result type alias for contract operations
pub type ContractResult<T> = Result<T, ContractError>;

/// Error type for contract operations
#[derive(Error, Debug)]
pub enum ContractError {
    /// Rejected input: blank title/version, absent type set, bad pattern, etc.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two different types would share one schema registry key
    #[error("schema name collision: '{name}' is claimed by both {first} and {second}")]
    SchemaNameCollision {
        name: String,
        first: String,
        second: String,
    },

    /// The document is structurally invalid
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A schema node could not be read from its generic form
    #[error("invalid schema '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },

    /// Code generation failed for a schema
    #[error("code generation failed for '{name}': {reason}")]
    Generation { name: String, reason: String },

    /// Processing of a single artifact failed
    #[error("failed to process {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: Box<ContractError>,
    },

    /// The batch was cancelled between artifacts
    #[error("cancelled")]
    Cancelled,

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ContractError {
    /// Shorthand for a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ContractError::Configuration(message.into())
    }

    /// Wrap an error with the path of the artifact being processed
    pub fn for_artifact(path: impl Into<String>, source: ContractError) -> Self {
        ContractError::Artifact {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error (or the error it wraps) is a rejected-input signal
    pub fn is_configuration(&self) -> bool {
        match self {
            ContractError::Configuration(_) | ContractError::SchemaNameCollision { .. } => true,
            ContractError::Artifact { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}
