//! contractbridge-codegen - Type generation from JSON Schema
//!
//! A standalone library that turns named JSON Schemas into C# or Kotlin type
//! declarations. It has no knowledge of AsyncAPI documents; callers hand it
//! one schema at a time.
//!
//! # Architecture
//!
//! ```text
//! JSON Schema (serde_json::Value)
//!     ↓
//!  [parse_type_schema]
//!     ↓
//!  TypeSchema
//!     ↓
//!  ├─→ [CSharpGenerator] → *.cs
//!  └─→ [KotlinGenerator] → *.kt
//! ```
//!
//! # Usage
//!
//! ```
//! use contractbridge_codegen::{GeneratorOptions, Language, parse_type_schema};
//! use serde_json::json;
//!
//! let schema = parse_type_schema(
//!     "Customer",
//!     &json!({"type": "object", "properties": {"name": {"type": "string"}}}),
//! )
//! .unwrap();
//! let code = Language::CSharp
//!     .generator()
//!     .generate(&schema, &GeneratorOptions::default());
//! assert!(code.contains("public partial class Customer"));
//! ```

mod csharp;
mod error;
mod generator;
mod kotlin;
mod model;
pub mod naming;
mod options;

pub use csharp::CSharpGenerator;
pub use error::{CodegenError, CodegenResult};
pub use generator::{Generator, Language, find_generator, generators};
pub use kotlin::KotlinGenerator;
pub use model::{
    PropertySchema, SchemaType, TypeSchema, TypeSchemaKind, is_nullable, parse_type,
    parse_type_schema,
};
pub use options::{ClassStyle, DEFAULT_NAMESPACE, GeneratorOptions, TypeMappings};

/// Parse `schema` and generate it for `language` in one call
pub fn generate_type(
    language: Language,
    name: &str,
    schema: &serde_json::Value,
    options: &GeneratorOptions,
) -> CodegenResult<String> {
    let schema = parse_type_schema(name, schema)?;
    Ok(language.generator().generate(&schema, options))
}
