//! Generator trait and registry

use crate::csharp::CSharpGenerator;
use crate::error::{CodegenError, CodegenResult};
use crate::kotlin::KotlinGenerator;
use crate::model::TypeSchema;
use crate::options::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A source generator for one target language
///
/// `generate` returns a complete compilation unit: header, imports, the
/// namespace or package declaration and the type itself.
pub trait Generator: Send + Sync {
    /// Unique generator identifier
    fn name(&self) -> &'static str;

    /// Target language name
    fn language(&self) -> Language;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    /// Imports every generated unit needs
    fn base_imports(&self) -> &'static [&'static str];

    /// Imports added when data annotations are enabled
    fn annotation_imports(&self) -> &'static [&'static str];

    fn generate(&self, schema: &TypeSchema, options: &GeneratorOptions) -> String;
}

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    CSharp,
    Kotlin,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Kotlin => "kotlin",
        }
    }

    /// The built-in generator for this language
    pub fn generator(self) -> &'static dyn Generator {
        match self {
            Language::CSharp => &CSHARP,
            Language::Kotlin => &KOTLIN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> CodegenResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(Language::CSharp),
            "kotlin" | "kt" => Ok(Language::Kotlin),
            other => Err(CodegenError::UnsupportedLanguage(other.to_string())),
        }
    }
}

static CSHARP: CSharpGenerator = CSharpGenerator;
static KOTLIN: KotlinGenerator = KotlinGenerator;

static GENERATORS: [&dyn Generator; 2] = [&CSHARP, &KOTLIN];

/// All built-in generators
pub fn generators() -> &'static [&'static dyn Generator] {
    &GENERATORS
}

/// Find a generator by language name or alias
pub fn find_generator(language: &str) -> CodegenResult<&'static dyn Generator> {
    Ok(language.parse::<Language>()?.generator())
}
