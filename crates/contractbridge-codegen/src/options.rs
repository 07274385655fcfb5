//! Generator options

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "Contracts";

/// Shape of generated object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStyle {
    /// Mutable class with settable members
    #[default]
    Class,
    /// Immutable record / data class
    Record,
}

impl fmt::Display for ClassStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassStyle::Class => write!(f, "class"),
            ClassStyle::Record => write!(f, "record"),
        }
    }
}

impl FromStr for ClassStyle {
    type Err = CodegenError;

    fn from_str(s: &str) -> CodegenResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" => Ok(ClassStyle::Class),
            "record" | "data" => Ok(ClassStyle::Record),
            other => Err(CodegenError::UnknownClassStyle(other.to_string())),
        }
    }
}

/// Target types for formats and containers
///
/// Unset entries fall back to the generator's own defaults. Container entries
/// name the generic type only (`List`, `System.Collections.Generic.IList`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TypeMappings {
    pub date: Option<String>,
    pub time: Option<String>,
    pub date_time: Option<String>,
    pub duration: Option<String>,
    pub array: Option<String>,
    pub map: Option<String>,
}

impl TypeMappings {
    /// Fill unset entries from `defaults`
    pub fn or(&self, defaults: &TypeMappings) -> TypeMappings {
        let pick = |own: &Option<String>, fallback: &Option<String>| {
            own.clone().or_else(|| fallback.clone())
        };
        TypeMappings {
            date: pick(&self.date, &defaults.date),
            time: pick(&self.time, &defaults.time),
            date_time: pick(&self.date_time, &defaults.date_time),
            duration: pick(&self.duration, &defaults.duration),
            array: pick(&self.array, &defaults.array),
            map: pick(&self.map, &defaults.map),
        }
    }
}

/// Options shared by all generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub class_style: ClassStyle,

    #[serde(default = "default_true")]
    pub generate_data_annotations: bool,

    #[serde(default = "default_true")]
    pub generate_nullable_reference_types: bool,

    #[serde(default)]
    pub type_mappings: TypeMappings,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            class_style: ClassStyle::default(),
            generate_data_annotations: true,
            generate_nullable_reference_types: true,
            type_mappings: TypeMappings::default(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_class_style(mut self, class_style: ClassStyle) -> Self {
        self.class_style = class_style;
        self
    }
}
