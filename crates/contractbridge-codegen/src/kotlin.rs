//! Kotlin type generation for kotlinx.serialization.

use crate::generator::{Generator, Language};
use crate::model::{PropertySchema, SchemaType, TypeSchema, TypeSchemaKind};
use crate::naming::{sanitize_identifier, to_camel_case, to_pascal_case};
use crate::options::{ClassStyle, GeneratorOptions, TypeMappings};
use std::fmt::Write as _;

const INDENT: &str = "    ";

const BASE_IMPORTS: &[&str] = &[
    "kotlinx.serialization.Contextual",
    "kotlinx.serialization.SerialName",
    "kotlinx.serialization.Serializable",
];

const ANNOTATION_IMPORTS: &[&str] = &["kotlinx.serialization.Required"];

const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

const JSON_ELEMENT: &str = "kotlinx.serialization.json.JsonElement";

/// Kotlin generator
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinGenerator;

impl Generator for KotlinGenerator {
    fn name(&self) -> &'static str {
        "kotlin"
    }

    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn base_imports(&self) -> &'static [&'static str] {
        BASE_IMPORTS
    }

    fn annotation_imports(&self) -> &'static [&'static str] {
        ANNOTATION_IMPORTS
    }

    fn generate(&self, schema: &TypeSchema, options: &GeneratorOptions) -> String {
        let mut code = String::new();

        let _ = writeln!(
            code,
            "// Generated by contractbridge-codegen {}. Do not edit.",
            env!("CARGO_PKG_VERSION")
        );
        code.push('\n');
        let _ = writeln!(code, "package {}", options.namespace);
        code.push('\n');

        for import in self.base_imports() {
            let _ = writeln!(code, "import {}", import);
        }
        if options.generate_data_annotations {
            for import in self.annotation_imports() {
                let _ = writeln!(code, "import {}", import);
            }
        }
        code.push('\n');

        code.push_str(&render_type(schema, options));
        code
    }
}

fn render_type(schema: &TypeSchema, options: &GeneratorOptions) -> String {
    let mut code = String::new();
    let name = identifier(&schema.name);
    let mappings = &options.type_mappings;

    write_kdoc(&mut code, "", schema.description.as_deref());

    match &schema.kind {
        TypeSchemaKind::Object(properties) if properties.is_empty() => {
            code.push_str("@Serializable\n");
            let _ = writeln!(code, "class {} {{\n}}", name);
        }
        TypeSchemaKind::Object(properties) => {
            let (keyword, binding) = match options.class_style {
                ClassStyle::Class => ("class", "var"),
                ClassStyle::Record => ("data class", "val"),
            };
            code.push_str("@Serializable\n");
            let _ = writeln!(code, "{} {}(", keyword, name);
            for property in properties {
                write_parameter(&mut code, binding, property, options, mappings);
            }
            code.push_str(")\n");
        }
        TypeSchemaKind::Enum(values) => {
            code.push_str("@Serializable\n");
            let _ = writeln!(code, "enum class {} {{", name);
            for value in values {
                let _ = writeln!(code, "{INDENT}@SerialName(\"{}\")", escape_string(value));
                let _ = writeln!(code, "{INDENT}{},", identifier(&to_pascal_case(value)));
            }
            code.push_str("}\n");
        }
        TypeSchemaKind::Alias(ty) => {
            let _ = writeln!(code, "typealias {} = {}", name, map_type(ty, mappings));
        }
    }

    code
}

fn write_parameter(
    code: &mut String,
    binding: &str,
    property: &PropertySchema,
    options: &GeneratorOptions,
    mappings: &TypeMappings,
) {
    write_kdoc(code, INDENT, property.description.as_deref());

    let name = identifier(&to_camel_case(&property.name));
    if name.trim_matches('`') != property.name {
        let _ = writeln!(
            code,
            "{INDENT}@SerialName(\"{}\")",
            escape_string(&property.name)
        );
    }
    if options.generate_data_annotations && property.required {
        let _ = writeln!(code, "{INDENT}@Required");
    }

    let ty = map_type(&property.ty, mappings);
    let contextual = if needs_contextual(&ty) {
        "@Contextual "
    } else {
        ""
    };
    if property.is_optional() {
        let _ = writeln!(
            code,
            "{INDENT}{} {}: {}{}? = null,",
            binding, name, contextual, ty
        );
    } else {
        let _ = writeln!(code, "{INDENT}{} {}: {}{},", binding, name, contextual, ty);
    }
}

/// Kotlin type for a schema type
pub fn map_type(ty: &SchemaType, mappings: &TypeMappings) -> String {
    let mapped = |entry: &Option<String>, fallback: &str| {
        entry.clone().unwrap_or_else(|| fallback.to_string())
    };
    match ty {
        SchemaType::String(format) => match format.as_deref() {
            Some("date") => mapped(&mappings.date, "java.time.LocalDate"),
            Some("time") => mapped(&mappings.time, "java.time.LocalTime"),
            Some("date-time") => mapped(&mappings.date_time, "java.time.OffsetDateTime"),
            Some("duration") | Some("time-span") => mapped(&mappings.duration, "java.time.Duration"),
            Some("uuid") | Some("guid") => "java.util.UUID".to_string(),
            Some("uri") => "java.net.URI".to_string(),
            Some("byte") | Some("binary") => "ByteArray".to_string(),
            _ => "String".to_string(),
        },
        SchemaType::Integer(format) => match format.as_deref() {
            Some("int64") => "Long".to_string(),
            _ => "Int".to_string(),
        },
        SchemaType::Number(format) => match format.as_deref() {
            Some("float") => "Float".to_string(),
            Some("decimal") => "java.math.BigDecimal".to_string(),
            _ => "Double".to_string(),
        },
        SchemaType::Boolean => "Boolean".to_string(),
        SchemaType::Array(items) => format!(
            "{}<{}>",
            mapped(&mappings.array, "List"),
            map_type(items, mappings)
        ),
        SchemaType::Map(values) => format!(
            "{}<String, {}>",
            mapped(&mappings.map, "Map"),
            map_type(values, mappings)
        ),
        SchemaType::Ref(name) => identifier(name),
        SchemaType::Any => JSON_ELEMENT.to_string(),
    }
}

/// Platform types need a contextual serializer
fn needs_contextual(ty: &str) -> bool {
    ty.contains('.') && !ty.starts_with("kotlinx.") && !ty.contains('<')
}

fn identifier(name: &str) -> String {
    let name = sanitize_identifier(name);
    if KEYWORDS.contains(&name.as_str()) {
        format!("`{}`", name)
    } else {
        name
    }
}

fn write_kdoc(code: &mut String, indent: &str, description: Option<&str>) {
    let Some(description) = description else {
        return;
    };
    let _ = writeln!(code, "{indent}/**");
    for line in description.lines() {
        let _ = writeln!(code, "{indent} * {}", line.trim_end().replace("*/", "*&#47;"));
    }
    let _ = writeln!(code, "{indent} */");
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
}
