//! C# type generation.
//!
//! Objects become `partial class` types with `{ get; set; }` properties, or
//! `partial record` types with `{ get; init; }` properties when the record
//! style is selected. Serialization uses `System.Text.Json` attributes.
//!
//! | Schema | C# |
//! |--------|----|
//! | `string` | `string` |
//! | `string` + `date-time` | `System.DateTimeOffset` |
//! | `string` + `uuid` | `System.Guid` |
//! | `integer` / `int64` | `int` / `long` |
//! | `number` / `float` / `decimal` | `double` / `float` / `decimal` |
//! | `array` | `System.Collections.Generic.ICollection<T>` |
//! | `additionalProperties` | `System.Collections.Generic.IDictionary<string, T>` |

use crate::generator::{Generator, Language};
use crate::model::{PropertySchema, SchemaType, TypeSchema, TypeSchemaKind};
use crate::naming::{sanitize_identifier, to_pascal_case};
use crate::options::{ClassStyle, GeneratorOptions, TypeMappings};
use std::fmt::Write as _;

const INDENT: &str = "    ";

const BASE_IMPORTS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Runtime.Serialization",
    "System.Text.Json.Serialization",
];

const ANNOTATION_IMPORTS: &[&str] = &["System.ComponentModel.DataAnnotations"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Value types that take `?` regardless of nullable reference types
const VALUE_TYPES: &[&str] = &[
    "bool", "byte", "short", "int", "long", "float", "double", "decimal", "DateTime",
    "DateTimeOffset", "DateOnly", "TimeOnly", "TimeSpan", "Guid",
];

fn defaults() -> TypeMappings {
    TypeMappings {
        date: Some("System.DateTimeOffset".to_string()),
        time: Some("System.TimeSpan".to_string()),
        date_time: Some("System.DateTimeOffset".to_string()),
        duration: Some("System.TimeSpan".to_string()),
        array: Some("System.Collections.Generic.ICollection".to_string()),
        map: Some("System.Collections.Generic.IDictionary".to_string()),
    }
}

/// C# generator
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpGenerator;

impl Generator for CSharpGenerator {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn language(&self) -> Language {
        Language::CSharp
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn base_imports(&self) -> &'static [&'static str] {
        BASE_IMPORTS
    }

    fn annotation_imports(&self) -> &'static [&'static str] {
        ANNOTATION_IMPORTS
    }

    fn generate(&self, schema: &TypeSchema, options: &GeneratorOptions) -> String {
        let mut code = String::new();

        code.push_str("//----------------------\n");
        code.push_str("// <auto-generated>\n");
        let _ = writeln!(
            code,
            "//     Generated by contractbridge-codegen {}",
            env!("CARGO_PKG_VERSION")
        );
        code.push_str("// </auto-generated>\n");
        code.push_str("//----------------------\n\n");

        if options.generate_nullable_reference_types {
            code.push_str("#nullable enable\n\n");
        }

        for import in self.base_imports() {
            let _ = writeln!(code, "using {};", import);
        }
        if options.generate_data_annotations {
            for import in self.annotation_imports() {
                let _ = writeln!(code, "using {};", import);
            }
        }
        code.push('\n');

        let _ = writeln!(code, "namespace {}", options.namespace);
        code.push_str("{\n");
        code.push_str(&render_type(schema, options));
        code.push_str("}\n");

        code
    }
}

/// The type declaration alone, indented one level
fn render_type(schema: &TypeSchema, options: &GeneratorOptions) -> String {
    let mut code = String::new();
    let name = type_name(&schema.name);
    let mappings = options.type_mappings.or(&defaults());

    write_summary(&mut code, INDENT, schema.description.as_deref());

    match &schema.kind {
        TypeSchemaKind::Object(properties) => {
            let keyword = match options.class_style {
                ClassStyle::Class => "class",
                ClassStyle::Record => "record",
            };
            let _ = writeln!(code, "{INDENT}public partial {} {}", keyword, name);
            let _ = writeln!(code, "{INDENT}{{");
            for (i, property) in properties.iter().enumerate() {
                if i > 0 {
                    code.push('\n');
                }
                write_property(&mut code, &name, property, options, &mappings);
            }
            let _ = writeln!(code, "{INDENT}}}");
        }
        TypeSchemaKind::Enum(values) => {
            let _ = writeln!(code, "{INDENT}[JsonConverter(typeof(JsonStringEnumConverter))]");
            let _ = writeln!(code, "{INDENT}public enum {}", name);
            let _ = writeln!(code, "{INDENT}{{");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    code.push('\n');
                }
                let _ = writeln!(
                    code,
                    "{INDENT}{INDENT}[EnumMember(Value = \"{}\")]",
                    escape_string(value)
                );
                let _ = writeln!(code, "{INDENT}{INDENT}{} = {},", member_name(value), i);
            }
            let _ = writeln!(code, "{INDENT}}}");
        }
        TypeSchemaKind::Alias(ty) => {
            let base = match ty {
                SchemaType::Array(items) => format!(
                    "System.Collections.ObjectModel.Collection<{}>",
                    map_type(items, &mappings)
                ),
                SchemaType::Map(values) => format!(
                    "System.Collections.Generic.Dictionary<string, {}>",
                    map_type(values, &mappings)
                ),
                other => {
                    let _ = writeln!(code, "{INDENT}public partial class {}", name);
                    let _ = writeln!(code, "{INDENT}{{");
                    let _ = writeln!(
                        code,
                        "{INDENT}{INDENT}public {} Value {{ get; set; }}{}",
                        map_type(other, &mappings),
                        default_initializer(other, &mappings, options)
                    );
                    let _ = writeln!(code, "{INDENT}}}");
                    return code;
                }
            };
            let _ = writeln!(code, "{INDENT}public partial class {} : {}", name, base);
            let _ = writeln!(code, "{INDENT}{{");
            let _ = writeln!(code, "{INDENT}}}");
        }
    }

    code
}

fn write_property(
    code: &mut String,
    owner: &str,
    property: &PropertySchema,
    options: &GeneratorOptions,
    mappings: &TypeMappings,
) {
    let indent = format!("{INDENT}{INDENT}");
    write_summary(code, &indent, property.description.as_deref());

    let _ = writeln!(
        code,
        "{indent}[JsonPropertyName(\"{}\")]",
        escape_string(&property.name)
    );
    if options.generate_data_annotations && property.required && !property.nullable {
        let _ = writeln!(code, "{indent}[Required]");
    }

    let mut name = member_name(&property.name);
    if name == owner {
        name.push_str("Value");
    }

    let mut ty = map_type(&property.ty, mappings);
    let optional = property.is_optional();
    if optional && (is_value_type(&ty) || options.generate_nullable_reference_types) {
        ty.push('?');
    }

    match options.class_style {
        ClassStyle::Class => {
            let initializer = if optional {
                ""
            } else {
                default_initializer(&property.ty, mappings, options)
            };
            let _ = writeln!(
                code,
                "{indent}public {} {} {{ get; set; }}{}",
                ty, name, initializer
            );
        }
        ClassStyle::Record => {
            let required = if optional { "" } else { "required " };
            let _ = writeln!(code, "{indent}public {}{} {} {{ get; init; }}", required, ty, name);
        }
    }
}

/// ` = default!;` for non-nullable reference types under nullable annotations
fn default_initializer(
    ty: &SchemaType,
    mappings: &TypeMappings,
    options: &GeneratorOptions,
) -> &'static str {
    if options.generate_nullable_reference_types && !is_value_type(&map_type(ty, mappings)) {
        " = default!;"
    } else {
        ""
    }
}

/// C# type for a schema type
pub fn map_type(ty: &SchemaType, mappings: &TypeMappings) -> String {
    let mapped = |entry: &Option<String>, fallback: &str| {
        entry.clone().unwrap_or_else(|| fallback.to_string())
    };
    match ty {
        SchemaType::String(format) => match format.as_deref() {
            Some("date") => mapped(&mappings.date, "System.DateTimeOffset"),
            Some("time") => mapped(&mappings.time, "System.TimeSpan"),
            Some("date-time") => mapped(&mappings.date_time, "System.DateTimeOffset"),
            Some("duration") | Some("time-span") => mapped(&mappings.duration, "System.TimeSpan"),
            Some("uuid") | Some("guid") => "System.Guid".to_string(),
            Some("uri") => "System.Uri".to_string(),
            Some("byte") | Some("binary") => "byte[]".to_string(),
            _ => "string".to_string(),
        },
        SchemaType::Integer(format) => match format.as_deref() {
            Some("int64") => "long".to_string(),
            _ => "int".to_string(),
        },
        SchemaType::Number(format) => match format.as_deref() {
            Some("float") => "float".to_string(),
            Some("decimal") => "decimal".to_string(),
            _ => "double".to_string(),
        },
        SchemaType::Boolean => "bool".to_string(),
        SchemaType::Array(items) => format!(
            "{}<{}>",
            mapped(&mappings.array, "System.Collections.Generic.ICollection"),
            map_type(items, mappings)
        ),
        SchemaType::Map(values) => format!(
            "{}<string, {}>",
            mapped(&mappings.map, "System.Collections.Generic.IDictionary"),
            map_type(values, mappings)
        ),
        SchemaType::Ref(name) => type_name(name),
        SchemaType::Any => "object".to_string(),
    }
}

fn is_value_type(ty: &str) -> bool {
    let simple = ty.rsplit('.').next().unwrap_or(ty);
    VALUE_TYPES.contains(&simple)
}

fn type_name(name: &str) -> String {
    escape_keyword(sanitize_identifier(name))
}

fn member_name(wire: &str) -> String {
    escape_keyword(sanitize_identifier(&to_pascal_case(wire)))
}

fn escape_keyword(name: String) -> String {
    if KEYWORDS.contains(&name.as_str()) {
        format!("@{}", name)
    } else {
        name
    }
}

fn write_summary(code: &mut String, indent: &str, description: Option<&str>) {
    let Some(description) = description else {
        return;
    };
    let _ = writeln!(code, "{indent}/// <summary>");
    for line in description.lines() {
        let _ = writeln!(code, "{indent}/// {}", escape_xml(line.trim_end()));
    }
    let _ = writeln!(code, "{indent}/// </summary>");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "csharp/csharp_tests.rs"]
mod csharp_tests;
