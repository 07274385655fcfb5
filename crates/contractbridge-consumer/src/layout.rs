//! Per-language layout of generated source files
//!
//! The code generation library returns one compilation unit per type. A
//! [`SourceLayout`] knows how to cut the type declaration out of such a unit
//! and how to wrap many declarations into one file per namespace.

use contractbridge_codegen::{GeneratorOptions, Language};
use contractbridge_core::{TOOL_NAME, TOOL_VERSION};
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Line prefixes that belong to a declaration without opening it
const CSHARP_PREAMBLE: &[&str] = &["///", "["];
const KOTLIN_PREAMBLE: &[&str] = &["/**", "*", "@"];

const CSHARP_TYPE_KEYWORDS: &[&str] = &["class", "record", "enum", "struct", "interface"];
const KOTLIN_TYPE_OPENERS: &[&str] = &[
    "class ",
    "data class ",
    "enum class ",
    "sealed class ",
    "object ",
    "interface ",
    "typealias ",
];

/// File layout for one target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLayout {
    language: Language,
}

impl SourceLayout {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// `{namespace}.generated.{ext}`
    pub fn file_name(&self, namespace: &str) -> String {
        format!(
            "{}.generated.{}",
            namespace,
            self.language.generator().extension()
        )
    }

    /// Auto-generated marker, plus `#nullable enable` for C# when enabled
    pub fn header(&self, options: &GeneratorOptions) -> String {
        let mut out = String::new();
        match self.language {
            Language::CSharp => {
                out.push_str("//----------------------\n");
                out.push_str("// <auto-generated>\n");
                let _ = writeln!(out, "//     Generated by {TOOL_NAME} {TOOL_VERSION}");
                out.push_str("// </auto-generated>\n");
                out.push_str("//----------------------\n\n");
                if options.generate_nullable_reference_types {
                    out.push_str("#nullable enable\n\n");
                }
            }
            Language::Kotlin => {
                out.push_str("// <auto-generated>\n");
                let _ = writeln!(out, "//     Generated by {TOOL_NAME} {TOOL_VERSION}. Do not edit.");
                out.push_str("// </auto-generated>\n\n");
            }
        }
        out
    }

    /// Import lines for library symbols and for whole namespaces
    ///
    /// Lines are deduplicated in first-occurrence order.
    pub fn imports(&self, symbols: &[&str], namespaces: &[String]) -> String {
        let mut lines: Vec<String> = Vec::new();
        let rendered = symbols
            .iter()
            .map(|symbol| self.import_symbol(symbol))
            .chain(namespaces.iter().map(|ns| self.import_namespace(ns)));
        for line in rendered {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn import_symbol(&self, symbol: &str) -> String {
        match self.language {
            Language::CSharp => format!("using {symbol};"),
            Language::Kotlin => format!("import {symbol}"),
        }
    }

    fn import_namespace(&self, namespace: &str) -> String {
        match self.language {
            Language::CSharp => format!("using {namespace};"),
            Language::Kotlin => format!("import {namespace}.*"),
        }
    }

    pub fn open_namespace(&self, namespace: &str) -> String {
        match self.language {
            Language::CSharp => format!("namespace {namespace}\n{{\n"),
            Language::Kotlin => format!("package {namespace}\n\n"),
        }
    }

    pub fn close_namespace(&self) -> &'static str {
        match self.language {
            Language::CSharp => "}\n",
            Language::Kotlin => "",
        }
    }

    /// An empty type named `name`, used when extraction finds nothing
    pub fn placeholder(&self, name: &str) -> String {
        match self.language {
            Language::CSharp => {
                format!("{INDENT}public partial class {name}\n{INDENT}{{\n{INDENT}}}\n")
            }
            Language::Kotlin => format!("class {name}\n"),
        }
    }

    /// Cut the first type declaration out of a generated compilation unit
    ///
    /// The declaration starts at its doc comment or attributes and ends
    /// where its braces and parentheses balance. Returns `None` when the
    /// unit declares no type or the declaration never closes.
    pub fn extract_type_body(&self, unit: &str) -> Option<String> {
        let lines: Vec<&str> = unit.lines().collect();
        let opening = lines.iter().position(|line| self.opens_type(line))?;

        let preamble = match self.language {
            Language::CSharp => CSHARP_PREAMBLE,
            Language::Kotlin => KOTLIN_PREAMBLE,
        };
        let mut start = opening;
        while start > 0 {
            let previous = lines[start - 1].trim_start();
            if previous.is_empty() || !preamble.iter().any(|p| previous.starts_with(p)) {
                break;
            }
            start -= 1;
        }

        let end = if self.language == Language::Kotlin
            && lines[opening].trim_start().starts_with("typealias ")
        {
            opening
        } else {
            closing_line(&lines, opening)?
        };

        let mut body = lines[start..=end].join("\n");
        body.push('\n');
        Some(body)
    }

    fn opens_type(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.language {
            Language::CSharp => {
                let mut words = trimmed.split_whitespace();
                let Some(first) = words.next() else {
                    return false;
                };
                if !matches!(first, "public" | "internal") {
                    return false;
                }
                words
                    .take_while(|w| !w.contains('(') && !w.contains('{'))
                    .any(|w| CSHARP_TYPE_KEYWORDS.contains(&w))
            }
            Language::Kotlin => KOTLIN_TYPE_OPENERS.iter().any(|k| trimmed.starts_with(k)),
        }
    }
}

/// Index of the line where the delimiters opened at `from` balance again
fn closing_line(lines: &[&str], from: usize) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut opened = false;

    for (index, line) in lines.iter().enumerate().skip(from) {
        if is_comment(line) {
            continue;
        }
        let mut in_string = false;
        let mut escaped = false;
        for c in line.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' | '(' => {
                    depth += 1;
                    opened = true;
                }
                '}' | ')' => depth -= 1,
                _ => {}
            }
        }
        if opened && depth <= 0 {
            return Some(index);
        }
    }

    None
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}
