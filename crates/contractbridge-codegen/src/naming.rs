//! Naming convention utilities for generated code.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `display_name`, `displayName` | [`to_pascal_case`] | `DisplayName` |
//! | `display_name`, `DisplayName` | [`to_camel_case`] | `displayName` |
//! | `word` | [`capitalize`] | `Word` |
//! | `2nd-line` | [`sanitize_identifier`] | `_2nd_line` |

/// Convert snake_case, kebab-case or camelCase to PascalCase.
///
/// ```
/// use contractbridge_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("placedAt"), "PlacedAt");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_', ' ', '.'])
        .map(capitalize)
        .collect()
}

/// Convert snake_case, kebab-case or PascalCase to camelCase.
///
/// ```
/// use contractbridge_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("display_name"), "displayName");
/// assert_eq!(to_camel_case("OrderId"), "orderId");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Replace characters that cannot appear in an identifier.
///
/// A leading digit gets an underscore prefix; an empty input becomes `_`.
pub fn sanitize_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
