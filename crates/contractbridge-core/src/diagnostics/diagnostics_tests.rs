#![allow(non_snake_case)]

use super::*;

#[test]
fn Diagnostic___display___includes_code_and_subject() {
    let diagnostic = Diagnostic::warning(DiagnosticCode::UnmatchedPattern, "no types matched")
        .with_subject("Orders.Missing.**");

    assert_eq!(
        diagnostic.to_string(),
        "[unmatched-pattern] Orders.Missing.**: no types matched"
    );
}

#[test]
fn Diagnostic___display___without_subject() {
    let diagnostic = Diagnostic::info(DiagnosticCode::SkippedItem, "tuple struct skipped");

    assert_eq!(diagnostic.to_string(), "[skipped-item] tuple struct skipped");
}

#[test]
fn Diagnostics___with_code___filters() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::warning(DiagnosticCode::UnmatchedPattern, "a"));
    diagnostics.push(Diagnostic::warning(DiagnosticCode::ModuleLoadFailed, "b"));
    diagnostics.push(Diagnostic::warning(DiagnosticCode::UnmatchedPattern, "c"));

    let unmatched: Vec<_> = diagnostics
        .with_code(DiagnosticCode::UnmatchedPattern)
        .map(|d| d.message.as_str())
        .collect();

    assert_eq!(unmatched, vec!["a", "c"]);
}

#[test]
fn Diagnostics___has_warnings___false_for_info_only() {
    let diagnostics: Diagnostics = vec![Diagnostic::info(DiagnosticCode::SkippedItem, "x")]
        .into_iter()
        .collect();

    assert!(!diagnostics.has_warnings());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn Diagnostics___extend___preserves_order() {
    let mut first = Diagnostics::new();
    first.push(Diagnostic::info(DiagnosticCode::SkippedItem, "1"));
    let mut second = Diagnostics::new();
    second.push(Diagnostic::info(DiagnosticCode::SkippedItem, "2"));

    first.extend(second);

    let messages: Vec<_> = first.iter().map(|d| d.message.clone()).collect();
    assert_eq!(messages, vec!["1", "2"]);
}

#[test]
fn Diagnostics___serializes_as_array() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(
        Diagnostic::warning(DiagnosticCode::ModuleLoadFailed, "unsupported format")
            .with_subject("libs/native.so"),
    );

    let json = serde_json::to_value(&diagnostics).unwrap();

    assert_eq!(json[0]["code"], "module-load-failed");
    assert_eq!(json[0]["severity"], "warning");
    assert_eq!(json[0]["subject"], "libs/native.so");
}
