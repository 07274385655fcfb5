//! Diagnostics reporting

use contractbridge_core::{Diagnostics, Severity};

/// Emit one tracing event per diagnostic; returns the number of warnings
///
/// Warnings go out at `WARN` and informational findings at `INFO`, each with
/// `code` and `subject` fields.
pub fn report_diagnostics(diagnostics: &Diagnostics) -> usize {
    let mut warnings = 0;
    for diagnostic in diagnostics.iter() {
        let code = diagnostic.code.as_str();
        let subject = diagnostic.subject.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Warning => {
                warnings += 1;
                tracing::warn!(code, subject, "{}", diagnostic.message);
            }
            Severity::Info => {
                tracing::info!(code, subject, "{}", diagnostic.message);
            }
        }
    }
    warnings
}
