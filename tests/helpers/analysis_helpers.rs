//! Analysis and diagnostic assertion helpers.

use yantra::ide::AnalysisHost;
use yantra::{Diagnostic, FormatOptions, Severity, SyntaxFile};

/// Analyze a source string with default options.
pub fn analyze_source(source: &str) -> SyntaxFile {
    SyntaxFile::new(source)
}

/// A ready host for a source string.
pub fn host_for(source: &str) -> AnalysisHost {
    let mut host = AnalysisHost::new();
    host.parse(source);
    host
}

/// Diagnostic codes in report order.
pub fn codes(file: &SyntaxFile) -> Vec<&'static str> {
    file.diagnostics().iter().map(|diag| diag.code).collect()
}

/// Diagnostics of one severity.
pub fn with_severity(file: &SyntaxFile, severity: Severity) -> Vec<&Diagnostic> {
    file.diagnostics()
        .iter()
        .filter(|diag| diag.severity == severity)
        .collect()
}

/// Assert a source analyzes without any diagnostic and return the result.
pub fn assert_clean(source: &str) -> SyntaxFile {
    let file = analyze_source(source);
    assert!(
        file.diagnostics().is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        file.diagnostics().len(),
        file.diagnostics()
            .iter()
            .map(|diag| format!(
                "  Line {}: {} {}",
                diag.range.start.line + 1,
                diag.code,
                diag.message
            ))
            .collect::<Vec<_>>()
            .join("\n")
    );
    file
}

/// Formatted lines of a source string with default options.
pub fn format_source(source: &str) -> Vec<String> {
    yantra::syntax::format_lines(&analyze_source(source), &FormatOptions::default())
}
