//! AnalysisHost contract tests.

use yantra::ide::{AnalysisHost, AnalysisStatus};
use yantra::{AnalysisOptions, FormatOptions, Severity};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_status_lifecycle() {
    let mut host = AnalysisHost::new();
    assert_eq!(host.status(), AnalysisStatus::Idle);
    assert!(host.document_symbols().is_empty());
    assert!(host.semantic_tokens().is_empty());
    assert!(host.folding_ranges().is_empty());

    host.parse(SINGLE_TOKEN);
    assert_eq!(host.status(), AnalysisStatus::Ready);
    assert_eq!(host.document_symbols().len(), 1);
}

#[test]
fn test_node_array_matches_line_count() {
    let host = host_for(CALCULATOR);
    assert_eq!(host.nodes().len(), CALCULATOR.split('\n').count());
    assert!(host.nodes()[5].is_none());
    assert!(host.nodes()[21].is_some());
    // Lines inside a block have no node of their own.
    assert!(host.nodes()[24].is_none());
}

#[test]
fn test_errors_are_reported() {
    let host = host_for(TOKEN_NEVER_DEFINED);
    assert_eq!(host.errors().len(), 1);
    assert_eq!(host.errors()[0].severity, Severity::Warning);
}

#[test]
fn test_formatted_lines_refused_with_diagnostics() {
    let host = host_for(TOKEN_NEVER_DEFINED);
    assert!(host.formatted_lines().is_empty());
}

#[test]
fn test_formatted_lines_use_format_options() {
    let mut host = host_for("%walkers Eval;\nexpr :=\n%{\n\t  go();\n%}");
    host.set_format_options(FormatOptions {
        tab_size: 2,
        insert_spaces: true,
    });
    assert_eq!(
        host.formatted_lines(),
        vec!["%walkers Eval;", "expr :=", "%{", "  go();", "%}"]
    );
}

#[test]
fn test_with_options_threshold() {
    let mut host = AnalysisHost::with_options(AnalysisOptions::default().with_max_errors(0));
    host.parse("bad\nA := \"a\";");
    assert!(host.file().is_aborted());
    assert_eq!(host.definitions().definition_count(), 0);

    host.set_max_errors(10);
    host.parse("bad\nA := \"a\";");
    assert!(!host.file().is_aborted());
    assert_eq!(host.definitions().definition_count(), 1);
}

#[test]
fn test_crlf_source() {
    let host = host_for("expr := ID;\r\nID := \"x\";\r\n");
    assert!(host.errors().is_empty());
    assert_eq!(host.definitions_at(0, 9), vec![yantra::Range::on_line(1, 0, 2)]);
}
