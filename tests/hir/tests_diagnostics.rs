//! Diagnostics tests: one document per diagnostic kind.

use rstest::rstest;
use yantra::{AnalysisOptions, Range, Severity, analyze};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// SINGLE DIAGNOSTIC PER DOCUMENT
// =============================================================================

#[rstest]
#[case("what is this", "E0101")]
#[case("ID := x;", "E0102")]
#[case("expr := a + b;", "E0103")]
#[case("A := \"a\";\nexpr := A^A;", "E0103")]
#[case("A := \"a\";\nexpr := A(x)A;", "E0103")]
#[case("%walkers", "E0104")]
#[case("ID := \"x\"", "E0105")]
#[case("%walkers Eval;\nexpr :=\n@Eval::\n%{\n%}", "E0106")]
#[case("%}", "E0203")]
#[case("%{\n%}", "E0204")]
#[case("@Eval", "E0205")]
#[case("%walkers Eval;\nexpr :=\n%{\n  go();", "E0206")]
#[case("%foo bar", "E0301")]
#[case("%class A;\n%class B;", "E0302")]
#[case("%members Eval\n%{\n%}", "E0303")]
#[case(
    "%walkers Eval;\n%function expr Eval::f() -> int;\n%function expr Eval::f() -> int;\nexpr := ;",
    "E0304"
)]
#[case("%walkers Eval;\n%walker_interface Eval IEval;\n%members Eval %{\n%}", "E0305")]
#[case("A := \"a\";\nexpr := ^A ^A;", "E0306")]
#[case("expr := Foo;", "E0307")]
#[case("A := \"a\";\nexpr := A(alias);", "E0308")]
#[case("%function expr f() -> int;\nexpr := ;", "E0309")]
#[case("%lexer_include other;", "W0301")]
#[case("A := \"a\";\n%left A;", "W0302")]
#[case("%walkers Eval;\nexpr :=\n@Print\n%{\n%}", "W0303")]
#[case("%walkers Eval;\nexpr :=\n@Eval::missing\n%{\n%}", "W0304")]
fn test_single_diagnostic(#[case] source: &str, #[case] code: &str) {
    let file = analyze_source(source);
    assert_eq!(codes(&file), vec![code], "{source:?}: {:?}", file.diagnostics());

    let expected = if code.starts_with('W') {
        Severity::Warning
    } else {
        Severity::Error
    };
    assert_eq!(file.diagnostics()[0].severity, expected);
}

// =============================================================================
// WALKERS
// =============================================================================

#[test]
fn test_undefined_default_walker_is_anchored_to_name() {
    let file = analyze_source("%walkers A B;\n%default_walker C;");
    let errors = with_severity(&file, Severity::Error);
    assert_eq!(file.diagnostics().len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].range, Range::on_line(1, 16, 17));
}

#[test]
fn test_defined_default_walker_is_accepted() {
    let file = assert_clean("%walkers A B;\n%default_walker B;");
    assert_eq!(file.index().settings().default_walker.as_deref(), Some("B"));
}

#[test]
fn test_second_default_walker_is_rejected() {
    let file = analyze_source("%walkers A B;\n%default_walker A;\n%default_walker B;");
    assert_eq!(codes(&file), vec!["E0302"]);
    assert_eq!(file.diagnostics()[0].range.start.line, 2);
}

// =============================================================================
// CODE BLOCK EXPECTATIONS
// =============================================================================

#[test]
fn test_rule_without_block_reports_twice() {
    let file = analyze_source(RULE_WITHOUT_BLOCK);
    assert_eq!(codes(&file), vec!["E0201", "E0202"]);

    let expected = &file.diagnostics()[0];
    assert_eq!(expected.range.start.line, 2);
    let rule = &file.diagnostics()[1];
    assert_eq!(rule.range, Range::on_line(1, 0, 9));
    assert!(rule.message.contains("expr"));

    // The offending line is still analyzed.
    assert!(file.index().is_defined(yantra::SymbolKind::Token, "B"));
}

#[test]
fn test_rule_with_one_block_may_end_anywhere() {
    let file = assert_clean("%walkers Eval;\nexpr :=\n%{\n%}\n\nA := \"a\";");
    assert!(file.index().is_defined(yantra::SymbolKind::Token, "A"));
}

#[rstest]
#[case("%walkers Eval;\n%members Eval", 1)]
#[case("%walkers Eval;\nexpr :=\n%{\n%}\n@Eval", 4)]
fn test_promised_block_missing_at_end(#[case] source: &str, #[case] line: u32) {
    let file = analyze_source(source);
    assert_eq!(codes(&file), vec!["E0201"]);
    assert_eq!(file.diagnostics()[0].range.start.line, line);
}

#[test]
fn test_block_after_blank_line_reported_once() {
    let file = analyze_source("%walkers Eval;\nexpr :=\n\n%{\n%}");
    assert_eq!(codes(&file), vec!["E0201", "E0202"]);
}

#[test]
fn test_named_block_without_opening() {
    let file = analyze_source("%walkers Eval;\nexpr :=\n@Eval\nA := \"a\";");
    assert_eq!(codes(&file), vec!["E0201", "E0202"]);
}

// =============================================================================
// THRESHOLD
// =============================================================================

#[test]
fn test_threshold_keeps_earlier_results() {
    let source = "A := \"a\";\nbad\nbad\nbad\nB := \"b\";";
    let file = analyze(source, &AnalysisOptions::default().with_max_errors(2));

    assert!(file.is_aborted());
    assert_eq!(codes(&file), vec!["E0101", "E0101", "E0101", "E0207"]);
    assert!(file.index().is_defined(yantra::SymbolKind::Token, "A"));
    assert!(!file.index().is_defined(yantra::SymbolKind::Token, "B"));
}

#[test]
fn test_messages_are_human_readable() {
    let file = analyze_source("%foo bar");
    assert_eq!(&*file.diagnostics()[0].message, "unknown pragma '%foo'");
    assert_eq!(file.diagnostics()[0].range, Range::on_line(0, 1, 4));
}
