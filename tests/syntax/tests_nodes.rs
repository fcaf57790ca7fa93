//! Node model and line state machine tests.

use rstest::rstest;
use yantra::parser::{LineKind, line_kind};
use yantra::syntax::ast::{Node, PragmaBody, PragmaKind};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[rstest]
#[case("// note", Some(LineKind::Comment))]
#[case("%walkers Eval;", Some(LineKind::Pragma))]
#[case("NUM := \"0\";", Some(LineKind::TokenDefinition))]
#[case("expr(e) := NUM;", Some(LineKind::RuleDefinition))]
#[case("Mixed := NUM;", None)]
#[case("expr NUM", None)]
fn test_line_kinds(#[case] line: &str, #[case] expected: Option<LineKind>) {
    assert_eq!(line_kind(line), expected);
}

#[test]
fn test_block_contents_are_never_classified() {
    let source = "%walkers Eval;\nexpr :=\n%{\n  %class Nope;\n  NOT A TOKEN\n  @Eval\n%}";
    let file = assert_clean(source);
    assert!(file.index().settings().class_name.is_none());

    let Some(Node::CodeBlock(block)) = file.node_at(2) else {
        panic!("expected a code block at line 2");
    };
    assert_eq!(block.body(), ["  %class Nope;", "  NOT A TOKEN", "  @Eval"]);
    assert_eq!(block.name().map(|name| name.as_str()), Some("expr::Eval::go"));
}

#[test]
fn test_nodes_sit_at_their_first_line() {
    let file = assert_clean(CALCULATOR);
    assert!(matches!(file.node_at(0), Some(Node::Comment(_))));
    assert!(matches!(file.node_at(15), Some(Node::Token(_))));
    assert!(matches!(file.node_at(21), Some(Node::Rule(_))));
    assert!(matches!(file.node_at(22), Some(Node::CodeBlockName(_))));
    assert!(matches!(file.node_at(23), Some(Node::CodeBlock(_))));
    assert!(file.node_at(25).is_none());
}

#[test]
fn test_inline_members_block_belongs_to_pragma() {
    let file = assert_clean(CALCULATOR);
    let Some(Node::Pragma(pragma)) = file.node_at(9) else {
        panic!("expected %members at line 9");
    };
    assert_eq!(pragma.kind(), Some(PragmaKind::Members));
    let block = pragma.block().unwrap();
    assert!(block.is_inline());
    assert_eq!(block.body(), ["    int depth = 0;"]);
    assert!(file.node_at(10).is_none());
}

#[test]
fn test_next_line_members_block_is_standalone() {
    let file = assert_clean(OBJECTS);
    let Some(Node::Pragma(pragma)) = file.node_at(4) else {
        panic!("expected %members at line 4");
    };
    assert!(matches!(pragma.body(), PragmaBody::Members { open: None, .. }));
    let Some(Node::CodeBlock(block)) = file.node_at(5) else {
        panic!("expected a code block at line 5");
    };
    assert_eq!(block.name().map(|name| name.as_str()), Some("Build::Members"));
}

#[test]
fn test_rule_elements() {
    let file = assert_clean(OBJECTS);
    let Some(Node::Rule(rule)) = file.node_at(15) else {
        panic!("expected a rule at line 15");
    };
    let names: Vec<&str> = rule.elements().iter().map(|element| element.name.text()).collect();
    assert_eq!(names, vec!["LBRACE", "pair", "RBRACE"]);
    assert!(rule.elements()[1].anchor.is_some());
    assert!(!rule.is_terminated());
    assert_eq!(rule.internal_name(), "object");
}

#[test]
fn test_unclosed_block_keeps_open_range() {
    let file = analyze_source("%walkers Eval;\nexpr :=\n%{\n  go();");
    assert_eq!(codes(&file), vec!["E0206"]);
    let Some(Node::CodeBlock(block)) = file.node_at(2) else {
        panic!("expected a code block at line 2");
    };
    assert!(!block.is_closed());
    assert!(!block.range().is_closed());
    assert_eq!(file.diagnostics()[0].range.start.line, 2);
}
