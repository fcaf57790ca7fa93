//! Definitions index tests.

use yantra::hir::{DefinitionDetail, Reference, SymbolKind};
use yantra::{Range, Severity};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// TOKENS
// =============================================================================

#[test]
fn test_single_token_definition() {
    let file = assert_clean(SINGLE_TOKEN);
    let index = file.index();

    assert_eq!(index.definition_count(), 1);
    let defs = index.definitions_of(SymbolKind::Token, "TOKEN");
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "TOKEN");
    assert_eq!(defs[0].range, Range::on_line(0, 0, 5));
    assert_eq!(
        defs[0].detail,
        DefinitionDetail::Token {
            literal: "\"x\"".into()
        }
    );
}

#[test]
fn test_token_redefinition_accumulates() {
    let file = assert_clean("X := \"a\";\nX := \"b\";");
    assert_eq!(
        file.index().definition_ranges(SymbolKind::Token, "X"),
        vec![Range::on_line(0, 0, 1), Range::on_line(1, 0, 1)]
    );
}

#[test]
fn test_token_defined_later_resolves() {
    let file = assert_clean(TOKEN_DEFINED_LATER);
    assert!(file.index().lookup(&Reference::token("ID")));
    assert!(file.index().forward_references().is_empty());
}

#[test]
fn test_token_never_defined_warns_at_reference() {
    let file = analyze_source(TOKEN_NEVER_DEFINED);
    assert_eq!(codes(&file), vec!["W0301"]);

    let warning = &file.diagnostics()[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.range, Range::on_line(0, 13, 20));
    assert!(warning.message.contains("MISSING"));
}

// =============================================================================
// RULES
// =============================================================================

#[test]
fn test_rule_bodies_get_internal_names() {
    let file = assert_clean(TWO_EXPR_BODIES);
    let internal: Vec<&str> = file
        .index()
        .definitions_of(SymbolKind::Rule, "expr")
        .iter()
        .map(|def| def.internal_name().as_str())
        .collect();
    assert_eq!(internal, vec!["expr", "expr_1"]);
    assert_eq!(file.index().rule_definition_count("expr"), 2);
}

#[test]
fn test_self_reference_is_not_a_forward_reference() {
    let file = assert_clean("A := \"a\";\nlist := list A;");
    assert_eq!(file.index().rule_definition_count("list"), 1);
}

#[test]
fn test_rule_with_blocks_expects_them() {
    let file = assert_clean(CALCULATOR);
    let bodies = file.index().definitions_of(SymbolKind::Rule, "expr");
    assert!(bodies.iter().all(|def| def.expects_blocks()));
    let terms = file.index().definitions_of(SymbolKind::Rule, "term");
    assert!(terms.iter().all(|def| !def.expects_blocks()));
}

// =============================================================================
// WALKERS, FUNCTIONS AND CODE BLOCKS
// =============================================================================

#[test]
fn test_walkers_and_default_walker() {
    let file = assert_clean(CALCULATOR);
    let index = file.index();
    let walkers: Vec<&str> = index.names(SymbolKind::Walker).map(|name| name.as_str()).collect();
    assert_eq!(walkers, vec!["Eval", "Print"]);
    assert_eq!(index.settings().default_walker.as_deref(), Some("Eval"));
    assert_eq!(index.settings().class_name.as_deref(), Some("Calculator"));
    assert_eq!(index.settings().start_rule.as_deref(), Some("expr"));
}

#[test]
fn test_functions_for_rule() {
    let file = assert_clean(CALCULATOR);
    let functions = file.index().functions_for_rule("expr");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "expr::Eval::value");
    assert!(file.index().functions_for_rule("term").is_empty());
}

#[test]
fn test_code_blocks_are_keyed_by_internal_rule_name() {
    let file = assert_clean(CALCULATOR);
    let blocks: Vec<&str> = file
        .index()
        .names(SymbolKind::CodeBlock)
        .map(|name| name.as_str())
        .collect();
    assert_eq!(
        blocks,
        vec!["Eval::Members", "expr::Eval::value", "expr::Print::go", "expr_1::Eval::value"]
    );
}

#[test]
fn test_walker_interface_blocks_need_no_implementation() {
    let file = assert_clean(STRINGS);
    let index = file.index();
    assert_eq!(index.walker_interface("Dump").map(|name| name.as_str()), Some("IDumper"));
    assert!(index.is_defined(SymbolKind::Function, "value::Dump::show"));
    assert!(!index.is_defined(SymbolKind::CodeBlock, "value::Dump::show"));
    assert!(index.is_defined(SymbolKind::CodeBlock, "value::Eval::go"));
}

#[test]
fn test_missing_function_block_is_reported() {
    let source = "%walkers Eval;\n%function expr Eval::value() -> int;\nexpr :=\n%{\n%}";
    let file = analyze_source(source);
    assert_eq!(codes(&file), vec!["W0301"]);
    assert!(file.diagnostics()[0].message.contains("expr::Eval::value"));
}

#[test]
fn test_lexer_modes() {
    let file = assert_clean(STRINGS);
    let modes: Vec<&str> = file
        .index()
        .names(SymbolKind::LexerMode)
        .map(|name| name.as_str())
        .collect();
    assert_eq!(modes, vec!["str", "common"]);
}
