//! Document symbols, semantic tokens, hover and folding.

use yantra::ide::{FoldingRange, TokenType};
use yantra::{Range, SymbolKind};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// DOCUMENT SYMBOLS
// =============================================================================

#[test]
fn test_symbol_groups_follow_fixed_order() {
    let host = host_for(CALCULATOR);
    let groups = host.document_symbols();
    let kinds: Vec<SymbolKind> = groups.iter().map(|group| group.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SymbolKind::Token,
            SymbolKind::Rule,
            SymbolKind::Walker,
            SymbolKind::Function
        ]
    );

    let tokens: Vec<&str> = groups[0].children.iter().map(|child| &*child.name).collect();
    assert_eq!(tokens, vec!["NUMBER", "PLUS", "MINUS", "TIMES", "WS"]);
    assert_eq!(groups[1].children.len(), 4);
    assert_eq!(groups[3].children[0].detail.as_deref(), Some("() -> int"));
}

#[test]
fn test_lexer_mode_group() {
    let host = host_for(STRINGS);
    let groups = host.document_symbols();
    let modes = groups
        .iter()
        .find(|group| group.kind == SymbolKind::LexerMode)
        .unwrap();
    assert_eq!(modes.children.len(), 2);
    assert_eq!(modes.range, Range::from_coords(4, 0, 6, 19));
}

// =============================================================================
// SEMANTIC TOKENS
// =============================================================================

#[test]
fn test_semantic_tokens_cover_constructs() {
    let host = host_for(CALCULATOR);
    let tokens = host.semantic_tokens();

    assert!(tokens.windows(2).all(|pair| pair[0].range <= pair[1].range));
    let at = |range: Range| {
        tokens
            .iter()
            .find(|token| token.range == range)
            .map(|token| token.token_type)
    };
    assert_eq!(at(Range::on_line(0, 0, 52)), Some(TokenType::Comment));
    assert_eq!(at(Range::on_line(1, 0, 6)), Some(TokenType::Keyword));
    assert_eq!(at(Range::on_line(15, 0, 6)), Some(TokenType::EnumMember));
    assert_eq!(at(Range::on_line(21, 0, 4)), Some(TokenType::Variable));
    assert_eq!(at(Range::on_line(26, 1, 6)), Some(TokenType::Type));
}

// =============================================================================
// HOVER
// =============================================================================

#[test]
fn test_hover_token_literal() {
    let host = host_for(CALCULATOR);
    let hover = host.hover_at(35, 9).unwrap();
    assert_eq!(hover.kind, SymbolKind::Token);
    assert_eq!(&*hover.name, "NUMBER");
    assert!(hover.contents.contains("\"[0-9]+\""));
}

#[test]
fn test_hover_outside_names() {
    let host = host_for(CALCULATOR);
    assert!(host.hover_at(5, 0).is_none());
    assert!(host.hover_at(500, 0).is_none());
}

// =============================================================================
// FOLDING
// =============================================================================

#[test]
fn test_folding_ranges_for_every_block() {
    let host = host_for(CALCULATOR);
    let starts: Vec<(u32, u32)> = host
        .folding_ranges()
        .into_iter()
        .map(|FoldingRange { start_line, end_line }| (start_line, end_line))
        .collect();
    assert_eq!(starts, vec![(9, 11), (23, 25), (27, 29), (32, 34)]);
}
