//! Semantic tokens — syntax highlighting reported by the nodes themselves.

use crate::syntax::SyntaxFile;

pub use crate::syntax::{MODIFIER_DECLARATION, SemanticToken, TokenType};

/// Token type names, indexed by [`TokenType::to_lsp_index`].
pub fn token_type_legend() -> Vec<&'static str> {
    TokenType::ALL.iter().map(|token_type| token_type.as_str()).collect()
}

/// Modifier names, indexed by bit position.
pub fn token_modifier_legend() -> Vec<&'static str> {
    vec!["declaration"]
}

/// Highlighting spans of every node, in ascending range order.
pub fn semantic_tokens(file: &SyntaxFile) -> Vec<SemanticToken> {
    let mut tokens: Vec<SemanticToken> = file
        .iter_nodes()
        .flat_map(|(_, node)| node.highlights())
        .collect();
    tokens.sort_by_key(|token| token.range);
    tokens
}
