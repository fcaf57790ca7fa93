//! Highlighting spans reported by syntax nodes.

use crate::base::Range;

/// Token type for semantic highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    Comment,
    String,
    Operator,
    Macro,
    /// Walker names
    Type,
    /// Class names and external types
    Class,
    Function,
    /// Rule names
    Variable,
    /// Token names
    EnumMember,
    /// Lexer modes
    Namespace,
    /// Aliases
    Parameter,
}

impl TokenType {
    /// Every token type, in legend order.
    pub const ALL: [TokenType; 12] = [
        TokenType::Keyword,
        TokenType::Comment,
        TokenType::String,
        TokenType::Operator,
        TokenType::Macro,
        TokenType::Type,
        TokenType::Class,
        TokenType::Function,
        TokenType::Variable,
        TokenType::EnumMember,
        TokenType::Namespace,
        TokenType::Parameter,
    ];

    /// Convert to LSP token type index.
    pub fn to_lsp_index(self) -> u32 {
        match self {
            TokenType::Keyword => 0,
            TokenType::Comment => 1,
            TokenType::String => 2,
            TokenType::Operator => 3,
            TokenType::Macro => 4,
            TokenType::Type => 5,
            TokenType::Class => 6,
            TokenType::Function => 7,
            TokenType::Variable => 8,
            TokenType::EnumMember => 9,
            TokenType::Namespace => 10,
            TokenType::Parameter => 11,
        }
    }

    /// LSP legend name.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Keyword => "keyword",
            TokenType::Comment => "comment",
            TokenType::String => "string",
            TokenType::Operator => "operator",
            TokenType::Macro => "macro",
            TokenType::Type => "type",
            TokenType::Class => "class",
            TokenType::Function => "function",
            TokenType::Variable => "variable",
            TokenType::EnumMember => "enumMember",
            TokenType::Namespace => "namespace",
            TokenType::Parameter => "parameter",
        }
    }
}

/// Modifier bit set on the defining occurrence of a name.
pub const MODIFIER_DECLARATION: u32 = 1;

/// A highlighting span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticToken {
    pub range: Range,
    pub token_type: TokenType,
    /// Bit set of modifiers (see [`MODIFIER_DECLARATION`]).
    pub modifiers: u32,
}

impl SemanticToken {
    pub fn new(range: Range, token_type: TokenType) -> Self {
        Self {
            range,
            token_type,
            modifiers: 0,
        }
    }

    /// Same span, marked as the declaration of its name.
    pub fn declaration(range: Range, token_type: TokenType) -> Self {
        Self {
            range,
            token_type,
            modifiers: MODIFIER_DECLARATION,
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.modifiers & MODIFIER_DECLARATION != 0
    }
}
