use regex::Captures;

use crate::base::{LexToken, Range};
use crate::hir::{Definition, DefinitionDetail, DiagnosticKind, Reference, SymbolIndex, SymbolKind};
use crate::parser::ParseState;
use crate::parser::patterns::TOKEN_VALUE;
use crate::syntax::highlight::{SemanticToken, TokenType};

use super::Node;

/// Lexer mode sentinel meaning "stay in the current mode".
pub const CURRENT_MODE: &str = "^";

/// `NAME := "literal"[!] [[mode]];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDefinition {
    name: LexToken,
    op: LexToken,
    literal: Option<LexToken>,
    bang: Option<LexToken>,
    mode: Option<LexToken>,
    terminated: bool,
    range: Range,
}

impl TokenDefinition {
    pub(crate) fn parse(
        caps: &Captures<'_>,
        state: &mut ParseState<'_>,
        index: &mut SymbolIndex,
    ) -> Node {
        let rest = state.capture(caps, "rest");
        let mut token = TokenDefinition {
            name: state.capture(caps, "name"),
            op: state.capture(caps, "op"),
            literal: None,
            bang: None,
            mode: None,
            terminated: false,
            range: state.line_range(),
        };

        let Some(value) = TOKEN_VALUE.captures(rest.text()) else {
            state.error(DiagnosticKind::InvalidTokenDefinition);
            return Node::Token(token);
        };

        token.literal = rest.capture_opt(&value, "literal");
        token.bang = rest.capture_opt(&value, "bang");
        token.mode = rest.capture_opt(&value, "mode");
        token.terminated = value.name("term").is_some();

        if !token.terminated {
            state.error_at(DiagnosticKind::MissingTerminator, state.end_of_line_range());
            return Node::Token(token);
        }

        for definition in token.definitions() {
            index.add_definition(definition);
        }
        index.remove_forward_reference(token.name.text(), SymbolKind::Token);

        if let Some(mode) = token.lexer_mode() {
            if !index.is_defined(SymbolKind::LexerMode, mode.text()) {
                index.add_forward_reference(
                    mode.name().clone(),
                    SymbolKind::LexerMode,
                    mode.range(),
                );
            }
        }

        Node::Token(token)
    }

    pub fn name(&self) -> &LexToken {
        &self.name
    }

    pub fn literal(&self) -> Option<&LexToken> {
        self.literal.as_ref()
    }

    /// Whether the literal is followed by `!`.
    pub fn is_negated(&self) -> bool {
        self.bang.is_some()
    }

    /// Lexer mode switched to, unless it is the current-mode sentinel.
    pub fn lexer_mode(&self) -> Option<&LexToken> {
        self.mode.as_ref().filter(|mode| mode.text() != CURRENT_MODE)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn references(&self) -> Vec<(&LexToken, Reference)> {
        let mut refs = vec![(&self.name, Reference::token(self.name.name().clone()))];
        if let Some(mode) = self.lexer_mode() {
            refs.push((mode, Reference::new(SymbolKind::LexerMode, mode.name().clone())));
        }
        refs
    }

    pub fn definitions(&self) -> Vec<Definition> {
        match (&self.literal, self.terminated) {
            (Some(literal), true) => vec![
                Definition::new(SymbolKind::Token, self.name.name().clone(), self.name.range())
                    .with_full_range(self.range)
                    .with_detail(DefinitionDetail::Token {
                        literal: literal.name().clone(),
                    }),
            ],
            _ => Vec::new(),
        }
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        let mut tokens = vec![
            SemanticToken::declaration(self.name.range(), TokenType::EnumMember),
            SemanticToken::new(self.op.range(), TokenType::Operator),
        ];
        if let Some(literal) = &self.literal {
            tokens.push(SemanticToken::new(literal.range(), TokenType::String));
        }
        if let Some(bang) = &self.bang {
            tokens.push(SemanticToken::new(bang.range(), TokenType::Operator));
        }
        if let Some(mode) = &self.mode {
            tokens.push(SemanticToken::new(mode.range(), TokenType::Namespace));
        }
        tokens
    }

    /// Render with the name padded to `name_width` characters, so that runs
    /// of definitions line up on `:=`.
    pub fn render(&self, name_width: usize) -> String {
        let mut line = format!("{:<name_width$} :=", self.name.text());
        if let Some(literal) = &self.literal {
            line.push(' ');
            line.push_str(literal.text());
        }
        if self.bang.is_some() {
            line.push('!');
        }
        if let Some(mode) = &self.mode {
            line.push_str(&format!(" [{}]", mode.text()));
        }
        if self.terminated {
            line.push(';');
        }
        line
    }
}
