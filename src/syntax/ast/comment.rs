use regex::Captures;

use crate::base::{LexToken, Range};
use crate::hir::SymbolIndex;
use crate::parser::ParseState;
use crate::syntax::highlight::{SemanticToken, TokenType};

use super::Node;

/// A `//` line comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    token: LexToken,
}

impl Comment {
    pub(crate) fn parse(
        _caps: &Captures<'_>,
        state: &mut ParseState<'_>,
        _index: &mut SymbolIndex,
    ) -> Node {
        Node::Comment(Comment {
            token: state.line_token(),
        })
    }

    /// Comment text after the `//` marker.
    pub fn text(&self) -> &str {
        let text = self.token.text();
        text.strip_prefix("//").unwrap_or(text)
    }

    pub fn range(&self) -> Range {
        self.token.range()
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        vec![SemanticToken::new(self.token.range(), TokenType::Comment)]
    }

    pub fn render(&self) -> String {
        self.token.text().to_string()
    }
}
