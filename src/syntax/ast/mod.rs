//! Node model — one type per Yantra construct.
//!
//! Every node parses itself from the current [`ParseState`](crate::parser::ParseState),
//! registers the definitions it introduces, and can report the names it
//! mentions, render itself back to source text, and produce highlighting
//! spans. Nodes never point at each other; names are resolved through the
//! [`SymbolIndex`](crate::hir::SymbolIndex).

mod block_name;
mod code_block;
mod comment;
mod pragma;
mod rule_def;
mod token_def;

pub use block_name::CodeBlockName;
pub use code_block::CodeBlock;
pub use comment::Comment;
pub use pragma::{Associativity, FunctionDecl, Pragma, PragmaBody, PragmaKind};
pub use rule_def::{RuleDefinition, RuleElement};
pub use token_def::{CURRENT_MODE, TokenDefinition};

use crate::base::{LexToken, Position, Range};
use crate::hir::{Definition, Reference};
use crate::syntax::formatter::FormatOptions;
use crate::syntax::highlight::SemanticToken;

/// Function implemented by a block that names no function.
pub const IMPLICIT_FUNCTION: &str = "go";

/// Function name of the block following `%members`.
pub const MEMBERS_FUNCTION: &str = "Members";

/// A parsed construct, stored at the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Comment(Comment),
    Pragma(Pragma),
    Token(TokenDefinition),
    Rule(RuleDefinition),
    CodeBlock(CodeBlock),
    CodeBlockName(CodeBlockName),
}

impl Node {
    pub fn range(&self) -> Range {
        match self {
            Node::Comment(node) => node.range(),
            Node::Pragma(node) => node.range(),
            Node::Token(node) => node.range(),
            Node::Rule(node) => node.range(),
            Node::CodeBlock(node) => node.range(),
            Node::CodeBlockName(node) => node.range(),
        }
    }

    /// Every name occurrence in the node, defining occurrences included.
    pub fn references(&self) -> Vec<(&LexToken, Reference)> {
        match self {
            Node::Pragma(node) => node.references(),
            Node::Token(node) => node.references(),
            Node::Rule(node) => node.references(),
            Node::CodeBlockName(node) => node.references(),
            Node::Comment(_) | Node::CodeBlock(_) => Vec::new(),
        }
    }

    /// The name occurrence under `position`, if any.
    pub fn reference_at(&self, position: Position) -> Option<(&LexToken, Reference)> {
        self.references()
            .into_iter()
            .find(|(token, _)| token.contains_position(position))
    }

    /// Occurrences of `reference` in this node.
    pub fn tokens_for(&self, reference: &Reference) -> Vec<&LexToken> {
        self.references()
            .into_iter()
            .filter(|(_, candidate)| candidate == reference)
            .map(|(token, _)| token)
            .collect()
    }

    /// Definitions this node contributes to the index.
    pub fn definitions(&self) -> Vec<Definition> {
        match self {
            Node::Pragma(node) => node.definitions(),
            Node::Token(node) => node.definitions(),
            Node::Rule(node) => node.definitions(),
            Node::CodeBlock(node) => node.definitions(),
            Node::Comment(_) | Node::CodeBlockName(_) => Vec::new(),
        }
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        match self {
            Node::Comment(node) => node.highlights(),
            Node::Pragma(node) => node.highlights(),
            Node::Token(node) => node.highlights(),
            Node::Rule(node) => node.highlights(),
            Node::CodeBlock(node) => node.highlights(),
            Node::CodeBlockName(node) => node.highlights(),
        }
    }

    /// Number of source lines the node covers.
    pub fn line_span(&self) -> usize {
        match self {
            Node::CodeBlock(node) => node.line_span(),
            Node::Pragma(node) => node.line_span(),
            _ => 1,
        }
    }

    /// Source lines for the node. Token definitions render unaligned here;
    /// the formatter aligns runs of them.
    pub fn render(&self, options: &FormatOptions) -> Vec<String> {
        match self {
            Node::Comment(node) => vec![node.render()],
            Node::Pragma(node) => node.render(options),
            Node::Token(node) => vec![node.render(0)],
            Node::Rule(node) => vec![node.render()],
            Node::CodeBlock(node) => node.render(options),
            Node::CodeBlockName(node) => vec![node.render()],
        }
    }

    /// The code block held by this node, standalone or inline.
    pub fn code_block(&self) -> Option<&CodeBlock> {
        match self {
            Node::CodeBlock(block) => Some(block),
            Node::Pragma(pragma) => pragma.block(),
            _ => None,
        }
    }
}
