use smol_str::SmolStr;

use crate::base::{LexToken, Range};
use crate::hir::{DiagnosticKind, Reference, SymbolIndex, SymbolKind, function_key};
use crate::parser::patterns::BLOCK_NAME_LINE;
use crate::parser::{BlockTarget, ParseState};
use crate::syntax::highlight::{SemanticToken, TokenType};

use super::{IMPLICIT_FUNCTION, Node};

/// `@Walker[::Function]`, naming the code block that follows a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockName {
    marker: LexToken,
    walker: Option<LexToken>,
    function: Option<LexToken>,
    /// Surface name of the rule the block belongs to.
    rule: Option<SmolStr>,
    range: Range,
}

impl CodeBlockName {
    /// Parse the current line, which starts with `@`, while a named block is
    /// expected. Either way the next line must open a block.
    pub(crate) fn parse(state: &mut ParseState<'_>, index: &mut SymbolIndex) -> Node {
        let rule = state.pending_rule().map(|rule| rule.name.name().clone());
        let line = state.line_token();
        let marker = LexToken::new(
            "@",
            Range::on_line(line.line(), line.start(), line.start() + 1),
        );
        let mut name = CodeBlockName {
            marker,
            walker: None,
            function: None,
            rule,
            range: line.range(),
        };

        state.set_expect_named_block(false);
        state.set_expect_any_block(true);

        let Some(caps) = BLOCK_NAME_LINE.captures(state.trimmed()) else {
            state.error(DiagnosticKind::InvalidBlockName);
            state.set_block_target(None);
            return Node::CodeBlockName(name);
        };

        let walker = state.capture(&caps, "walker");
        let function = state.capture_opt(&caps, "function");

        if !index.is_defined(SymbolKind::Walker, walker.text()) {
            state.error_at(DiagnosticKind::UnknownWalker(walker.name().clone()), walker.range());
        }

        if let (Some(function), Some(rule)) = (&function, &name.rule) {
            let key = function_key(rule, walker.text(), function.text());
            if !index.is_defined(SymbolKind::Function, &key) {
                state.error_at(DiagnosticKind::UnknownFunction(key), function.range());
            }
        }

        state.set_block_target(Some(BlockTarget {
            walker: walker.name().clone(),
            function: function
                .as_ref()
                .map_or_else(|| SmolStr::new_static(IMPLICIT_FUNCTION), |f| f.name().clone()),
            members: false,
        }));

        name.walker = Some(walker);
        name.function = function;
        Node::CodeBlockName(name)
    }

    pub fn walker(&self) -> Option<&LexToken> {
        self.walker.as_ref()
    }

    /// Function written after `::`, if any.
    pub fn function(&self) -> Option<&LexToken> {
        self.function.as_ref()
    }

    /// Function the following block implements: explicit or implicit `go`.
    pub fn function_name(&self) -> &str {
        self.function.as_ref().map_or(IMPLICIT_FUNCTION, LexToken::text)
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn references(&self) -> Vec<(&LexToken, Reference)> {
        let Some(walker) = &self.walker else {
            return Vec::new();
        };
        let mut refs = vec![(walker, Reference::walker(walker.name().clone()))];
        if let (Some(function), Some(rule)) = (&self.function, &self.rule) {
            refs.push((
                function,
                Reference::new(
                    SymbolKind::Function,
                    function_key(rule, walker.text(), function.text()),
                ),
            ));
        }
        refs
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        let mut spans = vec![SemanticToken::new(self.marker.range(), TokenType::Operator)];
        if let Some(walker) = &self.walker {
            spans.push(SemanticToken::new(walker.range(), TokenType::Type));
        }
        if let Some(function) = &self.function {
            spans.push(SemanticToken::new(function.range(), TokenType::Function));
        }
        spans
    }

    pub fn render(&self) -> String {
        match (&self.walker, &self.function) {
            (Some(walker), Some(function)) => format!("@{}::{}", walker.text(), function.text()),
            (Some(walker), None) => format!("@{}", walker.text()),
            _ => self.marker.text().to_string(),
        }
    }
}
