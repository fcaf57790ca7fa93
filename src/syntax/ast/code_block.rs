//! Code blocks: `%{ ... %}` fenced host-language text.

use smol_str::SmolStr;

use crate::base::{LexToken, Position, Range};
use crate::hir::{Definition, SymbolKind};
use crate::syntax::formatter::FormatOptions;
use crate::syntax::highlight::{SemanticToken, TokenType};

/// A fenced block of embedded host-language text.
///
/// The body is kept verbatim. A block is named `[rule::]walker::function`
/// after the construct it implements; an unexpected block has no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    open: LexToken,
    close: Option<LexToken>,
    name: Option<SmolStr>,
    walker: Option<SmolStr>,
    body: Vec<String>,
    /// Opened at the end of a `%members` line.
    inline: bool,
    /// External type implementing the walker, when the block was rejected.
    external: Option<SmolStr>,
}

impl CodeBlock {
    pub fn new(
        open: LexToken,
        name: Option<SmolStr>,
        walker: Option<SmolStr>,
        inline: bool,
    ) -> Self {
        Self {
            open,
            close: None,
            name,
            walker,
            body: Vec::new(),
            inline,
            external: None,
        }
    }

    pub fn push_line(&mut self, raw: &str) {
        self.body.push(raw.to_string());
    }

    pub fn close(&mut self, token: LexToken) {
        self.close = Some(token);
    }

    pub fn set_external(&mut self, interface: SmolStr) {
        self.external = Some(interface);
    }

    pub fn name(&self) -> Option<&SmolStr> {
        self.name.as_ref()
    }

    pub fn walker(&self) -> Option<&SmolStr> {
        self.walker.as_ref()
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn open_token(&self) -> &LexToken {
        &self.open
    }

    pub fn close_token(&self) -> Option<&LexToken> {
        self.close.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.close.is_some()
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn external(&self) -> Option<&SmolStr> {
        self.external.as_ref()
    }

    pub fn start_line(&self) -> u32 {
        self.open.line()
    }

    /// From the `%{` marker to the `%}` marker; open-ended while unclosed.
    pub fn range(&self) -> Range {
        let start = self.open.range().start;
        match &self.close {
            Some(close) => Range::open(start).with_end(Position::new(close.line(), close.end())),
            None => Range::open(start),
        }
    }

    /// Number of source lines covered, markers included.
    pub fn line_span(&self) -> usize {
        match &self.close {
            Some(close) => (close.line() - self.open.line()) as usize + 1,
            None => self.body.len() + 1,
        }
    }

    /// Only closed, named blocks of walkers implemented inline define anything.
    pub fn definitions(&self) -> Vec<Definition> {
        match (&self.name, self.is_closed(), &self.external) {
            (Some(name), true, None) => vec![
                Definition::new(SymbolKind::CodeBlock, name.clone(), self.open.range())
                    .with_full_range(self.range()),
            ],
            _ => Vec::new(),
        }
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        let mut tokens = Vec::with_capacity(2);
        if !self.inline {
            tokens.push(SemanticToken::new(self.open.range(), TokenType::Macro));
        }
        if let Some(close) = &self.close {
            tokens.push(SemanticToken::new(close.range(), TokenType::Macro));
        }
        tokens
    }

    /// Markers at column zero, body reindented by one level.
    pub fn render(&self, options: &FormatOptions) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.body.len() + 2);
        if !self.inline {
            lines.push("%{".to_string());
        }
        lines.extend(self.render_body(options));
        if self.is_closed() {
            lines.push("%}".to_string());
        }
        lines
    }

    /// Body lines with their common leading whitespace replaced by one
    /// indentation level. Blank lines become empty.
    pub fn render_body(&self, options: &FormatOptions) -> Vec<String> {
        let margin = options.indent(1);
        let common = self
            .body
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);

        self.body
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    return String::new();
                }
                let rest = line
                    .char_indices()
                    .nth(common)
                    .map(|(offset, _)| &line[offset..])
                    .unwrap_or("");
                format!("{margin}{}", rest.trim_end())
            })
            .collect()
    }
}
