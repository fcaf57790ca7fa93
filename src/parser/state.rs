//! Parse state — per-line and per-construct context of an analysis pass.
//!
//! Per-line data (line number, text, indentation) is replaced by
//! [`ParseState::begin_line`]. Per-construct data survives across lines:
//! the rule definition waiting for its code blocks, the code block being
//! accumulated, and the two block expectations.
//!
//! Whole-document bookkeeping lives in [`SymbolIndex`](crate::hir::SymbolIndex),
//! which node parsers receive next to the state.

use regex::{Captures, Match};
use smol_str::SmolStr;

use crate::base::{LexToken, Position, Range, char_len};
use crate::hir::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
use crate::syntax::ast::CodeBlock;

/// A rule definition without terminator, waiting for its code blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRule {
    /// Surface name as written.
    pub name: LexToken,
    /// Disambiguated name (`name`, `name_1`, ...).
    pub internal_name: SmolStr,
    /// Range of the whole rule line.
    pub range: Range,
    /// Number of code blocks closed for this rule so far.
    pub blocks: usize,
}

/// What the next `%{` opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockTarget {
    pub walker: SmolStr,
    pub function: SmolStr,
    /// Set by `%members`: the block belongs to the walker, not to a rule.
    pub members: bool,
}

/// Mutable context threaded through every node parser.
#[derive(Debug, Default)]
pub struct ParseState<'t> {
    line: u32,
    raw: &'t str,
    trimmed: &'t str,
    indent: u32,

    rule: Option<PendingRule>,
    block: Option<CodeBlock>,
    target: Option<BlockTarget>,
    expect_named_block: bool,
    expect_any_block: bool,

    diagnostics: DiagnosticCollector,
}

impl<'t> ParseState<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Current line ====================

    /// Make `raw` the current line.
    pub fn begin_line(&mut self, line: u32, raw: &'t str) {
        let trimmed = raw.trim();
        let leading = raw.len() - raw.trim_start().len();
        self.line = line;
        self.raw = raw;
        self.trimmed = trimmed;
        self.indent = char_len(&raw[..leading]);
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn raw(&self) -> &'t str {
        self.raw
    }

    pub fn trimmed(&self) -> &'t str {
        self.trimmed
    }

    /// Token for a match taken against the trimmed line.
    pub fn token(&self, m: Match<'_>) -> LexToken {
        let start = self.indent + char_len(&self.trimmed[..m.start()]);
        let end = start + char_len(m.as_str());
        LexToken::new(m.as_str(), Range::on_line(self.line, start, end))
    }

    /// Token for an optional capture group.
    pub fn opt_token(&self, m: Option<Match<'_>>) -> Option<LexToken> {
        m.map(|m| self.token(m))
    }

    /// Token for a named group of captures taken against the trimmed line.
    ///
    /// A missing group yields an empty token at the end of the line.
    pub fn capture(&self, caps: &Captures<'_>, group: &str) -> LexToken {
        self.capture_opt(caps, group)
            .unwrap_or_else(|| self.empty_token_at(self.end_of_line_range().start))
    }

    pub fn capture_opt(&self, caps: &Captures<'_>, group: &str) -> Option<LexToken> {
        self.opt_token(caps.name(group))
    }

    /// Token covering the whole trimmed line.
    pub fn line_token(&self) -> LexToken {
        let end = self.indent + char_len(self.trimmed);
        LexToken::new(self.trimmed, Range::on_line(self.line, self.indent, end))
    }

    /// Range of the trimmed line.
    pub fn line_range(&self) -> Range {
        self.line_token().range()
    }

    /// Zero-width range just after the last character of the trimmed line.
    pub fn end_of_line_range(&self) -> Range {
        let end = self.indent + char_len(self.trimmed);
        Range::on_line(self.line, end, end)
    }

    /// Empty token at `at`, for parameters that are absent.
    pub fn empty_token_at(&self, at: Position) -> LexToken {
        LexToken::new("", Range::new(at, at))
    }

    // ==================== Diagnostics ====================

    /// Record a diagnostic anchored to the whole current line.
    pub fn error(&mut self, kind: DiagnosticKind) {
        let range = self.line_range();
        self.error_at(kind, range);
    }

    /// Record a diagnostic with an explicit range and the kind's severity.
    pub fn error_at(&mut self, kind: DiagnosticKind, range: Range) {
        self.diagnostics.add(Diagnostic::new(kind, range));
    }

    /// Record a diagnostic with an explicit severity.
    pub fn add_error(
        &mut self,
        kind: DiagnosticKind,
        severity: Severity,
        columns: Option<(u32, u32)>,
    ) {
        let range = match columns {
            Some((start, end)) => Range::on_line(self.line, start, end),
            None => self.line_range(),
        };
        self.diagnostics
            .add(Diagnostic::new(kind, range).with_severity(severity));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }

    // ==================== Rule definitions ====================

    pub fn begin_rule(&mut self, rule: PendingRule) {
        self.rule = Some(rule);
        self.expect_named_block = true;
        self.expect_any_block = true;
    }

    pub fn pending_rule(&self) -> Option<&PendingRule> {
        self.rule.as_ref()
    }

    pub fn pending_rule_mut(&mut self) -> Option<&mut PendingRule> {
        self.rule.as_mut()
    }

    /// The pending rule got all its blocks.
    pub fn finish_rule(&mut self) {
        self.rule = None;
        self.expect_named_block = false;
        self.expect_any_block = false;
        self.target = None;
    }

    /// Report that the pending rule needed a code block, anchored to the
    /// rule's own line, and abandon the rule.
    pub fn rule_needs_block(&mut self) {
        if let Some(rule) = self.rule.take() {
            self.error_at(
                DiagnosticKind::RuleNeedsCodeBlock(rule.name.name().clone()),
                rule.range,
            );
        }
        self.expect_named_block = false;
        self.expect_any_block = false;
        self.target = None;
    }

    // ==================== Expectations ====================

    pub fn expect_named_block(&self) -> bool {
        self.expect_named_block
    }

    pub fn expect_any_block(&self) -> bool {
        self.expect_any_block
    }

    pub fn set_expect_named_block(&mut self, expect: bool) {
        self.expect_named_block = expect;
    }

    pub fn set_expect_any_block(&mut self, expect: bool) {
        self.expect_any_block = expect;
    }

    pub fn set_block_target(&mut self, target: Option<BlockTarget>) {
        self.target = target;
    }

    pub fn take_block_target(&mut self) -> Option<BlockTarget> {
        self.target.take()
    }

    // ==================== Code blocks ====================

    pub fn in_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn open_block(&mut self, block: CodeBlock) {
        self.expect_named_block = false;
        self.expect_any_block = false;
        self.block = Some(block);
    }

    /// Append the current raw line to the open block.
    pub fn push_block_line(&mut self) {
        let raw = self.raw;
        if let Some(block) = self.block.as_mut() {
            block.push_line(raw);
        }
    }

    pub fn take_block(&mut self) -> Option<CodeBlock> {
        self.block.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_tokens_account_for_indentation() {
        let mut state = ParseState::new();
        state.begin_line(3, "    FOO := \"x\";");
        let re = Regex::new("FOO").unwrap();
        let tok = state.token(re.find(state.trimmed()).unwrap());
        assert_eq!(tok.range(), Range::on_line(3, 4, 7));
        assert_eq!(state.line_range(), Range::on_line(3, 4, 15));
    }

    #[test]
    fn test_error_anchors_to_current_line() {
        let mut state = ParseState::new();
        state.begin_line(1, "  bogus");
        state.error(DiagnosticKind::Syntax);
        state.add_error(DiagnosticKind::Syntax, Severity::Hint, Some((2, 4)));

        assert_eq!(state.error_count(), 1);
        let diags = state.into_diagnostics();
        assert_eq!(diags[0].range, Range::on_line(1, 2, 7));
        assert_eq!(diags[1].range, Range::on_line(1, 2, 4));
        assert_eq!(diags[1].severity, Severity::Hint);
    }

    #[test]
    fn test_rule_needs_block_reports_rule_line() {
        let mut state = ParseState::new();
        state.begin_line(0, "expr := ID");
        state.begin_rule(PendingRule {
            name: LexToken::new("expr", Range::on_line(0, 0, 4)),
            internal_name: SmolStr::from("expr"),
            range: Range::on_line(0, 0, 10),
            blocks: 0,
        });
        state.begin_line(1, "ID := \"x\";");
        state.rule_needs_block();

        assert!(state.pending_rule().is_none());
        assert!(!state.expect_any_block());
        let diags = state.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.line, 0);
    }
}
