//! AnalysisHost — per-document state behind the IDE queries.
//!
//! The host owns the analysis of one document. `parse()` replaces it
//! wholesale; every query is a read-only projection of the latest result.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.parse("expr := ID;\nID := \"x\";");
//!
//! let targets = host.definitions_at(0, 9);
//! let outline = host.document_symbols();
//! ```
//!
//! Queries issued before the first `parse()` return empty results.

use crate::base::{Position, Range};
use crate::hir::{Diagnostic, SymbolIndex};
use crate::parser::{AnalysisOptions, analyze};
use crate::syntax::ast::Node;
use crate::syntax::{FormatOptions, SyntaxFile, format_lines};

use super::{
    CompletionItem, DocumentSymbol, FoldingRange, HoverResult, SemanticToken, TextEdit,
    completions, document_symbols, folding_ranges, goto_definition, hover, references_at,
    rename_at, semantic_tokens,
};

/// Lifecycle of the host's analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    /// Nothing has been analyzed yet.
    #[default]
    Idle,
    Parsing,
    Ready,
}

/// Owns the analysis of a single document.
///
/// Not meant to be shared between threads while a `parse()` runs; callers
/// serialize access per document.
#[derive(Debug, Clone, Default)]
pub struct AnalysisHost {
    options: AnalysisOptions,
    format_options: FormatOptions,
    file: SyntaxFile,
    status: AnalysisStatus,
}

impl AnalysisHost {
    /// Create a host with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Change the error threshold; applies from the next `parse()`.
    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.options.max_errors = max_errors;
    }

    pub fn set_format_options(&mut self, format_options: FormatOptions) {
        self.format_options = format_options;
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// Re-analyze the whole document.
    pub fn parse(&mut self, text: &str) {
        self.status = AnalysisStatus::Parsing;
        self.file = analyze(text, &self.options);
        self.status = AnalysisStatus::Ready;
    }

    /// The latest analysis, if there is one.
    fn ready(&self) -> Option<&SyntaxFile> {
        (self.status == AnalysisStatus::Ready).then_some(&self.file)
    }

    // ==================== Queries ====================

    pub fn definitions_at(&self, line: u32, character: u32) -> Vec<Range> {
        self.ready()
            .map(|file| goto_definition(file, Position::new(line, character)))
            .unwrap_or_default()
    }

    pub fn references_at(&self, line: u32, character: u32) -> Vec<Range> {
        self.ready()
            .map(|file| references_at(file, Position::new(line, character)))
            .unwrap_or_default()
    }

    pub fn rename_at(&self, line: u32, character: u32, new_name: &str) -> Vec<TextEdit> {
        self.ready()
            .map(|file| rename_at(file, Position::new(line, character), new_name))
            .unwrap_or_default()
    }

    /// Suggestions for the cursor in `line_text`; `line` is not consulted.
    pub fn completions_at(
        &self,
        _line: u32,
        character: u32,
        line_text: &str,
    ) -> Vec<CompletionItem> {
        self.ready()
            .map(|file| completions(file.index(), line_text, character))
            .unwrap_or_default()
    }

    pub fn document_symbols(&self) -> Vec<DocumentSymbol> {
        self.ready()
            .map(|file| document_symbols(file.index()))
            .unwrap_or_default()
    }

    pub fn semantic_tokens(&self) -> Vec<SemanticToken> {
        self.ready().map(semantic_tokens).unwrap_or_default()
    }

    /// The document re-rendered; empty when it has any diagnostic.
    pub fn formatted_lines(&self) -> Vec<String> {
        self.ready()
            .map(|file| format_lines(file, &self.format_options))
            .unwrap_or_default()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        self.ready().map(SyntaxFile::diagnostics).unwrap_or_default()
    }

    pub fn hover_at(&self, line: u32, character: u32) -> Option<HoverResult> {
        hover(self.ready()?, Position::new(line, character))
    }

    pub fn folding_ranges(&self) -> Vec<FoldingRange> {
        self.ready().map(folding_ranges).unwrap_or_default()
    }

    // ==================== Collaborator access ====================

    /// One slot per source line.
    pub fn nodes(&self) -> &[Option<Node>] {
        self.file.nodes()
    }

    pub fn definitions(&self) -> &SymbolIndex {
        self.file.index()
    }

    pub fn file(&self) -> &SyntaxFile {
        &self.file
    }
}
