//! Syntax file: the result of analyzing one Yantra document.

use crate::base::Position;
use crate::hir::{Diagnostic, SymbolIndex};
use crate::parser::{AnalysisOptions, analyze};

use super::ast::Node;

/// An analyzed document.
///
/// Holds one slot per source line. A node sits at the line it starts on;
/// blank lines, lines inside code blocks and lines that failed to classify
/// have no node.
#[derive(Debug, Clone, Default)]
pub struct SyntaxFile {
    nodes: Vec<Option<Node>>,
    index: SymbolIndex,
    diagnostics: Vec<Diagnostic>,
    aborted: bool,
}

impl SyntaxFile {
    /// Analyze `source` with default options.
    pub fn new(source: &str) -> Self {
        analyze(source, &AnalysisOptions::default())
    }

    pub(crate) fn from_parts(
        nodes: Vec<Option<Node>>,
        index: SymbolIndex,
        diagnostics: Vec<Diagnostic>,
        aborted: bool,
    ) -> Self {
        Self {
            nodes,
            index,
            diagnostics,
            aborted,
        }
    }

    /// One slot per source line.
    pub fn nodes(&self) -> &[Option<Node>] {
        &self.nodes
    }

    /// Lines that hold a node, with their line numbers.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (u32, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(line, node)| node.as_ref().map(|node| (line as u32, node)))
    }

    /// The node starting on `line`.
    pub fn node_at(&self, line: u32) -> Option<&Node> {
        self.nodes.get(line as usize).and_then(Option::as_ref)
    }

    /// Whether `position` is within the analyzed document.
    pub fn contains(&self, position: Position) -> bool {
        (position.line as usize) < self.nodes.len()
    }

    pub fn line_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check if analysis reported errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Whether analysis stopped early on the error threshold.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}
