//! Line classifier: an ordered table of pattern → node constructor bindings.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::hir::SymbolIndex;
use crate::syntax::ast::{Comment, Node, Pragma, RuleDefinition, TokenDefinition};

use super::patterns::{COMMENT_LINE, PRAGMA_LINE, RULE_LINE, TOKEN_LINE};
use super::state::ParseState;

/// What a classified line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Pragma,
    TokenDefinition,
    RuleDefinition,
}

/// Builds the node for a classified line.
pub(crate) type NodeConstructor = fn(&Captures<'_>, &mut ParseState<'_>, &mut SymbolIndex) -> Node;

pub(crate) struct LineClassifier {
    pub kind: LineKind,
    pub pattern: &'static Lazy<Regex>,
    pub construct: NodeConstructor,
}

/// Evaluated top to bottom; the first match wins.
pub(crate) static CLASSIFIERS: [LineClassifier; 4] = [
    LineClassifier {
        kind: LineKind::Comment,
        pattern: &COMMENT_LINE,
        construct: Comment::parse,
    },
    LineClassifier {
        kind: LineKind::Pragma,
        pattern: &PRAGMA_LINE,
        construct: Pragma::parse,
    },
    LineClassifier {
        kind: LineKind::TokenDefinition,
        pattern: &TOKEN_LINE,
        construct: TokenDefinition::parse,
    },
    LineClassifier {
        kind: LineKind::RuleDefinition,
        pattern: &RULE_LINE,
        construct: RuleDefinition::parse,
    },
];

/// Classify a trimmed line.
pub(crate) fn classify(trimmed: &str) -> Option<(&'static LineClassifier, Captures<'_>)> {
    CLASSIFIERS.iter().find_map(|classifier| {
        classifier
            .pattern
            .captures(trimmed)
            .map(|caps| (classifier, caps))
    })
}

/// The kind of a trimmed line, without building its node.
pub fn line_kind(trimmed: &str) -> Option<LineKind> {
    classify(trimmed).map(|(classifier, _)| classifier.kind)
}
