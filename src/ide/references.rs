//! Find references and rename implementation.

use std::sync::Arc;

use crate::base::{Position, Range};
use crate::hir::Reference;
use crate::syntax::SyntaxFile;

use super::goto::reference_at;

/// A replacement of the text at `range`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: Arc<str>,
}

/// Every occurrence of `reference`, definitions included, in document order.
pub fn find_references(file: &SyntaxFile, reference: &Reference) -> Vec<Range> {
    let mut ranges: Vec<Range> = file
        .iter_nodes()
        .flat_map(|(_, node)| node.tokens_for(reference))
        .map(|token| token.range())
        .collect();
    ranges.sort();
    ranges.dedup();
    ranges
}

/// Occurrences of the name under the cursor, the queried one included.
pub fn references_at(file: &SyntaxFile, position: Position) -> Vec<Range> {
    match reference_at(file, position) {
        Some((_, reference)) => find_references(file, &reference),
        None => Vec::new(),
    }
}

/// Edits renaming every occurrence of the name under the cursor.
pub fn rename_at(file: &SyntaxFile, position: Position, new_name: &str) -> Vec<TextEdit> {
    let new_text: Arc<str> = Arc::from(new_name);
    references_at(file, position)
        .into_iter()
        .map(|range| TextEdit {
            range,
            new_text: new_text.clone(),
        })
        .collect()
}
