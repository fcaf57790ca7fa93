//! Go-to-definition implementation.

use crate::base::{LexToken, Position, Range};
use crate::hir::Reference;
use crate::syntax::SyntaxFile;

/// The name occurrence under the cursor and what it refers to.
pub fn reference_at(file: &SyntaxFile, position: Position) -> Option<(&LexToken, Reference)> {
    file.node_at(position.line)?.reference_at(position)
}

/// Ranges of every definition of the name under the cursor.
///
/// Empty when the position is outside the document or on no name.
pub fn goto_definition(file: &SyntaxFile, position: Position) -> Vec<Range> {
    let Some((_, reference)) = reference_at(file, position) else {
        return Vec::new();
    };
    file.index()
        .definition_ranges(reference.kind, &reference.name)
}
