//! Hover information implementation.

use std::sync::Arc;

use crate::base::{Position, Range};
use crate::hir::{DefinitionDetail, SymbolKind};
use crate::syntax::SyntaxFile;

use super::goto::reference_at;

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    pub kind: SymbolKind,
    /// The name as written under the cursor.
    pub name: Arc<str>,
    /// How many definitions the name has; zero when it is undefined.
    pub definition_count: usize,
    /// Range of the hovered name.
    pub range: Range,
}

/// Describe the name under the cursor.
pub fn hover(file: &SyntaxFile, position: Position) -> Option<HoverResult> {
    let (token, reference) = reference_at(file, position)?;
    let definitions = file.index().definitions_of(reference.kind, &reference.name);

    let mut contents = format!("**{}** `{}`", reference.kind, token.text());

    for def in definitions {
        match &def.detail {
            DefinitionDetail::Token { literal } => contents.push_str(&format!("\n\n`{literal}`")),
            DefinitionDetail::Function { signature, .. } => {
                contents.push_str(&format!("\n\n`{}{signature}`", token.text()))
            }
            _ => {}
        }
    }

    if reference.kind == SymbolKind::Walker {
        if let Some(interface) = file.index().walker_interface(&reference.name) {
            contents.push_str(&format!("\n\nimplemented by `{interface}`"));
        }
    }

    match definitions.len() {
        0 => contents.push_str("\n\n*not defined*"),
        1 => {}
        n => contents.push_str(&format!("\n\n{n} definitions")),
    }

    Some(HoverResult {
        contents,
        kind: reference.kind,
        name: Arc::from(token.text()),
        definition_count: definitions.len(),
        range: token.range(),
    })
}
