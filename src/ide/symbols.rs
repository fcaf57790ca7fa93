//! Document outline.

use std::sync::Arc;

use crate::base::Range;
use crate::hir::{Definition, DefinitionDetail, SymbolIndex, SymbolKind};

/// A node of the document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: Arc<str>,
    pub detail: Option<Arc<str>>,
    pub kind: SymbolKind,
    /// The whole construct.
    pub range: Range,
    /// The name within the construct.
    pub selection_range: Range,
    pub children: Vec<DocumentSymbol>,
}

/// Outline groups, in display order.
const GROUPS: [(SymbolKind, &str); 5] = [
    (SymbolKind::Token, "Tokens"),
    (SymbolKind::Rule, "Rules"),
    (SymbolKind::Walker, "Walkers"),
    (SymbolKind::Function, "Functions"),
    (SymbolKind::LexerMode, "Lexer modes"),
];

/// Convert to LSP symbol kind number.
pub fn lsp_symbol_kind(kind: SymbolKind) -> u32 {
    match kind {
        SymbolKind::Token => 14,           // Constant
        SymbolKind::Rule => 12,            // Function
        SymbolKind::Walker => 5,           // Class
        SymbolKind::Function => 6,         // Method
        SymbolKind::LexerMode => 3,        // Namespace
        SymbolKind::WalkerInterface => 11, // Interface
        SymbolKind::CodeBlock => 2,        // Module
    }
}

/// One group per definition kind that has definitions.
pub fn document_symbols(index: &SymbolIndex) -> Vec<DocumentSymbol> {
    GROUPS
        .iter()
        .filter_map(|&(kind, title)| {
            let children: Vec<DocumentSymbol> =
                index.definitions_by_kind(kind).map(symbol).collect();
            let range = span(&children)?;
            Some(DocumentSymbol {
                name: Arc::from(title),
                detail: None,
                kind,
                range,
                selection_range: range,
                children,
            })
        })
        .collect()
}

fn symbol(def: &Definition) -> DocumentSymbol {
    let detail = match &def.detail {
        DefinitionDetail::Token { literal } => Some(Arc::from(literal.as_str())),
        DefinitionDetail::Rule {
            internal_name,
            expects_blocks,
        } => {
            let blocks = if *expects_blocks { " (code blocks)" } else { "" };
            Some(Arc::from(format!("{internal_name}{blocks}")))
        }
        DefinitionDetail::Function { signature, .. } => Some(Arc::from(signature.as_str())),
        DefinitionDetail::WalkerInterface { type_name } => Some(Arc::from(type_name.as_str())),
        DefinitionDetail::None => None,
    };

    DocumentSymbol {
        name: Arc::from(def.name.as_str()),
        detail,
        kind: def.kind,
        range: def.full_range,
        selection_range: def.range,
        children: Vec::new(),
    }
}

/// Smallest range covering every child; `None` without children.
fn span(children: &[DocumentSymbol]) -> Option<Range> {
    let start = children.iter().map(|child| child.range.start).min()?;
    let end = children
        .iter()
        .map(|child| child.range.end.unwrap_or(child.range.start))
        .max()?;
    Some(Range::new(start, end))
}
