//! Completion suggestions implementation.
//!
//! Suggestions depend only on the text before the cursor:
//! - `%prefix` at the start of a line: pragma names
//! - `@prefix`: walker names
//! - `@Walker::prefix`: functions declared for that walker

use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::hir::{DefinitionDetail, SymbolIndex, SymbolKind};
use crate::syntax::ast::{IMPLICIT_FUNCTION, PragmaKind};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Pragma,
    Walker,
    Function,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Pragma => 14,   // Keyword
            CompletionKind::Walker => 7,    // Class
            CompletionKind::Function => 3,  // Function
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// What the text before the cursor asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
enum CompletionContext<'a> {
    Pragma { prefix: &'a str },
    Walker { prefix: &'a str },
    Function { walker: &'a str, prefix: &'a str },
}

/// Suggestions for the cursor at `character` in `line_text`.
pub fn completions(index: &SymbolIndex, line_text: &str, character: u32) -> Vec<CompletionItem> {
    let before = prefix_text(line_text, character);
    let Some(context) = completion_context(before) else {
        return Vec::new();
    };

    match context {
        CompletionContext::Pragma { prefix } => PragmaKind::ALL
            .iter()
            .filter(|kind| kind.name().starts_with(prefix))
            .enumerate()
            .map(|(priority, kind)| {
                CompletionItem::new(kind.name(), CompletionKind::Pragma)
                    .with_detail(format!("%{} {}", kind.name(), kind.usage()))
                    .with_priority(priority as u32)
            })
            .collect(),
        CompletionContext::Walker { prefix } => index
            .names(SymbolKind::Walker)
            .filter(|name| name.starts_with(prefix))
            .map(|name| {
                let item = CompletionItem::new(name.as_str(), CompletionKind::Walker);
                match index.walker_interface(name) {
                    Some(interface) => {
                        item.with_detail(format!("walker implemented by {interface}"))
                    }
                    None => item.with_detail("walker"),
                }
            })
            .collect(),
        CompletionContext::Function { walker, prefix } => {
            let mut functions: IndexSet<SmolStr, FxBuildHasher> = IndexSet::default();
            functions.insert(SmolStr::new_static(IMPLICIT_FUNCTION));
            for def in index.definitions_by_kind(SymbolKind::Function) {
                if let DefinitionDetail::Function {
                    walker: owner,
                    function,
                    ..
                } = &def.detail
                {
                    if owner == walker {
                        functions.insert(function.clone());
                    }
                }
            }
            functions
                .into_iter()
                .filter(|function| function.starts_with(prefix))
                .map(|function| {
                    CompletionItem::new(function.as_str(), CompletionKind::Function)
                        .with_detail(format!("{walker}::{function}"))
                })
                .collect()
        }
    }
}

/// Text before the cursor; `character` counts characters, not bytes.
fn prefix_text(line_text: &str, character: u32) -> &str {
    match line_text.char_indices().nth(character as usize) {
        Some((offset, _)) => &line_text[..offset],
        None => line_text,
    }
}

/// Trailing identifier of `text`, and the text before it.
fn split_identifier(text: &str) -> (&str, &str) {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| unicode_ident::is_xid_continue(*c))
        .last()
        .map_or(text.len(), |(offset, _)| offset);
    text.split_at(start)
}

fn completion_context(before: &str) -> Option<CompletionContext<'_>> {
    let (rest, prefix) = split_identifier(before);

    if let Some(rest) = rest.strip_suffix("::") {
        let (rest, walker) = split_identifier(rest);
        if !walker.is_empty() && rest.trim_start() == "@" {
            return Some(CompletionContext::Function { walker, prefix });
        }
        return None;
    }

    match rest.trim_start() {
        "%" => Some(CompletionContext::Pragma { prefix }),
        "@" => Some(CompletionContext::Walker { prefix }),
        _ => None,
    }
}
