//! High-level IR (HIR) — the semantic model of one document.
//!
//! ## Key Types
//!
//! - [`SymbolKind`], [`Reference`] — keys identifying named entities
//! - [`Definition`] — a defining occurrence with node-specific detail
//! - [`SymbolIndex`] — whole-document definitions index, forward references
//!   and document settings
//! - [`Diagnostic`] — collected errors and warnings
//!
//! Nodes never point at each other: every cross-reference is a
//! [`Reference`] (kind + name) resolved through the [`SymbolIndex`].

mod diagnostics;
mod resolve;
mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
pub use resolve::{DocumentSettings, SymbolIndex};
pub use symbols::{
    Definition, DefinitionDetail, ForwardReference, Reference, SymbolKind, code_block_key,
    function_key, is_rule_name, is_token_name,
};
