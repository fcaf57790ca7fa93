//! # yantra-base
//!
//! Core library for analyzing Yantra grammar sources: line classification,
//! the node model, the whole-document symbol index and IDE queries.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (AnalysisHost, completion, hover, goto-def, rename)
//!   ↓
//! syntax    → Node model, SyntaxFile, formatter, highlighting spans
//!   ↓
//! parser    → Line classifier, parse state, line state machine
//!   ↓
//! hir       → Symbols, definitions index, forward references, diagnostics
//!   ↓
//! base      → Primitives (Position, Range, LexToken)
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → parser → syntax → ide)
// ============================================================================

/// Foundation types: Position, Range, LexToken
pub mod base;

/// Semantic model: symbol index and diagnostics
pub mod hir;

/// Parser: line classifier and analysis driver
pub mod parser;

/// Syntax: node model, analyzed file, formatter
pub mod syntax;

/// IDE features: completion, hover, goto-definition, find-references
pub mod ide;

// Re-export foundation types
pub use base::{LexToken, Position, Range};

// Re-export the entry points most callers need
pub use hir::{Diagnostic, DiagnosticKind, Severity, SymbolIndex, SymbolKind};
pub use ide::{AnalysisHost, AnalysisStatus};
pub use parser::{AnalysisOptions, ConfigError, analyze};
pub use syntax::{FormatOptions, SyntaxFile};
