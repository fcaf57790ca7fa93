//! IDE features — High-level APIs for editor integrations.
//!
//! This module sits between the analyzed document ([`SyntaxFile`]) and a
//! protocol layer such as an LSP server. Each function corresponds to an
//! editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take an analyzed document in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the protocol boundary
//! 3. **Line addressed**: Every node sits at its starting line, so cursor
//!    queries look at one node only
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use yantra::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.parse("%walkers Eval;\nexpr := NUM;\nNUM := \"0\";");
//!
//! let symbols = host.document_symbols();
//! let hover = host.hover_at(1, 9);
//! ```
//!
//! [`SyntaxFile`]: crate::syntax::SyntaxFile

mod analysis;
mod completion;
mod folding;
mod goto;
mod hover;
mod references;
mod semantic_tokens;
mod symbols;

pub use analysis::{AnalysisHost, AnalysisStatus};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use folding::{FoldingRange, folding_ranges};
pub use goto::{goto_definition, reference_at};
pub use hover::{HoverResult, hover};
pub use references::{TextEdit, find_references, references_at, rename_at};
pub use semantic_tokens::{
    MODIFIER_DECLARATION, SemanticToken, TokenType, semantic_tokens, token_modifier_legend,
    token_type_legend,
};
pub use symbols::{DocumentSymbol, document_symbols, lsp_symbol_kind};
