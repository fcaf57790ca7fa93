//! Line-oriented parser for Yantra documents.
//!
//! Yantra is analyzed one line at a time. Each trimmed line is either a
//! structural marker handled by the state machine (`%{`, `%}`, `@Walker`) or
//! is classified by an ordered pattern table into a comment, pragma, token
//! definition or rule definition:
//!
//! ```text
//! Source Text
//!     ↓
//! Lines (trimmed, CRLF tolerant)
//!     ↓
//! State machine (code blocks, block expectations) + line classifier
//!     ↓
//! Nodes (one slot per line) + SymbolIndex + diagnostics
//!     ↓
//! Forward-reference resolution → SyntaxFile
//! ```

mod classify;
mod driver;
mod options;
pub(crate) mod patterns;
mod state;

pub use classify::{LineKind, line_kind};
pub use driver::analyze;
pub use options::{AnalysisOptions, ConfigError, DEFAULT_MAX_ERRORS, MAX_ERRORS_ENV};
pub use state::{BlockTarget, ParseState, PendingRule};
