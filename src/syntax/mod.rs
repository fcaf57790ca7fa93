//! Syntax layer: the node model, the analyzed file, highlighting spans and
//! the formatter.

pub mod ast;
pub mod file;
pub mod formatter;
pub mod highlight;

pub use ast::Node;
pub use file::SyntaxFile;
pub use formatter::{FormatOptions, format_lines};
pub use highlight::{MODIFIER_DECLARATION, SemanticToken, TokenType};
