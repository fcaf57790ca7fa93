//! HIR layer tests
//!
//! Tests for the semantic model of one document:
//! - Definitions and internal rule names
//! - Forward references and their resolution
//! - Document settings
//! - Diagnostics catalog

pub mod tests_definitions;
pub mod tests_diagnostics;
