//! Syntax layer tests
//!
//! Tests for:
//! - Line classification and the block state machine
//! - Node contents
//! - Formatting of fixtures and snippets

pub mod tests_formatting;
pub mod tests_nodes;
