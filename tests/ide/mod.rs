//! IDE feature tests
//!
//! Tests for:
//! - Go to definition
//! - Find references and rename
//! - Code completion
//! - Document symbols
//! - Semantic tokens
//! - Hover and folding ranges
//! - The AnalysisHost contract

pub mod tests_completion;
pub mod tests_host;
pub mod tests_navigation;
pub mod tests_outline;
