//! Foundation types for the Yantra toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`Position`], [`Range`] - Zero-based line/character locations
//! - [`LexToken`] - A slice of a source line together with its range
//!
//! This module has NO dependencies on other yantra modules.

mod position;
mod token;

pub use position::{Position, Range};
pub use token::LexToken;

pub(crate) use token::char_len;
