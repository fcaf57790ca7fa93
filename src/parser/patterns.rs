//! Compiled patterns for lines and pragma parameters.
//!
//! Line patterns are applied to the trimmed line. Parameter patterns are
//! applied to the text following a pragma name; list patterns are unanchored
//! and used with [`LexToken::matches_repeated`](crate::base::LexToken::matches_repeated).

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

// ============================================================================
// LINE PATTERNS
// ============================================================================

pub(crate) static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^//(?P<text>.*)$"));

pub(crate) static PRAGMA_LINE: Lazy<Regex> =
    Lazy::new(|| compile(r"^%(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*(?P<params>.*?)\s*$"));

pub(crate) static TOKEN_LINE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<name>[A-Z][A-Z0-9_]*)\s*(?P<op>:=)\s*(?P<rest>.*?)\s*$"));

pub(crate) static RULE_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^(?P<name>[a-z][A-Za-z0-9_]*)(?:\(\s*(?P<alias>[A-Za-z_][A-Za-z0-9_]*)\s*\))?\s*(?P<op>:=)\s*(?P<rest>.*?)\s*$",
    )
});

pub(crate) static BLOCK_NAME_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(r"^@(?P<walker>[A-Za-z_][A-Za-z0-9_]*)(?:::(?P<function>[A-Za-z_][A-Za-z0-9_]*))?$")
});

// ============================================================================
// DEFINITION BODIES
// ============================================================================

pub(crate) static TOKEN_VALUE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r#"^(?P<literal>"(?:[^"\\]|\\.)*")(?P<bang>!)?\s*(?:\[\s*(?P<mode>\^|[A-Za-z_][A-Za-z0-9_]*)\s*\])?\s*(?P<term>;)?$"#,
    )
});

/// Splits a rule body into its element list and optional terminator.
pub(crate) static RULE_BODY: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<elements>.*?)\s*(?P<term>;)?$"));

/// One rule element: `[^]name[(alias)]`, followed by spaces or the end of the list.
pub(crate) static RULE_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"\s*(?P<anchor>\^)?(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:\(\s*(?P<alias>[A-Za-z_][A-Za-z0-9_]*)\s*\))?(?:\s+|$)",
    )
});

// ============================================================================
// PRAGMA PARAMETERS
// ============================================================================

/// A single identifier with an optional terminator.
pub(crate) static SINGLE_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*(?P<term>;)?$"));

/// A name list with an optional terminator.
pub(crate) static NAME_LIST: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?P<list>[^;]*?)\s*(?P<term>;)?$"));

/// One entry of a space-separated name list.
pub(crate) static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| compile(r"\s*(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*"));

pub(crate) static MEMBERS_PARAMS: Lazy<Regex> = Lazy::new(|| {
    compile(r"^(?P<walker>[A-Za-z_][A-Za-z0-9_]*)\s*(?:(?P<term>;)|(?P<open>%\{))?$")
});

pub(crate) static FUNCTION_PARAMS: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^(?P<rule>[A-Za-z_][A-Za-z0-9_]*)\s+(?:(?P<walker>[A-Za-z_][A-Za-z0-9_]*)::)?(?P<function>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^()]*)\)\s*(?P<arrow>->)\s*(?P<ret>[A-Za-z_][A-Za-z0-9_:<>,*&\s]*?)\s*(?P<term>;)?$",
    )
});

pub(crate) static WALKER_INTERFACE_PARAMS: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^(?P<walker>[A-Za-z_][A-Za-z0-9_]*)\s+(?P<type>[A-Za-z_][A-Za-z0-9_:<>]*)\s*(?P<term>;)?$",
    )
});
