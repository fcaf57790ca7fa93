//! Symbols — named entities of a Yantra document and the keys used to find them.

use std::fmt;

use smol_str::SmolStr;

use crate::base::Range;

/// The kind of a named entity.
///
/// The first six kinds are the ones source text can refer to. `CodeBlock` is
/// used internally to track which rule/walker/function combinations have an
/// implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Rule,
    Token,
    Function,
    Walker,
    LexerMode,
    WalkerInterface,
    CodeBlock,
}

impl SymbolKind {
    /// Human readable name used in messages.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Rule => "rule",
            SymbolKind::Token => "token",
            SymbolKind::Function => "function",
            SymbolKind::Walker => "walker",
            SymbolKind::LexerMode => "lexer mode",
            SymbolKind::WalkerInterface => "walker interface",
            SymbolKind::CodeBlock => "code block",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A lightweight key identifying a named entity without owning it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    pub kind: SymbolKind,
    pub name: SmolStr,
}

impl Reference {
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn rule(name: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Rule, name)
    }

    pub fn token(name: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Token, name)
    }

    pub fn walker(name: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Walker, name)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// A use of a name whose definition has not been confirmed yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardReference {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub range: Range,
}

/// Node-specific data attached to a definition.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DefinitionDetail {
    #[default]
    None,
    Token {
        literal: SmolStr,
    },
    Rule {
        /// Disambiguated name: `name`, `name_1`, `name_2`, ...
        internal_name: SmolStr,
        /// The body has no terminator and takes code blocks.
        expects_blocks: bool,
    },
    Function {
        rule: SmolStr,
        walker: SmolStr,
        function: SmolStr,
        signature: SmolStr,
    },
    WalkerInterface {
        type_name: SmolStr,
    },
}

/// A named entity defined somewhere in the document.
///
/// Definitions of the same (kind, name) accumulate; redefinition is not an
/// error by itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub kind: SymbolKind,
    pub name: SmolStr,
    /// Range of the defining name.
    pub range: Range,
    /// Range of the whole defining construct.
    pub full_range: Range,
    pub detail: DefinitionDetail,
}

impl Definition {
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>, range: Range) -> Self {
        Self {
            kind,
            name: name.into(),
            range,
            full_range: range,
            detail: DefinitionDetail::None,
        }
    }

    pub fn with_full_range(mut self, full_range: Range) -> Self {
        self.full_range = full_range;
        self
    }

    pub fn with_detail(mut self, detail: DefinitionDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn reference(&self) -> Reference {
        Reference::new(self.kind, self.name.clone())
    }

    /// Internal name of a rule body, or the plain name for everything else.
    pub fn internal_name(&self) -> &SmolStr {
        match &self.detail {
            DefinitionDetail::Rule { internal_name, .. } => internal_name,
            _ => &self.name,
        }
    }

    /// Whether this is a rule body that takes code blocks.
    pub fn expects_blocks(&self) -> bool {
        matches!(
            self.detail,
            DefinitionDetail::Rule {
                expects_blocks: true,
                ..
            }
        )
    }
}

/// Composite key of a `%function` declaration: `rule::walker::function`.
pub fn function_key(rule: &str, walker: &str, function: &str) -> SmolStr {
    SmolStr::from(format!("{rule}::{walker}::{function}"))
}

/// Composite name of a code block: `[rule::]walker::function`.
pub fn code_block_key(rule: Option<&str>, walker: &str, function: &str) -> SmolStr {
    match rule {
        Some(rule) => function_key(rule, walker, function),
        None => SmolStr::from(format!("{walker}::{function}")),
    }
}

/// Whether `name` is TOKEN-cased (`[A-Z][A-Z0-9_]*`).
pub fn is_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Whether `name` is rule-cased (`[a-z][A-Za-z0-9_]*`).
pub fn is_rule_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
