//! Diagnostics — Syntax, structural and semantic error reporting.
//!
//! Problems found while analyzing a document are collected, never raised.
//! Each diagnostic has a [`DiagnosticKind`] whose `Display` is the message
//! shown to the user.

use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use super::symbols::SymbolKind;
use crate::base::Range;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

/// What went wrong.
///
/// ## Code Ranges
///
/// - **E01xx**: Syntax errors (line shapes, parameters, terminators)
/// - **E02xx**: Structural errors (code blocks and markers out of sequence)
/// - **E03xx**: Semantic errors
/// - **W03xx**: Semantic warnings
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    // ========================================================================
    // SYNTAX ERRORS (E01xx)
    // ========================================================================
    #[error("syntax error: line is not a comment, pragma, token or rule definition")]
    Syntax,
    #[error("invalid token definition, expected NAME := \"literal\"[!] [[mode]];")]
    InvalidTokenDefinition,
    #[error("invalid rule body, expected a sequence of [^]name[(alias)] elements")]
    InvalidRuleBody,
    #[error("invalid parameters for %{pragma}, expected {expected}")]
    InvalidParameters {
        pragma: SmolStr,
        expected: &'static str,
    },
    #[error("missing terminating ';'")]
    MissingTerminator,
    #[error("invalid code block name, expected @Walker[::Function]")]
    InvalidBlockName,

    // ========================================================================
    // STRUCTURAL ERRORS (E02xx)
    // ========================================================================
    #[error("a code block was expected")]
    CodeBlockExpected,
    #[error("rule '{0}' has no terminating ';' and needs a code block")]
    RuleNeedsCodeBlock(SmolStr),
    #[error("code block end without a start")]
    UnmatchedBlockEnd,
    #[error("unexpected code block, only rules and %members take code blocks")]
    UnexpectedBlock,
    #[error("unexpected code block name")]
    UnexpectedBlockName,
    #[error("code block is never closed")]
    UnclosedBlock,
    #[error("too many errors (more than {0}), analysis stopped")]
    TooManyErrors(usize),

    // ========================================================================
    // SEMANTIC ERRORS (E03xx)
    // ========================================================================
    #[error("unknown pragma '%{0}'")]
    UnknownPragma(SmolStr),
    #[error("{0} already specified")]
    AlreadySpecified(&'static str),
    #[error("{kind} '{name}' is not defined")]
    Undefined { kind: SymbolKind, name: SmolStr },
    #[error("function '{0}' is already declared")]
    DuplicateFunction(SmolStr),
    #[error("inline implementation invalid: walker '{walker}' is implemented by '{interface}'")]
    InlineImplementation { walker: SmolStr, interface: SmolStr },
    #[error("only one anchor '^' is allowed in a rule body")]
    MultipleAnchors,
    #[error("'{0}' is neither a TOKEN nor a rule name")]
    InvalidElementName(SmolStr),
    #[error("alias '{alias}' must use the same casing as '{element}'")]
    AliasCasing { element: SmolStr, alias: SmolStr },
    #[error("no default walker has been declared")]
    NoDefaultWalker,

    // ========================================================================
    // WARNINGS (W03xx)
    // ========================================================================
    #[error("{kind} '{name}' has not been defined")]
    NotDefined { kind: SymbolKind, name: SmolStr },
    #[error("declare associativity before the token '{0}'")]
    AssociativityAfterToken(SmolStr),
    #[error("walker '{0}' has not been declared")]
    UnknownWalker(SmolStr),
    #[error("function '{0}' has not been declared")]
    UnknownFunction(SmolStr),
}

impl DiagnosticKind {
    /// Stable code for filtering and documentation.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::Syntax => "E0101",
            DiagnosticKind::InvalidTokenDefinition => "E0102",
            DiagnosticKind::InvalidRuleBody => "E0103",
            DiagnosticKind::InvalidParameters { .. } => "E0104",
            DiagnosticKind::MissingTerminator => "E0105",
            DiagnosticKind::InvalidBlockName => "E0106",
            DiagnosticKind::CodeBlockExpected => "E0201",
            DiagnosticKind::RuleNeedsCodeBlock(_) => "E0202",
            DiagnosticKind::UnmatchedBlockEnd => "E0203",
            DiagnosticKind::UnexpectedBlock => "E0204",
            DiagnosticKind::UnexpectedBlockName => "E0205",
            DiagnosticKind::UnclosedBlock => "E0206",
            DiagnosticKind::TooManyErrors(_) => "E0207",
            DiagnosticKind::UnknownPragma(_) => "E0301",
            DiagnosticKind::AlreadySpecified(_) => "E0302",
            DiagnosticKind::Undefined { .. } => "E0303",
            DiagnosticKind::DuplicateFunction(_) => "E0304",
            DiagnosticKind::InlineImplementation { .. } => "E0305",
            DiagnosticKind::MultipleAnchors => "E0306",
            DiagnosticKind::InvalidElementName(_) => "E0307",
            DiagnosticKind::AliasCasing { .. } => "E0308",
            DiagnosticKind::NoDefaultWalker => "E0309",
            DiagnosticKind::NotDefined { .. } => "W0301",
            DiagnosticKind::AssociativityAfterToken(_) => "W0302",
            DiagnosticKind::UnknownWalker(_) => "W0303",
            DiagnosticKind::UnknownFunction(_) => "W0304",
        }
    }

    /// Default severity of this kind.
    pub fn severity(&self) -> Severity {
        if self.code().starts_with('W') {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0101").
    pub code: &'static str,
    /// The diagnostic message.
    pub message: Arc<str>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind, range: Range) -> Self {
        Self {
            range,
            severity: kind.severity(),
            code: kind.code(),
            message: Arc::from(kind.to_string()),
            kind,
        }
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
