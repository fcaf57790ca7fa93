//! Pragmas: `%name [params] [;]` directives.
//!
//! Each pragma kind validates its own parameter shape. Singleton pragmas
//! (`%class`, `%walkers`, `%default_walker`) police repetition themselves.

use regex::Captures;
use smol_str::SmolStr;

use crate::base::{LexToken, Range};
use crate::hir::{
    Definition, DefinitionDetail, DiagnosticKind, Reference, SymbolIndex, SymbolKind,
    code_block_key, function_key, is_token_name,
};
use crate::parser::patterns::{
    FUNCTION_PARAMS, LIST_ITEM, MEMBERS_PARAMS, NAME_LIST, SINGLE_NAME, WALKER_INTERFACE_PARAMS,
};
use crate::parser::{BlockTarget, ParseState};
use crate::syntax::formatter::FormatOptions;
use crate::syntax::highlight::{SemanticToken, TokenType};

use super::{CodeBlock, MEMBERS_FUNCTION, Node};

/// The recognized pragma names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PragmaKind {
    Class,
    Walkers,
    DefaultWalker,
    Members,
    Left,
    Right,
    Token,
    Function,
    LexerMode,
    LexerInclude,
    WalkerInterface,
    Start,
    Namespace,
    Prologue,
    Epilogue,
    Include,
    CheckUnusedTokens,
}

impl PragmaKind {
    pub const ALL: [PragmaKind; 17] = [
        PragmaKind::Class,
        PragmaKind::Walkers,
        PragmaKind::DefaultWalker,
        PragmaKind::Members,
        PragmaKind::Left,
        PragmaKind::Right,
        PragmaKind::Token,
        PragmaKind::Function,
        PragmaKind::LexerMode,
        PragmaKind::LexerInclude,
        PragmaKind::WalkerInterface,
        PragmaKind::Start,
        PragmaKind::Namespace,
        PragmaKind::Prologue,
        PragmaKind::Epilogue,
        PragmaKind::Include,
        PragmaKind::CheckUnusedTokens,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Name as written after `%`.
    pub fn name(self) -> &'static str {
        match self {
            PragmaKind::Class => "class",
            PragmaKind::Walkers => "walkers",
            PragmaKind::DefaultWalker => "default_walker",
            PragmaKind::Members => "members",
            PragmaKind::Left => "left",
            PragmaKind::Right => "right",
            PragmaKind::Token => "token",
            PragmaKind::Function => "function",
            PragmaKind::LexerMode => "lexer_mode",
            PragmaKind::LexerInclude => "lexer_include",
            PragmaKind::WalkerInterface => "walker_interface",
            PragmaKind::Start => "start",
            PragmaKind::Namespace => "namespace",
            PragmaKind::Prologue => "prologue",
            PragmaKind::Epilogue => "epilogue",
            PragmaKind::Include => "include",
            PragmaKind::CheckUnusedTokens => "check_unused_tokens",
        }
    }

    /// Parameter shape, used in messages and completion details.
    pub fn usage(self) -> &'static str {
        match self {
            PragmaKind::Class => "ClassName;",
            PragmaKind::Walkers => "Walker...;",
            PragmaKind::DefaultWalker => "Walker;",
            PragmaKind::Members => "Walker [%{]",
            PragmaKind::Left | PragmaKind::Right | PragmaKind::Token => "TOKEN...;",
            PragmaKind::Function => "rule [Walker::]function(params) -> Type;",
            PragmaKind::LexerMode | PragmaKind::LexerInclude => "mode;",
            PragmaKind::WalkerInterface => "Walker Type;",
            PragmaKind::Start => "rule;",
            PragmaKind::Namespace
            | PragmaKind::Prologue
            | PragmaKind::Epilogue
            | PragmaKind::Include
            | PragmaKind::CheckUnusedTokens => "...",
        }
    }

    /// Accepted, but without semantics.
    pub fn is_stub(self) -> bool {
        matches!(
            self,
            PragmaKind::Namespace
                | PragmaKind::Prologue
                | PragmaKind::Epilogue
                | PragmaKind::Include
                | PragmaKind::CheckUnusedTokens
        )
    }
}

/// Associativity declared by `%left`, `%right` or `%token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    Token,
}

/// `%function rule [Walker::]function(params) -> Type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub rule: LexToken,
    /// Walker written before `::`; the default walker is used without it.
    pub walker: Option<LexToken>,
    pub function: LexToken,
    pub params: LexToken,
    pub return_type: LexToken,
    /// Walker the function belongs to, if it could be determined.
    pub walker_name: Option<SmolStr>,
    /// Whether this declaration was registered (it is not a duplicate).
    pub declared: bool,
}

impl FunctionDecl {
    /// `rule::walker::function`
    pub fn key(&self) -> Option<SmolStr> {
        self.walker_name
            .as_ref()
            .map(|walker| function_key(self.rule.text(), walker, self.function.text()))
    }

    /// `(params) -> Type`
    pub fn signature(&self) -> SmolStr {
        SmolStr::from(format!(
            "({}) -> {}",
            collapse_whitespace(self.params.text()),
            self.return_type.text()
        ))
    }
}

/// Parsed parameters of a pragma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PragmaBody {
    Class {
        name: LexToken,
    },
    Walkers {
        walkers: Vec<LexToken>,
        declared: bool,
    },
    DefaultWalker {
        walker: LexToken,
    },
    Members {
        walker: LexToken,
        /// `%{` written on the pragma line.
        open: Option<LexToken>,
        block: Option<CodeBlock>,
    },
    Associativity {
        associativity: Associativity,
        tokens: Vec<LexToken>,
    },
    Function(FunctionDecl),
    LexerMode {
        mode: LexToken,
    },
    LexerInclude {
        mode: LexToken,
    },
    WalkerInterface {
        walker: LexToken,
        type_name: LexToken,
        declared: bool,
    },
    Start {
        rule: LexToken,
    },
    Stub,
    /// Parameters did not have the expected shape.
    Invalid,
    Unknown,
}

/// A pragma line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    /// `%name`
    keyword: LexToken,
    name: LexToken,
    params: LexToken,
    kind: Option<PragmaKind>,
    body: PragmaBody,
    range: Range,
}

impl Pragma {
    pub(crate) fn parse(
        caps: &Captures<'_>,
        state: &mut ParseState<'_>,
        index: &mut SymbolIndex,
    ) -> Node {
        let name = state.capture(caps, "name");
        let params = state.capture(caps, "params");
        let keyword = LexToken::new(
            format!("%{}", name.text()),
            Range::on_line(name.line(), name.start().saturating_sub(1), name.end()),
        );
        let kind = PragmaKind::from_name(name.text());

        let body = match kind {
            Some(kind) => parse_body(kind, &params, state, index),
            None => {
                state.error_at(DiagnosticKind::UnknownPragma(name.name().clone()), name.range());
                PragmaBody::Unknown
            }
        };

        let pragma = Pragma {
            keyword,
            name,
            params,
            kind,
            body,
            range: state.line_range(),
        };

        for definition in pragma.definitions() {
            let (name, kind) = (definition.name.clone(), definition.kind);
            index.add_definition(definition);
            index.remove_forward_reference(&name, kind);
        }

        Node::Pragma(pragma)
    }

    pub fn keyword(&self) -> &LexToken {
        &self.keyword
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn kind(&self) -> Option<PragmaKind> {
        self.kind
    }

    pub fn body(&self) -> &PragmaBody {
        &self.body
    }

    pub fn params(&self) -> &LexToken {
        &self.params
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Code block opened inline on a `%members` line.
    pub fn block(&self) -> Option<&CodeBlock> {
        match &self.body {
            PragmaBody::Members { block, .. } => block.as_ref(),
            _ => None,
        }
    }

    /// Attach the block opened inline on this line. Returns the block back
    /// when this pragma cannot own it.
    pub(crate) fn attach_block(&mut self, code: CodeBlock) -> Option<CodeBlock> {
        match &mut self.body {
            PragmaBody::Members { open: Some(_), block, .. } if block.is_none() => {
                *block = Some(code);
                None
            }
            _ => Some(code),
        }
    }

    /// Number of source lines covered, inline block included.
    pub fn line_span(&self) -> usize {
        self.block().map_or(1, CodeBlock::line_span)
    }

    pub fn references(&self) -> Vec<(&LexToken, Reference)> {
        match &self.body {
            PragmaBody::Walkers { walkers, .. } => walkers
                .iter()
                .map(|walker| (walker, Reference::walker(walker.name().clone())))
                .collect(),
            PragmaBody::DefaultWalker { walker }
            | PragmaBody::Members { walker, .. }
            | PragmaBody::WalkerInterface { walker, .. } => {
                vec![(walker, Reference::walker(walker.name().clone()))]
            }
            PragmaBody::Associativity { tokens, .. } => tokens
                .iter()
                .filter(|token| is_token_name(token.text()))
                .map(|token| (token, Reference::token(token.name().clone())))
                .collect(),
            PragmaBody::Function(decl) => {
                let mut refs = vec![(&decl.rule, Reference::rule(decl.rule.name().clone()))];
                if let Some(walker) = &decl.walker {
                    refs.push((walker, Reference::walker(walker.name().clone())));
                }
                if let Some(key) = decl.key() {
                    refs.push((&decl.function, Reference::new(SymbolKind::Function, key)));
                }
                refs
            }
            PragmaBody::LexerMode { mode } | PragmaBody::LexerInclude { mode } => {
                vec![(mode, Reference::new(SymbolKind::LexerMode, mode.name().clone()))]
            }
            PragmaBody::Start { rule } => vec![(rule, Reference::rule(rule.name().clone()))],
            PragmaBody::Class { .. }
            | PragmaBody::Stub
            | PragmaBody::Invalid
            | PragmaBody::Unknown => Vec::new(),
        }
    }

    pub fn definitions(&self) -> Vec<Definition> {
        let define = |kind: SymbolKind, name: &LexToken| {
            Definition::new(kind, name.name().clone(), name.range()).with_full_range(self.range)
        };

        match &self.body {
            PragmaBody::Walkers {
                walkers,
                declared: true,
            } => walkers
                .iter()
                .map(|walker| define(SymbolKind::Walker, walker))
                .collect(),
            PragmaBody::Function(decl) if decl.declared => {
                let (Some(key), Some(walker)) = (decl.key(), decl.walker_name.clone()) else {
                    return Vec::new();
                };
                vec![
                    Definition::new(SymbolKind::Function, key, decl.function.range())
                        .with_full_range(self.range)
                        .with_detail(DefinitionDetail::Function {
                            rule: decl.rule.name().clone(),
                            walker,
                            function: decl.function.name().clone(),
                            signature: decl.signature(),
                        }),
                ]
            }
            PragmaBody::LexerMode { mode } => vec![define(SymbolKind::LexerMode, mode)],
            PragmaBody::WalkerInterface {
                walker,
                type_name,
                declared: true,
            } => vec![
                define(SymbolKind::WalkerInterface, walker).with_detail(
                    DefinitionDetail::WalkerInterface {
                        type_name: type_name.name().clone(),
                    },
                ),
            ],
            PragmaBody::Members {
                block: Some(block), ..
            } => block.definitions(),
            _ => Vec::new(),
        }
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        let mut spans = vec![SemanticToken::new(self.keyword.range(), TokenType::Keyword)];
        let mut push = |token: &LexToken, token_type: TokenType| {
            spans.push(SemanticToken::new(token.range(), token_type));
        };

        match &self.body {
            PragmaBody::Class { name } => push(name, TokenType::Class),
            PragmaBody::Walkers { walkers, .. } => {
                walkers.iter().for_each(|walker| push(walker, TokenType::Type));
            }
            PragmaBody::DefaultWalker { walker } => push(walker, TokenType::Type),
            PragmaBody::Members { walker, open, .. } => {
                push(walker, TokenType::Type);
                if let Some(open) = open {
                    push(open, TokenType::Macro);
                }
            }
            PragmaBody::Associativity { tokens, .. } => {
                tokens.iter().for_each(|token| push(token, TokenType::EnumMember));
            }
            PragmaBody::Function(decl) => {
                push(&decl.rule, TokenType::Variable);
                if let Some(walker) = &decl.walker {
                    push(walker, TokenType::Type);
                }
                push(&decl.function, TokenType::Function);
                push(&decl.return_type, TokenType::Class);
            }
            PragmaBody::LexerMode { mode } | PragmaBody::LexerInclude { mode } => {
                push(mode, TokenType::Namespace);
            }
            PragmaBody::WalkerInterface {
                walker, type_name, ..
            } => {
                push(walker, TokenType::Type);
                push(type_name, TokenType::Class);
            }
            PragmaBody::Start { rule } => push(rule, TokenType::Variable),
            PragmaBody::Stub | PragmaBody::Invalid | PragmaBody::Unknown => {}
        }

        let defined: Vec<Range> = self.definitions().iter().map(|def| def.range).collect();
        for span in spans.iter_mut() {
            if defined.contains(&span.range) {
                *span = SemanticToken::declaration(span.range, span.token_type);
            }
        }
        if let Some(block) = self.block() {
            spans.extend(block.highlights());
        }
        spans
    }

    /// `%name params` with whitespace collapsed; an inline block follows.
    pub fn render(&self, options: &FormatOptions) -> Vec<String> {
        let params = match self.kind {
            Some(kind) if !kind.is_stub() => collapse_whitespace(self.params.text()),
            _ => self.params.text().to_string(),
        };

        let mut head = self.keyword.text().to_string();
        if !params.is_empty() {
            head.push(' ');
            head.push_str(&params);
        }

        let mut lines = vec![head];
        if let Some(block) = self.block() {
            lines.extend(block.render(options));
        }
        lines
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ;", ";")
}

// ============================================================================
// PARAMETERS
// ============================================================================

fn parse_body(
    kind: PragmaKind,
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> PragmaBody {
    let body = match kind {
        PragmaKind::Class => parse_class(params, state, index),
        PragmaKind::Walkers => parse_walkers(params, state, index),
        PragmaKind::DefaultWalker => parse_default_walker(params, state, index),
        PragmaKind::Members => parse_members(params, state, index),
        PragmaKind::Left => parse_associativity(Associativity::Left, params, state, index),
        PragmaKind::Right => parse_associativity(Associativity::Right, params, state, index),
        PragmaKind::Token => parse_associativity(Associativity::Token, params, state, index),
        PragmaKind::Function => parse_function(params, state, index),
        PragmaKind::LexerMode => {
            single_name(params).map(|(mode, _)| PragmaBody::LexerMode { mode })
        }
        PragmaKind::LexerInclude => single_name(params).map(|(mode, _)| {
            if !index.is_defined(SymbolKind::LexerMode, mode.text()) {
                index.add_forward_reference(
                    mode.name().clone(),
                    SymbolKind::LexerMode,
                    mode.range(),
                );
            }
            PragmaBody::LexerInclude { mode }
        }),
        PragmaKind::WalkerInterface => parse_walker_interface(params, state, index),
        PragmaKind::Start => single_name(params).map(|(rule, _)| {
            index.settings_mut().start_rule = Some(rule.name().clone());
            if !index.is_defined(SymbolKind::Rule, rule.text()) {
                index.add_forward_reference(rule.name().clone(), SymbolKind::Rule, rule.range());
            }
            PragmaBody::Start { rule }
        }),
        _ => Some(PragmaBody::Stub),
    };

    body.unwrap_or_else(|| {
        let range = if params.is_empty() {
            state.line_range()
        } else {
            params.range()
        };
        state.error_at(
            DiagnosticKind::InvalidParameters {
                pragma: SmolStr::new_static(kind.name()),
                expected: kind.usage(),
            },
            range,
        );
        PragmaBody::Invalid
    })
}

/// A single identifier and whether it was terminated.
fn single_name(params: &LexToken) -> Option<(LexToken, bool)> {
    let caps = SINGLE_NAME.captures(params.text())?;
    Some((params.capture(&caps, "name"), caps.name("term").is_some()))
}

/// A non-empty space-separated identifier list.
fn name_list(params: &LexToken) -> Option<Vec<LexToken>> {
    let caps = NAME_LIST.captures(params.text())?;
    let list = params.capture(&caps, "list");
    let names: Vec<LexToken> = list
        .matches_repeated(&LIST_ITEM)?
        .into_iter()
        .filter_map(|groups| groups.into_iter().next().flatten())
        .collect();
    (!names.is_empty()).then_some(names)
}

fn require_walker(walker: &LexToken, state: &mut ParseState<'_>, index: &SymbolIndex) -> bool {
    let defined = index.is_defined(SymbolKind::Walker, walker.text());
    if !defined {
        state.error_at(
            DiagnosticKind::Undefined {
                kind: SymbolKind::Walker,
                name: walker.name().clone(),
            },
            walker.range(),
        );
    }
    defined
}

fn parse_class(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let (name, terminated) = single_name(params)?;
    if !terminated {
        state.error_at(DiagnosticKind::MissingTerminator, state.end_of_line_range());
    }

    let settings = index.settings_mut();
    if settings.class_name.is_some() {
        state.error(DiagnosticKind::AlreadySpecified("class"));
    } else {
        settings.class_name = Some(name.name().clone());
    }
    Some(PragmaBody::Class { name })
}

fn parse_walkers(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let walkers = name_list(params)?;

    let settings = index.settings_mut();
    if settings.walkers_declared {
        state.error(DiagnosticKind::AlreadySpecified("walkers"));
        return Some(PragmaBody::Walkers {
            walkers,
            declared: false,
        });
    }

    settings.walkers_declared = true;
    settings.default_walker = walkers.first().map(|walker| walker.name().clone());
    Some(PragmaBody::Walkers {
        walkers,
        declared: true,
    })
}

fn parse_default_walker(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let (walker, _) = single_name(params)?;

    if index.settings().default_walker_specified {
        state.error(DiagnosticKind::AlreadySpecified("default_walker"));
    } else if require_walker(&walker, state, index) {
        let settings = index.settings_mut();
        settings.default_walker = Some(walker.name().clone());
        settings.default_walker_specified = true;
    }
    Some(PragmaBody::DefaultWalker { walker })
}

fn parse_members(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let caps = MEMBERS_PARAMS.captures(params.text())?;
    let walker = params.capture(&caps, "walker");
    let open = params.capture_opt(&caps, "open");

    require_walker(&walker, state, index);

    match &open {
        Some(open) => state.open_block(CodeBlock::new(
            open.clone(),
            Some(code_block_key(None, walker.text(), MEMBERS_FUNCTION)),
            Some(walker.name().clone()),
            true,
        )),
        None => {
            state.set_block_target(Some(BlockTarget {
                walker: walker.name().clone(),
                function: SmolStr::new_static(MEMBERS_FUNCTION),
                members: true,
            }));
            state.set_expect_any_block(true);
        }
    }

    Some(PragmaBody::Members {
        walker,
        open,
        block: None,
    })
}

fn parse_associativity(
    associativity: Associativity,
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let tokens = name_list(params)?;

    for token in &tokens {
        if !is_token_name(token.text()) {
            state.error_at(
                DiagnosticKind::InvalidElementName(token.name().clone()),
                token.range(),
            );
        } else if index.is_defined(SymbolKind::Token, token.text()) {
            state.error_at(
                DiagnosticKind::AssociativityAfterToken(token.name().clone()),
                token.range(),
            );
        } else {
            index.add_forward_reference(token.name().clone(), SymbolKind::Token, token.range());
        }
    }

    Some(PragmaBody::Associativity {
        associativity,
        tokens,
    })
}

fn parse_function(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let caps = FUNCTION_PARAMS.captures(params.text())?;
    let mut decl = FunctionDecl {
        rule: params.capture(&caps, "rule"),
        walker: params.capture_opt(&caps, "walker"),
        function: params.capture(&caps, "function"),
        params: params.capture(&caps, "params"),
        return_type: params.capture(&caps, "ret"),
        walker_name: None,
        declared: false,
    };

    if caps.name("term").is_none() {
        state.error_at(DiagnosticKind::MissingTerminator, state.end_of_line_range());
    }

    decl.walker_name = match &decl.walker {
        Some(walker) => require_walker(walker, state, index).then(|| walker.name().clone()),
        None => {
            let default = index.settings().default_walker.clone();
            if default.is_none() {
                state.error_at(DiagnosticKind::NoDefaultWalker, decl.function.range());
            }
            default
        }
    };

    let (Some(key), Some(walker)) = (decl.key(), decl.walker_name.clone()) else {
        return Some(PragmaBody::Function(decl));
    };

    if index.is_defined(SymbolKind::Function, &key) {
        state.error_at(DiagnosticKind::DuplicateFunction(key), decl.function.range());
        return Some(PragmaBody::Function(decl));
    }
    decl.declared = true;

    if !index.is_defined(SymbolKind::Rule, decl.rule.text()) {
        index.add_forward_reference(decl.rule.name().clone(), SymbolKind::Rule, decl.rule.range());
    }

    // Bodies already waiting for blocks need one for this function too.
    if index.walker_interface(&walker).is_none() {
        let expected: Vec<SmolStr> = index
            .definitions_of(SymbolKind::Rule, decl.rule.text())
            .iter()
            .filter(|def| def.expects_blocks())
            .map(|def| {
                code_block_key(
                    Some(def.internal_name().as_str()),
                    &walker,
                    decl.function.text(),
                )
            })
            .collect();
        for block in expected {
            index.add_forward_reference(block, SymbolKind::CodeBlock, decl.function.range());
        }
    }

    Some(PragmaBody::Function(decl))
}

fn parse_walker_interface(
    params: &LexToken,
    state: &mut ParseState<'_>,
    index: &mut SymbolIndex,
) -> Option<PragmaBody> {
    let caps = WALKER_INTERFACE_PARAMS.captures(params.text())?;
    let walker = params.capture(&caps, "walker");
    let type_name = params.capture(&caps, "type");
    let declared = require_walker(&walker, state, index);

    Some(PragmaBody::WalkerInterface {
        walker,
        type_name,
        declared,
    })
}
