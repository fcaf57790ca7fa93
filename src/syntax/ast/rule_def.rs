use regex::Captures;
use smol_str::SmolStr;

use crate::base::{LexToken, Range};
use crate::hir::{
    Definition, DefinitionDetail, DiagnosticKind, Reference, SymbolIndex, SymbolKind,
    code_block_key, is_rule_name, is_token_name,
};
use crate::parser::patterns::{RULE_BODY, RULE_ELEMENT};
use crate::parser::{ParseState, PendingRule};
use crate::syntax::highlight::{SemanticToken, TokenType};

use super::Node;

/// One element of a rule body: `[^]name[(alias)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleElement {
    pub anchor: Option<LexToken>,
    pub name: LexToken,
    pub alias: Option<LexToken>,
}

impl RuleElement {
    /// The token or rule this element stands for; `None` for a malformed name.
    pub fn reference(&self) -> Option<Reference> {
        let name = self.name.name();
        if is_token_name(name) {
            Some(Reference::token(name.clone()))
        } else if is_rule_name(name) {
            Some(Reference::rule(name.clone()))
        } else {
            None
        }
    }

    fn render(&self) -> String {
        let anchor = if self.anchor.is_some() { "^" } else { "" };
        match &self.alias {
            Some(alias) => format!("{anchor}{}({})", self.name.text(), alias.text()),
            None => format!("{anchor}{}", self.name.text()),
        }
    }
}

/// `name[(alias)] := element... [;]`
///
/// A body without `;` takes one or more code blocks on the following lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    name: LexToken,
    alias: Option<LexToken>,
    op: LexToken,
    elements: Vec<RuleElement>,
    terminated: bool,
    internal_name: SmolStr,
    range: Range,
}

impl RuleDefinition {
    pub(crate) fn parse(
        caps: &Captures<'_>,
        state: &mut ParseState<'_>,
        index: &mut SymbolIndex,
    ) -> Node {
        let name = state.capture(caps, "name");
        let rest = state.capture(caps, "rest");

        let (elements, terminated) = match RULE_BODY.captures(rest.text()) {
            Some(body) => {
                let list = rest.capture(&body, "elements");
                (parse_elements(&list, state), body.name("term").is_some())
            }
            None => {
                state.error_at(DiagnosticKind::InvalidRuleBody, rest.range());
                (Vec::new(), false)
            }
        };

        let rule = RuleDefinition {
            internal_name: index.next_rule_internal_name(name.text()),
            alias: state.capture_opt(caps, "alias"),
            op: state.capture(caps, "op"),
            name,
            elements,
            terminated,
            range: state.line_range(),
        };

        rule.check_elements(state, index);

        for definition in rule.definitions() {
            index.add_definition(definition);
        }
        index.remove_forward_reference(rule.name.text(), SymbolKind::Rule);

        if !rule.terminated {
            rule.expect_function_blocks(index);
            state.begin_rule(PendingRule {
                name: rule.name.clone(),
                internal_name: rule.internal_name.clone(),
                range: rule.range,
                blocks: 0,
            });
        }

        Node::Rule(rule)
    }

    /// Alias casing, anchors, and forward references for the elements.
    fn check_elements(&self, state: &mut ParseState<'_>, index: &mut SymbolIndex) {
        let mut anchored = false;

        for element in &self.elements {
            if let Some(anchor) = &element.anchor {
                if anchored {
                    state.error_at(DiagnosticKind::MultipleAnchors, anchor.range());
                }
                anchored = true;
            }

            let Some(reference) = element.reference() else {
                state.error_at(
                    DiagnosticKind::InvalidElementName(element.name.name().clone()),
                    element.name.range(),
                );
                continue;
            };

            if let Some(alias) = &element.alias {
                let same_casing = match reference.kind {
                    SymbolKind::Token => is_token_name(alias.text()),
                    _ => is_rule_name(alias.text()),
                };
                if !same_casing {
                    state.error_at(
                        DiagnosticKind::AliasCasing {
                            element: element.name.name().clone(),
                            alias: alias.name().clone(),
                        },
                        alias.range(),
                    );
                }
            }

            let self_reference =
                reference.kind == SymbolKind::Rule && reference.name == *self.name.name();
            if !self_reference && !index.lookup(&reference) {
                index.add_forward_reference(reference.name, reference.kind, element.name.range());
            }
        }
    }

    /// Every `%function` already declared for this rule name expects a code
    /// block for this body, unless its walker is implemented externally.
    fn expect_function_blocks(&self, index: &mut SymbolIndex) {
        let expected: Vec<SmolStr> = index
            .functions_for_rule(self.name.text())
            .into_iter()
            .filter_map(|def| match &def.detail {
                DefinitionDetail::Function { walker, function, .. } => Some((walker, function)),
                _ => None,
            })
            .filter(|(walker, _)| index.walker_interface(walker).is_none())
            .map(|(walker, function)| {
                code_block_key(Some(self.internal_name.as_str()), walker, function)
            })
            .collect();

        for key in expected {
            index.add_forward_reference(key, SymbolKind::CodeBlock, self.name.range());
        }
    }

    pub fn name(&self) -> &LexToken {
        &self.name
    }

    pub fn alias(&self) -> Option<&LexToken> {
        self.alias.as_ref()
    }

    /// Disambiguated name: `name` for the first body, then `name_1`, ...
    pub fn internal_name(&self) -> &SmolStr {
        &self.internal_name
    }

    pub fn elements(&self) -> &[RuleElement] {
        &self.elements
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn references(&self) -> Vec<(&LexToken, Reference)> {
        let mut refs = vec![(&self.name, Reference::rule(self.name.name().clone()))];
        refs.extend(
            self.elements
                .iter()
                .filter_map(|element| {
                    element
                        .reference()
                        .map(|reference| (&element.name, reference))
                }),
        );
        refs
    }

    pub fn definitions(&self) -> Vec<Definition> {
        vec![
            Definition::new(SymbolKind::Rule, self.name.name().clone(), self.name.range())
                .with_full_range(self.range)
                .with_detail(DefinitionDetail::Rule {
                    internal_name: self.internal_name.clone(),
                    expects_blocks: !self.terminated,
                }),
        ]
    }

    pub fn highlights(&self) -> Vec<SemanticToken> {
        let mut tokens = vec![
            SemanticToken::declaration(self.name.range(), TokenType::Variable),
            SemanticToken::new(self.op.range(), TokenType::Operator),
        ];
        if let Some(alias) = &self.alias {
            tokens.push(SemanticToken::new(alias.range(), TokenType::Parameter));
        }
        for element in &self.elements {
            if let Some(anchor) = &element.anchor {
                tokens.push(SemanticToken::new(anchor.range(), TokenType::Operator));
            }
            let token_type = match element.reference() {
                Some(reference) if reference.kind == SymbolKind::Token => TokenType::EnumMember,
                _ => TokenType::Variable,
            };
            tokens.push(SemanticToken::new(element.name.range(), token_type));
            if let Some(alias) = &element.alias {
                tokens.push(SemanticToken::new(alias.range(), TokenType::Parameter));
            }
        }
        tokens
    }

    pub fn render(&self) -> String {
        let mut line = match &self.alias {
            Some(alias) => format!("{}({}) :=", self.name.text(), alias.text()),
            None => format!("{} :=", self.name.text()),
        };
        for element in &self.elements {
            line.push(' ');
            line.push_str(&element.render());
        }
        if self.terminated {
            line.push(';');
        }
        line
    }
}

fn parse_elements(list: &LexToken, state: &mut ParseState<'_>) -> Vec<RuleElement> {
    let Some(repetitions) = list.matches_repeated(&RULE_ELEMENT) else {
        state.error_at(DiagnosticKind::InvalidRuleBody, list.range());
        return Vec::new();
    };

    repetitions
        .into_iter()
        .filter_map(|mut groups| {
            groups.resize(3, None);
            let alias = groups.pop().flatten();
            let name = groups.pop().flatten()?;
            let anchor = groups.pop().flatten();
            Some(RuleElement { anchor, name, alias })
        })
        .collect()
}
