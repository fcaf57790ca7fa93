//! Analysis driver: the per-line state machine.
//!
//! Every line goes through the same priority order:
//!
//! 1. inside a code block, only `%}` ends it and everything else is body text
//! 2. while a named block is expected, an `@Walker[::Function]` line names it
//! 3. while any block is expected, anything but `%{` is an error
//! 4. otherwise blank lines are skipped, block markers are handled, and the
//!    line classifier builds a node
//!
//! After the last line, forward references that are still undefined become
//! warnings.

use crate::hir::{DiagnosticKind, SymbolIndex, SymbolKind, code_block_key};
use crate::syntax::SyntaxFile;
use crate::syntax::ast::{CodeBlock, CodeBlockName, IMPLICIT_FUNCTION, Node};

use super::classify::classify;
use super::options::AnalysisOptions;
use super::state::ParseState;

const BLOCK_OPEN: &str = "%{";
const BLOCK_CLOSE: &str = "%}";

/// Analyze a whole document.
///
/// Always starts from scratch; nothing is carried over from earlier passes.
pub fn analyze(text: &str, options: &AnalysisOptions) -> SyntaxFile {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    tracing::debug!(lines = lines.len(), "analysis started");

    let mut driver = Driver::new(lines.len());
    let mut aborted = false;

    for (number, raw) in lines.iter().enumerate() {
        driver.line(number as u32, raw);

        if driver.state.error_count() > options.max_errors {
            driver.state.error(DiagnosticKind::TooManyErrors(options.max_errors));
            tracing::warn!(
                line = number,
                max_errors = options.max_errors,
                "too many errors, analysis stopped"
            );
            aborted = true;
            break;
        }
    }

    let file = driver.finish(aborted);
    tracing::debug!(
        nodes = file.iter_nodes().count(),
        definitions = file.index().definition_count(),
        diagnostics = file.diagnostics().len(),
        aborted,
        "analysis finished"
    );
    file
}

struct Driver<'t> {
    state: ParseState<'t>,
    index: SymbolIndex,
    nodes: Vec<Option<Node>>,
    /// A block expectation was abandoned on a blank line, so a `%{` that
    /// follows is late rather than unexpected.
    late_block: bool,
}

impl<'t> Driver<'t> {
    fn new(line_count: usize) -> Self {
        Self {
            state: ParseState::new(),
            index: SymbolIndex::new(),
            nodes: vec![None; line_count],
            late_block: false,
        }
    }

    fn line(&mut self, number: u32, raw: &'t str) {
        self.state.begin_line(number, raw);
        let trimmed = self.state.trimmed();

        if self.state.in_block() {
            if trimmed == BLOCK_CLOSE {
                self.close_block();
            } else {
                self.state.push_block_line();
            }
            return;
        }

        if self.state.expect_named_block() {
            if trimmed.starts_with('@') {
                let node = CodeBlockName::parse(&mut self.state, &mut self.index);
                self.store(number, node);
                return;
            }
            self.state.set_expect_named_block(false);
            if !self.state.expect_any_block() {
                self.state.finish_rule();
            }
        }

        if self.state.expect_any_block() && trimmed != BLOCK_OPEN {
            self.state.error(DiagnosticKind::CodeBlockExpected);
            self.abandon_block_expectation();
            self.late_block = trimmed.is_empty();
        } else if !trimmed.is_empty() && trimmed != BLOCK_OPEN {
            self.late_block = false;
        }

        self.dispatch(number, trimmed);
    }

    fn dispatch(&mut self, number: u32, trimmed: &'t str) {
        match trimmed {
            "" => {}
            BLOCK_OPEN => self.open_block(),
            BLOCK_CLOSE => self.state.error(DiagnosticKind::UnmatchedBlockEnd),
            _ if trimmed.starts_with('@') => {
                self.state.error(DiagnosticKind::UnexpectedBlockName)
            }
            _ => match classify(trimmed) {
                Some((classifier, caps)) => {
                    tracing::trace!(line = number, kind = ?classifier.kind, "classified");
                    let node = (classifier.construct)(&caps, &mut self.state, &mut self.index);
                    self.store(number, node);
                }
                None => self.state.error(DiagnosticKind::Syntax),
            },
        }
    }

    /// A required block did not come. A rule that has no block at all is
    /// reported at its own line.
    fn abandon_block_expectation(&mut self) {
        let needs_block = self.state.pending_rule().is_some_and(|rule| rule.blocks == 0);
        if needs_block {
            self.state.rule_needs_block();
        } else {
            self.state.finish_rule();
        }
    }

    fn open_block(&mut self) {
        let open = self.state.line_token();
        let rule = self.state.pending_rule().map(|rule| rule.internal_name.clone());

        let (name, walker) = match self.state.take_block_target() {
            Some(target) if target.members => (
                Some(code_block_key(None, &target.walker, &target.function)),
                Some(target.walker),
            ),
            Some(target) => (
                Some(code_block_key(rule.as_deref(), &target.walker, &target.function)),
                Some(target.walker),
            ),
            None if rule.is_some() => match self.index.settings().default_walker.clone() {
                Some(walker) => (
                    Some(code_block_key(rule.as_deref(), &walker, IMPLICIT_FUNCTION)),
                    Some(walker),
                ),
                None => {
                    self.state.error(DiagnosticKind::NoDefaultWalker);
                    (None, None)
                }
            },
            None => {
                if !self.late_block {
                    self.state.error(DiagnosticKind::UnexpectedBlock);
                }
                (None, None)
            }
        };
        self.late_block = false;

        self.state.open_block(CodeBlock::new(open, name, walker, false));
    }

    fn close_block(&mut self) {
        let close = self.state.line_token();
        let Some(mut block) = self.state.take_block() else {
            return;
        };
        block.close(close);

        let interface = block
            .walker()
            .and_then(|walker| self.index.walker_interface(walker))
            .cloned();
        if let (Some(interface), Some(walker)) = (interface, block.walker().cloned()) {
            self.state.error_at(
                DiagnosticKind::InlineImplementation {
                    walker,
                    interface: interface.clone(),
                },
                block.open_token().range(),
            );
            block.set_external(interface);
        }

        for definition in block.definitions() {
            let name = definition.name.clone();
            self.index.add_definition(definition);
            self.index.remove_forward_reference(&name, SymbolKind::CodeBlock);
        }

        if !block.is_inline() {
            if let Some(rule) = self.state.pending_rule_mut() {
                rule.blocks += 1;
                self.state.set_expect_named_block(true);
            }
        }

        self.store_block(block);
    }

    fn store(&mut self, number: u32, node: Node) {
        if let Some(slot) = self.nodes.get_mut(number as usize) {
            *slot = Some(node);
        }
    }

    /// Blocks opened on a `%members` line belong to that pragma node.
    fn store_block(&mut self, block: CodeBlock) {
        let line = block.start_line();
        let block = match self.nodes.get_mut(line as usize) {
            Some(Some(Node::Pragma(pragma))) if block.is_inline() => pragma.attach_block(block),
            _ => Some(block),
        };
        if let Some(block) = block {
            self.store(line, Node::CodeBlock(block));
        }
    }

    fn finish(mut self, aborted: bool) -> SyntaxFile {
        let unclosed = self.state.take_block();
        let had_unclosed = unclosed.is_some();
        if let Some(block) = unclosed {
            if !aborted {
                self.state
                    .error_at(DiagnosticKind::UnclosedBlock, block.open_token().range());
            }
            self.store_block(block);
        }

        if !aborted && !had_unclosed && self.state.expect_any_block() {
            self.state.error(DiagnosticKind::CodeBlockExpected);
            self.abandon_block_expectation();
        }

        for unresolved in self.index.take_unresolved() {
            tracing::trace!(
                kind = %unresolved.kind,
                name = %unresolved.name,
                "unresolved forward reference"
            );
            self.state.error_at(
                DiagnosticKind::NotDefined {
                    kind: unresolved.kind,
                    name: unresolved.name,
                },
                unresolved.range,
            );
        }

        SyntaxFile::from_parts(self.nodes, self.index, self.state.into_diagnostics(), aborted)
    }
}
