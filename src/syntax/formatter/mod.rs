//! Line formatter for Yantra documents
//!
//! Every node renders itself. Runs of consecutive token definitions are
//! aligned on `:=`, code block bodies are reindented by one level, and blank
//! lines are kept. Documents with diagnostics are not formatted.

mod options;

pub use options::FormatOptions;

use super::SyntaxFile;
use super::ast::Node;

/// Format an analyzed document.
///
/// Returns no lines when the document has any diagnostic.
pub fn format_lines(file: &SyntaxFile, options: &FormatOptions) -> Vec<String> {
    if !file.diagnostics().is_empty() {
        return Vec::new();
    }

    let nodes = file.nodes();
    let mut lines = Vec::with_capacity(nodes.len());
    let mut line = 0;

    while line < nodes.len() {
        match &nodes[line] {
            None => {
                lines.push(String::new());
                line += 1;
            }
            Some(Node::Token(_)) => {
                let run: Vec<_> = nodes[line..]
                    .iter()
                    .map_while(|node| match node {
                        Some(Node::Token(token)) => Some(token),
                        _ => None,
                    })
                    .collect();
                let width = run
                    .iter()
                    .map(|token| token.name().text().chars().count())
                    .max()
                    .unwrap_or(0);
                lines.extend(run.iter().map(|token| token.render(width)));
                line += run.len();
            }
            Some(node) => {
                lines.extend(node.render(options));
                line += node.line_span().max(1);
            }
        }
    }

    lines
}
