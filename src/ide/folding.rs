//! Folding ranges for code blocks.

use crate::syntax::SyntaxFile;

/// A foldable line span (0-indexed, both ends inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FoldingRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// One range per closed code block, from its opening line to its `%}` line.
pub fn folding_ranges(file: &SyntaxFile) -> Vec<FoldingRange> {
    file.iter_nodes()
        .filter_map(|(_, node)| node.code_block())
        .filter_map(|block| {
            let end = block.range().end?;
            Some(FoldingRange {
                start_line: block.start_line(),
                end_line: end.line,
            })
        })
        .filter(|range| range.end_line > range.start_line)
        .collect()
}
