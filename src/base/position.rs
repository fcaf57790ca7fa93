/// Position tracking for source constructs
///
/// Stores line/character locations (0-indexed for LSP compatibility) used by
/// diagnostics, go-to-definition, references and highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range in source code.
///
/// `end` is `None` while a multi-line construct (an open code block) has not
/// been terminated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: Position,
    pub end: Option<Position>,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Create a range that has not been closed yet
    pub fn open(start: Position) -> Self {
        Self { start, end: None }
    }

    /// Create a range from line/character coordinates
    pub fn from_coords(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Self {
        Self::new(
            Position::new(start_line, start_char),
            Position::new(end_line, end_char),
        )
    }

    /// A range covering `start..end` on a single line
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self::from_coords(line, start, line, end)
    }

    /// Close an open range
    pub fn with_end(mut self, end: Position) -> Self {
        self.end = Some(end);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    /// Check if a position falls within this range (both ends inclusive).
    ///
    /// An open range contains nothing.
    pub fn contains(&self, position: Position) -> bool {
        match self.end {
            Some(end) => self.start <= position && position <= end,
            None => false,
        }
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Range {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}
