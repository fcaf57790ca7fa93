//! Lexical tokens carved out of a single source line.

use regex::{Captures, Match, Regex};
use smol_str::SmolStr;

use super::{Position, Range};

/// An immutable slice of source text and the range it occupies.
///
/// Tokens never span lines. They are produced by slicing the current line's
/// pattern match; the only synthesized tokens are implicit names (such as the
/// implicit function `go`), which carry the range of the construct that
/// implied them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexToken {
    text: SmolStr,
    range: Range,
}

impl LexToken {
    pub fn new(text: impl Into<SmolStr>, range: Range) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> &SmolStr {
        &self.text
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn line(&self) -> u32 {
        self.range.start.line
    }

    pub fn start(&self) -> u32 {
        self.range.start.character
    }

    /// Character offset one past the last character
    pub fn end(&self) -> u32 {
        self.range
            .end
            .map(|end| end.character)
            .unwrap_or(self.range.start.character)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `character` falls within the token (both ends inclusive).
    ///
    /// Returns false while the token has no resolved end.
    pub fn contains(&self, character: u32) -> bool {
        match self.range.end {
            Some(end) => self.range.start.character <= character && character <= end.character,
            None => false,
        }
    }

    /// Whether `position` falls within the token.
    pub fn contains_position(&self, position: Position) -> bool {
        position.line == self.line() && self.contains(position.character)
    }

    /// Build the token for a match taken against this token's text.
    pub fn sub(&self, m: Match<'_>) -> LexToken {
        let start = self.range.start.character + char_len(&self.text[..m.start()]);
        let end = start + char_len(m.as_str());
        LexToken::new(m.as_str(), Range::on_line(self.line(), start, end))
    }

    /// Token for a named group of captures taken against this token's text.
    ///
    /// A missing group yields an empty token at the end of this token.
    pub fn capture(&self, caps: &Captures<'_>, group: &str) -> LexToken {
        self.capture_opt(caps, group).unwrap_or_else(|| {
            let end = Position::new(self.line(), self.end());
            LexToken::new("", Range::new(end, end))
        })
    }

    /// Token for an optional named group.
    pub fn capture_opt(&self, caps: &Captures<'_>, group: &str) -> Option<LexToken> {
        caps.name(group).map(|m| self.sub(m))
    }

    /// Apply `pattern` repeatedly from the start of the token with no gaps.
    ///
    /// Returns the capture groups of every repetition (group 0 excluded) when
    /// the repetitions tile the whole text, and `None` otherwise. Empty text is
    /// tiled by zero repetitions. The pattern must not be anchored and should
    /// not match the empty string.
    pub fn matches_repeated(&self, pattern: &Regex) -> Option<Vec<Vec<Option<LexToken>>>> {
        let mut repetitions = Vec::new();
        let mut pos = 0;

        while pos < self.text.len() {
            let captures = pattern.captures_at(&self.text, pos)?;
            let whole = captures.get(0)?;
            if whole.start() != pos || whole.end() == pos {
                return None;
            }
            let groups = captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| self.sub(m)))
                .collect();
            repetitions.push(groups);
            pos = whole.end();
        }

        Some(repetitions)
    }
}

/// Number of characters in a string slice.
pub(crate) fn char_len(text: &str) -> u32 {
    text.chars().count() as u32
}
