//! # Tokens
//!
//! Positioned, classified units of recognised Markdown syntax. A token owns no
//! text: its [`Span`] always addresses the original input handed to the
//! tokenizer (plus the caller's offset), in bytes.

use std::fmt;

/// Byte range `[start, start + length)` in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Span covering `[start, end)`; an inverted range yields an empty span.
    pub fn between(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Shift the span right by `offset` bytes.
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            length: self.length,
        }
    }

    /// The referenced text, if the span lies on char boundaries of `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Kind of a recognised construct. This is the contract consumed by
/// highlighting, outlining and navigation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Italics,
    Bold,

    H1,
    H2,
    H3,
    H4,
    H5,
    H6,

    UnorderedListElement,
    OrderedListElement,

    /// Indented code blocks and inline code spans.
    CodeBlock,
    Blockquote,

    LinkExpression,
    LinkText,
    LinkTitle,
    LinkLabel,

    InlineUrl,
    UrlDefinition,
    AutomaticUrl,

    ImageExpression,
    ImageAltText,
    ImageTitle,
    ImageLabel,

    HorizontalRule,
}

impl TokenType {
    /// Header kind for a marker count of 1 to 6.
    ///
    /// # Panics
    ///
    /// Panics on any other level. The grammar only ever recognises six header
    /// levels, so reaching this is a grammar defect rather than bad input.
    pub fn heading(level: u8) -> Self {
        match level {
            1 => TokenType::H1,
            2 => TokenType::H2,
            3 => TokenType::H3,
            4 => TokenType::H4,
            5 => TokenType::H5,
            6 => TokenType::H6,
            other => panic!("header level {other} is outside 1..=6"),
        }
    }

    /// Header level for `H1`..`H6`, `None` for every other kind.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            TokenType::H1 => Some(1),
            TokenType::H2 => Some(2),
            TokenType::H3 => Some(3),
            TokenType::H4 => Some(4),
            TokenType::H5 => Some(5),
            TokenType::H6 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenType,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenType, span: Span) -> Self {
        Self { kind, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn span_end_and_contains() {
        let s = Span::new(3, 4);
        assert_eq!(s.end(), 7);
        assert!(s.contains(3));
        assert!(s.contains(6));
        assert!(!s.contains(7));
        assert!(!s.is_empty());
    }

    #[test]
    fn span_between_saturates() {
        assert_eq!(Span::between(5, 2), Span::new(5, 0));
        assert!(Span::between(5, 2).is_empty());
    }

    #[test]
    fn span_slice_and_offset() {
        let s = Span::new(2, 5);
        assert_eq!(s.slice("# Title"), Some("Title"));
        assert_eq!(s.offset(10), Span::new(12, 5));
        assert_eq!(Span::new(5, 10).slice("short"), None);
    }

    #[rstest]
    #[case(1, TokenType::H1)]
    #[case(2, TokenType::H2)]
    #[case(3, TokenType::H3)]
    #[case(4, TokenType::H4)]
    #[case(5, TokenType::H5)]
    #[case(6, TokenType::H6)]
    fn heading_levels_round_trip(#[case] level: u8, #[case] kind: TokenType) {
        assert_eq!(TokenType::heading(level), kind);
        assert_eq!(kind.heading_level(), Some(level));
    }

    #[test]
    #[should_panic(expected = "outside 1..=6")]
    fn impossible_heading_level_panics() {
        TokenType::heading(7);
    }

    #[test]
    fn non_headings_have_no_level() {
        assert!(!TokenType::Bold.is_heading());
        assert_eq!(TokenType::Blockquote.heading_level(), None);
    }
}
