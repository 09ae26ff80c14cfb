//! # Outline
//!
//! Header hierarchy for outlining and navigation. A header at level `L`
//! opens a section that runs up to the next header at level `L` or above
//! (fewer `#`), or to the end of the document. Only headers at the outermost
//! level count; a header inside a blockquote or list does not open a section.

use crate::token::{Span, TokenType};
use crate::tokens::Tokenizer;

/// Characters longer than this are cut down in [`Section::collapsed_hint`].
const HINT_LIMIT: usize = 250;
const HINT_KEEP: usize = 247;

/// One collapsible region of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: TokenType,
    pub level: u8,
    /// The header token.
    pub header: Span,
    /// Header through the end of the section.
    pub extent: Span,
    title: String,
    hint: String,
}

impl Section {
    /// The header line without leading blanks and `#` markers.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text shown for a collapsed section: the whole section, or its first
    /// 247 characters followed by `...` when it is longer than 250.
    pub fn collapsed_hint(&self) -> &str {
        &self.hint
    }
}

/// One entry of a navigation list: the title indented by one `-` per level
/// below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub label: String,
    /// Where the section starts.
    pub position: usize,
}

/// Sections of `document` in document order.
pub fn sections(document: &str) -> Vec<Section> {
    sections_with(&Tokenizer::default(), document)
}

/// Sections found with a configured tokenizer.
pub fn sections_with(tokenizer: &Tokenizer, document: &str) -> Vec<Section> {
    let headers = tokenizer.parse_sections(document);
    headers
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            let level = token.kind.heading_level()?;
            let end = headers[i + 1..]
                .iter()
                .find(|next| next.kind.heading_level().is_some_and(|l| l <= level))
                .map_or(document.len(), |next| next.span.start);
            let extent = Span::between(token.span.start, end);
            let text = extent.slice(document)?;
            Some(Section {
                kind: token.kind,
                level,
                header: token.span,
                extent,
                title: title_of(text),
                hint: hint_of(text),
            })
        })
        .collect()
}

/// Navigation entries for `document`.
pub fn navigation(document: &str) -> Vec<NavigationEntry> {
    sections(document)
        .into_iter()
        .map(|s| NavigationEntry {
            label: format!("{}{}", "-".repeat(usize::from(s.level) - 1), s.title),
            position: s.extent.start,
        })
        .collect()
}

fn title_of(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches([' ', '\t', '#'])
        .trim_end()
        .to_string()
}

fn hint_of(text: &str) -> String {
    if text.chars().count() > HINT_LIMIT {
        let kept: String = text.chars().take(HINT_KEEP).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
