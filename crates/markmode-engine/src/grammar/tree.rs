//! Concrete syntax tree shared by the HTML and token sinks.
//!
//! Nodes carry two kinds of payload: source [`Span`]s for the token sink and
//! the (already prefix-stripped) text the HTML sink needs. Neither sink ever
//! goes back to the grammar.

use crate::token::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX or Setext header. `span` is the ATX line or the Setext text.
    Header {
        level: u8,
        span: Span,
        content: Vec<Inline>,
    },
    Rule {
        span: Span,
    },
    List(List),
    /// Indented code, already outdented by one level.
    CodeBlock {
        span: Span,
        code: String,
    },
    BlockQuote {
        span: Span,
        children: Vec<Block>,
    },
    /// Raw HTML passed through verbatim.
    Html {
        html: String,
    },
    Definition(Definition),
    Paragraph(Vec<Inline>),
    /// Inline content of a tight list item; never wrapped in `<p>`.
    Plain(Vec<Inline>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// The `*`, `+`, `-` or `12.` marker.
    pub marker: Span,
    pub loose: bool,
    pub children: Vec<Block>,
}

/// `[id]: url "title"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub label_span: Span,
    pub url_span: Span,
    pub title_span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// Code span content, trimmed of surrounding spaces.
    Code {
        span: Span,
        code: String,
    },
    /// A backslash-escaped magic character.
    Escaped(char),
    /// Inline tag or comment passed through verbatim.
    Html(String),
    Image(Image),
    Link(Link),
    AutoLink {
        span: Span,
        url: String,
        email: bool,
    },
    Strong {
        span: Span,
        children: Vec<Inline>,
    },
    Emphasis {
        span: Span,
        children: Vec<Inline>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub span: Span,
    pub alt: String,
    pub alt_span: Span,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub span: Span,
    pub text_span: Span,
    pub children: Vec<Inline>,
    pub target: Target,
}

/// Where a link or image points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `(url "title")` written at the use site.
    Inline {
        url: String,
        url_span: Span,
        title: Option<String>,
        title_span: Option<Span>,
    },
    /// `[id]`, `[]` or the shortcut form. `destination` is filled in when a
    /// reference table was available.
    Reference {
        label_span: Option<Span>,
        destination: Option<Destination>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub url: String,
    pub title: Option<String>,
}
