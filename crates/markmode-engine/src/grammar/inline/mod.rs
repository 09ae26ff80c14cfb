//! # Span Recognizers
//!
//! Passes run in a fixed order over the text of one leaf block:
//!
//! 1. code spans
//! 2. inline HTML tags and comments
//! 3. backslash escapes
//! 4. images (reference, then inline)
//! 5. links (reference, inline, then shortcut)
//! 6. autolinks
//! 7. bold, then italics
//!
//! Every pass returns [`Claim`]s. Claimed ranges are opaque to later passes,
//! except that a container claim (link text, bold content) exposes its inner
//! range as a fresh scope to the passes after it.
//!
//! Once every pass has run, claims are sorted and nested into the inline
//! tree; unclaimed bytes become text.

pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod escape;
pub mod html_tag;
pub mod link;

use std::iter::Peekable;
use std::ops::Range;
use std::vec;

use super::Grammar;
use super::blinds::Blinds;
use super::region::Region;
use super::tree::{Inline, Link, Target};
use crate::token::Span;

/// A node still waiting for its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Complete node without children.
    Leaf(Inline),
    Link {
        span: Span,
        text_span: Span,
        target: Target,
    },
    Strong(Span),
    Emphasis(Span),
}

impl Pending {
    fn finish(self, children: Vec<Inline>) -> Inline {
        match self {
            Pending::Leaf(inline) => inline,
            Pending::Link {
                span,
                text_span,
                target,
            } => Inline::Link(Link {
                span,
                text_span,
                children,
                target,
            }),
            Pending::Strong(span) => Inline::Strong { span, children },
            Pending::Emphasis(span) => Inline::Emphasis { span, children },
        }
    }
}

/// A byte range recognized by a span pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub outer: Range<usize>,
    /// Content range of a container; `None` for atomic claims.
    pub inner: Option<Range<usize>>,
    pub node: Pending,
}

impl Claim {
    pub fn leaf(outer: Range<usize>, inline: Inline) -> Self {
        Self {
            outer,
            inner: None,
            node: Pending::Leaf(inline),
        }
    }

    pub fn container(outer: Range<usize>, inner: Range<usize>, node: Pending) -> Self {
        Self {
            outer,
            inner: Some(inner),
            node,
        }
    }
}

/// State shared by the span passes of one leaf block.
pub struct Spans<'s, 'g> {
    pub grammar: &'s Grammar<'g>,
    pub region: &'s Region,
    pub claims: Vec<Claim>,
}

type Pass = fn(&Spans<'_, '_>) -> Vec<Claim>;

const PASSES: [Pass; 11] = [
    code_span::scan,
    html_tag::scan,
    escape::scan,
    link::scan_image_references,
    link::scan_inline_images,
    link::scan_references,
    link::scan_inline_links,
    link::scan_shortcuts,
    autolink::scan,
    emphasis::scan_strong,
    emphasis::scan_emphasis,
];

impl<'s, 'g> Spans<'s, 'g> {
    pub fn new(grammar: &'s Grammar<'g>, region: &'s Region) -> Self {
        Self {
            grammar,
            region,
            claims: Vec::new(),
        }
    }

    pub fn text(&self) -> &'s str {
        self.region.text()
    }

    pub fn span(&self, range: Range<usize>) -> Span {
        self.region.span(range)
    }

    /// Blinds for passes that may look inside containers: atomic claims are
    /// blinded whole, containers only on their delimiters.
    pub fn atomic_blinds(&self) -> Blinds {
        let mut blinds = Blinds::default();
        for c in &self.claims {
            match &c.inner {
                Some(inner) => {
                    blinds.insert(c.outer.start..inner.start);
                    blinds.insert(inner.end..c.outer.end);
                }
                None => blinds.insert(c.outer.clone()),
            }
        }
        blinds
    }

    /// Every claim blinded whole.
    pub fn all_blinds(&self) -> Blinds {
        let mut blinds = Blinds::default();
        for c in &self.claims {
            blinds.insert(c.outer.clone());
        }
        blinds
    }

    /// The whole text plus the inner range of every container accepted by
    /// `opens`, each with the claims inside it blinded.
    pub fn scopes(&self, opens: impl Fn(&Pending) -> bool) -> Vec<(Range<usize>, Blinds)> {
        let whole = std::iter::once(0..self.text().len());
        let inner = self
            .claims
            .iter()
            .filter(|c| opens(&c.node))
            .filter_map(|c| c.inner.clone());
        whole
            .chain(inner)
            .map(|scope| {
                let mut blinds = Blinds::default();
                for c in &self.claims {
                    if scope.start <= c.outer.start && c.outer.end <= scope.end {
                        blinds.insert(c.outer.clone());
                    }
                }
                (scope, blinds)
            })
            .collect()
    }

    fn into_tree(mut self) -> Vec<Inline> {
        let text = self.text();
        self.claims
            .sort_by(|a, b| a.outer.start.cmp(&b.outer.start).then(b.outer.end.cmp(&a.outer.end)));
        let mut claims = std::mem::take(&mut self.claims).into_iter().peekable();
        build(text, 0..text.len(), &mut claims)
    }
}

fn build(
    text: &str,
    range: Range<usize>,
    claims: &mut Peekable<vec::IntoIter<Claim>>,
) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut pos = range.start;
    while let Some(claim) = claims.next_if(|c| c.outer.start < range.end) {
        // Inside the delimiters of a container or an atomic claim.
        if claim.outer.start < pos {
            continue;
        }
        if claim.outer.start > pos {
            out.push(Inline::Text(text[pos..claim.outer.start].to_string()));
        }
        let children = match &claim.inner {
            Some(inner) => build(text, inner.clone(), claims),
            None => Vec::new(),
        };
        pos = claim.outer.end;
        out.push(claim.node.finish(children));
    }
    if pos < range.end {
        out.push(Inline::Text(text[pos..range.end].to_string()));
    }
    out
}

impl Grammar<'_> {
    /// Span-parse the text of one leaf block.
    pub fn inlines(&self, region: &Region) -> Vec<Inline> {
        let mut spans = Spans::new(self, region);
        for pass in PASSES {
            let found = pass(&spans);
            spans.claims.extend(found);
        }
        spans.into_tree()
    }
}

/// Whether the char ending at `pos` is whitespace. Blinded bytes are content.
pub fn space_before(text: &str, blinds: &Blinds, pos: usize) -> bool {
    if pos == 0 || blinds.is_blinded(pos - 1) {
        return false;
    }
    text[..pos].chars().next_back().is_some_and(char::is_whitespace)
}

/// Whether the char at `pos` is whitespace. Blinded bytes are content.
pub fn space_at(text: &str, blinds: &Blinds, pos: usize) -> bool {
    if blinds.is_blinded(pos) {
        return false;
    }
    text[pos..].chars().next().is_some_and(char::is_whitespace)
}

/// End of the unit at `pos`: a whole blinded range or one char.
pub fn unit_end(text: &str, blinds: &Blinds, pos: usize) -> usize {
    match blinds.covering(pos) {
        Some(r) => r.end,
        None => pos + text[pos..].chars().next().map_or(1, char::len_utf8),
    }
}

/// First unblinded occurrence of `byte` at or after `from`.
pub fn find_unblinded(text: &str, blinds: &Blinds, from: usize, byte: u8) -> Option<usize> {
    let b = text.as_bytes();
    let mut i = from;
    while i < b.len() {
        if let Some(r) = blinds.covering(i) {
            i = r.end;
            continue;
        }
        if b[i] == byte {
            return Some(i);
        }
        i += 1;
    }
    None
}
