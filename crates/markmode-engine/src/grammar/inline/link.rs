//! Images and links.
//!
//! ```text
//! ![alt][id]    ![alt](url "title")
//! [text][id]    [text](url "title")    [text]
//! ```
//!
//! Link text may nest brackets and inline URLs may nest parentheses, both up
//! to [`NEST_DEPTH`] levels. Titles are quoted with `"` or `'`. Link text is
//! a scope for later passes; alt text is plain.
//!
//! Reference forms consult [`Links`](crate::grammar::Links): in table mode a
//! reference that does not resolve is not claimed, and scanning resumes after
//! it so the same pass does not re-read its pieces.

use std::ops::Range;

use super::escape::unbackslash;
use super::{Claim, Pending, Spans, find_unblinded};
use crate::grammar::blinds::Blinds;
use crate::grammar::cursor::balanced;
use crate::grammar::tree::{Image, Inline, Target};
use crate::grammar::{Lookup, NEST_DEPTH};

/// `(url "title")` after link text or alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineTail {
    url: Range<usize>,
    title: Option<Range<usize>>,
    end: usize,
}

/// `[id]` after link text or alt text, with an optional space or line break
/// in between.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReferenceTail {
    id: Range<usize>,
    end: usize,
}

/// What a matched candidate turned into.
enum Scanned {
    Claimed(Claim),
    /// Syntactically complete but rejected; skip to `end`.
    Rejected { end: usize },
}

fn inline_tail(text: &str, blinds: &Blinds, open: usize) -> Option<InlineTail> {
    let b = text.as_bytes();
    if b.get(open) != Some(&b'(') || blinds.is_blinded(open) {
        return None;
    }
    let skip_blanks = |mut p: usize| {
        while matches!(b.get(p), Some(b' ' | b'\t')) {
            p += 1;
        }
        p
    };
    let url_start = skip_blanks(open + 1);
    let url_end = balanced(text, blinds, url_start, b'(', b')', NEST_DEPTH, true)?;
    let mut p = skip_blanks(url_end);
    let mut title = None;
    if let Some(&quote) = b.get(p).filter(|&&q| q == b'"' || q == b'\'') {
        let start = p + 1;
        let close = (start..b.len()).find(|&e| b[e] == quote && b.get(skip_blanks(e + 1)) == Some(&b')'))?;
        title = Some(start..close);
        p = skip_blanks(close + 1);
    }
    if b.get(p) != Some(&b')') || blinds.is_blinded(p) {
        return None;
    }
    Some(InlineTail {
        url: url_start..url_end,
        title,
        end: p + 1,
    })
}

fn reference_tail(text: &str, blinds: &Blinds, close: usize) -> Option<ReferenceTail> {
    let b = text.as_bytes();
    let mut p = close + 1;
    if b.get(p) == Some(&b' ') {
        p += 1;
    }
    let newline = match b.get(p) {
        Some(b'\n') => 1,
        Some(b'\r') if b.get(p + 1) == Some(&b'\n') => 2,
        _ => 0,
    };
    if newline > 0 {
        p += newline;
        while b.get(p) == Some(&b' ') {
            p += 1;
        }
    }
    if b.get(p) != Some(&b'[') || blinds.is_blinded(p) {
        return None;
    }
    let id_close = find_unblinded(text, blinds, p + 1, b']')?;
    if text[p + 1..id_close].contains('\n') {
        return None;
    }
    Some(ReferenceTail {
        id: p + 1..id_close,
        end: id_close + 1,
    })
}

/// URL with surrounding angle brackets removed.
fn strip_angles(url: &str) -> &str {
    url.strip_prefix('<')
        .and_then(|u| u.strip_suffix('>'))
        .unwrap_or(url)
}

fn inline_target(spans: &Spans<'_, '_>, tail: &InlineTail) -> Target {
    let text = spans.text();
    Target::Inline {
        url: strip_angles(&text[tail.url.clone()]).to_string(),
        url_span: spans.span(tail.url.clone()),
        title: tail.title.clone().map(|t| text[t].to_string()),
        title_span: tail.title.clone().map(|t| spans.span(t)),
    }
}

/// Resolve a reference, falling back to `fallback` (the link or alt text)
/// when the id is empty. `None` rejects the match.
fn reference_target(
    spans: &Spans<'_, '_>,
    id: Range<usize>,
    fallback: Range<usize>,
) -> Option<Target> {
    let text = spans.text();
    let key = if id.is_empty() {
        &text[fallback]
    } else {
        &text[id.clone()]
    };
    let destination = match spans.grammar.links.lookup(&unbackslash(key)) {
        Lookup::Found(dest) => Some(dest),
        Lookup::Unchecked => None,
        Lookup::Missing => return None,
    };
    Some(Target::Reference {
        label_span: (!id.is_empty()).then(|| spans.span(id)),
        destination,
    })
}

/// Run `try_at` at every unblinded `[` (or `![`), collecting claims.
fn scan_with(
    spans: &Spans<'_, '_>,
    blinds: &Blinds,
    image: bool,
    try_at: impl Fn(usize) -> Option<Scanned>,
) -> Vec<Claim> {
    let text = spans.text();
    let b = text.as_bytes();
    let opener: &[u8] = if image { b"![" } else { b"[" };
    let mut out = Vec::new();
    let mut i = 0;
    while i < b.len() {
        if let Some(r) = blinds.covering(i) {
            i = r.end;
            continue;
        }
        let at_opener = b[i..].starts_with(opener) && !blinds.overlaps(&(i..i + opener.len()));
        match at_opener.then(|| try_at(i)).flatten() {
            Some(Scanned::Claimed(claim)) => {
                i = claim.outer.end;
                out.push(claim);
            }
            Some(Scanned::Rejected { end }) => i = end,
            None => i += 1,
        }
    }
    out
}

fn image_claim(spans: &Spans<'_, '_>, outer: Range<usize>, alt: Range<usize>, target: Target) -> Claim {
    let text = spans.text();
    Claim::leaf(
        outer.clone(),
        Inline::Image(Image {
            span: spans.span(outer),
            alt: unbackslash(&text[alt.clone()]),
            alt_span: spans.span(alt),
            target,
        }),
    )
}

fn link_claim(spans: &Spans<'_, '_>, outer: Range<usize>, inner: Range<usize>, target: Target) -> Claim {
    Claim::container(
        outer.clone(),
        inner.clone(),
        Pending::Link {
            span: spans.span(outer),
            text_span: spans.span(inner),
            target,
        },
    )
}

/// `![alt][id]`: the alt text runs to the first `]` that is followed by a
/// reference.
pub fn scan_image_references(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.all_blinds();
    scan_with(spans, &blinds, true, |i| {
        let mut close = i + 2;
        loop {
            close = find_unblinded(text, &blinds, close, b']')?;
            if let Some(tail) = reference_tail(text, &blinds, close) {
                let alt = i + 2..close;
                return Some(match reference_target(spans, tail.id.clone(), alt.clone()) {
                    Some(target) => Scanned::Claimed(image_claim(spans, i..tail.end, alt, target)),
                    None => Scanned::Rejected { end: tail.end },
                });
            }
            close += 1;
        }
    })
}

/// `![alt](url "title")`: the alt text runs to the first `]` that is followed
/// by a valid inline target.
pub fn scan_inline_images(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let b = text.as_bytes();
    let blinds = spans.all_blinds();
    scan_with(spans, &blinds, true, |i| {
        let mut close = i + 2;
        loop {
            close = find_unblinded(text, &blinds, close, b']')?;
            let open = match b.get(close + 1) {
                Some(c) if c.is_ascii_whitespace() && b.get(close + 2) == Some(&b'(') => close + 2,
                _ => close + 1,
            };
            if let Some(tail) = inline_tail(text, &blinds, open) {
                let target = inline_target(spans, &tail);
                return Some(Scanned::Claimed(image_claim(
                    spans,
                    i..tail.end,
                    i + 2..close,
                    target,
                )));
            }
            close += 1;
        }
    })
}

/// `[text][id]` and `[text][]`.
pub fn scan_references(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.all_blinds();
    scan_with(spans, &blinds, false, |i| {
        let close = balanced(text, &blinds, i + 1, b'[', b']', NEST_DEPTH, false)?;
        let tail = reference_tail(text, &blinds, close)?;
        let inner = i + 1..close;
        Some(match reference_target(spans, tail.id.clone(), inner.clone()) {
            Some(target) => Scanned::Claimed(link_claim(spans, i..tail.end, inner, target)),
            None => Scanned::Rejected { end: tail.end },
        })
    })
}

/// `[text](url "title")`.
pub fn scan_inline_links(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.all_blinds();
    scan_with(spans, &blinds, false, |i| {
        let close = balanced(text, &blinds, i + 1, b'[', b']', NEST_DEPTH, false)?;
        let tail = inline_tail(text, &blinds, close + 1)?;
        let target = inline_target(spans, &tail);
        Some(Scanned::Claimed(link_claim(spans, i..tail.end, i + 1..close, target)))
    })
}

/// `[text]` used as its own reference id.
pub fn scan_shortcuts(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.all_blinds();
    let b = text.as_bytes();
    scan_with(spans, &blinds, false, |i| {
        let mut close = i + 1;
        while close < b.len() {
            if let Some(r) = blinds.covering(close) {
                close = r.end;
                continue;
            }
            if b[close] == b'[' || b[close] == b']' {
                break;
            }
            close += 1;
        }
        if b.get(close) != Some(&b']') || close == i + 1 {
            return None;
        }
        let inner = i + 1..close;
        Some(match reference_target(spans, inner.clone(), inner.clone()) {
            Some(target) => Scanned::Claimed(link_claim(spans, i..close + 1, inner, target)),
            None => Scanned::Rejected { end: close + 1 },
        })
    })
}
