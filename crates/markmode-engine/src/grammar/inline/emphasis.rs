//! Bold (`**`/`__`) and italics (`*`/`_`).
//!
//! Both run once per scope: the whole text and the content of every link
//! (and, for italics, every bold run). Claims inside a scope are opaque and
//! count as non-space content.
//!
//! In strict mode a delimiter run must sit between non-word characters, so
//! `snake_case_words` stay literal, and italic content may not contain `*` or
//! `_` at all.

use std::ops::Range;

use super::{Claim, Pending, Spans, space_at, space_before, unit_end};
use crate::grammar::blinds::Blinds;
use crate::token::Span;

/// One scope being scanned.
struct Scope<'a> {
    text: &'a str,
    blinds: &'a Blinds,
    range: Range<usize>,
    strict: bool,
}

fn is_delimiter(b: u8) -> bool {
    b == b'*' || b == b'_'
}

impl Scope<'_> {
    fn byte(&self, pos: usize) -> Option<u8> {
        (pos < self.range.end && !self.blinds.is_blinded(pos)).then(|| self.text.as_bytes()[pos])
    }

    /// Start of scope, or a non-word character before `pos`.
    fn boundary_before(&self, pos: usize) -> bool {
        if pos == self.range.start || self.blinds.is_blinded(pos - 1) {
            return true;
        }
        self.text[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    }

    /// End of scope, or a non-word character at `pos`.
    fn boundary_at(&self, pos: usize) -> bool {
        if pos >= self.range.end || self.blinds.is_blinded(pos) {
            return true;
        }
        self.text[pos..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric())
    }

    /// Start of the closing `dd` for bold opened at `i`.
    ///
    /// The content is the shortest run of text followed by the longest run of
    /// `*`/`_` that still leaves a closer.
    fn strong_close(&self, i: usize) -> Option<usize> {
        let d = self.byte(i).filter(|&b| is_delimiter(b))?;
        if self.byte(i + 1) != Some(d) {
            return None;
        }
        if self.strict && !self.boundary_before(i) {
            return None;
        }
        let first = i + 2;
        if first >= self.range.end || space_at(self.text, self.blinds, first) {
            return None;
        }
        let end = self.range.end;
        let mut x_end = unit_end(self.text, self.blinds, first);
        while x_end + 2 <= end {
            let run = (x_end..end)
                .take_while(|&p| self.byte(p).is_some_and(is_delimiter))
                .count();
            for y in (0..=run).rev() {
                let j = x_end + y;
                let closes = j + 2 <= end
                    && self.byte(j) == Some(d)
                    && self.byte(j + 1) == Some(d)
                    && !space_before(self.text, self.blinds, j)
                    && (!self.strict || self.boundary_at(j + 2));
                if closes {
                    return Some(j);
                }
            }
            x_end = unit_end(self.text, self.blinds, x_end);
        }
        None
    }

    /// Position of the closing `d` for italics opened at `i`.
    fn emphasis_close(&self, i: usize) -> Option<usize> {
        let d = self.byte(i).filter(|&b| is_delimiter(b))?;
        if self.strict && !self.boundary_before(i) {
            return None;
        }
        let first = i + 1;
        if first >= self.range.end || space_at(self.text, self.blinds, first) {
            return None;
        }
        if self.strict && self.byte(first).is_some_and(is_delimiter) {
            return None;
        }
        let mut j = unit_end(self.text, self.blinds, first);
        while j < self.range.end {
            let b = self.byte(j);
            let closes = b == Some(d)
                && !space_before(self.text, self.blinds, j)
                && (!self.strict || self.boundary_at(j + 1));
            if closes {
                return Some(j);
            }
            if self.strict && b.is_some_and(is_delimiter) {
                return None;
            }
            j = unit_end(self.text, self.blinds, j);
        }
        None
    }
}

fn scan_scopes(
    spans: &Spans<'_, '_>,
    opens: impl Fn(&Pending) -> bool,
    width: usize,
    close_at: impl Fn(&Scope<'_>, usize) -> Option<usize>,
    node: impl Fn(Span) -> Pending,
) -> Vec<Claim> {
    let text = spans.text();
    let strict = spans.grammar.options.strict_bold_italic;
    let mut out = Vec::new();
    for (range, blinds) in spans.scopes(opens) {
        let scope = Scope {
            text,
            blinds: &blinds,
            range: range.clone(),
            strict,
        };
        let mut i = range.start;
        while i < range.end {
            if let Some(r) = blinds.covering(i) {
                i = r.end;
                continue;
            }
            match close_at(&scope, i) {
                Some(close) => {
                    let inner = i + width..close;
                    out.push(Claim::container(
                        i..close + width,
                        inner.clone(),
                        node(spans.span(inner)),
                    ));
                    i = close + width;
                }
                None => i += 1,
            }
        }
    }
    out
}

pub fn scan_strong(spans: &Spans<'_, '_>) -> Vec<Claim> {
    scan_scopes(
        spans,
        |p| matches!(p, Pending::Link { .. }),
        2,
        |scope: &Scope<'_>, i| scope.strong_close(i),
        Pending::Strong,
    )
}

pub fn scan_emphasis(spans: &Spans<'_, '_>) -> Vec<Claim> {
    scan_scopes(
        spans,
        |p| matches!(p, Pending::Link { .. } | Pending::Strong(_)),
        1,
        |scope: &Scope<'_>, i| scope.emphasis_close(i),
        Pending::Emphasis,
    )
}
