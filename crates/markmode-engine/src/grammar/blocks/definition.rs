//! Reference definitions: `[id]: url "optional title"`.
//!
//! The url may sit on the line after the label and the title on the line
//! after the url. Titles are wrapped in `"…"` or `(…)`; the last closing
//! quote or paren on the line ends the title.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::{Claim, Scan};
use crate::grammar::tree::{Block, Definition};

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ ]{0,3}\[(.+)\]:[ \t]*").expect("Invalid definition regex"))
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^["(](.+)[")][ \t]*$"#).expect("Invalid title regex"))
}

pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let mut out = Vec::new();
    let mut i = seg.start;
    while i < seg.end {
        match definition_at(scan, i, seg.end) {
            Some((def, next)) => {
                out.push(Claim {
                    lines: i..next,
                    block: Block::Definition(def),
                });
                i = next;
            }
            None => i += 1,
        }
    }
    out
}

/// Offset of the first byte after leading spaces and tabs.
fn skip_blanks(s: &str) -> usize {
    s.len() - s.trim_start_matches([' ', '\t']).len()
}

/// A definition starting on line `i`, and the index of the line after it.
fn definition_at(scan: &Scan<'_, '_>, i: usize, end: usize) -> Option<(Definition, usize)> {
    let lines = scan.lines;
    let region = scan.region;
    let head = lines.text(i);
    let caps = label_regex().captures(head)?;
    let label = caps.get(1)?;
    let line_start = lines.line(i).start;

    // The url: rest of the label line, or the whole next line.
    let after_label = caps.get(0)?.end();
    let (url_line, url_at) = if head[after_label..].trim().is_empty() {
        let j = i + 1;
        if j >= end || lines.is_blank(j) {
            return None;
        }
        (j, skip_blanks(lines.text(j)))
    } else {
        (i, after_label)
    };
    let url_text = lines.text(url_line);
    let word_len = url_text[url_at..]
        .find(char::is_whitespace)
        .unwrap_or(url_text.len() - url_at);
    let mut url = url_at..url_at + word_len;
    if url.len() > 1 && url_text[url.clone()].starts_with('<') {
        url.start += 1;
    }
    if url.len() > 1 && url_text[url.clone()].ends_with('>') {
        url.end -= 1;
    }

    // The title: rest of the url line, or the whole next line.
    let rest = &url_text[url_at + word_len..];
    let rest_at = url_at + word_len + skip_blanks(rest);
    let mut next = url_line + 1;
    let title = if rest.trim().is_empty() {
        let j = url_line + 1;
        let candidate = (j < end && !lines.is_blank(j))
            .then(|| {
                let t = lines.text(j);
                let at = skip_blanks(t);
                title_regex()
                    .captures(&t[at..])
                    .and_then(|c| c.get(1))
                    .map(|m| (j, at + m.start()..at + m.end()))
            })
            .flatten();
        if candidate.is_some() {
            next = j + 1;
        }
        candidate
    } else {
        let m = title_regex().captures(&url_text[rest_at..])?.get(1)?;
        Some((url_line, rest_at + m.start()..rest_at + m.end()))
    };

    let url_base = lines.line(url_line).start;
    let def = Definition {
        id: label.as_str().to_string(),
        url: url_text[url.clone()].to_string(),
        title: title
            .as_ref()
            .map(|(l, r)| lines.text(*l)[r.clone()].to_string()),
        label_span: region.span(line_start + label.start()..line_start + label.end()),
        url_span: region.span(url_base + url.start..url_base + url.end),
        title_span: title.as_ref().map(|(l, r)| {
            let base = lines.line(*l).start;
            region.span(base + r.start..base + r.end)
        }),
    };
    Some((def, next))
}
