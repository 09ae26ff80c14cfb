//! Raw HTML blocks.
//!
//! A block starts at the beginning of a line (up to three spaces of indent)
//! and must end at the end of a line. Recognized forms:
//!
//! - a block-level tag through its matching end tag, nesting the same name
//! - `<ins>`/`<del>` when the start tag is alone on its line
//! - `<hr>`, comments and `<? ?>`/`<% %>` instructions, when followed by a
//!   blank line or the end of the region

use std::ops::Range;

use super::{Claim, Scan};
use crate::grammar::region::Lines;
use crate::grammar::tree::Block;

/// Tags that always start a block.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "table",
    "dl",
    "ol",
    "ul",
    "address",
    "script",
    "noscript",
    "form",
    "fieldset",
    "iframe",
    "math",
];

/// Tags that are block-level only when the start tag is alone on its line.
const LINE_TAGS: &[&str] = &["ins", "del"];

pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let text = scan.text();
    block_lines(text, scan.lines, seg)
        .into_iter()
        .map(|lines| {
            let range = scan.lines.content_range(lines.clone());
            Claim {
                lines,
                block: Block::Html {
                    html: text[range].to_string(),
                },
            }
        })
        .collect()
}

/// Byte ranges of every raw HTML block in `text`, each covering whole lines
/// without the final terminator.
pub fn find_blocks(text: &str) -> Vec<Range<usize>> {
    let lines = Lines::new(text);
    if lines.is_empty() {
        return Vec::new();
    }
    block_lines(text, &lines, 0..lines.len())
        .into_iter()
        .map(|r| lines.content_range(r))
        .collect()
}

fn block_lines(text: &str, lines: &Lines<'_>, seg: Range<usize>) -> Vec<Range<usize>> {
    let limit = lines.full_range(seg.clone()).end;
    let mut out = Vec::new();
    let mut i = seg.start;
    while i < seg.end {
        match block_end(text, lines.line(i).start, limit) {
            Some(end) => {
                let last = lines.line_of(end).max(i);
                out.push(i..last + 1);
                i = last + 1;
            }
            None => i += 1,
        }
    }
    out
}

/// Content end of the last line of an HTML block starting on the line at
/// `start`. Nothing past `limit` is looked at.
fn block_end(text: &str, start: usize, limit: usize) -> Option<usize> {
    let text = &text[..limit];
    let bytes = text.as_bytes();
    let mut p = start;
    while p < start + 3 && bytes.get(p) == Some(&b' ') {
        p += 1;
    }
    let rest = text.get(p..)?;
    if !rest.starts_with('<') {
        return None;
    }

    if let Some(after) = rest.strip_prefix("<!--") {
        let close = p + 4 + after.find("-->")? + 3;
        return standalone_end(text, close);
    }
    if rest.starts_with("<?") || rest.starts_with("<%") {
        let closer = if rest.starts_with("<?") { "?>" } else { "%>" };
        let close = p + 2 + rest[2..].find(closer)? + 2;
        return standalone_end(text, close);
    }
    if let Some(after) = tag_named(text, p + 1, &["hr"]) {
        let mut q = skip_attrs(text, after);
        if bytes.get(q) == Some(&b'/') {
            q += 1;
        }
        if bytes.get(q) != Some(&b'>') {
            return None;
        }
        return standalone_end(text, q + 1);
    }
    if let Some(after) = tag_named(text, p + 1, LINE_TAGS) {
        let name = &text[p + 1..after];
        let q = skip_attrs(text, after);
        if bytes.get(q) != Some(&b'>') {
            return None;
        }
        // Nothing but spaces may follow the start tag on its line.
        let mut r = q + 1;
        while bytes.get(r) == Some(&b' ') {
            r += 1;
        }
        let body = match bytes.get(r) {
            Some(b'\n') => r + 1,
            Some(b'\r') if bytes.get(r + 1) == Some(&b'\n') => r + 2,
            _ => return None,
        };
        let close = content_end(text, body, name)?;
        return line_end_after_spaces(text, close);
    }
    if let Some(after) = tag_named(text, p + 1, BLOCK_TAGS) {
        let name = &text[p + 1..after];
        let q = skip_attrs(text, after);
        if bytes.get(q) != Some(&b'>') {
            return None;
        }
        let close = content_end(text, q + 1, name)?;
        return line_end_after_spaces(text, close);
    }
    None
}

/// If one of `names` starts at `pos` followed by a word boundary, the index
/// just after the name.
fn tag_named(text: &str, pos: usize, names: &[&str]) -> Option<usize> {
    let rest = text.get(pos..)?;
    names.iter().find_map(|name| {
        let prefix = rest.get(..name.len())?;
        if !prefix.eq_ignore_ascii_case(name) {
            return None;
        }
        let next = rest.as_bytes().get(name.len());
        match next {
            Some(b) if b.is_ascii_alphanumeric() || *b == b'_' => None,
            _ => Some(pos + name.len()),
        }
    })
}

/// Skip optional tag attributes starting at `pos`: whitespace, then text,
/// quoted strings and slashes not followed by `>`.
fn skip_attrs(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    if !bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        return pos;
    }
    let mut q = pos + 1;
    while let Some(&b) = bytes.get(q) {
        match b {
            b'>' => break,
            b'/' => {
                if bytes.get(q + 1) == Some(&b'>') {
                    break;
                }
                q += 1;
            }
            b'"' | b'\'' => match text[q + 1..].find(b as char) {
                Some(close) => q += close + 2,
                None => break,
            },
            _ => q += 1,
        }
    }
    q
}

/// Scan block content for the `</name>` closing the outermost tag, nesting
/// same-name tags. Returns the index just past the closing tag.
fn content_end(text: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'/') {
            if let Some(after) = tag_named(text, i + 2, &[name]) {
                let mut q = after;
                if depth == 0 {
                    if bytes.get(q) == Some(&b'>') {
                        return Some(q + 1);
                    }
                } else {
                    while bytes.get(q).is_some_and(u8::is_ascii_whitespace) {
                        q += 1;
                    }
                    if bytes.get(q) == Some(&b'>') {
                        depth -= 1;
                        i = q + 1;
                        continue;
                    }
                }
            }
            i += 1;
            continue;
        }
        if let Some(after) = tag_named(text, i + 1, &[name]) {
            let q = skip_attrs(text, after);
            if text[q..].starts_with("/>") {
                i = q + 2;
                continue;
            }
            if bytes.get(q) == Some(&b'>') {
                depth += 1;
                i = q + 1;
                continue;
            }
        }
        i += 1;
    }
    None
}

/// Content end of the current line if only spaces remain on it.
fn line_end_after_spaces(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut q = pos;
    while bytes.get(q) == Some(&b' ') {
        q += 1;
    }
    match bytes.get(q) {
        None | Some(b'\n') => Some(q),
        Some(b'\r') if matches!(bytes.get(q + 1), None | Some(b'\n')) => Some(q),
        _ => None,
    }
}

/// Like [`line_end_after_spaces`], but the following line must be blank or
/// missing.
fn standalone_end(text: &str, pos: usize) -> Option<usize> {
    let end = line_end_after_spaces(text, pos)?;
    let next = text[end..]
        .find('\n')
        .map_or(text.len(), |n| end + n + 1);
    let following = text[next..].split('\n').next().unwrap_or("");
    if next >= text.len() || following.trim().is_empty() {
        Some(end)
    } else {
        None
    }
}
