use super::{Claim, Spans};
use crate::escape::MAGIC_CHARS;
use crate::grammar::tree::Inline;

/// Backslash escapes of magic characters.
pub fn scan(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.atomic_blinds();
    let b = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i + 1 < b.len() {
        if let Some(r) = blinds.covering(i) {
            i = r.end;
            continue;
        }
        let escaped = b[i + 1] as char;
        if b[i] == b'\\' && MAGIC_CHARS.contains(escaped) && !blinds.is_blinded(i + 1) {
            out.push(Claim::leaf(i..i + 2, Inline::Escaped(escaped)));
            i += 2;
            continue;
        }
        i += 1;
    }
    out
}

/// `s` with backslash escapes resolved, for text that is used literally
/// (alt text, reference ids).
pub fn unbackslash(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek().filter(|n| MAGIC_CHARS.contains(**n)) {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}
