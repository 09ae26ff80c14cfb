use super::{Claim, Spans, autolink};
use crate::grammar::NEST_DEPTH;
use crate::grammar::blinds::Blinds;
use crate::grammar::cursor::balanced;
use crate::grammar::tree::Inline;

/// Inline HTML tags, comments and processing instructions, passed through
/// verbatim. Autolink shapes such as `<http://x>` are left for the autolink
/// pass.
pub fn scan(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let blinds = spans.atomic_blinds();
    let b = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < b.len() {
        if let Some(r) = blinds.covering(i) {
            i = r.end;
            continue;
        }
        if b[i] == b'<' {
            if let Some(end) = tag_end(text, &blinds, i).filter(|&end| !blinds.overlaps(&(i..end))) {
                out.push(Claim::leaf(i..end, Inline::Html(text[i..end].to_string())));
                i = end;
                continue;
            }
        }
        i += 1;
    }
    out
}

fn tag_end(text: &str, blinds: &Blinds, i: usize) -> Option<usize> {
    let rest = &text[i..];
    if let Some(after) = rest.strip_prefix("<!--") {
        return after.find("-->").map(|n| i + 4 + n + 3);
    }
    if let Some(after) = rest.strip_prefix("<?") {
        return after.find("?>").map(|n| i + 2 + n + 2);
    }
    let first = *rest.as_bytes().get(1)?;
    if !(first.is_ascii_alphabetic() || matches!(first, b'/' | b'!' | b'$')) {
        return None;
    }
    if autolink::is_autolink(rest) {
        return None;
    }
    balanced(text, blinds, i + 1, b'<', b'>', NEST_DEPTH, false).map(|close| close + 1)
}
