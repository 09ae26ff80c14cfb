//! Setext and ATX headers.
//!
//! ```text
//! Header 1        # Header 1
//! ========        ## Header 2 ##
//!
//! Header 2
//! --------
//! ```
//!
//! Setext headers are recognized first, so a `---` underline belongs to the
//! header above it rather than becoming a horizontal rule.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::{Claim, Scan};
use crate::grammar::region::Lines;
use crate::grammar::tree::Block;

fn underline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(=+|-+)[ \t]*$").expect("Invalid setext regex"))
}

fn atx_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})[ \t]*(.+?)[ \t]*#*$").expect("Invalid atx regex"))
}

/// Level of the Setext header whose text is line `i`, if line `i + 1`
/// underlines it.
pub fn setext_level(lines: &Lines<'_>, i: usize) -> Option<u8> {
    if i + 1 >= lines.len() || lines.is_blank(i) {
        return None;
    }
    let caps = underline_regex().captures(lines.text(i + 1))?;
    match caps.get(1)?.as_str().as_bytes().first()? {
        b'=' => Some(1),
        _ => Some(2),
    }
}

pub fn scan_setext(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut out = Vec::new();
    let mut i = seg.start;
    while i + 1 < seg.end {
        let Some(level) = setext_level(lines, i) else {
            i += 1;
            continue;
        };
        let line = lines.line(i);
        let text = lines.text(i).trim_end_matches([' ', '\t']);
        let range = line.start..line.start + text.len();
        out.push(Claim {
            lines: i..i + 2,
            block: Block::Header {
                level,
                span: scan.region.span(range.clone()),
                content: scan.grammar.inlines(&scan.region.slice(range)),
            },
        });
        i += 2;
    }
    out
}

pub fn scan_atx(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut out = Vec::new();
    for i in seg {
        let Some(caps) = atx_regex().captures(lines.text(i)) else {
            continue;
        };
        let (Some(hashes), Some(content)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let line = lines.line(i);
        let content = line.start + content.start()..line.start + content.end();
        out.push(Claim {
            lines: i..i + 1,
            block: Block::Header {
                level: hashes.len() as u8,
                span: scan.region.span(line.start..line.end),
                content: scan.grammar.inlines(&scan.region.slice(content)),
            },
        });
    }
    out
}
