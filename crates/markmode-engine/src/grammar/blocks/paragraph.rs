use std::ops::Range;

use super::{Claim, Scan};
use crate::grammar::tree::Block;

/// Split unclaimed lines into paragraphs on blank lines.
pub fn paragraphs(scan: &Scan<'_, '_>, gap: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut out = Vec::new();
    let mut i = gap.start;
    while i < gap.end {
        if lines.is_blank(i) {
            i += 1;
            continue;
        }
        let start = i;
        while i < gap.end && !lines.is_blank(i) {
            i += 1;
        }
        let mut range = lines.content_range(start..i);
        range.start += lines.text(start).len() - lines.text(start).trim_start_matches(' ').len();
        let content = scan.grammar.inlines(&scan.region.slice(range));
        out.push(Claim {
            lines: start..i,
            block: Block::Paragraph(content),
        });
    }
    out
}

/// Unclaimed lines of a tight list item as one inline run, terminators kept.
pub fn plain(scan: &Scan<'_, '_>, gap: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut start = gap.start;
    while start < gap.end && lines.is_blank(start) {
        start += 1;
    }
    let trimmed = lines.trim_trailing_blank(start..gap.end);
    if trimmed.is_empty() {
        return Vec::new();
    }
    let content = scan
        .grammar
        .inlines(&scan.region.slice(lines.full_range(trimmed.clone())));
    vec![Claim {
        lines: trimmed,
        block: Block::Plain(content),
    }]
}
