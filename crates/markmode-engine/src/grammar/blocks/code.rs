use std::ops::Range;

use super::{Claim, Scan};
use crate::grammar::region::Lines;
use crate::grammar::tree::Block;

/// Indented code block syntax.
pub struct CodeBlock;

impl CodeBlock {
    /// Spaces that make a line code.
    pub const INDENT: &'static str = "    ";

    pub fn is_indented(line: &str) -> bool {
        line.starts_with(Self::INDENT) || line.starts_with('\t')
    }

    /// Bytes of one indentation level at the start of `line`: a tab or up to
    /// four spaces.
    pub fn outdent_len(line: &str) -> usize {
        if line.starts_with('\t') {
            1
        } else {
            line.bytes().take(4).take_while(|&b| b == b' ').count()
        }
    }
}

pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut out = Vec::new();
    let mut i = seg.start;
    while i < seg.end {
        let starts_block = i == seg.start || lines.is_blank(i - 1);
        if !starts_block || lines.is_blank(i) || !CodeBlock::is_indented(lines.text(i)) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < seg.end && (lines.is_blank(j) || CodeBlock::is_indented(lines.text(j))) {
            j += 1;
        }
        let block = lines.trim_trailing_blank(i..j);
        out.push(Claim {
            lines: block.clone(),
            block: Block::CodeBlock {
                span: scan.region.span(lines.content_range(block.clone())),
                code: outdented(lines, block.clone()),
            },
        });
        i = block.end;
    }
    out
}

fn outdented(lines: &Lines<'_>, block: Range<usize>) -> String {
    block
        .map(|i| {
            let text = lines.text(i);
            &text[CodeBlock::outdent_len(text)..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}
