use std::ops::Range;

use super::{Claim, Scan};
use crate::grammar::tree::Block;

/// Blockquote syntax with owned prefix constant.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: u8 = b'>';

    /// Length of the `[ \t]*>[ \t]?` prefix of `line`, if it has one.
    pub fn prefix_len(line: &str) -> Option<usize> {
        let b = line.as_bytes();
        let mut i = 0;
        while i < b.len() && (b[i] == b' ' || b[i] == b'\t') {
            i += 1;
        }
        if b.get(i) != Some(&Self::PREFIX) {
            return None;
        }
        i += 1;
        if matches!(b.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        Some(i)
    }

    /// A `>` line with something after the marker.
    fn starts_quote(line: &str) -> bool {
        let trimmed = line.trim_start_matches([' ', '\t']);
        trimmed.len() > 1 && trimmed.as_bytes()[0] == Self::PREFIX
    }
}

/// Quotes run through lazy continuation lines and blank lines, as long as
/// another `>` line follows the blanks.
pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let mut out = Vec::new();
    let mut i = seg.start;
    while i < seg.end {
        if !BlockQuote::starts_quote(lines.text(i)) {
            i += 1;
            continue;
        }
        let mut j = i;
        loop {
            j += 1;
            while j < seg.end && !lines.is_blank(j) {
                j += 1;
            }
            let mut k = j;
            while k < seg.end && lines.is_blank(k) {
                k += 1;
            }
            if k < seg.end && BlockQuote::starts_quote(lines.text(k)) {
                j = k;
            } else {
                break;
            }
        }

        let keep = (i..j).map(|l| {
            let line = lines.line(l);
            let strip = if lines.is_blank(l) {
                line.end - line.start
            } else {
                BlockQuote::prefix_len(lines.text(l)).unwrap_or(0)
            };
            line.start + strip..line.next
        });
        let inner = scan.region.project(keep);
        out.push(Claim {
            lines: i..j,
            block: Block::BlockQuote {
                span: scan.region.span(lines.content_range(i..j)),
                children: scan.grammar.blocks(&inner, scan.depth.quote()),
            },
        });
        i = j;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::region::Region;
    use crate::grammar::tree::Inline;
    use crate::grammar::{Grammar, Links};
    use crate::options::Options;
    use crate::token::Span;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Block> {
        let options = Options::default();
        Grammar::new(&options, Links::Lenient).parse(&Region::contiguous(text, 0))
    }

    #[test]
    fn prefix_lengths() {
        assert_eq!(BlockQuote::prefix_len("> a"), Some(2));
        assert_eq!(BlockQuote::prefix_len("  >a"), Some(3));
        assert_eq!(BlockQuote::prefix_len(">> a"), Some(1));
        assert_eq!(BlockQuote::prefix_len("a > b"), None);
    }

    #[test]
    fn quote_with_lazy_line_and_second_paragraph() {
        let text = "> one\nlazy\n\n> two\n\nafter\n";
        let blocks = parse(text);
        assert_eq!(blocks.len(), 2);
        let Block::BlockQuote { span, children } = &blocks[0] else {
            panic!("expected quote, got {:?}", blocks[0]);
        };
        assert_eq!(*span, Span::new(0, 17));
        assert_eq!(
            children,
            &vec![
                Block::Paragraph(vec![Inline::Text("one\nlazy".to_string())]),
                Block::Paragraph(vec![Inline::Text("two".to_string())]),
            ]
        );
    }

    #[test]
    fn nested_quote_header_maps_to_source() {
        let text = "> > # Deep\n";
        let blocks = parse(text);
        let Block::BlockQuote { children, .. } = &blocks[0] else {
            panic!("expected quote");
        };
        let Block::BlockQuote { children, .. } = &children[0] else {
            panic!("expected nested quote");
        };
        let Block::Header { span, .. } = &children[0] else {
            panic!("expected header");
        };
        assert_eq!(span.slice(text), Some("# Deep"));
    }

    #[test]
    fn bare_marker_does_not_start_a_quote() {
        let blocks = parse(">\n");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }
}
