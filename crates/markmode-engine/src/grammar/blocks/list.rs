//! Ordered and unordered lists.
//!
//! A list starts with a marker line (`*`, `+`, `-` or `12.` followed by
//! whitespace) and runs until the region ends or until blank lines are
//! followed by an unindented line that is not another marker line. Outside
//! of list items the list must start the region or follow a blank line;
//! nested lists may start on any line.
//!
//! Items split on lines whose indentation matches the first marker exactly
//! and carry a marker of the same style. An item touched by a blank line is
//! loose and gets a full block parse; a tight item is only re-scanned for
//! sub-lists, the rest staying inline.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::code::CodeBlock;
use super::{Claim, Scan};
use crate::grammar::tree::{Block, List, ListItem};

fn start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ ]{0,3}(?:[*+-]|\d+[.])[ \t]+").expect("Invalid list regex"))
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([ \t]*)([*+-]|\d+[.])[ \t]+").expect("Invalid list marker regex")
    })
}

/// A marker found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Marker<'a> {
    indent: &'a str,
    marker: Range<usize>,
    /// Start of the item text, after the marker's trailing whitespace.
    text: usize,
    ordered: bool,
}

fn marker(line: &str) -> Option<Marker<'_>> {
    let caps = marker_regex().captures(line)?;
    let indent = caps.get(1)?;
    let m = caps.get(2)?;
    Some(Marker {
        indent: indent.as_str(),
        marker: m.range(),
        text: caps.get(0)?.end(),
        ordered: m.as_str().ends_with('.'),
    })
}

pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    let nested = scan.depth.list_level > 0;
    let mut out = Vec::new();
    let mut i = seg.start;
    while i < seg.end {
        let may_start = nested || i == seg.start || lines.is_blank(i - 1);
        if may_start && start_regex().is_match(lines.text(i)) {
            let range = list_extent(scan, i, seg.end);
            if let Some(list) = parse_list(scan, range.clone()) {
                out.push(Claim {
                    lines: range.clone(),
                    block: Block::List(list),
                });
                i = range.end;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// Lines of the list starting at `start`, trailing blank lines excluded.
fn list_extent(scan: &Scan<'_, '_>, start: usize, end: usize) -> Range<usize> {
    let lines = scan.lines;
    let mut j = start + 1;
    while j < end {
        if !lines.is_blank(j) {
            j += 1;
            continue;
        }
        let mut k = j;
        while k < end && lines.is_blank(k) {
            k += 1;
        }
        if k >= end {
            break;
        }
        let next = lines.text(k);
        let unindented = next.chars().next().is_some_and(|c| !c.is_whitespace());
        if unindented && marker(next).is_none() {
            break;
        }
        j = k;
    }
    lines.trim_trailing_blank(start..j)
}

fn parse_list(scan: &Scan<'_, '_>, range: Range<usize>) -> Option<List> {
    let lines = scan.lines;
    let first = marker(lines.text(range.start))?;
    let ordered = first.ordered;

    let mut items = Vec::new();
    let mut s = range.start;
    while s < range.end {
        let Some(head) = marker(lines.text(s)).filter(|m| m.ordered == ordered) else {
            break;
        };
        let mut t = s + 1;
        while t < range.end {
            let same_item_style = !lines.is_blank(t)
                && marker(lines.text(t))
                    .is_some_and(|m| m.indent == head.indent && m.ordered == ordered);
            if same_item_style {
                break;
            }
            t += 1;
        }
        if let Some(item) = parse_item(scan, range.start, s..t, &head) {
            items.push(item);
        }
        s = t;
    }

    (!items.is_empty()).then_some(List { ordered, items })
}

fn parse_item(
    scan: &Scan<'_, '_>,
    list_start: usize,
    item: Range<usize>,
    head: &Marker<'_>,
) -> Option<ListItem> {
    let lines = scan.lines;
    let body = lines.trim_trailing_blank(item.clone());
    let first = lines.line(item.start);
    let first_has_text = !lines.text(item.start)[head.text..].trim().is_empty();
    if !first_has_text && body.len() <= 1 {
        return None;
    }

    let preceded_by_blank = item.start > list_start && lines.is_blank(item.start - 1);
    let loose = preceded_by_blank || (item.start..item.end).any(|l| lines.is_blank(l));

    let keep = std::iter::once(first.start + head.text..first.next).chain(
        (body.start + 1..body.end).map(|l| {
            let line = lines.line(l);
            line.start + CodeBlock::outdent_len(lines.text(l))..line.next
        }),
    );
    let content = scan.region.project(keep);
    let depth = scan.depth.list_item();
    let children = if loose {
        scan.grammar.blocks(&content, depth)
    } else {
        scan.grammar.tight_item(&content, depth)
    };

    Some(ListItem {
        marker: scan
            .region
            .span(first.start + head.marker.start..first.start + head.marker.end),
        loose,
        children,
    })
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

    fn list(text: &str) -> List {
        match parse(text).into_iter().next() {
            Some(Block::List(list)) => list,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn tight_unordered_list() {
        let l = list("* a\n* b\n");
        assert!(!l.ordered);
        assert_eq!(l.items.len(), 2);
        assert_eq!(l.items[0].marker, Span::new(0, 1));
        assert_eq!(l.items[1].marker, Span::new(4, 1));
        assert!(!l.items[0].loose);
        assert_eq!(
            l.items[0].children,
            vec![Block::Plain(vec![Inline::Text("a\n".to_string())])]
        );
    }

    #[test]
    fn ordered_markers_span_the_number() {
        let l = list("10. ten\n11. eleven\n");
        assert!(l.ordered);
        assert_eq!(l.items[0].marker, Span::new(0, 3));
        assert_eq!(l.items[1].marker, Span::new(8, 3));
    }

    #[test]
    fn blank_line_makes_items_loose() {
        let l = list("- a\n\n- b\n");
        assert!(l.items.iter().all(|i| i.loose));
        assert_eq!(
            l.items[1].children,
            vec![Block::Paragraph(vec![Inline::Text("b".to_string())])]
        );
    }

    #[test]
    fn nested_list_in_tight_item() {
        let text = "* a\n    * b\n";
        let l = list(text);
        assert_eq!(l.items.len(), 1);
        let children = &l.items[0].children;
        assert_eq!(children.len(), 2);
        let Block::List(inner) = &children[1] else {
            panic!("expected nested list, got {children:?}");
        };
        assert_eq!(inner.items[0].marker, Span::new(8, 1));
    }

    #[test]
    fn list_must_follow_a_blank_line() {
        let blocks = parse("para\n* not a list\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn unindented_text_after_blank_ends_list() {
        let blocks = parse("* a\n\nafter\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Block::Paragraph(_)));
    }

    #[test]
    fn indented_paragraph_after_blank_stays_in_item() {
        let l = list("* a\n\n    more\n");
        assert_eq!(l.items.len(), 1);
        assert_eq!(l.items[0].children.len(), 2);
    }

    #[test]
    fn switching_marker_style_does_not_split_items() {
        let l = list("1. a\n* b\n");
        assert_eq!(l.items.len(), 1);
    }

    #[test]
    fn empty_items_are_skipped() {
        assert!(matches!(parse("*  \n")[0], Block::Paragraph(_)));
    }
}
