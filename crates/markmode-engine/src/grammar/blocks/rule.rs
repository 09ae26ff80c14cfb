use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::{Claim, Scan};
use crate::grammar::tree::Block;

/// Three or more `-`, `*` or `_`, up to two spaces apart.
fn rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ ]{0,3}(?:-(?:[ ]{0,2}-){2,}|\*(?:[ ]{0,2}\*){2,}|_(?:[ ]{0,2}_){2,})[ ]*$")
            .expect("Invalid horizontal rule regex")
    })
}

pub fn scan(scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
    let lines = scan.lines;
    seg.filter(|&i| rule_regex().is_match(lines.text(i)))
        .map(|i| {
            let line = lines.line(i);
            Claim {
                lines: i..i + 1,
                block: Block::Rule {
                    span: scan.region.span(line.start..line.end),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("* * *", true)]
    #[case("   ___", true)]
    #[case("-  -  -  ", true)]
    #[case("--", false)]
    #[case("-   -   -", false)]
    #[case("    ---", false)]
    #[case("*-*", false)]
    fn matches_rule_lines(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(rule_regex().is_match(line), expected);
    }
}
