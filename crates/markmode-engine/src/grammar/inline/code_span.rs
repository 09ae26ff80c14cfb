use super::{Claim, Spans};
use crate::grammar::tree::Inline;

/// Code span syntax with owned delimiter constant.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';

    /// Start of the `k`-backtick closer for a span opened at `open`, if any.
    ///
    /// The closer must not touch other backticks and the content must be
    /// non-empty.
    fn closer(b: &[u8], open: usize, k: usize) -> Option<usize> {
        let mut c = open + k + 1;
        while c + k <= b.len() {
            let run = b[c..c + k].iter().all(|&x| x == Self::TICK);
            if run && b[c - 1] != Self::TICK && b.get(c + k) != Some(&Self::TICK) {
                return Some(c);
            }
            c += 1;
        }
        None
    }
}

/// Code spans: a run of N backticks up to the next run of exactly N. A
/// backslash before the opener disables it.
pub fn scan(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let b = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < b.len() {
        if b[i] != CodeSpan::TICK || (i > 0 && b[i - 1] == b'\\') {
            i += 1;
            continue;
        }
        let run = b[i..].iter().take_while(|&&x| x == CodeSpan::TICK).count();
        let found = (1..=run)
            .rev()
            .find_map(|k| CodeSpan::closer(b, i, k).map(|c| (k, c)));
        let Some((k, close)) = found else {
            i += 1;
            continue;
        };
        let content = i + k..close;
        out.push(Claim::leaf(
            i..close + k,
            Inline::Code {
                span: spans.span(content.clone()),
                code: text[content].trim_matches([' ', '\t']).to_string(),
            },
        ));
        i = close + k;
    }
    out
}
