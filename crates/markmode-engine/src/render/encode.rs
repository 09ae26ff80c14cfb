//! Character-level encoders used while writing HTML.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

use crate::escape::EscapeTable;

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^&(?:#[0-9]+|#[xX][a-fA-F0-9]|[a-zA-Z][a-zA-Z0-9]*;)")
            .expect("Invalid entity regex")
    })
}

fn url_colon_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":(\d{2,})?").expect("Invalid url colon regex"))
}

fn hard_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}\n").expect("Invalid hard break regex"))
}

/// Encode `&` that does not start an entity and `<` that does not start a
/// tag, leaving already-valid HTML alone.
pub fn amps_and_angles(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with('&') {
            if entity_regex().is_match(tail) {
                out.push('&');
            } else {
                out.push_str("&amp;");
            }
        } else {
            let starts_tag = tail[1..]
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'?' | b'$' | b'!'));
            out.push_str(if starts_tag { "<" } else { "&lt;" });
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

/// Turn two or more spaces before a newline into `<br>`, or every newline
/// when `every_newline` is set.
pub fn hard_breaks(text: &str, suffix: &str, every_newline: bool) -> String {
    let br = format!("<br{suffix}\n");
    if every_newline {
        text.replace('\n', &br)
    } else {
        hard_break_regex().replace_all(text, br.as_str()).into_owned()
    }
}

/// Code content: HTML-escaped, with magic characters hidden from the span
/// grammar.
pub fn code(text: &str, escapes: &EscapeTable) -> String {
    escapes.escape(&html_escape::encode_text(text))
}

/// Keep `*` and `_` inside URLs and titles from reading as emphasis.
pub fn bold_italic(text: &str, escapes: &EscapeTable) -> String {
    escapes.escape_only(text, "*_")
}

/// Percent-encode characters that confuse URL parsers, plus every colon past
/// the scheme that is not followed by a port number.
pub fn problem_url_chars(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '*' => out.push_str("%2A"),
            '_' => out.push_str("%5F"),
            '\'' => out.push_str("%27"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '[' => out.push_str("%5B"),
            ']' => out.push_str("%5D"),
            _ => out.push(c),
        }
    }
    let Some(body) = out.get(7..).filter(|b| b.contains(':')) else {
        return out;
    };
    let body = url_colon_regex().replace_all(body, |caps: &regex::Captures<'_>| match caps.get(1) {
        Some(port) => format!(":{}", port.as_str()),
        None => "%3A".to_string(),
    });
    format!("{}{}", &out[..7], body)
}

/// Title attribute text.
pub fn title(text: &str, escapes: &EscapeTable) -> String {
    bold_italic(&text.replace('"', "&quot;"), escapes)
}

/// Entity-encode an e-mail address, alternating hexadecimal and decimal
/// references. `:` stays literal so the `mailto:` prefix can be found; `@`
/// is always encoded.
pub fn email(addr: &str) -> String {
    let mut out = String::with_capacity(addr.len() * 6);
    for (i, c) in addr.chars().enumerate() {
        if c == ':' {
            out.push(c);
        } else if i % 2 == 0 {
            let _ = write!(out, "&#x{:x};", c as u32);
        } else {
            let _ = write!(out, "&#{};", c as u32);
        }
    }
    out
}
