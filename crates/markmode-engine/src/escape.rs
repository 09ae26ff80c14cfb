//! # Placeholder substitution
//!
//! Two call-scoped tables that keep already-recognised text away from later
//! rewriting:
//!
//! - [`EscapeTable`] maps each markdown-magic character to a placeholder
//!   string. The HTML sink writes protected characters (inside code, URLs,
//!   titles and backslash escapes) as placeholders and [`EscapeTable::unescape`]
//!   puts them back as the very last step of rendering.
//! - [`HtmlBlockTable`] swaps whole raw HTML blocks for hash keys before the
//!   block grammar runs, and hands the HTML back verbatim during paragraph
//!   formation.
//!
//! Placeholders are derived from a hash of the protected content and re-salted
//! until none of them occurs in the input, so literal text can never be
//! mistaken for a placeholder.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Characters with a meaning somewhere in the Markdown grammar.
pub const MAGIC_CHARS: &str = "\\`*_{}[]()>#+-.!";

/// Delimits placeholders and block keys.
const DELIMITER: char = '\u{1A}';

fn hash_key(salt: u64, kind: char, content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    salt.hash(&mut hasher);
    content.hash(&mut hasher);
    format!("{DELIMITER}{kind}{:016x}{DELIMITER}", hasher.finish())
}

#[derive(Debug, Clone)]
pub struct EscapeTable {
    entries: Vec<(char, String)>,
}

impl EscapeTable {
    /// Build a table whose placeholders do not occur anywhere in `input`.
    pub fn for_input(input: &str) -> Self {
        let mut salt = 0u64;
        loop {
            let entries: Vec<(char, String)> = MAGIC_CHARS
                .chars()
                .map(|c| (c, hash_key(salt, 'E', c.encode_utf8(&mut [0; 4]))))
                .collect();
            if entries.iter().all(|(_, p)| !input.contains(p.as_str())) {
                return Self { entries };
            }
            salt += 1;
        }
    }

    pub fn placeholder(&self, c: char) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| *m == c)
            .map(|(_, p)| p.as_str())
    }

    /// Replace every magic character in `s` with its placeholder.
    pub fn escape(&self, s: &str) -> String {
        self.escape_only(s, MAGIC_CHARS)
    }

    /// Replace only the listed magic characters in `s`.
    pub fn escape_only(&self, s: &str, chars: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match self.placeholder(c) {
                Some(p) if chars.contains(c) => out.push_str(p),
                _ => out.push(c),
            }
        }
        out
    }

    /// Restore every placeholder to the character it stands for.
    pub fn unescape(&self, s: &str) -> String {
        if !s.contains(DELIMITER) {
            return s.to_string();
        }
        let mut out = s.to_string();
        for (c, p) in &self.entries {
            if out.contains(p.as_str()) {
                out = out.replace(p.as_str(), c.encode_utf8(&mut [0; 4]));
            }
        }
        out
    }
}

/// Raw HTML blocks stashed under hash keys for one render call.
#[derive(Debug, Default)]
pub struct HtmlBlockTable {
    blocks: HashMap<String, String>,
    /// Kept only when the input itself contains the key delimiter.
    guard: Option<String>,
}

impl HtmlBlockTable {
    /// Table whose keys cannot collide with `input`.
    pub fn for_input(input: &str) -> Self {
        Self {
            blocks: HashMap::new(),
            guard: input.contains(DELIMITER).then(|| input.to_string()),
        }
    }

    /// Store `html` and return the key standing in for it.
    pub fn stash(&mut self, html: &str) -> String {
        let mut salt = 0u64;
        let mut key = hash_key(salt, 'B', html);
        while self.blocks.get(&key).is_some_and(|existing| existing != html)
            || self.guard.as_deref().is_some_and(|g| g.contains(&key))
        {
            salt += 1;
            key = hash_key(salt, 'B', html);
        }
        self.blocks.insert(key.clone(), html.to_string());
        key
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.blocks.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_magic_char_has_a_distinct_placeholder() {
        let table = EscapeTable::for_input("");
        let mut seen = std::collections::HashSet::new();
        for c in MAGIC_CHARS.chars() {
            let p = table.placeholder(c).unwrap();
            assert!(seen.insert(p.to_string()), "duplicate placeholder for {c}");
        }
        assert_eq!(seen.len(), MAGIC_CHARS.chars().count());
    }

    #[test]
    fn escape_unescape_is_identity() {
        let table = EscapeTable::for_input("");
        let text = r"a \`*_{}[]()>#+-.! z";
        let escaped = table.escape(text);
        for c in MAGIC_CHARS.chars() {
            assert!(!escaped.contains(c), "{c} survived escaping");
        }
        assert_eq!(table.unescape(&escaped), text);
    }

    #[test]
    fn escape_only_leaves_other_magic_chars() {
        let table = EscapeTable::for_input("");
        let escaped = table.escape_only("*a_[b]", "*_");
        assert!(escaped.contains('['));
        assert!(!escaped.contains('*'));
        assert_eq!(table.unescape(&escaped), "*a_[b]");
    }

    #[test]
    fn placeholders_avoid_literal_input() {
        let probe = EscapeTable::for_input("");
        let star = probe.placeholder('*').unwrap().to_string();
        let input = format!("text containing {star} literally");

        let table = EscapeTable::for_input(&input);
        for c in MAGIC_CHARS.chars() {
            assert!(!input.contains(table.placeholder(c).unwrap()));
        }
        assert_eq!(table.unescape(&table.escape("*")), "*");
    }

    #[test]
    fn unescape_without_placeholders_is_a_copy() {
        let table = EscapeTable::for_input("");
        assert_eq!(table.unescape("<p>plain</p>"), "<p>plain</p>");
    }

    #[test]
    fn html_blocks_round_trip_through_keys() {
        let mut blocks = HtmlBlockTable::for_input("");
        let key = blocks.stash("<div>\nhello\n</div>");
        assert!(!key.contains('<'));
        assert_eq!(blocks.get(&key), Some("<div>\nhello\n</div>"));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get("missing"), None);
    }

    #[test]
    fn identical_blocks_share_a_key() {
        let mut blocks = HtmlBlockTable::for_input("");
        let a = blocks.stash("<hr>");
        let b = blocks.stash("<hr>");
        assert_eq!(a, b);
        assert_eq!(blocks.len(), 1);
    }
}
