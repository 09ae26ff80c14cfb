use serde::{Deserialize, Serialize};

/// Rendering and grammar knobs, fixed when an engine is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Suffix closing empty elements such as `<hr />` or `<br />`. Use `">"`
    /// for HTML 4 style output.
    pub empty_element_suffix: String,
    /// Column width used when expanding tabs. Indentation patterns in the
    /// grammar are fixed at four columns regardless of this value.
    pub tab_width: usize,
    /// Turn `<someone@example.com>` into an obfuscated `mailto:` link.
    pub link_emails: bool,
    /// Require non-word characters around emphasis delimiters, so
    /// `snake_case_name` stays literal.
    pub strict_bold_italic: bool,
    /// Render every newline inside a paragraph as a hard break.
    pub auto_newlines: bool,
    /// Link bare `http://`, `https://` and `ftp://` URLs in running text.
    pub auto_hyperlink: bool,
    /// Percent-encode `* _ ' ( ) [ ]` and unsafe colons inside URLs.
    pub encode_problem_url_characters: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            empty_element_suffix: " />".to_string(),
            tab_width: 4,
            link_emails: true,
            strict_bold_italic: false,
            auto_newlines: false,
            auto_hyperlink: false,
            encode_problem_url_characters: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_markdown() {
        let o = Options::default();
        assert_eq!(o.empty_element_suffix, " />");
        assert_eq!(o.tab_width, 4);
        assert!(o.link_emails);
        assert!(!o.strict_bold_italic);
        assert!(!o.auto_newlines);
        assert!(!o.auto_hyperlink);
        assert!(!o.encode_problem_url_characters);
    }
}
