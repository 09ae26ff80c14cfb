//! Classification names for highlighting layers.

use crate::token::TokenType;

/// Root of every classification name.
pub const MARKDOWN: &str = "markdown";

/// Dotted classification name for a token kind, e.g. `markdown.header.h1`.
pub fn classification_name(kind: TokenType) -> &'static str {
    match kind {
        TokenType::Italics => "markdown.italics",
        TokenType::Bold => "markdown.bold",
        TokenType::H1 => "markdown.header.h1",
        TokenType::H2 => "markdown.header.h2",
        TokenType::H3 => "markdown.header.h3",
        TokenType::H4 => "markdown.header.h4",
        TokenType::H5 => "markdown.header.h5",
        TokenType::H6 => "markdown.header.h6",
        TokenType::UnorderedListElement => "markdown.list.unordered",
        TokenType::OrderedListElement => "markdown.list.ordered",
        TokenType::CodeBlock => "markdown.block",
        TokenType::Blockquote => "markdown.blockquote",
        TokenType::LinkExpression => "markdown.link",
        TokenType::LinkText => "markdown.link.text",
        TokenType::LinkTitle => "markdown.link.title",
        TokenType::LinkLabel => "markdown.link.label",
        TokenType::InlineUrl => "markdown.url.inline",
        TokenType::UrlDefinition => "markdown.url.definition",
        TokenType::AutomaticUrl => "markdown.url.automatic",
        TokenType::ImageExpression => "markdown.image",
        TokenType::ImageAltText => "markdown.image.alt",
        TokenType::ImageTitle => "markdown.image.title",
        TokenType::ImageLabel => "markdown.image.label",
        TokenType::HorizontalRule => "markdown.horizontalrule",
    }
}

/// Parent of a classification name (`markdown.header.h1` to
/// `markdown.header`), or `None` for the root.
pub fn parent(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenType::H1, "markdown.header.h1")]
    #[case(TokenType::UnorderedListElement, "markdown.list.unordered")]
    #[case(TokenType::InlineUrl, "markdown.url.inline")]
    #[case(TokenType::CodeBlock, "markdown.block")]
    fn names(#[case] kind: TokenType, #[case] name: &str) {
        assert_eq!(classification_name(kind), name);
    }

    #[test]
    fn every_name_descends_from_the_root() {
        let name = classification_name(TokenType::ImageTitle);
        assert_eq!(parent(name), Some("markdown.image"));
        assert_eq!(parent("markdown.image"), Some(MARKDOWN));
        assert_eq!(parent(MARKDOWN), None);
    }
}
