//! # Token sink
//!
//! Flattens the syntax tree into [`Token`]s in document order (parents before
//! their children). Spans refer to the text handed in, shifted by the
//! caller's offset. Empty spans are never emitted.
//!
//! Reference links and images are accepted without a definition table, so a
//! `[text][id]` is reported even when `id` is defined in another paragraph or
//! not at all.

use log::debug;

use crate::grammar::blocks::header::setext_level;
use crate::grammar::region::{Lines, Region};
use crate::grammar::tree::{Block, Definition, Image, Inline, Link, Target};
use crate::grammar::{Grammar, Links};
use crate::options::Options;
use crate::token::{Span, Token, TokenType};

/// Produces tokens under a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    options: Options,
}

impl Tokenizer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Tokens for `text`, which starts at `offset` in the caller's buffer.
    pub fn parse_paragraph(&self, text: &str, offset: usize) -> Vec<Token> {
        let blocks = self.parse(text, offset);
        let mut sink = TokenSink::default();
        sink.blocks(&blocks);
        debug!(
            "Tokenized {} bytes at offset {offset}: {} tokens",
            text.len(),
            sink.tokens.len()
        );
        sink.tokens
    }

    /// Header tokens of the outermost level, in document order.
    pub fn parse_sections(&self, document: &str) -> Vec<Token> {
        self.parse(document, 0)
            .iter()
            .filter_map(|block| match block {
                Block::Header { level, span, .. } if !span.is_empty() => Some(Token {
                    kind: TokenType::heading(*level),
                    span: *span,
                }),
                _ => None,
            })
            .collect()
    }

    /// Whether `text` holds a construct that spans lines, so an edit on one
    /// line can change how a neighbouring line is read. Currently that is a
    /// Setext header.
    pub fn contains_multiline_construct(&self, text: &str) -> bool {
        let lines = Lines::new(text);
        (0..lines.len()).any(|i| setext_level(&lines, i).is_some())
    }

    fn parse(&self, text: &str, offset: usize) -> Vec<Block> {
        Grammar::new(&self.options, Links::Lenient).parse(&Region::contiguous(text, offset))
    }
}

/// [`Tokenizer::parse_paragraph`] with default options.
pub fn parse_paragraph(text: &str, offset: usize) -> Vec<Token> {
    Tokenizer::default().parse_paragraph(text, offset)
}

/// [`Tokenizer::parse_sections`] with default options.
pub fn parse_sections(document: &str) -> Vec<Token> {
    Tokenizer::default().parse_sections(document)
}

/// [`Tokenizer::contains_multiline_construct`] with default options.
pub fn contains_multiline_construct(text: &str) -> bool {
    Tokenizer::default().contains_multiline_construct(text)
}

#[derive(Default)]
struct TokenSink {
    tokens: Vec<Token>,
}

impl TokenSink {
    fn push(&mut self, kind: TokenType, span: Span) {
        if !span.is_empty() {
            self.tokens.push(Token { kind, span });
        }
    }

    fn push_opt(&mut self, kind: TokenType, span: Option<Span>) {
        if let Some(span) = span {
            self.push(kind, span);
        }
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Header {
                level,
                span,
                content,
            } => {
                self.push(TokenType::heading(*level), *span);
                self.inlines(content);
            }
            Block::Rule { span } => self.push(TokenType::HorizontalRule, *span),
            Block::List(list) => {
                let kind = if list.ordered {
                    TokenType::OrderedListElement
                } else {
                    TokenType::UnorderedListElement
                };
                for item in &list.items {
                    self.push(kind, item.marker);
                    self.blocks(&item.children);
                }
            }
            Block::CodeBlock { span, .. } => self.push(TokenType::CodeBlock, *span),
            Block::BlockQuote { span, children } => {
                self.push(TokenType::Blockquote, *span);
                self.blocks(children);
            }
            Block::Html { .. } => {}
            Block::Definition(def) => self.definition(def),
            Block::Paragraph(content) | Block::Plain(content) => self.inlines(content),
        }
    }

    fn definition(&mut self, def: &Definition) {
        self.push(TokenType::LinkLabel, def.label_span);
        self.push(TokenType::UrlDefinition, def.url_span);
        self.push_opt(TokenType::LinkTitle, def.title_span);
    }

    fn inlines(&mut self, nodes: &[Inline]) {
        for node in nodes {
            self.inline(node);
        }
    }

    fn inline(&mut self, node: &Inline) {
        match node {
            Inline::Text(_) | Inline::Escaped(_) | Inline::Html(_) => {}
            Inline::Code { span, .. } => self.push(TokenType::CodeBlock, *span),
            Inline::Image(image) => self.image(image),
            Inline::Link(link) => self.link(link),
            Inline::AutoLink { span, .. } => self.push(TokenType::AutomaticUrl, *span),
            Inline::Strong { span, children } => {
                self.push(TokenType::Bold, *span);
                self.inlines(children);
            }
            Inline::Emphasis { span, children } => {
                self.push(TokenType::Italics, *span);
                self.inlines(children);
            }
        }
    }

    fn image(&mut self, image: &Image) {
        self.push(TokenType::ImageExpression, image.span);
        self.push(TokenType::ImageAltText, image.alt_span);
        match &image.target {
            Target::Inline {
                url_span,
                title_span,
                ..
            } => {
                self.push(TokenType::InlineUrl, *url_span);
                self.push_opt(TokenType::ImageTitle, *title_span);
            }
            Target::Reference { label_span, .. } => {
                self.push_opt(TokenType::ImageLabel, *label_span);
            }
        }
    }

    fn link(&mut self, link: &Link) {
        self.push(TokenType::LinkExpression, link.span);
        self.push(TokenType::LinkText, link.text_span);
        match &link.target {
            Target::Inline {
                url_span,
                title_span,
                ..
            } => {
                self.push(TokenType::InlineUrl, *url_span);
                self.push_opt(TokenType::LinkTitle, *title_span);
            }
            Target::Reference { label_span, .. } => {
                self.push_opt(TokenType::LinkLabel, *label_span);
            }
        }
        self.inlines(&link.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn offset_shifts_every_span() {
        let tokens = parse_paragraph("# Title\n", 100);
        assert_eq!(
            tokens,
            vec![Token {
                kind: TokenType::H1,
                span: Span::new(100, 7),
            }]
        );
    }

    #[test]
    fn definition_tokens() {
        let text = "[id]: http://x.org \"T\"\n";
        let tokens = parse_paragraph(text, 0);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::LinkLabel,
                TokenType::UrlDefinition,
                TokenType::LinkTitle
            ]
        );
        assert_eq!(tokens[1].span.slice(text), Some("http://x.org"));
        assert_eq!(tokens[2].span.slice(text), Some("T"));
    }

    #[test]
    fn link_children_follow_the_link() {
        let tokens = parse_paragraph("[**b**][id]", 0);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::LinkExpression,
                TokenType::LinkText,
                TokenType::LinkLabel,
                TokenType::Bold
            ]
        );
    }

    #[test]
    fn sections_skip_nested_headers() {
        let doc = "# One\n\n> # Quoted\n\nTwo\n---\n";
        let sections = parse_sections(doc);
        assert_eq!(kinds(&sections), vec![TokenType::H1, TokenType::H2]);
        assert_eq!(sections[1].span.slice(doc), Some("Two"));
    }

    #[test]
    fn multiline_constructs() {
        assert!(contains_multiline_construct("Title\n=====\n"));
        assert!(contains_multiline_construct("Title\n-----\n"));
        assert!(!contains_multiline_construct("# Title\n"));
        assert!(!contains_multiline_construct("\n---\n"));
    }
}
