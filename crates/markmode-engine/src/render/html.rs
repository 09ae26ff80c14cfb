//! HTML sink: flattens the syntax tree into markup.

use super::encode;
use crate::escape::{EscapeTable, HtmlBlockTable};
use crate::grammar::tree::{Block, Image, Inline, Link, List, Target};
use crate::options::Options;

/// Writes blocks and inlines for one render call.
///
/// Output still contains escape placeholders; the caller unescapes the
/// finished document.
pub struct HtmlWriter<'a> {
    options: &'a Options,
    escapes: &'a EscapeTable,
    html_blocks: &'a HtmlBlockTable,
}

/// Resolved `href`/`src` and title of a link or image.
struct Resolved<'t> {
    url: &'t str,
    title: Option<&'t str>,
}

fn resolve(target: &Target) -> Option<Resolved<'_>> {
    match target {
        Target::Inline { url, title, .. } => Some(Resolved {
            url,
            title: title.as_deref(),
        }),
        Target::Reference { destination, .. } => destination.as_ref().map(|d| Resolved {
            url: &d.url,
            title: d.title.as_deref(),
        }),
    }
}

impl<'a> HtmlWriter<'a> {
    pub fn new(
        options: &'a Options,
        escapes: &'a EscapeTable,
        html_blocks: &'a HtmlBlockTable,
    ) -> Self {
        Self {
            options,
            escapes,
            html_blocks,
        }
    }

    pub fn blocks(&self, blocks: &[Block]) -> String {
        let mut out = String::new();
        for block in blocks {
            self.block(&mut out, block);
        }
        out
    }

    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Header { level, content, .. } => {
                out.push_str(&format!("<h{level}>"));
                self.inlines(out, content);
                out.push_str(&format!("</h{level}>\n\n"));
            }
            Block::Rule { .. } => {
                out.push_str("<hr");
                out.push_str(&self.options.empty_element_suffix);
                out.push('\n');
            }
            Block::List(list) => self.list(out, list),
            Block::CodeBlock { code, .. } => {
                out.push_str("<pre><code>");
                out.push_str(&encode::code(code, self.escapes));
                out.push_str("\n</code></pre>\n\n");
            }
            Block::BlockQuote { children, .. } => {
                let inner = self.blocks(children);
                out.push_str("<blockquote>\n");
                out.push_str(&indent_quoted(inner.trim_matches('\n')));
                out.push_str("\n</blockquote>\n\n");
            }
            Block::Html { html } => {
                out.push_str(html);
                out.push_str("\n\n");
            }
            Block::Definition(_) => {}
            Block::Paragraph(content) => {
                if let Some(html) = self.stashed_block(content) {
                    out.push_str(html);
                    out.push_str("\n\n");
                    return;
                }
                out.push_str("<p>");
                self.inlines(out, content);
                out.push_str("</p>\n\n");
            }
            Block::Plain(content) => self.plain(out, content),
        }
    }

    /// Tight item text. Trailing newlines are written as-is so they never
    /// turn into hard breaks.
    fn plain(&self, out: &mut String, content: &[Inline]) {
        let Some((Inline::Text(last), rest)) = content.split_last() else {
            self.inlines(out, content);
            return;
        };
        self.inlines(out, rest);
        let trimmed = last.trim_end_matches('\n');
        out.push_str(&self.text(trimmed));
        out.push_str(&last[trimmed.len()..]);
    }

    /// The raw HTML block a paragraph stands in for, if it is just a key.
    fn stashed_block(&self, content: &[Inline]) -> Option<&'a str> {
        match content {
            [Inline::Text(key)] => self.html_blocks.get(key),
            _ => None,
        }
    }

    fn list(&self, out: &mut String, list: &List) {
        let tag = if list.ordered { "ol" } else { "ul" };
        out.push_str(&format!("<{tag}>\n"));
        for item in &list.items {
            let body = self.blocks(&item.children);
            let body = if item.loose {
                body.trim_matches('\n')
            } else {
                body.trim_end_matches('\n')
            };
            out.push_str("<li>");
            out.push_str(body);
            out.push_str("</li>\n");
        }
        out.push_str(&format!("</{tag}>\n"));
    }

    fn inlines(&self, out: &mut String, nodes: &[Inline]) {
        for node in nodes {
            self.inline(out, node);
        }
    }

    fn inline(&self, out: &mut String, node: &Inline) {
        match node {
            Inline::Text(text) => out.push_str(&self.text(text)),
            Inline::Code { code, .. } => {
                out.push_str("<code>");
                out.push_str(&encode::code(code, self.escapes));
                out.push_str("</code>");
            }
            Inline::Escaped(c) => match self.escapes.placeholder(*c) {
                Some(p) => out.push_str(p),
                None => out.push(*c),
            },
            Inline::Html(html) => out.push_str(html),
            Inline::Image(image) => self.image(out, image),
            Inline::Link(link) => self.link(out, link),
            Inline::AutoLink { url, email, .. } => self.autolink(out, url, *email),
            Inline::Strong { children, .. } => {
                out.push_str("<strong>");
                self.inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::Emphasis { children, .. } => {
                out.push_str("<em>");
                self.inlines(out, children);
                out.push_str("</em>");
            }
        }
    }

    /// Running text: entity-safe, with hard breaks.
    fn text(&self, text: &str) -> String {
        encode::hard_breaks(
            &encode::amps_and_angles(text),
            &self.options.empty_element_suffix,
            self.options.auto_newlines,
        )
    }

    fn url(&self, url: &str) -> String {
        if self.options.encode_problem_url_characters {
            encode::bold_italic(&encode::problem_url_chars(url), self.escapes)
        } else {
            encode::bold_italic(url, self.escapes)
        }
    }

    fn title_attr(&self, out: &mut String, title: Option<&str>) {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            out.push_str(" title=\"");
            out.push_str(&encode::title(title, self.escapes));
            out.push('"');
        }
    }

    fn image(&self, out: &mut String, image: &Image) {
        let Some(target) = resolve(&image.target) else {
            out.push_str(&self.text(&image.alt));
            return;
        };
        let alt = self
            .escapes
            .escape_only(&image.alt.replace('"', "&quot;"), "*_[]()");
        out.push_str("<img src=\"");
        out.push_str(&self.url(target.url));
        out.push_str("\" alt=\"");
        out.push_str(&alt);
        out.push('"');
        self.title_attr(out, target.title);
        out.push_str(&self.options.empty_element_suffix);
    }

    fn link(&self, out: &mut String, link: &Link) {
        let Some(target) = resolve(&link.target) else {
            self.inlines(out, &link.children);
            return;
        };
        out.push_str("<a href=\"");
        out.push_str(&self.url(target.url));
        out.push('"');
        self.title_attr(out, target.title);
        out.push('>');
        self.inlines(out, &link.children);
        out.push_str("</a>");
    }

    fn autolink(&self, out: &mut String, url: &str, email: bool) {
        if !email {
            let url = self.url(url);
            out.push_str(&format!("<a href=\"{url}\">{url}</a>"));
            return;
        }
        let href = encode::email(&format!("mailto:{url}"));
        let visible = href.split_once(':').map_or(href.as_str(), |(_, rest)| rest);
        out.push_str(&format!("<a href=\"{href}\">{visible}</a>"));
    }
}

/// Indent every line of a blockquote body by two spaces, except lines of
/// preformatted blocks.
fn indent_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    let mut in_pre = false;
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.contains("<pre>") {
            in_pre = true;
        }
        if !in_pre && !line.is_empty() {
            out.push_str("  ");
        }
        out.push_str(line);
        if line.contains("</pre>") {
            in_pre = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tree::{Destination, ListItem};
    use crate::token::Span;
    use pretty_assertions::assert_eq;

    fn render(blocks: &[Block], options: &Options) -> String {
        let escapes = EscapeTable::for_input("");
        let html_blocks = HtmlBlockTable::default();
        let html = HtmlWriter::new(options, &escapes, &html_blocks).blocks(blocks);
        escapes.unescape(&html)
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn tight_and_loose_items() {
        let item = |loose, children| ListItem {
            marker: Span::new(0, 1),
            loose,
            children,
        };
        let list = Block::List(List {
            ordered: true,
            items: vec![
                item(false, vec![Block::Plain(vec![text("a\n")])]),
                item(true, vec![Block::Paragraph(vec![text("b")])]),
            ],
        });
        assert_eq!(
            render(&[list], &Options::default()),
            "<ol>\n<li>a</li>\n<li><p>b</p></li>\n</ol>\n"
        );
    }

    #[test]
    fn blockquote_indents_except_pre() {
        let quote = Block::BlockQuote {
            span: Span::new(0, 1),
            children: vec![
                Block::Paragraph(vec![text("q")]),
                Block::CodeBlock {
                    span: Span::new(0, 1),
                    code: "x\ny".to_string(),
                },
            ],
        };
        assert_eq!(
            render(&[quote], &Options::default()),
            "<blockquote>\n  <p>q</p>\n\n<pre><code>x\ny\n</code></pre>\n</blockquote>\n\n"
        );
    }

    #[test]
    fn hard_breaks() {
        let para = Block::Paragraph(vec![text("one  \ntwo\nthree")]);
        assert_eq!(
            render(std::slice::from_ref(&para), &Options::default()),
            "<p>one<br />\ntwo\nthree</p>\n\n"
        );
        let options = Options {
            auto_newlines: true,
            empty_element_suffix: ">".to_string(),
            ..Options::default()
        };
        assert_eq!(
            render(&[para], &options),
            "<p>one  <br>\ntwo<br>\nthree</p>\n\n"
        );
    }

    #[test]
    fn tight_item_newline_is_not_a_hard_break() {
        let list = Block::List(List {
            ordered: false,
            items: vec![ListItem {
                marker: Span::new(0, 1),
                loose: false,
                children: vec![Block::Plain(vec![text("a\nb\n")])],
            }],
        });
        let options = Options {
            auto_newlines: true,
            ..Options::default()
        };
        assert_eq!(
            render(&[list], &options),
            "<ul>\n<li>a<br />\nb</li>\n</ul>\n"
        );
    }

    #[test]
    fn quoted_blank_lines_stay_empty() {
        assert_eq!(indent_quoted("<p>a</p>\n\n<p>b</p>"), "  <p>a</p>\n\n  <p>b</p>");
        assert_eq!(indent_quoted(""), "");
    }

    #[test]
    fn reference_link_uses_destination() {
        let link = Inline::Link(Link {
            span: Span::new(0, 1),
            text_span: Span::new(0, 1),
            children: vec![text("t")],
            target: Target::Reference {
                label_span: None,
                destination: Some(Destination {
                    url: "/a_b".to_string(),
                    title: Some("T \"q\"".to_string()),
                }),
            },
        });
        assert_eq!(
            render(&[Block::Plain(vec![link])], &Options::default()),
            "<a href=\"/a_b\" title=\"T &quot;q&quot;\">t</a>"
        );
    }

    #[test]
    fn email_autolink_hides_the_address() {
        let node = Inline::AutoLink {
            span: Span::new(0, 1),
            url: "a@b.c".to_string(),
            email: true,
        };
        let html = render(&[Block::Plain(vec![node])], &Options::default());
        assert!(html.starts_with("<a href=\"&#x6d;&#97;"));
        assert!(!html.contains("a@b.c"));
        assert!(!html.contains("mailto"));
    }
}
