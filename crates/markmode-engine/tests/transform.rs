use markmode_engine::{EngineError, Markdown, Options, transform};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const FIXTURES: [&str; 4] = [
    "headers.md",
    "lists.md",
    "links.md",
    "quotes_and_code.md",
];

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[rstest]
#[case::atx_header("# Title\n", "<h1>Title</h1>\n\n")]
#[case::setext_header("Title\n=====\n", "<h1>Title</h1>\n\n")]
#[case::setext_h2("Title\n-----\n", "<h2>Title</h2>\n\n")]
#[case::closed_atx("## Two ##\n", "<h2>Two</h2>\n\n")]
#[case::tight_list("* a\n* b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n")]
#[case::ordered_list("1. a\n2. b\n", "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n")]
#[case::loose_list("- a\n\n- b\n", "<ul>\n<li><p>a</p></li>\n<li><p>b</p></li>\n</ul>\n")]
#[case::escaped_emphasis("\\*not italic\\*\n", "<p>*not italic*</p>\n\n")]
#[case::emphasis("**bold** and *it*\n", "<p><strong>bold</strong> and <em>it</em></p>\n\n")]
#[case::code_block("    let x = 1 < 2;\n", "<pre><code>let x = 1 &lt; 2;\n</code></pre>\n\n")]
#[case::code_span("Use `a && b` here\n", "<p>Use <code>a &amp;&amp; b</code> here</p>\n\n")]
#[case::rule("---\n", "<hr />\n")]
#[case::blockquote("> q\n", "<blockquote>\n  <p>q</p>\n</blockquote>\n\n")]
#[case::amps_and_angles("AT&T < &copy;\n", "<p>AT&amp;T &lt; &copy;</p>\n\n")]
fn renders(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(transform(input), expected);
}

#[rstest]
#[case::tight_items("* a\n* b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n")]
#[case::lazy_item_line("* a\n  continued\n* b\n", "<ul>\n<li>a<br />\ncontinued</li>\n<li>b</li>\n</ul>\n")]
#[case::nested_list("* a\n    * b\n", "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul></li>\n</ul>\n")]
#[case::quote("> one\n> two\n", "<blockquote>\n  <p>one<br />\n  two</p>\n</blockquote>\n\n")]
fn auto_newlines_in_containers(#[case] input: &str, #[case] expected: &str) {
    let markdown = Markdown::new(Options {
        auto_newlines: true,
        ..Options::default()
    });
    assert_eq!(markdown.transform(input), expected);
}

#[test]
fn empty_quote_has_no_indented_blank_line() {
    assert_eq!(transform("> "), "<blockquote>\n\n</blockquote>\n\n");
}

#[test]
fn inline_link_with_title() {
    let html = transform(r#"[text](http://example.com "t")"#);
    assert_eq!(
        html,
        "<p><a href=\"http://example.com\" title=\"t\">text</a></p>\n\n"
    );
}

#[test]
fn nested_lists_render_nested() {
    let html = transform("* a\n    * b\n        * c\n");
    assert_eq!(
        html,
        "<ul>\n<li>a\n<ul>\n<li>b\n<ul>\n<li>c</li>\n</ul></li>\n</ul></li>\n</ul>\n"
    );
}

#[test]
fn reference_links_are_case_insensitive() {
    let html = transform("See [the docs][Docs].\n\n[docs]: http://x.org/ \"Docs\"\n");
    insta::assert_snapshot!(
        html.trim_end(),
        @r#"<p>See <a href="http://x.org/" title="Docs">the docs</a>.</p>"#
    );
}

#[test]
fn shortcut_and_image_references() {
    let html = transform("[home] and ![logo][]\n\n[home]: /\n[logo]: /logo.png\n");
    assert_eq!(
        html,
        "<p><a href=\"/\">home</a> and <img src=\"/logo.png\" alt=\"logo\" /></p>\n\n"
    );
}

#[test]
fn unresolved_references_stay_literal() {
    assert_eq!(transform("[a][nope]\n"), "<p>[a][nope]</p>\n\n");
    assert_eq!(transform("[alone]\n"), "<p>[alone]</p>\n\n");
}

#[test]
fn html_blocks_pass_through() {
    let html = transform("<div>\n*x*\n</div>\n\nafter\n");
    insta::assert_snapshot!(html.replace('\n', "|"), @"<div>|*x*|</div>||<p>after</p>||");
}

#[test]
fn email_autolinks_are_obfuscated() {
    let html = transform("<someone@example.com>\n");
    assert!(html.starts_with("<p><a href=\""));
    assert!(!html.contains('@'));
    assert!(!html.contains("mailto"));
    assert_eq!(html, transform("<someone@example.com>\n"));
}

#[test]
fn line_endings_are_normalized() {
    assert_eq!(transform("a\r\nb\r\n"), transform("a\nb\n"));
    assert_eq!(transform("a\rb\r"), transform("a\nb\n"));
}

#[test]
fn options_change_output() {
    let markdown = Markdown::new(Options {
        empty_element_suffix: ">".to_string(),
        auto_hyperlink: true,
        ..Options::default()
    });
    assert_eq!(markdown.transform("***\n"), "<hr>\n");
    assert_eq!(
        markdown.transform("go to http://x.org now\n"),
        "<p>go to <a href=\"http://x.org\">http://x.org</a> now</p>\n\n"
    );
}

#[test]
fn strict_bold_italic_keeps_identifiers() {
    let strict = Markdown::new(Options {
        strict_bold_italic: true,
        ..Options::default()
    });
    assert_eq!(
        strict.transform("snake_case_name\n"),
        "<p>snake_case_name</p>\n\n"
    );
}

#[test]
fn no_placeholder_survives() {
    for name in FIXTURES {
        let html = transform(&fixture(name));
        assert!(!html.contains('\u{1A}'), "{name} leaked a placeholder");
    }
}

#[test]
fn fixtures_render_every_construct() {
    let html = transform(&fixture("quotes_and_code.md"));
    assert!(html.contains("<blockquote>"));
    assert!(html.contains("<pre><code>fn main() {"));
    assert!(html.contains("<hr />"));
    assert!(html.contains("a *literal* star"));
    assert!(html.contains("<div>\n  Raw *HTML* block\n</div>"));
    assert!(html.contains("Trailing paragraph<br />\nwith a hard break."));
}

#[test]
fn relative_definitions_resolve_against_the_document() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("doc.md");
    fs::write(&doc, "![Logo][logo]\n\n[logo]: ./img.png\n").unwrap();

    let html = Markdown::default().transform_file(&doc).unwrap();

    let expected = format!("<img src=\"{}\"", dir.path().join("img.png").display());
    assert!(html.contains(&expected), "{html}");
}

#[test]
fn absolute_urls_ignore_the_document_path() {
    let dir = TempDir::new().unwrap();
    let html = Markdown::default().transform_with_path(
        "[x][a]\n\n[a]: http://x.org/\n",
        Some(&dir.path().join("doc.md")),
    );
    assert_eq!(html, "<p><a href=\"http://x.org/\">x</a></p>\n\n");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Markdown::default()
        .transform_file(&dir.path().join("missing.md"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Read { .. }));
    assert!(err.to_string().contains("missing.md"));
}
