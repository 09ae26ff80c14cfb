//! Standalone HTML documents for preview panes.

use crate::render::Markdown;

/// Wrap rendered `body` HTML in a minimal UTF-8 document.
pub fn document(body: &str) -> String {
    document_titled(None, body)
}

/// [`document`] with a `<title>`.
pub fn document_titled(title: Option<&str>, body: &str) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(title) = title {
        out.push_str("<title>");
        out.push_str(&html_escape::encode_text(title));
        out.push_str("</title>\n");
    }
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Render `text` and wrap it for previewing.
pub fn render(markdown: &Markdown, title: Option<&str>, text: &str) -> String {
    document_titled(title, &markdown.transform(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_body() {
        assert_eq!(
            document("<p>x</p>\n"),
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n<p>x</p>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn titles_are_escaped() {
        let html = render(&Markdown::default(), Some("a < b"), "# Hi\n");
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(html.contains("<h1>Hi</h1>"));
    }
}
