//! Automatic links: `<http://…>`, `<someone@example.com>` and, when enabled,
//! bare `http://`, `https://` and `ftp://` URLs in running text.

use std::sync::OnceLock;

use regex::Regex;

use super::{Claim, Spans};
use crate::grammar::tree::Inline;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^<((?:https?|ftp):[^'">\s]+)>"#).expect("Invalid autolink regex")
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^<(?:mailto:)?([-.\w]+@[-a-z0-9]+(?:\.[-a-z0-9]+)*\.[a-z]+)>")
            .expect("Invalid email autolink regex")
    })
}

fn bare_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:^|\s)((?:https?|ftp)://[-A-Z0-9+&@#/%?=~_|\[\]()!:,.;]*[-A-Z0-9+&@#/%=~_|\[\]])",
        )
        .expect("Invalid bare url regex")
    })
}

/// Whether `rest` starts with an angle-bracketed URL or e-mail address.
pub fn is_autolink(rest: &str) -> bool {
    url_regex().is_match(rest) || email_regex().is_match(rest)
}

pub fn scan(spans: &Spans<'_, '_>) -> Vec<Claim> {
    let text = spans.text();
    let options = spans.grammar.options;
    let mut blinds = spans.atomic_blinds();
    let b = text.as_bytes();
    let mut out = Vec::new();

    let mut i = 0;
    while i < b.len() {
        if let Some(r) = blinds.covering(i) {
            i = r.end;
            continue;
        }
        if b[i] != b'<' {
            i += 1;
            continue;
        }
        let rest = &text[i..];
        let found = url_regex()
            .captures(rest)
            .map(|c| (c, false))
            .or_else(|| {
                options
                    .link_emails
                    .then(|| email_regex().captures(rest).map(|c| (c, true)))
                    .flatten()
            });
        let claimed = found.and_then(|(caps, email)| {
            let whole = i..i + caps.get(0)?.end();
            let url = caps.get(1)?;
            (!blinds.overlaps(&whole)).then(|| {
                let url_range = i + url.start()..i + url.end();
                Claim::leaf(
                    whole,
                    Inline::AutoLink {
                        span: spans.span(url_range),
                        url: url.as_str().to_string(),
                        email,
                    },
                )
            })
        });
        match claimed {
            Some(claim) => {
                i = claim.outer.end;
                out.push(claim);
            }
            None => i += 1,
        }
    }

    if options.auto_hyperlink {
        for claim in &out {
            blinds.insert(claim.outer.clone());
        }
        for caps in bare_regex().captures_iter(text) {
            let Some(url) = caps.get(1) else {
                continue;
            };
            if blinds.overlaps(&url.range()) {
                continue;
            }
            out.push(Claim::leaf(
                url.range(),
                Inline::AutoLink {
                    span: spans.span(url.range()),
                    url: url.as_str().to_string(),
                    email: false,
                },
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::region::Region;
    use crate::grammar::{Grammar, Links};
    use crate::options::Options;
    use crate::token::Span;
    use pretty_assertions::assert_eq;

    fn inlines(text: &str, options: &Options) -> Vec<Inline> {
        Grammar::new(options, Links::Lenient).inlines(&Region::contiguous(text, 0))
    }

    #[test]
    fn angle_url() {
        let nodes = inlines("see <http://x.org/a>", &Options::default());
        assert_eq!(
            nodes[1],
            Inline::AutoLink {
                span: Span::new(5, 14),
                url: "http://x.org/a".to_string(),
                email: false,
            }
        );
    }

    #[test]
    fn email_depends_on_option() {
        let on = inlines("<mailto:me@example.com>", &Options::default());
        assert!(matches!(&on[0], Inline::AutoLink { url, email: true, .. } if url == "me@example.com"));

        let options = Options {
            link_emails: false,
            ..Options::default()
        };
        let off = inlines("<me@example.com>", &options);
        assert!(!off.iter().any(|n| matches!(n, Inline::AutoLink { .. })));
    }

    #[test]
    fn bare_urls_only_when_enabled() {
        let text = "go to http://example.com/x. now";
        assert_eq!(inlines(text, &Options::default()).len(), 1);

        let options = Options {
            auto_hyperlink: true,
            ..Options::default()
        };
        let nodes = inlines(text, &options);
        assert!(matches!(&nodes[1], Inline::AutoLink { url, .. } if url == "http://example.com/x"));
    }

    #[test]
    fn shapes() {
        assert!(is_autolink("<https://a.b>"));
        assert!(is_autolink("<a.b@c.org>"));
        assert!(!is_autolink("<span>"));
    }
}
