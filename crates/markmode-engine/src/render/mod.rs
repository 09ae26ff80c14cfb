//! # Rendering
//!
//! [`Markdown`] turns a document into HTML:
//!
//! 1. normalise line endings, expand tabs and blank out whitespace-only lines
//! 2. stash raw HTML blocks under hash keys
//! 3. collect reference definitions into a [`References`] table
//! 4. parse with that table, so only resolvable references become links
//! 5. write the tree with [`HtmlWriter`] and restore escaped characters

pub mod encode;
pub mod html;

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::EngineError;
use crate::escape::{EscapeTable, HtmlBlockTable};
use crate::grammar::blocks::html::find_blocks;
use crate::grammar::region::Region;
use crate::grammar::{Grammar, Links};
use crate::options::Options;
use crate::references::References;
pub use html::HtmlWriter;

/// Markdown to HTML converter with fixed options.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Markdown {
    options: Options,
}

impl Markdown {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Render `text` to HTML.
    pub fn transform(&self, text: &str) -> String {
        self.transform_with_path(text, None)
    }

    /// Render `text`, resolving relative reference definitions against the
    /// directory of `document_path`.
    pub fn transform_with_path(&self, text: &str, document_path: Option<&Path>) -> String {
        let text = normalize(text, self.options.tab_width);
        let escapes = EscapeTable::for_input(&text);
        let mut html_blocks = HtmlBlockTable::for_input(&text);
        let text = hash_html_blocks(&text, &mut html_blocks);
        let region = Region::contiguous(&text, 0);

        let definitions = Grammar::new(&self.options, Links::Lenient).definitions(&region);
        let references = References::from_definitions(&definitions, document_path);
        let blocks = Grammar::new(&self.options, Links::Table(&references)).parse(&region);

        debug!(
            "Rendering {} bytes: {} blocks, {} html blocks, {} references",
            text.len(),
            blocks.len(),
            html_blocks.len(),
            references.len()
        );

        let html = HtmlWriter::new(&self.options, &escapes, &html_blocks).blocks(&blocks);
        escapes.unescape(&html)
    }

    /// Read and render a Markdown file.
    pub fn transform_file(&self, path: &Path) -> Result<String, EngineError> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.transform_with_path(&text, Some(path)))
    }
}

/// Unix line endings, tabs expanded, whitespace-only lines emptied.
fn normalize(text: &str, tab_width: usize) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split('\n')
        .map(|line| {
            if line.trim_matches([' ', '\t']).is_empty() {
                String::new()
            } else {
                detab(line, tab_width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expand tabs to the next multiple of `width` columns.
fn detab(line: &str, width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let width = width.max(1);
    let mut out = String::with_capacity(line.len() + width);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = width - column % width;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Replace every outermost raw HTML block with its key, set off by blank
/// lines.
fn hash_html_blocks(text: &str, table: &mut HtmlBlockTable) -> String {
    let blocks = find_blocks(text);
    if blocks.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in blocks {
        out.push_str(&text[last..range.start]);
        out.push_str("\n\n");
        out.push_str(&table.stash(&text[range.clone()]));
        out.push_str("\n\n");
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_line_endings_and_blank_lines() {
        assert_eq!(normalize("a\r\nb\rc\n \t \nd", 4), "a\nb\nc\n\nd");
    }

    #[test]
    fn detab_aligns_to_tab_stops() {
        assert_eq!(detab("\tx", 4), "    x");
        assert_eq!(detab("ab\tx", 4), "ab  x");
        assert_eq!(detab("ab\tx\ty", 2), "ab  x y");
    }

    #[test]
    fn html_blocks_become_keys() {
        let mut table = HtmlBlockTable::default();
        let hashed = hash_html_blocks("text\n\n<div>\n*x*\n</div>\n\nmore\n", &mut table);
        assert_eq!(table.len(), 1);
        assert!(!hashed.contains("<div>"));
        assert!(hashed.starts_with("text\n\n"));
        assert!(hashed.ends_with("\n\nmore\n"));
    }
}
