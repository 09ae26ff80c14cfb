//! # Block Recognizers
//!
//! Each pass scans the unclaimed line segments of a region and returns
//! [`Claim`]s. Passes run in a fixed order; whatever no pass claimed becomes
//! paragraphs (or plain inline content inside tight list items).
//!
//! | pass | recognizes |
//! |------|------------|
//! | `html` | raw HTML blocks, comments, processing instructions |
//! | `definition` | `[id]: url "title"` (outermost level only) |
//! | `header` | Setext, then ATX headers |
//! | `rule` | horizontal rules |
//! | `list` | ordered and unordered lists, recursing into items |
//! | `code` | indented code blocks |
//! | `quote` | blockquotes, recursing into the stripped content |
//! | `paragraph` | leftover lines |

pub mod code;
pub mod definition;
pub mod header;
pub mod html;
pub mod list;
pub mod paragraph;
pub mod quote;
pub mod rule;

use std::ops::Range;

use log::{trace, warn};

use super::blinds::Blinds;
use super::region::{Lines, Region};
use super::tree::{Block, Definition, Inline};
use super::{Depth, Grammar, MAX_NESTING};

/// A block recognized over a range of line indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub lines: Range<usize>,
    pub block: Block,
}

/// Everything a block pass needs to look at one region.
pub struct Scan<'s, 'g> {
    pub grammar: &'s Grammar<'g>,
    pub region: &'s Region,
    pub lines: &'s Lines<'s>,
    pub depth: Depth,
}

impl Scan<'_, '_> {
    /// Source text of the region.
    pub fn text(&self) -> &str {
        self.region.text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Html,
    Definitions,
    SetextHeaders,
    AtxHeaders,
    Rules,
    Lists,
    CodeBlocks,
    BlockQuotes,
}

impl Pass {
    const ALL: [Pass; 8] = [
        Pass::Html,
        Pass::Definitions,
        Pass::SetextHeaders,
        Pass::AtxHeaders,
        Pass::Rules,
        Pass::Lists,
        Pass::CodeBlocks,
        Pass::BlockQuotes,
    ];

    fn scan(self, scan: &Scan<'_, '_>, seg: Range<usize>) -> Vec<Claim> {
        match self {
            Pass::Html => html::scan(scan, seg),
            Pass::Definitions => definition::scan(scan, seg),
            Pass::SetextHeaders => header::scan_setext(scan, seg),
            Pass::AtxHeaders => header::scan_atx(scan, seg),
            Pass::Rules => rule::scan(scan, seg),
            Pass::Lists => list::scan(scan, seg),
            Pass::CodeBlocks => code::scan(scan, seg),
            Pass::BlockQuotes => quote::scan(scan, seg),
        }
    }
}

/// What the lines left over after the passes turn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leftover {
    Paragraphs,
    Plain,
}

impl Grammar<'_> {
    /// Full block parse of a region.
    pub fn blocks(&self, region: &Region, depth: Depth) -> Vec<Block> {
        self.run_passes(region, depth, &Pass::ALL, Leftover::Paragraphs)
    }

    /// Content of a tight list item: only sub-lists are block-level, the rest
    /// is inline content without paragraphs.
    pub fn tight_item(&self, region: &Region, depth: Depth) -> Vec<Block> {
        self.run_passes(region, depth, &[Pass::Lists], Leftover::Plain)
    }

    pub(super) fn definition_scan(&self, region: &Region) -> Vec<Definition> {
        self.run_passes(
            region,
            Depth::default(),
            &[Pass::Html, Pass::Definitions],
            Leftover::Paragraphs,
        )
        .into_iter()
        .filter_map(|block| match block {
            Block::Definition(def) => Some(def),
            _ => None,
        })
        .collect()
    }

    fn run_passes(
        &self,
        region: &Region,
        depth: Depth,
        passes: &[Pass],
        leftover: Leftover,
    ) -> Vec<Block> {
        if depth.nesting > MAX_NESTING {
            warn!(
                "Nesting deeper than {MAX_NESTING} levels, keeping {} bytes as plain text",
                region.len()
            );
            let text = region.text().trim_end_matches('\n').to_string();
            return vec![Block::Plain(vec![Inline::Text(text)])];
        }

        let lines = Lines::new(region.text());
        let scan = Scan {
            grammar: self,
            region,
            lines: &lines,
            depth,
        };

        let mut blinds = Blinds::default();
        let mut claims: Vec<Claim> = Vec::new();
        for &pass in passes {
            if pass == Pass::Definitions && depth.nesting > 0 {
                continue;
            }
            let found: Vec<Claim> = blinds
                .gaps(0..lines.len())
                .into_iter()
                .flat_map(|seg| pass.scan(&scan, seg))
                .collect();
            for claim in &found {
                trace!("{pass:?} claimed lines {:?}", claim.lines);
                blinds.insert(claim.lines.clone());
            }
            claims.extend(found);
        }

        for gap in blinds.gaps(0..lines.len()) {
            match leftover {
                Leftover::Paragraphs => claims.extend(paragraph::paragraphs(&scan, gap)),
                Leftover::Plain => claims.extend(paragraph::plain(&scan, gap)),
            }
        }

        claims.sort_by_key(|c| c.lines.start);
        claims.into_iter().map(|c| c.block).collect()
    }
}
