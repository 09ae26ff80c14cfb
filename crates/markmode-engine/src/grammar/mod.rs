//! # Grammar
//!
//! One Markdown grammar shared by the HTML and token sinks.
//!
//! ## Architecture
//!
//! Parsing is a depth-bounded recursive descent producing a concrete syntax
//! tree ([`tree`]). Each level runs a fixed sequence of recognizer passes over
//! a [`Region`]:
//!
//! - **block passes** (`blocks`) claim whole line ranges; claimed lines are
//!   blinded for later passes and act as block boundaries
//! - **span passes** (`inline`) claim byte ranges inside a leaf block; claimed
//!   ranges are opaque to later passes, and link text and strong content open
//!   nested scopes for the passes after them
//!
//! Recognizers never rewrite text. They return claims (range plus node), the
//! level collects them, and the sinks flatten the resulting tree.
//!
//! ## Link resolution
//!
//! Reference links and images are the only place the two sinks differ. The
//! grammar is parameterised by [`Links`]: the token sink accepts every
//! syntactically valid reference, while the HTML sink only claims references
//! that resolve, so an unresolved `[text][id]` stays literal text.
//!
//! ## Modules
//!
//! - **`region`**: projected text with a mapping back to source offsets
//! - **`blinds`**: claimed ranges consulted by later passes
//! - **`cursor`**: blind-aware byte cursor and bracket matching
//! - **`tree`**: `Block` and `Inline` nodes
//! - **`blocks`**: block recognizers and paragraph formation
//! - **`inline`**: span recognizers and tree assembly

pub mod blinds;
pub mod blocks;
pub mod cursor;
pub mod inline;
pub mod region;
pub mod tree;

use crate::options::Options;
use crate::references::References;
use region::Region;
use tree::{Block, Definition, Destination};

/// Bracket and parenthesis nesting accepted inside links and images.
pub const NEST_DEPTH: usize = 6;

/// Container nesting (quotes and list items) before a region degrades to
/// plain text.
pub const MAX_NESTING: usize = 32;

/// How reference-style links and images are resolved.
#[derive(Debug, Clone, Copy)]
pub enum Links<'g> {
    /// Accept every syntactic reference without a destination.
    Lenient,
    /// Only accept references defined in the table.
    Table(&'g References),
}

/// Outcome of looking up a reference id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Destination),
    Unchecked,
    Missing,
}

impl Links<'_> {
    pub fn lookup(&self, id: &str) -> Lookup {
        match self {
            Links::Lenient => Lookup::Unchecked,
            Links::Table(refs) => match refs.get(id) {
                Some(dest) => Lookup::Found(dest.clone()),
                None => Lookup::Missing,
            },
        }
    }
}

/// Position of a region in the container hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depth {
    /// Quotes and list items entered so far.
    pub nesting: usize,
    /// List items entered so far.
    pub list_level: usize,
}

impl Depth {
    pub fn quote(self) -> Self {
        Self {
            nesting: self.nesting + 1,
            ..self
        }
    }

    pub fn list_item(self) -> Self {
        Self {
            nesting: self.nesting + 1,
            list_level: self.list_level + 1,
        }
    }
}

/// Parsing context: fixed options plus the link resolution mode.
#[derive(Debug, Clone, Copy)]
pub struct Grammar<'g> {
    pub options: &'g Options,
    pub links: Links<'g>,
}

impl<'g> Grammar<'g> {
    pub fn new(options: &'g Options, links: Links<'g>) -> Self {
        Self { options, links }
    }

    /// Parse a whole document (or paragraph) into blocks.
    pub fn parse(&self, region: &Region) -> Vec<Block> {
        self.blocks(region, Depth::default())
    }

    /// Reference definitions at the outermost level of `region`.
    ///
    /// Runs only the passes that can precede a definition (raw HTML blocks
    /// hide definition-looking text inside them).
    pub fn definitions(&self, region: &Region) -> Vec<Definition> {
        self.definition_scan(region)
    }
}
