//! Text projections with a mapping back to source offsets.
//!
//! Container blocks (blockquotes, list items) re-parse their content after
//! stripping a per-line prefix, so their text is no longer a contiguous slice
//! of the source. A [`Region`] owns that joined text together with a list of
//! [`Piece`]s recording where each contiguous run came from, so every span the
//! grammar produces can still be reported against the original input.

use std::ops::Range;

use crate::token::Span;

/// A run of region text that maps linearly onto the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    /// Offset of the run inside the region text.
    local: usize,
    /// Offset of the run inside the original source.
    source: usize,
}

/// Region text plus its source mapping.
///
/// # Invariants
///
/// - `pieces` is non-empty and sorted by `local`, starting at local 0
/// - within a piece, source offsets grow one-for-one with local offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    text: String,
    pieces: Vec<Piece>,
}

impl Region {
    /// The whole of `text`, located at `base` in the source.
    pub fn contiguous(text: &str, base: usize) -> Self {
        Self {
            text: text.to_string(),
            pieces: vec![Piece {
                local: 0,
                source: base,
            }],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Source offset of the byte at `local`.
    pub fn source_pos(&self, local: usize) -> usize {
        let idx = self.pieces.partition_point(|p| p.local <= local);
        let piece = self.pieces[idx.saturating_sub(1)];
        piece.source + (local - piece.local)
    }

    /// Source span of the local range `[start, end)`.
    ///
    /// The end is mapped through the last byte of the range, so a range whose
    /// end sits exactly on a projection seam does not swallow the stripped
    /// prefix that follows it.
    pub fn span(&self, range: Range<usize>) -> Span {
        if range.end <= range.start {
            return Span::new(self.source_pos(range.start), 0);
        }
        let start = self.source_pos(range.start);
        let end = self.source_pos(range.end - 1) + 1;
        Span::between(start, end)
    }

    /// Contiguous sub-region `[start, end)`.
    pub fn slice(&self, range: Range<usize>) -> Region {
        self.project(std::iter::once(range))
    }

    /// Concatenate the given local ranges into a new region. Ranges must be
    /// ascending and non-overlapping.
    pub fn project(&self, keep: impl IntoIterator<Item = Range<usize>>) -> Region {
        let mut text = String::new();
        let mut pieces: Vec<Piece> = Vec::new();

        for range in keep {
            if range.start >= range.end {
                continue;
            }
            // Split the kept range wherever it crosses one of our own seams.
            let mut pos = range.start;
            while pos < range.end {
                let idx = self.pieces.partition_point(|p| p.local <= pos);
                let seam = self
                    .pieces
                    .get(idx)
                    .map_or(range.end, |next| next.local.min(range.end));
                let source = self.source_pos(pos);
                let local = text.len();
                let contiguous = pieces.last().is_some_and(|last| {
                    last.source + (local - last.local) == source
                });
                if !contiguous {
                    pieces.push(Piece { local, source });
                }
                text.push_str(&self.text[pos..seam]);
                pos = seam;
            }
        }

        if pieces.is_empty() {
            pieces.push(Piece {
                local: 0,
                source: self.source_pos(0),
            });
        }
        Region { text, pieces }
    }
}

/// One physical line of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    /// End of the content, before any `\r\n` or `\n` terminator.
    pub end: usize,
    /// Start of the following line (or the text length).
    pub next: usize,
}

/// Line index over a region's text.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    text: &'a str,
    lines: Vec<Line>,
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                let end = if i > start && text.as_bytes()[i - 1] == b'\r' {
                    i - 1
                } else {
                    i
                };
                lines.push(Line {
                    start,
                    end,
                    next: i + 1,
                });
                start = i + 1;
            }
        }
        if start < text.len() {
            let end = if text.ends_with('\r') {
                text.len() - 1
            } else {
                text.len()
            };
            lines.push(Line {
                start,
                end,
                next: text.len(),
            });
        }
        Self { text, lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, i: usize) -> Line {
        self.lines[i]
    }

    /// Content of line `i` without its terminator.
    pub fn text(&self, i: usize) -> &'a str {
        let l = self.lines[i];
        &self.text[l.start..l.end]
    }

    pub fn is_blank(&self, i: usize) -> bool {
        self.text(i).trim().is_empty()
    }

    /// Byte range from the start of `lines.start` to the content end of the
    /// last line, excluding its terminator.
    pub fn content_range(&self, lines: Range<usize>) -> Range<usize> {
        self.lines[lines.start].start..self.lines[lines.end - 1].end
    }

    /// Byte range covering `lines`, terminators included.
    pub fn full_range(&self, lines: Range<usize>) -> Range<usize> {
        self.lines[lines.start].start..self.lines[lines.end - 1].next
    }

    /// Index of the line containing byte `pos`.
    pub fn line_of(&self, pos: usize) -> usize {
        self.lines
            .partition_point(|l| l.next <= pos)
            .min(self.lines.len().saturating_sub(1))
    }

    /// `lines` with trailing blank lines removed.
    pub fn trim_trailing_blank(&self, lines: Range<usize>) -> Range<usize> {
        let mut end = lines.end;
        while end > lines.start && self.is_blank(end - 1) {
            end -= 1;
        }
        lines.start..end
    }
}
