use super::blinds::Blinds;

/// Byte cursor over region text that steps over blinded ranges.
///
/// A blinded range is opaque: it is never reported as a delimiter and counts
/// as ordinary non-space content when scanning across it.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Ranges claimed by earlier passes.
    pub blinds: &'a Blinds,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, blinds: &'a Blinds, i: usize) -> Self {
        Self { s, blinds, i }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// End of the blinded range starting at or covering the cursor, if any.
    pub fn opaque_end(&self) -> Option<usize> {
        self.blinds.covering(self.i).map(|r| r.end)
    }

    /// Current byte, unless it lies inside a blinded range.
    pub fn peek(&self) -> Option<u8> {
        if self.opaque_end().is_some() {
            return None;
        }
        self.s.as_bytes().get(self.i).copied()
    }

    /// Byte at the cursor ignoring blinds.
    pub fn raw(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
            && !self.blinds.overlaps(&(self.i..self.i + pat.len()))
    }

    /// Advance past one byte, or past a whole blinded range.
    pub fn bump(&mut self) {
        self.i = match self.opaque_end() {
            Some(end) => end,
            None => (self.i + 1).min(self.s.len()),
        };
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consume `b` if it is the next (unblinded) byte.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consume unblinded bytes while `pred` holds; returns how many.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }
}

/// Scan balanced `open`/`close` content starting at `from`, returning the
/// index of the unmatched `close` that ends it.
///
/// Nesting is limited to `depth` levels: content at the innermost level may
/// only be an empty pair. Exceeding the limit, or running out of text, is no
/// match. With `stop_at_space`, whitespace at the outer level ends the
/// content (the closer is then not required) and whitespace inside a nested
/// pair is no match.
pub fn balanced(
    s: &str,
    blinds: &Blinds,
    from: usize,
    open: u8,
    close: u8,
    depth: usize,
    stop_at_space: bool,
) -> Option<usize> {
    let mut cur = Cursor::new(s, blinds, from);
    let mut level = 0usize;
    loop {
        if cur.eof() {
            return None;
        }
        if cur.opaque_end().is_some() {
            cur.bump();
            continue;
        }
        let b = cur.raw()?;
        if stop_at_space && b.is_ascii_whitespace() {
            return if level == 0 { Some(cur.i) } else { None };
        }
        if b == close {
            if level == 0 {
                return Some(cur.i);
            }
            level -= 1;
        } else if b == open {
            level += 1;
            if level >= depth {
                // Innermost level: only an empty pair fits.
                if s.as_bytes().get(cur.i + 1) != Some(&close) {
                    return None;
                }
                cur.bump();
                level -= 1;
            }
        }
        cur.bump();
    }
}
