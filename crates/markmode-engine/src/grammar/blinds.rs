use std::ops::Range;

/// Ranges already claimed by an earlier pass.
///
/// Later passes consult the list instead of rewriting the text, so offsets
/// never drift from the input. Ranges are kept sorted and merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blinds {
    ranges: Vec<Range<usize>>,
}

impl Blinds {
    pub fn insert(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let at = self.ranges.partition_point(|r| r.end < range.start);
        let mut merged = range;
        while at < self.ranges.len() && self.ranges[at].start <= merged.end {
            let r = self.ranges.remove(at);
            merged = merged.start.min(r.start)..merged.end.max(r.end);
        }
        self.ranges.insert(at, merged);
    }

    /// The blinded range covering `pos`, if any.
    pub fn covering(&self, pos: usize) -> Option<Range<usize>> {
        let idx = self.ranges.partition_point(|r| r.end <= pos);
        self.ranges
            .get(idx)
            .filter(|r| r.start <= pos)
            .cloned()
    }

    pub fn is_blinded(&self, pos: usize) -> bool {
        self.covering(pos).is_some()
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start < range.end)
    }

    /// Maximal unblinded sub-ranges of `within`, in order.
    pub fn gaps(&self, within: Range<usize>) -> Vec<Range<usize>> {
        let mut gaps = Vec::new();
        let mut pos = within.start;
        for r in &self.ranges {
            if r.end <= pos {
                continue;
            }
            if r.start >= within.end {
                break;
            }
            if r.start > pos {
                gaps.push(pos..r.start);
            }
            pos = pos.max(r.end);
        }
        if pos < within.end {
            gaps.push(pos..within.end);
        }
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_merges_touching_ranges() {
        let mut b = Blinds::default();
        b.insert(5..8);
        b.insert(1..3);
        b.insert(3..5);
        assert_eq!(b.gaps(0..10), vec![0..1, 8..10]);
    }

    #[test]
    fn covering_and_overlaps() {
        let mut b = Blinds::default();
        b.insert(2..4);
        assert_eq!(b.covering(3), Some(2..4));
        assert_eq!(b.covering(4), None);
        assert!(b.is_blinded(2));
        assert!(b.overlaps(&(0..3)));
        assert!(!b.overlaps(&(4..9)));
    }

    #[test]
    fn gaps_of_empty_blinds_is_whole_range() {
        let b = Blinds::default();
        assert_eq!(b.gaps(3..7), vec![3..7]);
    }

    #[test]
    fn empty_range_is_ignored() {
        let mut b = Blinds::default();
        b.insert(4..4);
        assert_eq!(b, Blinds::default());
    }
}
