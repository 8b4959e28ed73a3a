//! Exact median selection.
//!
//! The pivot of every partition is the true median by rank, found with a
//! deterministic bracketing search: no sampling, no randomization and no
//! scratch space. Each rank query is a full linear scan, so the search is
//! O(n) scans of O(n) each in the worst case.

use crate::core::{Engine, Marker, Observer, SortAccess};
use std::cmp::Ordering;

/// Rank of a value over a range, as two separate counters.
///
/// Duplicate keys share a rank interval: a value sits at every rank in
/// `less..=less_or_equal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rank {
    /// Number of other elements strictly less than the value.
    pub less: usize,
    /// Number of other elements less than or equal to the value.
    pub less_or_equal: usize,
}

impl Rank {
    #[inline]
    pub(crate) fn contains(&self, target: usize) -> bool {
        self.less <= target && target <= self.less_or_equal
    }
}

impl<S, F, O> Engine<'_, S, F, O>
where
    S: SortAccess + ?Sized,
    S::Item: Clone,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    /// Computes the rank of the element at `r` over `[a, b)`, skipping `r` itself.
    pub(crate) fn rank_of(&mut self, a: usize, b: usize, r: usize) -> Rank {
        let mut rank = Rank {
            less: 0,
            less_or_equal: 0,
        };

        for i in (a..b).filter(|&i| i != r) {
            self.mark(Marker::Scan, i);
            match self.cmp_indices(i, r) {
                Ordering::Less => {
                    rank.less += 1;
                    rank.less_or_equal += 1;
                }
                Ordering::Equal => rank.less_or_equal += 1,
                Ordering::Greater => {}
            }
        }
        self.clear(Marker::Scan);

        rank
    }

    /// Returns a copy of the median value of `[a, b)`.
    ///
    /// The median rank is `(b - a) / 2`. The minimum and maximum are tried
    /// first; otherwise every element strictly inside the current bracket gets
    /// its rank computed, and the bracket closes in on the median. A
    /// median-valued element is always strictly inside the bracket, so one pass
    /// over the range is enough.
    pub(crate) fn select_median(&mut self, a: usize, b: usize) -> S::Item {
        debug_assert!(a < b);

        let target = (b - a) / 2;
        let (mut min, mut max) = (a, a);

        for i in a + 1..b {
            if self.cmp_indices(i, min) == Ordering::Less {
                min = i;
            } else if self.cmp_indices(i, max) == Ordering::Greater {
                max = i;
            }
        }

        // max or min might be the median
        if self.rank_of(a, b, min).contains(target) {
            return self.item(min).clone();
        }
        if self.rank_of(a, b, max).contains(target) {
            return self.item(max).clone();
        }

        for i in a..b {
            self.mark(Marker::Cursor, i);

            if self.cmp_indices(i, min) == Ordering::Greater
                && self.cmp_indices(i, max) == Ordering::Less
            {
                let rank = self.rank_of(a, b, i);

                if rank.contains(target) {
                    return self.item(i).clone();
                } else if rank.less_or_equal < target {
                    min = i;
                } else {
                    max = i;
                }
            }
        }

        // Only reachable when the comparator is not a total order.
        self.item(min).clone()
    }
}
