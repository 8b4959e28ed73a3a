//! Small-range fallback: stable binary insertion sort.
//!
//! Used for ranges at or below the small-sort threshold, and whenever the tag
//! region cannot be built because almost every element equals the pivot.
//! Each element is inserted after the last element that does not compare
//! greater, so equal keys keep their input order.

use crate::core::{Engine, Marker, Observer, SortAccess};
use std::cmp::Ordering;

impl<S, F, O> Engine<'_, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    pub(crate) fn binary_insertion_sort(&mut self, a: usize, b: usize) {
        for i in a + 1..b {
            self.mark(Marker::Cursor, i);

            let (mut lo, mut hi) = (a, i);
            while lo < hi {
                let m = lo + (hi - lo) / 2;
                self.mark(Marker::Scan, m);

                if self.cmp_indices(i, m) == Ordering::Less {
                    hi = m;
                } else {
                    lo = m + 1;
                }
            }

            self.rotate(lo, i, i + 1);
        }
        self.clear_all();
    }
}
