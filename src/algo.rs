//! In-place stable cycle sort.
//!
//! The sort runs in three steps over a range `[a, b)`:
//! - **Median selection**: the exact median by rank becomes the pivot.
//! - **Stable partition**: the range becomes `[less][equal][greater]` with a
//!   block-cyclic partition whose bookkeeping lives in a tag region borrowed
//!   from the range itself.
//! - **Stable cycle sort**: the less and greater groups are each cycle-sorted
//!   while threaded through a same-length run on the other side of the equal
//!   group, which records for free which slots are already final.
//!
//! Because the pivot is the median, each side is at most half the range, so
//! each side always finds a run on the opposite side to thread through.
//! Ranges of at most [`SMALL_SORT_THRESHOLD`] elements go to a binary
//! insertion sort.
//!
//! The main entry points are [`ipscsort`], [`ipscsort_by`] and
//! [`ipscsort_range`].

use crate::core::{Engine, Observer, SortAccess};
use crate::partition::Outcome;
use std::cmp::Ordering;
use std::ops::Range;

/// Ranges of at most this many elements are sorted by binary insertion.
pub const SMALL_SORT_THRESHOLD: usize = 32;

/// Sorts a slice in place, keeping equal elements in their input order.
///
/// Performs O(n²) comparisons and O(n) moves, and allocates nothing.
///
/// # Examples
///
/// ```
/// use ipscsort::ipscsort;
///
/// let mut data = vec![5, 3, 9, 1, 3];
/// ipscsort(&mut data);
///
/// assert_eq!(data, vec![1, 3, 3, 5, 9]);
/// ```
pub fn ipscsort<T: Ord + Clone>(v: &mut [T]) {
    ipscsort_by(v, T::cmp);
}

/// Sorts a slice in place with a comparator function, keeping equal elements
/// in their input order.
///
/// The comparator must define a total order. If it does not, the resulting
/// order is unspecified, but the call still terminates without panicking on
/// an out-of-bounds index.
///
/// # Examples
///
/// ```
/// use ipscsort::ipscsort_by;
///
/// let mut data = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// ipscsort_by(&mut data, |x, y| x.0.cmp(&y.0));
///
/// assert_eq!(data, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn ipscsort_by<T, F>(v: &mut [T], compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    ipscsort_range(v, 0..len, compare);
}

/// Sorts a slice in place by a key extraction function, keeping elements with
/// equal keys in their input order.
///
/// The key function is called twice per comparison.
///
/// # Examples
///
/// ```
/// use ipscsort::ipscsort_by_key;
///
/// let mut words = vec!["kiwi", "fig", "banana", "pear"];
/// ipscsort_by_key(&mut words, |w| w.len());
///
/// assert_eq!(words, vec!["fig", "kiwi", "pear", "banana"]);
/// ```
pub fn ipscsort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    ipscsort_by(v, |a, b| f(a).cmp(&f(b)));
}

/// Sorts `range` of any [`SortAccess`] sequence in place.
///
/// Elements outside `range` are never read or written.
///
/// # Panics
///
/// Panics if `range.start > range.end` or `range.end > seq.len()`.
///
/// # Examples
///
/// ```
/// use ipscsort::ipscsort_range;
/// use std::collections::VecDeque;
///
/// let mut queue: VecDeque<i32> = VecDeque::from(vec![9, 4, 2, 7, 0]);
/// ipscsort_range(&mut queue, 1..4, i32::cmp);
///
/// assert_eq!(queue, VecDeque::from(vec![9, 2, 4, 7, 0]));
/// ```
pub fn ipscsort_range<S, F>(seq: &mut S, range: Range<usize>, compare: F)
where
    S: SortAccess + ?Sized,
    S::Item: Clone,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    ipscsort_range_observed(seq, range, compare, &mut ());
}

/// Like [`ipscsort_range`], reporting comparisons and highlight markers to
/// `observer` as the sort runs.
///
/// # Panics
///
/// Panics if `range.start > range.end` or `range.end > seq.len()`.
pub fn ipscsort_range_observed<S, F, O>(
    seq: &mut S,
    range: Range<usize>,
    compare: F,
    observer: &mut O,
) where
    S: SortAccess + ?Sized,
    S::Item: Clone,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    let Range { start, end } = range;
    assert!(
        start <= end,
        "range start {start} is greater than range end {end}"
    );
    assert!(
        end <= seq.len(),
        "range end {end} is out of bounds for a sequence of length {}",
        seq.len()
    );

    // Sorting has no meaningful behavior on zero-sized types.
    if size_of::<S::Item>() == 0 {
        return;
    }

    let mut engine = Engine::new(seq, compare, observer);
    engine.sort(start, end);
    engine.clear_all();
}

impl<S, F, O> Engine<'_, S, F, O>
where
    S: SortAccess + ?Sized,
    S::Item: Clone,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    /// Sorts `[a, b)`.
    pub(crate) fn sort(&mut self, a: usize, b: usize) {
        let n = b - a;
        if n <= SMALL_SORT_THRESHOLD {
            self.binary_insertion_sort(a, b);
            return;
        }

        let pivot = self.select_median(a, b);
        if self.partition(a, b, &pivot) == Outcome::Sorted {
            return;
        }

        let m2 = self.right_bin_search(a, b, &pivot);
        let m1 = self.left_bin_search(a, m2, &pivot);

        // h1 lesser and h2 greater elements; the median keeps both at or
        // below n / 2, so each side fits into the other side plus the equals
        let (h1, h2) = (m1 - a, b - m2);
        let h_max = h1.max(h2);
        if 2 * h_max > n {
            // not partitioned around a median: the comparator is inconsistent
            self.binary_insertion_sort(a, b);
            return;
        }
        let (a1, b1) = (a + h_max, b - h_max);

        // Sort the lesser side through [b1, b1 + h1). Afterwards [a, a1) holds
        // the tail [b1, b) in order and [b1, b) the sorted lesser side
        // followed by equal elements.
        self.stable_cycle(a, a + h1, b1, &pivot, Ordering::Greater);
        self.multi_swap(a + h1, b1 + h1, h_max - h1);

        // Bring the first sorted lesser elements home, leaving the greater
        // side right before a1 and the rest of the lesser side at the end,
        // then sort the greater side through that rest.
        self.multi_swap(a, b1, h_max - h2);
        self.stable_cycle(a1 - h2, a1, b - h2, &pivot, Ordering::Less);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ranges_use_insertion() {
        let mut data: Vec<i32> = (0..SMALL_SORT_THRESHOLD as i32).rev().collect();
        ipscsort(&mut data);
        assert!(data.is_sorted());
    }

    #[test]
    fn one_past_threshold() {
        let mut data: Vec<(i32, usize)> = (0..SMALL_SORT_THRESHOLD + 1)
            .map(|i| (((i * 7) % 5) as i32, i))
            .collect();
        let mut expected = data.clone();
        expected.sort_by_key(|x| x.0);

        ipscsort_by_key(&mut data, |x| x.0);
        assert_eq!(data, expected);
    }

    #[test]
    fn zero_sized_elements() {
        let mut data = vec![(); 100];
        ipscsort(&mut data);
        assert_eq!(data.len(), 100);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn range_past_end_panics() {
        let mut data = vec![3, 2, 1];
        ipscsort_range(&mut data, 1..4, i32::cmp);
    }

    #[test]
    #[should_panic(expected = "greater than range end")]
    fn inverted_range_panics() {
        let mut data = vec![3, 2, 1];
        #[allow(clippy::reversed_empty_ranges)]
        ipscsort_range(&mut data, 2..1, i32::cmp);
    }
}
