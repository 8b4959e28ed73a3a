//! Core traits and types for ipscsort.
//!
//! This module defines:
//! - [`SortAccess`]: The sequence-access capability the sort operates through.
//! - [`Observer`]: Instrumentation hooks a host can inject to watch the sort.
//! - Engine: Internal bundle of sequence, comparator and observer.

use std::cmp::Ordering;
use std::collections::VecDeque;

/// A trait for reading and permuting a sequence in place.
///
/// The sort never allocates scratch storage proportional to the input: every
/// move it makes goes through [`swap`](SortAccess::swap),
/// [`reverse_range`](SortAccess::reverse_range) or
/// [`rotate_range`](SortAccess::rotate_range), and all of them stay inside the
/// range being sorted. Implementing this trait for an
/// instrumented container is therefore enough to observe every write.
///
/// # Examples
///
/// Implementing for a custom struct:
///
/// ```
/// use ipscsort::core::SortAccess;
///
/// struct Scores {
///     data: Vec<u32>,
/// }
///
/// impl SortAccess for Scores {
///     type Item = u32;
///
///     fn len(&self) -> usize {
///         self.data.len()
///     }
///
///     fn read(&self, index: usize) -> &u32 {
///         &self.data[index]
///     }
///
///     fn swap(&mut self, a: usize, b: usize) {
///         self.data.swap(a, b);
///     }
/// }
/// ```
pub trait SortAccess {
    /// The element type stored in the sequence.
    type Item;

    /// Returns the number of items in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the item at `index` (indexed read).
    fn read(&self, index: usize) -> &Self::Item;

    /// Exchanges the items at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);

    /// Reverses the items in `[a, b)`.
    fn reverse_range(&mut self, a: usize, b: usize) {
        let (mut i, mut j) = (a, b);
        while i + 1 < j {
            j -= 1;
            self.swap(i, j);
            i += 1;
        }
    }

    /// Exchanges the adjacent spans `[a, m)` and `[m, b)`.
    ///
    /// The default is the triple-reversal rotation, which needs no scratch space.
    fn rotate_range(&mut self, a: usize, m: usize, b: usize) {
        if a == m || m == b {
            return;
        }
        self.reverse_range(a, m);
        self.reverse_range(m, b);
        self.reverse_range(a, b);
    }
}

impl<T> SortAccess for [T] {
    type Item = T;

    fn len(&self) -> usize {
        self.len()
    }

    fn read(&self, index: usize) -> &T {
        &self[index]
    }

    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }

    fn reverse_range(&mut self, a: usize, b: usize) {
        self[a..b].reverse();
    }

    fn rotate_range(&mut self, a: usize, m: usize, b: usize) {
        self[a..b].rotate_left(m - a);
    }
}

// Explicit Vec impl to improve ergonomics (avoiding .as_mut_slice()).
impl<T> SortAccess for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len()
    }

    fn read(&self, index: usize) -> &T {
        &self[index]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }

    fn reverse_range(&mut self, a: usize, b: usize) {
        self[a..b].reverse();
    }

    fn rotate_range(&mut self, a: usize, m: usize, b: usize) {
        self[a..b].rotate_left(m - a);
    }
}

// A ring buffer is not contiguous, so reversal and rotation fall back to the
// swap-based defaults.
impl<T> SortAccess for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len()
    }

    fn read(&self, index: usize) -> &T {
        &self[index]
    }

    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b);
    }
}

/// Highlight slots reported to an [`Observer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Start of the cycle or insertion currently being resolved.
    Cursor,
    /// Element being scanned while counting ranks or destinations.
    Scan,
    /// Destination slot computed so far.
    Destination,
}

/// Instrumentation hooks called synchronously while sorting.
///
/// All methods default to no-ops, and `()` implements the trait, so a host only
/// overrides what it wants to see. The sort never depends on what an observer
/// does; it only reports to it.
pub trait Observer {
    /// Called once per comparator invocation.
    fn compared(&mut self) {}

    /// Called when `marker` moves to `index`.
    fn marked(&mut self, marker: Marker, index: usize) {
        let _ = (marker, index);
    }

    /// Called when `marker` is hidden.
    fn cleared(&mut self, marker: Marker) {
        let _ = marker;
    }

    /// Called when every marker is hidden.
    fn cleared_all(&mut self) {}
}

impl Observer for () {}

/// The state a single sort invocation works with.
///
/// Every algorithm step is an `impl` block on this type, spread over the
/// module that owns the step.
pub(crate) struct Engine<'a, S: ?Sized, F, O: ?Sized> {
    seq: &'a mut S,
    compare: F,
    observer: &'a mut O,
}

impl<'a, S, F, O> Engine<'a, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    pub(crate) fn new(seq: &'a mut S, compare: F, observer: &'a mut O) -> Self {
        Self {
            seq,
            compare,
            observer,
        }
    }

    #[inline]
    pub(crate) fn item(&self, index: usize) -> &S::Item {
        self.seq.read(index)
    }

    #[inline]
    pub(crate) fn cmp_indices(&mut self, i: usize, j: usize) -> Ordering {
        self.observer.compared();
        (self.compare)(self.seq.read(i), self.seq.read(j))
    }

    /// Orders the item at `i` against a value held outside the sequence.
    #[inline]
    pub(crate) fn cmp_to(&mut self, i: usize, value: &S::Item) -> Ordering {
        self.observer.compared();
        (self.compare)(self.seq.read(i), value)
    }

    #[inline]
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.seq.swap(i, j);
    }

    /// Swaps `[a, a + len)` with `[b, b + len)` position by position.
    pub(crate) fn multi_swap(&mut self, a: usize, b: usize, len: usize) {
        for i in 0..len {
            self.seq.swap(a + i, b + i);
        }
    }

    pub(crate) fn rotate(&mut self, a: usize, m: usize, b: usize) {
        self.observer.cleared_all();
        self.seq.rotate_range(a, m, b);
    }

    #[inline]
    pub(crate) fn mark(&mut self, marker: Marker, index: usize) {
        self.observer.marked(marker, index);
    }

    #[inline]
    pub(crate) fn clear(&mut self, marker: Marker) {
        self.observer.cleared(marker);
    }

    pub(crate) fn clear_all(&mut self) {
        self.observer.cleared_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(Vec<i32>);

    impl SortAccess for Plain {
        type Item = i32;

        fn len(&self) -> usize {
            self.0.len()
        }

        fn read(&self, index: usize) -> &i32 {
            &self.0[index]
        }

        fn swap(&mut self, a: usize, b: usize) {
            self.0.swap(a, b);
        }
    }

    #[test]
    fn default_rotate_range_matches_slice_rotate() {
        for len in 0..9 {
            for a in 0..=len {
                for m in a..=len {
                    for b in m..=len {
                        let mut plain = Plain((0..len as i32).collect());
                        let mut expected: Vec<i32> = (0..len as i32).collect();
                        plain.rotate_range(a, m, b);
                        expected[a..b].rotate_left(m - a);
                        assert_eq!(plain.0, expected, "rotate({a}, {m}, {b})");
                    }
                }
            }
        }
    }

    #[test]
    fn default_reverse_range() {
        let mut plain = Plain(vec![1, 2, 3, 4, 5, 6]);
        plain.reverse_range(1, 5);
        assert_eq!(plain.0, vec![1, 5, 4, 3, 2, 6]);
        plain.reverse_range(2, 2);
        assert_eq!(plain.0, vec![1, 5, 4, 3, 2, 6]);
    }

    #[test]
    fn vec_deque_rotate() {
        let mut deque: VecDeque<i32> = (0..6).collect();
        deque.rotate_left(2); // force a wrapped layout
        deque.rotate_right(2);
        SortAccess::rotate_range(&mut deque, 0, 2, 6);
        assert_eq!(deque, VecDeque::from(vec![2, 3, 4, 5, 0, 1]));
    }

    #[derive(Default)]
    struct Counter {
        compares: usize,
    }

    impl Observer for Counter {
        fn compared(&mut self) {
            self.compares += 1;
        }
    }

    #[test]
    fn engine_reports_comparisons() {
        let mut data = vec![3, 1, 2];
        let mut counter = Counter::default();
        let mut engine = Engine::new(data.as_mut_slice(), i32::cmp, &mut counter);

        assert_eq!(engine.cmp_indices(0, 1), Ordering::Greater);
        assert_eq!(engine.cmp_to(2, &2), Ordering::Equal);
        engine.multi_swap(0, 1, 1);
        assert_eq!(*engine.item(0), 1);
        drop(engine);

        assert_eq!(counter.compares, 2);
        assert_eq!(data, vec![1, 3, 2]);
    }
}
