//! Stable three-way partition around a pivot value, in O(1) extra space.
//!
//! The partition borrows a tag region of `2 * block_len` elements from the
//! tail of the range: `block_len` elements strictly less than the pivot
//! followed by `block_len` elements strictly greater (pivot-equal elements
//! fill in when one side is short). Pair `k` is the `k`-th element of each
//! half. Since every pair is strictly ordered, swapping it flips one bit of
//! memory, and the region acts as a `block_len`-bit table that remembers which
//! slots a cycle permutation has already placed.
//!
//! Phases:
//! 1. build the tag region at the tail;
//! 2. cycle-partition every block of `block_len` elements on its own;
//! 3. type the blocks: stitch the per-block groups together until only whole
//!    single-class blocks plus one partial remainder are left;
//! 4. cycle-partition the whole blocks by class;
//! 5. fold the remainder and the tag region back in with rotations.

use crate::core::{Engine, Marker, Observer, SortAccess};
use crate::cycle::{CycleRegion, cycle_sort};
use cuneiform::cuneiform;
use std::cmp::Ordering;

/// What a partition pass left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The range is already fully sorted.
    Sorted,
    /// The range is `[less][equal][greater]`, each group in input order.
    Partitioned,
}

/// Block length for a range of `n` elements: `isqrt(n - 1) + 1`.
///
/// It satisfies `block_len(n)^2 >= n`, so a range never has more blocks than
/// the tag region has pairs.
#[inline]
pub(crate) fn block_len(n: usize) -> usize {
    n.saturating_sub(1).isqrt() + 1
}

/// The borrowed tag region: pair `k` is `(lo + k, hi + k)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tags {
    lo: usize,
    hi: usize,
    len: usize,
}

impl Tags {
    pub(crate) fn new(start: usize, len: usize) -> Self {
        Self {
            lo: start,
            hi: start + len,
            len,
        }
    }
}

// Running tallies of the remainder left over while typing blocks.
#[cuneiform]
struct BoundaryCounts {
    less: usize,
    equal: usize,
    greater: usize,
}

/// Block-granularity region: each block's placed mark is one tag pair.
///
/// Blocks are compared by the pivot class of their first element, which is
/// the class of the whole block when `step > 1`.
struct BlockCycle<'r, 'a, S: SortAccess + ?Sized, F, O: ?Sized> {
    engine: &'r mut Engine<'a, S, F, O>,
    start: usize,
    end: usize,
    step: usize,
    tags: Tags,
    pivot: &'r S::Item,
    flip: Ordering,
    hand_class: Ordering,
}

impl<S, F, O> BlockCycle<'_, '_, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    #[inline]
    fn tag_of(&self, slot: usize) -> usize {
        (slot - self.start) / self.step
    }
}

impl<S, F, O> CycleRegion for BlockCycle<'_, '_, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn step(&self) -> usize {
        self.step
    }

    fn hold(&mut self, hand: usize) {
        self.hand_class = self.engine.cmp_to(hand, self.pivot);
    }

    fn is_placed(&mut self, slot: usize) -> bool {
        let tag = self.tag_of(slot);
        self.engine.tag_flipped(self.tags, tag, self.flip)
    }

    fn order_against_hand(&mut self, slot: usize, _hand: usize) -> Ordering {
        self.engine.cmp_to(slot, self.pivot).cmp(&self.hand_class)
    }

    fn place(&mut self, hand: usize, dest: usize) {
        let tag = self.tag_of(dest);
        self.engine.toggle_tag(self.tags, tag);
        self.engine.multi_swap(hand, dest, self.step);
    }

    fn close(&mut self, hand: usize) {
        let tag = self.tag_of(hand);
        self.engine.toggle_tag(self.tags, tag);
    }

    fn mark(&mut self, marker: Marker, index: usize) {
        self.engine.mark(marker, index);
    }
}

impl<S, F, O> Engine<'_, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    /// First index in `[a, b)` whose element is not less than `pivot`.
    pub(crate) fn left_bin_search(&mut self, mut a: usize, mut b: usize, pivot: &S::Item) -> usize {
        while a < b {
            let m = a + (b - a) / 2;

            if self.cmp_to(m, pivot) != Ordering::Less {
                b = m;
            } else {
                a = m + 1;
            }
        }
        a
    }

    /// First index in `[a, b)` whose element is greater than `pivot`.
    pub(crate) fn right_bin_search(&mut self, mut a: usize, mut b: usize, pivot: &S::Item) -> usize {
        while a < b {
            let m = a + (b - a) / 2;

            if self.cmp_to(m, pivot) == Ordering::Greater {
                b = m;
            } else {
                a = m + 1;
            }
        }
        a
    }

    /// Whether tag pair `k` reads as `flip`.
    #[inline]
    pub(crate) fn tag_flipped(&mut self, tags: Tags, k: usize, flip: Ordering) -> bool {
        self.cmp_indices(tags.lo + k, tags.hi + k) == flip
    }

    #[inline]
    pub(crate) fn toggle_tag(&mut self, tags: Tags, k: usize) {
        self.swap(tags.lo + k, tags.hi + k);
    }

    /// Swaps every flipped pair back, restoring the tag region's input order.
    pub(crate) fn reset_tags(&mut self, tags: Tags) {
        for k in 0..tags.len {
            if self.tag_flipped(tags, k, Ordering::Greater) {
                self.toggle_tag(tags, k);
            }
        }
    }

    /// Pulls the tag region out of `[a, b)` into `[b - 2 * block_len, b)`.
    ///
    /// Scans from the right, gathering the last `block_len` elements less than
    /// the pivot and the last `block_len` greater ones with rotations, so both
    /// groups and everything skipped keep their input order. Returns `true` if
    /// the range ended up fully sorted instead:
    /// - when both sides are short, every non-equal element has been
    ///   gathered, so sorting the gathered tail and rotating the equal run
    ///   between its halves finishes the job;
    /// - when one side is short, the missing tags are the last pivot-equal
    ///   elements, slotted between the two halves.
    pub(crate) fn init_tags(&mut self, a: usize, b: usize, pivot: &S::Item, bl: usize) -> bool {
        debug_assert!(b - a >= 2 * bl);

        let (mut p, mut less, mut greater, mut taken) = (b, 0, 0, 0);

        // gathered elements live in [p - taken, p)
        let mut i = b;
        while i > a && taken < 2 * bl {
            let side = self.cmp_to(i - 1, pivot);

            if less < bl && side == Ordering::Less {
                self.rotate(i, p - taken, p);
                p = i + taken;
                taken += 1;
                less += 1;
            } else if greater < bl && side == Ordering::Greater {
                self.rotate(i, p - taken, p);
                p = i + taken;
                taken += 1;
                self.rotate(i - 1, i, p - greater);
                greater += 1;
            }
            i -= 1;
        }
        self.rotate(p - taken, p, b);
        if taken == 2 * bl {
            return false;
        }

        let b1 = b - taken;

        if less < bl && greater < bl {
            self.binary_insertion_sort(b1, b);
            self.rotate(a, b1, b - greater);
            return true;
        }

        // borrow pivot-equal elements for the short side
        let need = 2 * bl - taken;
        let (mut p, mut found) = (b1, 0);

        let mut i = b1;
        while i > a && found < need {
            if self.cmp_to(i - 1, pivot) == Ordering::Equal {
                self.rotate(i, p - found, p);
                p = i + found;
                found += 1;
            }
            i -= 1;
        }
        if found < need {
            // a median always has enough equal company; the comparator lied
            self.binary_insertion_sort(a, b);
            return true;
        }

        self.rotate(p - need, p, b1);
        self.rotate(b - 2 * bl, b1, b - greater);

        false
    }

    /// Cycle-partitions the slots of `[a, b)` by pivot class, `step` elements at a time.
    ///
    /// `b - a` must be a multiple of `step`, and with `step > 1` every block
    /// must hold a single class. Tags read as `flip` mark placed slots, and
    /// every slot's tag reads as `flip` afterwards.
    pub(crate) fn block_cycle_partition(
        &mut self,
        a: usize,
        b: usize,
        tags: Tags,
        pivot: &S::Item,
        step: usize,
        flip: Ordering,
    ) {
        debug_assert!((b - a) % step == 0);
        debug_assert!((b - a) / step <= tags.len);

        let mut region = BlockCycle {
            engine: self,
            start: a,
            end: b,
            step,
            tags,
            pivot,
            flip,
            hand_class: Ordering::Equal,
        };
        cycle_sort(&mut region);
    }

    /// Folds the partitioned block `[m, b)` into the remainder `[a, m)`.
    ///
    /// The remainder is laid out `[less][equal][greater]` with the sizes in
    /// `cnt`; afterwards `[a, b)` has the same layout with the block's groups
    /// appended to the matching ones.
    fn merge(&mut self, cnt: &mut BoundaryCounts, a: usize, m: usize, b: usize, pivot: &S::Item) {
        let m1 = self.left_bin_search(m, b, pivot);
        let m2 = self.right_bin_search(m1, b, pivot);

        let (less, equal, greater) = (m1 - m, m2 - m1, b - m2);

        self.rotate(a + cnt.less, m, m1);
        cnt.less += less;

        self.rotate(a + cnt.less + cnt.equal, m1, m2);
        cnt.equal += equal;
        cnt.greater += greater;
    }

    /// Merges two adjacent partitioned runs `[a, m)` and `[m, b)`.
    ///
    /// Cheap when the right run is short: the right run's greater group never
    /// moves, and everything else takes two rotations.
    pub(crate) fn merge_easy(&mut self, a: usize, m: usize, b: usize, pivot: &S::Item) {
        let b = self.right_bin_search(m, b, pivot);
        let m1 = self.left_bin_search(a, m, pivot);
        let m2 = self.right_bin_search(m1, m, pivot);

        self.rotate(m2, m, b);

        let b = self.left_bin_search(m2, b - (m - m2), pivot);
        self.rotate(m1, m2, b);
    }

    /// Stably partitions `[a, b)` into `[less][equal][greater]` around `pivot`.
    pub(crate) fn partition(&mut self, a: usize, b: usize, pivot: &S::Item) -> Outcome {
        let bl = block_len(b - a);
        if self.init_tags(a, b, pivot, bl) {
            return Outcome::Sorted;
        }

        let b1 = b - 2 * bl;
        let tags = Tags::new(b1, bl);

        // Partition each block on its own. A full block leaves all tags
        // flipped, so the meaning of "flipped" alternates instead of resetting.
        let mut flip = Ordering::Greater;
        for i in (a..b1).step_by(bl) {
            self.block_cycle_partition(i, (i + bl).min(b1), tags, pivot, 1, flip);
            flip = flip.reverse();
        }
        self.reset_tags(tags);

        // Type blocks: [a, p) collects whole single-class blocks, [p, i) is
        // the remainder with less than a block of each class.
        let mut p = a;
        let mut cnt = BoundaryCounts {
            less: 0,
            equal: 0,
            greater: 0,
        };

        for i in (a..b1).step_by(bl) {
            self.merge(&mut cnt, p, i, (i + bl).min(b1), pivot);

            while cnt.less >= bl {
                cnt.less -= bl;
                p += bl;
            }
            while cnt.equal >= bl {
                self.rotate(p, p + cnt.less, p + cnt.less + bl);
                cnt.equal -= bl;
                p += bl;
            }
            while cnt.greater >= bl {
                let run = cnt.less + cnt.equal;
                self.rotate(p, p + run, p + run + bl);
                cnt.greater -= bl;
                p += bl;
            }
        }
        self.block_cycle_partition(a, p, tags, pivot, bl, Ordering::Greater);
        self.reset_tags(tags);

        // rotate lesser and equal items into place, tags included
        self.merge_easy(p, b1, b, pivot);
        self.merge_easy(a, p, b, pivot);

        Outcome::Partitioned
    }
}
