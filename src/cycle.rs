//! Stable cycle permutation.
//!
//! Cycle sort writes every element straight into its final slot, so it makes
//! O(n) moves. On its own it is unstable, because nothing records which
//! slots already hold their final element. Here every slot carries a one-bit
//! "placed" mark that lives outside the slot's key:
//!
//! - for blocks, the mark is a tag pair in the tag region (see `partition`);
//! - for single elements, the mark is the element's side of the pivot: the
//!   region starts out holding elements from one side only, and placing an
//!   element swaps in an element from a shadow slot on the other side, whose
//!   value stands in for the real one until the pass ends.
//!
//! Both cases share [`cycle_sort`], which follows each cycle until it closes
//! back on its starting slot.

use crate::core::{Engine, Marker, Observer, SortAccess};
use std::cmp::Ordering;

/// A strided run of slots that [`cycle_sort`] can permute in place.
pub(crate) trait CycleRegion {
    fn start(&self) -> usize;

    fn end(&self) -> usize;

    fn step(&self) -> usize;

    /// Called once before the destination of the element in `hand` is computed.
    fn hold(&mut self, hand: usize) {
        let _ = hand;
    }

    /// Whether `slot` already holds its final element.
    fn is_placed(&mut self, slot: usize) -> bool;

    /// Orders the key that belongs to `slot` against the key held at `hand`.
    fn order_against_hand(&mut self, slot: usize, hand: usize) -> Ordering;

    /// Moves the held element into `dest` and picks up what was there.
    fn place(&mut self, hand: usize, dest: usize);

    /// Puts the held element into `hand` itself, closing the cycle.
    fn close(&mut self, hand: usize);

    fn mark(&mut self, marker: Marker, index: usize);
}

/// Final slot of the element held at `hand`, which was picked up from `origin`.
///
/// Counts keys strictly less than the held one, then skips slots that are
/// already placed plus one unplaced slot per equal key that started out
/// before `origin`. Unplaced elements never leave their input slot, which is
/// what makes the tie count exact.
fn destination<R: CycleRegion + ?Sized>(region: &mut R, hand: usize, origin: usize) -> usize {
    let (end, step) = (region.end(), region.step());
    region.hold(hand);

    let mut dest = hand;
    let mut ties = 0usize;

    let mut slot = hand + step;
    while slot < end {
        region.mark(Marker::Scan, slot);

        match region.order_against_hand(slot, hand) {
            Ordering::Less => dest += step,
            Ordering::Equal if slot < origin && !region.is_placed(slot) => ties += 1,
            _ => {}
        }
        region.mark(Marker::Destination, dest);

        slot += step;
    }

    // never walk past the last slot, even if the comparator is inconsistent
    while dest + step < end {
        if !region.is_placed(dest) {
            if ties == 0 {
                break;
            }
            ties -= 1;
        }
        dest += step;
        region.mark(Marker::Destination, dest);
    }

    dest
}

/// Sorts the region by following every permutation cycle until it closes.
///
/// Each slot is written at most once per cycle, and a cycle never runs longer
/// than the region has slots.
pub(crate) fn cycle_sort<R: CycleRegion + ?Sized>(region: &mut R) {
    let (start, end, step) = (region.start(), region.end(), region.step());
    let slots = (end - start).div_ceil(step);

    for hand in (start..end).step_by(step) {
        if region.is_placed(hand) {
            continue;
        }
        region.mark(Marker::Cursor, hand);

        let mut origin = hand;
        for _ in 0..slots {
            let dest = destination(region, hand, origin);
            if dest == hand {
                break;
            }
            region.place(hand, dest);
            origin = dest;
        }
        region.close(hand);
    }
}

/// Element-granularity region whose placed marks are encoded by pivot side.
///
/// `flip` is the pivot ordering that means "placed"; elements equal to the
/// pivot always count as placed.
struct ElementCycle<'r, 'a, S: SortAccess + ?Sized, F, O: ?Sized> {
    engine: &'r mut Engine<'a, S, F, O>,
    start: usize,
    end: usize,
    shadow: usize,
    pivot: &'r S::Item,
    flip: Ordering,
}

impl<S, F, O> ElementCycle<'_, '_, S, F, O>
where
    S: SortAccess + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
    O: Observer + ?Sized,
{
    #[inline]
    fn shadow_of(&self, slot: usize) -> usize {
        self.shadow + (slot - self.start)
    }
}

impl<S, F, O> CycleRegion for ElementCycle<'_, '_, S, F, O>
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
        1
    }

    fn is_placed(&mut self, slot: usize) -> bool {
        let side = self.engine.cmp_to(slot, self.pivot);
        side == self.flip || side == Ordering::Equal
    }

    fn order_against_hand(&mut self, slot: usize, hand: usize) -> Ordering {
        // a placed slot's real value waits in its shadow
        let source = if self.is_placed(slot) {
            self.shadow_of(slot)
        } else {
            slot
        };
        self.engine.cmp_indices(source, hand)
    }

    fn place(&mut self, hand: usize, dest: usize) {
        // hand <- dest <- shadow(dest) <- hand
        let shadow = self.shadow_of(dest);
        self.engine.swap(hand, dest);
        self.engine.swap(dest, shadow);
    }

    fn close(&mut self, hand: usize) {
        let shadow = self.shadow_of(hand);
        self.engine.swap(hand, shadow);
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
    /// Stable cycle sort of `[a, b)` threaded through the shadow run at `shadow`.
    ///
    /// Every element of `[a, b)` must be on the side of `pivot` opposite to
    /// `flip`, and every element of `[shadow, shadow + (b - a))` on the `flip`
    /// side or equal to the pivot. Afterwards the sorted elements of `[a, b)`
    /// sit in the shadow run and the former shadow contents, in their original
    /// order, sit in `[a, b)`.
    pub(crate) fn stable_cycle(
        &mut self,
        a: usize,
        b: usize,
        shadow: usize,
        pivot: &S::Item,
        flip: Ordering,
    ) {
        let mut region = ElementCycle {
            engine: self,
            start: a,
            end: b,
            shadow,
            pivot,
            flip,
        };
        cycle_sort(&mut region);
        self.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Engine;
    use std::cmp::Ordering;

    type Tagged = (i32, usize);

    fn by_key(x: &Tagged, y: &Tagged) -> Ordering {
        x.0.cmp(&y.0)
    }

    fn tagged(keys: &[i32]) -> Vec<Tagged> {
        keys.iter().copied().zip(0..).collect()
    }

    #[test]
    fn sorts_lesser_side_into_shadow() {
        let mut data = tagged(&[30, 10, 20, 10, 60, 70, 80, 90]);
        let mut quiet = ();
        let mut engine = Engine::new(data.as_mut_slice(), by_key, &mut quiet);
        engine.stable_cycle(0, 4, 4, &(50, usize::MAX), Ordering::Greater);

        assert_eq!(
            data,
            vec![
                (60, 4),
                (70, 5),
                (80, 6),
                (90, 7),
                (10, 1),
                (10, 3),
                (20, 2),
                (30, 0)
            ]
        );
    }

    #[test]
    fn pivot_equal_shadow_counts_as_placed() {
        let mut data = tagged(&[3, 1, 5, 7]);
        let mut quiet = ();
        let mut engine = Engine::new(data.as_mut_slice(), by_key, &mut quiet);
        engine.stable_cycle(0, 2, 2, &(5, usize::MAX), Ordering::Greater);

        assert_eq!(data, vec![(5, 2), (7, 3), (1, 1), (3, 0)]);
    }

    #[test]
    fn sorts_greater_side_against_lesser_shadow() {
        let mut data = tagged(&[9, 7, 9, 8, 1, 2, 5, 4]);
        let mut quiet = ();
        let mut engine = Engine::new(data.as_mut_slice(), by_key, &mut quiet);
        engine.stable_cycle(0, 4, 4, &(5, usize::MAX), Ordering::Less);

        assert_eq!(
            data,
            vec![
                (1, 4),
                (2, 5),
                (5, 6),
                (4, 7),
                (7, 1),
                (8, 3),
                (9, 0),
                (9, 2)
            ]
        );
    }

    #[test]
    fn already_sorted_region_is_swapped_wholesale() {
        let mut data = tagged(&[1, 2, 3, 4, 6, 7, 8, 9]);
        let mut quiet = ();
        let mut engine = Engine::new(data.as_mut_slice(), by_key, &mut quiet);
        engine.stable_cycle(0, 4, 4, &(5, usize::MAX), Ordering::Greater);

        assert_eq!(
            data,
            vec![
                (6, 4),
                (7, 5),
                (8, 6),
                (9, 7),
                (1, 0),
                (2, 1),
                (3, 2),
                (4, 3)
            ]
        );
    }
}
