//! # ipscsort
//!
//! `ipscsort` is an **in-place stable cycle sort**: a comparison sort that keeps
//! equal elements in their input order, performs at most O(n²) comparisons and
//! O(n) element moves, and uses O(1) extra space. No scratch buffer is ever
//! allocated, not even one of size √n.
//!
//! Classical stable partitions and merges lean on a buffer to remember where
//! elements go. This crate borrows that memory from the sequence being sorted:
//! pairs of distinct elements encode one bit each by their relative order, and
//! swapping a pair flips the bit.
//!
//! ## Key Features
//!
//! - **Stable**: equal elements keep their input order through every rotation
//!   and cycle.
//! - **Minimal writes**: O(n) moves overall, which makes it a good fit when
//!   writes are much more expensive than reads.
//! - **No allocation**: O(1) auxiliary scalar state, independent of `n`.
//! - **Bring your own container**: the [`SortAccess`] trait lets any indexed
//!   container be sorted, and the [`Observer`] trait lets a host watch
//!   comparisons and positions without global state.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use ipscsort::ipscsort;
//!
//! let mut data = vec!["banana", "apple", "cherry", "date"];
//! ipscsort(&mut data);
//!
//! assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! ### Stability
//!
//! ```rust
//! use ipscsort::ipscsort_by_key;
//!
//! let mut people = vec![("carol", 31), ("alice", 25), ("bob", 31), ("dave", 25)];
//! ipscsort_by_key(&mut people, |p| p.1);
//!
//! assert_eq!(
//!     people,
//!     vec![("alice", 25), ("dave", 25), ("carol", 31), ("bob", 31)]
//! );
//! ```
//!
//! ### Custom Containers
//!
//! ```rust
//! use ipscsort::{ipscsort_range, SortAccess};
//!
//! // Counts every write the sort makes.
//! struct Tracked {
//!     data: Vec<i32>,
//!     swaps: usize,
//! }
//!
//! impl SortAccess for Tracked {
//!     type Item = i32;
//!
//!     fn len(&self) -> usize {
//!         self.data.len()
//!     }
//!
//!     fn read(&self, index: usize) -> &i32 {
//!         &self.data[index]
//!     }
//!
//!     fn swap(&mut self, a: usize, b: usize) {
//!         self.swaps += 1;
//!         self.data.swap(a, b);
//!     }
//! }
//!
//! let mut tracked = Tracked { data: (0..100).rev().collect(), swaps: 0 };
//! ipscsort_range(&mut tracked, 0..100, i32::cmp);
//!
//! assert!(tracked.data.is_sorted());
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Comparisons**: O(n²) worst case; exact median selection and the cycle
//!   destination scans dominate.
//! - **Moves**: O(n). Blocks and elements are written straight to their final
//!   slots by following permutation cycles.
//! - **Memory Overhead**: a handful of indices and counters.
//!
//! This makes the sort a poor general-purpose choice for large inputs, and a
//! good one for small-to-medium inputs where memory or writes are scarce.

pub mod algo;
pub mod core;
mod cycle;
mod median;
mod partition;
mod smallsort;

pub use crate::algo::{
    SMALL_SORT_THRESHOLD, ipscsort, ipscsort_by, ipscsort_by_key, ipscsort_range,
    ipscsort_range_observed,
};
pub use crate::core::{Marker, Observer, SortAccess};

pub mod prelude {
    pub use crate::algo::{
        ipscsort, ipscsort_by, ipscsort_by_key, ipscsort_range, ipscsort_range_observed,
    };
    pub use crate::core::{Marker, Observer, SortAccess};
}
