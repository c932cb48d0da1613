//! Successor-step traversal of a tuple space.
//!
//! A [`Cursor`] holds the current digit tuple and derives the next one in
//! place, in the same order as [`Indexer::unrank`]. It never overshoots:
//! after yielding `count` tuples it stops without computing a successor.

use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::dims::DimensionSet;
use crate::policy::Policy;
use crate::rank::Indexer;

/// Arity up to which digits live inline.
const INLINE_ARITY: usize = 8;

type Digits = SmallVec<[usize; INLINE_ARITY]>;

/// Mutable traversal state over the tuples of one [`Indexer`].
///
/// Single-owner: each traversal needs its own cursor.
#[derive(Debug, Clone)]
pub struct Cursor {
    dims: DimensionSet,
    digits: Digits,
    remaining: u64,
    primed: bool,
}

impl Cursor {
    /// A cursor positioned before the first tuple.
    pub fn new(indexer: &Indexer) -> Self {
        Self::starting_at(indexer, 0)
    }

    /// A cursor whose first yielded tuple is `unrank(start)`.
    ///
    /// A `start` at or past the count yields nothing.
    pub fn starting_at(indexer: &Indexer, start: u64) -> Self {
        let mut digits = Digits::from_elem(0, indexer.arity());
        let remaining = match indexer.unrank_into(start, &mut digits) {
            Ok(()) => indexer.count() - start,
            Err(_) => 0,
        };
        Self {
            dims: indexer.dimensions().clone(),
            digits,
            remaining,
            primed: false,
        }
    }

    /// Tuples still to be yielded.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Digits of the tuple most recently yielded by `advance`.
    #[inline]
    pub(crate) fn digits(&self) -> &[usize] {
        self.digits.as_slice()
    }

    /// Stop the traversal; every later [`advance`](Self::advance) yields
    /// `None`.
    pub fn finish(&mut self) {
        if self.remaining > 0 {
            tracing::trace!(dims = ?self.dims, remaining = self.remaining, "cursor finished early");
            self.remaining = 0;
        }
    }

    /// Move to the next tuple and borrow its digits.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.primed {
            self.step();
        } else {
            self.primed = true;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            tracing::trace!(dims = ?self.dims, "cursor exhausted");
        }
        Some(self.digits.as_slice())
    }

    /// Replace the digits with their successor. A successor must exist.
    fn step(&mut self) {
        let digits = &mut self.digits;
        match self.dims {
            DimensionSet::Product { ref sizes } => step_radix(digits, |p| sizes[p]),
            DimensionSet::Power { n, policy, .. } => match policy {
                Policy::Full => step_radix(digits, |_| n),
                Policy::Multiset => step_multiset(digits, n),
                Policy::Combination => step_combination(digits, n),
                Policy::Arrangement => step_arrangement(digits, n),
            },
        }
    }
}

/// Odometer increment, position 0 fastest.
fn step_radix(digits: &mut [usize], size: impl Fn(usize) -> usize) {
    for (p, d) in digits.iter_mut().enumerate() {
        *d += 1;
        if *d < size(p) {
            return;
        }
        *d = 0;
    }
}

/// Next strictly decreasing tuple: bump the lowest position with headroom
/// and pack everything below it directly above.
fn step_combination(digits: &mut [usize], n: usize) {
    if let Some(p) = (0..digits.len()).find(|&p| digits[p] < n - 1 - p) {
        digits[p] += 1;
        let base = digits[p];
        for q in 0..p {
            digits[q] = base + (p - q);
        }
    }
}

/// Next non-increasing tuple: bump the lowest position below `n - 1` and
/// copy it to every position below.
fn step_multiset(digits: &mut [usize], n: usize) {
    if let Some(p) = digits.iter().position(|&d| d < n - 1) {
        digits[p] += 1;
        let base = digits[p];
        digits[..p].fill(base);
    }
}

/// Next arrangement: at the lowest position that can grow, take the next
/// value not held above it, then refill the positions below with the
/// smallest free values, highest position first.
fn step_arrangement(digits: &mut [usize], n: usize) {
    for p in 0..digits.len() {
        let (low, high) = digits.split_at_mut(p);
        let (current, held) = high.split_at_mut(1);
        let mut v = current[0] + 1;
        while v < n && held.contains(&v) {
            v += 1;
        }
        if v < n {
            current[0] = v;
            let mut c = 0;
            for slot in low.iter_mut().rev() {
                while c == v || held.contains(&c) {
                    c += 1;
                }
                *slot = c;
                c += 1;
            }
            return;
        }
    }
}

/// Owned iterator over the digit tuples of an [`Indexer`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Tuples {
    cursor: Cursor,
}

impl Tuples {
    pub(crate) fn new(cursor: Cursor) -> Self {
        Self { cursor }
    }
}

impl Iterator for Tuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance().map(<[usize]>::to_vec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.cursor.remaining()).ok();
        (n.unwrap_or(usize::MAX), n)
    }
}

impl ExactSizeIterator for Tuples {}
impl FusedIterator for Tuples {}
