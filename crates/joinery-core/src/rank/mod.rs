//! Bijection between linear indices and tuples of per-dimension indices.
//!
//! Every policy enumerates tuples in the same direction: the tuple is read as
//! a number whose most significant digit is the *last* position, and tuples
//! appear in increasing order of that number.
//!
//! | Policy | Algorithm |
//! |--------|-----------|
//! | `Full` / products | mixed radix, position 0 fastest |
//! | `Combination` | combinatorial number system |
//! | `Multiset` | stars and bars over the combination system |
//! | `Arrangement` | falling-factorial digits over unused values |

mod arrangement;
mod combination;
mod radix;

use crate::count;
use crate::dims::DimensionSet;
use crate::error::{JoinError, Result};
use crate::policy::Policy;

/// Rank/unrank engine for one [`DimensionSet`].
///
/// Construction computes the tuple count once; afterwards every operation
/// is a pure function of its arguments, so an `Indexer` can be shared freely
/// across threads.
///
/// ```
/// use joinery_core::{DimensionSet, Indexer, Policy};
///
/// let dims = DimensionSet::power(5, 3, Policy::Combination).unwrap();
/// let indexer = Indexer::new(dims).unwrap();
/// assert_eq!(indexer.count(), 10);
/// assert_eq!(indexer.unrank(8).unwrap(), vec![4, 3, 1]);
/// assert_eq!(indexer.rank(&[4, 3, 1]).unwrap(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indexer {
    dims: DimensionSet,
    count: u64,
}

impl Indexer {
    /// Create an indexer, failing with [`JoinError::Overflow`] if the number
    /// of tuples does not fit in a `u64`.
    pub fn new(dims: DimensionSet) -> Result<Self> {
        let count = count::count(&dims)?;
        Ok(Self { dims, count })
    }

    /// The dimension set this indexer ranks over.
    #[inline]
    pub fn dimensions(&self) -> &DimensionSet {
        &self.dims
    }

    /// Number of tuples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of positions per tuple.
    #[inline]
    pub fn arity(&self) -> usize {
        self.dims.arity()
    }

    /// The tuple at linear position `index`.
    pub fn unrank(&self, index: u64) -> Result<Vec<usize>> {
        let mut out = vec![0; self.arity()];
        self.unrank_into(index, &mut out)?;
        Ok(out)
    }

    /// Like [`unrank`](Self::unrank), writing into a caller-provided buffer.
    ///
    /// `out.len()` must equal [`arity`](Self::arity).
    pub fn unrank_into(&self, index: u64, out: &mut [usize]) -> Result<()> {
        if index >= self.count {
            return Err(JoinError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        if out.len() != self.arity() {
            return Err(JoinError::InvalidTuple {
                reason: "output buffer length does not match the arity",
            });
        }
        match self.dims {
            DimensionSet::Product { ref sizes } => {
                radix::unrank(index, sizes.iter().copied(), out);
            }
            DimensionSet::Power { n, k, policy } => match policy {
                Policy::Full => radix::unrank(index, std::iter::repeat_n(n, k), out),
                Policy::Multiset => combination::unrank_multiset(index, n, self.count, out),
                Policy::Combination => combination::unrank(index, n, self.count, out),
                Policy::Arrangement => arrangement::unrank(index, n, self.count, out),
            },
        }
        Ok(())
    }

    /// The linear position of `tuple`.
    ///
    /// Fails with [`JoinError::InvalidTuple`] if the tuple has the wrong
    /// length, a digit outside its dimension, or breaks the policy ordering.
    /// The input is never normalized.
    pub fn rank(&self, tuple: &[usize]) -> Result<u64> {
        if tuple.len() != self.arity() {
            return Err(JoinError::InvalidTuple {
                reason: "tuple length does not match the arity",
            });
        }
        if self.count == 0 {
            return Err(JoinError::InvalidTuple {
                reason: "no tuples exist for these dimensions",
            });
        }
        match self.dims {
            DimensionSet::Product { ref sizes } => radix::rank(tuple, sizes.iter().copied()),
            DimensionSet::Power { n, k, policy } => match policy {
                Policy::Full => radix::rank(tuple, std::iter::repeat_n(n, k)),
                Policy::Multiset => combination::rank_multiset(tuple, n, self.count),
                Policy::Combination => combination::rank(tuple, n, self.count),
                Policy::Arrangement => arrangement::rank(tuple, n, self.count),
            },
        }
    }

    /// Iterate over every tuple in rank order using the successor cursor.
    pub fn tuples(&self) -> crate::cursor::Tuples {
        crate::cursor::Tuples::new(crate::cursor::Cursor::new(self))
    }
}
