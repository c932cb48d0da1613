//! Random-access views over joined sequences.
//!
//! A [`TupleView`] borrows its sources and maps each linear index to a tuple
//! of element references. Nothing is copied; the view is a projection.

use core::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::dims::DimensionSet;
use crate::error::{JoinError, Result};
use crate::policy::Policy;
use crate::rank::Indexer;
use crate::seq::IndexableSequence;

/// Join one source with itself `k` times under `policy`.
///
/// ```
/// use joinery_core::{Policy, join};
///
/// let letters = ['a', 'b', 'c', 'd', 'e'];
/// let view = join(&letters, 3, Policy::Combination).unwrap();
/// assert_eq!(view.count(), 10);
/// assert_eq!(view.get(6).unwrap(), vec![&'d', &'c', &'b']);
/// ```
pub fn join<S>(source: &S, k: usize, policy: Policy) -> Result<TupleView<'_, S>>
where
    S: IndexableSequence + ?Sized,
{
    TupleView::power(source, k, policy)
}

/// Join several sources position by position (generalized Cartesian
/// product). `sources[i]` supplies position `i`; position 0 varies fastest.
///
/// ```
/// use joinery_core::join_all;
///
/// let a = vec![1, 2, 3, 4, 5];
/// let b = vec![10, 20];
/// let c = vec![100, 200, 300];
/// let view = join_all(&[&a, &b, &c]).unwrap();
/// assert_eq!(view.count(), 30);
/// assert_eq!(view.get(14).unwrap(), vec![&5, &10, &200]);
/// ```
pub fn join_all<'a, S>(sources: &[&'a S]) -> Result<TupleView<'a, S>>
where
    S: IndexableSequence + ?Sized,
{
    TupleView::product(sources)
}

/// Read-only random-access projection of a join.
///
/// `get` makes one `at` call per position. Its digit arithmetic is O(k) for
/// `Full` and products and O(k²) for `Arrangement`. For `Combination` and
/// `Multiset` each position binary-searches over binomials, which is
/// O(k² log n) in total. [`iter`](Self::iter) skips that work by stepping
/// each tuple to its successor. Shareable across threads whenever the
/// sources are.
///
/// Sources of one join share an element type but not a container type:
/// with `S = dyn IndexableSequence<Item = T>` a vector, an array and a
/// deque can feed different positions of the same product.
///
/// ```
/// use std::collections::VecDeque;
///
/// use joinery_core::{IndexableSequence, join_all};
///
/// let a = vec![1, 2];
/// let b = [10, 20, 30];
/// let c: VecDeque<i32> = VecDeque::from([100]);
/// let sources: [&dyn IndexableSequence<Item = i32>; 3] = [&a, &b, &c];
/// let view = join_all(&sources).unwrap();
/// assert_eq!(view.count(), 6);
/// assert_eq!(view.get(3).unwrap(), vec![&2, &20, &100]);
/// ```
#[derive(Debug)]
pub struct TupleView<'a, S: ?Sized> {
    sources: Vec<&'a S>,
    indexer: Indexer,
}

impl<S: ?Sized> Clone for TupleView<'_, S> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            indexer: self.indexer.clone(),
        }
    }
}

impl<'a, S> TupleView<'a, S>
where
    S: IndexableSequence + ?Sized,
{
    /// See [`join`].
    pub fn power(source: &'a S, k: usize, policy: Policy) -> Result<Self> {
        let dims = DimensionSet::power(source.len(), k, policy)?;
        Self::build(vec![source], dims)
    }

    /// See [`join_all`].
    pub fn product(sources: &[&'a S]) -> Result<Self> {
        let dims = DimensionSet::product(sources.iter().map(|s| s.len()).collect())?;
        Self::build(sources.to_vec(), dims)
    }

    fn build(sources: Vec<&'a S>, dims: DimensionSet) -> Result<Self> {
        let indexer = Indexer::new(dims)?;
        tracing::debug!(
            arity = indexer.arity(),
            count = indexer.count(),
            policy = %indexer.dimensions().policy(),
            "built tuple view"
        );
        Ok(Self { sources, indexer })
    }

    /// Number of tuples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.indexer.count()
    }

    /// Whether the join has no tuples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of elements per tuple.
    #[inline]
    pub fn arity(&self) -> usize {
        self.indexer.arity()
    }

    /// The underlying rank/unrank engine.
    #[inline]
    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    /// The dimension set derived from the sources.
    #[inline]
    pub fn dimensions(&self) -> &DimensionSet {
        self.indexer.dimensions()
    }

    /// The tuple at linear position `index`.
    ///
    /// Fails with [`JoinError::IndexOutOfRange`] unless `index < count()`.
    pub fn get(&self, index: u64) -> Result<Vec<&'a S::Item>> {
        let digits = self.indexer.unrank(index)?;
        self.resolve(&digits)
    }

    /// Position of the tuple whose per-source indices are `digits`.
    pub fn rank_of(&self, digits: &[usize]) -> Result<u64> {
        self.indexer.rank(digits)
    }

    /// Lazily iterate over every tuple in index order.
    pub fn iter(&self) -> TupleIter<'_, 'a, S> {
        TupleIter {
            view: self,
            cursor: Cursor::new(&self.indexer),
        }
    }

    /// Iterate from `start` onward; empty when `start >= count()`.
    pub fn iter_from(&self, start: u64) -> TupleIter<'_, 'a, S> {
        TupleIter {
            view: self,
            cursor: Cursor::starting_at(&self.indexer, start),
        }
    }

    fn source_at(&self, pos: usize) -> &'a S {
        match self.indexer.dimensions() {
            DimensionSet::Product { .. } => self.sources[pos],
            DimensionSet::Power { .. } => self.sources[0],
        }
    }

    fn resolve(&self, digits: &[usize]) -> Result<Vec<&'a S::Item>> {
        digits
            .iter()
            .enumerate()
            .map(|(pos, &d)| {
                self.source_at(pos).at(d).ok_or(JoinError::InvalidTuple {
                    reason: "source is shorter than its reported length",
                })
            })
            .collect()
    }
}

impl<'v, 'a, S> IntoIterator for &'v TupleView<'a, S>
where
    S: IndexableSequence + ?Sized,
{
    type Item = Vec<&'a S::Item>;
    type IntoIter = TupleIter<'v, 'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tuples of a [`TupleView`], driven by successor steps.
#[derive(Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TupleIter<'v, 'a, S: ?Sized> {
    view: &'v TupleView<'a, S>,
    cursor: Cursor,
}

impl<'a, S> Iterator for TupleIter<'_, 'a, S>
where
    S: IndexableSequence + ?Sized,
{
    type Item = Vec<&'a S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.cursor.advance()?;
        match self.view.resolve(digits) {
            Ok(tuple) => Some(tuple),
            Err(_) => {
                // A source shorter than its reported length ends the traversal.
                self.cursor.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.cursor.remaining()).ok();
        (n.unwrap_or(usize::MAX), n)
    }
}

impl<S: IndexableSequence + ?Sized> ExactSizeIterator for TupleIter<'_, '_, S> {}
impl<S: IndexableSequence + ?Sized> FusedIterator for TupleIter<'_, '_, S> {}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn test_join_power_table() {
        let src = ['a', 'b', 'c', 'd', 'e'];
        let view = join(&src, 3, Policy::Arrangement).unwrap();
        assert_eq!(view.count(), 60);
        assert_eq!(view.get(10).unwrap(), vec![&'c', &'e', &'a']);
        assert_eq!(view.get(48).unwrap(), vec![&'b', &'a', &'e']);

        let view = join(&src, 3, Policy::Multiset).unwrap();
        assert_eq!(view.get(32).unwrap(), vec![&'e', &'d', &'d']);
    }

    #[test]
    fn test_join_all_heterogeneous() {
        let a = vec!["a0", "a1", "a2", "a3", "a4"];
        let b = vec!["b0", "b1"];
        let c = vec!["c0", "c1", "c2"];
        let view = join_all(&[&a, &b, &c]).unwrap();
        assert_eq!(view.count(), 30);
        assert_eq!(view.arity(), 3);
        assert_eq!(view.get(0).unwrap(), vec![&"a0", &"b0", &"c0"]);
        assert_eq!(view.get(6).unwrap(), vec![&"a1", &"b1", &"c0"]);
        assert_eq!(view.rank_of(&[4, 0, 1]).unwrap(), 14);
    }

    #[test]
    fn test_get_out_of_range() {
        let src = vec![1, 2, 3];
        let view = join(&src, 2, Policy::Combination).unwrap();
        assert_eq!(view.count(), 3);
        assert_eq!(
            view.get(3),
            Err(JoinError::IndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_construction_errors() {
        let empty: Vec<i32> = vec![];
        assert!(matches!(
            join(&empty, 2, Policy::Full),
            Err(JoinError::Construction { .. })
        ));
        let full = vec![1];
        assert!(matches!(
            join_all(&[&full, &empty]),
            Err(JoinError::Construction { .. })
        ));
        assert!(matches!(
            join_all::<Vec<i32>>(&[]),
            Err(JoinError::Construction { .. })
        ));
    }

    #[test]
    fn test_overflow_reported() {
        let src: Vec<u32> = (0..10).collect();
        assert_eq!(join(&src, 30, Policy::Full).err(), Some(JoinError::Overflow));
    }

    #[test]
    fn test_iter_matches_get() {
        let src: VecDeque<i32> = (0..6).collect();
        for policy in Policy::ALL {
            let view = join(&src, 3, policy).unwrap();
            let by_get: Vec<_> = (0..view.count()).map(|i| view.get(i).unwrap()).collect();
            let by_iter: Vec<_> = view.iter().collect();
            assert_eq!(by_iter, by_get, "{policy}");
            assert_eq!(view.iter().len() as u64, view.count());
        }
    }

    #[test]
    fn test_iter_restartable_and_from() {
        let src = [1, 2, 3, 4];
        let view = join(&src[..], 2, Policy::Full).unwrap();
        let first: Vec<_> = (&view).into_iter().collect();
        let second: Vec<_> = view.iter().collect();
        assert_eq!(first, second);
        let tail: Vec<_> = view.iter_from(14).collect();
        assert_eq!(tail, vec![vec![&3, &4], vec![&4, &4]]);
        assert_eq!(view.iter_from(16).count(), 0);
    }

    #[test]
    fn test_empty_when_k_exceeds_n() {
        let src = [1, 2];
        let view = join(&src, 3, Policy::Combination).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.iter().next(), None);
    }

    /// Reports five elements but only holds three.
    struct ShortSource([u8; 3]);

    impl IndexableSequence for ShortSource {
        type Item = u8;

        fn len(&self) -> usize {
            5
        }

        fn at(&self, index: usize) -> Option<&u8> {
            self.0.get(index)
        }
    }

    #[test]
    fn test_short_source_stops_iteration() {
        let src = ShortSource([0, 1, 2]);
        let view = join(&src, 2, Policy::Arrangement).unwrap();
        assert_eq!(view.count(), 20);
        assert!(matches!(view.get(2), Err(JoinError::InvalidTuple { .. })));

        let mut it = view.iter();
        assert_eq!(it.next(), Some(vec![&1, &0]));
        assert_eq!(it.next(), Some(vec![&2, &0]));
        for _ in 0..6 {
            assert_eq!(it.next(), None);
        }
        assert_eq!(it.len(), 0);
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn test_mixed_containers() {
        let a = vec!['a', 'b'];
        let b = ['x', 'y', 'z'];
        let c: VecDeque<char> = "pq".chars().collect();
        let sources: [&dyn IndexableSequence<Item = char>; 3] = [&a, &b, &c];
        let view = join_all(&sources).unwrap();
        assert_eq!(view.count(), 12);
        assert_eq!(view.get(11).unwrap(), vec![&'b', &'z', &'q']);
        assert_eq!(view.iter().count(), 12);
    }

    #[test]
    fn test_view_is_sync() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<TupleView<'static, Vec<u8>>>();
        assert_sync::<TupleView<'static, [u8]>>();
    }
}
