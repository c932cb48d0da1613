//! Capabilities the engine needs from the sequences it joins.
//!
//! - [`IndexableSequence`]: O(1) length and element access; required by
//!   [`TupleView`](crate::view::TupleView).
//! - [`IterableSequence`]: a fresh forward pass on demand; all that
//!   [`TupleStream`](crate::stream::TupleStream) needs.

use std::collections::VecDeque;

/// A sequence with known length and random access to its elements.
pub trait IndexableSequence {
    /// Element type.
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// The element at `index`, or `None` when `index >= len()`.
    fn at(&self, index: usize) -> Option<&Self::Item>;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> IndexableSequence for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T, const N: usize> IndexableSequence for [T; N] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> IndexableSequence for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> IndexableSequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<S: IndexableSequence + ?Sized> IndexableSequence for &S {
    type Item = S::Item;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn at(&self, index: usize) -> Option<&S::Item> {
        (**self).at(index)
    }
}

/// A sequence that can start a fresh single forward pass as often as needed.
///
/// Anything that is `IntoIterator + Clone` qualifies: ranges, borrowed
/// collections, and cloneable iterator chains.
///
/// A [`TupleStream`](crate::stream::TupleStream) opens at least two passes:
/// one to count the elements and one per traversal. A one-shot iterator
/// (one that is not `Clone`, such as a reader's lines) therefore does not
/// qualify. Collect it into a `Vec` first and join that instead.
///
/// ```
/// use joinery_core::{Policy, TupleStream};
///
/// let once = "b a".split_whitespace().map(str::to_owned);
/// let held: Vec<String> = once.collect();
/// let stream = TupleStream::power(&held, 2, Policy::Full).unwrap();
/// assert_eq!(stream.count(), 4);
/// assert_eq!(stream.iter().next(), Some(vec![&held[0], &held[0]]));
/// ```
pub trait IterableSequence {
    /// Element type.
    type Item;

    /// Iterator for one pass.
    type Iter: Iterator<Item = Self::Item>;

    /// Begin a new pass from the first element.
    fn iter_seq(&self) -> Self::Iter;
}

impl<I> IterableSequence for I
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Iter = I::IntoIter;

    #[inline]
    fn iter_seq(&self) -> Self::Iter {
        self.clone().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second<S: IndexableSequence + ?Sized>(s: &S) -> Option<&S::Item> {
        s.at(1)
    }

    #[test]
    fn test_indexable_impls() {
        let v = vec![10, 20, 30];
        assert_eq!(second(&v), Some(&20));
        assert_eq!(second(v.as_slice()), Some(&20));
        assert_eq!(second(&[7, 8]), Some(&8));
        let d: VecDeque<char> = "xyz".chars().collect();
        assert_eq!(second(&d), Some(&'y'));
        assert_eq!(IndexableSequence::len(&d), 3);
        assert!(second(&Vec::<u8>::new()).is_none());
        assert!(IndexableSequence::is_empty(&Vec::<u8>::new()));
    }

    #[test]
    fn test_iterable_restarts() {
        let r = 0..4;
        let first: Vec<_> = r.iter_seq().collect();
        let again: Vec<_> = r.iter_seq().collect();
        assert_eq!(first, again);

        let words = ["a", "b"];
        let upper = words.iter().map(|w| w.to_uppercase());
        assert_eq!(upper.iter_seq().count(), 2);
        assert_eq!(upper.iter_seq().next(), Some("A".to_owned()));
    }
}
