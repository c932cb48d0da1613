//! Lazy joins over sources that can only be iterated.
//!
//! A [`TupleStream`] never indexes its sources. Sizes are measured with one
//! counting pass per source at construction, and each traversal opens fresh
//! passes:
//!
//! - products keep one live iterator per position and reopen a position's
//!   pass when it wraps around;
//! - powers drive a [`Cursor`] and pull elements from a single pass into a
//!   [`LazyBuffer`] only as far as the cursor has reached.
//!
//! Both yield tuples in exactly the order of
//! [`Indexer::unrank`](crate::rank::Indexer::unrank).

use core::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::dims::DimensionSet;
use crate::error::Result;
use crate::policy::Policy;
use crate::rank::Indexer;
use crate::seq::IterableSequence;

/// A restartable, finite sequence of joined tuples.
///
/// ```
/// use joinery_core::{Policy, TupleStream};
///
/// let stream = TupleStream::power(1..=4, 2, Policy::Combination).unwrap();
/// let pairs: Vec<Vec<i32>> = stream.iter().collect();
/// assert_eq!(pairs[0], vec![2, 1]);
/// assert_eq!(pairs.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct TupleStream<S> {
    sources: Vec<S>,
    indexer: Indexer,
}

impl<S: IterableSequence> TupleStream<S> {
    /// Join one source with itself `k` times under `policy`.
    pub fn power(source: S, k: usize, policy: Policy) -> Result<Self> {
        let dims = DimensionSet::power(source.iter_seq().count(), k, policy)?;
        Self::build(vec![source], dims)
    }

    /// Generalized Cartesian product of `sources`, position 0 fastest.
    pub fn product(sources: Vec<S>) -> Result<Self> {
        let sizes = sources.iter().map(|s| s.iter_seq().count()).collect();
        let dims = DimensionSet::product(sizes)?;
        Self::build(sources, dims)
    }

    fn build(sources: Vec<S>, dims: DimensionSet) -> Result<Self> {
        let indexer = Indexer::new(dims)?;
        tracing::debug!(
            arity = indexer.arity(),
            count = indexer.count(),
            policy = %indexer.dimensions().policy(),
            "built tuple stream"
        );
        Ok(Self { sources, indexer })
    }

    /// Number of tuples every traversal yields.
    #[inline]
    pub fn count(&self) -> u64 {
        self.indexer.count()
    }

    /// Whether the join has no tuples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The underlying rank/unrank engine.
    #[inline]
    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    /// Start a fresh traversal.
    pub fn iter(&self) -> StreamIter<'_, S>
    where
        S::Item: Clone,
    {
        let inner = match self.indexer.dimensions() {
            DimensionSet::Product { .. } => Inner::Product(ProductWalk::new(
                &self.sources,
                self.indexer.count(),
            )),
            DimensionSet::Power { .. } => Inner::Power(PowerWalk {
                cursor: Cursor::new(&self.indexer),
                buffer: LazyBuffer::new(self.sources[0].iter_seq()),
            }),
        };
        StreamIter { inner }
    }
}

impl<'s, S> IntoIterator for &'s TupleStream<S>
where
    S: IterableSequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;
    type IntoIter = StreamIter<'s, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One traversal of a [`TupleStream`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct StreamIter<'s, S: IterableSequence> {
    inner: Inner<'s, S>,
}

enum Inner<'s, S: IterableSequence> {
    Product(ProductWalk<'s, S>),
    Power(PowerWalk<S>),
}

impl<S> Iterator for StreamIter<'_, S>
where
    S: IterableSequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Product(walk) => walk.next(),
            Inner::Power(walk) => walk.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            Inner::Product(walk) => walk.remaining,
            Inner::Power(walk) => walk.cursor.remaining(),
        };
        let n = usize::try_from(remaining).ok();
        (n.unwrap_or(usize::MAX), n)
    }
}

impl<S> ExactSizeIterator for StreamIter<'_, S>
where
    S: IterableSequence,
    S::Item: Clone,
{
}

impl<S> FusedIterator for StreamIter<'_, S>
where
    S: IterableSequence,
    S::Item: Clone,
{
}

// ---------------------------------------------------------------------------
// Products: one live pass per position
// ---------------------------------------------------------------------------

struct ProductWalk<'s, S: IterableSequence> {
    sources: &'s [S],
    passes: Vec<S::Iter>,
    current: Vec<S::Item>,
    remaining: u64,
    primed: bool,
}

impl<'s, S> ProductWalk<'s, S>
where
    S: IterableSequence,
    S::Item: Clone,
{
    fn new(sources: &'s [S], count: u64) -> Self {
        let mut passes = Vec::with_capacity(sources.len());
        let mut current = Vec::with_capacity(sources.len());
        for source in sources {
            let mut pass = source.iter_seq();
            match pass.next() {
                Some(first) => current.push(first),
                None => break,
            }
            passes.push(pass);
        }
        // A source that came back empty ends the walk before it starts.
        let remaining = if current.len() == sources.len() { count } else { 0 };
        Self {
            sources,
            passes,
            current,
            remaining,
            primed: false,
        }
    }

    fn next(&mut self) -> Option<Vec<S::Item>> {
        if self.remaining == 0 {
            return None;
        }
        if self.primed && !self.step() {
            self.remaining = 0;
            return None;
        }
        self.primed = true;
        self.remaining -= 1;
        Some(self.current.clone())
    }

    /// Odometer step over live passes; `false` if a reopened pass is empty.
    fn step(&mut self) -> bool {
        for pos in 0..self.passes.len() {
            if let Some(item) = self.passes[pos].next() {
                self.current[pos] = item;
                return true;
            }
            let mut pass = self.sources[pos].iter_seq();
            match pass.next() {
                Some(first) => self.current[pos] = first,
                None => return false,
            }
            self.passes[pos] = pass;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Powers: cursor + lazily filled buffer
// ---------------------------------------------------------------------------

struct PowerWalk<S: IterableSequence> {
    cursor: Cursor,
    buffer: LazyBuffer<S::Iter>,
}

impl<S> PowerWalk<S>
where
    S: IterableSequence,
    S::Item: Clone,
{
    fn next(&mut self) -> Option<Vec<S::Item>> {
        let top = self.cursor.advance()?.iter().max().copied();
        if let Some(top) = top {
            if !self.buffer.fill_to(top + 1) {
                // The pass ended before the length its counting pass reported.
                self.cursor.finish();
                return None;
            }
        }
        let digits = self.cursor.digits();
        Some(digits.iter().map(|&d| self.buffer.items[d].clone()).collect())
    }
}

/// Elements pulled from one forward pass, kept for reuse.
///
/// The pass is advanced only as far as the largest position requested.
#[derive(Debug, Clone)]
pub struct LazyBuffer<I: Iterator> {
    pass: I,
    items: Vec<I::Item>,
    done: bool,
}

impl<I: Iterator> LazyBuffer<I> {
    /// Wrap a fresh pass; nothing is pulled yet.
    pub fn new(pass: I) -> Self {
        Self {
            pass,
            items: Vec::new(),
            done: false,
        }
    }

    /// Number of elements pulled so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been pulled yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pull until at least `len` elements are held. Returns `false` if the
    /// pass ends first.
    pub fn fill_to(&mut self, len: usize) -> bool {
        while self.items.len() < len {
            if self.done {
                return false;
            }
            match self.pass.next() {
                Some(item) => self.items.push(item),
                None => self.done = true,
            }
        }
        true
    }

    /// The element at `index`, pulling as needed.
    pub fn get(&mut self, index: usize) -> Option<&I::Item> {
        if self.fill_to(index + 1) {
            self.items.get(index)
        } else {
            None
        }
    }
}
