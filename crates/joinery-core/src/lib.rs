//! `joinery-core` — the combinatorial indexing engine behind sequence joins.
//!
//! A join produces, in a fixed deterministic order, either the generalized
//! Cartesian product of several sequences or the k-th power of one sequence
//! under a [`Policy`] (full repetition, multisets, strict combinations or
//! arrangements).
//!
//! # Design
//!
//! - [`count`] gives closed-form cardinalities with overflow detection.
//! - [`Indexer`] is the rank/unrank bijection between `0..count` and tuples
//!   of per-dimension indices.
//! - [`TupleView`] borrows [`IndexableSequence`]s and answers `get(i)`.
//! - [`TupleStream`] needs only [`IterableSequence`]s and yields the same
//!   tuples lazily, in the same order.
//!
//! Every tuple space is ordered the same way: read the tuple as a number
//! whose most significant digit is the last position.

pub mod count;
pub mod cursor;
pub mod dims;
pub mod error;
pub mod policy;
pub mod rank;
pub mod seq;
pub mod stream;
pub mod view;

// Re-export key types at crate root for convenience.
pub use cursor::{Cursor, Tuples};
pub use dims::DimensionSet;
pub use error::{JoinError, Result};
pub use policy::Policy;
pub use rank::Indexer;
pub use seq::{IndexableSequence, IterableSequence};
pub use stream::TupleStream;
pub use view::{TupleView, join, join_all};

/// Items intended for glob-import: `use joinery_core::prelude::*;`
pub mod prelude {
    pub use crate::dims::DimensionSet;
    pub use crate::error::{JoinError, Result};
    pub use crate::policy::Policy;
    pub use crate::rank::Indexer;
    pub use crate::seq::{IndexableSequence, IterableSequence};
    pub use crate::stream::TupleStream;
    pub use crate::view::{TupleView, join, join_all};
}
