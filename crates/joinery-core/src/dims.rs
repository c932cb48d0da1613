//! Dimension metadata for a join: how many positions, and the domain of each.

use crate::error::{JoinError, Result};
use crate::policy::Policy;

/// The shape of a tuple space.
///
/// Both variants are validated on construction (every size is non-zero,
/// products have at least one dimension) and are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "lowercase", try_from = "serde_impl::RawDimensionSet")
)]
pub enum DimensionSet {
    /// Heterogeneous join: position `i` ranges over `0..sizes[i]`.
    #[non_exhaustive]
    Product { sizes: Vec<usize> },

    /// Homogeneous join: `k` positions over `0..n`, constrained by `policy`.
    #[non_exhaustive]
    Power { n: usize, k: usize, policy: Policy },
}

impl DimensionSet {
    /// Build a heterogeneous (mixed-radix) dimension set.
    pub fn product(sizes: Vec<usize>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(JoinError::Construction {
                reason: "a product join needs at least one source",
            });
        }
        if sizes.contains(&0) {
            return Err(JoinError::Construction {
                reason: "every source must have at least one element",
            });
        }
        Ok(Self::Product { sizes })
    }

    /// Build a homogeneous dimension set of arity `k` over `n` values.
    pub fn power(n: usize, k: usize, policy: Policy) -> Result<Self> {
        if n == 0 {
            return Err(JoinError::Construction {
                reason: "source must have at least one element",
            });
        }
        Ok(Self::Power { n, k, policy })
    }

    /// Number of positions in every tuple.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Self::Product { sizes } => sizes.len(),
            Self::Power { k, .. } => *k,
        }
    }

    /// Size of the domain at position `pos`, or `None` past the arity.
    pub fn size_at(&self, pos: usize) -> Option<usize> {
        match self {
            Self::Product { sizes } => sizes.get(pos).copied(),
            Self::Power { n, k, .. } => (pos < *k).then_some(*n),
        }
    }

    /// The effective policy; products always behave as [`Policy::Full`].
    #[inline]
    pub fn policy(&self) -> Policy {
        match self {
            Self::Product { .. } => Policy::Full,
            Self::Power { policy, .. } => *policy,
        }
    }

    /// Number of tuples; see [`crate::count::count`].
    pub fn count(&self) -> Result<u64> {
        crate::count::count(self)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{DimensionSet, JoinError, Policy};

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub(super) enum RawDimensionSet {
        Product { sizes: Vec<usize> },
        Power { n: usize, k: usize, policy: Policy },
    }

    impl TryFrom<RawDimensionSet> for DimensionSet {
        type Error = JoinError;

        fn try_from(raw: RawDimensionSet) -> Result<Self, Self::Error> {
            match raw {
                RawDimensionSet::Product { sizes } => DimensionSet::product(sizes),
                RawDimensionSet::Power { n, k, policy } => DimensionSet::power(n, k, policy),
            }
        }
    }
}
