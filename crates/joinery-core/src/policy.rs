//! Symmetry policies for homogeneous joins.

use core::fmt;
use core::str::FromStr;

use crate::error::JoinError;

/// How the `k` positions of a homogeneous join relate to each other.
///
/// Heterogeneous joins always behave like [`Policy::Full`], since each
/// position already draws from its own source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Policy {
    /// Any value at any position; repetition and any order allowed.
    #[default]
    Full,
    /// Non-increasing tuples, repetition allowed (`t0 >= t1 >= ...`).
    Multiset,
    /// Strictly decreasing tuples (`t0 > t1 > ...`).
    Combination,
    /// Pairwise distinct values in any order.
    Arrangement,
}

impl Policy {
    /// Every policy, in declaration order.
    pub const ALL: [Policy; 4] = [
        Policy::Full,
        Policy::Multiset,
        Policy::Combination,
        Policy::Arrangement,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Multiset => "multiset",
            Self::Combination => "combination",
            Self::Arrangement => "arrangement",
        }
    }

    /// Whether the same value may appear at more than one position.
    #[inline]
    pub fn allows_repetition(self) -> bool {
        matches!(self, Self::Full | Self::Multiset)
    }

    /// Whether tuples are constrained to a single ordering of their values.
    #[inline]
    pub fn is_ordered(self) -> bool {
        matches!(self, Self::Multiset | Self::Combination)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = JoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JoinError::ParsePolicy {
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(Policy::default(), Policy::Full);
    }

    #[test]
    fn test_display_from_str() {
        for p in Policy::ALL {
            assert_eq!(p.to_string().parse::<Policy>().unwrap(), p);
        }
        assert_eq!(" Combination ".parse::<Policy>().unwrap(), Policy::Combination);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "permutation".parse::<Policy>().unwrap_err();
        assert_eq!(
            err,
            JoinError::ParsePolicy {
                input: "permutation".into()
            }
        );
    }

    #[test]
    fn test_flags() {
        assert!(Policy::Full.allows_repetition());
        assert!(Policy::Multiset.allows_repetition());
        assert!(!Policy::Combination.allows_repetition());
        assert!(!Policy::Arrangement.allows_repetition());
        assert!(Policy::Multiset.is_ordered());
        assert!(Policy::Combination.is_ordered());
        assert!(!Policy::Arrangement.is_ordered());
    }
}
