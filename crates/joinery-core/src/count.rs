//! Closed-form cardinalities of tuple spaces.
//!
//! Every helper uses checked arithmetic and returns `None` once the exact
//! value no longer fits in a `u64`. [`count`] lifts that into
//! [`JoinError::Overflow`].

use crate::dims::DimensionSet;
use crate::error::{JoinError, Result};
use crate::policy::Policy;

/// Binomial coefficient `C(n, k)`, `0` when `k > n`.
///
/// Uses the multiplicative formula with a `u128` intermediate. Each partial
/// value is itself a binomial no larger than the result, so `None` means the
/// result really overflows.
///
/// ```
/// use joinery_core::count::binomial;
/// assert_eq!(binomial(5, 3), Some(10));
/// assert_eq!(binomial(3, 5), Some(0));
/// assert_eq!(binomial(200, 100), None);
/// ```
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 1..=u128::from(k) {
        acc = acc * (u128::from(n - k) + i) / i;
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(acc).ok()
}

/// Falling factorial `n (n-1) ... (n-k+1)`, `0` when `k > n`.
pub fn falling_factorial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    ((n - k + 1)..=n).try_fold(1u64, u64::checked_mul)
}

/// `n^k` with overflow detection.
pub fn checked_pow(n: u64, k: u64) -> Option<u64> {
    match n {
        0 => Some(u64::from(k == 0)),
        1 => Some(1),
        _ => n.checked_pow(u32::try_from(k).ok()?),
    }
}

/// Product of all sizes; `1` for an empty slice.
pub fn product(sizes: &[usize]) -> Option<u64> {
    sizes
        .iter()
        .try_fold(1u64, |acc, &n| acc.checked_mul(n as u64))
}

/// Number of tuples in the space described by `dims`.
pub fn count(dims: &DimensionSet) -> Result<u64> {
    let value = match *dims {
        DimensionSet::Product { ref sizes } => product(sizes),
        DimensionSet::Power { n, k, policy } => {
            let (n, k) = (n as u64, k as u64);
            match policy {
                Policy::Full => checked_pow(n, k),
                // Dimension sets guarantee `n > 0`.
                Policy::Multiset => (n - 1).checked_add(k).and_then(|m| binomial(m, k)),
                Policy::Combination => binomial(n, k),
                Policy::Arrangement => falling_factorial(n, k),
            }
        }
    };
    value.ok_or(JoinError::Overflow)
}
