//! Combinatorial number system for strict combinations and multisets.
//!
//! Subsets are enumerated in lexicographic order of their ascending form and
//! reported in decreasing order, so `t[0]` is the largest element. Writing
//! `b = n - 1 - a` for each ascending element `a` turns lexicographic rank
//! into the reversed colex rank `C(n, k) - 1 - sum C(b_j, k - j)`, which is
//! what the greedy decomposition below computes.
//!
//! Multisets reduce to combinations through stars and bars: the entry at
//! position `p` is shifted up by `k - 1 - p`, giving a strictly decreasing
//! tuple over `n + k - 1` values with the same lexicographic order.

use crate::count::binomial;
use crate::error::{JoinError, Result};

/// Unrank a strictly decreasing `out.len()`-subset of `0..n`.
///
/// `count` must be `C(n, k)` and `index < count`.
pub(crate) fn unrank(index: u64, n: usize, count: u64, out: &mut [usize]) {
    let k = out.len();
    let mut budget = count - 1 - index;
    let mut upper = n;
    for j in 0..k {
        let i = (k - j) as u64;
        let b = largest_within(budget, i, k - j - 1, upper - 1);
        // `b < upper`, so C(b, i) <= budget is already known to fit.
        budget -= binomial(b as u64, i).unwrap_or(0);
        upper = b;
        out[k - 1 - j] = n - 1 - b;
    }
}

/// Rank a strictly decreasing tuple over `0..n`.
pub(crate) fn rank(tuple: &[usize], n: usize, count: u64) -> Result<u64> {
    let k = tuple.len();
    if let Some(&first) = tuple.first() {
        if first >= n {
            return Err(JoinError::InvalidTuple {
                reason: "digit exceeds the size of its dimension",
            });
        }
    }
    if tuple.windows(2).any(|w| w[0] <= w[1]) {
        return Err(JoinError::InvalidTuple {
            reason: "combination tuples must be strictly decreasing",
        });
    }
    let mut sum = 0u64;
    for (j, &t) in tuple.iter().rev().enumerate() {
        let b = (n - 1 - t) as u64;
        sum += binomial(b, (k - j) as u64).ok_or(JoinError::Overflow)?;
    }
    Ok(count - 1 - sum)
}

/// Unrank a non-increasing `out.len()`-multiset of `0..n`.
///
/// `count` must be `C(n + k - 1, k)`.
pub(crate) fn unrank_multiset(index: u64, n: usize, count: u64, out: &mut [usize]) {
    let k = out.len();
    unrank(index, n + k - 1, count, out);
    for (p, slot) in out.iter_mut().enumerate() {
        *slot -= k - 1 - p;
    }
}

/// Rank a non-increasing tuple over `0..n`.
pub(crate) fn rank_multiset(tuple: &[usize], n: usize, count: u64) -> Result<u64> {
    let k = tuple.len();
    if let Some(&first) = tuple.first() {
        if first >= n {
            return Err(JoinError::InvalidTuple {
                reason: "digit exceeds the size of its dimension",
            });
        }
    }
    if tuple.windows(2).any(|w| w[0] < w[1]) {
        return Err(JoinError::InvalidTuple {
            reason: "multiset tuples must be non-increasing",
        });
    }
    let shifted: Vec<usize> = tuple
        .iter()
        .enumerate()
        .map(|(p, &t)| t + (k - 1 - p))
        .collect();
    rank(&shifted, n + k - 1, count)
}

/// Largest `b` in `lo..=hi` with `C(b, i) <= budget`.
///
/// `C(lo, i)` is zero whenever `lo < i`, so `lo` always qualifies.
fn largest_within(budget: u64, i: u64, lo: usize, hi: usize) -> usize {
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        match binomial(mid as u64, i) {
            Some(c) if c <= budget => lo = mid,
            _ => hi = mid - 1,
        }
    }
    lo
}
