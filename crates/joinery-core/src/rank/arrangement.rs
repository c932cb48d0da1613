//! Rank/unrank of k-arrangements (ordered selections of distinct values).
//!
//! Reading the tuple from its last position down, each position picks the
//! `d`-th smallest value not yet taken. The digit `d` at reversed position
//! `j` is weighted by the falling factorial `F(n - 1 - j, k - 1 - j)`, the
//! number of ways to fill the remaining positions.

use smallvec::SmallVec;

use crate::error::{JoinError, Result};

type Taken = SmallVec<[usize; 8]>;

/// Unrank into `out`; `count` must be `F(n, k)` and `index < count`.
pub(crate) fn unrank(index: u64, n: usize, count: u64, out: &mut [usize]) {
    let k = out.len();
    let mut taken = Taken::with_capacity(k);
    let mut rem = index;
    let mut weight = count / n as u64;
    for j in 0..k {
        #[allow(clippy::cast_possible_truncation)]
        let mut value = (rem / weight) as usize;
        rem %= weight;
        for &t in &taken {
            if t <= value {
                value += 1;
            } else {
                break;
            }
        }
        let at = taken.partition_point(|&t| t < value);
        taken.insert(at, value);
        out[k - 1 - j] = value;
        if j + 1 < k {
            weight /= (n - 1 - j) as u64;
        }
    }
}

/// Rank a tuple of pairwise distinct values in `0..n`.
pub(crate) fn rank(tuple: &[usize], n: usize, count: u64) -> Result<u64> {
    let k = tuple.len();
    let mut taken = Taken::with_capacity(k);
    let mut acc = 0u64;
    let mut weight = count / n as u64;
    for (j, &value) in tuple.iter().rev().enumerate() {
        if value >= n {
            return Err(JoinError::InvalidTuple {
                reason: "digit exceeds the size of its dimension",
            });
        }
        let at = match taken.binary_search(&value) {
            Ok(_) => {
                return Err(JoinError::InvalidTuple {
                    reason: "arrangement tuples must not repeat a value",
                });
            }
            Err(at) => at,
        };
        acc += (value - at) as u64 * weight;
        taken.insert(at, value);
        if j + 1 < k {
            weight /= (n - 1 - j) as u64;
        }
    }
    Ok(acc)
}
