//! Mixed-radix rank/unrank, position 0 least significant.

use crate::error::{JoinError, Result};

/// Write the digits of `index` into `out`, one per size.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn unrank<I>(mut index: u64, sizes: I, out: &mut [usize])
where
    I: Iterator<Item = usize>,
{
    for (slot, n) in out.iter_mut().zip(sizes) {
        let n = n as u64;
        *slot = (index % n) as usize;
        index /= n;
    }
}

/// Inverse of [`unrank`]. Every place value is bounded by the product of
/// all sizes, so the checked steps only fail if that product overflows.
pub(crate) fn rank<I>(tuple: &[usize], sizes: I) -> Result<u64>
where
    I: Iterator<Item = usize>,
{
    let mut acc = 0u64;
    let mut place = 1u64;
    for (&digit, n) in tuple.iter().zip(sizes) {
        if digit >= n {
            return Err(JoinError::InvalidTuple {
                reason: "digit exceeds the size of its dimension",
            });
        }
        acc = (digit as u64)
            .checked_mul(place)
            .and_then(|v| v.checked_add(acc))
            .ok_or(JoinError::Overflow)?;
        place = place.checked_mul(n as u64).ok_or(JoinError::Overflow)?;
    }
    Ok(acc)
}
