//! Width-`w` non-adjacent form and the matching tables of odd multiples.

use crate::{
    field::{CurveField, CurveScalar},
    point::Point,
};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;

/// Window width for a scalar of the given magnitude.
pub(crate) fn window_width(k: &BigUint) -> usize {
    match k.bits() {
        0..=32 => 3,
        129.. => 5,
        _ => 4,
    }
}

/// Signed digits of `k`, least significant first.
///
/// Every non-zero digit is odd and lies in `(-2^(w-1), 2^(w-1))`, and any `w`
/// consecutive digits contain at most one non-zero digit.
pub(crate) fn wnaf(k: &BigUint, w: usize) -> Vec<i8> {
    debug_assert!((2..=7).contains(&w));

    let modulus = 1i64 << w;
    let half = modulus >> 1;
    let mask = (modulus - 1) as u64;

    let mut k = k.clone();
    let mut digits = Vec::with_capacity(k.bits() as usize + 1);

    while !k.is_zero() {
        let low = k.iter_u64_digits().next().unwrap_or(0);
        let mut d = 0i64;

        if low & 1 == 1 {
            d = (low & mask) as i64;
            if d >= half {
                d -= modulus;
            }
            if d > 0 {
                k -= d as u64;
            } else {
                k += d.unsigned_abs();
            }
        }

        digits.push(d as i8);
        k >>= 1u32;
    }

    digits
}

/// `[P, 3P, 5P, ...]` with `2^(w-2)` entries.
pub(crate) fn odd_multiples<'c, F, S>(p: &Point<'c, F, S>, w: usize) -> Vec<Point<'c, F, S>>
where
    F: CurveField,
    S: CurveScalar,
{
    let size = 1 << (w - 2);
    let mut table = Vec::with_capacity(size);
    table.push(*p);

    if size > 1 {
        let p2 = p.double();
        for i in 1..size {
            let next = table[i - 1].add(&p2);
            table.push(next);
        }
    }

    table
}

/// Add `digit * P` to `acc`, where `table` holds the odd multiples of `P`.
#[inline]
pub(crate) fn add_digit<'c, F, S>(acc: &mut Point<'c, F, S>, table: &[Point<'c, F, S>], digit: i8)
where
    F: CurveField,
    S: CurveScalar,
{
    if digit > 0 {
        *acc = acc.add(&table[(digit >> 1) as usize]);
    } else if digit < 0 {
        *acc = acc.sub(&table[(digit.unsigned_abs() >> 1) as usize]);
    }
}
