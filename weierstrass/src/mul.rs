//! Scalar multiplication.

use crate::{
    field::{CurveField, CurveScalar},
    lookup_table::LookupTable,
    naf::{add_digit, odd_multiples, window_width, wnaf},
    point::Point,
};
use core::slice;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

impl<'c, F, S> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Returns `[k] self` in variable time.
    pub fn mul(&self, k: &S) -> Self {
        self.mul_with(k, false)
    }

    /// Returns `[k] self` with a fixed sequence of group operations.
    ///
    /// The number of doublings and additions and the table scans don't depend
    /// on `k`. The additions themselves still branch on identity inputs and on
    /// `z == 1`, so timing is not independent of `k`.
    pub fn mul_ct(&self, k: &S) -> Self {
        self.mul_with(k, true)
    }

    /// Returns `[k] self`, using the installed
    /// [`GlvMul`](crate::hooks::GlvMul) if any.
    pub fn mul_with(&self, k: &S, constant_time: bool) -> Self {
        if let Some(glv) = &self.curve.glv {
            if let Some(p) = glv.mul_vec(slice::from_ref(self), slice::from_ref(k), constant_time) {
                return p;
            }
        }
        self.mul_uint(&k.to_biguint(), false, constant_time)
    }

    /// Returns `[k] self` for a signed machine integer.
    pub fn mul_i64(&self, k: i64) -> Self {
        self.mul_uint(&BigUint::from(k.unsigned_abs()), k < 0, false)
    }

    /// Returns `[k] self` for an unreduced signed integer.
    pub fn mul_bigint(&self, k: &BigInt, constant_time: bool) -> Self {
        self.mul_uint(k.magnitude(), k.sign() == Sign::Minus, constant_time)
    }

    /// Returns `[±k] self` for an unreduced integer.
    ///
    /// The variable time path uses addition chains up to 16 and a
    /// width-`w` NAF beyond. The constant time path always scans whole 64-bit
    /// limbs, at least as many as the scalar field needs.
    pub fn mul_uint(&self, k: &BigUint, negative: bool, constant_time: bool) -> Self {
        let p = if constant_time {
            self.mul_fixed_window(k)
        } else if k.is_zero() {
            return self.curve.identity();
        } else if let Some(p) = k.to_u64().and_then(|k| self.mul_small(k)) {
            p
        } else {
            self.mul_wnaf(k)
        };

        if negative { p.neg() } else { p }
    }

    /// Addition chains for `0 <= k <= 16`.
    fn mul_small(&self, k: u64) -> Option<Self> {
        let x = self;
        let p = match k {
            0 => self.curve.identity(),
            1 => *x,
            2 => x.double(),
            3 => x.double().add(x),
            4 => x.double().double(),
            5 => x.double().double().add(x),
            6 => x.double().add(x).double(),
            7 => x.double().double().double().sub(x),
            8 => x.double().double().double(),
            9 => x.double().double().double().add(x),
            10 => x.double().double().add(x).double(),
            11 => {
                let x2 = x.double();
                x2.double().double().add(&x2).add(x)
            }
            12 => {
                let x4 = x.double().double();
                x4.add(&x4.double())
            }
            13 => {
                let x4 = x.double().double();
                x4.add(&x4.double()).add(x)
            }
            14 => x.double().double().double().sub(x).double(),
            15 => x.double().double().double().double().sub(x),
            16 => x.double().double().double().double(),
            _ => return None,
        };
        Some(p)
    }

    fn mul_wnaf(&self, k: &BigUint) -> Self {
        let w = window_width(k);
        let digits = wnaf(k, w);
        let table = odd_multiples(self, w);

        let mut acc = self.curve.identity();
        for &digit in digits.iter().rev() {
            acc = acc.double();
            add_digit(&mut acc, &table, digit);
        }
        acc
    }

    /// Width-4 window over every nibble of at least `S::NUM_BITS` bits, with a
    /// full table scan per window. Zero windows add the identity, which takes
    /// the early return of the addition formulas.
    fn mul_fixed_window(&self, k: &BigUint) -> Self {
        let limbs = (S::NUM_BITS as u64).max(k.bits()).div_ceil(64).max(1) as usize;
        let mut bytes = k.to_bytes_le();
        bytes.resize(limbs * 8, 0);

        let table = LookupTable::new(self);
        let mut q = self.curve.identity();
        let mut pos = limbs * 64 - 4;

        loop {
            let slot = (bytes[pos >> 3] >> (pos & 7)) & 0xf;
            q = q.add(&table.select(slot));

            if pos == 0 {
                break;
            }

            q = q.double().double().double().double();
            pos -= 4;
        }

        q
    }
}
