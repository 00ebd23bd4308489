//! Quadratic extension `F[i] / (i² + 1)`.

use crate::{CurveField, Radix};
use alloc::string::String;
use core::{
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    ff::Field,
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

/// Element `c0 + c1·i` of a quadratic extension of `F`.
///
/// `-1` must not be a square in `F`, i.e. its modulus is `3 mod 4`. Elements
/// are encoded as `c1 || c0`. Parity follows `c0`, or `c1` when `c0` is zero;
/// the sign used by the ETH encoding is the sign of `c1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp2<F> {
    /// Real part.
    pub c0: F,

    /// Imaginary part.
    pub c1: F,
}

impl<F: CurveField> Fp2<F> {
    /// Create an element from its components.
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    /// `c0² + c1²`.
    pub fn norm(&self) -> F {
        self.c0.square() + self.c1.square()
    }

    /// `c0 - c1·i`.
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    fn scale(&self, k: &F) -> Self {
        Self::new(self.c0 * k, self.c1 * k)
    }
}

impl<F: CurveField> ConstantTimeEq for Fp2<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl<F: CurveField> ConditionallySelectable for Fp2<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            F::conditional_select(&a.c0, &b.c0, choice),
            F::conditional_select(&a.c1, &b.c1, choice),
        )
    }
}

impl<F: CurveField> Field for Fp2<F> {
    const ZERO: Self = Self::new(F::ZERO, F::ZERO);
    const ONE: Self = Self::new(F::ONE, F::ZERO);

    fn random(mut rng: impl RngCore) -> Self {
        Self::new(F::random(&mut rng), F::random(&mut rng))
    }

    fn square(&self) -> Self {
        *self * self
    }

    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    fn invert(&self) -> CtOption<Self> {
        self.norm()
            .invert()
            .map(|inv| self.conjugate().scale(&inv))
    }

    /// Square root via the norm: with `s² = c0² + c1²`, one of `(c0 ± s) / 2`
    /// is the square of the real part of the root.
    fn sqrt(&self) -> CtOption<Self> {
        let none = CtOption::new(Self::ZERO, Choice::from(0));

        if bool::from(self.c1.is_zero()) {
            if let Some(r) = Option::<F>::from(self.c0.sqrt()) {
                return CtOption::new(Self::new(r, F::ZERO), Choice::from(1));
            }
            return match Option::<F>::from((-self.c0).sqrt()) {
                Some(r) => CtOption::new(Self::new(F::ZERO, r), Choice::from(1)),
                None => none,
            };
        }

        let Some(s) = Option::<F>::from(self.norm().sqrt()) else {
            return none;
        };
        let Some(half) = Option::<F>::from(F::from_u64(2).invert()) else {
            return none;
        };

        let t = (self.c0 + s) * half;
        let x0 = match Option::<F>::from(t.sqrt()) {
            Some(x0) => x0,
            None => match Option::<F>::from(((self.c0 - s) * half).sqrt()) {
                Some(x0) => x0,
                None => return none,
            },
        };
        let Some(inv) = Option::<F>::from(x0.double().invert()) else {
            return none;
        };

        let root = Self::new(x0, self.c1 * inv);
        CtOption::new(root, root.square().ct_eq(self))
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        let ratio = div.invert().unwrap_or(Self::ZERO) * num;
        let root = ratio.sqrt();
        (root.is_some(), root.unwrap_or(Self::ZERO))
    }
}

impl<F: CurveField> CurveField for Fp2<F> {
    const MODULUS: &'static str = F::MODULUS;
    const BYTE_SIZE: usize = 2 * F::BYTE_SIZE;
    const BIT_SIZE: u32 = F::BIT_SIZE;

    fn from_u64(value: u64) -> Self {
        Self::new(F::from_u64(value), F::ZERO)
    }

    fn to_be_bytes(&self, out: &mut [u8]) {
        let (hi, lo) = out.split_at_mut(F::BYTE_SIZE);
        self.c1.to_be_bytes(hi);
        self.c0.to_be_bytes(lo);
    }

    fn from_be_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }

        let (hi, lo) = bytes.split_at(F::BYTE_SIZE);
        F::from_be_bytes(hi).and_then(|c1| F::from_be_bytes(lo).map(|c0| Self::new(c0, c1)))
    }

    fn is_odd(&self) -> Choice {
        F::conditional_select(&self.c0, &self.c1, self.c0.is_zero()).is_odd()
    }

    fn is_negative(&self) -> Choice {
        self.c1.is_negative()
    }

    fn write_text(&self, radix: Radix, separator: char, out: &mut String) {
        self.c0.write_text(radix, separator, out);
        out.push(separator);
        self.c1.write_text(radix, separator, out);
    }

    fn read_text<'a, I>(tokens: &mut I, radix: Radix) -> Option<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let c0 = F::read_text(tokens, radix)?;
        let c1 = F::read_text(tokens, radix)?;
        Some(Self::new(c0, c1))
    }
}

impl<F: CurveField> Add for Fp2<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<F: CurveField> Sub for Fp2<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<F: CurveField> Mul for Fp2<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.c0 * rhs.c0 - self.c1 * rhs.c1,
            self.c0 * rhs.c1 + self.c1 * rhs.c0,
        )
    }
}

impl<F: CurveField> Neg for Fp2<F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

macro_rules! impl_ref_ops {
    ($($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident);+ $(;)?) => {$(
        impl<F: CurveField> $op<&Fp2<F>> for Fp2<F> {
            type Output = Self;

            fn $op_fn(self, rhs: &Self) -> Self {
                $op::$op_fn(self, *rhs)
            }
        }

        impl<F: CurveField> $op<&Fp2<F>> for &Fp2<F> {
            type Output = Fp2<F>;

            fn $op_fn(self, rhs: &Fp2<F>) -> Fp2<F> {
                $op::$op_fn(*self, *rhs)
            }
        }

        impl<F: CurveField> $assign for Fp2<F> {
            fn $assign_fn(&mut self, rhs: Self) {
                *self = $op::$op_fn(*self, rhs);
            }
        }

        impl<F: CurveField> $assign<&Fp2<F>> for Fp2<F> {
            fn $assign_fn(&mut self, rhs: &Self) {
                *self = $op::$op_fn(*self, *rhs);
            }
        }
    )+};
}

impl_ref_ops!(
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
);

impl<F: CurveField> Sum for Fp2<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a, F: CurveField> Sum<&'a Fp2<F>> for Fp2<F> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<F: CurveField> Product for Fp2<F> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a, F: CurveField> Product<&'a Fp2<F>> for Fp2<F> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}
