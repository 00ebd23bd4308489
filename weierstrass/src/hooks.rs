//! Replaceable routines.
//!
//! Curves with extra structure (an efficient endomorphism, a cheap subgroup
//! test, a tuned multi-scalar multiply) can install these on a
//! [`Curve`](crate::Curve). When a hook is absent the generic algorithms run.
//! Any installed hook must compute exactly what the generic routine computes.

use crate::{
    field::{CurveField, CurveScalar},
    msm::MAX_MUL_VEC_N,
    point::Point,
};
use alloc::vec::Vec;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

const SECP256K1_P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
const SECP256K1_N: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
const SECP256K1_BETA: &str = "7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee";
const SECP256K1_LAMBDA: &str = "5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72";

/// Subgroup membership test replacing the generic `[order]P == 0` check.
pub trait OrderCheck<F, S>: Send + Sync
where
    F: CurveField,
    S: CurveScalar,
{
    /// Whether `point` lies in the prime order subgroup.
    fn is_in_subgroup(&self, point: &Point<'_, F, S>) -> bool;
}

/// Scalar multiplication using an endomorphism.
pub trait GlvMul<F, S>: Send + Sync
where
    F: CurveField,
    S: CurveScalar,
{
    /// Compute `Σ scalars[i] * points[i]`.
    ///
    /// Called with one point for plain scalar multiplication. Returning
    /// `None` falls back to the generic algorithm.
    fn mul_vec<'c>(
        &self,
        points: &[Point<'c, F, S>],
        scalars: &[S],
        constant_time: bool,
    ) -> Option<Point<'c, F, S>>;
}

/// Multi-scalar multiplication for large inputs.
pub trait MulVecAccel<F, S>: Send + Sync
where
    F: CurveField,
    S: CurveScalar,
{
    /// Smallest input length worth handing to [`MulVecAccel::mul_vec`].
    fn min_len(&self) -> usize {
        128
    }

    /// Compute `Σ scalars[i] * points[i]`.
    fn mul_vec<'c>(&self, points: &[Point<'c, F, S>], scalars: &[S]) -> Point<'c, F, S>;
}

/// Element-wise scalar multiplication.
pub trait MulEachAccel<F, S>: Send + Sync
where
    F: CurveField,
    S: CurveScalar,
{
    /// Replace each `points[i]` with `scalars[i] * points[i]`.
    ///
    /// Only ever called with a multiple of 16 elements.
    fn mul_each(&self, points: &mut [Point<'_, F, S>], scalars: &[S]);
}

/// GLV multiplication for curves with an endomorphism `φ(x, y) = (βx, y)`
/// acting as `[λ]` on the prime order subgroup.
///
/// Every scalar `k` is split into `k₁ + k₂λ` with both halves about half the
/// size of the order, and `[k₁]P + [k₂]φ(P)` runs on one doubling chain.
/// Constant time requests are declined.
#[derive(Clone, Debug)]
pub struct Endomorphism<F> {
    beta: F,
    order: BigInt,
    /// Short vectors `(a, b)` with `a + bλ ≡ 0 (mod n)`.
    basis: [(BigInt, BigInt); 2],
}

impl<F: CurveField> Endomorphism<F> {
    /// Returns `None` unless `0 < λ < order`.
    ///
    /// `β` and `λ` must belong together: `[λ]P = (βx, y)` for every point of
    /// the subgroup.
    pub fn new(beta: F, lambda: &BigUint, order: &BigUint) -> Option<Self> {
        if lambda.is_zero() || lambda >= order {
            return None;
        }

        let order = BigInt::from(order.clone());
        let basis = reduced_basis(&BigInt::from(lambda.clone()), &order);
        Some(Self { beta, order, basis })
    }

    /// The endomorphism of secp256k1, if `p` and `n` are its moduli.
    pub fn secp256k1(p: &BigUint, n: &BigUint) -> Option<Self> {
        if *p != parse_hex(SECP256K1_P)? || *n != parse_hex(SECP256K1_N)? {
            return None;
        }
        let beta = F::from_uint(&parse_hex(SECP256K1_BETA)?)?;
        Self::new(beta, &parse_hex(SECP256K1_LAMBDA)?, n)
    }

    /// Split `k` into `(k₁, k₂)` with `k ≡ k₁ + k₂λ (mod n)`.
    pub fn decompose(&self, k: &BigUint) -> (BigInt, BigInt) {
        let k = BigInt::from(k.clone());
        let [(a1, b1), (a2, b2)] = &self.basis;

        let c1 = div_round(&(b2 * &k), &self.order);
        let c2 = div_round(&-(b1 * &k), &self.order);

        let k1 = &k - &c1 * a1 - &c2 * a2;
        let k2 = -(&c1 * b1) - &c2 * b2;
        (k1, k2)
    }
}

impl<F, S> GlvMul<F, S> for Endomorphism<F>
where
    F: CurveField,
    S: CurveScalar,
{
    fn mul_vec<'c>(
        &self,
        points: &[Point<'c, F, S>],
        scalars: &[S],
        constant_time: bool,
    ) -> Option<Point<'c, F, S>> {
        if constant_time {
            return None;
        }

        let curve = points.first()?.curve();
        let n = points.len().min(scalars.len());
        let mut bases = Vec::with_capacity(2 * n);
        let mut magnitudes = Vec::with_capacity(2 * n);

        for (p, k) in points.iter().zip(scalars) {
            let (k1, k2) = self.decompose(&k.to_biguint());
            let phi = curve.from_coordinates(*p.x() * self.beta, *p.y(), *p.z());

            for (base, half) in [(*p, k1), (phi, k2)] {
                bases.push(if half.sign() == Sign::Minus {
                    base.neg()
                } else {
                    base
                });
                magnitudes.push(half.magnitude().clone());
            }
        }

        let sum = bases
            .chunks(MAX_MUL_VEC_N)
            .zip(magnitudes.chunks(MAX_MUL_VEC_N))
            .fold(curve.identity(), |acc, (p, k)| acc.add(&curve.mul_vec_uint(p, k)));
        Some(sum)
    }
}

fn parse_hex(hex: &str) -> Option<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16)
}

/// Reduced basis of `{(a, b) : a + bλ ≡ 0 (mod n)}` from the extended
/// Euclidean algorithm on `(n, λ)`.
fn reduced_basis(lambda: &BigInt, n: &BigInt) -> [(BigInt, BigInt); 2] {
    // r[i] ≡ t[i]·λ (mod n)
    let mut r = Vec::from([n.clone(), lambda.clone()]);
    let mut t = Vec::from([BigInt::zero(), BigInt::one()]);

    while let [.., prev, last] = r.as_slice() {
        if last.is_zero() {
            break;
        }
        let q = prev / last;
        let next_r = prev - &q * last;
        let i = t.len();
        let next_t = &t[i - 2] - &q * &t[i - 1];
        r.push(next_r);
        t.push(next_t);
    }

    // last index with r² ≥ n; r[0] = n qualifies and the final zero doesn't
    let l = (0..r.len()).rev().find(|&i| &r[i] * &r[i] >= *n).unwrap_or(0);
    let vector = |i: usize| (r[i].clone(), -t[i].clone());

    let first = vector(l + 1);
    let norm = |i: usize| &r[i] * &r[i] + &t[i] * &t[i];
    let second = if l + 2 < r.len() && norm(l) > norm(l + 2) {
        vector(l + 2)
    } else {
        vector(l)
    };

    [first, second]
}

/// `x / d` rounded to the nearest integer, for `d > 0`.
fn div_round(x: &BigInt, d: &BigInt) -> BigInt {
    let num = x + x + d;
    let den = d + d;
    let q = &num / &den;
    if num.sign() == Sign::Minus && !(&num % &den).is_zero() {
        q - BigInt::one()
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::{Mode, init_curve},
        dev::{SECP256K1, Secp256k1Fp, Secp256k1Fr, TOY, ToyFp, ToyFr},
    };
    use elliptic_curve::ff::Field;
    use rand_core::OsRng;

    fn secp256k1_order() -> BigUint {
        parse_hex(SECP256K1_N).unwrap()
    }

    fn endomorphism() -> Endomorphism<Secp256k1Fp> {
        Endomorphism::secp256k1(&parse_hex(SECP256K1_P).unwrap(), &secp256k1_order()).unwrap()
    }

    #[test]
    fn basis_matches_known_vectors() {
        let glv = endomorphism();
        let hex = |s: &str| BigInt::parse_bytes(s.as_bytes(), 16).unwrap();
        let a1 = hex("3086d221a7d46bcde86c90e49284eb15");
        let b1 = -hex("e4437ed6010e88286f547fa90abfe4c3");
        let a2 = hex("114ca50f7a8e2f3f657c1108d9d44cfd8");
        assert_eq!(glv.basis, [(a1.clone(), b1), (a2, a1)]);
    }

    #[test]
    fn decomposition_recombines_with_short_halves() {
        let glv = endomorphism();
        let n = BigInt::from(secp256k1_order());
        let lambda = BigInt::from(parse_hex(SECP256K1_LAMBDA).unwrap());

        for _ in 0..64 {
            let k = Secp256k1Fr::random(&mut OsRng).to_biguint();
            let (k1, k2) = glv.decompose(&k);
            assert!(k1.bits() <= 129 && k2.bits() <= 129);

            let sum = ((k1 + k2 * &lambda) % &n + &n) % &n;
            assert_eq!(sum, BigInt::from(k));
        }
    }

    #[test]
    fn div_round_rounds_to_nearest() {
        let d = BigInt::from(4);
        for (x, q) in [(5, 1), (6, 2), (7, 2), (-5, -1), (-6, -1), (-7, -2), (0, 0)] {
            assert_eq!(div_round(&BigInt::from(x), &d), BigInt::from(q), "{x}");
        }
    }

    #[test]
    fn rejects_other_curves_and_bad_lambda() {
        let order = secp256k1_order();
        assert!(Endomorphism::<ToyFp>::secp256k1(&BigUint::from(1009u32), &order).is_none());
        assert!(Endomorphism::new(ToyFp::ONE, &BigUint::zero(), &order).is_none());
        assert!(Endomorphism::new(ToyFp::ONE, &order, &order).is_none());

        let toy = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Jacobi).unwrap();
        assert!(toy.glv.is_none());
    }

    #[test]
    fn installed_for_secp256k1() {
        for mode in [Mode::Jacobi, Mode::Projective, Mode::Affine] {
            let curve = init_curve::<Secp256k1Fp, Secp256k1Fr>(&SECP256K1, mode).unwrap();
            assert!(curve.glv.is_some());

            let g = curve.generator().unwrap();
            let p = g.double().double() + g;
            for k in [
                Secp256k1Fr::ZERO,
                Secp256k1Fr::ONE,
                -Secp256k1Fr::ONE,
                Secp256k1Fr::random(&mut OsRng),
            ] {
                let plain = p.mul_uint(&k.to_biguint(), false, false);
                assert_eq!(p.mul(&k), plain);
                assert_eq!(p.mul_ct(&k), plain);
            }

            let points = [g, p, g.double()];
            let scalars: Vec<_> = (0..3).map(|_| Secp256k1Fr::random(&mut OsRng)).collect();
            let expected = points
                .iter()
                .zip(&scalars)
                .fold(curve.identity(), |acc, (p, k)| {
                    acc + p.mul_uint(&k.to_biguint(), false, false)
                });
            assert_eq!(curve.mul_vec(&points, &scalars), expected);
        }
    }
}
