//! Installing hooks must not change any result.

#![cfg(feature = "dev")]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use rand_core::OsRng;
use weierstrass::{
    CurveScalar, Format, Mode, Point, init_curve,
    dev::{SECP256K1, Secp256k1Fp, Secp256k1Fr, TOY, ToyFp, ToyFr},
    ff::Field,
    hooks::{GlvMul, MulEachAccel, MulVecAccel, OrderCheck},
};

type K1Point<'c> = Point<'c, Secp256k1Fp, Secp256k1Fr>;
type ToyPoint<'c> = Point<'c, ToyFp, ToyFr>;

/// `[λ]P = (βx, y)` on secp256k1.
const LAMBDA: &str = "5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72";
const BETA: &str = "7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee";

#[derive(Default, Clone)]
struct Counter(Arc<AtomicUsize>);

impl Counter {
    fn bump(&self, n: usize) {
        self.0.fetch_add(n, Ordering::SeqCst);
    }

    fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Splits `k = (k - λ) + λ` and uses the endomorphism for the second half.
/// Declines constant time requests.
struct LambdaSplit {
    calls: Counter,
}

impl GlvMul<Secp256k1Fp, Secp256k1Fr> for LambdaSplit {
    fn mul_vec<'c>(
        &self,
        points: &[K1Point<'c>],
        scalars: &[Secp256k1Fr],
        constant_time: bool,
    ) -> Option<K1Point<'c>> {
        if constant_time {
            return None;
        }
        self.calls.bump(1);

        let curve = points.first()?.curve();
        let lambda = Secp256k1Fr::from_hex(LAMBDA)?;
        let beta = Secp256k1Fp::from_hex(BETA)?;

        let mut acc = curve.identity();
        for (p, k) in points.iter().zip(scalars) {
            let phi = curve.from_coordinates(*p.x() * beta, *p.y(), *p.z());
            let k1 = (*k - lambda).to_biguint();
            acc = acc + p.mul_uint(&k1, false, false) + phi;
        }
        Some(acc)
    }
}

struct NaiveMulVec {
    calls: Counter,
}

impl MulVecAccel<ToyFp, ToyFr> for NaiveMulVec {
    fn min_len(&self) -> usize {
        4
    }

    fn mul_vec<'c>(&self, points: &[ToyPoint<'c>], scalars: &[ToyFr]) -> ToyPoint<'c> {
        self.calls.bump(1);
        points
            .iter()
            .zip(scalars)
            .fold(points[0].curve().identity(), |acc, (p, k)| {
                acc + p.mul_uint(&k.to_biguint(), false, false)
            })
    }
}

struct NaiveMulEach {
    elements: Counter,
}

impl MulEachAccel<ToyFp, ToyFr> for NaiveMulEach {
    fn mul_each(&self, points: &mut [ToyPoint<'_>], scalars: &[ToyFr]) {
        assert_eq!(points.len() % 16, 0);
        self.elements.bump(points.len());
        for (p, k) in points.iter_mut().zip(scalars) {
            *p = p.mul_uint(&k.to_biguint(), false, true);
        }
    }
}

/// `P ∈ ⟨G⟩ ⇔ [350]P = P` on the toy curve.
struct ShiftedOrder {
    calls: Counter,
}

impl OrderCheck<ToyFp, ToyFr> for ShiftedOrder {
    fn is_in_subgroup(&self, point: &ToyPoint<'_>) -> bool {
        self.calls.bump(1);
        point.mul_i64(350) == *point
    }
}

#[test]
fn glv_hook() {
    let plain = init_curve::<Secp256k1Fp, Secp256k1Fr>(&SECP256K1, Mode::Jacobi).unwrap();
    let mut curve = init_curve::<Secp256k1Fp, Secp256k1Fr>(&SECP256K1, Mode::Jacobi).unwrap();
    let calls = Counter::default();
    curve.set_glv(LambdaSplit {
        calls: calls.clone(),
    });

    let g = curve.generator().unwrap();
    let k = Secp256k1Fr::random(&mut OsRng);
    let expected = plain
        .generator()
        .unwrap()
        .mul_uint(&k.to_biguint(), false, false)
        .to_affine();

    assert_eq!(g.mul(&k).to_affine(), expected);
    assert_eq!(calls.get(), 1);

    // declined, so the generic path runs
    assert_eq!(g.mul_ct(&k).to_affine(), expected);
    assert_eq!(calls.get(), 1);

    let points = [g, g.double()];
    let scalars = [k, k.double()];
    let sum = curve.mul_vec(&points, &scalars);
    assert_eq!(sum, g.mul(&(k * Secp256k1Fr::from(5))));
    assert_eq!(calls.get(), 3);
}

#[test]
fn mul_vec_hook_above_threshold() {
    let mut curve = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Projective).unwrap();
    let calls = Counter::default();
    curve.set_mul_vec_accel(NaiveMulVec {
        calls: calls.clone(),
    });

    let g = curve.generator().unwrap();
    let points: Vec<_> = (1..=6).map(|i| g.mul_i64(i)).collect();
    let scalars: Vec<_> = (1..=6u64).map(ToyFr::from).collect();

    // 1 + 4 + 9 + 16 + 25 + 36
    assert_eq!(curve.mul_vec(&points, &scalars), g.mul_i64(91));
    assert_eq!(calls.get(), 1);

    assert_eq!(curve.mul_vec(&points[..3], &scalars[..3]), g.mul_i64(14));
    assert_eq!(calls.get(), 1);

    assert_eq!(curve.mul_vec_mt(&points, &scalars, 2), g.mul_i64(91));
}

#[test]
fn mul_each_hook_gets_aligned_prefix() {
    let mut curve = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Jacobi).unwrap();
    let elements = Counter::default();
    curve.set_mul_each_accel(NaiveMulEach {
        elements: elements.clone(),
    });

    let g = curve.generator().unwrap();
    let mut points: Vec<_> = (0..37).map(|i| g.mul_i64(i)).collect();
    let scalars: Vec<_> = (0..37u64).map(|k| ToyFr::from(k + 2)).collect();
    let expected: Vec<_> = points.iter().zip(&scalars).map(|(p, k)| p.mul(k)).collect();

    curve.mul_each(&mut points, &scalars);
    assert_eq!(points, expected);
    assert_eq!(elements.get(), 32);

    curve.mul_each(&mut points[..15], &scalars[..15]);
    assert_eq!(elements.get(), 32);
}

#[test]
fn order_check_hook() {
    let mut curve = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Affine).unwrap();
    let calls = Counter::default();
    curve.set_order_check(ShiftedOrder {
        calls: calls.clone(),
    });
    curve.set_order(curve.order().clone());

    let g = curve.generator().unwrap();
    assert!(g.is_in_subgroup());

    // order 3
    let t = curve.point_unchecked(ToyFp::from(471), ToyFp::from(159));
    assert!(!t.is_in_subgroup());
    assert!(!t.is_valid());

    let bytes = t.encode(Format::Compressed).unwrap();
    assert!(curve.decode(&bytes, Format::Compressed).is_err());
    assert!(calls.get() >= 4);
}
