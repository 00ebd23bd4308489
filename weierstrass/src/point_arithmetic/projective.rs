//! Projective coordinates: `(x, y) = (X/Z, Y/Z)`.
//!
//! All formulas here are complete: they hold for every pair of inputs,
//! including equal points and the identity `(0, 1, 0)`, without branching on
//! the values. The only branch is on `Z₂ = 1`, which selects the cheaper
//! mixed addition.

use super::{PointArithmetic, is_zero};
use crate::{
    curve::{ClassA, ClassB, Curve},
    field::{CurveField, CurveScalar},
    point::{Point, Relation},
};
use elliptic_curve::ff::Field;

/// Complete formulas from [Renes-Costello-Batina 2015], specialized for
/// `a = 0`.
///
/// [Renes-Costello-Batina 2015]: https://eprint.iacr.org/2015/1060
pub(crate) struct Projective;

/// Returns `3b · t`.
#[inline]
fn mul_b3<F: CurveField, S: CurveScalar>(curve: &Curve<F, S>, t: F) -> F {
    match curve.class_b {
        ClassB::One => t.double() + t,
        ClassB::Four => (t.double() + t).double().double(),
        ClassB::Generic => curve.b3 * t,
    }
}

impl<F, S> PointArithmetic<F, S> for Projective
where
    F: CurveField,
    S: CurveScalar,
{
    fn add<'c>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S> {
        let curve = lhs.curve;
        match (curve.class_a, rhs.z == F::ONE) {
            (ClassA::Zero, false) => add_a0(lhs, rhs),
            (ClassA::Zero, true) => add_mixed_a0(lhs, rhs),
            (_, false) => add_generic(lhs, rhs),
            (_, true) => add_mixed_generic(lhs, rhs),
        }
    }

    fn double<'c>(point: &Point<'c, F, S>) -> Point<'c, F, S> {
        match point.curve.class_a {
            ClassA::Zero => double_a0(point),
            _ => double_generic(point),
        }
    }

    fn is_on_curve(point: &Point<'_, F, S>) -> bool {
        let curve = point.curve;
        let zz = point.z.square();
        let lhs = (point.y.square() - curve.b * zz) * point.z;
        let rhs = point.x * (point.x.square() + curve.a * zz);
        lhs == rhs
    }

    fn is_equal(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> bool {
        lhs.x * rhs.z == rhs.x * lhs.z && lhs.y * rhs.z == rhs.y * lhs.z
    }

    fn relation(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> Relation {
        if lhs.x * rhs.z != rhs.x * lhs.z {
            return Relation::Neither;
        }

        let ly = lhs.y * rhs.z;
        let ry = rhs.y * lhs.z;
        if ly == ry {
            Relation::Equal
        } else if is_zero(&(ly + ry)) {
            Relation::Opposite
        } else {
            Relation::Neither
        }
    }

    fn normalize<'c>(point: &Point<'c, F, S>, z_inv: &F) -> Point<'c, F, S> {
        Point::from_raw(point.curve, point.x * z_inv, point.y * z_inv, F::ONE)
    }
}

/// Algorithm 7.
fn add_a0<'c, F, S>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = lhs.curve;

    let xx = lhs.x * rhs.x;
    let yy = lhs.y * rhs.y;
    let zz = lhs.z * rhs.z;
    let xy_pairs = (lhs.x + lhs.y) * (rhs.x + rhs.y) - (xx + yy);
    let yz_pairs = (lhs.y + lhs.z) * (rhs.y + rhs.z) - (yy + zz);
    let xz_pairs = (lhs.x + lhs.z) * (rhs.x + rhs.z) - (xx + zz);

    let bzz3 = mul_b3(curve, zz);
    let yy_m_bzz3 = yy - bzz3;
    let yy_p_bzz3 = yy + bzz3;

    let byz3 = mul_b3(curve, yz_pairs);
    let xx3 = xx.double() + xx;
    let bxx9 = mul_b3(curve, xx3);

    Point::from_raw(
        curve,
        xy_pairs * yy_m_bzz3 - byz3 * xz_pairs,
        yy_p_bzz3 * yy_m_bzz3 + bxx9 * xz_pairs,
        yz_pairs * yy_p_bzz3 + xx3 * xy_pairs,
    )
}

/// Algorithm 8, `rhs.z == 1`.
fn add_mixed_a0<'c, F, S>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = lhs.curve;

    let xx = lhs.x * rhs.x;
    let yy = lhs.y * rhs.y;
    let xy_pairs = (lhs.x + lhs.y) * (rhs.x + rhs.y) - (xx + yy);
    let yz_pairs = rhs.y * lhs.z + lhs.y;
    let xz_pairs = rhs.x * lhs.z + lhs.x;

    let bzz3 = mul_b3(curve, lhs.z);
    let yy_m_bzz3 = yy - bzz3;
    let yy_p_bzz3 = yy + bzz3;

    let byz3 = mul_b3(curve, yz_pairs);
    let xx3 = xx.double() + xx;
    let bxx9 = mul_b3(curve, xx3);

    Point::from_raw(
        curve,
        xy_pairs * yy_m_bzz3 - byz3 * xz_pairs,
        yy_p_bzz3 * yy_m_bzz3 + bxx9 * xz_pairs,
        yz_pairs * yy_p_bzz3 + xx3 * xy_pairs,
    )
}

/// Algorithm 9.
fn double_a0<'c, F, S>(point: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = point.curve;

    let yy = point.y.square();
    let zz = point.z.square();
    let xy2 = (point.x * point.y).double();

    let bzz3 = mul_b3(curve, zz);
    let bzz9 = bzz3.double() + bzz3;
    let yy_m_bzz9 = yy - bzz9;
    let yy_p_bzz3 = yy + bzz3;

    let yy_zz8 = (yy * zz).double().double().double();
    let t = mul_b3(curve, yy_zz8);

    Point::from_raw(
        curve,
        xy2 * yy_m_bzz9,
        yy_m_bzz9 * yy_p_bzz3 + t,
        (yy * point.y * point.z).double().double().double(),
    )
}

/// Algorithm 1, any `a`.
fn add_generic<'c, F, S>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = lhs.curve;
    let a = curve.a;

    let t0 = lhs.x * rhs.x; // 1
    let t1 = lhs.y * rhs.y; // 2
    let t2 = lhs.z * rhs.z; // 3
    let t3 = (lhs.x + lhs.y) * (rhs.x + rhs.y) - (t0 + t1); // 4-8
    let t4 = (lhs.x + lhs.z) * (rhs.x + rhs.z) - (t0 + t2); // 9-13
    let t5 = (lhs.y + lhs.z) * (rhs.y + rhs.z) - (t1 + t2); // 14-18
    let z3 = a * t4 + mul_b3(curve, t2); // 19-21
    let x3 = t1 - z3; // 22
    let z3 = t1 + z3; // 23
    let y3 = x3 * z3; // 24
    let t1 = t0.double() + t0; // 25, 26
    let t2 = a * t2; // 27
    let t4 = mul_b3(curve, t4); // 28
    let t1 = t1 + t2; // 29
    let t2 = a * (t0 - t2); // 30, 31
    let t4 = t4 + t2; // 32
    let y3 = y3 + t1 * t4; // 33, 34
    let x3 = t3 * x3 - t5 * t4; // 35-37
    let z3 = t5 * z3 + t3 * t1; // 38-40

    Point::from_raw(curve, x3, y3, z3)
}

/// Algorithm 2, any `a`, `rhs.z == 1`.
fn add_mixed_generic<'c, F, S>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = lhs.curve;
    let a = curve.a;

    let t0 = lhs.x * rhs.x; // 1
    let t1 = lhs.y * rhs.y; // 2
    let t3 = (rhs.x + rhs.y) * (lhs.x + lhs.y) - (t0 + t1); // 3-7
    let t4 = rhs.x * lhs.z + lhs.x; // 8, 9
    let t5 = rhs.y * lhs.z + lhs.y; // 10, 11
    let z3 = a * t4 + mul_b3(curve, lhs.z); // 12-14
    let x3 = t1 - z3; // 15
    let z3 = t1 + z3; // 16
    let y3 = x3 * z3; // 17
    let t1 = t0.double() + t0; // 18, 19
    let t2 = a * lhs.z; // 20
    let t4 = mul_b3(curve, t4); // 21
    let t1 = t1 + t2; // 22
    let t2 = a * (t0 - t2); // 23, 24
    let t4 = t4 + t2; // 25
    let y3 = y3 + t1 * t4; // 26, 27
    let x3 = t3 * x3 - t5 * t4; // 28-30
    let z3 = t5 * z3 + t3 * t1; // 31-33

    Point::from_raw(curve, x3, y3, z3)
}

/// Algorithm 3, any `a`.
fn double_generic<'c, F, S>(point: &Point<'c, F, S>) -> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = point.curve;
    let a = curve.a;

    let t0 = point.x.square(); // 1
    let t1 = point.y.square(); // 2
    let t2 = point.z.square(); // 3
    let t3 = (point.x * point.y).double(); // 4, 5
    let z3 = (point.x * point.z).double(); // 6, 7
    let y3 = a * z3 + mul_b3(curve, t2); // 8-10
    let x3 = t1 - y3; // 11
    let y3 = x3 * (t1 + y3); // 12, 13
    let x3 = t3 * x3; // 14
    let z3 = mul_b3(curve, z3); // 15
    let t2 = a * t2; // 16
    let t3 = a * (t0 - t2) + z3; // 17-19
    let t0 = t0.double() + t0 + t2; // 20-22
    let y3 = y3 + t0 * t3; // 23, 24
    let t2 = (point.y * point.z).double(); // 25, 26
    let x3 = x3 - t2 * t3; // 27, 28
    let z3 = (t2 * t1).double().double(); // 29-31

    Point::from_raw(curve, x3, y3, z3)
}
