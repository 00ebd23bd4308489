//! Affine coordinates: `z` is `1` for finite points and `0` for the identity.

use super::{PointArithmetic, is_zero};
use crate::{
    field::{CurveField, CurveScalar},
    point::{Point, Relation},
};
use elliptic_curve::ff::Field;

/// Textbook chord and tangent formulas.
pub(crate) struct Affine;

/// `num / den`, or zero if `den` is zero.
#[inline]
fn div<F: Field>(num: F, den: &F) -> F {
    num * den.invert().unwrap_or(F::ZERO)
}

impl<F, S> PointArithmetic<F, S> for Affine
where
    F: CurveField,
    S: CurveScalar,
{
    fn add<'c>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S> {
        if lhs.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *lhs;
        }

        if lhs.x == rhs.x {
            return if lhs.y == rhs.y {
                Self::double(lhs)
            } else {
                lhs.curve.identity()
            };
        }

        let lambda = div(rhs.y - lhs.y, &(rhs.x - lhs.x));
        let x = lambda.square() - lhs.x - rhs.x;
        let y = lambda * (lhs.x - x) - lhs.y;
        Point::from_raw(lhs.curve, x, y, F::ONE)
    }

    fn double<'c>(point: &Point<'c, F, S>) -> Point<'c, F, S> {
        if point.is_identity() || is_zero(&point.y) {
            return point.curve.identity();
        }

        let xx = point.x.square();
        let lambda = div(xx.double() + xx + point.curve.a, &point.y.double());
        let x = lambda.square() - point.x.double();
        let y = lambda * (point.x - x) - point.y;
        Point::from_raw(point.curve, x, y, F::ONE)
    }

    fn is_on_curve(_point: &Point<'_, F, S>) -> bool {
        // finite affine points always have z = 1
        false
    }

    fn is_equal(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> bool {
        lhs.x == rhs.x && lhs.y == rhs.y
    }

    fn relation(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> Relation {
        if lhs.x != rhs.x {
            Relation::Neither
        } else if lhs.y == rhs.y {
            Relation::Equal
        } else if lhs.y == -rhs.y {
            Relation::Opposite
        } else {
            Relation::Neither
        }
    }

    fn normalize<'c>(point: &Point<'c, F, S>, _z_inv: &F) -> Point<'c, F, S> {
        *point
    }
}
