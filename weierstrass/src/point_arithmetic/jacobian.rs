//! Jacobian coordinates: `(x, y) = (X/Z², Y/Z³)`.

use super::{PointArithmetic, is_zero};
use crate::{
    curve::{ClassA, ClassB},
    field::{CurveField, CurveScalar},
    point::{Point, Relation},
};
use elliptic_curve::ff::Field;

/// Formulas for Jacobian coordinates, specialized on the class of `a`.
pub(crate) struct Jacobian;

impl<F, S> PointArithmetic<F, S> for Jacobian
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

        let lhs_z_one = lhs.z == F::ONE;
        let rhs_z_one = rhs.z == F::ONE;

        // u1 = X1·Z2², s1 = Y1·Z2³
        let (u1, s1) = if rhs_z_one {
            (lhs.x, lhs.y)
        } else {
            let zz = rhs.z.square();
            (lhs.x * zz, lhs.y * zz * rhs.z)
        };

        // u2 = X2·Z1², s2 = Y2·Z1³
        let (u2, s2) = if lhs_z_one {
            (rhs.x, rhs.y)
        } else {
            let zz = lhs.z.square();
            (rhs.x * zz, rhs.y * zz * lhs.z)
        };

        let h = u2 - u1;
        let r = s2 - s1;

        if is_zero(&h) {
            return if is_zero(&r) {
                Self::double(lhs)
            } else {
                lhs.curve.identity()
            };
        }

        let hh = h.square();
        let hhh = hh * h;
        let u1hh = u1 * hh;

        let x = r.square() - u1hh.double() - hhh;
        let y = r * (u1hh - x) - s1 * hhh;
        let z = match (lhs_z_one, rhs_z_one) {
            (true, true) => h,
            (true, false) => rhs.z * h,
            (false, true) => lhs.z * h,
            (false, false) => lhs.z * rhs.z * h,
        };

        Point::from_raw(lhs.curve, x, y, z)
    }

    fn double<'c>(point: &Point<'c, F, S>) -> Point<'c, F, S> {
        if point.is_identity() {
            return point.curve.identity();
        }

        let curve = point.curve;
        let z_one = point.z == F::ONE;

        let xx = point.x.square();
        let yy = point.y.square();
        let yyyy = yy.square();

        // 2·X·Y²
        let xyy2 = if F::BYTE_SIZE <= 32 {
            (point.x * yy).double()
        } else {
            (point.x + yy).square() - xx - yyyy
        };
        let s = xyy2.double();

        let m = match curve.class_a {
            ClassA::Zero => xx.double() + xx,
            ClassA::MinusThree => {
                let t = if z_one {
                    xx - F::ONE
                } else {
                    xx - point.z.square().square()
                };
                t.double() + t
            }
            ClassA::Generic => {
                let a = if z_one {
                    curve.a
                } else {
                    point.z.square().square() * curve.a
                };
                a + xx.double() + xx
            }
        };

        let x = m.square() - s.double();
        let z = if z_one {
            point.y.double()
        } else {
            (point.y * point.z).double()
        };
        let y = m * (s - x) - yyyy.double().double().double();

        Point::from_raw(curve, x, y, z)
    }

    fn is_on_curve(point: &Point<'_, F, S>) -> bool {
        let curve = point.curve;
        let zz = point.z.square();
        let zzzz = zz.square();
        let z6 = zzzz * zz;

        let bz6 = match curve.class_b {
            ClassB::One => z6,
            ClassB::Four => z6.double().double(),
            ClassB::Generic => curve.b * z6,
        };

        let rhs = point.x * (point.x.square() + curve.a * zzzz) + bz6;
        point.y.square() == rhs
    }

    fn is_equal(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> bool {
        let lzz = lhs.z.square();
        let rzz = rhs.z.square();
        if lhs.x * rzz != rhs.x * lzz {
            return false;
        }
        lhs.y * rzz * rhs.z == rhs.y * lzz * lhs.z
    }

    fn relation(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> Relation {
        let lzz = lhs.z.square();
        let rzz = rhs.z.square();
        if lhs.x * rzz != rhs.x * lzz {
            return Relation::Neither;
        }

        let ly = lhs.y * rzz * rhs.z;
        let ry = rhs.y * lzz * lhs.z;
        if ly == ry {
            Relation::Equal
        } else if ly == -ry {
            Relation::Opposite
        } else {
            Relation::Neither
        }
    }

    fn normalize<'c>(point: &Point<'c, F, S>, z_inv: &F) -> Point<'c, F, S> {
        let zz_inv = z_inv.square();
        Point::from_raw(
            point.curve,
            point.x * zz_inv,
            point.y * zz_inv * z_inv,
            F::ONE,
        )
    }
}
