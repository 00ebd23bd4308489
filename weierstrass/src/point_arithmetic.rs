//! Point arithmetic implementation for each coordinate system
//!
//! Every [`Mode`] has its own formulas for the group law, the curve equation,
//! point equality and normalization. They share one interface so the point
//! type can select them at run time from the curve configuration.

mod affine;
mod jacobian;
mod projective;

pub(crate) use self::{affine::Affine, jacobian::Jacobian, projective::Projective};

use crate::{
    curve::Mode,
    field::{CurveField, CurveScalar},
    point::{Point, Relation},
};
use elliptic_curve::ff::Field;

mod sealed {
    use crate::{
        field::{CurveField, CurveScalar},
        point::{Point, Relation},
    };

    /// Elliptic point arithmetic implementation
    ///
    /// Inputs other than to [`PointArithmetic::add`] and
    /// [`PointArithmetic::double`] are finite points.
    pub trait PointArithmetic<F: CurveField, S: CurveScalar> {
        /// Returns `lhs + rhs`
        fn add<'c>(lhs: &Point<'c, F, S>, rhs: &Point<'c, F, S>) -> Point<'c, F, S>;

        /// Returns `point + point`
        fn double<'c>(point: &Point<'c, F, S>) -> Point<'c, F, S>;

        /// Curve equation for a point with `z ∉ {0, 1}`.
        fn is_on_curve(point: &Point<'_, F, S>) -> bool;

        /// Whether both points represent the same affine point.
        fn is_equal(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> bool;

        /// Compare affine `x` and then affine `y` up to sign.
        fn relation(lhs: &Point<'_, F, S>, rhs: &Point<'_, F, S>) -> Relation;

        /// Representative with `z = 1`, given the inverse of `z`.
        fn normalize<'c>(point: &Point<'c, F, S>, z_inv: &F) -> Point<'c, F, S>;
    }
}

/// Allow crate-local visibility
pub(crate) use sealed::PointArithmetic;

/// Call a [`PointArithmetic`] method of the implementation selected by a
/// [`Mode`].
macro_rules! dispatch {
    ($mode:expr, $method:ident($($arg:expr),* $(,)?)) => {
        match $mode {
            $crate::curve::Mode::Jacobi => {
                <$crate::point_arithmetic::Jacobian as $crate::point_arithmetic::PointArithmetic<
                    _,
                    _,
                >>::$method($($arg),*)
            }
            $crate::curve::Mode::Projective => {
                <$crate::point_arithmetic::Projective as $crate::point_arithmetic::PointArithmetic<
                    _,
                    _,
                >>::$method($($arg),*)
            }
            $crate::curve::Mode::Affine => {
                <$crate::point_arithmetic::Affine as $crate::point_arithmetic::PointArithmetic<
                    _,
                    _,
                >>::$method($($arg),*)
            }
        }
    };
}

pub(crate) use dispatch;

/// The affine curve equation `y² == (x² + a)x + b`.
pub(crate) fn is_on_curve_affine<F, S>(point: &Point<'_, F, S>) -> bool
where
    F: CurveField,
    S: CurveScalar,
{
    let curve = point.curve;
    point.y.square() == (point.x.square() + curve.a) * point.x + curve.b
}

/// `(X, Y, Z)` with `(x, y) = (X/Z², Y/Z³)` to `(XZ, Y, Z³)` with
/// `(x, y) = (X/Z, Y/Z)`.
pub(crate) fn jacobian_to_projective<F: CurveField>(x: &F, y: &F, z: &F) -> (F, F, F) {
    if bool::from(z.is_zero()) {
        return (F::ZERO, F::ONE, F::ZERO);
    }
    (*x * z, *y, z.square() * z)
}

/// `(X, Y, Z)` with `(x, y) = (X/Z, Y/Z)` to `(XZ, YZ², Z)` with
/// `(x, y) = (X/Z², Y/Z³)`.
pub(crate) fn projective_to_jacobian<F: CurveField>(x: &F, y: &F, z: &F) -> (F, F, F) {
    if bool::from(z.is_zero()) {
        return (F::ZERO, F::ZERO, F::ZERO);
    }
    (*x * z, *y * z.square(), *z)
}

/// Whether a field element is zero, as a `bool`.
#[inline]
pub(crate) fn is_zero<F: Field>(fe: &F) -> bool {
    bool::from(fe.is_zero())
}

impl Mode {
    /// Coordinates of the identity in this system.
    pub(crate) fn identity_coordinates<F: Field>(self) -> (F, F, F) {
        match self {
            Mode::Jacobi => (F::ZERO, F::ZERO, F::ZERO),
            Mode::Projective | Mode::Affine => (F::ZERO, F::ONE, F::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::init_curve,
        dev::{TOY, ToyFp, ToyFr},
    };

    #[test]
    fn conversions_preserve_the_affine_point() {
        let jac = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Jacobi).unwrap();
        let proj = init_curve::<ToyFp, ToyFr>(&TOY, Mode::Projective).unwrap();
        let g = jac.generator().unwrap();
        let p = g.double().add(&g);

        let (x, y, z) = jacobian_to_projective(&p.x, &p.y, &p.z);
        let q = proj.from_coordinates(x, y, z);
        assert_eq!(p.to_affine(), q.to_affine());

        let (x, y, z) = projective_to_jacobian(&q.x, &q.y, &q.z);
        let r = jac.from_coordinates(x, y, z);
        assert_eq!(r, p);
    }

    #[test]
    fn conversions_canonicalize_identity() {
        let one = ToyFp::ONE;
        assert_eq!(
            jacobian_to_projective(&one, &one, &ToyFp::ZERO),
            Mode::Projective.identity_coordinates()
        );
        assert_eq!(
            projective_to_jacobian(&one, &one, &ToyFp::ZERO),
            Mode::Jacobi.identity_coordinates()
        );
    }
}
