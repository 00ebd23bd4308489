//! Curve points.

use crate::{
    Error, Result,
    curve::{Curve, Mode},
    field::{CurveField, CurveScalar},
    point_arithmetic::{self, dispatch, jacobian_to_projective, projective_to_jacobian},
};
use alloc::vec;
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::subtle::{Choice, ConditionallySelectable};

/// Outcome of [`Point::equal_or_opposite`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
    /// `P == Q`.
    Equal,

    /// `P == -Q` and `P != Q`.
    Opposite,

    /// Different `x`-coordinates.
    Neither,
}

/// Point on a short Weierstrass curve.
///
/// The coordinates `(x, y, z)` are interpreted in the coordinate system of the
/// curve the point borrows. Any point with `z == 0` is the identity.
#[derive(Clone, Copy)]
pub struct Point<'c, F: CurveField, S: CurveScalar> {
    pub(crate) curve: &'c Curve<F, S>,
    pub(crate) x: F,
    pub(crate) y: F,
    pub(crate) z: F,
}

impl<'c, F, S> Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    #[inline]
    pub(crate) fn from_raw(curve: &'c Curve<F, S>, x: F, y: F, z: F) -> Self {
        Self { curve, x, y, z }
    }

    /// Curve this point belongs to.
    pub fn curve(&self) -> &'c Curve<F, S> {
        self.curve
    }

    /// Raw `x`-coordinate.
    pub fn x(&self) -> &F {
        &self.x
    }

    /// Raw `y`-coordinate.
    pub fn y(&self) -> &F {
        &self.y
    }

    /// Raw `z`-coordinate.
    pub fn z(&self) -> &F {
        &self.z
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> bool {
        point_arithmetic::is_zero(&self.z)
    }

    /// Reset to the identity.
    pub fn clear(&mut self) {
        *self = self.curve.identity();
    }

    /// Is `z` either `0` or `1`?
    pub fn is_normalized(&self) -> bool {
        self.is_identity() || self.z == F::ONE
    }

    /// Canonical representative: `z = 1` for finite points and the
    /// coordinates of [`Curve::identity`] otherwise.
    pub fn normalize(&self) -> Self {
        if self.is_identity() {
            return self.curve.identity();
        }
        if self.z == F::ONE {
            return *self;
        }

        match Option::<F>::from(self.z.invert()) {
            Some(z_inv) => dispatch!(self.curve.mode, normalize(self, &z_inv)),
            None => self.curve.identity(),
        }
    }

    /// Affine coordinates, or `None` for the identity.
    pub fn to_affine(&self) -> Option<(F, F)> {
        if self.is_identity() {
            return None;
        }
        let p = self.normalize();
        Some((p.x, p.y))
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        dispatch!(self.curve.mode, double(self))
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        dispatch!(self.curve.mode, add(self, other))
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return self.curve.identity();
        }
        Self {
            curve: self.curve,
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Check the curve equation and, if the curve verifies the subgroup
    /// order, subgroup membership.
    ///
    /// The identity is always valid.
    pub fn check(&self) -> Result<()> {
        if self.is_identity() {
            return Ok(());
        }

        let on_curve = if self.z == F::ONE {
            self.is_on_curve_affine()
        } else {
            dispatch!(self.curve.mode, is_on_curve(self))
        };

        if !on_curve {
            return Err(Error::InvalidPoint);
        }

        if self.curve.verify_order && !self.is_in_subgroup() {
            return Err(Error::InvalidOrder);
        }

        Ok(())
    }

    /// Boolean form of [`Point::check`].
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Whether `[order]self` is the identity, using the installed
    /// [`OrderCheck`](crate::hooks::OrderCheck) if any.
    ///
    /// Without a hook this is a full scalar multiplication by the order
    /// stored on the curve.
    pub fn is_in_subgroup(&self) -> bool {
        match &self.curve.order_check {
            Some(check) => check.is_in_subgroup(self),
            None => self.mul_uint(&self.curve.order, false, false).is_identity(),
        }
    }

    pub(crate) fn is_on_curve_affine(&self) -> bool {
        point_arithmetic::is_on_curve_affine(self)
    }

    /// Set the affine coordinates of this point.
    ///
    /// With `verify` the new point is checked like [`Point::check`]. On
    /// failure the point is cleared and `false` is returned.
    pub fn set(&mut self, x: F, y: F, verify: bool) -> bool {
        *self = Self::from_raw(self.curve, x, y, F::ONE);
        if verify && !self.is_valid() {
            self.clear();
            return false;
        }
        true
    }

    /// Whether `self` equals `other` or `-other`.
    ///
    /// Two identities are [`Relation::Equal`].
    pub fn equal_or_opposite(&self, other: &Self) -> Relation {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => Relation::Equal,
            (false, false) => dispatch!(self.curve.mode, relation(self, other)),
            _ => Relation::Neither,
        }
    }

    /// Total order: the identity first, then by affine `x` and affine `y`.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.to_affine(), other.to_affine()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some((lx, ly)), Some((rx, ry))) => lx.compare(&rx).then_with(|| ly.compare(&ry)),
        }
    }

    /// Express this point on a curve configured in another coordinate
    /// system. Both curves must have the same equation.
    pub fn to_mode<'d>(&self, target: &'d Curve<F, S>) -> Point<'d, F, S> {
        if self.is_identity() {
            return target.identity();
        }

        let (x, y, z) = match (self.curve.mode, target.mode) {
            (Mode::Jacobi, Mode::Projective) => jacobian_to_projective(&self.x, &self.y, &self.z),
            (Mode::Projective, Mode::Jacobi) => projective_to_jacobian(&self.x, &self.y, &self.z),
            (from, to) if from == to => (self.x, self.y, self.z),
            _ => {
                let p = self.normalize();
                (p.x, p.y, F::ONE)
            }
        };

        target.from_coordinates(x, y, z)
    }
}

impl<F, S> fmt::Debug for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl<F, S> PartialEq for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => dispatch!(self.curve.mode, is_equal(self, other)),
            _ => false,
        }
    }
}

impl<F, S> Eq for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
}

impl<F, S> Hash for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.to_affine() {
            None => state.write_u8(0),
            Some((x, y)) => {
                let mut buf = vec![0u8; F::BYTE_SIZE];
                state.write_u8(1);
                x.to_be_bytes(&mut buf);
                state.write(&buf);
                y.to_be_bytes(&mut buf);
                state.write(&buf);
            }
        }
    }
}

impl<F, S> ConditionallySelectable for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            curve: a.curve,
            x: F::conditional_select(&a.x, &b.x, choice),
            y: F::conditional_select(&a.y, &b.y, choice),
            z: F::conditional_select(&a.z, &b.z, choice),
        }
    }
}

//
// Arithmetic trait impls
//

impl<'c, F, S> Add<Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn add(self, other: Point<'c, F, S>) -> Point<'c, F, S> {
        Point::add(&self, &other)
    }
}

impl<'c, F, S> Add<&Point<'c, F, S>> for &Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn add(self, other: &Point<'c, F, S>) -> Point<'c, F, S> {
        Point::add(self, other)
    }
}

impl<'c, F, S> Add<&Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn add(self, other: &Point<'c, F, S>) -> Point<'c, F, S> {
        Point::add(&self, other)
    }
}

impl<'c, F, S> AddAssign<Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn add_assign(&mut self, rhs: Point<'c, F, S>) {
        *self = Point::add(self, &rhs);
    }
}

impl<'c, F, S> AddAssign<&Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn add_assign(&mut self, rhs: &Point<'c, F, S>) {
        *self = Point::add(self, rhs);
    }
}

impl<'c, F, S> Sub<Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn sub(self, other: Point<'c, F, S>) -> Point<'c, F, S> {
        Point::sub(&self, &other)
    }
}

impl<'c, F, S> Sub<&Point<'c, F, S>> for &Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn sub(self, other: &Point<'c, F, S>) -> Point<'c, F, S> {
        Point::sub(self, other)
    }
}

impl<'c, F, S> Sub<&Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn sub(self, other: &Point<'c, F, S>) -> Point<'c, F, S> {
        Point::sub(&self, other)
    }
}

impl<'c, F, S> SubAssign<Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn sub_assign(&mut self, rhs: Point<'c, F, S>) {
        *self = Point::sub(self, &rhs);
    }
}

impl<'c, F, S> SubAssign<&Point<'c, F, S>> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn sub_assign(&mut self, rhs: &Point<'c, F, S>) {
        *self = Point::sub(self, rhs);
    }
}

impl<'c, F, S, K> Mul<K> for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
    K: Borrow<S>,
{
    type Output = Point<'c, F, S>;

    fn mul(self, scalar: K) -> Point<'c, F, S> {
        Point::mul(&self, scalar.borrow())
    }
}

impl<'c, F, S, K> Mul<K> for &Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
    K: Borrow<S>,
{
    type Output = Point<'c, F, S>;

    fn mul(self, scalar: K) -> Point<'c, F, S> {
        Point::mul(self, scalar.borrow())
    }
}

impl<F, S, K> MulAssign<K> for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
    K: Borrow<S>,
{
    fn mul_assign(&mut self, scalar: K) {
        *self = Point::mul(self, scalar.borrow());
    }
}

impl<'c, F, S> Neg for Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn neg(self) -> Point<'c, F, S> {
        Point::neg(&self)
    }
}

impl<'c, F, S> Neg for &Point<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    type Output = Point<'c, F, S>;

    fn neg(self) -> Point<'c, F, S> {
        Point::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::init_curve,
        dev::{TOY, ToyFp, ToyFr},
    };
    use elliptic_curve::ff::Field;
    use num_bigint::BigUint;

    fn toy(mode: Mode) -> Curve<ToyFp, ToyFr> {
        init_curve(&TOY, mode).unwrap()
    }

    #[test]
    fn identity_representation() {
        for mode in [Mode::Jacobi, Mode::Projective, Mode::Affine] {
            let curve = toy(mode);
            let id = curve.identity();
            assert!(id.is_identity());
            assert!(id.is_normalized());
            assert!(id.is_valid());
            assert_eq!(id.to_affine(), None);
            assert_eq!(id.neg(), id);
            assert_eq!(id.double(), id);

            let g = curve.generator().unwrap();
            assert_eq!(g + id, g);
            assert_eq!(id + g, g);
            assert_eq!(g - g, id);
            assert_eq!(id.equal_or_opposite(&id), Relation::Equal);
            assert_eq!(id.equal_or_opposite(&g), Relation::Neither);
        }
    }

    #[test]
    fn normalize_fixes_z() {
        for mode in [Mode::Jacobi, Mode::Projective] {
            let curve = toy(mode);
            let g = curve.generator().unwrap();
            let p = g.double() + g;
            assert!(!p.is_normalized());

            let n = p.normalize();
            assert!(n.is_normalized());
            assert_eq!(n.z, ToyFp::ONE);
            assert_eq!(n, p);
            assert_eq!(p.to_affine(), Some((n.x, n.y)));
        }

        // non-canonical identity
        let curve = toy(Mode::Projective);
        let odd = Point::from_raw(&curve, ToyFp::from(3), ToyFp::from(5), ToyFp::ZERO);
        let n = odd.normalize();
        assert_eq!((n.x, n.y, n.z), (ToyFp::ZERO, ToyFp::ONE, ToyFp::ZERO));
    }

    #[test]
    fn check_reports_the_failing_stage() {
        let mut curve = toy(Mode::Jacobi);
        curve.set_order(BigUint::from(349u32));

        let g = curve.generator().unwrap();
        assert_eq!(g.check(), Ok(()));

        let off_curve = curve.point_unchecked(ToyFp::from(391), ToyFp::from(9));
        assert_eq!(off_curve.check(), Err(Error::InvalidPoint));

        // order 1047 = 3 * 349
        let full = curve.point_unchecked(ToyFp::ZERO, ToyFp::from(45));
        assert_eq!(full.check(), Err(Error::InvalidOrder));
        assert_eq!(curve.point(ToyFp::ZERO, ToyFp::from(45)), Err(Error::InvalidOrder));

        // a non-normalized representative goes through the Jacobian equation
        let p = g.double();
        assert!(!p.is_normalized());
        assert_eq!(p.check(), Ok(()));
        let broken = Point::from_raw(&curve, p.x, p.y + ToyFp::ONE, p.z);
        assert_eq!(broken.check(), Err(Error::InvalidPoint));
    }

    #[test]
    fn affine_mode_rejects_non_unit_z() {
        let curve = toy(Mode::Affine);
        let g = curve.generator().unwrap();
        let scaled = Point::from_raw(&curve, g.x, g.y, ToyFp::from(2));
        assert_eq!(scaled.check(), Err(Error::InvalidPoint));
    }

    #[test]
    fn set_clears_on_failure() {
        let curve = toy(Mode::Projective);
        let mut p = curve.generator().unwrap();

        assert!(!p.set(ToyFp::from(391), ToyFp::from(9), true));
        assert!(p.is_identity());

        assert!(p.set(ToyFp::from(391), ToyFp::from(9), false));
        assert!(!p.is_identity());

        assert!(p.set(ToyFp::from(750), ToyFp::from(125), true));
        assert_eq!(p, curve.generator().unwrap().double());
    }

    #[test]
    fn relation_and_order() {
        let curve = toy(Mode::Jacobi);
        let g = curve.generator().unwrap();
        let g2 = g.double();

        assert_eq!(g.equal_or_opposite(&g), Relation::Equal);
        assert_eq!(g.equal_or_opposite(&-g), Relation::Opposite);
        assert_eq!(g2.equal_or_opposite(&(g2 - g - g)), Relation::Neither);

        let id = curve.identity();
        assert_eq!(id.compare(&g), Ordering::Less);
        assert_eq!(g.compare(&id), Ordering::Greater);
        // 2G = (750, 125) sorts after G = (391, 8)
        assert_eq!(g2.compare(&g), Ordering::Greater);
        assert_eq!(g2.compare(&(g + g)), Ordering::Equal);
        // same x, y = 8 < 1001
        assert_eq!(g.compare(&-g), Ordering::Less);
    }

    #[test]
    fn to_mode_preserves_points() {
        let jac = toy(Mode::Jacobi);
        let proj = toy(Mode::Projective);
        let aff = toy(Mode::Affine);

        let p = {
            let g = jac.generator().unwrap();
            g.double().double() + g
        };

        let q = p.to_mode(&proj);
        let r = q.to_mode(&aff);
        let s = r.to_mode(&jac);
        assert!(!q.is_normalized());
        assert!(r.is_normalized());
        assert_eq!(s, p);
        assert_eq!(p.to_affine(), q.to_affine());
        assert_eq!(q.to_affine(), r.to_affine());
        assert!(jac.identity().to_mode(&proj).is_identity());
    }

    #[test]
    fn hash_follows_equality() {
        use core::hash::BuildHasher;
        use std::collections::hash_map::RandomState;

        let curve = toy(Mode::Jacobi);
        let g = curve.generator().unwrap();
        let p = g.double() + g;
        let q = g + g.double();

        let state = RandomState::new();
        assert_eq!(p, q);
        assert_eq!(state.hash_one(p), state.hash_one(q));
        assert_eq!(state.hash_one(p), state.hash_one(p.normalize()));
    }

    #[test]
    fn conditional_select() {
        let curve = toy(Mode::Projective);
        let g = curve.generator().unwrap();
        let id = curve.identity();
        assert_eq!(Point::conditional_select(&g, &id, Choice::from(0)), g);
        assert_eq!(Point::conditional_select(&g, &id, Choice::from(1)), id);
    }
}
