//! Curve configuration.
//!
//! A [`Curve`] holds everything the group law reads at run time: the
//! coefficients of `y² = x³ + ax + b`, the coordinate system, the subgroup
//! order and the optional accelerated routines. Points borrow their curve, so
//! the configuration can't change while any point is alive.

use crate::{
    Error, Result,
    field::{CurveField, CurveScalar, Radix},
    hooks::{Endomorphism, GlvMul, MulEachAccel, MulVecAccel, OrderCheck},
    point::Point,
};
use alloc::boxed::Box;
use core::fmt;
use elliptic_curve::rand_core::RngCore;
use num_bigint::BigUint;
use num_traits::Zero;

/// Coordinate system used by every point of a curve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// `(x, y) = (X/Z², Y/Z³)`.
    #[default]
    Jacobi,

    /// `(x, y) = (X/Z, Y/Z)`.
    Projective,

    /// `Z` is `1` for finite points and `0` for the identity.
    Affine,
}

/// Class of the 𝒂-coefficient selecting specialized doubling formulas.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClassA {
    Zero,
    MinusThree,
    Generic,
}

/// Class of the 𝒃-coefficient selecting specialized multiplications by `b`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClassB {
    One,
    Four,
    Generic,
}

/// Which representation [`Display`](core::fmt::Display) writes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TextForm {
    /// `1 x y`, or `0` for the identity.
    #[default]
    Affine,

    /// `2 x` or `3 x` depending on the parity of `y`, or `0` for the identity.
    Compressed,

    /// `4 X Y Z` without normalization.
    Projective,
}

/// Text I/O settings of a curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextMode {
    /// Output representation.
    pub form: TextForm,

    /// Radix of field elements.
    pub radix: Radix,

    /// Character between the tag and each field element.
    pub separator: char,
}

impl Default for TextMode {
    fn default() -> Self {
        Self {
            form: TextForm::default(),
            radix: Radix::default(),
            separator: ' ',
        }
    }
}

/// Named curve parameters.
///
/// Numbers are decimal, or hex with a `0x` prefix, and may carry a leading
/// `-` which is interpreted modulo `p`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EcParam {
    /// Name of the curve.
    pub name: &'static str,

    /// Characteristic of the base field.
    pub p: &'static str,

    /// Coefficient `a`.
    pub a: &'static str,

    /// Coefficient `b`.
    pub b: &'static str,

    /// Generator `x`-coordinate.
    pub gx: &'static str,

    /// Generator `y`-coordinate.
    pub gy: &'static str,

    /// Order of the generator.
    pub n: &'static str,
}

/// Short Weierstrass curve `y² = x³ + ax + b` over `F` with scalars in `S`.
pub struct Curve<F: CurveField, S: CurveScalar> {
    pub(crate) a: F,
    pub(crate) b: F,
    pub(crate) b3: F,
    pub(crate) class_a: ClassA,
    pub(crate) class_b: ClassB,
    pub(crate) mode: Mode,
    pub(crate) order: BigUint,
    pub(crate) verify_order: bool,
    pub(crate) text: TextMode,
    pub(crate) generator: Option<(F, F)>,
    pub(crate) order_check: Option<Box<dyn OrderCheck<F, S>>>,
    pub(crate) glv: Option<Box<dyn GlvMul<F, S>>>,
    pub(crate) mul_vec_accel: Option<Box<dyn MulVecAccel<F, S>>>,
    pub(crate) mul_each_accel: Option<Box<dyn MulEachAccel<F, S>>>,
}

impl<F, S> Curve<F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Configure the curve `y² = x³ + ax + b` in the given coordinate system.
    ///
    /// No subgroup order is set and no hooks are installed.
    pub fn new(a: F, b: F, mode: Mode) -> Self {
        let class_a = if bool::from(a.is_zero()) {
            ClassA::Zero
        } else if a == -F::from_u64(3) {
            ClassA::MinusThree
        } else {
            ClassA::Generic
        };

        let class_b = if b == F::ONE {
            ClassB::One
        } else if b == F::from_u64(4) {
            ClassB::Four
        } else {
            ClassB::Generic
        };

        tracing::debug!(?mode, ?class_a, ?class_b, "configured curve");

        Self {
            a,
            b,
            b3: b.double() + b,
            class_a,
            class_b,
            mode,
            order: BigUint::zero(),
            verify_order: false,
            text: TextMode::default(),
            generator: None,
            order_check: None,
            glv: None,
            mul_vec_accel: None,
            mul_each_accel: None,
        }
    }

    /// Configure a curve from textual coefficients.
    pub fn parse_coefficients(a: &str, b: &str, mode: Mode) -> Result<Self> {
        Ok(Self::new(parse_param(a)?, parse_param(b)?, mode))
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &F {
        &self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &F {
        &self.b
    }

    /// Coordinate system.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Subgroup order last passed to [`Curve::set_order`], or zero.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Whether constructed and decoded points are checked for membership of
    /// the subgroup of order [`Curve::order`].
    pub fn verifies_order(&self) -> bool {
        self.verify_order
    }

    /// Enable subgroup verification against `order`.
    ///
    /// An `order` of zero disables verification but keeps the previously
    /// stored order, which an installed [`OrderCheck`] may still read.
    pub fn set_order(&mut self, order: BigUint) {
        if order.is_zero() {
            self.verify_order = false;
        } else {
            tracing::debug!(bits = order.bits(), "enabled subgroup verification");
            self.verify_order = true;
            self.order = order;
        }
    }

    /// Install a fast subgroup membership test.
    pub fn set_order_check(&mut self, check: impl OrderCheck<F, S> + 'static) {
        tracing::debug!("installed subgroup check");
        self.order_check = Some(Box::new(check));
    }

    /// Install an endomorphism accelerated multiply.
    pub fn set_glv(&mut self, glv: impl GlvMul<F, S> + 'static) {
        tracing::debug!("installed GLV multiply");
        self.glv = Some(Box::new(glv));
    }

    /// Install an optimized multi-scalar multiply.
    pub fn set_mul_vec_accel(&mut self, accel: impl MulVecAccel<F, S> + 'static) {
        tracing::debug!(min_len = accel.min_len(), "installed multi-scalar multiply");
        self.mul_vec_accel = Some(Box::new(accel));
    }

    /// Install an optimized per-element multiply.
    pub fn set_mul_each_accel(&mut self, accel: impl MulEachAccel<F, S> + 'static) {
        tracing::debug!("installed per-element multiply");
        self.mul_each_accel = Some(Box::new(accel));
    }

    /// Text I/O settings.
    pub fn text_mode(&self) -> &TextMode {
        &self.text
    }

    /// Change the text I/O settings.
    pub fn set_text_mode(&mut self, text: TextMode) {
        self.text = text;
    }

    /// Additive identity of the group a.k.a. the point at infinity.
    ///
    /// Represented as `(0, 0, 0)` in Jacobian coordinates and as `(0, 1, 0)`
    /// otherwise.
    pub fn identity(&self) -> Point<'_, F, S> {
        match self.mode {
            Mode::Jacobi => Point::from_raw(self, F::ZERO, F::ZERO, F::ZERO),
            Mode::Projective | Mode::Affine => Point::from_raw(self, F::ZERO, F::ONE, F::ZERO),
        }
    }

    /// Generator configured by [`init_curve`].
    pub fn generator(&self) -> Option<Point<'_, F, S>> {
        self.generator
            .map(|(x, y)| Point::from_raw(self, x, y, F::ONE))
    }

    /// Finite point with affine coordinates `(x, y)`.
    ///
    /// Checks the curve equation and, if enabled, subgroup membership.
    pub fn point(&self, x: F, y: F) -> Result<Point<'_, F, S>> {
        let point = Point::from_raw(self, x, y, F::ONE);
        if !point.is_on_curve_affine() {
            return Err(Error::InvalidPoint);
        }
        if self.verify_order && !point.is_in_subgroup() {
            return Err(Error::InvalidOrder);
        }
        Ok(point)
    }

    /// Finite point with affine coordinates `(x, y)` without any checks.
    pub fn point_unchecked(&self, x: F, y: F) -> Point<'_, F, S> {
        Point::from_raw(self, x, y, F::ONE)
    }

    /// Point with raw coordinates in this curve's coordinate system, without
    /// any checks. Any `z == 0` input yields the identity.
    pub fn from_coordinates(&self, x: F, y: F, z: F) -> Point<'_, F, S> {
        if bool::from(z.is_zero()) {
            self.identity()
        } else {
            Point::from_raw(self, x, y, z)
        }
    }

    /// Right hand side of the curve equation, `x³ + ax + b`.
    pub fn weierstrass(&self, x: &F) -> F {
        (x.square() + self.a) * x + self.b
    }

    /// The `y` with the requested parity such that `(x, y)` is on the curve.
    pub fn y_from_x(&self, x: &F, odd: bool) -> Option<F> {
        let y: F = Option::from(self.weierstrass(x).sqrt())?;
        if bool::from(y.is_odd()) == odd {
            Some(y)
        } else {
            Some(-y)
        }
    }

    /// Try-and-increment map to the curve: the first of `t, t + 1, t + 2, ...`
    /// which is the `x`-coordinate of a point.
    ///
    /// Not constant time, and the result is generally outside of the prime
    /// order subgroup.
    pub fn map_to(&self, t: &F) -> Point<'_, F, S> {
        let mut x = *t;
        loop {
            if let Some(y) = Option::<F>::from(self.weierstrass(&x).sqrt()) {
                return Point::from_raw(self, x, y, F::ONE);
            }
            x += F::ONE;
        }
    }

    /// Map a random field element to the curve, see [`Curve::map_to`].
    pub fn random_point(&self, rng: &mut impl RngCore) -> Point<'_, F, S> {
        self.map_to(&F::random(rng))
    }
}

impl<F, S> fmt::Debug for Curve<F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("mode", &self.mode)
            .field("order", &self.order)
            .field("verify_order", &self.verify_order)
            .finish_non_exhaustive()
    }
}

/// Configure a named curve.
///
/// Fails with [`Error::InvalidParameter`] if `p` or `n` don't match the
/// moduli of `F` and `S`, if a number is malformed, or if the generator is not
/// on the curve. The order `n` is stored but not verified against, see
/// [`Curve::set_order`].
///
/// secp256k1 gets its [`Endomorphism`] installed.
pub fn init_curve<F, S>(param: &EcParam, mode: Mode) -> Result<Curve<F, S>>
where
    F: CurveField,
    S: CurveScalar,
{
    let p = parse_uint(param.p).ok_or(Error::InvalidParameter)?;
    let n = parse_uint(param.n).ok_or(Error::InvalidParameter)?;

    if p != hex_uint(F::MODULUS)? || n != hex_uint(S::MODULUS)? {
        return Err(Error::InvalidParameter);
    }

    let mut curve = Curve::parse_coefficients(param.a, param.b, mode)?;
    let gx: F = parse_param(param.gx)?;
    let gy: F = parse_param(param.gy)?;

    if !curve.point_unchecked(gx, gy).is_on_curve_affine() {
        return Err(Error::InvalidParameter);
    }

    curve.generator = Some((gx, gy));

    if bool::from(curve.a.is_zero()) {
        if let Some(glv) = Endomorphism::<F>::secp256k1(&p, &n) {
            curve.set_glv(glv);
        }
    }
    curve.order = n;

    tracing::debug!(name = param.name, "initialized named curve");
    Ok(curve)
}

/// Parse a field element in the [`EcParam`] syntax.
pub(crate) fn parse_param<F: CurveField>(s: &str) -> Result<F> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let value = parse_uint(digits).ok_or(Error::InvalidParameter)?;
    let fe = F::from_uint(&value).ok_or(Error::InvalidParameter)?;
    Ok(if negative { -fe } else { fe })
}

/// Parse a non-negative decimal or `0x`-prefixed hex integer.
pub(crate) fn parse_uint(s: &str) -> Option<BigUint> {
    let s = s.trim();
    match s.strip_prefix("0x") {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(s.as_bytes(), 10),
    }
}

fn hex_uint(hex: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16).ok_or(Error::InvalidParameter)
}
