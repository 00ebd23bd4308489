//! Multi-scalar multiplication.

use crate::{
    curve::Curve,
    field::{CurveField, CurveScalar},
    naf::{add_digit, odd_multiples, wnaf},
    point::Point,
};
use alloc::vec::Vec;
use num_bigint::BigUint;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Maximum number of points sharing one doubling chain in
/// [`Curve::mul_vec`].
pub const MAX_MUL_VEC_N: usize = 16;

/// NAF width used by [`Curve::mul_vec`].
const WINDOW: usize = 5;

/// Odd multiples stored per point.
const TABLE_SIZE: usize = 1 << (WINDOW - 2);

/// Hook handles the largest multiple of this many leading elements in
/// [`Curve::mul_each`].
const MUL_EACH_ALIGN: usize = 16;

impl<F, S> Curve<F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Returns `Σ scalars[i] * points[i]` in variable time.
    ///
    /// Extra elements of the longer slice are ignored. Inputs are processed
    /// in batches of [`MAX_MUL_VEC_N`] unless an installed
    /// [`MulVecAccel`](crate::hooks::MulVecAccel) or
    /// [`GlvMul`](crate::hooks::GlvMul) takes over.
    pub fn mul_vec<'c>(&'c self, points: &[Point<'c, F, S>], scalars: &[S]) -> Point<'c, F, S> {
        let n = points.len().min(scalars.len());
        let (points, scalars) = (&points[..n], &scalars[..n]);

        if n == 0 {
            return self.identity();
        }

        if let Some(accel) = &self.mul_vec_accel {
            if n >= accel.min_len() {
                return accel.mul_vec(points, scalars);
            }
        }

        if let Some(glv) = &self.glv {
            if let Some(p) = glv.mul_vec(points, scalars, false) {
                return p;
            }
        }

        points
            .chunks(MAX_MUL_VEC_N)
            .zip(scalars.chunks(MAX_MUL_VEC_N))
            .fold(self.identity(), |acc, (p, k)| acc.add(&self.mul_vec_batch(p, k)))
    }

    /// Interleaved width-5 NAF over at most [`MAX_MUL_VEC_N`] points with a
    /// shared doubling chain.
    fn mul_vec_batch<'c>(&'c self, points: &[Point<'c, F, S>], scalars: &[S]) -> Point<'c, F, S> {
        let scalars: Vec<BigUint> = scalars.iter().map(CurveScalar::to_biguint).collect();
        self.mul_vec_uint(points, &scalars)
    }

    /// Interleaved width-5 NAF over unreduced integers, bypassing every hook.
    pub(crate) fn mul_vec_uint<'c>(
        &'c self,
        points: &[Point<'c, F, S>],
        scalars: &[BigUint],
    ) -> Point<'c, F, S> {
        let digits: Vec<Vec<i8>> = scalars.iter().map(|k| wnaf(k, WINDOW)).collect();

        let mut tables = Vec::with_capacity(points.len() * TABLE_SIZE);
        for p in points {
            tables.extend(odd_multiples(p, WINDOW));
        }
        Point::batch_normalize(&mut tables);

        let max_len = digits.iter().map(Vec::len).max().unwrap_or(0);
        let mut acc = self.identity();

        for pos in (0..max_len).rev() {
            acc = acc.double();
            for (naf, table) in digits.iter().zip(tables.chunks(TABLE_SIZE)) {
                if let Some(&digit) = naf.get(pos) {
                    add_digit(&mut acc, table, digit);
                }
            }
        }

        acc
    }

    /// Parallel [`Curve::mul_vec`].
    ///
    /// Splits the input into `threads` contiguous slices, or as many as the
    /// thread pool has when `threads` is zero (fewer for short inputs), and
    /// sums the partial results in slice order so the representation of the
    /// result doesn't depend on scheduling.
    #[cfg(feature = "rayon")]
    #[tracing::instrument(skip_all, level = "debug", fields(n = points.len()))]
    pub fn mul_vec_mt<'c>(
        &'c self,
        points: &[Point<'c, F, S>],
        scalars: &[S],
        threads: usize,
    ) -> Point<'c, F, S> {
        let n = points.len().min(scalars.len());

        let mut cpu_n = threads;
        if cpu_n == 0 {
            cpu_n = rayon::current_num_threads();
            if n < MAX_MUL_VEC_N * cpu_n {
                cpu_n = n.div_ceil(MAX_MUL_VEC_N);
            }
        }

        if cpu_n <= 1 || n <= cpu_n {
            return self.mul_vec(points, scalars);
        }

        tracing::debug!(threads = cpu_n, "splitting multi-scalar multiplication");

        let q = n / cpu_n;
        let r = n % cpu_n;

        let partial: Vec<Point<'c, F, S>> = (0..cpu_n)
            .into_par_iter()
            .map(|i| {
                let start = q * i + i.min(r);
                let end = start + q + usize::from(i < r);
                self.mul_vec(&points[start..end], &scalars[start..end])
            })
            .collect();

        partial
            .iter()
            .fold(self.identity(), |acc, p| acc.add(p))
    }

    /// Parallel [`Curve::mul_vec`]; single threaded without the `rayon`
    /// feature.
    #[cfg(not(feature = "rayon"))]
    pub fn mul_vec_mt<'c>(
        &'c self,
        points: &[Point<'c, F, S>],
        scalars: &[S],
        threads: usize,
    ) -> Point<'c, F, S> {
        let _ = threads;
        self.mul_vec(points, scalars)
    }

    /// Replace each `points[i]` with `scalars[i] * points[i]`.
    ///
    /// Points without a matching scalar are left unchanged.
    ///
    /// An installed [`MulEachAccel`](crate::hooks::MulEachAccel) handles the
    /// longest prefix whose length is a multiple of 16.
    pub fn mul_each(&self, points: &mut [Point<'_, F, S>], scalars: &[S]) {
        let n = points.len().min(scalars.len());
        let mut done = 0;

        if let Some(accel) = &self.mul_each_accel {
            if n >= MUL_EACH_ALIGN {
                done = n - n % MUL_EACH_ALIGN;
                accel.mul_each(&mut points[..done], &scalars[..done]);
            }
        }

        for (p, k) in points[done..n].iter_mut().zip(&scalars[done..n]) {
            *p = p.mul(k);
        }
    }
}
