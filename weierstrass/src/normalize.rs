//! Batch normalization with Montgomery's trick.

use crate::{
    curve::Mode,
    field::{CurveField, CurveScalar},
    point::Point,
    point_arithmetic::dispatch,
};
use alloc::vec::Vec;

/// Number of points sharing one inversion.
const CHUNK_SIZE: usize = 256;

impl<F, S> Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Normalize every point in place, see [`Point::normalize`].
    ///
    /// Costs one field inversion per chunk of points. Points which are
    /// already normalized are left out of the inversion.
    pub fn batch_normalize(points: &mut [Self]) {
        match points.first() {
            None => return,
            Some(p) if p.curve.mode == Mode::Affine => return,
            Some(_) => (),
        }

        let mut prefix = Vec::with_capacity(points.len().min(CHUNK_SIZE));
        for chunk in points.chunks_mut(CHUNK_SIZE) {
            normalize_chunk(chunk, &mut prefix);
        }
    }
}

fn normalize_chunk<F, S>(points: &mut [Point<'_, F, S>], prefix: &mut Vec<F>)
where
    F: CurveField,
    S: CurveScalar,
{
    prefix.clear();
    let mut acc = F::ONE;

    for p in points.iter_mut() {
        if p.is_identity() {
            *p = p.curve.identity();
        } else if p.z != F::ONE {
            prefix.push(acc);
            acc *= p.z;
        }
    }

    if prefix.is_empty() {
        return;
    }

    // acc is a product of non-zero elements
    let mut inv = acc.invert().unwrap_or(F::ZERO);

    let mut i = prefix.len();
    for p in points.iter_mut().rev() {
        if p.is_normalized() {
            continue;
        }
        i -= 1;
        let z_inv = inv * prefix[i];
        inv *= p.z;
        *p = dispatch!(p.curve.mode, normalize(p, &z_inv));
    }
}
