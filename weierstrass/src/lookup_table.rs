use crate::{
    field::{CurveField, CurveScalar},
    point::Point,
};
use elliptic_curve::subtle::{ConditionallySelectable, ConstantTimeEq};

/// Internal constant for the number of entries in a [`LookupTable`].
const LUT_SIZE: usize = 16;

/// Lookup table containing precomputed values `[0, p, 2p, ..., 15p]`
#[derive(Clone, Copy, Debug)]
pub(crate) struct LookupTable<'c, F: CurveField, S: CurveScalar> {
    points: [Point<'c, F, S>; LUT_SIZE],
}

impl<'c, F, S> LookupTable<'c, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Compute a new lookup table from the given point.
    pub(crate) fn new(p: &Point<'c, F, S>) -> Self {
        let mut points = [p.curve.identity(); LUT_SIZE];

        for j in 1..LUT_SIZE {
            points[j] = points[j - 1].add(p);
        }

        Self { points }
    }

    /// Given `0 <= slot < 16`, returns `slot * p` reading every entry.
    pub(crate) fn select(&self, slot: u8) -> Point<'c, F, S> {
        debug_assert!((slot as usize) < LUT_SIZE);

        let mut t = self.points[0];

        for (j, point) in self.points.iter().enumerate().skip(1) {
            let c = slot.ct_eq(&(j as u8));
            t.conditional_assign(point, c);
        }

        t
    }
}
