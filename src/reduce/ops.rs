//! Exclusive (direct) reduction operators over numeric and small-vector types.

use crate::geometry::Vec2;
use num_traits::{Bounded, Zero};

/// Element types reducible by the operator library.
///
/// Provides the scalar arithmetic and identity values each operator kind
/// needs. Small-vector types reduce component-wise: `Vec2`'s two lanes are
/// logically independent scalar accumulators.
pub trait ReduceElem: Copy {
    /// Identity of the sum operator (`0`).
    fn sum_identity() -> Self;
    /// Identity of the min operator (`+∞`, or the type's maximum).
    fn min_identity() -> Self;
    /// Identity of the max operator (`−∞`, or the type's minimum).
    fn max_identity() -> Self;
    /// `self + other`.
    fn elem_add(self, other: Self) -> Self;
    /// Component-wise minimum.
    fn elem_min(self, other: Self) -> Self;
    /// Component-wise maximum.
    fn elem_max(self, other: Self) -> Self;
}

impl ReduceElem for f64 {
    #[inline]
    fn sum_identity() -> Self {
        Self::zero()
    }
    #[inline]
    fn min_identity() -> Self {
        f64::INFINITY
    }
    #[inline]
    fn max_identity() -> Self {
        f64::NEG_INFINITY
    }
    #[inline]
    fn elem_add(self, other: Self) -> Self {
        self + other
    }
    #[inline]
    fn elem_min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }
    #[inline]
    fn elem_max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }
}

impl ReduceElem for i64 {
    #[inline]
    fn sum_identity() -> Self {
        Self::zero()
    }
    #[inline]
    fn min_identity() -> Self {
        <Self as Bounded>::max_value()
    }
    #[inline]
    fn max_identity() -> Self {
        <Self as Bounded>::min_value()
    }
    #[inline]
    fn elem_add(self, other: Self) -> Self {
        self + other
    }
    #[inline]
    fn elem_min(self, other: Self) -> Self {
        std::cmp::min(self, other)
    }
    #[inline]
    fn elem_max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

impl ReduceElem for Vec2 {
    #[inline]
    fn sum_identity() -> Self {
        Vec2::ZERO
    }
    #[inline]
    fn min_identity() -> Self {
        Vec2::new(f64::INFINITY, f64::INFINITY)
    }
    #[inline]
    fn max_identity() -> Self {
        Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY)
    }
    #[inline]
    fn elem_add(self, other: Self) -> Self {
        self + other
    }
    #[inline]
    fn elem_min(self, other: Self) -> Self {
        Vec2::new(self.x.elem_min(other.x), self.y.elem_min(other.y))
    }
    #[inline]
    fn elem_max(self, other: Self) -> Self {
        Vec2::new(self.x.elem_max(other.x), self.y.elem_max(other.y))
    }
}

/// An associative reduction with an identity element.
///
/// `apply` accumulates a value into an accumulator in place; `fold` merges two
/// partial values. Both forms perform the arithmetic directly with no
/// synchronization, so the target must be exclusively owned by the caller. For
/// contended targets, run the same operator through
/// [`AtomicScalar`](crate::reduce::atomic::AtomicScalar) or
/// [`AtomicStorage`](crate::data::atomic_storage::AtomicStorage) instead.
pub trait ReduceOp<T: ReduceElem> {
    /// The operator's identity value.
    fn identity() -> T;
    /// `lhs ← lhs ⊕ rhs`.
    fn apply(lhs: &mut T, rhs: T);
    /// Merge two partial accumulations. Same arithmetic as `apply` for
    /// sum/min/max; kept distinct to match the accumulator/partial calling
    /// convention of reduction trees.
    #[inline]
    fn fold(lhs: &mut T, rhs: T) {
        Self::apply(lhs, rhs);
    }
}

/// Accumulating addition.
pub struct SumOp;

impl<T: ReduceElem> ReduceOp<T> for SumOp {
    #[inline]
    fn identity() -> T {
        T::sum_identity()
    }
    #[inline]
    fn apply(lhs: &mut T, rhs: T) {
        *lhs = lhs.elem_add(rhs);
    }
}

/// Running minimum.
pub struct MinOp;

impl<T: ReduceElem> ReduceOp<T> for MinOp {
    #[inline]
    fn identity() -> T {
        T::min_identity()
    }
    #[inline]
    fn apply(lhs: &mut T, rhs: T) {
        *lhs = lhs.elem_min(rhs);
    }
}

/// Running maximum.
pub struct MaxOp;

impl<T: ReduceElem> ReduceOp<T> for MaxOp {
    #[inline]
    fn identity() -> T {
        T::max_identity()
    }
    #[inline]
    fn apply(lhs: &mut T, rhs: T) {
        *lhs = lhs.elem_max(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_from_identity() {
        let mut acc: f64 = <SumOp as ReduceOp<f64>>::identity();
        for v in [1.5, -0.5, 2.0] {
            SumOp::apply(&mut acc, v);
        }
        assert_eq!(acc, 3.0);
    }

    #[test]
    fn min_max_identities_absorb() {
        let mut lo: f64 = <MinOp as ReduceOp<f64>>::identity();
        let mut hi: f64 = <MaxOp as ReduceOp<f64>>::identity();
        MinOp::apply(&mut lo, 4.25);
        MaxOp::apply(&mut hi, -4.25);
        assert_eq!(lo, 4.25);
        assert_eq!(hi, -4.25);
    }

    #[test]
    fn integer_min_max_use_type_bounds() {
        assert_eq!(<MinOp as ReduceOp<i64>>::identity(), i64::MAX);
        assert_eq!(<MaxOp as ReduceOp<i64>>::identity(), i64::MIN);
        let mut acc = <MinOp as ReduceOp<i64>>::identity();
        MinOp::apply(&mut acc, 7);
        MinOp::apply(&mut acc, -3);
        assert_eq!(acc, -3);
    }

    #[test]
    fn vec2_lanes_reduce_independently() {
        let mut acc = <MinOp as ReduceOp<Vec2>>::identity();
        MinOp::apply(&mut acc, Vec2::new(1.0, 9.0));
        MinOp::apply(&mut acc, Vec2::new(5.0, 2.0));
        assert_eq!(acc, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn fold_matches_apply() {
        let mut a: f64 = 1.0;
        let mut b: f64 = 1.0;
        SumOp::apply(&mut a, 2.0);
        SumOp::fold(&mut b, 2.0);
        assert_eq!(a, b);
    }
}
