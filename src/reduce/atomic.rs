//! Atomic reduction primitives for contended accumulators.
//!
//! Native atomic add/min/max is unavailable for floating-point types, so the
//! atomic mode runs a compare-and-swap retry loop over the element's bit
//! pattern held in an `AtomicU64`. Relaxed ordering is sufficient: each cell
//! is an independent accumulator and no cross-cell ordering is implied.

use crate::reduce::ops::{ReduceElem, ReduceOp};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scalars whose bit pattern round-trips through a `u64`.
pub trait AtomicBits: Copy {
    /// The scalar's raw bit pattern.
    fn to_bits(self) -> u64;
    /// Reconstruct the scalar from a raw bit pattern.
    fn from_bits(bits: u64) -> Self;
}

impl AtomicBits for f64 {
    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }
    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

impl AtomicBits for i64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits as i64
    }
}

/// One contended scalar accumulator.
///
/// Many writers may call [`apply`](Self::apply) concurrently; the final value
/// equals the sequential reduction of all applied values regardless of
/// interleaving, because sum/min/max are associative and commutative.
#[derive(Debug)]
pub struct AtomicScalar<T: AtomicBits> {
    bits: AtomicU64,
    _marker: PhantomData<T>,
}

impl<T: AtomicBits> AtomicScalar<T> {
    /// A cell holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
            _marker: PhantomData,
        }
    }

    /// Current value of the cell.
    #[inline]
    pub fn load(&self) -> T {
        T::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Overwrite the cell. Safe under concurrent idempotent overwrites of the
    /// same logical value; use [`apply`](Self::apply) for accumulation.
    #[inline]
    pub fn store(&self, value: T) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Replace the cell's value with `f(current)` atomically.
    #[inline]
    pub fn update(&self, mut f: impl FnMut(T) -> T) {
        let mut old = self.bits.load(Ordering::Relaxed);
        loop {
            let new = f(T::from_bits(old)).to_bits();
            match self
                .bits
                .compare_exchange_weak(old, new, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => old = actual,
            }
        }
    }

    /// Atomic form of [`ReduceOp::apply`]: `cell ← cell ⊕ rhs`.
    #[inline]
    pub fn apply<Op>(&self, rhs: T)
    where
        T: ReduceElem,
        Op: ReduceOp<T>,
    {
        self.update(|mut acc| {
            Op::apply(&mut acc, rhs);
            acc
        });
    }

    /// Atomic form of [`ReduceOp::fold`].
    #[inline]
    pub fn fold<Op>(&self, rhs: T)
    where
        T: ReduceElem,
        Op: ReduceOp<T>,
    {
        self.update(|mut acc| {
            Op::fold(&mut acc, rhs);
            acc
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::ops::{MaxOp, MinOp, SumOp};

    #[test]
    fn load_store_roundtrip() {
        let cell = AtomicScalar::new(1.5f64);
        assert_eq!(cell.load(), 1.5);
        cell.store(-2.25);
        assert_eq!(cell.load(), -2.25);
    }

    #[test]
    fn apply_accumulates() {
        let cell = AtomicScalar::new(<SumOp as ReduceOp<f64>>::identity());
        cell.apply::<SumOp>(2.0);
        cell.apply::<SumOp>(0.5);
        assert_eq!(cell.load(), 2.5);
    }

    #[test]
    fn concurrent_sum_matches_sequential() {
        let cell = AtomicScalar::new(<SumOp as ReduceOp<f64>>::identity());
        std::thread::scope(|s| {
            for t in 0..8 {
                let cell = &cell;
                s.spawn(move || {
                    for i in 0..1000 {
                        cell.apply::<SumOp>((t * 1000 + i) as f64);
                    }
                });
            }
        });
        let expected: f64 = (0..8000).map(|i| i as f64).sum();
        assert_eq!(cell.load(), expected);
    }

    #[test]
    fn concurrent_min_max_match_sequential() {
        let lo = AtomicScalar::new(<MinOp as ReduceOp<f64>>::identity());
        let hi = AtomicScalar::new(<MaxOp as ReduceOp<f64>>::identity());
        std::thread::scope(|s| {
            for t in 0..4 {
                let (lo, hi) = (&lo, &hi);
                s.spawn(move || {
                    for i in 0..500 {
                        let v = ((t * 500 + i) as f64) - 1000.0;
                        lo.apply::<MinOp>(v);
                        hi.apply::<MaxOp>(v);
                    }
                });
            }
        });
        assert_eq!(lo.load(), -1000.0);
        assert_eq!(hi.load(), 999.0);
    }

    #[test]
    fn integer_bits_roundtrip() {
        let cell = AtomicScalar::new(-7i64);
        cell.apply::<SumOp>(10);
        assert_eq!(cell.load(), 3);
    }
}
