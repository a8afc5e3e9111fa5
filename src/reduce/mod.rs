//! Reduction operator library: sum/min/max with exclusive and atomic modes.
//!
//! Each operator kind exposes the same small interface ([`ops::ReduceOp`]:
//! identity, `apply`, `fold`) and comes in two execution modes. The exclusive
//! mode performs the arithmetic directly on a `&mut` accumulator; the atomic
//! mode ([`atomic::AtomicScalar`]) runs a compare-and-swap retry loop over the
//! element's bit pattern, since native atomic add/min/max is unavailable for
//! floating-point types. Which mode to use is a caller decision based on store
//! classification (private vs shared), never decided inside the operator.

pub mod atomic;
pub mod ops;

pub use atomic::{AtomicBits, AtomicScalar};
pub use ops::{MaxOp, MinOp, ReduceElem, ReduceOp, SumOp};
