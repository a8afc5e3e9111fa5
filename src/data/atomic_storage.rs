//! Contended backing storage: one atomic cell per scalar lane.
//!
//! The shared store holds multicolor points, which several piece tasks may
//! update inside the same run. Each scalar lane of an element is held in its
//! own [`AtomicScalar`]; a 2-component vector's lanes are reduced
//! independently with no joint atomicity across the pair, which is acceptable
//! because the lanes are logically independent scalar accumulators.

use crate::geometry::Vec2;
use crate::reduce::atomic::{AtomicBits, AtomicScalar};
use crate::reduce::ops::{ReduceElem, ReduceOp};
use core::fmt::{self, Debug};

/// Element types storable in the shared store: a fixed number of scalar lanes,
/// each with an atomicable bit pattern.
pub trait Lanes: Copy {
    /// Scalar lane type.
    type Scalar: AtomicBits;
    /// Number of lanes per element.
    const LANES: usize;
    /// Lane `i` of this element, `i < LANES`.
    fn lane(self, i: usize) -> Self::Scalar;
    /// Assemble an element from its lanes.
    fn from_lanes(f: impl FnMut(usize) -> Self::Scalar) -> Self;
}

impl Lanes for f64 {
    type Scalar = f64;
    const LANES: usize = 1;
    #[inline]
    fn lane(self, _i: usize) -> f64 {
        self
    }
    #[inline]
    fn from_lanes(mut f: impl FnMut(usize) -> f64) -> Self {
        f(0)
    }
}

impl Lanes for i64 {
    type Scalar = i64;
    const LANES: usize = 1;
    #[inline]
    fn lane(self, _i: usize) -> i64 {
        self
    }
    #[inline]
    fn from_lanes(mut f: impl FnMut(usize) -> i64) -> Self {
        f(0)
    }
}

impl Lanes for Vec2 {
    type Scalar = f64;
    const LANES: usize = 2;
    #[inline]
    fn lane(self, i: usize) -> f64 {
        if i == 0 { self.x } else { self.y }
    }
    #[inline]
    fn from_lanes(mut f: impl FnMut(usize) -> f64) -> Self {
        Vec2::new(f(0), f(1))
    }
}

/// Shared (contended) storage for `len` elements of `V`.
///
/// `load`/`store` move whole elements lane by lane; `apply` runs the atomic
/// reduction path per lane. Element indices are bounds-checked by the backing
/// vector on every access.
pub struct AtomicStorage<V: Lanes> {
    cells: Vec<AtomicScalar<V::Scalar>>,
    len: usize,
}

impl<V: Lanes> Debug for AtomicStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicStorage")
            .field("len", &self.len)
            .field("lanes", &V::LANES)
            .finish()
    }
}

impl<V: Lanes> AtomicStorage<V> {
    /// Storage for `len` elements, every lane filled from `fill`.
    pub fn with_len(len: usize, fill: V) -> Self {
        let cells = (0..len * V::LANES)
            .map(|i| AtomicScalar::new(fill.lane(i % V::LANES)))
            .collect();
        Self { cells, len }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element at `idx`.
    #[inline]
    pub fn load(&self, idx: usize) -> V {
        let base = idx * V::LANES;
        V::from_lanes(|l| self.cells[base + l].load())
    }

    /// Overwrite element `idx` with `value`, lane by lane.
    ///
    /// There is no joint atomicity across lanes; concurrent writers must
    /// either write the same logical value (idempotent overwrite) or use
    /// [`apply`](Self::apply).
    #[inline]
    pub fn store(&self, idx: usize, value: V) {
        let base = idx * V::LANES;
        for l in 0..V::LANES {
            self.cells[base + l].store(value.lane(l));
        }
    }

    /// Atomically accumulate `value` into element `idx` under `Op`, one CAS
    /// loop per lane.
    #[inline]
    pub fn apply<Op>(&self, idx: usize, value: V)
    where
        V::Scalar: ReduceElem,
        Op: ReduceOp<V::Scalar>,
    {
        let base = idx * V::LANES;
        for l in 0..V::LANES {
            self.cells[base + l].apply::<Op>(value.lane(l));
        }
    }
}
