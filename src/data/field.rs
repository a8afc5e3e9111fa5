//! A per-point field held in the private/shared store pair.

use crate::data::atomic_storage::{AtomicStorage, Lanes};
use crate::data::storage::{Storage, VecStorage};
use crate::partition::layout::{OwnershipLayout, Slot};
use crate::piece_error::MeshPiecesError;
use std::sync::Arc;

/// One field over a point ownership layout.
///
/// Private values live in compact per-piece slabs (`VecStorage`), exclusively
/// owned by that piece's task; shared values live in one [`AtomicStorage`].
/// A point's store selector (held by the layout and persisted by boundary
/// definitions) picks which side holds its current value.
#[derive(Debug)]
pub struct FieldStore<V: Lanes> {
    layout: Arc<OwnershipLayout>,
    private: Vec<VecStorage<V>>,
    shared: AtomicStorage<V>,
}

impl<V: Lanes> FieldStore<V> {
    /// Allocate the store pair for `layout`, every slot filled with `fill`.
    pub fn new(layout: Arc<OwnershipLayout>, fill: V) -> Self {
        let private = layout
            .private_lens()
            .iter()
            .map(|&n| VecStorage::with_len(n, fill))
            .collect();
        let shared = AtomicStorage::with_len(layout.shared_len(), fill);
        Self {
            layout,
            private,
            shared,
        }
    }

    /// The ownership layout this field is partitioned by.
    #[inline]
    pub fn layout(&self) -> &OwnershipLayout {
        &self.layout
    }

    /// Entity count of the field's global index space.
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Whether the index space is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Value of global point `p`, read through its slot.
    ///
    /// # Panics
    /// Panics if `p` is outside the index space.
    pub fn get(&self, p: usize) -> V {
        match self.layout.slot(p) {
            Slot::Private { piece, idx } => self.private[piece].as_slice()[idx],
            Slot::Shared { idx } => self.shared.load(idx),
        }
    }

    /// Overwrite global point `p` through its slot.
    ///
    /// # Panics
    /// Panics if `p` is outside the index space.
    pub fn set(&mut self, p: usize, value: V) {
        match self.layout.slot(p) {
            Slot::Private { piece, idx } => self.private[piece].as_mut_slice()[idx] = value,
            Slot::Shared { idx } => self.shared.store(idx, value),
        }
    }

    /// Read-only view of `piece`'s private slab.
    #[inline]
    pub fn private_slab(&self, piece: usize) -> &[V] {
        self.private[piece].as_slice()
    }

    /// The contended side of the store pair.
    #[inline]
    pub fn shared(&self) -> &AtomicStorage<V> {
        &self.shared
    }

    /// Split into the per-piece private slabs and the shared store, for
    /// per-piece task dispatch: each task takes `&mut` its own slab while all
    /// tasks share the atomic store.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [VecStorage<V>], &AtomicStorage<V>) {
        (&mut self.private, &self.shared)
    }

    /// Copy the whole field in global index order into `out`.
    ///
    /// # Errors
    /// [`MeshPiecesError::TransferLengthMismatch`] if `out.len()` is not the
    /// entity count of the index space. Nothing is copied on error.
    pub fn read_all(&self, out: &mut [V]) -> Result<(), MeshPiecesError> {
        if out.len() != self.len() {
            return Err(MeshPiecesError::TransferLengthMismatch {
                expected: self.len(),
                found: out.len(),
            });
        }
        for (p, dst) in out.iter_mut().enumerate() {
            *dst = self.get(p);
        }
        Ok(())
    }

    /// Overwrite the whole field in global index order from `src`, without
    /// reading prior contents (write-discard).
    ///
    /// # Errors
    /// [`MeshPiecesError::TransferLengthMismatch`] on length mismatch;
    /// nothing is written on error.
    pub fn write_all(&mut self, src: &[V]) -> Result<(), MeshPiecesError> {
        if src.len() != self.len() {
            return Err(MeshPiecesError::TransferLengthMismatch {
                expected: self.len(),
                found: src.len(),
            });
        }
        for (p, &value) in src.iter().enumerate() {
            self.set(p, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::partition::coloring::{Owner, PointColors};

    fn layout() -> Arc<OwnershipLayout> {
        let colors = PointColors::new(
            2,
            vec![
                Owner::Single(0),
                Owner::Single(0),
                Owner::Single(1),
                Owner::Multi(vec![0, 1]),
            ],
        )
        .unwrap();
        Arc::new(OwnershipLayout::new(colors))
    }

    #[test]
    fn get_set_route_through_slots() {
        let mut field = FieldStore::new(layout(), Vec2::ZERO);
        field.set(1, Vec2::new(1.0, 2.0));
        field.set(3, Vec2::new(-4.0, 5.0));
        assert_eq!(field.get(1), Vec2::new(1.0, 2.0));
        assert_eq!(field.private_slab(0)[1], Vec2::new(1.0, 2.0));
        assert_eq!(field.get(3), Vec2::new(-4.0, 5.0));
        assert_eq!(field.shared().load(0), Vec2::new(-4.0, 5.0));
    }

    #[test]
    fn whole_field_round_trip_in_global_order() {
        let mut field = FieldStore::new(layout(), 0.0f64);
        let buf = vec![10.0, 11.0, 12.0, 13.0];
        field.write_all(&buf).unwrap();
        let mut out = vec![0.0; 4];
        field.read_all(&mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let mut field = FieldStore::new(layout(), 0.0f64);
        assert_eq!(
            field.write_all(&[1.0, 2.0]).unwrap_err(),
            MeshPiecesError::TransferLengthMismatch {
                expected: 4,
                found: 2
            }
        );
        let mut out = vec![0.0; 5];
        assert_eq!(
            field.read_all(&mut out).unwrap_err(),
            MeshPiecesError::TransferLengthMismatch {
                expected: 4,
                found: 5
            }
        );
    }
}
