//! Field transfer gateway: scoped read/write of one field between partitioned
//! storage and a caller-supplied linear buffer.
//!
//! Acquisition blocks the calling context until the mapping becomes valid,
//! then resumes synchronously. The mapping is a lock guard, so it is released
//! on every exit path (success or failure) before the call returns.

use crate::data::atomic_storage::Lanes;
use crate::data::field::FieldStore;
use crate::piece_error::MeshPiecesError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to one field's store pair.
///
/// The physics driver keeps the handle; setup and output code call
/// [`get`](Self::get)/[`set`](Self::set), and task dispatch takes a scoped
/// mapping via [`write_map`](Self::write_map) for the duration of a pass.
#[derive(Debug)]
pub struct FieldHandle<V: Lanes> {
    inner: RwLock<FieldStore<V>>,
}

impl<V: Lanes> FieldHandle<V> {
    /// Wrap a field store in a transfer handle.
    pub fn new(store: FieldStore<V>) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Entity count of the field's index space.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the field's index space is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocking read mapping: copy the whole field in global index order into
    /// `out`. The mapping is released before returning, on success and on
    /// error alike.
    ///
    /// # Errors
    /// [`MeshPiecesError::TransferLengthMismatch`] if `out.len()` does not
    /// equal the entity count — a fatal precondition violation.
    pub fn get(&self, out: &mut [V]) -> Result<(), MeshPiecesError> {
        let map = self.inner.read();
        map.read_all(out)
    }

    /// Blocking write-discard mapping: overwrite the whole field in global
    /// index order from `src`. Prior contents are not read. The mapping is
    /// released unconditionally.
    ///
    /// # Errors
    /// [`MeshPiecesError::TransferLengthMismatch`] if `src.len()` does not
    /// equal the entity count.
    pub fn set(&self, src: &[V]) -> Result<(), MeshPiecesError> {
        let mut map = self.inner.write();
        map.write_all(src)
    }

    /// Scoped read-only mapping over the store pair.
    pub fn read_map(&self) -> RwLockReadGuard<'_, FieldStore<V>> {
        self.inner.read()
    }

    /// Scoped exclusive mapping over the store pair, used by task dispatch.
    pub fn write_map(&self) -> RwLockWriteGuard<'_, FieldStore<V>> {
        self.inner.write()
    }

    /// Unwrap the handle, recovering the store pair.
    pub fn into_inner(self) -> FieldStore<V> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::coloring::{Owner, PointColors};
    use crate::partition::layout::OwnershipLayout;
    use std::sync::Arc;

    fn handle() -> FieldHandle<f64> {
        let colors = PointColors::new(
            2,
            vec![Owner::Single(0), Owner::Single(1), Owner::Multi(vec![0, 1])],
        )
        .unwrap();
        let layout = Arc::new(OwnershipLayout::new(colors));
        FieldHandle::new(FieldStore::new(layout, 0.0))
    }

    #[test]
    fn set_then_get_round_trips() {
        let h = handle();
        h.set(&[1.0, 2.0, 3.0]).unwrap();
        let mut out = vec![0.0; 3];
        h.get(&mut out).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn mapping_released_after_failed_get() {
        let h = handle();
        let mut wrong = vec![0.0; 2];
        assert!(h.get(&mut wrong).is_err());
        // A write mapping must still be acquirable; a leaked read guard
        // would deadlock here.
        assert!(h.set(&[4.0, 5.0, 6.0]).is_ok());
        let mut out = vec![0.0; 3];
        h.get(&mut out).unwrap();
        assert_eq!(out, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn concurrent_readers_share_the_mapping() {
        let h = handle();
        h.set(&[9.0, 8.0, 7.0]).unwrap();
        let a = h.read_map();
        let b = h.read_map();
        assert_eq!(a.get(0), 9.0);
        assert_eq!(b.get(2), 7.0);
    }
}
