//! Pluggable backing storage for private field slabs.
//!
//! This trait abstracts how a slab's flat buffer is stored (Vec today; a
//! pinned or device buffer later). Offsets are owned and length-tracked, and
//! ranged access is bounds-checked on every path, not just in debug builds.

use core::fmt::{self, Debug};

use crate::piece_error::MeshPiecesError;

/// Contiguous, indexable storage for `V` with slice access.
pub trait Storage<V>: Debug {
    /// Construct a buffer of `len`, filled with `fill`.
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone;

    /// Current length in elements.
    fn len(&self) -> usize;

    /// Whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entire read-only buffer.
    fn as_slice(&self) -> &[V];

    /// Entire mutable buffer.
    fn as_mut_slice(&mut self) -> &mut [V];

    /// Copy `src` into the range `[offset .. offset + src.len())`.
    fn write_at(&mut self, offset: usize, src: &[V]) -> Result<(), MeshPiecesError>
    where
        V: Clone,
    {
        let end = offset
            .checked_add(src.len())
            .ok_or(MeshPiecesError::SlotOutOfBounds {
                offset,
                len: src.len(),
            })?;
        let dst = self.as_mut_slice().get_mut(offset..end).ok_or(
            MeshPiecesError::SlotOutOfBounds {
                offset,
                len: src.len(),
            },
        )?;
        dst.clone_from_slice(src);
        Ok(())
    }

    /// Read the range `[offset .. offset + len)` into `dst`.
    fn read_into(&self, offset: usize, len: usize, dst: &mut [V]) -> Result<(), MeshPiecesError>
    where
        V: Clone,
    {
        if dst.len() != len {
            return Err(MeshPiecesError::TransferLengthMismatch {
                expected: len,
                found: dst.len(),
            });
        }
        let end = offset
            .checked_add(len)
            .ok_or(MeshPiecesError::SlotOutOfBounds { offset, len })?;
        let src = self
            .as_slice()
            .get(offset..end)
            .ok_or(MeshPiecesError::SlotOutOfBounds { offset, len })?;
        dst.clone_from_slice(src);
        Ok(())
    }
}

/// `Vec`-backed storage (default).
#[derive(Clone)]
pub struct VecStorage<V>(pub(crate) Vec<V>);

impl<V> Debug for VecStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<V> Storage<V> for VecStorage<V> {
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone,
    {
        Self(vec![fill; len])
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn as_slice(&self) -> &[V] {
        &self.0
    }

    fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.0
    }
}

impl<V> From<Vec<V>> for VecStorage<V> {
    fn from(v: Vec<V>) -> Self {
        Self(v)
    }
}

impl<V> VecStorage<V> {
    /// Consume the storage and return the underlying `Vec`.
    pub fn into_inner(self) -> Vec<V> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_range() {
        let mut s = VecStorage::with_len(4, 0i64);
        s.write_at(1, &[7, 8]).unwrap();
        let mut out = [0i64; 2];
        s.read_into(1, 2, &mut out).unwrap();
        assert_eq!(out, [7, 8]);
        assert_eq!(s.as_slice(), &[0, 7, 8, 0]);
    }

    #[test]
    fn out_of_bounds_write_rejected() {
        let mut s = VecStorage::with_len(2, 0.0f64);
        assert_eq!(
            s.write_at(1, &[1.0, 2.0]).unwrap_err(),
            MeshPiecesError::SlotOutOfBounds { offset: 1, len: 2 }
        );
    }

    #[test]
    fn read_length_mismatch_rejected() {
        let s = VecStorage::with_len(4, 0.0f64);
        let mut out = [0.0; 3];
        assert_eq!(
            s.read_into(0, 2, &mut out).unwrap_err(),
            MeshPiecesError::TransferLengthMismatch {
                expected: 2,
                found: 3
            }
        );
    }
}
