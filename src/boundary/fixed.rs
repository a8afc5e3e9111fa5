//! Fixed boundary condition: remove a vector field's component along a fixed
//! direction at designated boundary points.
//!
//! One task instance runs per piece, over that piece's colored subset of the
//! boundary. The projection is idempotent and commutes with itself, so
//! multiple pieces redundantly re-projecting the same shared-store point in
//! any interleaving produce the same final result; shared writes go through
//! the atomic store and need no further locking.

use crate::data::atomic_storage::AtomicStorage;
use crate::data::field::FieldStore;
use crate::data::storage::Storage;
use crate::geometry::{Vec2, project};
use crate::partition::layout::{OwnershipLayout, Slot};
use crate::partition::piece_partition::PiecePartition;
use crate::piece_error::MeshPiecesError;
use crate::task::{ProcessorKind, TaskDesc, TaskId, TaskRegistry};
use std::sync::Arc;

/// Stable id of the fixed-BC leaf task.
pub const APPLY_FIXED_BC: TaskId = TaskId(6600);

/// Register the fixed-BC task variants with the scheduler's registry.
///
/// Called once during the deterministic initialization phase, before any
/// instance is scheduled.
pub fn register_tasks(registry: &mut TaskRegistry) -> Result<(), MeshPiecesError> {
    registry.register(TaskDesc::new(
        APPLY_FIXED_BC,
        "apply_fixed_bc",
        ProcessorKind::Cpu,
        true,
    ))
}

/// A fixed boundary constraint over an ordered list of boundary points.
///
/// Construction builds the boundary-point partition and persists two parallel
/// per-boundary-point fields: the global-index map (boundary-local to
/// mesh-global point index) and the store selector (`0` private, `1` shared).
/// Both are immutable afterward and live and die with the constraint; the
/// force and velocity stores themselves are owned by the physics state, not by
/// the boundary object.
#[derive(Debug)]
pub struct FixedBoundary {
    layout: Arc<OwnershipLayout>,
    direction: Vec2,
    global_index: Vec<usize>,
    selector: Vec<u8>,
    partition: PiecePartition,
}

impl FixedBoundary {
    /// Build a fixed boundary constraint from the mesh's ownership layout, a
    /// fixed direction, and an ordered global point index list. Order is
    /// significant: it defines the boundary-local indices the partition and
    /// field maps are built over.
    ///
    /// # Errors
    /// - [`MeshPiecesError::DegenerateDirection`] if `direction` is zero.
    /// - [`MeshPiecesError::PointOutOfRange`] if a boundary point falls
    ///   outside the layout's index space.
    pub fn new(
        layout: Arc<OwnershipLayout>,
        direction: Vec2,
        boundary_points: Vec<usize>,
    ) -> Result<Self, MeshPiecesError> {
        if !(direction.length_squared() > 0.0) {
            return Err(MeshPiecesError::DegenerateDirection);
        }
        if let Some(&point) = boundary_points.iter().find(|&&p| p >= layout.len()) {
            return Err(MeshPiecesError::PointOutOfRange {
                point,
                count: layout.len(),
            });
        }
        if boundary_points.is_empty() {
            log::warn!("fixed boundary constraint built over an empty point list");
        }
        let partition = PiecePartition::build_with_policy(
            boundary_points.len(),
            layout.pieces(),
            layout.policy(),
            |b| layout.colors().owner(boundary_points[b]).clone(),
        )?;
        let selector = boundary_points
            .iter()
            .map(|&p| layout.selector(p))
            .collect();
        Ok(Self {
            layout,
            direction,
            global_index: boundary_points,
            selector,
            partition,
        })
    }

    /// The fixed constraint direction.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Number of boundary points.
    #[inline]
    pub fn len(&self) -> usize {
        self.global_index.len()
    }

    /// Whether the boundary point list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.global_index.is_empty()
    }

    /// The persisted boundary-local to mesh-global index map.
    #[inline]
    pub fn global_index(&self) -> &[usize] {
        &self.global_index
    }

    /// The persisted per-boundary-point store selector field.
    #[inline]
    pub fn store_selectors(&self) -> &[u8] {
        &self.selector
    }

    /// The boundary-point partition, one bucket per piece color.
    #[inline]
    pub fn partition(&self) -> &PiecePartition {
        &self.partition
    }

    /// Per-piece leaf task: project force and velocity at every boundary
    /// point in `piece`'s bucket, in boundary order.
    ///
    /// `force_private`/`velocity_private` are the piece's own private slabs;
    /// `force_shared`/`velocity_shared` are the fields' contended stores.
    /// Private points use plain read-modify-write (no other piece touches
    /// them); shared points read and overwrite through the atomic store,
    /// which is safe under any piece interleaving because the projection is
    /// idempotent. The task never blocks and performs no further dispatch.
    pub fn apply_piece(
        &self,
        piece: usize,
        force_private: &mut [Vec2],
        force_shared: &AtomicStorage<Vec2>,
        velocity_private: &mut [Vec2],
        velocity_shared: &AtomicStorage<Vec2>,
    ) {
        let d = self.direction;
        for &b in self.partition.bucket(piece) {
            let p = self.global_index[b];
            match self.layout.slot(p) {
                Slot::Private { piece: owner, idx } => {
                    debug_assert_eq!(self.selector[b], 0);
                    debug_assert_eq!(owner, piece, "private boundary point owned elsewhere");
                    let f = force_private[idx];
                    force_private[idx] = project(f, d);
                    let u = velocity_private[idx];
                    velocity_private[idx] = project(u, d);
                }
                Slot::Shared { idx } => {
                    debug_assert_eq!(self.selector[b], 1);
                    let f = force_shared.load(idx);
                    force_shared.store(idx, project(f, d));
                    let u = velocity_shared.load(idx);
                    velocity_shared.store(idx, project(u, d));
                }
            }
        }
    }

    /// Run the task for every piece, sequentially, in color order.
    pub fn apply_all(&self, force: &mut FieldStore<Vec2>, velocity: &mut FieldStore<Vec2>) {
        debug_assert_eq!(force.layout().len(), self.layout.len());
        debug_assert_eq!(velocity.layout().len(), self.layout.len());
        let (force_slabs, force_shared) = force.split_mut();
        let (velocity_slabs, velocity_shared) = velocity.split_mut();
        for piece in 0..self.partition.pieces() {
            self.apply_piece(
                piece,
                force_slabs[piece].as_mut_slice(),
                force_shared,
                velocity_slabs[piece].as_mut_slice(),
                velocity_shared,
            );
        }
    }

    /// Run one task instance per piece concurrently. Pieces execute with no
    /// defined relative ordering; private slabs are disjoint across pieces
    /// and shared points are safe under any interleaving.
    #[cfg(feature = "rayon")]
    pub fn par_apply_all(&self, force: &mut FieldStore<Vec2>, velocity: &mut FieldStore<Vec2>) {
        use rayon::prelude::*;
        debug_assert_eq!(force.layout().len(), self.layout.len());
        debug_assert_eq!(velocity.layout().len(), self.layout.len());
        let (force_slabs, force_shared) = force.split_mut();
        let (velocity_slabs, velocity_shared) = velocity.split_mut();
        force_slabs
            .par_iter_mut()
            .zip(velocity_slabs.par_iter_mut())
            .enumerate()
            .for_each(|(piece, (force_slab, velocity_slab))| {
                self.apply_piece(
                    piece,
                    force_slab.as_mut_slice(),
                    force_shared,
                    velocity_slab.as_mut_slice(),
                    velocity_shared,
                );
            });
    }
}
