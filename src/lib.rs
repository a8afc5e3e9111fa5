//! # mesh-pieces
//!
//! mesh-pieces is the ownership-partitioning and safe-concurrent-update core of a
//! parallel unstructured-mesh simulation engine. A large mesh is split into
//! disjoint processing pieces; points on piece boundaries are touched by more
//! than one piece, so per-point updates must either be applied exclusively (the
//! point is private to one piece) or atomically (the point is contended).
//!
//! ## Subsystems
//! - [`partition`]: piece coloring, the total color-to-entity partition, and the
//!   private/shared ownership layout derived from it
//! - [`data`]: the private/shared dual-store for per-point fields and the scoped
//!   field-transfer gateway between linear buffers and partitioned storage
//! - [`reduce`]: generic sum/min/max reduction operators with exclusive and
//!   atomic (CAS-on-bit-pattern) execution modes
//! - [`boundary`]: the fixed boundary-condition task that projects force and
//!   velocity to remove their component along a fixed direction, per piece
//! - [`task`]: stable task identifiers and the explicit, ordered task registry
//!   consumed by an external scheduler
//!
//! ## Determinism
//!
//! Partition buckets preserve entity order, boundary points are processed in the
//! order given by the boundary definition, and the task registry iterates in
//! registration order. Shared-store writes are safe under any piece
//! interleaving because the boundary projection is idempotent.
//!
//! ## Usage
//! Add `mesh-pieces` as a dependency in your `Cargo.toml` and enable features
//! as needed:
//!
//! ```toml
//! [dependencies]
//! mesh-pieces = "0.1"
//! # Optional features:
//! # features = ["rayon"]
//! ```

pub mod boundary;
pub mod data;
pub mod geometry;
pub mod partition;
pub mod piece_error;
pub mod reduce;
pub mod task;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::boundary::FixedBoundary;
    pub use crate::data::atomic_storage::AtomicStorage;
    pub use crate::data::field::FieldStore;
    pub use crate::data::storage::{Storage, VecStorage};
    pub use crate::data::transfer::FieldHandle;
    pub use crate::geometry::{Vec2, project};
    pub use crate::partition::coloring::{Owner, PointColors};
    pub use crate::partition::layout::{OwnershipLayout, Slot};
    pub use crate::partition::piece_partition::{MembershipPolicy, PiecePartition};
    pub use crate::piece_error::MeshPiecesError;
    pub use crate::reduce::atomic::{AtomicBits, AtomicScalar};
    pub use crate::reduce::ops::{MaxOp, MinOp, ReduceElem, ReduceOp, SumOp};
    pub use crate::task::{ProcessorKind, TaskDesc, TaskId, TaskRegistry};
}
