//! MeshPiecesError: Unified error type for mesh-pieces public APIs
//!
//! This error type is used throughout the mesh-pieces library to provide
//! robust, non-panicking error handling for all public APIs. Every variant
//! describes a configuration error that is fatal at construction or setup
//! time: there is no recovery path, the inputs are deterministic, and a
//! repeated attempt reproduces the same fault.

use crate::task::TaskId;
use thiserror::Error;

/// Unified error type for mesh-pieces operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshPiecesError {
    /// A partition must have at least one piece color.
    #[error("piece count must be at least 1")]
    ZeroPieces,
    /// The owner function returned a color outside `[0, pieces)`.
    /// This indicates a corrupt mesh decomposition.
    #[error("entity {entity}: owner color {color} out of range for {pieces} pieces")]
    ColorOutOfRange {
        /// Local index of the offending entity.
        entity: usize,
        /// The out-of-range color.
        color: usize,
        /// Number of pieces in the partition.
        pieces: usize,
    },
    /// The owner function returned a multicolor marker with no owning colors.
    #[error("entity {entity}: multicolor owner list is empty")]
    EmptyOwnerList {
        /// Local index of the offending entity.
        entity: usize,
    },
    /// A global point index exceeds the mesh's point index space.
    #[error("point {point} out of range for index space of {count} points")]
    PointOutOfRange {
        /// The offending global point index.
        point: usize,
        /// Size of the point index space.
        count: usize,
    },
    /// A boundary constraint direction must be nonzero to define a projection.
    #[error("fixed direction must be nonzero")]
    DegenerateDirection,
    /// A transfer buffer's length does not match the field's index space.
    #[error("transfer buffer length {found} does not match index space size {expected}")]
    TransferLengthMismatch {
        /// Entity count of the field's index space.
        expected: usize,
        /// Length of the caller-supplied buffer.
        found: usize,
    },
    /// A slot range falls outside the backing store.
    #[error("slot range [{offset}, {offset}+{len}) exceeds store bounds")]
    SlotOutOfBounds {
        /// Starting offset of the slot range.
        offset: usize,
        /// Length of the slot range.
        len: usize,
    },
    /// A task id was registered twice; ids must be stable and unique.
    #[error("task id {0} already registered")]
    DuplicateTaskId(TaskId),
}
