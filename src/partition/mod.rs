//! Piece coloring, the color-to-entity partition, and the ownership layout.
//!
//! The coloring is computed externally (by the mesh decomposition) and handed
//! in as an owner function; this module validates it, builds the total
//! partition every piece color appears in, flags entities shared across
//! pieces, and derives the private/shared store layout the rest of the crate
//! addresses fields through.

pub mod coloring;
pub mod layout;
pub mod piece_partition;

pub use coloring::{Owner, PointColors};
pub use layout::{OwnershipLayout, Slot};
pub use piece_partition::{MembershipPolicy, PiecePartition};
