//! Data module: dual-store field storage and the field-transfer gateway.
//!
//! A field lives in a store pair: compact per-piece private slabs for
//! exclusively-owned points and one contended atomic array for multicolor
//! points. The ownership layout fixes which side holds each point; the
//! transfer gateway moves whole fields between partitioned storage and
//! caller-supplied linear buffers under a scoped, blocking mapping.
#![warn(missing_docs)]

pub mod atomic_storage;
pub mod field;
pub mod storage;
pub mod transfer;

pub use atomic_storage::{AtomicStorage, Lanes};
pub use field::FieldStore;
pub use storage::{Storage, VecStorage};
pub use transfer::FieldHandle;
