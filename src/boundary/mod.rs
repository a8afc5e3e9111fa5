//! Boundary condition enforcement over colored boundary-point partitions.

pub mod fixed;

pub use fixed::{APPLY_FIXED_BC, FixedBoundary, register_tasks};
