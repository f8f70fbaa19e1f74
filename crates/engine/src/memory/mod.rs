//! Physical memory model.
//!
//! Frames are symbolic slots: each holds at most one page identifier together
//! with the bookkeeping the replacement policies read. No bytes are stored.
//!
//! # Components
//!
//! - `FrameStore`: the fixed array of frame slots and its subset-scoped operations.
//! - `Allocation`: the process-to-frames partition computed once at run start.

/// Frame slots and residency bookkeeping.
pub mod frame;

/// Allocation planner for local (per-process) frame partitions.
pub mod planner;

pub use frame::{FrameStore, Resident};
pub use planner::Allocation;
