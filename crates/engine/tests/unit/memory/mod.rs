//! Memory model tests.

/// Frame store operations.
pub mod frame_store;
