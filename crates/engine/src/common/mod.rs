//! Common types shared across the simulator.
//!
//! This module provides:
//! 1. **Identifiers:** Page, process and frame index aliases.
//! 2. **References:** The `(page, process)` pair consumed by each simulation step.
//! 3. **Error Handling:** Input and configuration errors raised when a run is started.

/// Error types for input validation and configuration.
pub mod error;

/// Reference and identifier definitions.
pub mod types;

pub use error::{ConfigError, InputError, SimError};
pub use types::{FrameIndex, GLOBAL_PROCESS, PageId, ProcessId, Reference};
