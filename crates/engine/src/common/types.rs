//! Identifier and reference types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque page identifier.
pub type PageId = u64;

/// Process identifier. Global mode uses [`GLOBAL_PROCESS`] for bare page tokens.
pub type ProcessId = u32;

/// Stable index of a frame slot in `[0, num_frames)`.
pub type FrameIndex = usize;

/// Implicit owner of every bare reference in global mode.
pub const GLOBAL_PROCESS: ProcessId = 0;

/// A single page reference: the page touched and the process touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced page.
    pub page: PageId,
    /// Process issuing the reference.
    pub process: ProcessId,
}

impl Reference {
    /// Creates a reference owned by `process`.
    pub const fn new(page: PageId, process: ProcessId) -> Self {
        Self { page, process }
    }

    /// Creates a reference owned by the implicit global process.
    pub const fn global(page: PageId) -> Self {
        Self::new(page, GLOBAL_PROCESS)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.process == GLOBAL_PROCESS {
            write!(f, "{}", self.page)
        } else {
            write!(f, "P{}:{}", self.process, self.page)
        }
    }
}
