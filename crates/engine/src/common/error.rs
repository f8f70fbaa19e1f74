//! Error definitions.
//!
//! All errors are raised synchronously when a run is started, before any
//! simulation state is touched. Once a run is accepted, stepping cannot fail
//! except by being called on a driver that has no active run.

use thiserror::Error;

use super::types::ProcessId;

/// Malformed user input: the sequence or the frame count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The reference sequence contains no tokens.
    #[error("reference sequence is empty")]
    EmptySequence,

    /// A token is not a page id or a `process:page` pair.
    #[error("invalid token {token:?} at position {position}")]
    InvalidToken {
        /// Zero-based position of the token in the sequence.
        position: usize,
        /// The offending token text.
        token: String,
    },

    /// The frame count is zero.
    #[error("number of frames must be positive")]
    ZeroFrames,
}

/// Frame allocation that cannot be realised for the requested processes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Local mode with no processes to allocate frames to.
    #[error("local allocation requires at least one process")]
    NoProcesses,

    /// Custom frame counts exceed the frames available.
    #[error("custom allocation requests {requested} frames, {available} available ({excess} over)")]
    OverAllocated {
        /// Sum of the custom counts.
        requested: usize,
        /// Total frames in the store.
        available: usize,
        /// `requested - available`.
        excess: usize,
    },

    /// A referenced process would receive an empty partition.
    #[error("process {process} would receive no frames")]
    ProcessWithoutFrames {
        /// The starved process.
        process: ProcessId,
    },
}

/// Top-level simulator error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Rejected input; the caller must re-prompt.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Rejected allocation configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// `step` was called with no active run.
    #[error("no simulation is running")]
    NotRunning,

    /// `step` was called after the last reference; the run stays inspectable.
    #[error("simulation has finished; reset or start a new run")]
    Finished,
}
