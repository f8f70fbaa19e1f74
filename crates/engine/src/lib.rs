//! Demand-paging simulator library.
//!
//! This crate implements a step-driven page replacement simulator with the following:
//! 1. **Memory:** A fixed set of frame slots and the allocation planner that partitions
//!    them between processes (local mode) or shares them (global mode).
//! 2. **Policies:** FIFO, LRU, Clock (second chance) and Optimal (Belady) victim selection.
//! 3. **Simulation:** The driver state machine that consumes one page reference per step.
//! 4. **Analytics:** Working-set thrashing checks, locality metrics, and cross-policy comparison.
//! 5. **Configuration:** JSON-deserializable run parameters and reference sequence parsing.

/// Common types (page/process identifiers, references) and error definitions.
pub mod common;
/// Simulation configuration (defaults, enums, sequence tokens).
pub mod config;
/// Frame store and allocation planner.
pub mod memory;
/// Replacement policies (FIFO, LRU, Clock, Optimal).
pub mod policies;
/// Simulation driver, per-run context, and step events.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Derived analytics: working set, locality, policy comparison.
pub mod analytics;

/// Root configuration type; build with `SimConfig::new` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Error type returned when a run cannot be started or stepped.
pub use crate::common::SimError;
/// Caller-owned state of a single run.
pub use crate::sim::Simulation;
/// Idle/running/finished state machine wrapping a `Simulation`.
pub use crate::sim::Simulator;
