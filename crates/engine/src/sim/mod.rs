//! Simulation driver.
//!
//! Provides the caller-owned run context ([`Simulation`]), the events each step
//! emits ([`StepEvent`]), and the idle/running/finished state machine
//! ([`Simulator`]) that presentation layers drive one step at a time.

/// Step events emitted for presentation layers.
pub mod event;

/// Per-run simulation context and step transition.
pub mod simulation;

/// Idle/running/finished state machine.
pub mod simulator;

pub use event::{AccessKind, Eviction, StepEvent};
pub use simulation::{Scope, Simulation};
pub use simulator::{RunState, Simulator};
