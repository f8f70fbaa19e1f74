//! Simulation driver tests.


/// Idle/running/finished state machine.
pub mod simulator;
