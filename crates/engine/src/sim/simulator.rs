//! Simulator: the idle/running/finished state machine around a run.
//!
//! `start` validates before touching anything, so a rejected configuration
//! leaves the previous run (or the idle state) in place. Steps are synchronous
//! and never partially applied; pacing them is the caller's business.

use serde::Serialize;

use crate::analytics::Comparison;
use crate::common::SimError;
use crate::config::SimConfig;

use super::event::StepEvent;
use super::simulation::Simulation;

/// Lifecycle state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// No active run.
    Idle,
    /// Accepting steps.
    Running,
    /// Sequence exhausted.
    Finished,
}

/// Top-level simulator: owns at most one active run.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    run: Option<Simulation>,
}

impl Simulator {
    /// Creates an idle simulator.
    pub const fn new() -> Self {
        Self { run: None }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        match &self.run {
            None => RunState::Idle,
            Some(run) if run.is_finished() => RunState::Finished,
            Some(_) => RunState::Running,
        }
    }

    /// Starts a fresh run, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Any validation error from [`Simulation::new`]; the simulator is left untouched.
    pub fn start(&mut self, config: SimConfig) -> Result<&Simulation, SimError> {
        let run = Simulation::new(config)?;
        Ok(self.run.insert(run))
    }

    /// Advances the active run by one reference.
    ///
    /// # Errors
    ///
    /// [`SimError::NotRunning`] when idle, [`SimError::Finished`] once the
    /// sequence is exhausted.
    pub fn step(&mut self) -> Result<StepEvent, SimError> {
        let run = self.run.as_mut().ok_or(SimError::NotRunning)?;
        run.step().ok_or(SimError::Finished)
    }

    /// Drops the active run and returns to idle.
    pub fn reset(&mut self) {
        self.run = None;
    }

    /// The active or finished run.
    pub const fn simulation(&self) -> Option<&Simulation> {
        self.run.as_ref()
    }

    /// Compares all algorithms on the active run's input without disturbing it.
    ///
    /// # Errors
    ///
    /// [`SimError::NotRunning`] when idle.
    pub fn compare(&self) -> Result<Comparison, SimError> {
        self.run.as_ref().ok_or(SimError::NotRunning)?.compare()
    }
}
