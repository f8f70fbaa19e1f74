//! Simulator State Machine Tests.

use pagesim_core::Simulator;
use pagesim_core::common::{InputError, SimError};
use pagesim_core::config::{Algorithm, SimConfig};
use pagesim_core::sim::RunState;
use pretty_assertions::assert_eq;

use crate::common::{BELADY, init_tracing};

fn config(pages: &[u64]) -> SimConfig {
    SimConfig::from_pages(pages, 3, Algorithm::Fifo)
}

#[test]
fn starts_idle() {
    let sim = Simulator::new();
    assert_eq!(sim.state(), RunState::Idle);
    assert!(sim.simulation().is_none());
}

#[test]
fn step_while_idle_is_rejected() {
    let mut sim = Simulator::new();
    assert_eq!(sim.step(), Err(SimError::NotRunning));
    assert_eq!(sim.compare().map(|_| ()), Err(SimError::NotRunning));
}

#[test]
fn idle_running_finished() {
    init_tracing();
    let mut sim = Simulator::new();
    let started = sim.start(config(&[1, 2])).expect("valid config");
    assert_eq!(started.position(), 0);
    assert_eq!(sim.state(), RunState::Running);

    assert!(sim.step().expect("step").is_fault());
    assert_eq!(sim.state(), RunState::Running);
    let _ = sim.step().expect("step");
    assert_eq!(sim.state(), RunState::Finished);

    assert_eq!(sim.step(), Err(SimError::Finished));
    assert_eq!(sim.simulation().map(|s| s.summary().faults), Some(2));
}

#[test]
fn exhausted_run_is_distinguished_from_idle() {
    let mut sim = Simulator::new();
    let _ = sim.start(config(&[4])).expect("valid config");
    let _ = sim.step().expect("step");

    let finished = sim.step().expect_err("sequence exhausted");
    assert_eq!(finished, SimError::Finished);
    assert_ne!(finished.to_string(), SimError::NotRunning.to_string());
    assert_eq!(sim.simulation().map(|s| s.log().len()), Some(1));

    sim.reset();
    assert_eq!(sim.step(), Err(SimError::NotRunning));
}

#[test]
fn rejected_start_keeps_previous_run() {
    let mut sim = Simulator::new();
    let _ = sim.start(config(&[1, 2, 3])).expect("valid config");
    let _ = sim.step().expect("step");

    let err = sim.start(SimConfig::from_pages(&[1], 0, Algorithm::Lru)).map(|_| ());
    assert_eq!(err, Err(SimError::InvalidInput(InputError::ZeroFrames)));
    assert_eq!(sim.state(), RunState::Running);
    assert_eq!(sim.simulation().map(|s| s.position()), Some(1));
}

#[test]
fn rejected_start_from_idle_stays_idle() {
    let mut sim = Simulator::new();
    assert!(sim.start(SimConfig::new(Vec::new(), 3, Algorithm::Fifo)).is_err());
    assert_eq!(sim.state(), RunState::Idle);
}

#[test]
fn restart_discards_previous_run() {
    let mut sim = Simulator::new();
    let _ = sim.start(config(&[1, 2])).expect("valid config");
    while sim.step().is_ok() {}
    assert_eq!(sim.state(), RunState::Finished);

    let _ = sim.start(config(&[5, 6, 7])).expect("valid config");
    assert_eq!(sim.state(), RunState::Running);
    let run = sim.simulation().expect("active");
    assert_eq!(run.position(), 0);
    assert_eq!(run.stats().global.accesses, 0);
    assert_eq!(run.frames().pages(), vec![None, None, None]);
}

#[test]
fn reset_returns_to_idle() {
    let mut sim = Simulator::new();
    let _ = sim.start(config(&[1])).expect("valid config");
    sim.reset();
    assert_eq!(sim.state(), RunState::Idle);
    assert_eq!(sim.step(), Err(SimError::NotRunning));
}

#[test]
fn compare_mid_run_leaves_the_run_untouched() {
    let mut sim = Simulator::new();
    let _ = sim.start(config(&BELADY)).expect("valid config");
    for _ in 0..4 {
        let _ = sim.step().expect("step");
    }
    let before = sim.simulation().cloned();

    let comparison = sim.compare().expect("comparison");
    assert_eq!(comparison.get(Algorithm::Fifo).map(|s| s.faults), Some(9));
    assert_eq!(comparison.get(Algorithm::Optimal).map(|s| s.faults), Some(7));
    assert_eq!(sim.simulation().cloned(), before);

    // Stepping resumes where it left off.
    assert_eq!(sim.step().map(|e| e.step), Ok(4));
}
