//! Cross-policy comparison.
//!
//! Replays one configuration under every algorithm, each from a clean state
//! (fresh frames, fresh policy state, its own next-use table). The live run
//! the comparison was requested from is only borrowed, never mutated.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::SimError;
use crate::config::{Algorithm, SimConfig};
use crate::sim::Simulation;
use crate::stats::Summary;

/// Final summary of each algorithm on the same input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Results keyed by algorithm, in comparison order.
    pub results: BTreeMap<Algorithm, Summary>,
}

impl Comparison {
    /// Summary for `algorithm`.
    pub fn get(&self, algorithm: Algorithm) -> Option<&Summary> {
        self.results.get(&algorithm)
    }

    /// Algorithm with the fewest faults; earlier comparison order wins ties.
    pub fn best(&self) -> Option<Algorithm> {
        self.results
            .iter()
            .min_by_key(|(_, summary)| summary.faults)
            .map(|(&algorithm, _)| algorithm)
    }

    /// Prints a fault-rate table to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("ALGORITHM COMPARISON");
        println!("==========================================================");
        println!("{:<10} {:>8} {:>8} {:>12}", "algorithm", "faults", "hits", "fault_rate");
        for (algorithm, summary) in &self.results {
            println!(
                "{:<10} {:>8} {:>8} {:>11.2}%",
                algorithm.name(),
                summary.faults,
                summary.hits,
                summary.fault_rate * 100.0
            );
        }
        println!("==========================================================");
    }
}

/// Runs `config`'s sequence to completion under each algorithm.
///
/// Mode and distribution are kept; only the algorithm changes.
///
/// # Errors
///
/// Validation errors from starting the replays.
pub fn compare_algorithms(config: &SimConfig) -> Result<Comparison, SimError> {
    let mut results = BTreeMap::new();
    for algorithm in Algorithm::ALL {
        let mut replay = Simulation::replay(config.clone().with_algorithm(algorithm))?;
        let summary = replay.run_to_end().global.summary();
        let _ = results.insert(algorithm, summary);
    }
    tracing::debug!(?results, "algorithm comparison");
    Ok(Comparison { results })
}
