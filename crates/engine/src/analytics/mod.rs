//! Derived analytics over a run or its input.
//!
//! # Analyses
//!
//! - `working_set`: distinct pages in a trailing window, a thrashing heuristic.
//! - `locality`: average, temporal and spatial locality of a page sequence.
//! - `compare`: fault counts of every policy on the same input.

/// Cross-policy comparison.
pub mod compare;

/// Locality metrics.
pub mod locality;

/// Working-set and fault-rate thrashing heuristics.
pub mod working_set;

pub use compare::{Comparison, compare_algorithms};
pub use locality::{Locality, locality, locality_with_window};
pub use working_set::{WorkingSet, fault_rate_thrashing, process_working_set, working_set};
