//! Working-set analysis.
//!
//! The working set at step `t` is the set of distinct pages among the last `W`
//! references before `t`. When it is larger than the frames available, the
//! run is likely thrashing. This is a heuristic, not a guarantee.

use serde::Serialize;

use crate::common::{PageId, ProcessId, Reference};
use crate::config::defaults;
use crate::sim::Simulation;
use crate::stats::RunStats;

/// Working set over a trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingSet {
    /// Number of distinct pages.
    pub size: usize,
    /// Distinct pages in first-seen order.
    pub pages: Vec<PageId>,
    /// Frames the working set is compared against.
    pub capacity: usize,
    /// `size > capacity`.
    pub thrashing: bool,
}

impl WorkingSet {
    fn of<'a>(window: impl Iterator<Item = &'a Reference>, capacity: usize) -> Self {
        let mut pages = Vec::new();
        for r in window {
            if !pages.contains(&r.page) {
                pages.push(r.page);
            }
        }
        let size = pages.len();
        Self {
            size,
            pages,
            capacity,
            thrashing: size > capacity,
        }
    }
}

/// Working set of the last `window` completed references, against all frames.
///
/// A `window` of 0 falls back to the default of 5.
pub fn working_set(sim: &Simulation, window: usize) -> WorkingSet {
    let window = if window == 0 { defaults::WINDOW } else { window };
    let end = sim.position();
    let start = end.saturating_sub(window);
    WorkingSet::of(sim.references()[start..end].iter(), sim.frames().len())
}

/// Working set of the last `window` completed references made by `process`,
/// against the frames that process can use.
pub fn process_working_set(sim: &Simulation, process: ProcessId, window: usize) -> WorkingSet {
    let window = if window == 0 { defaults::WINDOW } else { window };
    let capacity = sim.candidate_subset(process).map_or(0, <[_]>::len);
    let mut recent: Vec<&Reference> = sim.references()[..sim.position()]
        .iter()
        .rev()
        .filter(|r| r.process == process)
        .take(window)
        .collect();
    recent.reverse();
    WorkingSet::of(recent.into_iter(), capacity)
}

/// Fault-rate heuristic: at least 10 accesses and more than half of them faulted.
pub fn fault_rate_thrashing(stats: &RunStats) -> bool {
    stats.accesses >= defaults::THRASHING_MIN_ACCESSES
        && stats.fault_rate() > defaults::THRASHING_FAULT_RATE
}
