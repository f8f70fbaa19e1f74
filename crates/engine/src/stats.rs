//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of a run. It provides:
//! 1. **Run counters:** Accesses, faults and hits, with derived fault and hit rates.
//! 2. **Per-process counters:** The same triple for each process in local mode.
//! 3. **Policy activity:** Evictions and Clock second chances.
//! 4. **Reporting:** A serializable [`Summary`] and a sectioned text dump.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::ProcessId;

/// Access, fault and hit counters.
///
/// `accesses == faults + hits` holds after every completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunStats {
    /// References processed.
    pub accesses: u64,
    /// References not found in their candidate subset.
    pub faults: u64,
    /// References found in their candidate subset.
    pub hits: u64,
}

impl RunStats {
    /// Fraction of accesses that faulted; 0 when nothing was accessed.
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.faults as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that hit; 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Serializable summary of these counters.
    pub fn summary(&self) -> Summary {
        Summary::from(*self)
    }
}

/// The `{accesses, faults, hits, fault_rate}` shape handed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// References processed.
    pub accesses: u64,
    /// Page faults.
    pub faults: u64,
    /// Page hits.
    pub hits: u64,
    /// `faults / accesses`, 0 when idle.
    pub fault_rate: f64,
}

impl From<RunStats> for Summary {
    fn from(stats: RunStats) -> Self {
        Self {
            accesses: stats.accesses,
            faults: stats.faults,
            hits: stats.hits,
            fault_rate: stats.fault_rate(),
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"processes"`, `"policy"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "processes", "policy"];

/// All counters of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SimStats {
    /// Counters over every reference.
    pub global: RunStats,
    /// Counters per process (local mode only).
    pub per_process: BTreeMap<ProcessId, RunStats>,
    /// Faults that replaced a resident page.
    pub evictions: u64,
    /// Reference bits cleared by the Clock hand.
    pub second_chances: u64,
}

impl SimStats {
    /// Statistics with a zeroed entry for each local-mode process.
    pub fn with_processes(processes: impl IntoIterator<Item = ProcessId>) -> Self {
        Self {
            per_process: processes.into_iter().map(|p| (p, RunStats::default())).collect(),
            ..Self::default()
        }
    }

    /// Counts one access by `process`.
    pub fn record_access(&mut self, process: ProcessId) {
        self.global.accesses += 1;
        if let Some(stats) = self.per_process.get_mut(&process) {
            stats.accesses += 1;
        }
    }

    /// Counts one hit by `process`.
    pub fn record_hit(&mut self, process: ProcessId) {
        self.global.hits += 1;
        if let Some(stats) = self.per_process.get_mut(&process) {
            stats.hits += 1;
        }
    }

    /// Counts one fault by `process`.
    pub fn record_fault(&mut self, process: ProcessId) {
        self.global.faults += 1;
        if let Some(stats) = self.per_process.get_mut(&process) {
            stats.faults += 1;
        }
    }

    /// Counters of `process`, if it is tracked.
    pub fn process(&self, process: ProcessId) -> Option<&RunStats> {
        self.per_process.get(&process)
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"processes"`, or
    /// `"policy"`. Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            println!("\n==========================================================");
            println!("PAGING SIMULATION STATISTICS");
            println!("==========================================================");
            println!("accesses                 {}", self.global.accesses);
            println!("faults                   {}", self.global.faults);
            println!("hits                     {}", self.global.hits);
            println!("fault_rate               {:.2}%", self.global.fault_rate() * 100.0);
            println!("hit_rate                 {:.2}%", self.global.hit_rate() * 100.0);
            println!("----------------------------------------------------------");
        }
        if want("processes") && !self.per_process.is_empty() {
            println!("PER-PROCESS");
            for (process, stats) in &self.per_process {
                println!(
                    "  P{:<4} accesses {:<6} faults {:<6} hits {:<6} ({:.2}% faults)",
                    process,
                    stats.accesses,
                    stats.faults,
                    stats.hits,
                    stats.fault_rate() * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("policy") {
            println!("POLICY");
            println!("  evictions              {}", self.evictions);
            println!("  second_chances         {}", self.second_chances);
            println!("==========================================================");
        }
    }
}
