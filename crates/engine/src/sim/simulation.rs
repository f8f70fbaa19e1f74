//! Simulation context: all mutable state of one run.
//!
//! A [`Simulation`] is created fresh from a [`SimConfig`], owns its frames,
//! policy state and statistics, and is advanced one reference at a time with
//! [`Simulation::step`]. It is a plain value, so snapshots are clones.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analytics::{self, Comparison};
use crate::common::{
    ConfigError, FrameIndex, GLOBAL_PROCESS, InputError, ProcessId, Reference, SimError,
};
use crate::config::{Algorithm, AllocationMode, SimConfig};
use crate::memory::{Allocation, FrameStore};
use crate::policies::{FutureUse, Policy, ReplacementPolicy, VictimContext};
use crate::stats::{SimStats, Summary};

use super::event::{AccessKind, Eviction, StepEvent};

/// A candidate subset together with the policy state scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    /// Owning process in local mode; `None` for the shared global pool.
    pub owner: Option<ProcessId>,
    /// Frames visible to references resolved to this scope.
    pub frames: Vec<FrameIndex>,
    /// Replacement state private to this scope.
    pub policy: Policy,
}

/// State of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    config: SimConfig,
    references: Vec<Reference>,
    /// Scope index of each reference, resolved at start.
    scope_of: Vec<usize>,
    frames: FrameStore,
    allocation: Allocation,
    scopes: Vec<Scope>,
    future: FutureUse,
    stats: SimStats,
    /// Monotonic stamp for load and access order.
    order: u64,
    position: usize,
    log: Vec<StepEvent>,
    /// Internal comparison replay; lifecycle logging drops to debug.
    #[serde(skip)]
    replay: bool,
}

impl Simulation {
    /// Validates `config` and builds a fresh run.
    ///
    /// Nothing is partially constructed: either every check passes or an error
    /// is returned.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidInput`] for an empty sequence or a zero frame count.
    /// - [`SimError::InvalidConfiguration`] when local allocation is impossible.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let sim = Self::build(config, false)?;
        let config = &sim.config;
        tracing::info!(
            algorithm = %config.algorithm,
            mode = %config.mode,
            frames = config.num_frames,
            references = sim.references.len(),
            scopes = sim.scopes.len(),
            "simulation started"
        );
        if config.mode == AllocationMode::Local {
            tracing::info!(
                distribution = %config.distribution,
                allocation = ?sim.allocation.partitions(),
                "local allocation"
            );
        }
        if !sim.allocation.unassigned().is_empty() {
            tracing::warn!(
                unassigned = sim.allocation.unassigned().len(),
                total_frames = config.num_frames,
                "custom allocation leaves frames unassigned"
            );
        }
        Ok(sim)
    }

    /// Builds a run for an internal replay (policy comparison).
    ///
    /// Same validation as [`Simulation::new`], but lifecycle events are logged
    /// at debug level so a comparison does not repeat the live run's messages.
    pub(crate) fn replay(config: SimConfig) -> Result<Self, SimError> {
        let sim = Self::build(config, true)?;
        tracing::debug!(algorithm = %sim.config.algorithm, "replay started");
        Ok(sim)
    }

    fn build(config: SimConfig, replay: bool) -> Result<Self, SimError> {
        let references = config.references()?;
        if config.num_frames == 0 {
            return Err(InputError::ZeroFrames.into());
        }

        let frames = FrameStore::new(config.num_frames);
        let (allocation, scopes, scope_of, stats) = match config.mode {
            AllocationMode::Global => {
                let scope = Scope {
                    owner: None,
                    frames: frames.all_indices(),
                    policy: Policy::new(config.algorithm),
                };
                (
                    Allocation::shared(config.num_frames, GLOBAL_PROCESS),
                    vec![scope],
                    vec![0; references.len()],
                    SimStats::default(),
                )
            }
            AllocationMode::Local => {
                let processes: Vec<ProcessId> = references
                    .iter()
                    .map(|r| r.process)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let allocation = Allocation::plan(
                    config.num_frames,
                    &processes,
                    config.distribution,
                    &config.custom_frames,
                    &references,
                )?;

                let mut index = BTreeMap::new();
                let mut scopes = Vec::with_capacity(processes.len());
                for (&owner, frames) in allocation.partitions() {
                    let _ = index.insert(owner, scopes.len());
                    scopes.push(Scope {
                        owner: Some(owner),
                        frames: frames.clone(),
                        policy: Policy::new(config.algorithm),
                    });
                }
                let scope_of = references
                    .iter()
                    .map(|r| {
                        index
                            .get(&r.process)
                            .copied()
                            .ok_or(ConfigError::ProcessWithoutFrames { process: r.process })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                (allocation, scopes, scope_of, SimStats::with_processes(processes))
            }
        };

        let future = if config.algorithm == Algorithm::Optimal {
            FutureUse::build(&references, config.mode == AllocationMode::Local)
        } else {
            FutureUse::default()
        };

        Ok(Self {
            config,
            references,
            scope_of,
            frames,
            allocation,
            scopes,
            future,
            stats,
            order: 0,
            position: 0,
            log: Vec::new(),
            replay,
        })
    }

    /// Processes the next reference.
    ///
    /// Returns `None` once the sequence is exhausted; a finished run is never replayed.
    pub fn step(&mut self) -> Option<StepEvent> {
        let position = self.position;
        let Reference { page, process } = *self.references.get(position)?;
        let scope = &mut self.scopes[self.scope_of[position]];

        self.order += 1;
        let order = self.order;
        self.stats.record_access(process);

        let event = if let Some(frame) = self.frames.find_holding(page, &scope.frames) {
            self.stats.record_hit(process);
            self.frames.touch(frame, order, position);
            if scope.policy.algorithm() == Algorithm::Clock {
                self.frames.set_referenced(frame, true);
            }
            StepEvent {
                step: position,
                kind: AccessKind::Hit,
                page,
                process,
                frame,
                evicted: None,
                second_chances: Vec::new(),
            }
        } else {
            self.stats.record_fault(process);
            let (frame, evicted, second_chances) = match self.frames.first_empty_in(&scope.frames) {
                Some(frame) => (frame, None, Vec::new()),
                None => {
                    let cx = VictimContext {
                        position,
                        future: &self.future,
                    };
                    let choice = scope.policy.select_victim(&mut self.frames, &scope.frames, &cx);
                    let evicted = self.frames.clear(choice.frame).map(|r| Eviction {
                        page: r.page,
                        owner: r.owner,
                    });
                    self.stats.evictions += 1;
                    self.stats.second_chances += choice.second_chances.len() as u64;
                    (choice.frame, evicted, choice.second_chances)
                }
            };
            self.frames.load(frame, page, process, order, position);
            scope.policy.on_load(frame);
            StepEvent {
                step: position,
                kind: AccessKind::Fault,
                page,
                process,
                frame,
                evicted,
                second_chances,
            }
        };

        tracing::debug!(
            step = position,
            page,
            process,
            frame = event.frame,
            hit = event.is_hit(),
            evicted = event.evicted.map(|e| e.page),
            "step"
        );

        self.position += 1;
        self.log.push(event.clone());
        if self.is_finished() {
            let global = self.stats.global;
            if self.replay {
                tracing::debug!(faults = global.faults, "replay finished");
            } else {
                tracing::info!(
                    faults = global.faults,
                    hits = global.hits,
                    fault_rate = global.fault_rate(),
                    "simulation finished"
                );
            }
        }
        Some(event)
    }

    /// Steps until the sequence is exhausted and returns the final statistics.
    pub fn run_to_end(&mut self) -> &SimStats {
        while self.step().is_some() {}
        &self.stats
    }

    /// Whether every reference has been processed.
    pub fn is_finished(&self) -> bool {
        self.position >= self.references.len()
    }

    /// Number of completed steps (also the position of the next reference).
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Next reference to process, if any.
    pub fn next_reference(&self) -> Option<Reference> {
        self.references.get(self.position).copied()
    }

    /// The configuration this run was started with.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The resolved reference sequence.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Frame contents.
    pub const fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Process-to-frames partition.
    pub const fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Candidate subsets and their policy state.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Candidate subset that references by `process` are resolved to.
    pub fn candidate_subset(&self, process: ProcessId) -> Option<&[FrameIndex]> {
        match self.config.mode {
            AllocationMode::Global => self.scopes.first().map(|s| s.frames.as_slice()),
            AllocationMode::Local => self.allocation.frames_of(process),
        }
    }

    /// Next-use table (empty unless the algorithm is Optimal).
    pub const fn future(&self) -> &FutureUse {
        &self.future
    }

    /// Run counters.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Global summary.
    pub fn summary(&self) -> Summary {
        self.stats.global.summary()
    }

    /// Per-process summaries (empty in global mode).
    pub fn process_summaries(&self) -> BTreeMap<ProcessId, Summary> {
        self.stats.per_process.iter().map(|(&p, s)| (p, s.summary())).collect()
    }

    /// Every event emitted so far, in step order.
    pub fn log(&self) -> &[StepEvent] {
        &self.log
    }

    /// Replays the sequence under every algorithm from a clean state.
    ///
    /// This run is only read; its state is unchanged afterwards.
    ///
    /// # Errors
    ///
    /// Propagates start validation errors; a running simulation's config is already valid.
    pub fn compare(&self) -> Result<Comparison, SimError> {
        analytics::compare_algorithms(&self.config)
    }
}
