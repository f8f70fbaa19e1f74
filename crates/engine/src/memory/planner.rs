//! Allocation Planner.
//!
//! Partitions the frame indices `[0, F)` into disjoint, process-owned, contiguous
//! blocks for local mode. The plan is computed once when a run starts and never
//! changes afterwards.
//!
//! # Distributions
//!
//! - `Equal`: `F / |P|` frames each; the first `F mod |P|` processes get one extra.
//! - `Proportional`: `round(F * refs(p) / refs)` with a minimum of one; the last
//!   process absorbs the rounding difference so the plan covers exactly `F` frames.
//! - `Custom`: explicit counts in process-id order. Frames left over are reported
//!   and stay unassigned for the whole run.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::common::{ConfigError, FrameIndex, ProcessId, Reference};
use crate::config::{Distribution, defaults};

/// Process-to-frames partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    partitions: BTreeMap<ProcessId, Vec<FrameIndex>>,
    unassigned: Vec<FrameIndex>,
}

impl Allocation {
    /// Plans a partition of `total_frames` frames between `processes`.
    ///
    /// `processes` may be unordered or contain duplicates; the plan always walks
    /// distinct ids in ascending order. `references` supplies the access counts
    /// used by [`Distribution::Proportional`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoProcesses`] if `processes` is empty.
    /// - [`ConfigError::OverAllocated`] if custom counts exceed `total_frames`.
    /// - [`ConfigError::ProcessWithoutFrames`] if any process would get zero frames.
    pub fn plan(
        total_frames: usize,
        processes: &[ProcessId],
        distribution: Distribution,
        custom_frames: &[usize],
        references: &[Reference],
    ) -> Result<Self, ConfigError> {
        let processes: Vec<ProcessId> = processes
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if processes.is_empty() {
            return Err(ConfigError::NoProcesses);
        }

        let counts = match distribution {
            Distribution::Equal => equal_counts(total_frames, processes.len()),
            Distribution::Proportional => {
                proportional_counts(total_frames, &processes, references)?
            }
            Distribution::Custom => {
                custom_counts(total_frames, processes.len(), custom_frames)?
            }
        };

        if let Some(pos) = counts.iter().position(|&c| c == 0) {
            return Err(ConfigError::ProcessWithoutFrames {
                process: processes[pos],
            });
        }

        let mut next = 0;
        let mut partitions = BTreeMap::new();
        for (&process, &count) in processes.iter().zip(&counts) {
            let _ = partitions.insert(process, (next..next + count).collect());
            next += count;
        }
        Ok(Self {
            partitions,
            unassigned: (next..total_frames).collect(),
        })
    }

    /// Global mode: one partition, owned by `owner`, covering every frame.
    pub fn shared(total_frames: usize, owner: ProcessId) -> Self {
        let mut partitions = BTreeMap::new();
        let _ = partitions.insert(owner, (0..total_frames).collect());
        Self {
            partitions,
            unassigned: Vec::new(),
        }
    }

    /// Frames allocated to `process`.
    pub fn frames_of(&self, process: ProcessId) -> Option<&[FrameIndex]> {
        self.partitions.get(&process).map(Vec::as_slice)
    }

    /// Process owning `frame`, if any.
    pub fn owner_of(&self, frame: FrameIndex) -> Option<ProcessId> {
        self.partitions
            .iter()
            .find(|(_, frames)| frames.contains(&frame))
            .map(|(&process, _)| process)
    }

    /// Frames no process owns (custom under-allocation only).
    pub fn unassigned(&self) -> &[FrameIndex] {
        &self.unassigned
    }

    /// Processes in ascending id order.
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.partitions.keys().copied()
    }

    /// All partitions in ascending process order.
    pub fn partitions(&self) -> &BTreeMap<ProcessId, Vec<FrameIndex>> {
        &self.partitions
    }
}

fn equal_counts(total_frames: usize, processes: usize) -> Vec<usize> {
    let base = total_frames / processes;
    let extra = total_frames % processes;
    (0..processes).map(|k| base + usize::from(k < extra)).collect()
}

fn proportional_counts(
    total_frames: usize,
    processes: &[ProcessId],
    references: &[Reference],
) -> Result<Vec<usize>, ConfigError> {
    let total_refs = references.len().max(1) as f64;
    let mut counts: Vec<usize> = processes
        .iter()
        .map(|&process| {
            let refs = references
                .iter()
                .filter(|r| r.process == process)
                .count()
                .max(1);
            let share = (total_frames as f64 * refs as f64 / total_refs).round() as usize;
            share.max(1)
        })
        .collect();

    let (last, head) = counts.split_last_mut().ok_or(ConfigError::NoProcesses)?;
    let taken: usize = head.iter().sum();
    *last = total_frames.saturating_sub(taken);
    if *last == 0 {
        return Err(ConfigError::ProcessWithoutFrames {
            process: processes[processes.len() - 1],
        });
    }
    Ok(counts)
}

fn custom_counts(
    total_frames: usize,
    processes: usize,
    custom_frames: &[usize],
) -> Result<Vec<usize>, ConfigError> {
    let counts: Vec<usize> = (0..processes)
        .map(|k| custom_frames.get(k).copied().unwrap_or(defaults::CUSTOM_FRAMES))
        .collect();
    let requested: usize = counts.iter().sum();
    if requested > total_frames {
        return Err(ConfigError::OverAllocated {
            requested,
            available: total_frames,
            excess: requested - total_frames,
        });
    }
    Ok(counts)
}
