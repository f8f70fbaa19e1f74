//! Page Replacement Policies.
//!
//! Implements the algorithms that pick a victim frame when a fault finds no
//! empty frame in the candidate subset.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Clock`: Second chance over the reference bits.
//! - `Optimal`: Belady's farthest-next-use policy.
//!
//! Every policy runs unchanged in global and local mode. The simulation keeps
//! one policy instance per scope (the whole store, or one process partition)
//! and passes that scope's frames as the candidate subset.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Clock (second chance) replacement policy.
pub mod clock;

/// Optimal (Belady) replacement policy and its future-use table.
pub mod optimal;

use serde::Serialize;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use optimal::{FutureUse, OptimalPolicy};

use crate::common::FrameIndex;
use crate::config::Algorithm;
use crate::memory::FrameStore;

/// Read-only run state a policy may consult when choosing a victim.
#[derive(Debug, Clone, Copy)]
pub struct VictimContext<'a> {
    /// Sequence position of the faulting reference.
    pub position: usize,
    /// Next-use table of the run (empty unless the run uses Optimal).
    pub future: &'a FutureUse,
}

/// Outcome of victim selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VictimChoice {
    /// Frame to evict.
    pub frame: FrameIndex,
    /// Frames whose reference bit was cleared on the way (Clock only).
    pub second_chances: Vec<FrameIndex>,
}

impl VictimChoice {
    /// A choice with no second chances.
    pub const fn of(frame: FrameIndex) -> Self {
        Self {
            frame,
            second_chances: Vec::new(),
        }
    }
}

/// Trait for page replacement policies.
///
/// Defines the interface for tracking loads and selecting victim frames.
pub trait ReplacementPolicy {
    /// Updates the policy state after a page is loaded into `frame`.
    ///
    /// Called for every load, whether it filled an empty frame or replaced a victim.
    fn on_load(&mut self, frame: FrameIndex);

    /// Selects a victim frame from `subset`.
    ///
    /// # Arguments
    ///
    /// * `frames` - The frame store (Clock clears reference bits through it).
    /// * `subset` - Candidate frames. Non-empty, and every frame is occupied.
    /// * `cx` - Position in the reference sequence and the future-use table.
    ///
    /// # Returns
    ///
    /// A frame within `subset`. The caller always loads the new page there.
    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        cx: &VictimContext<'_>,
    ) -> VictimChoice;
}

/// Closed set of policies, dispatched by algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// FIFO queue state.
    Fifo(FifoPolicy),
    /// Stateless LRU.
    Lru(LruPolicy),
    /// Clock hand state.
    Clock(ClockPolicy),
    /// Stateless Optimal.
    Optimal(OptimalPolicy),
}

impl Policy {
    /// Fresh policy state for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Fifo => Self::Fifo(FifoPolicy::new()),
            Algorithm::Lru => Self::Lru(LruPolicy),
            Algorithm::Clock => Self::Clock(ClockPolicy::new()),
            Algorithm::Optimal => Self::Optimal(OptimalPolicy),
        }
    }

    /// Algorithm tag of this policy.
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Fifo(_) => Algorithm::Fifo,
            Self::Lru(_) => Algorithm::Lru,
            Self::Clock(_) => Algorithm::Clock,
            Self::Optimal(_) => Algorithm::Optimal,
        }
    }
}

impl ReplacementPolicy for Policy {
    fn on_load(&mut self, frame: FrameIndex) {
        match self {
            Self::Fifo(p) => p.on_load(frame),
            Self::Lru(p) => p.on_load(frame),
            Self::Clock(p) => p.on_load(frame),
            Self::Optimal(p) => p.on_load(frame),
        }
    }

    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        cx: &VictimContext<'_>,
    ) -> VictimChoice {
        match self {
            Self::Fifo(p) => p.select_victim(frames, subset, cx),
            Self::Lru(p) => p.select_victim(frames, subset, cx),
            Self::Clock(p) => p.select_victim(frames, subset, cx),
            Self::Optimal(p) => p.select_victim(frames, subset, cx),
        }
    }
}
