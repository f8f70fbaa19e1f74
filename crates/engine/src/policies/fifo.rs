//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Evicts the page that has been resident longest, regardless of how recently
//! it was used. The queue holds frame indices in load order; the head is the
//! victim, and the reloaded frame rejoins at the tail.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1)
//!   - `select_victim()`: O(1)
//! - **Space Complexity:** O(|subset|)
//! - **Worst Case:** Exhibits Belady's anomaly; more frames can mean more faults.

use std::collections::VecDeque;

use serde::Serialize;

use super::{ReplacementPolicy, VictimChoice, VictimContext};
use crate::common::FrameIndex;
use crate::memory::FrameStore;

/// FIFO policy state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FifoPolicy {
    /// Frame indices, oldest load first.
    queue: VecDeque<FrameIndex>,
}

impl FifoPolicy {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame indices in load order, oldest first.
    pub fn queue(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.queue.iter().copied()
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn on_load(&mut self, frame: FrameIndex) {
        self.queue.push_back(frame);
    }

    /// Pops the queue head. The caller's reload pushes it back via `on_load`.
    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        _cx: &VictimContext<'_>,
    ) -> VictimChoice {
        let frame = self
            .queue
            .pop_front()
            .unwrap_or_else(|| oldest_load(frames, subset));
        VictimChoice::of(frame)
    }
}

/// Fallback for a queue that was never fed: scan load stamps instead.
fn oldest_load(frames: &FrameStore, subset: &[FrameIndex]) -> FrameIndex {
    subset
        .iter()
        .copied()
        .filter_map(|frame| frames.get(frame).map(|r| (frame, r.load_order)))
        .min_by_key(|&(_, order)| order)
        .map_or(subset[0], |(frame, _)| frame)
}
