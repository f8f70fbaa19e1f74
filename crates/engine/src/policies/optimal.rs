//! Optimal (Belady) Replacement Policy.
//!
//! Evicts the resident page whose next reference lies farthest in the future,
//! preferring pages that are never referenced again. It needs the whole future
//! reference sequence, so it is a theoretical lower bound on faults rather than
//! a realisable policy.
//!
//! The next-use table is built once per run: for each sequence position it
//! stores the position of the next reference to the same page (by the same
//! process in local mode). A resident page's next use is read from the entry
//! of its most recent reference.

use std::collections::HashMap;

use serde::Serialize;

use super::{ReplacementPolicy, VictimChoice, VictimContext};
use crate::common::{FrameIndex, GLOBAL_PROCESS, Reference};
use crate::memory::FrameStore;

/// Next-use table over a fixed reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FutureUse {
    next: Vec<Option<usize>>,
}

impl FutureUse {
    /// Builds the table. With `per_process`, only references by the same process count.
    pub fn build(references: &[Reference], per_process: bool) -> Self {
        let mut next = vec![None; references.len()];
        let mut seen = HashMap::new();
        for (position, r) in references.iter().enumerate().rev() {
            let owner = if per_process { r.process } else { GLOBAL_PROCESS };
            next[position] = seen.insert((r.page, owner), position);
        }
        Self { next }
    }

    /// Position of the next reference matching the one at `position`.
    pub fn next_after(&self, position: usize) -> Option<usize> {
        self.next.get(position).copied().flatten()
    }

    /// Distance from `position` to the next matching reference; `None` means never.
    pub fn distance_at(&self, position: usize) -> Option<usize> {
        self.next_after(position).map(|n| n - position)
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Whether the table is empty (runs not using Optimal).
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }
}

/// Optimal policy (stateless; the table lives in the run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OptimalPolicy;

impl OptimalPolicy {
    /// Distance from `now` to the next use of the page resident in `frame`.
    ///
    /// `usize::MAX` stands for "never used again" and for empty frames.
    pub fn next_use_distance(
        frames: &FrameStore,
        frame: FrameIndex,
        cx: &VictimContext<'_>,
    ) -> usize {
        frames
            .get(frame)
            .and_then(|r| cx.future.next_after(r.last_step))
            .map_or(usize::MAX, |n| n.saturating_sub(cx.position))
    }
}

impl ReplacementPolicy for OptimalPolicy {
    fn on_load(&mut self, _frame: FrameIndex) {}

    /// Returns the occupied frame with the largest next-use distance.
    ///
    /// Ties go to the first such frame in subset order.
    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        cx: &VictimContext<'_>,
    ) -> VictimChoice {
        let mut victim = subset[0];
        let mut farthest = None;
        for &frame in subset {
            if frames.get(frame).is_none() {
                continue;
            }
            let distance = Self::next_use_distance(frames, frame, cx);
            if farthest.is_none_or(|best| distance > best) {
                farthest = Some(distance);
                victim = frame;
            }
        }
        VictimChoice::of(victim)
    }
}
