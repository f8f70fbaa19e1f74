//! Clock (Second Chance) Replacement Policy.
//!
//! A hand sweeps the candidate subset. A frame with its reference bit set has
//! the bit cleared and is skipped; the first frame found with a clear bit is the
//! victim. The hand persists across faults and wraps modulo the subset size.
//!
//! The sweep is bounded at two full revolutions. One revolution clears every
//! bit, so the bound is only hit if bits are set concurrently; in that case the
//! first frame of the subset is forced out with its bit cleared.

use serde::Serialize;

use super::{ReplacementPolicy, VictimChoice, VictimContext};
use crate::common::FrameIndex;
use crate::memory::FrameStore;

/// Clock policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClockPolicy {
    /// Position of the hand within the subset.
    hand: usize,
}

impl ClockPolicy {
    /// Creates a clock with the hand at the first frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hand position (an offset into the subset, not a frame index).
    pub const fn hand(&self) -> usize {
        self.hand
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn on_load(&mut self, _frame: FrameIndex) {}

    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        _cx: &VictimContext<'_>,
    ) -> VictimChoice {
        let len = subset.len();
        let mut second_chances = Vec::new();

        for _ in 0..2 * len {
            let frame = subset[self.hand % len];
            self.hand = (self.hand + 1) % len;

            if !frames.is_referenced(frame) {
                return VictimChoice {
                    frame,
                    second_chances,
                };
            }
            frames.set_referenced(frame, false);
            tracing::trace!(frame, page = frames.page_at(frame), "clock: second chance");
            second_chances.push(frame);
        }

        let frame = subset[0];
        frames.set_referenced(frame, false);
        VictimChoice {
            frame,
            second_chances,
        }
    }
}
