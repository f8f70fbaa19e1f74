//! Least Recently Used (LRU) Replacement Policy.
//!
//! Evicts the resident page whose last load or hit is oldest. Recency is exact:
//! every load and hit stamps the frame with a fresh value of the run's
//! monotonic order counter, so no auxiliary state is kept here.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1)
//!   - `select_victim()`: O(|subset|)
//! - **Space Complexity:** O(1)
//! - **Worst Case:** Cyclic scans one page larger than the subset fault on every reference.

use serde::Serialize;

use super::{ReplacementPolicy, VictimChoice, VictimContext};
use crate::common::FrameIndex;
use crate::memory::FrameStore;

/// LRU policy (stateless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn on_load(&mut self, _frame: FrameIndex) {}

    /// Returns the occupied frame with the smallest `last_access`.
    ///
    /// Ties go to the first such frame in subset order.
    fn select_victim(
        &mut self,
        frames: &mut FrameStore,
        subset: &[FrameIndex],
        _cx: &VictimContext<'_>,
    ) -> VictimChoice {
        let frame = subset
            .iter()
            .copied()
            .filter_map(|frame| frames.get(frame).map(|r| (frame, r.last_access)))
            .min_by_key(|&(_, last)| last)
            .map_or(subset[0], |(frame, _)| frame);
        VictimChoice::of(frame)
    }
}
