//! Frame Store.
//!
//! A fixed-size, ordered collection of frame slots. Every lookup is a linear scan
//! over a caller-supplied candidate subset of frame indices; subsets are
//! simulation-scale, so no index structure is kept.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `find_holding()` / `first_empty_in()`: O(|subset|)
//!   - `load()` / `touch()` / `clear()`: O(1)
//! - **Space Complexity:** O(F) where F is the number of frames

use serde::Serialize;

use crate::common::{FrameIndex, PageId, ProcessId};

/// Contents of an occupied frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resident {
    /// Page held by the frame.
    pub page: PageId,
    /// Process that loaded the page.
    pub owner: ProcessId,
    /// Order stamp taken when the page was loaded (FIFO).
    pub load_order: u64,
    /// Order stamp of the most recent load or hit (LRU).
    pub last_access: u64,
    /// Sequence position of the most recent load or hit (Optimal).
    pub last_step: usize,
    /// Clock reference bit.
    pub referenced: bool,
}

/// Fixed array of frame slots, each empty or holding one [`Resident`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameStore {
    slots: Vec<Option<Resident>>,
}

impl FrameStore {
    /// Creates `num_frames` empty slots.
    pub fn new(num_frames: usize) -> Self {
        Self {
            slots: vec![None; num_frames],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Contents of `frame`, or `None` if empty or out of range.
    pub fn get(&self, frame: FrameIndex) -> Option<&Resident> {
        self.slots.get(frame).and_then(Option::as_ref)
    }

    /// Page held by `frame`.
    pub fn page_at(&self, frame: FrameIndex) -> Option<PageId> {
        self.get(frame).map(|r| r.page)
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Option<Resident>] {
        &self.slots
    }

    /// Resident pages in index order (`None` for empty slots).
    pub fn pages(&self) -> Vec<Option<PageId>> {
        self.slots.iter().map(|s| s.map(|r| r.page)).collect()
    }

    /// All frame indices, the candidate subset of global mode.
    pub fn all_indices(&self) -> Vec<FrameIndex> {
        (0..self.slots.len()).collect()
    }

    /// Finds the frame within `subset` holding `page`.
    pub fn find_holding(&self, page: PageId, subset: &[FrameIndex]) -> Option<FrameIndex> {
        subset
            .iter()
            .copied()
            .find(|&frame| self.page_at(frame) == Some(page))
    }

    /// First empty frame within `subset`, in subset order.
    pub fn first_empty_in(&self, subset: &[FrameIndex]) -> Option<FrameIndex> {
        subset.iter().copied().find(|&frame| self.slots[frame].is_none())
    }

    /// Loads `page` into `frame`, replacing whatever was there.
    ///
    /// The reference bit starts clear: only a hit grants a second chance.
    pub fn load(
        &mut self,
        frame: FrameIndex,
        page: PageId,
        owner: ProcessId,
        order: u64,
        step: usize,
    ) {
        self.slots[frame] = Some(Resident {
            page,
            owner,
            load_order: order,
            last_access: order,
            last_step: step,
            referenced: false,
        });
    }

    /// Records a hit on `frame`: refreshes recency and sets the reference bit.
    pub fn touch(&mut self, frame: FrameIndex, order: u64, step: usize) {
        if let Some(resident) = self.slots[frame].as_mut() {
            resident.last_access = order;
            resident.last_step = step;
            resident.referenced = true;
        }
    }

    /// Sets or clears the reference bit of an occupied frame.
    pub fn set_referenced(&mut self, frame: FrameIndex, referenced: bool) {
        if let Some(resident) = self.slots[frame].as_mut() {
            resident.referenced = referenced;
        }
    }

    /// Reference bit of `frame` (false when empty).
    pub fn is_referenced(&self, frame: FrameIndex) -> bool {
        self.get(frame).is_some_and(|r| r.referenced)
    }

    /// Empties `frame`, returning its previous contents.
    pub fn clear(&mut self, frame: FrameIndex) -> Option<Resident> {
        self.slots[frame].take()
    }

    /// Number of occupied frames within `subset`.
    pub fn occupied_in(&self, subset: &[FrameIndex]) -> usize {
        subset.iter().filter(|&&frame| self.slots[frame].is_some()).count()
    }
}
