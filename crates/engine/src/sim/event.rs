//! Step events.

use std::fmt;

use serde::Serialize;

use crate::common::{FrameIndex, PageId, ProcessId};

/// Whether a reference hit or faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Page found in the candidate subset.
    Hit,
    /// Page not found; loaded into a frame.
    Fault,
}

/// A page pushed out of memory by a fault.
///
/// Flattened into the event as `evictedPage` / `evictedOwner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eviction {
    /// Evicted page.
    #[serde(rename = "evictedPage")]
    pub page: PageId,
    /// Process that had loaded it.
    #[serde(rename = "evictedOwner")]
    pub owner: ProcessId,
}

/// Record of one completed step.
///
/// Serializes with `type`, `processId` and `frameIndex` keys; an eviction is
/// flattened in and `secondChances` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEvent {
    /// Sequence position of the reference.
    pub step: usize,
    /// Hit or fault.
    #[serde(rename = "type")]
    pub kind: AccessKind,
    /// Referenced page.
    pub page: PageId,
    /// Referencing process.
    #[serde(rename = "processId")]
    pub process: ProcessId,
    /// Frame hit, or frame the page was loaded into.
    #[serde(rename = "frameIndex")]
    pub frame: FrameIndex,
    /// Page replaced by this fault, if any.
    #[serde(flatten)]
    pub evicted: Option<Eviction>,
    /// Frames given a second chance while choosing the victim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub second_chances: Vec<FrameIndex>,
}

impl StepEvent {
    /// Whether this step was a hit.
    pub fn is_hit(&self) -> bool {
        self.kind == AccessKind::Hit
    }

    /// Whether this step was a fault.
    pub fn is_fault(&self) -> bool {
        self.kind == AccessKind::Fault
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.second_chances {
            writeln!(f, "[{:>4}] clock: second chance for frame {frame}", self.step)?;
        }
        match (self.kind, self.evicted) {
            (AccessKind::Hit, _) => write!(
                f,
                "[{:>4}] hit    P{}:{} in frame {}",
                self.step, self.process, self.page, self.frame
            ),
            (AccessKind::Fault, None) => write!(
                f,
                "[{:>4}] fault  P{}:{} loaded into empty frame {}",
                self.step, self.process, self.page, self.frame
            ),
            (AccessKind::Fault, Some(evicted)) => write!(
                f,
                "[{:>4}] fault  P{}:{} replaced P{}:{} in frame {}",
                self.step, self.process, self.page, evicted.owner, evicted.page, self.frame
            ),
        }
    }
}
