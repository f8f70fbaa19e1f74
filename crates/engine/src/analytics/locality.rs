//! Locality of reference.
//!
//! - **Average:** mean of `1 - distinct/W` over every full window of `W` references.
//! - **Temporal:** share of references repeating a page seen in the previous 3.
//! - **Spatial:** share of consecutive pairs whose page ids differ by at most 1.
//!
//! All values are percentages in `[0, 100]`; degenerate inputs yield 0.

use std::collections::HashSet;

use serde::Serialize;

use crate::common::PageId;
use crate::config::defaults;

/// Locality metrics, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Locality {
    /// Average windowed locality.
    pub average: f64,
    /// Temporal locality.
    pub temporal: f64,
    /// Spatial locality.
    pub spatial: f64,
}

/// Locality with the default window of 5.
pub fn locality(pages: &[PageId]) -> Locality {
    locality_with_window(pages, defaults::WINDOW)
}

/// Locality with an explicit averaging window.
pub fn locality_with_window(pages: &[PageId], window: usize) -> Locality {
    Locality {
        average: average_locality(pages, window),
        temporal: temporal_locality(pages),
        spatial: spatial_locality(pages),
    }
}

fn average_locality(pages: &[PageId], window: usize) -> f64 {
    if window == 0 || pages.len() <= window {
        return 0.0;
    }
    let windows = pages.len() - window;
    let total: f64 = (0..windows)
        .map(|i| {
            let distinct = pages[i..i + window].iter().collect::<HashSet<_>>().len();
            1.0 - distinct as f64 / window as f64
        })
        .sum();
    total / windows as f64 * 100.0
}

fn temporal_locality(pages: &[PageId]) -> f64 {
    if pages.is_empty() {
        return 0.0;
    }
    let repeats = (1..pages.len())
        .filter(|&i| {
            let from = i.saturating_sub(defaults::TEMPORAL_DISTANCE);
            pages[from..i].contains(&pages[i])
        })
        .count();
    repeats as f64 / pages.len() as f64 * 100.0
}

fn spatial_locality(pages: &[PageId]) -> f64 {
    if pages.len() < 2 {
        return 0.0;
    }
    let near = pages.windows(2).filter(|w| w[0].abs_diff(w[1]) <= 1).count();
    near as f64 / (pages.len() - 1) as f64 * 100.0
}
