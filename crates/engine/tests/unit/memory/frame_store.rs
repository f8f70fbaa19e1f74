//! Frame Store Tests.
//!
//! Lookups are scoped to the candidate subset; mutations touch only the
//! targeted frame.

use pagesim_core::memory::{FrameStore, Resident};
use pretty_assertions::assert_eq;

#[test]
fn new_store_is_empty() {
    let frames = FrameStore::new(4);
    assert_eq!(frames.len(), 4);
    assert_eq!(frames.pages(), vec![None; 4]);
    assert_eq!(frames.first_empty_in(&[0, 1, 2, 3]), Some(0));
}

#[test]
fn find_holding_only_searches_the_subset() {
    let mut frames = FrameStore::new(4);
    frames.load(3, 42, 2, 1, 0);

    assert_eq!(frames.find_holding(42, &[0, 1, 2, 3]), Some(3));
    assert_eq!(frames.find_holding(42, &[0, 1]), None);
    assert_eq!(frames.find_holding(7, &[0, 1, 2, 3]), None);
}

#[test]
fn first_empty_follows_subset_order() {
    let mut frames = FrameStore::new(4);
    frames.load(0, 1, 0, 1, 0);
    assert_eq!(frames.first_empty_in(&[3, 1, 0]), Some(3));
    assert_eq!(frames.first_empty_in(&[0, 2]), Some(2));
    frames.load(2, 2, 0, 2, 1);
    assert_eq!(frames.first_empty_in(&[0, 2]), None);
}

#[test]
fn load_records_owner_and_order_with_clear_reference_bit() {
    let mut frames = FrameStore::new(2);
    frames.load(1, 9, 3, 17, 5);
    assert_eq!(
        frames.get(1),
        Some(&Resident {
            page: 9,
            owner: 3,
            load_order: 17,
            last_access: 17,
            last_step: 5,
            referenced: false,
        })
    );
    assert!(!frames.is_referenced(1));
}

#[test]
fn touch_refreshes_recency_and_sets_reference_bit() {
    let mut frames = FrameStore::new(2);
    frames.load(0, 9, 0, 1, 0);
    frames.touch(0, 8, 4);

    let resident = frames.get(0).expect("occupied");
    assert_eq!(resident.load_order, 1);
    assert_eq!(resident.last_access, 8);
    assert_eq!(resident.last_step, 4);
    assert!(resident.referenced);
}

#[test]
fn touch_on_empty_frame_is_a_no_op() {
    let mut frames = FrameStore::new(2);
    frames.touch(1, 5, 0);
    frames.set_referenced(1, true);
    assert_eq!(frames.get(1), None);
    assert!(!frames.is_referenced(1));
}

#[test]
fn clear_returns_previous_contents_and_leaves_others() {
    let mut frames = FrameStore::new(3);
    frames.load(0, 1, 0, 1, 0);
    frames.load(1, 2, 0, 2, 1);

    let evicted = frames.clear(0).expect("occupied");
    assert_eq!(evicted.page, 1);
    assert_eq!(frames.pages(), vec![None, Some(2), None]);
    assert_eq!(frames.occupied_in(&[0, 1, 2]), 1);
    assert_eq!(frames.clear(2), None);
}

#[test]
fn all_indices_covers_every_frame() {
    assert_eq!(FrameStore::new(3).all_indices(), vec![0, 1, 2]);
}
