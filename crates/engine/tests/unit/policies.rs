//! Replacement Policy Tests.
//!
//! Exercises each policy's `select_victim` in isolation against a hand-built
//! frame store, then checks the `Policy` dispatch wrapper.

use pagesim_core::common::{FrameIndex, PageId, Reference};
use pagesim_core::config::Algorithm;
use pagesim_core::memory::FrameStore;
use pagesim_core::policies::{
    ClockPolicy, FifoPolicy, FutureUse, LruPolicy, OptimalPolicy, Policy, ReplacementPolicy,
    VictimChoice, VictimContext,
};
use rstest::rstest;

/// Loads `pages[i]` into frame `i` at order/step `i`.
fn filled(pages: &[PageId]) -> FrameStore {
    let mut frames = FrameStore::new(pages.len());
    for (i, &page) in pages.iter().enumerate() {
        frames.load(i, page, 0, i as u64, i);
    }
    frames
}

fn select<P: ReplacementPolicy>(
    policy: &mut P,
    frames: &mut FrameStore,
    subset: &[FrameIndex],
    position: usize,
) -> VictimChoice {
    let future = FutureUse::default();
    policy.select_victim(
        frames,
        subset,
        &VictimContext {
            position,
            future: &future,
        },
    )
}

mod fifo {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn evicts_in_load_order() {
        let mut frames = filled(&[1, 2, 3]);
        let mut fifo = FifoPolicy::new();
        for frame in 0..3 {
            fifo.on_load(frame);
        }

        let choice = select(&mut fifo, &mut frames, &[0, 1, 2], 3);
        assert_eq!(choice, VictimChoice::of(0));

        // The reload rejoins at the tail.
        fifo.on_load(0);
        assert_eq!(fifo.queue().collect::<Vec<_>>(), vec![1, 2, 0]);
        assert_eq!(select(&mut fifo, &mut frames, &[0, 1, 2], 4).frame, 1);
    }

    #[test]
    fn ignores_recency() {
        let mut frames = filled(&[1, 2]);
        let mut fifo = FifoPolicy::new();
        fifo.on_load(0);
        fifo.on_load(1);
        frames.touch(0, 10, 2);
        assert_eq!(select(&mut fifo, &mut frames, &[0, 1], 3).frame, 0);
    }

    #[test]
    fn empty_queue_falls_back_to_load_stamps() {
        let mut frames = FrameStore::new(3);
        frames.load(0, 1, 0, 5, 0);
        frames.load(1, 2, 0, 2, 1);
        frames.load(2, 3, 0, 9, 2);
        let mut fifo = FifoPolicy::new();
        assert_eq!(select(&mut fifo, &mut frames, &[0, 1, 2], 3).frame, 1);
    }
}

mod lru {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn evicts_least_recently_touched() {
        let mut frames = filled(&[1, 2, 3]);
        frames.touch(0, 3, 3);
        assert_eq!(select(&mut LruPolicy, &mut frames, &[0, 1, 2], 4).frame, 1);
    }

    #[test]
    fn equal_stamps_go_to_first_in_subset_order() {
        let mut frames = FrameStore::new(3);
        for frame in 0..3 {
            frames.load(frame, frame as PageId, 0, 7, 0);
        }
        assert_eq!(select(&mut LruPolicy, &mut frames, &[2, 1, 0], 1).frame, 2);
    }

    #[test]
    fn only_considers_subset() {
        let mut frames = filled(&[1, 2, 3, 4]);
        assert_eq!(select(&mut LruPolicy, &mut frames, &[2, 3], 4).frame, 2);
    }
}

mod clock {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_referenced_frames_and_clears_their_bits() {
        let mut frames = filled(&[1, 2, 3]);
        frames.set_referenced(0, true);
        frames.set_referenced(1, true);
        let mut clock = ClockPolicy::new();

        let choice = select(&mut clock, &mut frames, &[0, 1, 2], 3);
        assert_eq!(
            choice,
            VictimChoice {
                frame: 2,
                second_chances: vec![0, 1],
            }
        );
        assert!(!frames.is_referenced(0));
        assert!(!frames.is_referenced(1));
        assert_eq!(clock.hand(), 0);

        // Hand wrapped; both bits now clear.
        assert_eq!(select(&mut clock, &mut frames, &[0, 1, 2], 4), VictimChoice::of(0));
        assert_eq!(clock.hand(), 1);
    }

    #[test]
    fn all_referenced_sweeps_once_and_takes_the_hand_frame() {
        let mut frames = filled(&[1, 2, 3]);
        for frame in 0..3 {
            frames.set_referenced(frame, true);
        }
        let mut clock = ClockPolicy::new();
        let choice = select(&mut clock, &mut frames, &[0, 1, 2], 3);
        assert_eq!(choice.frame, 0);
        assert_eq!(choice.second_chances, vec![0, 1, 2]);
    }

    #[test]
    fn hand_is_an_offset_into_the_subset() {
        let mut frames = filled(&[1, 2, 3, 4]);
        let mut clock = ClockPolicy::new();
        assert_eq!(select(&mut clock, &mut frames, &[2, 3], 4).frame, 2);
        assert_eq!(select(&mut clock, &mut frames, &[2, 3], 5).frame, 3);
        assert_eq!(select(&mut clock, &mut frames, &[2, 3], 6).frame, 2);
    }
}

mod optimal {
    use super::*;
    use pretty_assertions::assert_eq;

    fn choose(sequence: &[PageId], resident: &[PageId], position: usize) -> FrameIndex {
        let refs: Vec<Reference> = sequence.iter().map(|&p| Reference::global(p)).collect();
        let future = FutureUse::build(&refs, false);
        let mut frames = filled(resident);
        let subset = frames.all_indices();
        OptimalPolicy
            .select_victim(
                &mut frames,
                &subset,
                &VictimContext {
                    position,
                    future: &future,
                },
            )
            .frame
    }

    #[rstest]
    #[case::never_used_again(&[1, 2, 3, 4, 2, 1], 2)]
    #[case::farthest_next_use(&[1, 2, 3, 4, 2, 3, 1], 0)]
    #[case::all_unused_picks_first(&[1, 2, 3, 4], 0)]
    fn picks_farthest_next_use(#[case] sequence: &[PageId], #[case] expected: FrameIndex) {
        assert_eq!(choose(sequence, &[1, 2, 3], 3), expected);
    }

    #[test]
    fn future_use_respects_process_in_local_mode() {
        let refs = [Reference::new(1, 1), Reference::new(1, 2), Reference::new(1, 1)];

        let local = FutureUse::build(&refs, true);
        assert_eq!(local.next_after(0), Some(2));
        assert_eq!(local.next_after(1), None);
        assert_eq!(local.distance_at(0), Some(2));

        let global = FutureUse::build(&refs, false);
        assert_eq!(global.next_after(0), Some(1));
        assert_eq!(global.next_after(1), Some(2));
        assert_eq!(global.next_after(2), None);
        assert_eq!(global.len(), 3);
    }

    #[test]
    fn empty_frames_report_infinite_distance() {
        let future = FutureUse::build(&[Reference::global(1)], false);
        let frames = FrameStore::new(1);
        let cx = VictimContext {
            position: 0,
            future: &future,
        };
        assert_eq!(OptimalPolicy::next_use_distance(&frames, 0, &cx), usize::MAX);
    }
}

#[rstest]
#[case(Algorithm::Fifo)]
#[case(Algorithm::Lru)]
#[case(Algorithm::Clock)]
#[case(Algorithm::Optimal)]
fn policy_dispatch_keeps_its_algorithm(#[case] algorithm: Algorithm) {
    let policy = Policy::new(algorithm);
    assert_eq!(policy.algorithm(), algorithm);
}

#[test]
fn dispatch_forwards_to_the_wrapped_policy() {
    let mut frames = filled(&[1, 2]);
    let mut policy = Policy::new(Algorithm::Fifo);
    policy.on_load(1);
    policy.on_load(0);
    assert_eq!(select(&mut policy, &mut frames, &[0, 1], 2).frame, 1);
}
