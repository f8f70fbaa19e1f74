//! Statistics Tests.

use pagesim_core::stats::{RunStats, STATS_SECTIONS, SimStats, Summary};
use pretty_assertions::assert_eq;

use crate::common::assert_close;

#[test]
fn rates_are_zero_before_any_access() {
    let stats = RunStats::default();
    assert_close(stats.fault_rate(), 0.0);
    assert_close(stats.hit_rate(), 0.0);
}

#[test]
fn rates_divide_by_accesses() {
    let stats = RunStats {
        accesses: 8,
        faults: 6,
        hits: 2,
    };
    assert_close(stats.fault_rate(), 0.75);
    assert_close(stats.hit_rate(), 0.25);
    assert_eq!(
        stats.summary(),
        Summary {
            accesses: 8,
            faults: 6,
            hits: 2,
            fault_rate: 0.75,
        }
    );
}

#[test]
fn per_process_counters_only_for_tracked_processes() {
    let mut stats = SimStats::with_processes([1, 2]);
    stats.record_access(1);
    stats.record_fault(1);
    stats.record_access(2);
    stats.record_hit(2);
    stats.record_access(9);
    stats.record_fault(9);

    assert_eq!(
        stats.global,
        RunStats {
            accesses: 3,
            faults: 2,
            hits: 1,
        }
    );
    assert_eq!(stats.process(1).map(|s| s.faults), Some(1));
    assert_eq!(stats.process(2).map(|s| s.hits), Some(1));
    assert_eq!(stats.process(9), None);
}

#[test]
fn global_stats_have_no_process_entries() {
    let mut stats = SimStats::default();
    stats.record_access(0);
    stats.record_hit(0);
    assert!(stats.per_process.is_empty());
    assert_eq!(stats.global.hits, 1);
}

#[test]
fn section_names() {
    assert_eq!(STATS_SECTIONS, &["summary", "processes", "policy"]);
}

#[test]
fn printing_selected_sections_does_not_panic() {
    let mut stats = SimStats::with_processes([1]);
    stats.record_access(1);
    stats.record_fault(1);
    stats.print();
    stats.print_sections(&["policy".to_string()]);
}

#[test]
fn summary_serializes_with_rate() {
    let summary = RunStats {
        accesses: 4,
        faults: 1,
        hits: 3,
    }
    .summary();
    let json = serde_json::to_value(summary).expect("serializable");
    assert_eq!(json["faults"], 1);
    assert_eq!(json["fault_rate"], 0.25);
}
