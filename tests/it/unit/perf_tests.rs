//! Unit tests for perf module.

use linkboard::perf::{HANDLER_BUDGET_MS, InteractionStats, OperationStats, ScopedTimer, measure};

#[test]
fn test_operation_stats_average_and_max() {
    let mut stats = OperationStats::default();
    for ms in [1.0, 2.0, 3.0, 6.0] {
        stats.record(ms);
    }
    assert_eq!(stats.count(), 4);
    assert_eq!(stats.average(), 3.0);
    assert_eq!(stats.max_ms(), 6.0);
    assert_eq!(stats.p95(), 6.0);
}

#[test]
fn test_empty_stats_are_zero() {
    let stats = OperationStats::default();
    assert_eq!(stats.average(), 0.0);
    assert_eq!(stats.p95(), 0.0);
    assert_eq!(stats.count(), 0);
}

#[test]
fn test_interaction_stats_count_slow_handlers() {
    let mut stats = InteractionStats::new();
    stats.record("pointer_move", 0.5);
    stats.record("pointer_move", HANDLER_BUDGET_MS + 1.0);
    stats.record("wheel", 0.1);

    assert_eq!(stats.get("pointer_move").map(|s| s.count()), Some(2));
    assert_eq!(stats.over_budget_count(), 1);
    assert!(stats.get("pointer_down").is_none());

    stats.log_summary();
    stats.reset();
    assert_eq!(stats.over_budget_count(), 0);
    assert!(stats.get("wheel").is_none());
}

#[test]
fn test_scoped_timer_creation() {
    // high threshold: dropping must not warn
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result_and_time() {
    let (value, ms) = measure(|| (1..=10).sum::<u32>());
    assert_eq!(value, 55);
    assert!(ms >= 0.0);
}

#[test]
fn test_editor_records_handler_timings() {
    let mut editor = crate::helpers::root_only_editor();
    editor.handle_wheel(linkboard::Point::ZERO, -100.0);
    editor
        .execute(linkboard::Command::AddNode)
        .expect("add node succeeds");

    assert_eq!(editor.perf().get("wheel").map(|s| s.count()), Some(1));
    assert_eq!(editor.perf().get("command").map(|s| s.count()), Some(1));
}
