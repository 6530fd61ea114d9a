//! # Scheduler Tests
//!
//! Admission on submit, promotion order, and head-of-line blocking versus
//! first-fit scanning, observed through the orchestrator.

use memsched_core::config::AdmissionPolicy;
use memsched_core::core::ProcessState;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn fitting_submission_goes_to_ready() {
    let mut ctx = TestContext::with_capacity(1024);
    let p1 = ctx.submit("A", 600, 2);
    assert_eq!(ctx.ready(), vec![p1]);
    assert_eq!(ctx.sim.memory().used(), 600);
    assert_eq!(ctx.state(p1), ProcessState::Ready);
}

#[test]
fn oversize_submission_waits_without_error() {
    let mut ctx = TestContext::with_capacity(100);
    let huge = ctx.submit("huge", 5000, 1);
    assert_eq!(ctx.waiting(), vec![huge]);
    assert_eq!(ctx.sim.memory().used(), 0);
    ctx.tick_n(5);
    assert_eq!(ctx.state(huge), ProcessState::WaitingForMemory);
    assert!(!ctx.sim.is_drained());
}

#[test]
fn ready_queue_is_served_in_arrival_order() {
    let mut ctx = TestContext::with_capacity(1000);
    let a = ctx.submit("a", 100, 1);
    let b = ctx.submit("b", 100, 1);
    let c = ctx.submit("c", 100, 1);
    let order: Vec<_> = ctx.tick_n(6).into_iter().filter_map(|r| r.dispatched).collect();
    assert_eq!(order, vec![a, b, c]);
}

#[test]
fn submission_does_not_queue_behind_waiters() {
    let mut ctx = TestContext::with_capacity(500);
    let p1 = ctx.submit("p1", 400, 3);
    let p2 = ctx.submit("p2", 300, 1);
    let p3 = ctx.submit("p3", 50, 1);
    // Admission on submit only asks the pool; the wait queue is not consulted.
    assert_eq!(ctx.ready(), vec![p1, p3]);
    assert_eq!(ctx.waiting(), vec![p2]);
}

#[test]
fn head_of_line_blocks_smaller_followers() {
    let mut ctx = TestContext::with_capacity(500);
    let a = ctx.submit("a", 200, 1);
    let b = ctx.submit("b", 250, 5);
    let c = ctx.submit("c", 300, 1);
    let d = ctx.submit("d", 100, 1);
    assert_eq!(ctx.ready(), vec![a, b]);
    assert_eq!(ctx.waiting(), vec![c, d]);

    ctx.tick(); // dispatch a
    let report = ctx.tick(); // a done: 250 free, c needs 300
    assert_eq!(report.finished, Some(a));
    assert!(report.promoted.is_empty());
    assert_eq!(report.dispatched, Some(b));
    assert_eq!(ctx.waiting(), vec![c, d]);
    assert_eq!(ctx.state(d), ProcessState::WaitingForMemory);
}

#[test]
fn first_fit_admits_past_blocked_head() {
    let mut ctx = TestContext::with_capacity(500).with_policy(AdmissionPolicy::FirstFit);
    let a = ctx.submit("a", 200, 1);
    let b = ctx.submit("b", 250, 5);
    let c = ctx.submit("c", 300, 1);
    let d = ctx.submit("d", 100, 1);

    ctx.tick();
    let report = ctx.tick();
    assert_eq!(report.finished, Some(a));
    assert_eq!(report.promoted, vec![d]);
    assert_eq!(report.dispatched, Some(b));
    assert_eq!(ctx.waiting(), vec![c]);
    assert_eq!(ctx.ready(), vec![d]);
}

#[test]
fn released_memory_promotes_head_in_same_tick() {
    let mut ctx = TestContext::with_capacity(500);
    let p1 = ctx.submit("p1", 400, 1);
    let p2 = ctx.submit("p2", 300, 1);
    let p3 = ctx.submit("p3", 150, 1);
    assert_eq!(ctx.waiting(), vec![p2, p3]);

    ctx.tick(); // dispatch p1
    let report = ctx.tick(); // p1 finishes, p2 and p3 promoted, p2 dispatched
    assert_eq!(report.finished, Some(p1));
    assert_eq!(report.promoted, vec![p2, p3]);
    assert_eq!(report.dispatched, Some(p2));
    assert_eq!(ctx.ready(), vec![p3]);
    assert_eq!(ctx.sim.memory().used(), 450);
}

#[test]
fn promotion_stops_when_memory_runs_out() {
    let mut ctx = TestContext::with_capacity(500);
    let p1 = ctx.submit("p1", 500, 1);
    let p2 = ctx.submit("p2", 300, 1);
    let p3 = ctx.submit("p3", 300, 1);

    ctx.tick_n(2);
    assert_eq!(ctx.state(p1), ProcessState::Finished);
    assert_eq!(ctx.state(p2), ProcessState::Running);
    assert_eq!(ctx.waiting(), vec![p3]);
}

#[test]
fn first_fit_promotes_out_of_order() {
    let mut ctx = TestContext::with_capacity(500).with_policy(AdmissionPolicy::FirstFit);
    let p1 = ctx.submit("p1", 450, 1);
    let p2 = ctx.submit("p2", 300, 1);
    let p3 = ctx.submit("p3", 250, 1);
    let p4 = ctx.submit("p4", 150, 1);
    assert_eq!(ctx.waiting(), vec![p2, p3, p4]);

    ctx.tick(); // dispatch p1
    let report = ctx.tick(); // p1 done: 500 free
    assert_eq!(report.finished, Some(p1));
    assert_eq!(report.promoted, vec![p2, p4]);
    assert_eq!(ctx.waiting(), vec![p3]);
    assert_eq!(ctx.sim.memory().used(), 450);
}

#[test]
fn head_of_line_promotes_in_order_only() {
    let mut ctx = TestContext::with_capacity(500);
    let p1 = ctx.submit("p1", 450, 1);
    let p2 = ctx.submit("p2", 300, 1);
    let p3 = ctx.submit("p3", 250, 1);
    let p4 = ctx.submit("p4", 150, 1);

    ctx.tick();
    let report = ctx.tick();
    assert_eq!(report.finished, Some(p1));
    assert_eq!(report.promoted, vec![p2]);
    assert_eq!(ctx.waiting(), vec![p3, p4]);
    assert_eq!(ctx.sim.memory().used(), 300);
}
