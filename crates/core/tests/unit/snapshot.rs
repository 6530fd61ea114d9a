//! # Snapshot Tests
//!
//! Idempotence, history tail trimming and JSON shape.

use memsched_core::config::Config;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::harness::TestContext;

#[test]
fn repeated_snapshots_are_identical() {
    let mut ctx = TestContext::with_capacity(500);
    ctx.submit("a", 400, 3);
    ctx.submit("b", 300, 1);
    ctx.tick_n(2);
    let first = ctx.sim.snapshot();
    let second = ctx.sim.snapshot();
    assert_eq!(first, second);
    assert_eq!(ctx.sim.tick(), 2);
}

#[test]
fn finished_tail_is_bounded() {
    let config = Config {
        history_tail: 3,
        ..Config::default()
    };
    let mut ctx = TestContext::with_config(config);
    for i in 0..5 {
        ctx.submit(&format!("p{i}"), 10, 1);
    }
    let _ = ctx.sim.run_until_drained(50).unwrap();
    let snap = ctx.sim.snapshot();
    let names: Vec<_> = snap.finished.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["p2", "p3", "p4"]);
    assert_eq!(ctx.sim.finished().len(), 5);
}

#[test]
fn contains_covers_every_location() {
    let mut ctx = TestContext::with_capacity(100);
    let running = ctx.submit("run", 50, 5);
    let ready = ctx.submit("ready", 50, 1);
    let waiting = ctx.submit("wait", 60, 1);
    ctx.tick();
    let snap = ctx.sim.snapshot();
    assert!(snap.contains(running));
    assert!(snap.contains(ready));
    assert!(snap.contains(waiting));
    assert!(!snap.contains(memsched_core::Pid(99)));
}

#[test]
fn json_shape_matches_front_end_contract() {
    let mut ctx = TestContext::with_capacity(1024);
    let _ = ctx.submit("A", 600, 2);
    ctx.tick();
    let json: Value = serde_json::from_str(&ctx.sim.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(json["tick"], 1);
    assert_eq!(json["ram"]["used_mb"], 600);
    assert_eq!(json["ram"]["capacity_mb"], 1024);
    assert_eq!(json["ram"]["available_mb"], 424);
    assert_eq!(json["ready"], Value::Array(vec![]));
    assert_eq!(json["waiting"], Value::Array(vec![]));
    assert_eq!(json["cpu"]["pid"], 1);
    assert_eq!(json["cpu"]["name"], "A");
    assert_eq!(json["cpu"]["remaining_s"], 2);
    assert!(json["cpu"].get("remaining").is_none());
    assert_eq!(json["finished"], Value::Array(vec![]));
}

#[test]
fn finished_entries_carry_duration_in_seconds() {
    let mut ctx = TestContext::with_capacity(1024);
    let pid = ctx.submit("A", 100, 1);
    ctx.tick_n(2);
    let json: Value = serde_json::from_str(&ctx.sim.snapshot().to_json().unwrap()).unwrap();
    let entry = &json["finished"][0];
    assert_eq!(entry["pid"], pid.val());
    assert_eq!(entry["name"], "A");
    assert_eq!(entry["duration_s"], 1);
    let mut keys: Vec<_> = entry.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["duration_s", "name", "pid"]);
    assert!(json["cpu"].is_null());
}

#[test]
fn idle_cpu_serializes_as_null() {
    let ctx = TestContext::new();
    let json: Value = serde_json::from_str(&ctx.sim.snapshot().to_json().unwrap()).unwrap();
    assert!(json["cpu"].is_null());
}
