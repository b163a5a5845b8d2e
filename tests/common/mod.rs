// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use fixture_bench::core::events::Event;
use fixture_bench::models::UnitId;
use fixture_bench::reporting::EventLog;
use fixture_bench::Harness;
use tempfile::TempDir;

/// A harness recording every event, plus the handle to read them back.
pub fn recording_harness() -> (Harness, EventLog) {
    let log = EventLog::new();
    let harness = Harness::with_reporter(log.clone());
    (harness, log)
}

/// The add_ok / add_bad pair: one passing and one failing function test.
pub fn register_math(harness: &mut Harness) {
    harness.register_test("math", "add_ok", |t| {
        t.assert_that(2 + 2, fixture_bench::equals(4));
    });
    harness.register_test("math", "add_bad", |t| {
        t.assert_that(2 + 2, fixture_bench::equals(5));
    });
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// The `TestStarted` events, as `group.name`.
pub fn started_units(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TestStarted { group, name, .. } => Some(format!("{group}.{name}")),
            _ => None,
        })
        .collect()
}

pub fn function_id(group: &str, name: &str) -> UnitId {
    UnitId::function(group, name)
}
