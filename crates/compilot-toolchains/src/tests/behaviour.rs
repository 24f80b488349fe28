//! Behaviour-driven tests for toolchain dispatch.

use std::path::Path;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::CannedRunner;
use crate::dispatch::Dispatcher;
use crate::problem::{Problem, Response};
use crate::process::ProcessOutput;
use crate::router::ToolchainRegistry;

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    files: Vec<String>,
    command_prefix: String,
    output: ProcessOutput,
    response: Option<Response>,
    commands: Vec<String>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

fn response(world: &TestWorld) -> &Response {
    world.response.as_ref().expect("no response captured")
}

fn bucket(world: &TestWorld, index: usize) -> &[Problem] {
    response(world)
        .problems()
        .get(index)
        .unwrap_or_else(|| panic!("no bucket at index {index}"))
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the requested files {files}")]
fn given_files(world: &mut TestWorld, files: String) {
    world.files = files
        .trim_matches('"')
        .split(',')
        .filter(|file| !file.is_empty())
        .map(str::to_owned)
        .collect();
}

#[given("a fallback prefix {prefix}")]
fn given_prefix(world: &mut TestWorld, prefix: String) {
    prefix.trim_matches('"').clone_into(&mut world.command_prefix);
}

#[given("a toolchain that reports {line} and exits with {status}")]
fn given_toolchain_output(world: &mut TestWorld, line: String, status: i32) {
    let stderr = format!("{}\n", line.trim_matches('"'));
    world.output = ProcessOutput::new("", stderr, Some(status));
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the command {command} is dispatched")]
fn when_dispatched(world: &mut TestWorld, command: String) {
    let runner = CannedRunner::new(world.output.clone());
    let dispatcher = Dispatcher::new(ToolchainRegistry::with_default_toolchains(), runner)
        .with_command_prefix(world.command_prefix.clone());
    let response = dispatcher.dispatch(command.trim_matches('"'), Path::new("/work"), &world.files);
    world.commands = dispatcher.runner().commands();
    world.response = Some(response);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the response is ok")]
fn then_ok(world: &mut TestWorld) {
    assert!(response(world).is_ok(), "expected ok response");
}

#[then("the response is not ok")]
fn then_not_ok(world: &mut TestWorld) {
    assert!(!response(world).is_ok(), "expected failed response");
}

#[then("the toolchain ran {command}")]
fn then_ran(world: &mut TestWorld, command: String) {
    assert_eq!(world.commands, [command.trim_matches('"')]);
}

#[then("the toolchain never ran")]
fn then_never_ran(world: &mut TestWorld) {
    assert!(world.commands.is_empty(), "ran {:?}", world.commands);
}

#[then("there are {count} buckets")]
fn then_bucket_count(world: &mut TestWorld, count: usize) {
    assert_eq!(response(world).problems().len(), count);
}

#[then("bucket {index} is empty")]
fn then_bucket_empty(world: &mut TestWorld, index: usize) {
    assert!(bucket(world, index).is_empty());
}

#[then("bucket {index} holds an {kind} at row {row} column {col}")]
fn then_bucket_holds(world: &mut TestWorld, index: usize, kind: String, row: u32, col: u32) {
    let problems = bucket(world, index);
    let expected_kind = kind.trim_matches('"');
    assert!(
        problems
            .iter()
            .any(|p| p.kind() == expected_kind && p.row() == row && p.col() == col),
        "expected {expected_kind} at {row}:{col} in {problems:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "C diagnostics are bucketed per requested file"
)]
fn c_diagnostics_bucketed(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "The no-op command never runs a toolchain"
)]
fn noop_command(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Unknown commands run through the prefixed fallback"
)]
fn prefixed_fallback(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "V diagnostics are shifted up one row"
)]
fn v_rows_shifted(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Diagnostics for unrequested files are dropped"
)]
fn unrequested_files_dropped(world: TestWorld) {
    let _ = world;
}
