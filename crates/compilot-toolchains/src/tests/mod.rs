//! Crate-level integration and BDD tests.

use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::dispatch::Dispatcher;
use crate::error::RunError;
use crate::parsers::CFamilyParser;
use crate::problem::Problem;
use crate::process::{ProcessOutput, ProcessRunner, ShellRunner};
use crate::router::{Route, ToolchainRegistry};

mod behaviour;

/// Runner returning fixed output and recording the commands it was given.
#[derive(Debug, Default)]
struct CannedRunner {
    output: ProcessOutput,
    commands: RefCell<Vec<String>>,
}

impl CannedRunner {
    fn new(output: ProcessOutput) -> Self {
        Self {
            output,
            commands: RefCell::default(),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl ProcessRunner for CannedRunner {
    fn run(&self, command: &str, _cwd: &Path) -> Result<ProcessOutput, RunError> {
        self.commands.borrow_mut().push(command.to_owned());
        Ok(self.output.clone())
    }
}

fn shell_dispatcher() -> Dispatcher<ShellRunner> {
    Dispatcher::with_defaults()
}

#[test]
fn end_to_end_fallback_with_clean_stderr() {
    let dir = TempDir::new().expect("tempdir");
    let response = shell_dispatcher().dispatch("echo built", dir.path(), &["a.c".to_owned()]);
    assert!(response.is_ok());
    assert_eq!(response.message(), "built\n");
    assert!(response.problems().is_empty());
}

#[test]
fn end_to_end_fallback_with_stderr_fails() {
    let dir = TempDir::new().expect("tempdir");
    let response = shell_dispatcher().dispatch("echo oops >&2", dir.path(), &[]);
    assert!(!response.is_ok());
    assert_eq!(response.message(), "oops\n");
}

#[test]
fn end_to_end_missing_toolchain_is_a_failed_response() {
    let dir = TempDir::new().expect("tempdir");
    let response = shell_dispatcher().dispatch(
        "go build-this-tool-does-not-exist",
        dir.path(),
        &["main.go".to_owned()],
    );
    // Either `go` is installed and rejects the subcommand, or it is missing.
    assert!(!response.is_ok());
    assert!(!response.message().is_empty());
}

#[test]
fn end_to_end_toolchain_exiting_127_keeps_its_diagnostics() {
    let dir = TempDir::new().expect("tempdir");
    let mut registry = ToolchainRegistry::new();
    registry
        .register(Route::new("script", ["sh "], Arc::new(CFamilyParser)))
        .expect("register route");
    let dispatcher = Dispatcher::new(registry, ShellRunner::new());

    let response = dispatcher.dispatch(
        "sh -c 'echo \"a.c:1:1: error: boom\" >&2; exit 127'",
        dir.path(),
        &["a.c".to_owned()],
    );

    assert!(!response.is_ok());
    assert_eq!(response.message(), "a.c:1:1: error: boom\n");
    assert_eq!(
        response.problems(),
        [vec![Problem::new("error", 1, 1, "boom")]]
    );
}

#[test]
fn end_to_end_response_serialises_to_the_wire_shape() {
    let runner = CannedRunner::new(ProcessOutput::new(
        "",
        "./main.go:3:2: undefined: fmt.Printn\n",
        Some(1),
    ));
    let dispatcher = Dispatcher::new(ToolchainRegistry::with_default_toolchains(), runner);
    let response = dispatcher.dispatch("go build", Path::new("/work"), &["main.go".to_owned()]);
    let json = serde_json::to_value(&response).expect("serialise");
    assert_eq!(
        json,
        serde_json::json!({
            "ok": false,
            "uid": null,
            "message": "./main.go:3:2: undefined: fmt.Printn\n",
            "problems": [[{"type": "error", "row": 3, "col": 2, "text": "undefined: fmt.Printn"}]],
        })
    );
    assert_eq!(dispatcher.runner().commands(), ["go build"]);
    assert_eq!(
        response.problems().first().and_then(|bucket| bucket.first()),
        Some(&Problem::new("error", 3, 2, "undefined: fmt.Printn"))
    );
}
