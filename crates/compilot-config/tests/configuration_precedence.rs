//! Behavioural tests for configuration layering.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use ortho_config::OrthoConfig;

use compilot_config::{Config, LogFormat, default_command_prefix, default_log_filter};

const PREFIX_VARIABLE: &str = "COMPILOT_COMMAND_PREFIX";

const MANAGED_VARIABLES: [&str; 5] = [
    PREFIX_VARIABLE,
    "COMPILOT_CONFIG_PATH",
    "COMPILOT_TIMEOUT_SECS",
    "COMPILOT_LOG_FILTER",
    "COMPILOT_LOG_FORMAT",
];

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        let harness = Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("compilot")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        };
        // A developer's shell must not leak into the scenarios.
        for key in MANAGED_VARIABLES {
            harness.clear_env(key);
        }
        harness
    }

    fn write_config(&self, prefix: &str) {
        let path = self.temp_dir.path().join("compilot.toml");
        let toml = format!("command_prefix = \"{prefix}\"\nlog_format = \"compact\"\n");
        if let Err(error) = fs::write(&path, toml) {
            panic!("failed to write configuration: {error}");
        }
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn remember(&self, key: &str) {
        let previous = std::env::var_os(key);
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn set_env(&self, key: &str, value: &str) {
        self.remember(key);
        // Environment mutation is `unsafe` in edition 2024. The harness holds
        // `ENV_MUTEX` and restores overrides in `Drop`.
        unsafe { std::env::set_var(key, value) };
    }

    fn clear_env(&self, key: &str) {
        self.remember(key);
        unsafe { std::env::remove_var(key) };
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the command prefix to \"{prefix}\"")]
fn given_configuration_file(harness: &Harness, prefix: String) {
    harness.write_config(&prefix);
}

#[given("the environment overrides the command prefix to \"{prefix}\"")]
fn given_environment_override(harness: &Harness, prefix: String) {
    harness.set_env(PREFIX_VARIABLE, &prefix);
}

#[when("the CLI sets the command prefix to \"{prefix}\"")]
fn when_cli_override(harness: &Harness, prefix: String) {
    harness.push_cli_arg("--command-prefix");
    harness.push_cli_arg(prefix);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the command prefix to \"{prefix}\"")]
fn then_resolved_prefix(harness: &Harness, prefix: String) {
    let config = harness.loaded_config();
    assert_eq!(config.command_prefix(), prefix);
    // Values the higher layers do not mention survive from the file.
    assert_eq!(config.log_format(), LogFormat::Compact);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.loaded_config();
    assert_eq!(config.command_prefix(), default_command_prefix());
    assert_eq!(config.timeout_secs(), None);
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_without_overrides(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The configuration file sets the fallback prefix"
)]
fn file_sets_prefix(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The command line overrides the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    let _ = harness;
}
