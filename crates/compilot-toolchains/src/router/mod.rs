//! Command routing.
//!
//! The [`ToolchainRegistry`] holds an ordered list of [`Route`]s. A command is
//! routed to the first route with a matching prefix, to the no-op sentinel, or
//! to the generic fallback. Selection never fails.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::RegistryError;
use crate::parsers::{
    CFamilyParser, CobolParser, DiagnosticParser, DotnetParser, ElixirParser, GhcParser,
    GnatParser, GoParser, JavacParser, NasmParser, NimParser, PerlParser, PythonParser,
    RustcParser,
};
use crate::problem::{ParseResult, RawProblem};

const ROUTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::router");

/// The command that short-circuits to a canned success.
pub const NOOP_COMMAND: &str = "none";

/// Post-processing applied to a parser's result before bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjustment {
    /// Leave the result unchanged.
    #[default]
    None,
    /// Move every problem one row up. The `v` compiler reports rows one past
    /// the offending line.
    DecrementRows,
}

impl Adjustment {
    /// Applies the adjustment in place.
    pub fn apply(self, result: &mut ParseResult) {
        match self {
            Self::None => {}
            Self::DecrementRows => result
                .problems_mut()
                .iter_mut()
                .for_each(RawProblem::decrement_row),
        }
    }
}

/// A set of command prefixes bound to a parser.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use compilot_toolchains::{Route, parsers::GoParser};
///
/// let route = Route::new("go", ["go "], Arc::new(GoParser));
/// assert!(route.matches("go build ./..."));
/// assert!(!route.matches("gofmt -l ."));
/// ```
#[derive(Clone)]
pub struct Route {
    name: String,
    prefixes: Vec<String>,
    parser: Arc<dyn DiagnosticParser>,
    adjustment: Adjustment,
}

impl Route {
    /// Creates a route with no adjustment.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, prefixes: I, parser: Arc<dyn DiagnosticParser>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            parser,
            adjustment: Adjustment::None,
        }
    }

    /// Sets the post-processing adjustment.
    #[must_use]
    pub const fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Returns the route name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the command prefixes, each a token followed by one space.
    #[must_use]
    pub const fn prefixes(&self) -> &[String] {
        self.prefixes.as_slice()
    }

    /// Returns the parser bound to this route.
    #[must_use]
    pub fn parser(&self) -> &dyn DiagnosticParser {
        self.parser.as_ref()
    }

    /// Returns the adjustment applied after parsing.
    #[must_use]
    pub const fn adjustment(&self) -> Adjustment {
        self.adjustment
    }

    /// Returns `true` when `command` starts with one of the prefixes.
    #[must_use]
    pub fn matches(&self, command: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| command.starts_with(prefix.as_str()))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("prefixes", &self.prefixes)
            .field("parser", &self.parser.name())
            .field("adjustment", &self.adjustment)
            .finish()
    }
}

/// Outcome of routing one command.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// The no-op sentinel; nothing is executed.
    Noop,
    /// A registered toolchain route.
    Toolchain(&'a Route),
    /// No route matched; run the command through the generic fallback.
    Fallback,
}

/// Ordered registry of toolchain routes.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    routes: Vec<Route>,
}

impl ToolchainRegistry {
    /// Creates an empty registry. Every command routes to the fallback
    /// except the no-op sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in toolchains in priority order.
    #[must_use]
    pub fn with_default_toolchains() -> Self {
        let c_family: Arc<dyn DiagnosticParser> = Arc::new(CFamilyParser);
        let dotnet: Arc<dyn DiagnosticParser> = Arc::new(DotnetParser);
        let routes = vec![
            Route::new("c", ["gcc ", "clang ", "g++ ", "zig "], Arc::clone(&c_family)),
            Route::new("v", ["v "], c_family).with_adjustment(Adjustment::DecrementRows),
            Route::new("dotnet", ["dotnet "], Arc::clone(&dotnet)),
            Route::new("haskell", ["ghc "], Arc::new(GhcParser)),
            Route::new("ada", ["gnatmake "], Arc::new(GnatParser)),
            Route::new("go", ["go "], Arc::new(GoParser)),
            Route::new("javac", ["javac "], Arc::new(JavacParser)),
            Route::new("mono", ["mcs "], dotnet),
            Route::new(
                "elixir",
                ["elixirc ", "mix ", "iex ", "elixir "],
                Arc::new(ElixirParser),
            ),
            Route::new("nasm", ["nasm "], Arc::new(NasmParser)),
            Route::new("nim", ["nim "], Arc::new(NimParser)),
            Route::new("perl", ["perl "], Arc::new(PerlParser)),
            Route::new("python", ["python "], Arc::new(PythonParser)),
            Route::new("rust", ["rustc "], Arc::new(RustcParser)),
            Route::new("cobol", ["cobc "], Arc::new(CobolParser)),
        ];
        Self { routes }
    }

    /// Appends a route at the lowest priority.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoPrefixes`] for a route without prefixes,
    /// [`RegistryError::InvalidPrefix`] for a prefix that is not a single token
    /// followed by one space, and [`RegistryError::DuplicatePrefix`] when a
    /// prefix is already claimed.
    pub fn register(&mut self, route: Route) -> Result<(), RegistryError> {
        if route.prefixes.is_empty() {
            return Err(RegistryError::NoPrefixes {
                name: route.name.clone(),
            });
        }
        for (index, prefix) in route.prefixes.iter().enumerate() {
            validate_prefix(prefix)?;
            if let Some(existing) = self.owner_of(prefix) {
                return Err(RegistryError::DuplicatePrefix {
                    prefix: prefix.clone(),
                    existing: existing.name.clone(),
                });
            }
            if route.prefixes.iter().take(index).any(|earlier| earlier == prefix) {
                return Err(RegistryError::DuplicatePrefix {
                    prefix: prefix.clone(),
                    existing: route.name.clone(),
                });
            }
        }
        debug!(
            target: ROUTER_TARGET,
            route = route.name.as_str(),
            prefixes = ?route.prefixes,
            "registered toolchain route"
        );
        self.routes.push(route);
        Ok(())
    }

    /// Routes a command.
    #[must_use]
    pub fn select(&self, command: &str) -> Selection<'_> {
        if is_noop(command) {
            debug!(target: ROUTER_TARGET, "no-op command");
            return Selection::Noop;
        }
        match self.routes.iter().find(|route| route.matches(command)) {
            Some(route) => {
                debug!(target: ROUTER_TARGET, route = route.name(), "selected toolchain route");
                Selection::Toolchain(route)
            }
            None => {
                debug!(target: ROUTER_TARGET, "no route matched, using fallback");
                Selection::Fallback
            }
        }
    }

    /// Looks up a route by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Returns the routes in priority order.
    #[must_use]
    pub const fn routes(&self) -> &[Route] {
        self.routes.as_slice()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` when no routes are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn owner_of(&self, prefix: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.prefixes.iter().any(|existing| existing == prefix))
    }
}

/// Returns `true` for `none` on its own or followed by whitespace.
fn is_noop(command: &str) -> bool {
    command
        .strip_prefix(NOOP_COMMAND)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn validate_prefix(prefix: &str) -> Result<(), RegistryError> {
    let valid = prefix
        .strip_suffix(' ')
        .is_some_and(|token| !token.is_empty() && !token.contains(char::is_whitespace));
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidPrefix {
            prefix: prefix.to_owned(),
        })
    }
}
