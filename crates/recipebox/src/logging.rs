//! Log output for the recipe service.
//!
//! Events come from two places: the crate itself (startup, store reads and
//! writes) and `tower_http::trace`, which records one span per HTTP request.
//! Both follow the CLI verbosity unless `RUST_LOG` holds a valid filter.

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level of the per-request spans and response events emitted by the router.
///
/// Requests show up from [`Verbosity::Normal`] upward and are hidden by
/// `--quiet`.
pub const REQUEST_LEVEL: Level = Level::INFO;

const CRATE_TARGET: &str = "recipebox";
const REQUEST_TARGET: &str = "tower_http::trace";

/// How much the service logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only, including masked store read failures.
    Quiet,
    /// Startup, requests and store initialization.
    #[default]
    Normal,
    /// Adds per-read and per-write store details.
    Verbose,
    /// Everything the crate and the request layer emit.
    Trace,
}

impl Verbosity {
    /// Map the `--quiet` flag and the `-v` count to a verbosity.
    ///
    /// `--quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level this verbosity lets through.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    fn directive_level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Trace => "trace",
        }
    }

    /// Filter directives for the crate and the request trace layer.
    ///
    /// Other dependencies (hyper, tokio) stay silent.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.directive_level();
        format!("{CRATE_TARGET}={level},{REQUEST_TARGET}={level}")
    }
}

/// Build the event filter from an optional `RUST_LOG` value.
///
/// A missing, blank or unparseable value falls back to the verbosity's
/// directives.
#[must_use]
pub fn build_filter(rust_log: Option<&str>, verbosity: Verbosity) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.directives()))
}

/// Install the global subscriber.
///
/// Call once at startup; later calls are no-ops.
///
/// ```no_run
/// use recipebox::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(rust_log.as_deref(), verbosity))
        .with_target(true)
        .try_init();
}

/// Test subscriber: warnings and errors, captured per test.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
