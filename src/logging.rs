//! Logging setup
//!
//! Diagnostics go to stderr through a tracing subscriber so stdout only
//! carries the report. `CORPUS_STATS_LOG` overrides the level chosen from the
//! command-line flags (any `EnvFilter` directive is accepted).

use std::io::IsTerminal;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "CORPUS_STATS_LOG";

/// Verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Verbosity::Verbose,
            (false, true) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Filter from `CORPUS_STATS_LOG`, falling back to the flag-derived level
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global subscriber. Colours are only used when stderr is a
/// terminal. A second call is a no-op.
pub fn setup_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(env_filter(verbosity))
        .try_init();
}
