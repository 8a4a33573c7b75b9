//! Logging setup
//!
//! Structured logs go to stderr so stdout stays clean for reports and
//! echoed remote output. `--log-level` wins over `FLOOP_LOG`; with
//! neither set only warnings and errors are shown.

use is_terminal::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV_VAR: &str = "FLOOP_LOG";

fn filter(level: Option<LevelFilter>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: Option<LevelFilter>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
