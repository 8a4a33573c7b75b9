//! Home directory resolution with test isolation support.
//!
//! `floop_home_dir()` checks `FLOOP_TEST_HOME` first and falls back to
//! `dirs::home_dir()`. Integration tests point it at a temp directory so that
//! `~/.ssh/id_rsa` style keys resolve inside the sandbox.

use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const FLOOP_TEST_HOME_VAR: &str = "FLOOP_TEST_HOME";

/// Get the home directory used for `~` expansion.
pub fn floop_home_dir() -> Option<PathBuf> {
    std::env::var(FLOOP_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Expand a leading `~` or `~/` using the floop home directory.
///
/// Paths without a leading tilde are returned unchanged, as are tilde paths
/// when no home directory can be resolved.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, floop_home_dir().as_deref())
}

pub(crate) fn expand_home_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
