//! Configuration module for floop
//!
//! The config file is a JSON document of groups of cores. Values cascade:
//! 1. Core entry (highest priority)
//! 2. The group's `cores.default` entry
//! 3. `groups.default` (fleet-wide, lowest priority)
//!
//! [`resolve`] turns a config file into validated [`Target`]s; any error here
//! aborts the whole batch before a single core is contacted.

mod loader;
mod resolver;
mod types;

pub use loader::{default_document, init, load};
pub use resolver::{flatten, validate};
pub use types::{
    FlatTargetConfig, BINARY_KEY_SUFFIX, DEFAULT_CONFIG_FILE, DEFAULT_ENTRY, REQUIRED_KEYS,
};

use std::path::Path;

use crate::domain::Target;
use crate::error::FloopResult;

/// Load, validate and flatten a config file into targets.
pub fn resolve(path: &Path) -> FloopResult<Vec<Target>> {
    let raw = validate(load(path)?)?;
    let flat = flatten(&raw)?;
    tracing::debug!(path = %path.display(), cores = flat.len(), "config flattened");
    flat.into_iter().map(Target::new).collect()
}
