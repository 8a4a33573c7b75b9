//! Presentation Layer
//!
//! - `cli` - argument parsing (via clap)
//! - `output` - rendering dispatch reports as text or JSON

pub mod cli;
pub mod output;

pub use cli::{Cli, Commands, LifecycleArgs};
pub use output::{create_renderer, error_json, OutputFormat, ReportRenderer};
