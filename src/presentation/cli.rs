//! CLI Argument Parsing
//!
//! Global flags (`--config-file`, `--json`, `--log-level`, `--ascii`) are
//! accepted before or after the subcommand. Every lifecycle subcommand takes
//! the same [`LifecycleArgs`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::infrastructure::process::EchoStream;
use crate::lifecycle::OperationOptions;

/// floop - build, run and test code on a fleet of cores
#[derive(Parser, Debug)]
#[command(name = "floop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the fleet config file
    #[arg(short = 'c', long = "config-file", global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Use plain ASCII markers in text output
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Log level (error, warn, info, debug, trace); overrides FLOOP_LOG
    #[arg(long, global = true)]
    pub log_level: Option<LevelFilter>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Echoed remote output goes to stderr under `--json` so stdout holds
    /// only the report.
    pub fn echo_stream(&self) -> EchoStream {
        if self.json {
            EchoStream::Stderr
        } else {
            EchoStream::Stdout
        }
    }
}

/// Flags shared by lifecycle subcommands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LifecycleArgs {
    /// Echo remote stdout as it arrives
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not fail on non-zero exit of individual remote commands
    #[arg(long)]
    pub no_check: bool,
}

impl LifecycleArgs {
    pub fn options(&self) -> OperationOptions {
        OperationOptions {
            check: !self.no_check,
            verbose: self.verbose,
            ..OperationOptions::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a docker machine on every core
    Create(LifecycleArgs),
    /// List containers on every core
    Ps(LifecycleArgs),
    /// Show logs of the floop container on every core
    Logs(LifecycleArgs),
    /// Sync host source to every core
    Push(LifecycleArgs),
    /// Push, then build the image on every core
    Build(LifecycleArgs),
    /// Build, then run the container on every core
    Run(LifecycleArgs),
    /// Push, then build and run Dockerfile.test on every core
    Test(LifecycleArgs),
    /// Remove source, container runtime and docker machine from every core
    Destroy(LifecycleArgs),
    /// Write a starter config file
    Init,
}

impl Commands {
    /// Registry name and flags for lifecycle subcommands; `None` for `init`.
    pub fn lifecycle(&self) -> Option<(&'static str, &LifecycleArgs)> {
        match self {
            Commands::Create(args) => Some(("create", args)),
            Commands::Ps(args) => Some(("ps", args)),
            Commands::Logs(args) => Some(("logs", args)),
            Commands::Push(args) => Some(("push", args)),
            Commands::Build(args) => Some(("build", args)),
            Commands::Run(args) => Some(("run", args)),
            Commands::Test(args) => Some(("test", args)),
            Commands::Destroy(args) => Some(("destroy", args)),
            Commands::Init => None,
        }
    }
}
