//! floop - build, run and test code on a fleet of cores
//!
//! A JSON config describes groups of cores. floop flattens it into one
//! [`Target`] per core and dispatches a lifecycle operation (create, push,
//! build, run, test, ps, logs, destroy) to every target in parallel, driving
//! `docker-machine` and `rsync` on the host.
//!
//! ```no_run
//! use floop::{config, dispatch, Operation, OperationOptions};
//! use std::path::Path;
//!
//! let targets = config::resolve(Path::new("floop.json"))?;
//! let report = dispatch(Operation::Ps.function(), &targets, &OperationOptions::default())?;
//! assert_eq!(report.len(), targets.len());
//! # Ok::<(), floop::FloopError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod lifecycle;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use config::FlatTargetConfig;
pub use dispatch::{dispatch, DispatchReport, TargetOutcome};
pub use domain::{Operation, Target};
pub use error::{FloopError, FloopResult};
pub use lifecycle::OperationOptions;
