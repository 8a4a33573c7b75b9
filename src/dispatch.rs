//! Parallel dispatch of one lifecycle operation over the whole fleet
//!
//! Each target gets its own worker thread. A failure, or even a panic, in
//! one worker is recorded against that target and never stops the others.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use crate::domain::Target;
use crate::error::{FloopError, FloopResult};
use crate::lifecycle::OperationOptions;

/// Outcome of one operation on one target
#[derive(Debug)]
pub struct TargetOutcome {
    pub core: String,
    pub group: String,
    pub address: String,
    pub result: FloopResult<()>,
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&FloopError> {
        self.result.as_ref().err()
    }
}

/// Every outcome of a dispatched batch, one per target, in input order
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<TargetOutcome>,
}

impl DispatchReport {
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_success)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Run `operation` once per target on a pool with one thread per target.
///
/// Only fails if the worker pool itself cannot be built; per-target errors
/// are returned inside the report.
pub fn dispatch<F>(
    operation: F,
    targets: &[Target],
    options: &OperationOptions,
) -> FloopResult<DispatchReport>
where
    F: Fn(&Target, &OperationOptions) -> FloopResult<()> + Sync,
{
    if targets.is_empty() {
        return Ok(DispatchReport::default());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(targets.len())
        .thread_name(|i| format!("floop-worker-{}", i))
        .build()
        .map_err(|e| FloopError::Io(std::io::Error::other(e)))?;

    let results: Vec<FloopResult<()>> = pool.install(|| {
        targets
            .par_iter()
            .map(|target| run_guarded(&operation, target, options))
            .collect()
    });

    let outcomes: Vec<TargetOutcome> = targets
        .iter()
        .zip(results)
        .map(|(target, result)| TargetOutcome {
            core: target.core().to_string(),
            group: target.group().to_string(),
            address: target.address().to_string(),
            result,
        })
        .collect();

    let report = DispatchReport { outcomes };
    tracing::info!(
        succeeded = report.successes().count(),
        failed = report.failures().count(),
        "dispatch finished"
    );
    Ok(report)
}

fn run_guarded<F>(operation: &F, target: &Target, options: &OperationOptions) -> FloopResult<()>
where
    F: Fn(&Target, &OperationOptions) -> FloopResult<()> + Sync,
{
    let span = tracing::info_span!("target", core = target.core());
    let _entered = span.enter();

    match catch_unwind(AssertUnwindSafe(|| operation(target, options))) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(core = target.core(), "worker panicked: {}", message);
            Err(FloopError::WorkerPanicked(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
