//! Lifecycle operations
//!
//! Free functions that perform one fleet action against one [`Target`]. They
//! take only plain data so the dispatcher can hand them to worker threads.
//!
//! Composition is strictly sequential per target:
//! - `build` always pushes first
//! - `run` always builds first
//! - `test` always pushes first
//!
//! None of the operations are transactional. `create` rolls back a
//! half-provisioned machine; `destroy` attempts every teardown step.

pub mod commands;

use crate::domain::Target;
use crate::error::{FloopError, FloopResult};
use crate::infrastructure::process::{self, Echo, EchoStream};

/// Knobs shared by every lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationOptions {
    /// Fail on non-zero exit of individual commands
    pub check: bool,
    /// Echo remote stdout as it arrives
    pub verbose: bool,
    /// Stream echoed lines go to
    pub echo: EchoStream,
}

impl Default for OperationOptions {
    fn default() -> Self {
        Self {
            check: true,
            verbose: false,
            echo: EchoStream::Stdout,
        }
    }
}

impl OperationOptions {
    fn echoing(self) -> Self {
        Self {
            verbose: true,
            ..self
        }
    }

    fn echo_stream(self) -> Option<EchoStream> {
        self.verbose.then_some(self.echo)
    }

    fn checked(self) -> Self {
        Self {
            check: true,
            ..self
        }
    }
}

fn remote(target: &Target, op: &'static str, command: &str, opts: OperationOptions) -> FloopResult<String> {
    tracing::info!(core = target.core(), op, "{}", command);
    let out = target.run_remote_command_with(command, opts.check, opts.echo_stream())?;
    tracing::debug!(core = target.core(), op, "{}", out.trim_end());
    Ok(out)
}

fn local(target: &Target, op: &'static str, line: &str, opts: OperationOptions) -> FloopResult<String> {
    tracing::info!(core = target.core(), op, "{}", line);
    let echo = opts.echo_stream().map(|stream| Echo {
        label: target.core(),
        stream,
    });
    let out = process::run(line, opts.check, echo)?;
    tracing::debug!(core = target.core(), op, "{}", out.stdout.trim_end());
    Ok(out.stdout)
}

fn fail(target: &Target, op: &'static str, err: FloopError) -> FloopError {
    tracing::error!(core = target.core(), op, "{}", err);
    err
}

/// Provision a docker machine on the core with the generic SSH driver.
///
/// The provisioning command is always checked. With `opts.check`, the new
/// machine is also verified by running `pwd` over ssh. On any failure the
/// machine is force-removed before [`FloopError::Create`] is returned.
pub fn create(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    let provisioned = local(target, "create", &commands::create(target), opts.checked())
        .and_then(|_| {
            if opts.check {
                remote(target, "create", commands::VERIFY, *opts).map(drop)
            } else {
                Ok(())
            }
        });

    if let Err(e) = provisioned {
        let rollback = commands::force_remove(target);
        tracing::error!(
            core = target.core(),
            op = "create",
            "cleaning up failed docker machine: {}",
            rollback
        );
        if let Err(cleanup) = process::run(&rollback, false, None) {
            tracing::error!(core = target.core(), op = "create", "cleanup failed: {}", cleanup);
        }
        return Err(fail(target, "create", FloopError::Create(e.to_string())));
    }
    Ok(())
}

/// Mirror `host_source` into `target_source` on the core.
///
/// The source directory is re-checked here because it may have been removed
/// since the target was constructed; nothing is sent to the core in that case.
pub fn push(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    if !target.host_source().is_dir() {
        return Err(fail(
            target,
            "push",
            FloopError::SourceNotFound {
                path: target.host_source().to_path_buf(),
            },
        ));
    }

    remote(target, "push", &commands::make_target_dir(target), opts.checked())
        .and_then(|_| local(target, "push", &commands::sync(target), *opts))
        .map(drop)
        .map_err(|e| fail(target, "push", FloopError::Communication(e.to_string())))
}

/// Push, then build the `floop` image on the core.
pub fn build(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    let build_file = target.host_source().join(commands::BUILD_FILE);
    if !build_file.is_file() {
        return Err(fail(
            target,
            "build",
            FloopError::BuildFileNotFound { path: build_file },
        ));
    }

    push(target, opts)?;

    remote(target, "build", &commands::build(target), *opts)
        .map(drop)
        .map_err(|e| fail(target, "build", FloopError::Build(e.to_string())))
}

/// Build, then replace the running `floop` container with a fresh one.
pub fn run(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    build(target, opts)?;

    let remove = commands::remove_container(commands::IMAGE);
    if let Err(e) = remote(target, "run", &remove, *opts) {
        tracing::warn!(core = target.core(), op = "run", "ignoring failed cleanup: {}", e);
    }

    remote(target, "run", &commands::run(target), *opts)
        .map(drop)
        .map_err(|e| fail(target, "run", FloopError::Run(e.to_string())))
}

/// Push, then build and run the image described by `Dockerfile.test`.
pub fn test(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    let test_file = target.host_source().join(commands::TEST_FILE);
    if !test_file.is_file() {
        return Err(fail(
            target,
            "test",
            FloopError::TestFileNotFound { path: test_file },
        ));
    }

    push(target, opts)?;

    let remove = commands::remove_container(commands::TEST_IMAGE);
    if let Err(e) = remote(target, "test", &remove, *opts) {
        tracing::warn!(core = target.core(), op = "test", "ignoring failed cleanup: {}", e);
    }

    remote(target, "test", &commands::build_test(target), *opts)
        .and_then(|_| remote(target, "test", &commands::run_test(target), *opts))
        .map(drop)
        .map_err(|e| fail(target, "test", FloopError::Test(e.to_string())))
}

/// List containers on the core. Output is always echoed.
pub fn ps(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    remote(target, "ps", commands::PS, opts.echoing())
        .map(drop)
        .map_err(|e| fail(target, "ps", FloopError::Ps(e.to_string())))
}

/// Print the logs of the `floop` container. Output is always echoed.
pub fn logs(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    remote(target, "logs", &commands::logs(), opts.echoing())
        .map(drop)
        .map_err(|e| fail(target, "logs", FloopError::Communication(e.to_string())))
}

enum Step {
    Remote(String),
    Local(String),
}

/// Tear the core down: remove the synced source, purge the container
/// runtime, then remove the docker machine locally.
///
/// Every step runs even if an earlier one failed; all failures are reported
/// together in [`FloopError::Destroy`].
pub fn destroy(target: &Target, opts: &OperationOptions) -> FloopResult<()> {
    let steps = [
        Step::Remote(commands::remove_target_source(target)),
        Step::Remote(commands::PURGE_RUNTIME.to_string()),
        Step::Local(commands::force_remove(target)),
    ];

    let mut failures = Vec::new();
    for step in &steps {
        let outcome = match step {
            Step::Remote(command) => remote(target, "destroy", command, *opts),
            Step::Local(line) => local(target, "destroy", line, *opts),
        };
        if let Err(e) = outcome {
            tracing::error!(core = target.core(), op = "destroy", "{}", e);
            failures.push(e.to_string());
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(FloopError::Destroy { failures })
    }
}
