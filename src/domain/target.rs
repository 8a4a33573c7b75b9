//! Target entity - one remote core under fleet management
//!
//! A `Target` is validated once, at construction, and never changes
//! afterwards. Fields are private and only readable through getters:
//!
//! ```compile_fail
//! # fn demo(target: floop::Target) {
//! let mut target = target;
//! target.address = String::from("10.0.0.9");
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::FlatTargetConfig;
use crate::error::{FloopError, FloopResult};
use crate::infrastructure::home::expand_home;
use crate::infrastructure::process::{self, Echo, EchoStream};
use crate::lifecycle::commands;

/// Remove spaces and hyphens, which docker-machine does not accept in names.
pub fn sanitize_core_name(name: &str) -> String {
    name.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// An immutable, validated remote core
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    address: String,
    core: String,
    user: String,
    host_key: PathBuf,
    host_source: PathBuf,
    target_source: String,
    host_docker_machine_bin: String,
    host_rsync_bin: String,
    group: String,
}

impl Target {
    /// Build a target from a flattened config entry.
    ///
    /// Fails with [`FloopError::SshKeyNotFound`] if the home-expanded key is
    /// not a regular file, and [`FloopError::SourceNotFound`] if `host_source`
    /// is not a directory.
    pub fn new(config: FlatTargetConfig) -> FloopResult<Self> {
        let host_key = expand_home(&config.host_key);
        if !host_key.is_file() {
            return Err(FloopError::SshKeyNotFound { path: host_key });
        }

        let host_source = PathBuf::from(&config.host_source);
        if !host_source.is_dir() {
            return Err(FloopError::SourceNotFound { path: host_source });
        }

        Ok(Self {
            address: config.address,
            core: sanitize_core_name(&config.core),
            user: config.user,
            host_key,
            host_source,
            target_source: config.target_source,
            host_docker_machine_bin: config.host_docker_machine_bin,
            host_rsync_bin: config.host_rsync_bin,
            group: config.group,
        })
    }

    /// IP address reachable over SSH
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Machine name, stripped of spaces and hyphens
    pub fn core(&self) -> &str {
        &self.core
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Absolute path of the SSH private key on the host
    pub fn host_key(&self) -> &Path {
        &self.host_key
    }

    pub fn host_source(&self) -> &Path {
        &self.host_source
    }

    /// Destination directory on the core
    pub fn target_source(&self) -> &str {
        &self.target_source
    }

    pub fn host_docker_machine_bin(&self) -> &str {
        &self.host_docker_machine_bin
    }

    pub fn host_rsync_bin(&self) -> &str {
        &self.host_rsync_bin
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Run `command` on the core through `docker-machine ssh`.
    ///
    /// Returns the command's stdout. When `verbose`, stdout lines are echoed
    /// as they arrive, prefixed with the core name.
    pub fn run_remote_command(&self, command: &str, check: bool, verbose: bool) -> FloopResult<String> {
        self.run_remote_command_with(command, check, verbose.then_some(EchoStream::Stdout))
    }

    /// Like [`Target::run_remote_command`], echoing to the given stream.
    pub fn run_remote_command_with(
        &self,
        command: &str,
        check: bool,
        echo: Option<EchoStream>,
    ) -> FloopResult<String> {
        let line = commands::ssh(self, command);
        let echo = echo.map(|stream| Echo {
            label: self.core(),
            stream,
        });
        let output = process::run(&line, check, echo)?;
        Ok(output.stdout)
    }
}

impl TryFrom<FlatTargetConfig> for Target {
    type Error = FloopError;

    fn try_from(config: FlatTargetConfig) -> FloopResult<Self> {
        Target::new(config)
    }
}
