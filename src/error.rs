//! Error types for floop
//!
//! One variant per failure kind. Configuration errors are fatal for the whole
//! batch; lifecycle errors are captured per target by the dispatcher.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for floop operations
pub type FloopResult<T> = Result<T, FloopError>;

/// Main error type for floop operations
#[derive(Error, Debug)]
pub enum FloopError {
    /// Configuration document does not follow the groups/cores schema
    #[error("malformed config: {reason}")]
    MalformedConfig { reason: String },

    /// Two flattened cores share an address or a core name
    #[error("redundant target config: {key} '{value}' is used by more than one core")]
    RedundantTargetConfig { key: &'static str, value: String },

    /// Config file does not exist
    #[error("config file not found: {path}")]
    ConfigFileNotFound { path: PathBuf },

    /// `init` refused to overwrite an existing config file
    #[error("config file already exists: {path}")]
    ConfigFileExists { path: PathBuf },

    /// A `*_bin` key points at a binary that is not installed
    #[error("unmet host dependency: {key} = {path:?} is not an existing file")]
    UnmetHostDependency { key: String, path: Option<String> },

    /// SSH private key file does not exist
    #[error("SSH key not found: {path}")]
    SshKeyNotFound { path: PathBuf },

    /// Host source directory does not exist
    #[error("source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// docker-machine create failed; the half-created machine was removed
    #[error("create failed: {0}")]
    Create(String),

    /// Cannot talk to the core over docker-machine ssh / rsync
    #[error("communication with core failed: {0}")]
    Communication(String),

    /// Host source has no Dockerfile
    #[error("build file not found: {path}")]
    BuildFileNotFound { path: PathBuf },

    #[error("build failed: {0}")]
    Build(String),

    #[error("run failed: {0}")]
    Run(String),

    /// Host source has no Dockerfile.test
    #[error("test file not found: {path}")]
    TestFileNotFound { path: PathBuf },

    #[error("test failed: {0}")]
    Test(String),

    /// One or more teardown steps failed; every step was still attempted
    #[error("destroy failed: {}", failures.join("; "))]
    Destroy { failures: Vec<String> },

    #[error("ps failed: {0}")]
    Ps(String),

    /// Command exited non-zero
    #[error("command '{command}' failed: {stderr}")]
    RemoteCommand { command: String, stderr: String },

    /// Command could not be started at all
    #[error("cannot start '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// No lifecycle operation is registered under this name
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A dispatched worker panicked instead of returning
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FloopError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FloopError::MalformedConfig {
            reason: reason.into(),
        }
    }

    /// Stable name of the failure kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FloopError::MalformedConfig { .. } => "MalformedConfig",
            FloopError::RedundantTargetConfig { .. } => "RedundantTargetConfig",
            FloopError::ConfigFileNotFound { .. } => "ConfigFileNotFound",
            FloopError::ConfigFileExists { .. } => "ConfigFileExists",
            FloopError::UnmetHostDependency { .. } => "UnmetHostDependency",
            FloopError::SshKeyNotFound { .. } => "SSHKeyNotFound",
            FloopError::SourceNotFound { .. } => "SourceNotFound",
            FloopError::Create(_) => "CreateException",
            FloopError::Communication(_) => "CommunicationException",
            FloopError::BuildFileNotFound { .. } => "BuildFileNotFound",
            FloopError::Build(_) => "BuildException",
            FloopError::Run(_) => "RunException",
            FloopError::TestFileNotFound { .. } => "TestFileNotFound",
            FloopError::Test(_) => "TestException",
            FloopError::Destroy { .. } => "DestroyException",
            FloopError::Ps(_) => "PSException",
            FloopError::RemoteCommand { .. } => "RemoteCommandException",
            FloopError::CommandSpawn { .. } => "CommandSpawn",
            FloopError::UnknownOperation(_) => "UnknownOperation",
            FloopError::WorkerPanicked(_) => "WorkerPanicked",
            FloopError::Io(_) => "Io",
        }
    }

    /// Whether this error comes from configuration rather than a target.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FloopError::MalformedConfig { .. }
                | FloopError::RedundantTargetConfig { .. }
                | FloopError::ConfigFileNotFound { .. }
                | FloopError::UnmetHostDependency { .. }
                | FloopError::SshKeyNotFound { .. }
                | FloopError::SourceNotFound { .. }
        )
    }
}
