//! Configuration loading and the starter document written by `floop init`

use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::NamedTempFile;

use crate::error::{FloopError, FloopResult};

/// Read a config file as a raw JSON document.
pub fn load(path: &Path) -> FloopResult<Value> {
    if !path.is_file() {
        return Err(FloopError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| FloopError::malformed(format!("{}: {}", path.display(), e)))
}

/// Starter document: host binaries found on `PATH` plus one example core.
pub fn default_document() -> Value {
    json!({
        "groups": {
            "default": {
                "host_docker_machine_bin": discover_binary("docker-machine", "/usr/local/bin/docker-machine"),
                "host_rsync_bin": discover_binary("rsync", "/usr/bin/rsync"),
            },
            "group0": {
                "cores": {
                    "default": {
                        "host_source": "./src",
                        "target_source": "/home/floop/floop",
                        "user": "floop",
                        "host_key": "~/.ssh/id_rsa",
                    },
                    "core0": {
                        "address": "192.168.1.100",
                    },
                }
            }
        }
    })
}

fn discover_binary(name: &str, fallback: &str) -> String {
    which::which(name)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| fallback.to_string())
}

/// Write [`default_document`] to `path`. Never overwrites an existing file.
pub fn init(path: &Path) -> FloopResult<()> {
    if path.exists() {
        return Err(FloopError::ConfigFileExists {
            path: path.to_path_buf(),
        });
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    let body = serde_json::to_string_pretty(&default_document())
        .map_err(|e| FloopError::Io(e.into()))?;
    writeln!(tmp, "{}", body)?;

    tmp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            FloopError::ConfigFileExists {
                path: path.to_path_buf(),
            }
        } else {
            FloopError::Io(e.error)
        }
    })?;
    tracing::info!(path = %path.display(), "wrote starter config");
    Ok(())
}
