//! Configuration type definitions

/// Name of the reserved entry that supplies inherited values.
pub const DEFAULT_ENTRY: &str = "default";

/// Keys every flattened core must define after merging.
pub const REQUIRED_KEYS: [&str; 7] = [
    "address",
    "user",
    "host_key",
    "host_source",
    "target_source",
    "host_docker_machine_bin",
    "host_rsync_bin",
];

/// Keys injected by flattening rather than read from the document.
pub const INJECTED_KEYS: [&str; 2] = ["group", "core"];

/// Suffix marking keys that name host binaries.
pub const BINARY_KEY_SUFFIX: &str = "_bin";

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "floop.json";

/// One core after defaults have been merged down to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTargetConfig {
    pub group: String,
    pub core: String,
    pub address: String,
    pub user: String,
    /// SSH private key path, possibly `~`-relative
    pub host_key: String,
    pub host_source: String,
    pub target_source: String,
    pub host_docker_machine_bin: String,
    pub host_rsync_bin: String,
}

pub(crate) fn is_known_key(key: &str) -> bool {
    REQUIRED_KEYS.contains(&key) || INJECTED_KEYS.contains(&key)
}
