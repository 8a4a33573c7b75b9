//! Config flattening and host validation
//!
//! Merges defaults down the groups/cores tree:
//! - `groups.default` is the base for every core
//! - a group's `cores.default` overrides the base
//! - the core's own entry overrides both
//!
//! The merged entry must contain every key in [`REQUIRED_KEYS`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde_json::{Map, Value};

use super::types::{is_known_key, FlatTargetConfig, BINARY_KEY_SUFFIX, DEFAULT_ENTRY, REQUIRED_KEYS};
use crate::domain::target::sanitize_core_name;
use crate::error::{FloopError, FloopResult};

type Entry = BTreeMap<String, String>;

/// Check that every `*_bin` key in the document names an existing file.
///
/// Returns the document unchanged so calls can be chained before [`flatten`].
pub fn validate(raw: Value) -> FloopResult<Value> {
    check_binaries(&raw)?;
    Ok(raw)
}

fn check_binaries(value: &Value) -> FloopResult<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key.ends_with(BINARY_KEY_SUFFIX) {
                    let path = child.as_str();
                    let installed = path.is_some_and(|p| Path::new(p).is_file());
                    if !installed {
                        return Err(FloopError::UnmetHostDependency {
                            key: key.clone(),
                            path: path.map(str::to_string),
                        });
                    }
                } else {
                    check_binaries(child)?;
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(check_binaries),
        _ => Ok(()),
    }
}

/// Flatten a raw config document into one entry per concrete core.
///
/// Entries come out grouped by group name, then core name, both in key order.
pub fn flatten(raw: &Value) -> FloopResult<Vec<FlatTargetConfig>> {
    let root = as_mapping(raw, "config")?;
    let groups = as_mapping(child(root, "groups", "config")?, "groups")?;
    let global = leaf_values(child(groups, DEFAULT_ENTRY, "groups")?, "groups.default")?;

    let mut flat = Vec::new();
    for (group_name, group) in groups {
        if group_name == DEFAULT_ENTRY {
            continue;
        }
        let group_path = format!("groups.{}", group_name);
        let group = as_mapping(group, &group_path)?;

        let cores_path = format!("{}.cores", group_path);
        let cores = as_mapping(child(group, "cores", &group_path)?, &cores_path)?;
        let group_default = leaf_values(
            child(cores, DEFAULT_ENTRY, &cores_path)?,
            &format!("{}.default", cores_path),
        )?;

        let mut base = global.clone();
        base.extend(group_default);

        for (core_name, core) in cores {
            if core_name == DEFAULT_ENTRY {
                continue;
            }
            let core_path = format!("{}.{}", cores_path, core_name);
            if sanitize_core_name(core_name).is_empty() {
                return Err(FloopError::malformed(format!(
                    "{} is empty once spaces and hyphens are removed",
                    core_path
                )));
            }
            let mut merged = base.clone();
            merged.extend(leaf_values(core, &core_path)?);
            merged.insert("group".to_string(), group_name.clone());
            merged.insert("core".to_string(), core_name.clone());
            flat.push(into_flat(merged, &core_path)?);
        }
    }

    check_unique(&flat)?;
    Ok(flat)
}

fn as_mapping<'a>(value: &'a Value, path: &str) -> FloopResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        FloopError::malformed(format!(
            "{} must be a mapping, found {}",
            path,
            type_name(value)
        ))
    })
}

fn child<'a>(map: &'a Map<String, Value>, key: &str, path: &str) -> FloopResult<&'a Value> {
    map.get(key)
        .ok_or_else(|| FloopError::malformed(format!("{} has no '{}' entry", path, key)))
}

fn leaf_values(value: &Value, path: &str) -> FloopResult<Entry> {
    as_mapping(value, path)?
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key.clone(), s.clone())),
            other => Err(FloopError::malformed(format!(
                "{}.{} must be a string, found {}",
                path,
                key,
                type_name(other)
            ))),
        })
        .collect()
}

fn into_flat(mut merged: Entry, path: &str) -> FloopResult<FlatTargetConfig> {
    for key in merged.keys().filter(|k| !is_known_key(k)) {
        tracing::warn!(core = path, key = key.as_str(), "ignoring unrecognized config key");
    }

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !merged.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(FloopError::malformed(format!(
            "{} is missing required keys: {}",
            path,
            missing.join(", ")
        )));
    }

    let mut take = |key: &str| {
        merged
            .remove(key)
            .ok_or_else(|| FloopError::malformed(format!("{} is missing '{}'", path, key)))
    };
    let entry = FlatTargetConfig {
        group: take("group")?,
        core: take("core")?,
        address: take("address")?,
        user: take("user")?,
        host_key: take("host_key")?,
        host_source: take("host_source")?,
        target_source: take("target_source")?,
        host_docker_machine_bin: take("host_docker_machine_bin")?,
        host_rsync_bin: take("host_rsync_bin")?,
    };

    if entry.address.trim().is_empty() {
        return Err(FloopError::malformed(format!("{} has an empty address", path)));
    }
    Ok(entry)
}

fn check_unique(flat: &[FlatTargetConfig]) -> FloopResult<()> {
    let mut addresses = HashSet::new();
    let mut cores = HashSet::new();
    for entry in flat {
        if !addresses.insert(entry.address.as_str()) {
            return Err(FloopError::RedundantTargetConfig {
                key: "address",
                value: entry.address.clone(),
            });
        }
        let core = sanitize_core_name(&entry.core);
        if !cores.insert(core.clone()) {
            return Err(FloopError::RedundantTargetConfig {
                key: "core",
                value: core,
            });
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
