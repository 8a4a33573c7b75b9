//! Scenario: a bad config stops the batch before any core is contacted.

use crate::common::*;
use floop::{config, FloopError};
use serde_json::json;

#[test]
fn duplicate_address_is_rejected() {
    let env = FleetEnv::new();
    env.write_config(&env.config(&[
        ("group0", "core0", "10.0.0.1"),
        ("group1", "core1", "10.0.0.1"),
    ]));

    let err = config::resolve(&env.config_path()).unwrap_err();

    match err {
        FloopError::RedundantTargetConfig { key, value } => {
            assert_eq!(key, "address");
            assert_eq!(value, "10.0.0.1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(env.calls().is_empty());
}

#[test]
fn missing_binary_is_unmet_dependency() {
    let env = FleetEnv::new();
    let mut raw = env.config(&[("group0", "core0", "10.0.0.1")]);
    raw["groups"]["default"]["host_rsync_bin"] = json!("/nonexistent/rsync");
    env.write_config(&raw);

    let err = config::resolve(&env.config_path()).unwrap_err();

    assert!(
        matches!(err, FloopError::UnmetHostDependency { ref key, .. } if key == "host_rsync_bin"),
        "{err:?}"
    );
}

#[test]
fn missing_key_file_is_reported() {
    let env = FleetEnv::new();
    std::fs::remove_file(env.home_path(".ssh/id_rsa")).unwrap();
    env.write_config(&env.config(&[("group0", "core0", "10.0.0.1")]));

    let err = config::resolve(&env.config_path()).unwrap_err();

    assert!(matches!(err, FloopError::SshKeyNotFound { .. }), "{err:?}");
    assert_eq!(err.kind(), "SSHKeyNotFound");
}

#[test]
fn core_override_beats_group_defaults() {
    let env = FleetEnv::new();
    let mut raw = env.config(&[("group0", "core0", "10.0.0.1"), ("group0", "core1", "10.0.0.2")]);
    raw["groups"]["group0"]["cores"]["default"] = json!({"user": "pi"});
    raw["groups"]["group0"]["cores"]["core1"]["user"] = json!("admin");
    env.write_config(&raw);

    let targets = config::resolve(&env.config_path()).unwrap();

    assert_eq!(targets[0].user(), "pi");
    assert_eq!(targets[1].user(), "admin");
    assert_eq!(targets[1].group(), "group0");
}
