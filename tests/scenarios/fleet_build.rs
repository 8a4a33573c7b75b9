//! Scenario: building and running code across a small fleet.

use crate::common::*;
use floop::{config, dispatch, FloopError, Operation, OperationOptions};

fn three_cores(env: &FleetEnv) -> Vec<floop::Target> {
    env.write_config(&env.config(&[
        ("group0", "core0", "10.0.0.1"),
        ("group0", "core1", "10.0.0.2"),
        ("group1", "core2", "10.0.1.1"),
    ]));
    config::resolve(&env.config_path()).unwrap()
}

#[test]
fn one_bad_core_does_not_stop_the_fleet() {
    let env = FleetEnv::failing(&["ssh core1 docker build"], &[]);
    env.write_source_file("Dockerfile", DOCKERFILE);
    let targets = three_cores(&env);

    let report = dispatch(
        Operation::Build.function(),
        &targets,
        &OperationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.len(), 3);
    let failed: Vec<&str> = report.failures().map(|o| o.core.as_str()).collect();
    assert_eq!(failed, vec!["core1"]);
    assert!(matches!(report.outcomes()[1].error(), Some(FloopError::Build(_))));
    assert!(env.called("ssh core0 docker build -t floop /home/floop/floop/"));
    assert!(env.called("ssh core2 docker build -t floop /home/floop/floop/"));
}

#[test]
fn run_without_dockerfile_never_contacts_a_core() {
    let env = FleetEnv::new();
    let targets = three_cores(&env);

    let report = dispatch(
        Operation::Run.function(),
        &targets,
        &OperationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.failures().count(), 3);
    for outcome in report.outcomes() {
        assert!(
            matches!(outcome.error(), Some(FloopError::BuildFileNotFound { .. })),
            "{:?}",
            outcome
        );
    }
    assert!(env.calls().is_empty(), "{:?}", env.calls());
}

#[test]
fn run_syncs_builds_and_starts_on_every_core() {
    let env = FleetEnv::new();
    env.write_source_file("Dockerfile", DOCKERFILE);
    let targets = three_cores(&env);

    let report = dispatch(
        Operation::Run.function(),
        &targets,
        &OperationOptions::default(),
    )
    .unwrap();

    assert!(report.is_success());
    for core in ["core0", "core1", "core2"] {
        let calls: Vec<String> = env
            .calls()
            .into_iter()
            .filter(|c| c.contains(&format!(" {}", core)))
            .collect();
        assert_eq!(calls.len(), 5, "{}: {:?}", core, calls);
        assert!(calls[0].contains("mkdir -p /home/floop/floop"));
        assert!(calls[1].starts_with("rsync -avz"));
        assert!(calls[2].contains("docker build -t floop"));
        assert!(calls[3].contains("docker rm -f floop || true"));
        assert!(calls[4].contains("docker run --name floop"));
    }
}

#[test]
fn test_uses_test_dockerfile() {
    let env = FleetEnv::new();
    env.write_source_file("Dockerfile.test", DOCKERFILE_TEST);
    let targets = three_cores(&env);

    let report = dispatch(
        Operation::Test.function(),
        &targets,
        &OperationOptions::default(),
    )
    .unwrap();

    assert!(report.is_success());
    assert!(env.called(
        "ssh core2 docker build -t flooptest -f /home/floop/floop/Dockerfile.test /home/floop/floop"
    ));
}
