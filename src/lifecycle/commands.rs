//! Command lines issued by lifecycle operations
//!
//! Each function renders the exact line that is logged and then executed.
//! Remote commands are wrapped by [`ssh`] inside `Target::run_remote_command`.

use crate::domain::Target;

/// Image and container name used by `build` and `run`.
pub const IMAGE: &str = "floop";
/// Image and container name used by `test`.
pub const TEST_IMAGE: &str = "flooptest";
/// Build descriptor expected at the root of `host_source`.
pub const BUILD_FILE: &str = "Dockerfile";
/// Test descriptor expected at the root of `host_source`.
pub const TEST_FILE: &str = "Dockerfile.test";

/// Sanity check run on a freshly created machine.
pub const VERIFY: &str = "pwd";
pub const PS: &str = "docker ps";
/// Remove the container runtime from the core.
pub const PURGE_RUNTIME: &str = "sudo apt-get purge -y docker-ce || true";

pub fn create(target: &Target) -> String {
    format!(
        "{} create --driver generic --generic-ip-address {} --generic-ssh-user {} --generic-ssh-key {} --engine-storage-driver overlay {}",
        target.host_docker_machine_bin(),
        target.address(),
        target.user(),
        target.host_key().display(),
        target.core()
    )
}

/// Local, unconditional removal of the docker machine.
pub fn force_remove(target: &Target) -> String {
    format!("{} rm -f {}", target.host_docker_machine_bin(), target.core())
}

pub fn ssh(target: &Target, command: &str) -> String {
    format!(
        "{} ssh {} {}",
        target.host_docker_machine_bin(),
        target.core(),
        command
    )
}

pub fn make_target_dir(target: &Target) -> String {
    format!("mkdir -p {}", target.target_source())
}

/// Mirror `host_source` to `target_source`, deleting remote extras.
pub fn sync(target: &Target) -> String {
    format!(
        "{} -avz -e '{} ssh' {} {}:'{}' --delete",
        target.host_rsync_bin(),
        target.host_docker_machine_bin(),
        target.host_source().display(),
        target.core(),
        target.target_source()
    )
}

pub fn build(target: &Target) -> String {
    format!("docker build -t {} {}/", IMAGE, target.target_source())
}

/// Best-effort removal of a previous container; never fails remotely.
pub fn remove_container(name: &str) -> String {
    format!("docker rm -f {} || true", name)
}

pub fn run(target: &Target) -> String {
    format!(
        "docker run --name {} -v {}:/floop/ {}",
        IMAGE,
        target.target_source(),
        IMAGE
    )
}

pub fn build_test(target: &Target) -> String {
    format!(
        "docker build -t {} -f {}/{} {}",
        TEST_IMAGE,
        target.target_source(),
        TEST_FILE,
        target.target_source()
    )
}

pub fn run_test(target: &Target) -> String {
    format!(
        "docker run --name {} -v {}:/floop/ {}",
        TEST_IMAGE,
        target.target_source(),
        TEST_IMAGE
    )
}

pub fn logs() -> String {
    format!("docker logs {}", IMAGE)
}

pub fn remove_target_source(target: &Target) -> String {
    format!("rm -rf {}", target.target_source())
}
