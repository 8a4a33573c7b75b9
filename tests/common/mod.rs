//! Common test utilities for floop integration tests.
//!
//! - `FleetEnv`: isolated host with fake `docker-machine` and `rsync`
//! - Fixtures: config documents and Dockerfile contents

#![allow(dead_code)]

pub mod env;

pub use env::*;
pub use fixtures::*;
