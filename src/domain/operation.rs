//! Operation registry
//!
//! Maps CLI operation names to lifecycle functions through an explicit table.
//! Unregistered names are rejected with [`FloopError::UnknownOperation`].

use std::fmt;
use std::str::FromStr;

use crate::domain::Target;
use crate::error::{FloopError, FloopResult};
use crate::lifecycle::{self, OperationOptions};

/// Signature shared by every lifecycle operation
pub type LifecycleFn = fn(&Target, &OperationOptions) -> FloopResult<()>;

/// A fleet action that can be dispatched over every target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Push,
    Build,
    Run,
    Test,
    Ps,
    Logs,
    Destroy,
}

static REGISTRY: [(Operation, &str, LifecycleFn); 8] = [
    (Operation::Create, "create", lifecycle::create),
    (Operation::Push, "push", lifecycle::push),
    (Operation::Build, "build", lifecycle::build),
    (Operation::Run, "run", lifecycle::run),
    (Operation::Test, "test", lifecycle::test),
    (Operation::Ps, "ps", lifecycle::ps),
    (Operation::Logs, "logs", lifecycle::logs),
    (Operation::Destroy, "destroy", lifecycle::destroy),
];

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Create,
        Operation::Push,
        Operation::Build,
        Operation::Run,
        Operation::Test,
        Operation::Ps,
        Operation::Logs,
        Operation::Destroy,
    ];

    fn entry(self) -> &'static (Operation, &'static str, LifecycleFn) {
        // Every variant has exactly one row; see `registry_covers_every_operation`.
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn function(self) -> LifecycleFn {
        self.entry().2
    }

    pub fn from_name(name: &str) -> FloopResult<Self> {
        REGISTRY
            .iter()
            .find(|(_, registered, _)| *registered == name)
            .map(|(op, _, _)| *op)
            .ok_or_else(|| FloopError::UnknownOperation(name.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = FloopError;

    fn from_str(s: &str) -> FloopResult<Self> {
        Operation::from_name(s)
    }
}

/// Resolve an operation name straight to its function.
pub fn lookup(name: &str) -> FloopResult<LifecycleFn> {
    Operation::from_name(name).map(Operation::function)
}
