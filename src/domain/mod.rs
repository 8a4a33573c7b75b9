//! Domain Layer
//!
//! - `target` - the immutable [`Target`] entity
//! - `operation` - the registry of lifecycle operations by name

pub mod operation;
pub mod target;

pub use operation::{lookup, LifecycleFn, Operation};
pub use target::{sanitize_core_name, Target};
