//! Infrastructure Layer
//!
//! Host-side I/O used by the domain and lifecycle code.
//!
//! - `home` - home directory lookup and `~` expansion
//! - `process` - spawning local command lines and collecting their output

pub mod home;
pub mod process;
