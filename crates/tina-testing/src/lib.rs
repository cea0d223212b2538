//! Testing utilities and host doubles for Tina-RS.
//!
//! [`TestHost`] plays the host framework: it accepts registrations, creates
//! [`TestInstance`] occurrences, fires the birth event exactly once per
//! occurrence, and dispatches later lifecycle events and methods the way a
//! host runtime would.

pub mod host;

pub use host::{HostCall, TestHost, TestInstance};

pub mod prelude {
    pub use crate::host::*;
    pub use tina_core::{json, BridgeError, DataMap, Model, Value};
}
