#![doc = r"Core lifecycle bridge for the Tina-RS experiment."]

pub mod builtin;
pub mod collections;
pub mod define;
pub mod delegate;
pub mod error;
pub mod flavor;
pub mod host;
pub mod instance;
pub mod middleware;
pub mod model;
pub mod projection;
pub mod registry;
pub mod settings;

pub use define::{define, define_component, define_page, define_with, Definition};
pub use delegate::DelegationTable;
pub use error::BridgeError;
pub use flavor::{Flavor, FlavorKind, Hook, COMPONENT, PAGE};
pub use host::{Host, HostCallback, HostInstance, HostOptions};
pub use instance::{Instance, Wrapper};
pub use middleware::{compose, Middleware, Pipeline};
pub use model::{Method, Model};
pub use projection::{add_hooks, project_hooks, project_methods, Placement};
pub use registry::Registry;
pub use settings::Settings;

pub use serde_json::{json, Value};

/// JSON object used for data, properties and host options.
pub type DataMap = serde_json::Map<String, Value>;

/// Identity of one host-created occurrence of a component or page.
pub type OccurrenceId = u64;

#[cfg(test)]
pub(crate) mod tests;
