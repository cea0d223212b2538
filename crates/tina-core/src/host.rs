//! Boundary to the host framework.
//!
//! The bridge never creates host objects. It hands a [`HostOptions`] value to
//! the host's registration primitive ([`Host::register`]) and later receives
//! the host-owned object back, as a [`HostInstance`], every time the host
//! invokes one of the registered callbacks.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::collections::OrderedMap;
use crate::error::BridgeError;
use crate::flavor::FlavorKind;
use crate::{DataMap, OccurrenceId};

/// The host-created object for one occurrence of a component or page.
pub trait HostInstance {
    fn occurrence(&self) -> OccurrenceId;

    /// The host's current data.
    fn data(&self) -> &DataMap;

    /// Reads an exposed attribute (`id`, `dataset`, `route`, ...).
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Calls a host method (`setData`, `triggerEvent`, ...).
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, BridgeError>;
}

/// The host registration primitive for one flavor.
pub trait Host {
    fn register(&mut self, options: HostOptions) -> Result<(), BridgeError>;
}

type CallbackFn = dyn Fn(&mut dyn HostInstance, &[Value]) -> Result<Value, BridgeError>;

/// A lifecycle callback or method as the host sees it: invoked with the host
/// instance as its context.
#[derive(Clone)]
pub struct HostCallback(Rc<CallbackFn>);

impl HostCallback {
    pub fn new(
        f: impl Fn(&mut dyn HostInstance, &[Value]) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, host: &mut dyn HostInstance, args: &[Value]) -> Result<Value, BridgeError> {
        (self.0)(host, args)
    }
}

impl fmt::Debug for HostCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostCallback(..)")
    }
}

/// Options object consumed by [`Host::register`].
pub struct HostOptions {
    pub flavor: FlavorKind,
    /// Non-hook options picked from the model (`data`, `properties`, ...).
    pub options: DataMap,
    pub methods: OrderedMap<String, HostCallback>,
    pub lifecycles: OrderedMap<&'static str, HostCallback>,
}

impl HostOptions {
    pub fn lifecycle(&self, name: &str) -> Option<&HostCallback> {
        self.lifecycles.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&HostCallback> {
        self.methods.get(name)
    }
}

impl fmt::Debug for HostOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostOptions")
            .field("flavor", &self.flavor)
            .field("options", &self.options)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("lifecycles", &self.lifecycles.keys().collect::<Vec<_>>())
            .finish()
    }
}
