//! The user-facing wrapper and its binding to the host instance.
//!
//! A [`Wrapper`] is owned by the registry and carries everything derived from
//! the model: the member table and ad-hoc fields written by hooks. It never
//! stores the host instance. Instead, every dispatch binds the wrapper to the
//! host instance the host handed us for that call, producing an
//! [`Instance`]. Delegated reads therefore always observe the host's current
//! state.
//!
//! Dispatch only takes a shared reference to the wrapper. Host calls made
//! from user code may call back into the same occurrence, so the field table
//! is borrowed only for the duration of a single `get` or `set`.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::collections::OrderedMap;
use crate::delegate::DelegationTable;
use crate::error::{value_kind, BridgeError};
use crate::flavor::{Flavor, FlavorKind, COMPUTE, DATA, SET_DATA};
use crate::host::HostInstance;
use crate::model::{Method, Model};
use crate::{DataMap, OccurrenceId};

pub struct Wrapper {
    flavor: &'static Flavor,
    occurrence: OccurrenceId,
    members: OrderedMap<String, Method>,
    fields: RefCell<DataMap>,
    surface: Rc<DelegationTable>,
}

impl Wrapper {
    /// Assembles the member table. Later sources win on collision: the
    /// default `compute`, the model's `compute`, the model's methods, then
    /// every model hook whose name is a recognized hook or before-hook.
    pub fn new(
        flavor: &'static Flavor,
        model: &Model,
        occurrence: OccurrenceId,
        surface: Rc<DelegationTable>,
    ) -> Self {
        let mut members = OrderedMap::default();
        let compute = model
            .compute
            .clone()
            .unwrap_or_else(|| Method::new(|_, _| Ok(Value::Object(DataMap::new()))));
        members.insert(COMPUTE.to_owned(), compute);
        for (name, method) in &model.methods {
            members.insert(name.clone(), method.clone());
        }
        for (name, hook) in &model.hooks {
            if flavor.is_lifecycle_name(name) {
                members.insert(name.clone(), hook.clone());
            }
        }
        Self {
            flavor,
            occurrence,
            members,
            fields: RefCell::default(),
            surface,
        }
    }

    pub fn flavor(&self) -> &'static Flavor {
        self.flavor
    }

    pub fn occurrence(&self) -> OccurrenceId {
        self.occurrence
    }

    pub fn member(&self, name: &str) -> Option<&Method> {
        self.members.get(name)
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }
}

/// A wrapper bound to its host instance for the duration of one dispatch.
pub struct Instance<'a> {
    wrapper: &'a Wrapper,
    host: &'a mut dyn HostInstance,
}

impl<'a> Instance<'a> {
    pub(crate) fn new(wrapper: &'a Wrapper, host: &'a mut dyn HostInstance) -> Self {
        Self { wrapper, host }
    }

    pub fn kind(&self) -> FlavorKind {
        self.wrapper.flavor.kind
    }

    pub fn occurrence(&self) -> OccurrenceId {
        self.wrapper.occurrence
    }

    pub fn wrapper(&self) -> &Wrapper {
        self.wrapper
    }

    pub fn host(&self) -> &dyn HostInstance {
        &*self.host
    }

    /// The host's current data, read through the wrapper.
    pub fn data(&self) -> &DataMap {
        self.host.data()
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.wrapper.members.contains_key(name)
    }

    /// Reads a field written by a hook, the overridden `data` view, or a
    /// delegated host attribute.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.wrapper.field(name) {
            return Some(value);
        }
        if name == DATA {
            return Some(Value::Object(self.data().clone()));
        }
        if self.wrapper.surface.delegates_attribute(name) {
            return self.host.attribute(name);
        }
        None
    }

    /// Writes a wrapper field. Names on the host surface are read-only.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Result<(), BridgeError> {
        let name = name.into();
        let flavor = self.wrapper.flavor;
        if flavor.is_overridden(&name)
            || self.wrapper.surface.delegates_attribute(&name)
            || self.wrapper.surface.delegates_method(&name)
        {
            return Err(BridgeError::ReadOnly {
                flavor: flavor.kind,
                name,
            });
        }
        self.wrapper.fields.borrow_mut().insert(name, value);
        Ok(())
    }

    /// Calls a wrapper member, an overridden method, or a delegated host
    /// method, in that order.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        if let Some(method) = self.wrapper.members.get(name).cloned() {
            return method.call(self, args);
        }
        if name == SET_DATA {
            let patch = match args.first() {
                Some(Value::Object(patch)) => patch.clone(),
                None | Some(Value::Null) => DataMap::new(),
                Some(_) => {
                    return Err(BridgeError::InvalidArgument {
                        name: SET_DATA.to_owned(),
                        expected: "an object",
                    })
                }
            };
            return self.set_data(patch);
        }
        if self.wrapper.surface.delegates_method(name) {
            return self.host.invoke(name, args);
        }
        Err(BridgeError::UnknownMember {
            flavor: self.kind(),
            name: name.to_owned(),
        })
    }

    /// Runs the wrapper's `compute` member over `data`.
    pub fn compute(&mut self, data: &DataMap) -> Result<DataMap, BridgeError> {
        match self.call(COMPUTE, &[Value::Object(data.clone())])? {
            Value::Object(computed) => Ok(computed),
            Value::Null => Ok(DataMap::new()),
            other => Err(BridgeError::InvalidCompute {
                found: value_kind(&other),
            }),
        }
    }

    /// Merges `patch` into the host data, recomputes derived fields and
    /// forwards only the keys that changed. Nothing reaches the host when the
    /// merge is a no-op.
    pub fn set_data(&mut self, patch: DataMap) -> Result<Value, BridgeError> {
        let mut next = self.host.data().clone();
        next.extend(patch);
        let computed = self.compute(&next)?;
        next.extend(computed);

        let current = self.host.data();
        let changed: DataMap = next
            .into_iter()
            .filter(|(key, value)| current.get(key) != Some(value))
            .collect();
        if changed.is_empty() {
            log::trace!(
                "{} #{} setData skipped, nothing changed",
                self.kind(),
                self.occurrence()
            );
            return Ok(Value::Null);
        }
        log::debug!(
            "{} #{} setData {:?}",
            self.kind(),
            self.occurrence(),
            changed.keys().collect::<Vec<_>>()
        );
        self.host.invoke(SET_DATA, &[Value::Object(changed)])
    }
}

#[cfg(test)]
#[path = "tests/instance_tests.rs"]
mod tests;
