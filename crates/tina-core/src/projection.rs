//! Host-shaped callbacks derived from a flavor and a model.
//!
//! Projected callbacks do not capture any model closures. They resolve the
//! wrapper linked to the invoking host instance through the registry and call
//! its members by name, so the wrapper's member table stays the single source
//! of truth for what runs.

use std::rc::Rc;

use serde_json::Value;

use crate::collections::OrderedMap;
use crate::flavor::Flavor;
use crate::host::HostCallback;
use crate::model::Model;
use crate::registry::Registry;

/// Where an injected callback runs relative to the one already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// One host callback per flavor hook. Each calls the wrapper's before-hook,
/// if it has one, then its primary hook, returning the primary hook's result.
pub fn project_hooks(
    flavor: &'static Flavor,
    registry: &Rc<Registry>,
) -> OrderedMap<&'static str, HostCallback> {
    let mut lifecycles = OrderedMap::default();
    for hook in flavor.hooks {
        let registry = Rc::clone(registry);
        let callback = HostCallback::new(move |host, args| {
            registry.dispatch(host, |instance| {
                if instance.has_member(hook.before) {
                    instance.call(hook.before, args)?;
                }
                if instance.has_member(hook.name) {
                    return instance.call(hook.name, args);
                }
                Ok(Value::Null)
            })
        });
        lifecycles.insert(hook.name, callback);
    }
    lifecycles
}

/// One host method per model method, forwarding to the same-named member of
/// the linked wrapper.
pub fn project_methods(
    model: &Model,
    registry: &Rc<Registry>,
) -> OrderedMap<String, HostCallback> {
    model
        .methods
        .keys()
        .map(|name| {
            let registry = Rc::clone(registry);
            let target = name.clone();
            let callback = HostCallback::new(move |host, args| {
                registry.dispatch(host, |instance| instance.call(&target, args))
            });
            (name.clone(), callback)
        })
        .collect()
}

/// Adds `hooks` to `lifecycles` without replacing existing callbacks. When a
/// slot is already taken, both run in the order given by `placement` and the
/// existing callback's result is returned. An `After` callback runs even if
/// the existing one failed; a failing `Before` callback stops the slot.
pub fn add_hooks(
    lifecycles: &mut OrderedMap<&'static str, HostCallback>,
    hooks: impl IntoIterator<Item = (&'static str, HostCallback)>,
    placement: Placement,
) {
    for (name, extra) in hooks {
        let combined = match lifecycles.get(name).cloned() {
            None => extra,
            Some(existing) => match placement {
                Placement::Before => HostCallback::new(move |host, args| {
                    extra.call(host, args)?;
                    existing.call(host, args)
                }),
                Placement::After => HostCallback::new(move |host, args| {
                    let result = existing.call(host, args);
                    extra.call(host, args)?;
                    result
                }),
            },
        };
        lifecycles.insert(name, combined);
    }
}
