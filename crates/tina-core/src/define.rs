//! Definition entry points.
//!
//! `define` runs the model through the pipeline, projects hooks and methods,
//! injects the birth and teardown wiring, and hands the result to the host's
//! registration primitive.

use std::rc::Rc;

use serde_json::Value;

use crate::delegate::DelegationTable;
use crate::error::BridgeError;
use crate::flavor::{Flavor, COMPONENT, PAGE};
use crate::host::{Host, HostCallback, HostInstance, HostOptions};
use crate::instance::{Instance, Wrapper};
use crate::middleware::Pipeline;
use crate::model::Model;
use crate::projection::{add_hooks, project_hooks, project_methods, Placement};
use crate::registry::Registry;
use crate::OccurrenceId;

/// Handle to a registered component or page.
///
/// The registered host callbacks share the transformed model and the
/// registry with this handle; dropping it does not unregister anything.
pub struct Definition {
    flavor: &'static Flavor,
    model: Rc<Model>,
    registry: Rc<Registry>,
}

impl Definition {
    pub fn flavor(&self) -> &'static Flavor {
        self.flavor
    }

    /// The model after the middleware pipeline ran.
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_linked(&self, occurrence: OccurrenceId) -> bool {
        self.registry.is_linked(occurrence)
    }

    /// Runs `f` against the wrapper linked to `host`.
    pub fn with_instance<R>(
        &self,
        host: &mut dyn HostInstance,
        f: impl FnOnce(&mut Instance<'_>) -> Result<R, BridgeError>,
    ) -> Result<R, BridgeError> {
        self.registry.dispatch(host, f)
    }
}

pub fn define_component(host: &mut dyn Host, model: Model) -> Result<Definition, BridgeError> {
    define(&COMPONENT, host, model)
}

pub fn define_page(host: &mut dyn Host, model: Model) -> Result<Definition, BridgeError> {
    define(&PAGE, host, model)
}

/// Defines `model` for `flavor` with the builtin and registered middleware.
pub fn define(
    flavor: &'static Flavor,
    host: &mut dyn Host,
    model: Model,
) -> Result<Definition, BridgeError> {
    define_with(flavor, &Pipeline::for_flavor(flavor), host, model)
}

pub fn define_with(
    flavor: &'static Flavor,
    pipeline: &Pipeline,
    host: &mut dyn Host,
    model: Model,
) -> Result<Definition, BridgeError> {
    let model = Rc::new(pipeline.apply(model)?);
    let registry = Rc::new(Registry::new(flavor));
    let surface = Rc::new(DelegationTable::for_flavor(flavor));

    let methods = project_methods(&model, &registry);
    let mut lifecycles = project_hooks(flavor, &registry);
    add_hooks(
        &mut lifecycles,
        [(flavor.birth, birth(flavor, &model, &registry, &surface))],
        Placement::Before,
    );
    add_hooks(
        &mut lifecycles,
        [(flavor.teardown, teardown(&registry))],
        Placement::After,
    );

    let options = HostOptions {
        flavor: flavor.kind,
        options: model.host_options(flavor),
        methods,
        lifecycles,
    };
    log::debug!(
        "registering {} with {} methods and {} lifecycles",
        flavor.kind,
        options.methods.len(),
        options.lifecycles.len()
    );
    host.register(options)?;

    Ok(Definition {
        flavor,
        model,
        registry,
    })
}

/// Builds the wrapper for the invoking occurrence and links it.
fn birth(
    flavor: &'static Flavor,
    model: &Rc<Model>,
    registry: &Rc<Registry>,
    surface: &Rc<DelegationTable>,
) -> HostCallback {
    let model = Rc::clone(model);
    let registry = Rc::clone(registry);
    let surface = Rc::clone(surface);
    HostCallback::new(move |host, _| {
        let wrapper = Wrapper::new(flavor, &model, host.occurrence(), Rc::clone(&surface));
        registry.link(wrapper)?;
        Ok(Value::Null)
    })
}

fn teardown(registry: &Rc<Registry>) -> HostCallback {
    let registry = Rc::clone(registry);
    HostCallback::new(move |host, _| {
        registry.unlink(host.occurrence());
        Ok(Value::Null)
    })
}

#[cfg(test)]
#[path = "tests/define_tests.rs"]
mod tests;
