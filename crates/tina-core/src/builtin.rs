//! Middleware applied to every definition before registered middleware.

use serde_json::{json, Value};

use crate::error::BridgeError;
use crate::flavor::{Flavor, FlavorKind, PAGE};
use crate::instance::Instance;
use crate::middleware::Middleware;
use crate::model::Method;
use crate::{settings, DataMap};

/// Wrapper field holding the page's route: `{ "path": .., "query": .. }`.
pub const ROUTE_FIELD: &str = "$route";

/// Builtin chain for `flavor`, outermost first.
pub fn builtins(flavor: &'static Flavor) -> Vec<Middleware> {
    match flavor.kind {
        FlavorKind::Component => vec![initial(flavor), logger(flavor)],
        FlavorKind::Page => vec![route(), initial(flavor), logger(flavor)],
    }
}

fn chain_previous(
    previous: &Option<Method>,
    instance: &mut Instance<'_>,
    args: &[Value],
) -> Result<Value, BridgeError> {
    match previous {
        Some(hook) => hook.call(instance, args),
        None => Ok(Value::Null),
    }
}

/// Seeds computed data: the before-hook of the flavor's initial event issues
/// an empty `setData` so `compute` runs over the initial data.
pub fn initial(flavor: &'static Flavor) -> Middleware {
    Middleware::map(move |mut model| {
        let Some(before) = flavor.before_hook(flavor.initial) else {
            return model;
        };
        model.wrap_hook(before, |previous| {
            Method::new(move |instance, args| {
                instance.set_data(DataMap::new())?;
                chain_previous(&previous, instance, args)
            })
        });
        model
    })
}

/// Logs every lifecycle event of the flavor before the model's own hook runs.
pub fn logger(flavor: &'static Flavor) -> Middleware {
    Middleware::map(move |mut model| {
        let level = settings::current().lifecycle_log_level;
        for hook in flavor.hooks {
            let name = hook.name;
            model.wrap_hook(name, |previous| {
                Method::new(move |instance, args| {
                    log::log!(
                        level,
                        "{} #{} {name}",
                        instance.kind(),
                        instance.occurrence()
                    );
                    chain_previous(&previous, instance, args)
                })
            });
        }
        model
    })
}

/// Records the page route and load query on the wrapper before load.
pub fn route() -> Middleware {
    Middleware::map(|mut model| {
        let Some(before) = PAGE.before_hook(PAGE.birth) else {
            return model;
        };
        model.wrap_hook(before, |previous| {
            Method::new(move |instance, args| {
                let query = match args.first() {
                    Some(Value::Object(query)) => Value::Object(query.clone()),
                    _ => Value::Object(DataMap::new()),
                };
                let path = instance.get("route").unwrap_or(Value::Null);
                instance.set(ROUTE_FIELD, json!({ "path": path, "query": query }))?;
                chain_previous(&previous, instance, args)
            })
        });
        model
    })
}
