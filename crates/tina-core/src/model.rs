//! The user-authored declarative definition.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::collections::OrderedMap;
use crate::error::BridgeError;
use crate::flavor::Flavor;
use crate::instance::Instance;
use crate::DataMap;

type MethodFn = dyn Fn(&mut Instance<'_>, &[Value]) -> Result<Value, BridgeError>;

/// A callable member of the wrapper: a user method, a lifecycle hook or
/// `compute`. Cloning shares the underlying closure.
#[derive(Clone)]
pub struct Method(Rc<MethodFn>);

impl Method {
    pub fn new(
        f: impl Fn(&mut Instance<'_>, &[Value]) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, instance: &mut Instance<'_>, args: &[Value]) -> Result<Value, BridgeError> {
        (self.0)(instance, args)
    }

    pub fn ptr_eq(&self, other: &Method) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

/// Declarative model handed to `define`.
///
/// Middleware receives the model by value and may add, remove or replace any
/// entry. Hooks are keyed by name; projection only looks at the names the
/// flavor recognizes, so unknown hooks are carried along but never fire.
#[derive(Clone, Default, Debug)]
pub struct Model {
    pub properties: DataMap,
    pub data: DataMap,
    pub methods: OrderedMap<String, Method>,
    pub hooks: OrderedMap<String, Method>,
    pub compute: Option<Method>,
    /// Remaining host options (`behaviors`, `relations`, `options`, ...).
    pub options: DataMap,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn data(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Instance<'_>, &[Value]) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Method::new(f));
        self
    }

    pub fn hook(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Instance<'_>, &[Value]) -> Result<Value, BridgeError> + 'static,
    ) -> Self {
        self.hooks.insert(name.into(), Method::new(f));
        self
    }

    pub fn compute(mut self, f: impl Fn(&DataMap) -> DataMap + 'static) -> Self {
        self.compute = Some(Method::new(move |_, args| {
            let empty = DataMap::new();
            let data = match args.first() {
                Some(Value::Object(data)) => data,
                _ => &empty,
            };
            Ok(Value::Object(f(data)))
        }));
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Replaces (or inserts) hook `name` with the result of `wrap`, which
    /// receives the previous hook if there was one.
    pub fn wrap_hook(&mut self, name: &str, wrap: impl FnOnce(Option<Method>) -> Method) {
        let previous = self.hooks.get(name).cloned();
        self.hooks.insert(name.to_owned(), wrap(previous));
    }

    /// Host option object for `flavor`: every non-hook option key the host
    /// accepts, except `methods`, which projection supplies.
    pub fn host_options(&self, flavor: &Flavor) -> DataMap {
        let mut options = DataMap::new();
        for name in flavor.host_option_names() {
            let value = match name {
                "data" => Some(Value::Object(self.data.clone())),
                "properties" if !self.properties.is_empty() => {
                    Some(Value::Object(self.properties.clone()))
                }
                "properties" | "methods" => None,
                other => self.options.get(other).cloned(),
            };
            if let Some(value) = value {
                options.insert(name.to_owned(), value);
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::{COMPONENT, PAGE};
    use serde_json::json;

    #[test]
    fn host_options_pick_only_accepted_keys() {
        let model = Model::new()
            .property("title", json!({ "type": "String" }))
            .data("count", json!(0))
            .option("behaviors", json!(["form"]))
            .option("options", json!({ "multipleSlots": true }))
            .option("onShow", json!("ignored"))
            .option("unrelated", json!(1));

        let component = model.host_options(&COMPONENT);
        assert_eq!(
            Value::Object(component),
            json!({
                "properties": { "title": { "type": "String" } },
                "data": { "count": 0 },
                "behaviors": ["form"],
                "options": { "multipleSlots": true },
            })
        );

        let page = model.host_options(&PAGE);
        assert_eq!(Value::Object(page), json!({ "data": { "count": 0 } }));
    }

    #[test]
    fn wrap_hook_sees_previous_hook() {
        let original = Method::new(|_, _| Ok(json!(1)));
        let mut model = Model::new();
        model.hooks.insert("created".into(), original.clone());

        let mut seen = None;
        model.wrap_hook("created", |previous| {
            seen = previous;
            Method::new(|_, _| Ok(Value::Null))
        });
        assert!(seen.is_some_and(|method| method.ptr_eq(&original)));

        let mut missing = true;
        model.wrap_hook("attached", |previous| {
            missing = previous.is_none();
            Method::new(|_, _| Ok(Value::Null))
        });
        assert!(missing);
        assert!(model.hooks.contains_key("attached"));
    }
}
