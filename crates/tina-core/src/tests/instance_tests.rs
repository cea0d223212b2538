use super::*;
use crate::flavor::{COMPONENT, PAGE};
use crate::tests::FakeHostInstance;
use serde_json::json;

fn component_wrapper(model: &Model) -> Wrapper {
    Wrapper::new(
        &COMPONENT,
        model,
        1,
        Rc::new(DelegationTable::for_flavor(&COMPONENT)),
    )
}

fn page_wrapper(model: &Model) -> Wrapper {
    Wrapper::new(&PAGE, model, 2, Rc::new(DelegationTable::for_flavor(&PAGE)))
}

fn component_host() -> FakeHostInstance {
    FakeHostInstance::new(1)
        .with_data(json!({ "count": 1 }))
        .with_attribute("id", json!("counter"))
        .with_attribute("is", json!("components/counter"))
        .with_attribute("dataset", json!({ "index": 3 }))
}

#[test]
fn default_compute_returns_empty_object() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.call("compute", &[json!({})]).unwrap(), json!({}));
    assert!(instance.compute(&DataMap::new()).unwrap().is_empty());
}

#[test]
fn member_precedence_hooks_over_methods_over_compute() {
    let model = Model::new()
        .compute(|_| DataMap::new())
        .method("compute", |_, _| Ok(json!({ "from": "method" })))
        .method("created", |_, _| Ok(json!("method")))
        .hook("created", |_, _| Ok(json!("hook")))
        .hook("beforeCreate", |_, _| Ok(json!("before")))
        .hook("onLoad", |_, _| Ok(json!("page hook")));
    let wrapper = component_wrapper(&model);
    assert!(wrapper.member("onLoad").is_none());

    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.call("compute", &[]).unwrap(), json!({ "from": "method" }));
    assert_eq!(instance.call("created", &[]).unwrap(), json!("hook"));
    assert_eq!(instance.call("beforeCreate", &[]).unwrap(), json!("before"));
}

#[test]
fn delegated_attributes_read_host_state_live() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    {
        let instance = Instance::new(&wrapper, &mut host);
        for name in ["id", "is", "dataset"] {
            assert_eq!(instance.get(name), instance.host().attribute(name));
        }
        assert_eq!(instance.get("route"), None);
    }
    host.attributes.insert("id".into(), json!("renamed"));
    let instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.get("id"), Some(json!("renamed")));
}

#[test]
fn data_override_reads_through_to_host() {
    let wrapper = page_wrapper(&Model::new().data("count", json!(0)));
    let mut host = FakeHostInstance::new(2).with_data(json!({ "count": 5 }));
    {
        let instance = Instance::new(&wrapper, &mut host);
        assert_eq!(instance.get("data"), Some(json!({ "count": 5 })));
    }
    host.data.insert("count".into(), json!(6));
    let instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.data().get("count"), Some(&json!(6)));
}

#[test]
fn delegated_methods_forward_to_host() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.call("hasBehavior", &[json!("form")]).unwrap(), json!(true));
    assert_eq!(
        instance.call("triggerEvent", &[json!("change"), json!({})]).unwrap(),
        json!("triggerEvent:2")
    );
    drop(instance);
    assert_eq!(host.calls[1].0, "triggerEvent");
    assert_eq!(host.calls[1].1, vec![json!("change"), json!({})]);
}

#[test]
fn page_does_not_delegate_component_methods() {
    let wrapper = page_wrapper(&Model::new());
    let mut host = FakeHostInstance::new(2);
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(
        instance.call("triggerEvent", &[]),
        Err(BridgeError::UnknownMember {
            flavor: FlavorKind::Page,
            name: "triggerEvent".into(),
        })
    );
}

#[test]
fn set_data_merges_computes_and_forwards_changes_only() {
    let model = Model::new().compute(|data| {
        let count = data.get("count").and_then(Value::as_i64).unwrap_or(0);
        let mut computed = DataMap::new();
        computed.insert("double".into(), json!(count * 2));
        computed
    });
    let wrapper = component_wrapper(&model);
    let mut host = FakeHostInstance::new(1).with_data(json!({ "count": 1, "double": 2, "name": "a" }));
    let mut instance = Instance::new(&wrapper, &mut host);

    instance.call("setData", &[json!({ "count": 3, "name": "a" })]).unwrap();
    assert_eq!(instance.get("data"), Some(json!({ "count": 3, "double": 6, "name": "a" })));
    drop(instance);
    assert_eq!(host.calls.len(), 1);
    assert_eq!(host.calls[0].1, vec![json!({ "count": 3, "double": 6 })]);
}

#[test]
fn set_data_without_changes_skips_the_host() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    instance.set_data(DataMap::new()).unwrap();
    instance.call("setData", &[json!({ "count": 1 })]).unwrap();
    drop(instance);
    assert!(host.calls.is_empty());
}

#[test]
fn set_data_rejects_non_object_patch() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(
        instance.call("setData", &[json!(1)]),
        Err(BridgeError::InvalidArgument {
            name: "setData".into(),
            expected: "an object",
        })
    );
}

#[test]
fn compute_must_produce_an_object() {
    let model = Model::new().method("compute", |_, _| Ok(json!([1, 2])));
    let wrapper = component_wrapper(&model);
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(
        instance.set_data(DataMap::new()),
        Err(BridgeError::InvalidCompute { found: "array" })
    );
}

#[test]
fn fields_are_writable_but_surface_names_are_not() {
    let wrapper = component_wrapper(&Model::new());
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    instance.set("x", json!(1)).unwrap();
    assert_eq!(instance.get("x"), Some(json!(1)));
    for name in ["id", "data", "setData", "triggerEvent"] {
        assert_eq!(
            instance.set(name, json!(0)),
            Err(BridgeError::ReadOnly {
                flavor: FlavorKind::Component,
                name: name.into(),
            })
        );
    }
    drop(instance);
    assert_eq!(wrapper.field("x"), Some(json!(1)));
}

#[test]
fn methods_can_call_each_other_through_the_instance() {
    let model = Model::new()
        .method("greet", |_, args| {
            let name = args.first().and_then(Value::as_str).unwrap_or("there");
            Ok(json!(format!("hi {name}")))
        })
        .method("welcome", |instance, _| instance.call("greet", &[json!("tina")]));
    let wrapper = component_wrapper(&model);
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(instance.call("welcome", &[]).unwrap(), json!("hi tina"));
}

#[test]
fn host_errors_pass_through_unchanged() {
    let model = Model::new()
        .method("relations", |instance, _| instance.call("getRelationNodes", &[]))
        .method("child", |instance, _| instance.call("selectComponent", &[json!("#child")]));
    let wrapper = component_wrapper(&model);
    let mut host = component_host();
    let mut instance = Instance::new(&wrapper, &mut host);
    assert_eq!(
        instance.call("relations", &[]).unwrap(),
        json!("getRelationNodes:0")
    );
    assert_eq!(
        instance.call("child", &[]),
        Err(BridgeError::host("no such component"))
    );
    assert_eq!(
        instance.call("missing", &[]),
        Err(BridgeError::UnknownMember {
            flavor: FlavorKind::Component,
            name: "missing".into(),
        })
    );
}
