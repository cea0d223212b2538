use std::collections::BTreeMap;

use tina_core::{
    BridgeError, DataMap, Host, HostCallback, HostInstance, HostOptions, OccurrenceId, Value,
};

/// A host method call observed by a [`TestInstance`].
#[derive(Debug, Clone, PartialEq)]
pub struct HostCall {
    pub method: String,
    pub args: Vec<Value>,
}

/// Host-owned object for one occurrence.
///
/// `setData` merges its first argument into the instance data. A method with
/// a handler installed by [`on_invoke`] runs that handler against this
/// instance, the way a host fires a bound event handler synchronously. Every
/// other method returns the canned response registered with [`respond`], or
/// `null`. All calls are recorded.
///
/// [`on_invoke`]: TestInstance::on_invoke
/// [`respond`]: TestInstance::respond
#[derive(Debug, Clone, Default)]
pub struct TestInstance {
    occurrence: OccurrenceId,
    registration: usize,
    data: DataMap,
    attributes: DataMap,
    responses: BTreeMap<String, Result<Value, String>>,
    handlers: BTreeMap<String, HostCallback>,
    calls: Vec<HostCall>,
}

impl TestInstance {
    pub fn new(occurrence: OccurrenceId) -> Self {
        Self {
            occurrence,
            ..Self::default()
        }
    }

    pub fn registration(&self) -> usize {
        self.registration
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Replaces a data entry without going through `setData`, as the host
    /// would after its own update.
    pub fn set_data_entry(&mut self, name: impl Into<String>, value: Value) {
        self.data.insert(name.into(), value);
    }

    pub fn respond(&mut self, method: impl Into<String>, value: Value) {
        self.responses.insert(method.into(), Ok(value));
    }

    pub fn fail(&mut self, method: impl Into<String>, message: impl Into<String>) {
        self.responses.insert(method.into(), Err(message.into()));
    }

    /// Runs `handler` with this instance whenever `method` is invoked.
    pub fn on_invoke(&mut self, method: impl Into<String>, handler: HostCallback) {
        self.handlers.insert(method.into(), handler);
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn calls_to(&self, method: &str) -> Vec<&HostCall> {
        self.calls.iter().filter(|call| call.method == method).collect()
    }
}

impl HostInstance for TestInstance {
    fn occurrence(&self) -> OccurrenceId {
        self.occurrence
    }

    fn data(&self) -> &DataMap {
        &self.data
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        if name == "data" {
            return Some(Value::Object(self.data.clone()));
        }
        self.attributes.get(name).cloned()
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, BridgeError> {
        self.calls.push(HostCall {
            method: method.to_owned(),
            args: args.to_vec(),
        });
        if method == "setData" {
            return match args.first() {
                Some(Value::Object(patch)) => {
                    self.data.extend(patch.clone());
                    Ok(Value::Null)
                }
                _ => Err(BridgeError::host("setData expects an object")),
            };
        }
        if let Some(handler) = self.handlers.get(method).cloned() {
            return handler.call(self, args);
        }
        match self.responses.get(method) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(BridgeError::host(message.clone())),
            None => Ok(Value::Null),
        }
    }
}

/// Host double accepting any number of registrations.
#[derive(Default)]
pub struct TestHost {
    registrations: Vec<HostOptions>,
    instances: BTreeMap<OccurrenceId, TestInstance>,
    next_occurrence: OccurrenceId,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrations(&self) -> &[HostOptions] {
        &self.registrations
    }

    pub fn last_registration(&self) -> Option<&HostOptions> {
        self.registrations.last()
    }

    /// Creates an occurrence of the latest registration and fires its birth
    /// event.
    pub fn mount(&mut self, args: &[Value]) -> Result<OccurrenceId, BridgeError> {
        let registration = self
            .registrations
            .len()
            .checked_sub(1)
            .ok_or_else(|| BridgeError::host("nothing registered"))?;
        self.mount_with(registration, |_| {}, args)
    }

    /// Creates an occurrence of `registration`, lets `setup` prepare host
    /// attributes, seeds its data from the registered options, and fires the
    /// birth event once.
    pub fn mount_with(
        &mut self,
        registration: usize,
        setup: impl FnOnce(&mut TestInstance),
        args: &[Value],
    ) -> Result<OccurrenceId, BridgeError> {
        let options = self
            .registrations
            .get(registration)
            .ok_or_else(|| BridgeError::host(format!("no registration {registration}")))?;
        let birth = options.flavor.flavor().birth;
        let callback = lifecycle(options, birth)?;

        self.next_occurrence += 1;
        let occurrence = self.next_occurrence;
        let mut instance = TestInstance::new(occurrence);
        instance.registration = registration;
        if let Some(Value::Object(data)) = options.options.get("data") {
            instance.data = data.clone();
        }
        setup(&mut instance);
        let instance = self.instances.entry(occurrence).or_insert(instance);
        callback.call(instance, args)?;
        Ok(occurrence)
    }

    /// Fires lifecycle event `hook` for `occurrence`.
    pub fn fire(
        &mut self,
        occurrence: OccurrenceId,
        hook: &str,
        args: &[Value],
    ) -> Result<Value, BridgeError> {
        let callback = lifecycle(self.options_for(occurrence)?, hook)?;
        callback.call(self.instance_entry(occurrence)?, args)
    }

    /// Calls registered method `name` on `occurrence`, as an event handler
    /// bound in the host template would.
    pub fn call(
        &mut self,
        occurrence: OccurrenceId,
        name: &str,
        args: &[Value],
    ) -> Result<Value, BridgeError> {
        let callback = self
            .options_for(occurrence)?
            .method(name)
            .cloned()
            .ok_or_else(|| BridgeError::host(format!("no method {name}")))?;
        callback.call(self.instance_entry(occurrence)?, args)
    }

    /// Fires the teardown event and forgets the occurrence.
    pub fn unmount(&mut self, occurrence: OccurrenceId) -> Result<Value, BridgeError> {
        let teardown = self.options_for(occurrence)?.flavor.flavor().teardown;
        let result = self.fire(occurrence, teardown, &[]);
        self.instances.remove(&occurrence);
        result
    }

    /// The registered method or lifecycle callback `name` of `occurrence`'s
    /// registration, methods first.
    pub fn callback(&self, occurrence: OccurrenceId, name: &str) -> Option<HostCallback> {
        let options = self.options_for(occurrence).ok()?;
        options
            .method(name)
            .or_else(|| options.lifecycle(name))
            .cloned()
    }

    pub fn instance(&self, occurrence: OccurrenceId) -> Option<&TestInstance> {
        self.instances.get(&occurrence)
    }

    pub fn instance_mut(&mut self, occurrence: OccurrenceId) -> Option<&mut TestInstance> {
        self.instances.get_mut(&occurrence)
    }

    fn options_for(&self, occurrence: OccurrenceId) -> Result<&HostOptions, BridgeError> {
        let instance = self
            .instances
            .get(&occurrence)
            .ok_or_else(|| BridgeError::host(format!("no occurrence {occurrence}")))?;
        Ok(&self.registrations[instance.registration])
    }

    fn instance_entry(&mut self, occurrence: OccurrenceId) -> Result<&mut TestInstance, BridgeError> {
        self.instances
            .get_mut(&occurrence)
            .ok_or_else(|| BridgeError::host(format!("no occurrence {occurrence}")))
    }
}

fn lifecycle(options: &HostOptions, hook: &str) -> Result<HostCallback, BridgeError> {
    options
        .lifecycle(hook)
        .cloned()
        .ok_or_else(|| BridgeError::host(format!("no lifecycle {hook}")))
}

impl Host for TestHost {
    fn register(&mut self, options: HostOptions) -> Result<(), BridgeError> {
        self.registrations.push(options);
        Ok(())
    }
}
