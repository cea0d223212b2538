//! In-crate host doubles for unit tests.
//!
//! Integration tests use `tina-testing`; unit tests cannot, because that
//! crate links its own copy of `tina-core`.

use serde_json::Value;

use crate::error::BridgeError;
use crate::host::{Host, HostInstance, HostOptions};
use crate::{DataMap, OccurrenceId};

pub(crate) struct FakeHostInstance {
    occurrence: OccurrenceId,
    pub data: DataMap,
    pub attributes: DataMap,
    pub calls: Vec<(String, Vec<Value>)>,
}

impl FakeHostInstance {
    pub fn new(occurrence: OccurrenceId) -> Self {
        Self {
            occurrence,
            data: DataMap::new(),
            attributes: DataMap::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        if let Value::Object(data) = data {
            self.data = data;
        }
        self
    }

    pub fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.attributes.insert(name.to_owned(), value);
        self
    }
}

impl HostInstance for FakeHostInstance {
    fn occurrence(&self) -> OccurrenceId {
        self.occurrence
    }

    fn data(&self) -> &DataMap {
        &self.data
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, BridgeError> {
        self.calls.push((method.to_owned(), args.to_vec()));
        match method {
            "setData" => {
                if let Some(Value::Object(patch)) = args.first() {
                    self.data.extend(patch.clone());
                }
                Ok(Value::Null)
            }
            "hasBehavior" => Ok(Value::Bool(args.first() == Some(&Value::from("form")))),
            "selectComponent" => Err(BridgeError::host("no such component")),
            _ => Ok(Value::from(format!("{method}:{}", args.len()))),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeHost {
    pub registered: Vec<HostOptions>,
}

impl Host for FakeHost {
    fn register(&mut self, options: HostOptions) -> Result<(), BridgeError> {
        self.registered.push(options);
        Ok(())
    }
}
