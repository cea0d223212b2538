//! Delegation tables generated from a flavor descriptor.
//!
//! The wrapper exposes the host instance's attributes and methods as live
//! passthroughs. Which names are passed through is fixed per flavor: the
//! exposed surface minus the names the wrapper overrides. The table is built
//! once per definition and shared by every wrapper it creates.

use crate::collections::OrderedSet;
use crate::flavor::Flavor;

#[derive(Debug, Clone, Default)]
pub struct DelegationTable {
    attributes: OrderedSet<&'static str>,
    methods: OrderedSet<&'static str>,
}

impl DelegationTable {
    pub fn for_flavor(flavor: &Flavor) -> Self {
        let attributes = flavor
            .attributes
            .iter()
            .copied()
            .filter(|name| !flavor.overridden_attributes.contains(name))
            .collect();
        let methods = flavor
            .methods
            .iter()
            .copied()
            .filter(|name| !flavor.overridden_methods.contains(name))
            .collect();
        Self {
            attributes,
            methods,
        }
    }

    pub fn delegates_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    pub fn delegates_method(&self, name: &str) -> bool {
        self.methods.contains(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.iter().copied()
    }

    pub fn methods(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().copied()
    }
}
