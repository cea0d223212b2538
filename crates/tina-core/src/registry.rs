//! Occurrence-keyed ownership of wrappers.
//!
//! The host instance and its wrapper reference each other only through this
//! registry: the wrapper remembers its occurrence id, and the host instance is
//! found again whenever the host calls back with it. An entry is inserted once
//! at the birth event and removed when the host signals teardown.

use std::cell::RefCell;
use std::rc::Rc;

use crate::collections::map::HashMap;
use crate::error::BridgeError;
use crate::flavor::Flavor;
use crate::host::HostInstance;
use crate::instance::{Instance, Wrapper};
use crate::OccurrenceId;

pub struct Registry {
    flavor: &'static Flavor,
    links: RefCell<HashMap<OccurrenceId, Rc<Wrapper>>>,
}

impl Registry {
    pub fn new(flavor: &'static Flavor) -> Self {
        Self {
            flavor,
            links: RefCell::new(HashMap::default()),
        }
    }

    /// Links `wrapper` to its occurrence. A second link for the same
    /// occurrence is rejected and the existing wrapper stays in place.
    pub fn link(&self, wrapper: Wrapper) -> Result<(), BridgeError> {
        let occurrence = wrapper.occurrence();
        let mut links = self.links.borrow_mut();
        if links.contains_key(&occurrence) {
            log::warn!(
                "{} occurrence {occurrence} fired its birth event twice",
                self.flavor.kind
            );
            return Err(BridgeError::AlreadyLinked {
                flavor: self.flavor.kind,
                occurrence,
            });
        }
        links.insert(occurrence, Rc::new(wrapper));
        log::trace!("{} occurrence {occurrence} linked", self.flavor.kind);
        Ok(())
    }

    pub fn unlink(&self, occurrence: OccurrenceId) -> bool {
        let removed = self.links.borrow_mut().remove(&occurrence).is_some();
        if removed {
            log::trace!("{} occurrence {occurrence} unlinked", self.flavor.kind);
        }
        removed
    }

    pub fn is_linked(&self, occurrence: OccurrenceId) -> bool {
        self.links.borrow().contains_key(&occurrence)
    }

    pub fn len(&self) -> usize {
        self.links.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.borrow().is_empty()
    }

    /// Binds the wrapper linked to `host` and runs `f` against it.
    ///
    /// Nested dispatch into the same occurrence is allowed: a host method
    /// called from `f` may fire callbacks of this occurrence before it
    /// returns. The wrapper stays alive for the whole call even if teardown
    /// unlinks it meanwhile.
    pub fn dispatch<R>(
        &self,
        host: &mut dyn HostInstance,
        f: impl FnOnce(&mut Instance<'_>) -> Result<R, BridgeError>,
    ) -> Result<R, BridgeError> {
        let occurrence = host.occurrence();
        let wrapper = self
            .links
            .borrow()
            .get(&occurrence)
            .cloned()
            .ok_or(BridgeError::Unlinked {
                flavor: self.flavor.kind,
                occurrence,
            })?;
        let mut instance = Instance::new(&wrapper, host);
        f(&mut instance)
    }
}
