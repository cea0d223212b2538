//! Static descriptors for the two adapted host object kinds.
//!
//! A [`Flavor`] lists everything the bridge needs to know about a host kind:
//! which option keys the host accepts, which lifecycle hooks it fires (and the
//! before-hook paired with each), which attributes and methods the host
//! instance exposes, and which of those the wrapper redefines instead of
//! delegating. Descriptors are plain `static` tables and never change at
//! runtime.

use std::fmt;

/// Host method that both flavors override on the wrapper.
pub const SET_DATA: &str = "setData";

/// Host attribute that both flavors override on the wrapper.
pub const DATA: &str = "data";

/// Wrapper member consulted by `setData` to derive computed fields.
pub const COMPUTE: &str = "compute";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlavorKind {
    Component,
    Page,
}

impl FlavorKind {
    pub fn flavor(self) -> &'static Flavor {
        match self {
            FlavorKind::Component => &COMPONENT,
            FlavorKind::Page => &PAGE,
        }
    }
}

impl fmt::Display for FlavorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlavorKind::Component => f.write_str("component"),
            FlavorKind::Page => f.write_str("page"),
        }
    }
}

/// A lifecycle hook and the before-hook the wrapper runs ahead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    pub name: &'static str,
    pub before: &'static str,
}

impl Hook {
    const fn new(name: &'static str, before: &'static str) -> Self {
        Self { name, before }
    }
}

#[derive(Debug)]
pub struct Flavor {
    pub kind: FlavorKind,
    /// Every option key the host registration primitive accepts.
    pub options: &'static [&'static str],
    /// Lifecycle hooks in host firing order.
    pub hooks: &'static [Hook],
    pub methods: &'static [&'static str],
    pub attributes: &'static [&'static str],
    /// Hook at which the wrapper is constructed and linked.
    pub birth: &'static str,
    /// Hook after which the wrapper is dropped from the registry.
    pub teardown: &'static str,
    /// Hook whose before-hook the `initial` builtin seeds computed data from.
    pub initial: &'static str,
    pub overridden_methods: &'static [&'static str],
    pub overridden_attributes: &'static [&'static str],
}

pub static COMPONENT: Flavor = Flavor {
    kind: FlavorKind::Component,
    options: &[
        "properties",
        "data",
        "methods",
        "behaviors",
        "created",
        "attached",
        "ready",
        "moved",
        "detached",
        "relations",
        "options",
    ],
    hooks: &[
        Hook::new("created", "beforeCreate"),
        Hook::new("attached", "beforeAttach"),
        Hook::new("ready", "beforeReady"),
        // The host fires `moved`, not `move`; the before-hook keeps its short name.
        Hook::new("moved", "beforeMove"),
        Hook::new("detached", "beforeDetach"),
    ],
    methods: &[
        SET_DATA,
        "hasBehavior",
        "triggerEvent",
        "createSelectorQuery",
        "selectComponent",
        "selectAllComponents",
        "getRelationNodes",
    ],
    attributes: &["is", "id", "dataset", DATA],
    birth: "created",
    teardown: "detached",
    initial: "attached",
    overridden_methods: &[SET_DATA],
    overridden_attributes: &[DATA],
};

pub static PAGE: Flavor = Flavor {
    kind: FlavorKind::Page,
    options: &[
        "data",
        "onLoad",
        "onReady",
        "onShow",
        "onHide",
        "onUnload",
        "onPullDownRefresh",
        "onReachBottom",
        "onShareAppMessage",
        "onPageScroll",
    ],
    hooks: &[
        Hook::new("onLoad", "beforeLoad"),
        Hook::new("onReady", "beforeReady"),
        Hook::new("onShow", "beforeShow"),
        Hook::new("onHide", "beforeHide"),
        Hook::new("onUnload", "beforeUnload"),
        Hook::new("onPullDownRefresh", "beforePullDownRefresh"),
        Hook::new("onReachBottom", "beforeReachBottom"),
        Hook::new("onShareAppMessage", "beforeShareAppMessage"),
        Hook::new("onPageScroll", "beforePageScroll"),
    ],
    methods: &[SET_DATA],
    attributes: &[DATA, "route"],
    birth: "onLoad",
    teardown: "onUnload",
    initial: "onLoad",
    overridden_methods: &[SET_DATA],
    overridden_attributes: &[DATA],
};

impl Flavor {
    pub fn hook(&self, name: &str) -> Option<&'static Hook> {
        self.hooks.iter().find(|hook| hook.name == name)
    }

    pub fn before_hook(&self, name: &str) -> Option<&'static str> {
        self.hook(name).map(|hook| hook.before)
    }

    pub fn is_hook(&self, name: &str) -> bool {
        self.hook(name).is_some()
    }

    pub fn is_before_hook(&self, name: &str) -> bool {
        self.hooks.iter().any(|hook| hook.before == name)
    }

    /// Whether `name` becomes a wrapper member when present in a model.
    pub fn is_lifecycle_name(&self, name: &str) -> bool {
        self.is_hook(name) || self.is_before_hook(name)
    }

    /// Option keys copied verbatim from the model into the host options.
    pub fn host_option_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.options
            .iter()
            .copied()
            .filter(move |name| !self.is_hook(name))
    }

    pub fn is_overridden(&self, name: &str) -> bool {
        self.overridden_methods.contains(&name) || self.overridden_attributes.contains(&name)
    }
}
