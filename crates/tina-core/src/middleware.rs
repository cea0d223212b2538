//! Model middleware and the definition-time pipeline.
//!
//! A middleware is a function from model to model. Chains are composed right
//! to left: `compose(&[m1, m2, m3])` applied to a model equals
//! `m1(m2(m3(model)))`. The pipeline for a definition is the flavor's builtin
//! chain followed by the chain registered for that flavor at startup.
//!
//! Registered middleware lives in thread-local storage. Register everything
//! before the first `define` call that should see it; the pipeline only
//! reads a snapshot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::builtin;
use crate::error::BridgeError;
use crate::flavor::{Flavor, FlavorKind};
use crate::model::Model;
use crate::settings;

type MiddlewareFn = dyn Fn(Model) -> Result<Model, BridgeError>;

#[derive(Clone)]
pub struct Middleware(Rc<MiddlewareFn>);

impl Middleware {
    pub fn new(f: impl Fn(Model) -> Result<Model, BridgeError> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Middleware that never fails.
    pub fn map(f: impl Fn(Model) -> Model + 'static) -> Self {
        Self::new(move |model| Ok(f(model)))
    }

    pub fn apply(&self, model: Model) -> Result<Model, BridgeError> {
        (self.0)(model)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware(..)")
    }
}

/// Composes `middlewares` so the last one sees the model first and the first
/// one finalizes it. The first error stops the chain.
pub fn compose(middlewares: &[Middleware]) -> Middleware {
    let chain = middlewares.to_vec();
    Middleware::new(move |model| {
        chain
            .iter()
            .rev()
            .try_fold(model, |model, middleware| middleware.apply(model))
    })
}

#[derive(Clone, Default, Debug)]
pub struct Pipeline {
    builtins: Vec<Middleware>,
    middlewares: Vec<Middleware>,
}

impl Pipeline {
    pub fn new(builtins: Vec<Middleware>, middlewares: Vec<Middleware>) -> Self {
        Self {
            builtins,
            middlewares,
        }
    }

    /// The builtin chain for `flavor` (unless disabled in settings) followed
    /// by a snapshot of the middleware registered for it.
    pub fn for_flavor(flavor: &'static Flavor) -> Self {
        let builtins = if settings::current().builtins_enabled {
            builtin::builtins(flavor)
        } else {
            Vec::new()
        };
        Self::new(builtins, snapshot(flavor.kind))
    }

    pub fn builtins(&self) -> &[Middleware] {
        &self.builtins
    }

    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    pub fn apply(&self, model: Model) -> Result<Model, BridgeError> {
        let model = compose(&self.builtins).apply(model)?;
        if self.middlewares.is_empty() {
            return Ok(model);
        }
        compose(&self.middlewares).apply(model)
    }
}

thread_local! {
    static COMPONENT_MIDDLEWARES: RefCell<Vec<Middleware>> = const { RefCell::new(Vec::new()) };
    static PAGE_MIDDLEWARES: RefCell<Vec<Middleware>> = const { RefCell::new(Vec::new()) };
}

fn with_registered<R>(kind: FlavorKind, f: impl FnOnce(&RefCell<Vec<Middleware>>) -> R) -> R {
    match kind {
        FlavorKind::Component => COMPONENT_MIDDLEWARES.with(f),
        FlavorKind::Page => PAGE_MIDDLEWARES.with(f),
    }
}

/// Appends `middleware` to the chain used by later definitions of `kind`.
pub fn register(kind: FlavorKind, middleware: Middleware) {
    with_registered(kind, |registered| registered.borrow_mut().push(middleware));
}

/// Copy of the middleware currently registered for `kind`.
pub fn snapshot(kind: FlavorKind) -> Vec<Middleware> {
    with_registered(kind, |registered| registered.borrow().clone())
}
