//! Call-scoped resolution state.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::binding::{AnyArc, Resolved};
use crate::error::DiResult;
use crate::identifier::ServiceIdentifier;
use crate::planning::{Plan, Planner, Target};
use crate::registry::BindingRegistry;
use crate::resolution::Resolver;

/// Everything needed to start a resolution: registry, planner and resolver.
///
/// Cheap to clone and `Send + Sync`, so producers can capture it to resolve
/// lazily (for example inside a Provider's future). Each call through a
/// handle runs in a fresh [`Context`].
#[derive(Clone)]
pub struct ResolutionHandle {
    registry: Arc<BindingRegistry>,
    planner: Planner,
    resolver: Resolver,
}

impl ResolutionHandle {
    pub fn new(registry: Arc<BindingRegistry>, planner: Planner, resolver: Resolver) -> Self {
        Self {
            registry,
            planner,
            resolver,
        }
    }

    pub fn registry(&self) -> &Arc<BindingRegistry> {
        &self.registry
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Fresh, empty context bound to this handle's resolver.
    pub fn create_context(&self) -> Context {
        self.planner
            .create_context_with_resolver(self.registry.clone(), self.resolver.clone())
    }

    /// Plans and resolves `identifier` in a new context.
    pub fn resolve_target(&self, identifier: ServiceIdentifier, target: Option<Target>) -> DiResult<Resolved> {
        let context = self.create_context();
        let plan = self.planner.create_plan(&context, identifier, target)?;
        context.add_plan(plan);
        self.resolver.resolve(&context)
    }

    pub fn resolve(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Resolved> {
        self.resolve_target(identifier.into(), None)
    }

    pub fn get<T: Any + Send + Sync>(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Arc<T>> {
        self.resolve(identifier)?.downcast()
    }
}

/// State shared by every request of one top-level resolve call.
///
/// Holds the stack of active plans (the top one is resolved) and the chain of
/// identifiers currently being resolved. Producers receive the context and
/// may resolve further services through it; such nested resolutions push
/// their own plan and see the in-flight chain as ancestors, so a producer
/// that asks for one of its own dependents fails with a circular dependency
/// instead of recursing.
pub struct Context {
    handle: ResolutionHandle,
    plans: RefCell<Vec<Rc<Plan>>>,
    in_flight: RefCell<Vec<ServiceIdentifier>>,
}

impl Context {
    pub(crate) fn new(handle: ResolutionHandle) -> Self {
        Self {
            handle,
            plans: RefCell::new(Vec::new()),
            in_flight: RefCell::new(Vec::new()),
        }
    }

    /// Replaces the resolver used for nested resolutions.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.handle.resolver = resolver;
        self
    }

    pub fn registry(&self) -> &Arc<BindingRegistry> {
        &self.handle.registry
    }

    /// Detached handle for resolving after this context is gone.
    pub fn handle(&self) -> ResolutionHandle {
        self.handle.clone()
    }

    /// Pushes a plan; it becomes the active plan.
    pub fn add_plan(&self, plan: Plan) -> Rc<Plan> {
        let plan = Rc::new(plan);
        self.plans.borrow_mut().push(plan.clone());
        plan
    }

    /// The plan `Resolver::resolve` will walk.
    pub fn current_plan(&self) -> Option<Rc<Plan>> {
        self.plans.borrow().last().cloned()
    }

    pub fn plan_count(&self) -> usize {
        self.plans.borrow().len()
    }

    /// Identifiers being resolved right now, outermost first.
    pub fn in_flight(&self) -> Vec<ServiceIdentifier> {
        self.in_flight.borrow().clone()
    }

    pub(crate) fn enter(&self, identifier: ServiceIdentifier) -> InFlightGuard<'_> {
        self.in_flight.borrow_mut().push(identifier);
        InFlightGuard { context: self }
    }

    /// Resolves another service within this context.
    pub fn resolve(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Resolved> {
        self.resolve_target(identifier.into(), None)
    }

    /// Resolves another service within this context, honoring `target`'s constraint.
    pub fn resolve_target(&self, identifier: ServiceIdentifier, target: Option<Target>) -> DiResult<Resolved> {
        let plan = self.handle.planner.create_plan(self, identifier, target)?;
        self.add_plan(plan);
        let _plan = PlanGuard { context: self };
        self.handle.resolver.resolve(self)
    }

    pub fn get<T: Any + Send + Sync>(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Arc<T>> {
        self.resolve(identifier)?.downcast()
    }

    /// Resolves a single value without downcasting it.
    pub fn get_any(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<AnyArc> {
        self.resolve(identifier)?.into_single()
    }
}

/// Pops the identifier pushed by [`Context::enter`].
pub(crate) struct InFlightGuard<'a> {
    context: &'a Context,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.context.in_flight.borrow_mut().pop();
    }
}

struct PlanGuard<'a> {
    context: &'a Context,
}

impl Drop for PlanGuard<'_> {
    fn drop(&mut self) {
        self.context.plans.borrow_mut().pop();
    }
}
