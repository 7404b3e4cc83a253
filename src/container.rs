//! Convenience façade over the registry, planner and resolver.

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, info};

use crate::binding::{Binding, ProviderFn, Resolved};
use crate::config::ContainerOptions;
use crate::error::{DiError, DiResult};
use crate::identifier::ServiceIdentifier;
use crate::observer::{DiObserver, Observers};
use crate::planning::{Constraint, DeclaredMetadata, MetadataProvider, Plan, Planner, ResolutionHandle, Target};
use crate::registry::BindingRegistry;
use crate::resolution::Resolver;

/// Builder for a [`Container`] with custom options, metadata or observers.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Container, ContainerOptions, Scope, TracingObserver};
/// use std::sync::Arc;
///
/// let container = Container::builder()
///     .options(ContainerOptions::default().with_default_scope(Scope::Singleton))
///     .add_observer(Arc::new(TracingObserver::with_label("app")))
///     .build();
/// assert_eq!(container.options().default_scope, Scope::Singleton);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    options: ContainerOptions,
    metadata: Option<Arc<dyn MetadataProvider>>,
    observers: Observers,
}

impl ContainerBuilder {
    pub fn options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the source of constructor dependency lists.
    pub fn metadata_provider(mut self, metadata: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn add_observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub fn build(self) -> Container {
        let metadata = self.metadata.unwrap_or_else(|| Arc::new(DeclaredMetadata));
        let planner = Planner::new(metadata).with_max_depth(self.options.max_plan_depth);
        let resolver = Resolver::with_observers(self.observers);
        debug!(
            default_scope = %self.options.default_scope,
            max_plan_depth = self.options.max_plan_depth,
            "container built"
        );
        Container {
            handle: ResolutionHandle::new(Arc::new(BindingRegistry::new()), planner, resolver),
            options: Arc::new(self.options),
        }
    }
}

/// Binds identifiers and resolves them in one place.
///
/// Each resolve call creates a context, plans the requested identifier and
/// runs the resolver over that plan. Clones share the same registry and
/// singleton caches.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Binding, Container, Dependency, Implementation};
///
/// struct Katana;
/// struct Ninja {
///     katana: std::sync::Arc<Katana>,
/// }
///
/// let container = Container::new();
/// container.bind(Binding::new("Katana").to(Implementation::new::<Katana, _>(|_| Ok(Katana))));
/// container.bind(Binding::new("Ninja").to(
///     Implementation::new::<Ninja, _>(|args| Ok(Ninja { katana: args.get("katana")? }))
///         .depends_on(Dependency::new("katana", "Katana")),
/// ));
///
/// let ninja = container.get::<Ninja>("Ninja").unwrap();
/// # let _ = &ninja.katana;
/// ```
#[derive(Clone)]
pub struct Container {
    handle: ResolutionHandle,
    options: Arc<ContainerOptions>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        Self::builder().options(options).build()
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<BindingRegistry> {
        self.handle.registry()
    }

    /// Handle that can resolve from this container after being moved elsewhere.
    pub fn handle(&self) -> ResolutionHandle {
        self.handle.clone()
    }

    /// Registers a binding; bindings without an explicit scope get the default one.
    pub fn bind(&self, mut binding: Binding) -> Arc<Binding> {
        binding.apply_default_scope(self.options.default_scope);
        self.handle.registry().add(binding)
    }

    /// Removes every binding for `identifier`, dropping their cached singletons.
    pub fn unbind(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<()> {
        let identifier = identifier.into();
        let removed = self.handle.registry().remove(&identifier);
        if removed.is_empty() {
            return Err(DiError::CannotUnbind(identifier.to_string()));
        }
        info!(service = %identifier, bindings = removed.len(), "unbound");
        Ok(())
    }

    pub fn unbind_all(&self) {
        self.handle.registry().clear();
    }

    pub fn is_bound(&self, identifier: impl Into<ServiceIdentifier>) -> bool {
        self.handle.registry().contains(&identifier.into())
    }

    /// Builds the plan for `identifier` without resolving it.
    pub fn plan(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Plan> {
        let context = self.handle.create_context();
        self.handle.planner().create_plan(&context, identifier, None)
    }

    pub fn resolve(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Resolved> {
        self.handle.resolve(identifier)
    }

    pub fn resolve_named(&self, identifier: impl Into<ServiceIdentifier>, name: &str) -> DiResult<Resolved> {
        self.resolve_constrained(identifier.into(), Constraint::named(name))
    }

    pub fn resolve_tagged(
        &self,
        identifier: impl Into<ServiceIdentifier>,
        key: &str,
        value: &str,
    ) -> DiResult<Resolved> {
        self.resolve_constrained(identifier.into(), Constraint::tagged(key, value))
    }

    /// Resolves every binding of `identifier`, in registration order.
    pub fn resolve_all(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Resolved> {
        let identifier = identifier.into();
        let target = Target::new("", identifier.clone()).multi();
        self.handle.resolve_target(identifier, Some(target))
    }

    fn resolve_constrained(&self, identifier: ServiceIdentifier, constraint: Constraint) -> DiResult<Resolved> {
        let target = Target::new("", identifier.clone()).with_constraint(constraint);
        self.handle.resolve_target(identifier, Some(target))
    }

    pub fn get<T: Any + Send + Sync>(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Arc<T>> {
        self.resolve(identifier)?.downcast()
    }

    pub fn get_named<T: Any + Send + Sync>(
        &self,
        identifier: impl Into<ServiceIdentifier>,
        name: &str,
    ) -> DiResult<Arc<T>> {
        self.resolve_named(identifier, name)?.downcast()
    }

    pub fn get_tagged<T: Any + Send + Sync>(
        &self,
        identifier: impl Into<ServiceIdentifier>,
        key: &str,
        value: &str,
    ) -> DiResult<Arc<T>> {
        self.resolve_tagged(identifier, key, value)?.downcast()
    }

    pub fn get_all<T: Any + Send + Sync>(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<Vec<Arc<T>>> {
        self.resolve_all(identifier)?.downcast_all()
    }

    /// Resolves a Provider binding to its async producer.
    pub fn get_provider(&self, identifier: impl Into<ServiceIdentifier>) -> DiResult<ProviderFn> {
        let provider = self.get::<ProviderFn>(identifier)?;
        Ok(ProviderFn::clone(&provider))
    }
}
