//! Binding records: service identifier to construction strategy.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::identifier::ServiceIdentifier;
use crate::planning::Context;
use crate::scope::Scope;

pub mod implementation;
pub mod value;

pub use implementation::{Args, ConstructorFn, Implementation};
pub use value::{AnyArc, BoxFuture, ProviderFn, Resolved};

/// Producer invoked with the resolution context (DynamicValue and Factory bindings).
pub type ProducerFn = Arc<dyn Fn(&Context) -> DiResult<AnyArc> + Send + Sync>;

/// Creator of asynchronous provider functions (Provider bindings).
pub type ProviderCreatorFn = Arc<dyn Fn(&Context) -> DiResult<ProviderFn> + Send + Sync>;

/// Discriminant of [`BindingKind`], useful for diagnostics and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "graph-export", derive(serde::Serialize))]
pub enum BindingType {
    Invalid,
    ConstantValue,
    DynamicValue,
    Constructor,
    Factory,
    Provider,
    Instance,
}

/// Construction strategy of a binding.
///
/// Every match over this type is exhaustive; a new strategy has to be handled
/// by the planner, the resolver and the plan renderer.
#[derive(Clone)]
pub enum BindingKind {
    /// Registered without an implementation, value or producer
    Invalid,
    /// Fixed value returned as is
    ConstantValue(AnyArc),
    /// Producer evaluated on every resolution
    DynamicValue(ProducerFn),
    /// The implementation itself, not instantiated
    Constructor(Arc<Implementation>),
    /// Producer returning a factory callable
    Factory(ProducerFn),
    /// Creator returning an asynchronous provider
    Provider(ProviderCreatorFn),
    /// Implementation constructed from its resolved dependencies
    Instance(Arc<Implementation>),
}

impl BindingKind {
    pub fn binding_type(&self) -> BindingType {
        match self {
            BindingKind::Invalid => BindingType::Invalid,
            BindingKind::ConstantValue(_) => BindingType::ConstantValue,
            BindingKind::DynamicValue(_) => BindingType::DynamicValue,
            BindingKind::Constructor(_) => BindingType::Constructor,
            BindingKind::Factory(_) => BindingType::Factory,
            BindingKind::Provider(_) => BindingType::Provider,
            BindingKind::Instance(_) => BindingType::Instance,
        }
    }
}

/// Name and tags used to disambiguate bindings of the same identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingMetadata {
    pub name: Option<String>,
    pub tags: BTreeMap<String, String>,
}

/// Association of a service identifier with a construction strategy and scope.
///
/// The singleton cache lives on the binding itself: it is empty until a
/// Singleton-scoped `Instance` binding is first constructed, then holds that
/// instance for as long as the binding stays registered.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Binding, BindingType, Implementation, Scope};
///
/// struct Katana;
///
/// let invalid = Binding::new("IKatana");
/// assert_eq!(invalid.binding_type(), BindingType::Invalid);
///
/// let katana = Binding::new("IKatana")
///     .to(Implementation::new::<Katana, _>(|_| Ok(Katana)))
///     .in_singleton_scope()
///     .named("sharp");
/// assert_eq!(katana.binding_type(), BindingType::Instance);
/// assert_eq!(katana.scope(), Scope::Singleton);
/// assert!(!katana.is_cached());
/// ```
pub struct Binding {
    service_identifier: ServiceIdentifier,
    kind: BindingKind,
    scope: Option<Scope>,
    metadata: BindingMetadata,
    cache: OnceCell<AnyArc>,
}

impl Binding {
    /// Creates an Invalid binding; pick a strategy with one of the `to_*` methods.
    pub fn new(service_identifier: impl Into<ServiceIdentifier>) -> Self {
        Self {
            service_identifier: service_identifier.into(),
            kind: BindingKind::Invalid,
            scope: None,
            metadata: BindingMetadata::default(),
            cache: OnceCell::new(),
        }
    }

    /// Instance binding: `implementation` is constructed from its dependencies.
    pub fn to(self, implementation: Implementation) -> Self {
        self.with_kind(BindingKind::Instance(Arc::new(implementation)))
    }

    pub fn to_constant_value<T: Any + Send + Sync>(self, value: T) -> Self {
        self.with_kind(BindingKind::ConstantValue(Arc::new(value)))
    }

    /// Constant binding for an already type-erased value.
    pub fn to_constant_any(self, value: AnyArc) -> Self {
        self.with_kind(BindingKind::ConstantValue(value))
    }

    pub fn to_dynamic_value<T, F>(self, producer: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Context) -> DiResult<T> + Send + Sync + 'static,
    {
        self.with_kind(BindingKind::DynamicValue(Arc::new(move |ctx: &Context| {
            producer(ctx).map(|value| Arc::new(value) as AnyArc)
        })))
    }

    pub fn to_constructor(self, implementation: Implementation) -> Self {
        self.with_kind(BindingKind::Constructor(Arc::new(implementation)))
    }

    /// Factory binding. `creator` returns the callable handed to the caller.
    pub fn to_factory<T, F>(self, creator: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Context) -> DiResult<T> + Send + Sync + 'static,
    {
        self.with_kind(BindingKind::Factory(Arc::new(move |ctx: &Context| {
            creator(ctx).map(|factory| Arc::new(factory) as AnyArc)
        })))
    }

    pub fn to_provider<F>(self, creator: F) -> Self
    where
        F: Fn(&Context) -> DiResult<ProviderFn> + Send + Sync + 'static,
    {
        self.with_kind(BindingKind::Provider(Arc::new(creator)))
    }

    pub fn with_kind(mut self, kind: BindingKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn in_singleton_scope(self) -> Self {
        self.in_scope(Scope::Singleton)
    }

    pub fn in_transient_scope(self) -> Self {
        self.in_scope(Scope::Transient)
    }

    /// Name matched by `Constraint::Named`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    /// Tag matched by `Constraint::Tagged`.
    pub fn tagged(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.tags.insert(key.into(), value.into());
        self
    }

    /// Fills in the scope if none was chosen explicitly.
    pub(crate) fn apply_default_scope(&mut self, scope: Scope) {
        self.scope.get_or_insert(scope);
    }

    pub fn service_identifier(&self) -> &ServiceIdentifier {
        &self.service_identifier
    }

    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }

    pub fn binding_type(&self) -> BindingType {
        self.kind.binding_type()
    }

    pub fn scope(&self) -> Scope {
        self.scope.unwrap_or_default()
    }

    pub fn metadata(&self) -> &BindingMetadata {
        &self.metadata
    }

    /// Cached singleton instance, if one has been constructed.
    pub fn cached(&self) -> Option<&AnyArc> {
        self.cache.get()
    }

    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    pub(crate) fn cache(&self) -> &OnceCell<AnyArc> {
        &self.cache
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("service_identifier", &self.service_identifier)
            .field("type", &self.binding_type())
            .field("scope", &self.scope())
            .field("metadata", &self.metadata)
            .field("cached", &self.is_cached())
            .finish()
    }
}
