//! # di-kernel
//!
//! Resolution core of a dependency injection container: a binding registry,
//! a planner that expands a requested identifier into a tree of requests, and
//! a resolver that walks the tree bottom-up to build the value.
//!
//! ## Features
//!
//! - **Seven binding strategies**: constant, dynamic, constructor, factory,
//!   provider, instance and the explicit `Invalid` placeholder
//! - **Singleton and transient scopes**: singletons are built at most once,
//!   even with concurrent resolves
//! - **Circular dependency detection**: cycles fail at planning time with the
//!   full identifier path
//! - **Constraints and multi-injection**: named and tagged bindings, or every
//!   binding of an identifier at once
//!
//! ## Quick Start
//!
//! ```rust
//! use di_kernel::{Binding, Container, Dependency, Implementation};
//! use std::sync::Arc;
//!
//! struct Katana;
//! struct Shuriken;
//!
//! struct Ninja {
//!     katana: Arc<Katana>,
//!     shuriken: Arc<Shuriken>,
//! }
//!
//! let container = Container::new();
//! container.bind(Binding::new("Katana").to(Implementation::new::<Katana, _>(|_| Ok(Katana))).in_singleton_scope());
//! container.bind(Binding::new("Shuriken").to(Implementation::new::<Shuriken, _>(|_| Ok(Shuriken))));
//! container.bind(Binding::new("Ninja").to(
//!     Implementation::new::<Ninja, _>(|args| {
//!         Ok(Ninja {
//!             katana: args.get("katana")?,
//!             shuriken: args.get("shuriken")?,
//!         })
//!     })
//!     .depends_on(Dependency::new("katana", "Katana"))
//!     .depends_on(Dependency::new("shuriken", "Shuriken")),
//! ));
//!
//! let first = container.get::<Ninja>("Ninja").unwrap();
//! let second = container.get::<Ninja>("Ninja").unwrap();
//! assert!(Arc::ptr_eq(&first.katana, &second.katana));
//! assert!(!Arc::ptr_eq(&first.shuriken, &second.shuriken));
//! ```
//!
//! ## Lower-level pieces
//!
//! [`Container`] only wires the parts together. The same resolution can be
//! driven by hand:
//!
//! ```rust
//! use di_kernel::{Binding, BindingRegistry, Planner, Resolver};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(BindingRegistry::new());
//! registry.add(Binding::new("Port").to_constant_value(8080u16));
//!
//! let planner = Planner::default();
//! let context = planner.create_context(registry);
//! let plan = planner.create_plan(&context, "Port", None).unwrap();
//! context.add_plan(plan);
//!
//! let port = Resolver::new().resolve(&context).unwrap().downcast::<u16>().unwrap();
//! assert_eq!(*port, 8080);
//! ```

pub mod binding;
pub mod config;
pub mod container;
pub mod error;
pub mod identifier;
pub mod observer;
pub mod planning;
pub mod registry;
pub mod resolution;
pub mod scope;

pub use binding::{
    AnyArc, Args, Binding, BindingKind, BindingMetadata, BindingType, BoxFuture, ConstructorFn, Implementation,
    ProducerFn, ProviderCreatorFn, ProviderFn, Resolved,
};
pub use config::ContainerOptions;
pub use container::{Container, ContainerBuilder};
pub use error::{messages, DiError, DiResult};
pub use identifier::{id_of, ServiceIdentifier};
pub use observer::{DiObserver, TracingObserver};
pub use planning::{
    Constraint, Context, DeclaredMetadata, Dependency, MetadataProvider, Plan, Planner, Request, RequestId,
    ResolutionHandle, Target,
};
pub use registry::BindingRegistry;
pub use resolution::Resolver;
pub use scope::Scope;

#[cfg(feature = "graph-export")]
pub use planning::export::{BindingSnapshot, PlanSnapshot, RequestSnapshot};
