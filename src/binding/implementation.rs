//! Implementation types: declared dependencies plus a constructor.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::binding::value::{AnyArc, Resolved};
use crate::error::{DiError, DiResult};
use crate::identifier::ServiceIdentifier;
use crate::planning::Dependency;

/// Type-erased constructor receiving the resolved arguments in declared order.
pub type ConstructorFn = Arc<dyn Fn(&Args) -> DiResult<AnyArc> + Send + Sync>;

/// An implementation type as seen by the kernel.
///
/// Rust cannot recover constructor parameter names or types at runtime, so
/// each implementation declares its dependencies explicitly. The planner
/// turns every [`Dependency`] into a child request and the resolver hands the
/// resolved values to the constructor as [`Args`], in the same order.
///
/// # Examples
///
/// ```rust
/// use di_kernel::{Implementation, Dependency};
/// use std::sync::Arc;
///
/// struct Blade;
/// struct Katana { blade: Arc<Blade> }
///
/// let katana = Implementation::new::<Katana, _>(|args| {
///     Ok(Katana { blade: args.get::<Blade>("blade")? })
/// })
/// .depends_on(Dependency::new("blade", "IKatanaBlade"));
///
/// assert_eq!(katana.dependencies().len(), 1);
/// assert!(katana.type_name().ends_with("Katana"));
/// ```
#[derive(Clone)]
pub struct Implementation {
    type_id: TypeId,
    type_name: &'static str,
    dependencies: Vec<Dependency>,
    ctor: ConstructorFn,
}

impl Implementation {
    /// Creates an implementation whose constructor produces a `T`.
    pub fn new<T, F>(ctor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Args) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            dependencies: Vec::new(),
            ctor: Arc::new(move |args: &Args| ctor(args).map(|value| Arc::new(value) as AnyArc)),
        }
    }

    /// Appends a constructor dependency. Order of calls is argument order.
    pub fn depends_on(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Invokes the constructor.
    pub fn construct(&self, args: &Args) -> DiResult<AnyArc> {
        (self.ctor)(args)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("type_name", &self.type_name)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

struct Arg {
    name: String,
    identifier: ServiceIdentifier,
    value: Resolved,
}

/// Resolved constructor arguments, in declared order.
///
/// Arguments can be fetched by target name or by position.
pub struct Args {
    implementation: &'static str,
    values: Vec<Arg>,
}

impl Args {
    /// Empty argument list, e.g. for constructing a `Constructor` binding by hand.
    pub fn empty() -> Self {
        Self::for_implementation("<anonymous>", 0)
    }

    pub(crate) fn for_implementation(implementation: &'static str, capacity: usize) -> Self {
        Self {
            implementation,
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, identifier: ServiceIdentifier, value: Resolved) {
        self.values.push(Arg {
            name: name.into(),
            identifier,
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|arg| arg.name.as_str())
    }

    /// Raw value by target name.
    pub fn raw(&self, name: &str) -> DiResult<&Resolved> {
        self.values
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
            .ok_or_else(|| self.missing(name))
    }

    /// Raw value by position.
    pub fn raw_at(&self, index: usize) -> DiResult<&Resolved> {
        self.values
            .get(index)
            .map(|arg| &arg.value)
            .ok_or_else(|| self.missing(&format!("#{}", index)))
    }

    /// Identifier that produced the named argument.
    pub fn identifier(&self, name: &str) -> Option<&ServiceIdentifier> {
        self.values.iter().find(|arg| arg.name == name).map(|arg| &arg.identifier)
    }

    /// Single argument by target name.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        self.raw(name)?.clone().downcast()
    }

    /// Single argument by position.
    pub fn get_at<T: Any + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        self.raw_at(index)?.clone().downcast()
    }

    /// Multi-inject argument by target name.
    pub fn get_all<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Vec<Arc<T>>> {
        self.raw(name)?.clone().downcast_all()
    }

    fn missing(&self, argument: &str) -> DiError {
        DiError::MissingArgument {
            implementation: self.implementation,
            argument: argument.to_string(),
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::empty()
    }
}
